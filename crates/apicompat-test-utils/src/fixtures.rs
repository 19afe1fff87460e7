//! Builders for declaration trees, mirroring what the front end emits.

use apicompat_core::{Decl, Expr, Field, FieldList, FuncDecl, Package, SourceFile, TypeNode};

pub fn int() -> TypeNode {
    TypeNode::basic("int")
}

pub fn string() -> TypeNode {
    TypeNode::basic("string")
}

pub fn error() -> TypeNode {
    TypeNode::error()
}

pub fn unnamed(ty: TypeNode) -> Field {
    Field::unnamed(Expr::Type(ty))
}

pub fn named_field<'a>(names: impl IntoIterator<Item = &'a str>, ty: TypeNode) -> Field {
    Field::named(names, Expr::Type(ty))
}

/// `name ...elem`
pub fn variadic(name: &str, elem: TypeNode) -> Field {
    Field::named([name], Expr::Ellipsis(elem))
}

pub fn func(name: &str, params: Vec<Field>, results: Vec<Field>) -> FuncDecl {
    FuncDecl {
        name: name.to_string(),
        recv: None,
        params: FieldList::new(params),
        results: FieldList::new(results),
    }
}

/// A method on `*recv`.
pub fn method(recv: TypeNode, name: &str, params: Vec<Field>, results: Vec<Field>) -> FuncDecl {
    FuncDecl {
        recv: Some(FieldList::new(vec![unnamed(TypeNode::pointer(recv))])),
        ..func(name, params, results)
    }
}

/// A package with a single file holding `funcs`.
pub fn package(path: &str, name: &str, funcs: Vec<FuncDecl>) -> Package {
    Package {
        path: path.to_string(),
        name: name.to_string(),
        files: vec![SourceFile {
            name: format!("{name}.go"),
            decls: funcs.into_iter().map(Decl::Func).collect(),
        }],
        errors: Vec::new(),
    }
}

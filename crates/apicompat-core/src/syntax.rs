use serde::{Deserialize, Serialize};

use crate::types::TypeNode;

/// A loaded and type-checked package as delivered by the front end.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Package {
    /// Import path, e.g. `example.com/m/store`.
    pub path: String,
    /// Package clause name, e.g. `store`.
    pub name: String,
    #[serde(default)]
    pub files: Vec<SourceFile>,
    /// Load or type-check errors reported by the front end.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Package {
    /// All top-level function declarations, file by file, in declaration order.
    pub fn func_decls(&self) -> impl Iterator<Item = &FuncDecl> {
        self.files
            .iter()
            .flat_map(|file| file.decls.iter())
            .filter_map(|decl| match decl {
                Decl::Func(func) => Some(func),
                Decl::Gen(_) => None,
            })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SourceFile {
    pub name: String,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

/// A top-level declaration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum Decl {
    Func(FuncDecl),
    /// `import`, `const`, `type` or `var`; carried but never snapshotted.
    Gen(GenDecl),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenDecl {
    pub tok: GenToken,
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GenToken {
    Import,
    Const,
    Type,
    Var,
}

// ANCHOR: FuncDecl
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    /// Receiver list; present only for methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recv: Option<FieldList>,
    #[serde(default)]
    pub params: FieldList,
    #[serde(default)]
    pub results: FieldList,
}
//ANCHOR_END: FuncDecl

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }
}

/// Parameter, result or receiver list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct FieldList {
    pub list: Vec<Field>,
}

impl FieldList {
    pub fn new(list: Vec<Field>) -> Self {
        Self { list }
    }

    /// Number of slots the list declares: each name counts once and an unnamed field
    /// counts as one.
    pub fn num_fields(&self) -> usize {
        self.list.iter().map(Field::arity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// One entry of a field list; `a, b int` binds two names to one type expression.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Field {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(rename = "type")]
    pub ty: Expr,
}

impl Field {
    pub fn unnamed(ty: Expr) -> Self {
        Self { names: Vec::new(), ty }
    }

    pub fn named<S: Into<String>>(names: impl IntoIterator<Item = S>, ty: Expr) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ty,
        }
    }

    /// Slots this field occupies in its list.
    pub fn arity(&self) -> usize {
        self.names.len().max(1)
    }
}

/// A type expression with its resolved type attached.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Type(TypeNode),
    /// `...elt` in the last parameter position.
    Ellipsis(TypeNode),
}

impl Expr {
    pub fn is_ellipsis(&self) -> bool {
        matches!(self, Expr::Ellipsis(_))
    }

    pub fn resolved(&self) -> TypeNode {
        match self {
            Expr::Type(ty) => ty.clone(),
            Expr::Ellipsis(elt) => TypeNode::slice(elt.clone()),
        }
    }
}

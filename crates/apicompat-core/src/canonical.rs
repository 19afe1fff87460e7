use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Portable, re-emittable form of a resolved type.
///
/// Unlike [`TypeNode`](crate::TypeNode) this only has shapes a snapshot can name, and
/// package references are kept as import paths so the renderer can assign aliases.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CanonicalType {
    /// Predeclared identifier (`int`, `error`) or a type with no owning package.
    Ident { name: String },
    /// Package-qualified reference, `path.name`.
    Qual { path: String, name: String },
    Pointer { elem: Box<CanonicalType> },
    Slice { elem: Box<CanonicalType> },
    Map {
        key: Box<CanonicalType>,
        value: Box<CanonicalType>,
    },
    Func(FuncSignature),
    EmptyInterface,
}

/// A reconstructed function type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Default)]
pub struct FuncSignature {
    pub params: Vec<Param>,
    pub results: Results,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub ty: CanonicalType,
    /// Rendered as `...ty`; only ever set on the last parameter.
    #[serde(default)]
    pub variadic: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Default)]
#[serde(tag = "arity", content = "types", rename_all = "snake_case")]
pub enum Results {
    #[default]
    None,
    Single(Box<CanonicalType>),
    Tuple(Vec<CanonicalType>),
}

impl CanonicalType {
    pub fn ident(name: impl Into<String>) -> Self {
        CanonicalType::Ident { name: name.into() }
    }

    pub fn qual(path: impl Into<String>, name: impl Into<String>) -> Self {
        CanonicalType::Qual {
            path: path.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: CanonicalType) -> Self {
        CanonicalType::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: CanonicalType) -> Self {
        CanonicalType::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn map(key: CanonicalType, value: CanonicalType) -> Self {
        CanonicalType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Collects the import paths this type refers to.
    pub fn collect_paths<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            CanonicalType::Ident { .. } | CanonicalType::EmptyInterface => {}
            CanonicalType::Qual { path, .. } => {
                out.insert(path.as_str());
            }
            CanonicalType::Pointer { elem } | CanonicalType::Slice { elem } => {
                elem.collect_paths(out)
            }
            CanonicalType::Map { key, value } => {
                key.collect_paths(out);
                value.collect_paths(out);
            }
            CanonicalType::Func(sig) => sig.collect_paths(out),
        }
    }
}

impl Param {
    pub fn new(ty: CanonicalType) -> Self {
        Self {
            ty,
            variadic: false,
        }
    }

    pub fn variadic(ty: CanonicalType) -> Self {
        Self { ty, variadic: true }
    }
}

impl Results {
    /// Builds the result clause for an ordered list of result types.
    pub fn from_types(mut types: Vec<CanonicalType>) -> Self {
        match types.len() {
            0 => Results::None,
            1 => Results::Single(Box::new(types.remove(0))),
            _ => Results::Tuple(types),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Results::None => 0,
            Results::Single(_) => 1,
            Results::Tuple(types) => types.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Results::None)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalType> {
        let slice: &[CanonicalType] = match self {
            Results::None => &[],
            Results::Single(ty) => std::slice::from_ref(&**ty),
            Results::Tuple(types) => types,
        };
        slice.iter()
    }
}

impl FuncSignature {
    pub fn collect_paths<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        for param in &self.params {
            param.ty.collect_paths(out);
        }
        for result in self.results.iter() {
            result.collect_paths(out);
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.params.last().is_some_and(|p| p.variadic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn results_arity_follows_type_count() {
        assert_eq!(Results::from_types(vec![]), Results::None);
        assert_eq!(
            Results::from_types(vec![CanonicalType::ident("int")]),
            Results::Single(Box::new(CanonicalType::ident("int")))
        );
        let tuple = Results::from_types(vec![CanonicalType::ident("int"), CanonicalType::ident("error")]);
        assert_eq!(tuple.len(), 2);
        assert_eq!(
            tuple.iter().cloned().collect::<Vec<_>>(),
            vec![CanonicalType::ident("int"), CanonicalType::ident("error")]
        );
    }

    #[test]
    fn collects_nested_paths_once() {
        let sig = FuncSignature {
            params: vec![
                Param::new(CanonicalType::map(
                    CanonicalType::qual("example.com/m/a", "Key"),
                    CanonicalType::pointer(CanonicalType::qual("example.com/m/b", "V")),
                )),
                Param::variadic(CanonicalType::qual("example.com/m/a", "Opt")),
            ],
            results: Results::from_types(vec![CanonicalType::Func(FuncSignature {
                params: vec![Param::new(CanonicalType::qual("io", "Reader"))],
                results: Results::None,
            })]),
        };
        let mut paths = BTreeSet::new();
        sig.collect_paths(&mut paths);
        assert_eq!(
            paths.into_iter().collect::<Vec<_>>(),
            vec!["example.com/m/a", "example.com/m/b", "io"]
        );
        assert!(sig.is_variadic());
    }
}

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

// ANCHOR: TypeNode
/// A resolved static type, as reported by the analysis front end.
///
/// The set of variants is closed. Only some of them can be carried into a snapshot
/// (see `apicompat_snapshot::convert`); the rest exist so that a front end can describe
/// every type it meets and the converter can reject them by name instead of guessing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    /// Predeclared basic type such as `int`, `string` or `uintptr`.
    Basic { name: String },
    /// A defined type. `package` is `None` for universe-scope types (`error`).
    Named {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<String>,
        name: String,
        exported: bool,
    },
    Pointer { elem: Box<TypeNode> },
    Slice { elem: Box<TypeNode> },
    Map {
        key: Box<TypeNode>,
        value: Box<TypeNode>,
    },
    /// A function type. When `variadic` is set the last parameter is a slice whose
    /// element type is the variadic element.
    Signature {
        #[serde(default)]
        params: Vec<TypeNode>,
        #[serde(default)]
        results: Vec<TypeNode>,
        #[serde(default)]
        variadic: bool,
    },
    /// An anonymous interface; empty `methods` is the "any value" interface.
    Interface {
        #[serde(default)]
        methods: Vec<String>,
    },
    //ANCHOR_END: TypeNode
    // Shapes the front end may report but a snapshot cannot express.
    Array { len: u64, elem: Box<TypeNode> },
    Chan { dir: ChanDir, elem: Box<TypeNode> },
    Struct {
        #[serde(default)]
        fields: Vec<TypeNode>,
    },
    Tuple {
        #[serde(default)]
        elems: Vec<TypeNode>,
    },
    TypeParam { name: String },
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

impl TypeNode {
    pub fn basic(name: impl Into<String>) -> Self {
        TypeNode::Basic { name: name.into() }
    }

    /// A named type declared in `package`; exportedness follows the name.
    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        TypeNode::Named {
            package: Some(package.into()),
            exported: crate::is_exported(&name),
            name,
        }
    }

    /// The universe-scope `error` interface.
    pub fn error() -> Self {
        TypeNode::Named {
            package: None,
            name: crate::UNIVERSE_ERROR.to_string(),
            exported: false,
        }
    }

    pub fn pointer(elem: TypeNode) -> Self {
        TypeNode::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeNode) -> Self {
        TypeNode::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn map(key: TypeNode, value: TypeNode) -> Self {
        TypeNode::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn empty_interface() -> Self {
        TypeNode::Interface {
            methods: Vec::new(),
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            TypeNode::Basic { .. } => "basic",
            TypeNode::Named { .. } => "named",
            TypeNode::Pointer { .. } => "pointer",
            TypeNode::Slice { .. } => "slice",
            TypeNode::Map { .. } => "map",
            TypeNode::Signature { .. } => "signature",
            TypeNode::Interface { .. } => "interface",
            TypeNode::Array { .. } => "array",
            TypeNode::Chan { .. } => "chan",
            TypeNode::Struct { .. } => "struct",
            TypeNode::Tuple { .. } => "tuple",
            TypeNode::TypeParam { .. } => "type parameter",
        }
    }
}

/// Go-style type string with fully qualified package paths, e.g.
/// `map[string]*example.com/m/p.T`.
impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Basic { name } => f.write_str(name),
            TypeNode::Named { package, name, .. } => match package.as_deref() {
                Some(pkg) if !pkg.is_empty() => write!(f, "{pkg}.{name}"),
                _ => f.write_str(name),
            },
            TypeNode::Pointer { elem } => write!(f, "*{elem}"),
            TypeNode::Slice { elem } => write!(f, "[]{elem}"),
            TypeNode::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeNode::Signature {
                params,
                results,
                variadic,
            } => {
                f.write_str("func(")?;
                let last = params.len().saturating_sub(1);
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match param {
                        TypeNode::Slice { elem } if *variadic && i == last => write!(f, "...{elem}")?,
                        other => write!(f, "{other}")?,
                    }
                }
                f.write_str(")")?;
                match results.as_slice() {
                    [] => Ok(()),
                    [single] => write!(f, " {single}"),
                    many => write!(f, " ({})", many.iter().join(", ")),
                }
            }
            TypeNode::Interface { methods } if methods.is_empty() => f.write_str("interface{}"),
            TypeNode::Interface { methods } => {
                write!(f, "interface{{{}}}", methods.iter().map(|m| format!("{m}()")).join("; "))
            }
            TypeNode::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeNode::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            TypeNode::Struct { fields } => write!(f, "struct{{{}}}", fields.iter().join("; ")),
            TypeNode::Tuple { elems } => write!(f, "({})", elems.iter().join(", ")),
            TypeNode::TypeParam { name } => f.write_str(name),
        }
    }
}

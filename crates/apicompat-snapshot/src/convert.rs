//! Resolved type -> canonical type.
//!
//! [`convert`] is a pure recursive function over the closed [`TypeNode`] enum. Every
//! shape either has a canonical form or is rejected with a [`ConvertError`]; there is no
//! catch-all arm, so a new `TypeNode` variant fails to compile here until it is handled.

use apicompat_core::{CanonicalType, FuncSignature, Param, Results, TypeNode, UNIVERSE_ERROR};

use crate::error::ConvertError;

pub fn convert(ty: &TypeNode) -> Result<CanonicalType, ConvertError> {
    match ty {
        TypeNode::Basic { name } => Ok(CanonicalType::ident(name)),
        TypeNode::Named {
            package,
            name,
            exported,
        } => convert_named(package.as_deref().unwrap_or_default(), name, *exported),
        TypeNode::Pointer { elem } => Ok(CanonicalType::pointer(convert(elem)?)),
        TypeNode::Slice { elem } => Ok(CanonicalType::slice(convert(elem)?)),
        TypeNode::Map { key, value } => {
            let key = convert(key)?;
            let value = convert(value)?;
            Ok(CanonicalType::map(key, value))
        }
        TypeNode::Signature {
            params,
            results,
            variadic,
        } => {
            if *variadic && !matches!(params.last(), Some(TypeNode::Slice { .. })) {
                return Err(ConvertError::MalformedVariadic(ty.to_string()));
            }
            convert_signature(params, results, *variadic).map(CanonicalType::Func)
        }
        TypeNode::Interface { methods } if methods.is_empty() => Ok(CanonicalType::EmptyInterface),
        TypeNode::Interface { .. } => Err(ConvertError::AnonymousInterface),
        TypeNode::Array { .. }
        | TypeNode::Chan { .. }
        | TypeNode::Struct { .. }
        | TypeNode::Tuple { .. }
        | TypeNode::TypeParam { .. } => Err(ConvertError::UnimplementedShape {
            shape: ty.shape(),
            ty: ty.to_string(),
        }),
    }
}

fn convert_named(package: &str, name: &str, exported: bool) -> Result<CanonicalType, ConvertError> {
    if name == UNIVERSE_ERROR && package.is_empty() {
        return Ok(CanonicalType::ident(UNIVERSE_ERROR));
    }
    if !exported {
        let qualified = if package.is_empty() {
            name.to_string()
        } else {
            format!("{package}.{name}")
        };
        return Err(ConvertError::UnexportedType(qualified));
    }
    if package.is_empty() {
        Ok(CanonicalType::ident(name))
    } else {
        Ok(CanonicalType::qual(package, name))
    }
}

/// Converts a function type. Parameters and results keep their declared order; a
/// variadic signature's trailing slice becomes a variadic parameter over its element.
pub fn convert_signature(
    params: &[TypeNode],
    results: &[TypeNode],
    variadic: bool,
) -> Result<FuncSignature, ConvertError> {
    let last = params.len().checked_sub(1);
    let params = params
        .iter()
        .enumerate()
        .map(|(i, param)| match param {
            TypeNode::Slice { elem } if variadic && Some(i) == last => convert(elem).map(Param::variadic),
            _ if variadic && Some(i) == last => Err(ConvertError::MalformedVariadic(param.to_string())),
            _ => convert(param).map(Param::new),
        })
        .collect::<Result<Vec<_>, _>>()?;
    if variadic && last.is_none() {
        return Err(ConvertError::MalformedVariadic("func()".to_string()));
    }

    let results = results.iter().map(convert).collect::<Result<Vec<_>, _>>()?;
    Ok(FuncSignature {
        params,
        results: Results::from_types(results),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicompat_core::ChanDir;
    use pretty_assertions::assert_eq;

    const PKG: &str = "example.com/m/p";

    #[test]
    fn basic_types_are_identifiers() {
        assert_eq!(convert(&TypeNode::basic("uintptr")), Ok(CanonicalType::ident("uintptr")));
    }

    #[test]
    fn universe_error_is_allowed() {
        assert_eq!(convert(&TypeNode::error()), Ok(CanonicalType::ident("error")));
    }

    #[test]
    fn exported_named_types_are_qualified() {
        assert_eq!(
            convert(&TypeNode::named(PKG, "Config")),
            Ok(CanonicalType::qual(PKG, "Config"))
        );
        let unowned = TypeNode::Named {
            package: Some(String::new()),
            name: "Thing".into(),
            exported: true,
        };
        assert_eq!(convert(&unowned), Ok(CanonicalType::ident("Thing")));
    }

    #[test]
    fn unexported_named_type_is_rejected_wherever_it_nests() {
        let hidden = TypeNode::named(PKG, "handle");
        let expected = Err(ConvertError::UnexportedType(format!("{PKG}.handle")));

        assert_eq!(convert(&hidden), expected);
        assert_eq!(convert(&TypeNode::pointer(hidden.clone())), expected);
        assert_eq!(convert(&TypeNode::slice(TypeNode::pointer(hidden.clone()))), expected);
        assert_eq!(
            convert(&TypeNode::map(TypeNode::basic("string"), hidden.clone())),
            expected
        );
        assert_eq!(
            convert(&TypeNode::map(hidden.clone(), TypeNode::basic("string"))),
            expected
        );
        let callback = TypeNode::Signature {
            params: vec![TypeNode::basic("int")],
            results: vec![hidden],
            variadic: false,
        };
        assert_eq!(convert(&callback), expected);
    }

    #[test]
    fn map_key_failure_wins_over_value_failure() {
        let ty = TypeNode::map(
            TypeNode::named(PKG, "key"),
            TypeNode::Interface {
                methods: vec!["Close".into()],
            },
        );
        assert_eq!(convert(&ty), Err(ConvertError::UnexportedType(format!("{PKG}.key"))));
    }

    #[test]
    fn composite_shapes_wrap_their_elements() {
        let ty = TypeNode::map(
            TypeNode::basic("string"),
            TypeNode::slice(TypeNode::pointer(TypeNode::named(PKG, "Item"))),
        );
        assert_eq!(
            convert(&ty),
            Ok(CanonicalType::map(
                CanonicalType::ident("string"),
                CanonicalType::slice(CanonicalType::pointer(CanonicalType::qual(PKG, "Item"))),
            ))
        );
    }

    #[test]
    fn interfaces() {
        assert_eq!(convert(&TypeNode::empty_interface()), Ok(CanonicalType::EmptyInterface));
        let non_empty = TypeNode::Interface {
            methods: vec!["Read".into()],
        };
        assert_eq!(convert(&non_empty), Err(ConvertError::AnonymousInterface));
    }

    #[test]
    fn callback_result_arity() {
        let sig = |results: Vec<TypeNode>| TypeNode::Signature {
            params: vec![TypeNode::basic("string")],
            results,
            variadic: false,
        };
        let Ok(CanonicalType::Func(none)) = convert(&sig(vec![])) else {
            panic!("expected a function type");
        };
        assert_eq!(none.results, Results::None);

        let Ok(CanonicalType::Func(single)) = convert(&sig(vec![TypeNode::error()])) else {
            panic!("expected a function type");
        };
        assert_eq!(single.results, Results::Single(Box::new(CanonicalType::ident("error"))));

        let Ok(CanonicalType::Func(tuple)) =
            convert(&sig(vec![TypeNode::basic("int"), TypeNode::error()]))
        else {
            panic!("expected a function type");
        };
        assert_eq!(
            tuple.results,
            Results::Tuple(vec![CanonicalType::ident("int"), CanonicalType::ident("error")])
        );
    }

    #[test]
    fn variadic_callback_keeps_variadic_marker() {
        let ty = TypeNode::Signature {
            params: vec![
                TypeNode::basic("string"),
                TypeNode::slice(TypeNode::empty_interface()),
            ],
            results: vec![],
            variadic: true,
        };
        let Ok(CanonicalType::Func(sig)) = convert(&ty) else {
            panic!("expected a function type");
        };
        assert_eq!(
            sig.params,
            vec![
                Param::new(CanonicalType::ident("string")),
                Param::variadic(CanonicalType::EmptyInterface),
            ]
        );
    }

    #[test]
    fn malformed_variadic_is_reported_with_signature() {
        let ty = TypeNode::Signature {
            params: vec![TypeNode::basic("int")],
            results: vec![],
            variadic: true,
        };
        assert_eq!(
            convert(&ty),
            Err(ConvertError::MalformedVariadic("func(int)".into()))
        );

        // the diagnostic names the signature that is malformed, not its enclosing one
        let outer = TypeNode::Signature {
            params: vec![ty],
            results: vec![],
            variadic: false,
        };
        assert_eq!(
            convert(&outer),
            Err(ConvertError::MalformedVariadic("func(int)".into()))
        );
        let outer_variadic = TypeNode::Signature {
            params: vec![TypeNode::slice(outer)],
            results: vec![],
            variadic: true,
        };
        assert_eq!(
            convert(&outer_variadic),
            Err(ConvertError::MalformedVariadic("func(int)".into()))
        );
    }

    #[test]
    fn unsupported_shapes_are_converter_defects() {
        let chan = TypeNode::Chan {
            dir: ChanDir::Recv,
            elem: Box::new(TypeNode::basic("int")),
        };
        let err = convert(&TypeNode::slice(chan)).unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnimplementedShape {
                shape: "chan",
                ty: "<-chan int".into(),
            }
        );
        assert!(!err.is_unsupported());

        let generic = TypeNode::TypeParam { name: "T".into() };
        assert!(matches!(
            convert(&generic),
            Err(ConvertError::UnimplementedShape { shape: "type parameter", .. })
        ));
    }
}

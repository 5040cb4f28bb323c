//! Conversion of raw structural facts into pipeline descriptions.

use attest_describe::{Property, TypeDescription, TypeRef};
use thiserror::Error;

use crate::RawType;

/// A raw type could not be turned into a description.
///
/// Conversion is pure; failures propagate to the caller, which decides
/// whether the run aborts (the default) or the type is skipped.
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    #[error("property '{property}' has an empty type signature")]
    EmptySignature { property: String },

    #[error("unbalanced angle brackets in type signature '{signature}'")]
    UnbalancedAngleBrackets { signature: String },

    #[error("empty generic argument in type signature '{signature}'")]
    EmptyArgument { signature: String },

    #[error("trailing characters after '>' in type signature '{signature}'")]
    TrailingCharacters { signature: String },
}

/// Convert one raw type into an immutable description.
pub fn convert(raw: &RawType) -> Result<TypeDescription, ConversionError> {
    let mut properties = Vec::with_capacity(raw.properties.len());
    for (name, signature) in &raw.properties {
        if signature.trim().is_empty() {
            return Err(ConversionError::EmptySignature {
                property: name.clone(),
            });
        }
        properties.push(Property::new(name.clone(), parse_type_ref(signature)?));
    }

    Ok(TypeDescription::new(
        raw.qualified_name.clone(),
        raw.extends.clone(),
        properties,
        raw.generics.clone(),
    ))
}

/// Parse a declared type signature like `java.util.Map<String, List<Integer>>`
/// into a structural [`TypeRef`].
pub fn parse_type_ref(signature: &str) -> Result<TypeRef, ConversionError> {
    let trimmed = signature.trim();
    let err_unbalanced = || ConversionError::UnbalancedAngleBrackets {
        signature: signature.to_string(),
    };

    match trimmed.find('<') {
        None => {
            if trimmed.contains('>') {
                return Err(err_unbalanced());
            }
            Ok(TypeRef::simple(trimmed))
        }
        Some(open) => {
            if !trimmed.ends_with('>') {
                return Err(if trimmed.rfind('>') > Some(open) {
                    ConversionError::TrailingCharacters {
                        signature: signature.to_string(),
                    }
                } else {
                    err_unbalanced()
                });
            }
            let name = trimmed[..open].trim();
            let inner = &trimmed[open + 1..trimmed.len() - 1];
            let args = split_top_level(inner, signature)?
                .into_iter()
                .map(parse_type_ref)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TypeRef::generic(name, args))
        }
    }
}

/// Split generic arguments on commas at nesting depth zero.
fn split_top_level<'a>(
    inner: &'a str,
    signature: &str,
) -> Result<Vec<&'a str>, ConversionError> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    ConversionError::UnbalancedAngleBrackets {
                        signature: signature.to_string(),
                    }
                })?;
            }
            ',' if depth == 0 => {
                args.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ConversionError::UnbalancedAngleBrackets {
            signature: signature.to_string(),
        });
    }
    args.push(&inner[start..]);

    if args.iter().any(|a| a.trim().is_empty()) {
        return Err(ConversionError::EmptyArgument {
            signature: signature.to_string(),
        });
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        assert_eq!(parse_type_ref("String").unwrap(), TypeRef::simple("String"));
        assert_eq!(
            parse_type_ref(" com.acme.Dog ").unwrap(),
            TypeRef::simple("com.acme.Dog")
        );
    }

    #[test]
    fn test_parse_generic() {
        assert_eq!(
            parse_type_ref("java.util.List<com.acme.Dog>").unwrap(),
            TypeRef::generic("java.util.List", vec![TypeRef::simple("com.acme.Dog")])
        );
    }

    #[test]
    fn test_parse_nested_generic() {
        let parsed = parse_type_ref("java.util.Map<String, java.util.List<Integer>>").unwrap();
        assert_eq!(
            parsed,
            TypeRef::generic(
                "java.util.Map",
                vec![
                    TypeRef::simple("String"),
                    TypeRef::generic("java.util.List", vec![TypeRef::simple("Integer")]),
                ]
            )
        );
    }

    #[test]
    fn test_parse_rejects_malformed_signatures() {
        assert!(matches!(
            parse_type_ref("List<String").unwrap_err(),
            ConversionError::UnbalancedAngleBrackets { .. }
        ));
        assert!(matches!(
            parse_type_ref("List<String>>").unwrap_err(),
            ConversionError::TrailingCharacters { .. }
        ));
        assert!(matches!(
            parse_type_ref("Map<String,>").unwrap_err(),
            ConversionError::EmptyArgument { .. }
        ));
        assert!(matches!(
            parse_type_ref("List>String<").unwrap_err(),
            ConversionError::UnbalancedAngleBrackets { .. }
        ));
    }

    #[test]
    fn test_convert_builds_description() {
        let raw = RawType {
            qualified_name: "com.acme.Dog".to_string(),
            extends: Some("com.acme.Animal".to_string()),
            properties: vec![
                ("breed".to_string(), "String".to_string()),
                ("toys".to_string(), "java.util.List<com.acme.Toy>".to_string()),
            ],
            generics: Vec::new(),
        };

        let desc = convert(&raw).unwrap();
        assert_eq!(desc.qualified_name(), "com.acme.Dog");
        assert_eq!(desc.superclass(), Some("com.acme.Animal"));
        assert_eq!(desc.properties().len(), 2);
        assert_eq!(
            desc.properties()[1].type_ref().to_string(),
            "java.util.List<com.acme.Toy>"
        );
    }

    #[test]
    fn test_convert_propagates_signature_errors() {
        let raw = RawType {
            qualified_name: "com.acme.Dog".to_string(),
            extends: None,
            properties: vec![("breed".to_string(), "  ".to_string())],
            generics: Vec::new(),
        };

        assert!(matches!(
            convert(&raw).unwrap_err(),
            ConversionError::EmptySignature { .. }
        ));
    }
}

//! The introspector seam: where structural type facts come from.

use std::hash::{Hash, Hasher};

use attest_core::simple_name;
use attest_index::TypeIndex;

/// Raw structural facts about one type, as reported by an introspector.
///
/// Identity is the fully-qualified name, so sets of raw types are
/// deduplicated by name regardless of how a type was requested.
#[derive(Debug, Clone)]
pub struct RawType {
    /// Fully-qualified name (e.g., "com.acme.Dog").
    pub qualified_name: String,
    /// Fully-qualified name of the supertype, if declared.
    pub extends: Option<String>,
    /// Properties in declaration order: name + declared type signature.
    pub properties: Vec<(String, String)>,
    /// Declared generic type parameter names.
    pub generics: Vec<String>,
}

impl RawType {
    /// Simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }
}

impl PartialEq for RawType {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for RawType {}

impl Hash for RawType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

/// Source of structural type facts.
///
/// The engine only ever talks to this trait; swapping the implementation
/// (metadata files, static analysis, ...) does not touch the pipeline.
pub trait TypeIntrospector {
    /// Every type living in one of the named packages, including
    /// sub-packages, in a deterministic order.
    fn types_in_packages(&self, packages: &[String]) -> Vec<RawType>;

    /// Resolve one explicitly-named type, if it exists.
    fn resolve_type(&self, qualified_name: &str) -> Option<RawType>;
}

/// Introspector backed by a parsed [`TypeIndex`].
pub struct IndexIntrospector<'a> {
    index: &'a TypeIndex,
}

impl<'a> IndexIntrospector<'a> {
    pub fn new(index: &'a TypeIndex) -> Self {
        Self { index }
    }

    fn raw_type(&self, qualified_name: &str) -> Option<RawType> {
        let entry = self.index.get(qualified_name)?;
        Some(RawType {
            qualified_name: qualified_name.to_string(),
            extends: entry.extends.clone(),
            properties: entry
                .properties
                .iter()
                .map(|(name, signature)| (name.clone(), signature.clone()))
                .collect(),
            generics: entry.generics.clone(),
        })
    }
}

impl TypeIntrospector for IndexIntrospector<'_> {
    fn types_in_packages(&self, packages: &[String]) -> Vec<RawType> {
        self.index
            .types
            .keys()
            .filter(|name| {
                packages
                    .iter()
                    .filter(|p| !p.is_empty())
                    .any(|p| name.len() > p.len() + 1 && name.starts_with(p) && name.as_bytes()[p.len()] == b'.')
            })
            .filter_map(|name| self.raw_type(name))
            .collect()
    }

    fn resolve_type(&self, qualified_name: &str) -> Option<RawType> {
        self.raw_type(qualified_name)
    }
}

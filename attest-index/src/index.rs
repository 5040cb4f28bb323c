use attest_core::is_qualified_name;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result};

/// One type's structural facts in the index.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    /// Fully-qualified name of the supertype, if the type declares one.
    /// The supertype does not have to be listed in the index itself.
    pub extends: Option<String>,

    /// Declared generic type parameter names.
    #[serde(default)]
    pub generics: Vec<String>,

    /// Properties in declaration order: name -> declared type signature
    /// (e.g., "String", "java.util.List<com.acme.Toy>").
    #[serde(default)]
    pub properties: IndexMap<String, String>,
}

/// A parsed type index: every target type the generator can see.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeIndex {
    /// Types keyed by fully-qualified name, in file order.
    #[serde(default)]
    pub types: IndexMap<String, TypeEntry>,
}

impl TypeIndex {
    /// Parse and validate a type index from TOML content.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let index: TypeIndex =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        index.validate(content, filename)?;
        Ok(index)
    }

    /// Look up a type by its fully-qualified name.
    pub fn get(&self, qualified_name: &str) -> Option<&TypeEntry> {
        self.types.get(qualified_name)
    }

    /// Number of types in the index.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the index holds no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn validate(&self, src: &str, filename: &str) -> Result<()> {
        for (name, entry) in &self.types {
            if !is_qualified_name(name) {
                return Err(Error::validation(
                    format!("'{}' is not a valid qualified type name", name),
                    src,
                    filename,
                ));
            }
            if let Some(extends) = &entry.extends
                && !is_qualified_name(extends)
            {
                return Err(Error::validation(
                    format!("'{}' extends invalid type name '{}'", name, extends),
                    src,
                    filename,
                ));
            }
            for property in entry.properties.keys() {
                if property.contains('.') || !is_qualified_name(property) {
                    return Err(Error::validation(
                        format!("'{}' has invalid property name '{}'", name, property),
                        src,
                        filename,
                    ));
                }
            }
        }
        Ok(())
    }
}

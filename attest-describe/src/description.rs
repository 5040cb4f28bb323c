use std::hash::{Hash, Hasher};

use attest_core::{package_of, simple_name};

use crate::TypeRef;

/// A property of a target type: a name plus its declared type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    type_ref: TypeRef,
}

impl Property {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }
}

/// Immutable snapshot of one target type, independent of the fact source.
///
/// Identity is the fully-qualified name: two descriptions with the same
/// qualified name compare equal and hash identically, so a set of
/// descriptions never holds two entries for the same type.
#[derive(Debug, Clone)]
pub struct TypeDescription {
    qualified_name: String,
    superclass: Option<String>,
    properties: Vec<Property>,
    generics: Vec<String>,
}

impl TypeDescription {
    pub fn new(
        qualified_name: impl Into<String>,
        superclass: Option<String>,
        properties: Vec<Property>,
        generics: Vec<String>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            superclass,
            properties,
            generics,
        }
    }

    /// Fully-qualified name (e.g., "com.acme.Dog").
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Simple name (e.g., "Dog").
    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }

    /// Package (e.g., "com.acme"), "" for unpackaged types.
    pub fn package(&self) -> &str {
        package_of(&self.qualified_name)
    }

    /// Fully-qualified name of the superclass, if the type declares one.
    pub fn superclass(&self) -> Option<&str> {
        self.superclass.as_deref()
    }

    /// Declared properties, in declaration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Declared generic type parameter names, if any.
    pub fn generics(&self) -> &[String] {
        &self.generics
    }
}

impl PartialEq for TypeDescription {
    fn eq(&self, other: &Self) -> bool {
        self.qualified_name == other.qualified_name
    }
}

impl Eq for TypeDescription {}

impl Hash for TypeDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified_name.hash(state);
    }
}

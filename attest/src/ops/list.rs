//! List operation - the types the index exposes.

use attest_codegen::{IndexIntrospector, TypeIntrospector};
use attest_index::TypeIndex;

/// One row in the type listing.
pub struct TypeRow {
    pub qualified_name: String,
    pub extends: Option<String>,
    pub property_count: usize,
}

/// Execute the list operation.
///
/// With no package filter every type is listed in file order; package
/// filtering follows the same segment-aligned matching generation uses.
pub fn list(index: &TypeIndex, packages: &[String]) -> Vec<TypeRow> {
    if packages.is_empty() {
        return index
            .types
            .iter()
            .map(|(name, entry)| TypeRow {
                qualified_name: name.clone(),
                extends: entry.extends.clone(),
                property_count: entry.properties.len(),
            })
            .collect();
    }

    let introspector = IndexIntrospector::new(index);
    introspector
        .types_in_packages(packages)
        .into_iter()
        .map(|raw| TypeRow {
            qualified_name: raw.qualified_name,
            extends: raw.extends,
            property_count: raw.properties.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> TypeIndex {
        TypeIndex::from_str_with_filename(
            r#"
            [types."com.acme.Animal".properties]
            name = "String"

            [types."com.acme.Dog"]
            extends = "com.acme.Animal"

            [types."org.other.Widget"]
            "#,
            "types.toml",
        )
        .unwrap()
    }

    #[test]
    fn test_list_all_in_file_order() {
        let rows = list(&index(), &[]);
        let names: Vec<&str> = rows.iter().map(|r| r.qualified_name.as_str()).collect();
        assert_eq!(names, vec!["com.acme.Animal", "com.acme.Dog", "org.other.Widget"]);
        assert_eq!(rows[0].property_count, 1);
        assert_eq!(rows[1].extends.as_deref(), Some("com.acme.Animal"));
    }

    #[test]
    fn test_list_filtered_by_package() {
        let rows = list(&index(), &["com.acme".to_string()]);
        let names: Vec<&str> = rows.iter().map(|r| r.qualified_name.as_str()).collect();
        assert_eq!(names, vec!["com.acme.Animal", "com.acme.Dog"]);
    }
}

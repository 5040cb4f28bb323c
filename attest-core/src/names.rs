//! Utilities for dotted, fully-qualified type names.

use std::path::PathBuf;

/// Extract the simple (unqualified) name from a fully-qualified name
/// (e.g., "com.acme.Dog" -> "Dog").
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Extract the package from a fully-qualified name
/// (e.g., "com.acme.Dog" -> "com.acme"). Returns "" for unpackaged names.
pub fn package_of(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[..idx],
        None => "",
    }
}

/// Convert a string to PascalCase (e.g., "owner_name" -> "OwnerName",
/// "ownerName" -> "OwnerName").
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Longest common dotted-segment prefix of a set of packages
/// (e.g., ["com.acme.pets", "com.acme.vets"] -> "com.acme").
///
/// Returns `None` when the input is empty or shares no leading segment.
pub fn common_package_prefix<'a>(packages: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut iter = packages.into_iter();
    let mut prefix: Vec<&str> = iter.next()?.split('.').collect();

    for package in iter {
        let segments: Vec<&str> = package.split('.').collect();
        let shared = prefix
            .iter()
            .zip(segments.iter())
            .take_while(|(a, b)| a == b)
            .count();
        prefix.truncate(shared);
        if prefix.is_empty() {
            return None;
        }
    }

    Some(prefix.join("."))
}

/// Convert a package into a relative directory path
/// (e.g., "com.acme" -> "com/acme").
pub fn package_to_path(package: &str) -> PathBuf {
    package.split('.').collect()
}

/// Check whether a string is a well-formed dotted qualified name:
/// non-empty segments, each starting with a letter or underscore and
/// continuing with letters, digits, underscores or '$'.
pub fn is_qualified_name(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(c) if c.is_alphabetic() || c == '_' => {
                    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            }
        })
}

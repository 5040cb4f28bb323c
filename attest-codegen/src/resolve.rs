//! Expansion of requested packages and explicit type names into a
//! deduplicated candidate set.

use indexmap::IndexSet;

use crate::{RawType, TypeIntrospector};

/// Outcome of input resolution.
pub struct Resolution {
    /// Resolved types, unique by qualified name, in first-encounter order
    /// (package expansion first, then explicit names).
    pub types: IndexSet<RawType>,
    /// Explicitly-named types that could not be resolved. Only ever drawn
    /// from the explicit-name input, never from package expansion.
    pub not_found: Vec<String>,
}

/// Expand packages and explicit names through the introspector.
///
/// Duplicates within or across the two inputs are tolerated; each
/// qualified name appears once in the result no matter how many routes
/// requested it. Unresolved explicit names are collected rather than
/// aborting the run.
pub fn resolve(
    introspector: &dyn TypeIntrospector,
    packages: &[String],
    type_names: &[String],
) -> Resolution {
    let mut types: IndexSet<RawType> = introspector.types_in_packages(packages).into_iter().collect();
    let mut not_found = Vec::new();

    for name in type_names {
        match introspector.resolve_type(name) {
            Some(raw) => {
                types.insert(raw);
            }
            None => {
                if !not_found.iter().any(|n| n == name) {
                    not_found.push(name.clone());
                }
            }
        }
    }

    Resolution { types, not_found }
}

//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from index validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the index file.
    pub index_path: PathBuf,
    /// Number of types in the index.
    pub type_count: usize,
    /// Number of distinct packages.
    pub package_count: usize,
    /// Total number of declared properties.
    pub property_count: usize,
    /// Number of types declaring a supertype.
    pub subtype_count: usize,
    /// What generation would retain, when a selection was given.
    pub resolution: Option<ResolutionPreview>,
}

/// Resolution and filtering outcome, without any generation.
#[derive(Debug)]
pub struct ResolutionPreview {
    /// Types generation would produce assertions for, in generation order.
    pub retained: Vec<String>,
    /// Resolved types dropped by filtering.
    pub excluded: Vec<String>,
    /// Explicitly-named types missing from the index.
    pub not_found: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.index_path.display()));
        out.newline();
        out.key_value_indented("types", &self.type_count.to_string());
        out.key_value_indented("packages", &self.package_count.to_string());
        out.key_value_indented("properties", &self.property_count.to_string());
        out.key_value_indented("subtypes", &self.subtype_count.to_string());

        if let Some(resolution) = &self.resolution {
            out.newline();
            out.section(&format!("Would generate ({})", resolution.retained.len()));
            for name in &resolution.retained {
                out.added_item(name);
            }

            if !resolution.excluded.is_empty() {
                out.newline();
                out.section("Excluded");
                for name in &resolution.excluded {
                    out.preformatted(&format!("  - {}", name));
                }
            }

            for name in &resolution.not_found {
                out.warning(&format!("input type not found: {}", name));
            }
        }
    }
}

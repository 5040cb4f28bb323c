//! Filters applied to the resolved type set before generation.

use indexmap::IndexSet;
use regex::Regex;

use crate::{Diagnostic, GenerationError, GenerationReport, RawType};

/// Reserved simple-name suffixes denoting previously generated artifacts.
pub const GENERATED_SUFFIXES: [&str; 2] = ["Assert", "Assertions"];

const STAGE: &str = "filter";

/// Include/exclude regular-expression filter over fully-qualified names.
///
/// A type is kept when it matches any include pattern and no exclude
/// pattern; exclude wins when both match. Patterns match the whole name,
/// not a substring.
#[derive(Debug)]
pub struct PatternFilter {
    includes: Vec<(String, Regex)>,
    excludes: Vec<(String, Regex)>,
}

impl PatternFilter {
    /// Compile a filter. No include patterns means "include everything";
    /// no exclude patterns means "exclude nothing".
    pub fn new(includes: &[String], excludes: &[String]) -> Result<Self, GenerationError> {
        let default_include = [".*".to_string()];
        let includes = if includes.is_empty() {
            &default_include[..]
        } else {
            includes
        };

        Ok(Self {
            includes: compile_anchored(includes)?,
            excludes: compile_anchored(excludes)?,
        })
    }

    /// Whether the name matches any include pattern.
    pub fn is_included(&self, qualified_name: &str) -> bool {
        self.includes.iter().any(|(_, re)| re.is_match(qualified_name))
    }

    /// The first exclude pattern matching the name, if any.
    pub fn matching_exclude(&self, qualified_name: &str) -> Option<&str> {
        self.excludes
            .iter()
            .find(|(_, re)| re.is_match(qualified_name))
            .map(|(pattern, _)| pattern.as_str())
    }

    /// Drop types rejected by the patterns, recording each rejection as a
    /// debug diagnostic naming the offending pattern.
    pub fn apply(
        &self,
        types: IndexSet<RawType>,
        report: &mut GenerationReport,
    ) -> IndexSet<RawType> {
        types
            .into_iter()
            .filter(|raw| {
                let name = raw.qualified_name.as_str();
                if let Some(pattern) = self.matching_exclude(name) {
                    report.add_diagnostic(Diagnostic::debug(
                        STAGE,
                        format!(
                            "won't generate assertions for {}: matches exclude pattern '{}'",
                            name, pattern
                        ),
                    ));
                    return false;
                }
                if !self.is_included(name) {
                    report.add_diagnostic(Diagnostic::debug(
                        STAGE,
                        format!(
                            "won't generate assertions for {}: does not match any include pattern",
                            name
                        ),
                    ));
                    return false;
                }
                true
            })
            .collect()
    }
}

fn compile_anchored(patterns: &[String]) -> Result<Vec<(String, Regex)>, GenerationError> {
    patterns
        .iter()
        .map(|pattern| {
            // Whole-string matching, whatever anchors the pattern carries
            let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
                GenerationError::InvalidPattern {
                    pattern: pattern.clone(),
                    source: Box::new(e),
                }
            })?;
            Ok((pattern.clone(), regex))
        })
        .collect()
}

/// Drop types that are themselves previously generated artifacts, so a
/// rerun over an output directory never re-targets its own output.
/// Insertion order of the remaining types is preserved.
pub fn remove_generated_artifacts(
    types: IndexSet<RawType>,
    report: &mut GenerationReport,
) -> IndexSet<RawType> {
    types
        .into_iter()
        .filter(|raw| {
            let simple = raw.simple_name();
            let reserved = GENERATED_SUFFIXES.iter().any(|s| simple.ends_with(s));
            if reserved {
                report.add_diagnostic(Diagnostic::debug(
                    STAGE,
                    format!(
                        "won't generate assertions for {}: already a generated assertion artifact",
                        raw.qualified_name
                    ),
                ));
            }
            !reserved
        })
        .collect()
}

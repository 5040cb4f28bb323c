//! Check operation - index validation, summary stats and an optional
//! resolution preview.

use std::collections::BTreeSet;

use attest_codegen::{
    GenerationReport, IndexIntrospector, PatternFilter, remove_generated_artifacts, resolve,
};
use attest_core::package_of;
use attest_index::{IndexFile, TypeIndex};
use eyre::{Result, eyre};

use crate::reports::{CheckReport, ResolutionPreview};

/// Inputs for a resolution preview: the same selection flags generate
/// takes, without any generation.
pub struct CheckOptions {
    pub packages: Vec<String>,
    pub types: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl CheckOptions {
    fn wants_resolution(&self) -> bool {
        !self.packages.is_empty() || !self.types.is_empty()
    }
}

/// Execute the check operation.
///
/// Parsing and validation already happened when the index file was
/// opened; this summarizes what the valid index holds and, when packages
/// or types were requested, previews what generation would retain.
pub fn check(index_file: &IndexFile, opts: &CheckOptions) -> Result<CheckReport> {
    let index = index_file.index();

    let mut packages = BTreeSet::new();
    let mut property_count = 0;
    let mut subtype_count = 0;
    for (name, entry) in &index.types {
        packages.insert(package_of(name).to_string());
        property_count += entry.properties.len();
        if entry.extends.is_some() {
            subtype_count += 1;
        }
    }

    let resolution = if opts.wants_resolution() {
        Some(preview_resolution(index, opts)?)
    } else {
        None
    };

    Ok(CheckReport {
        index_path: index_file.path().to_path_buf(),
        type_count: index.len(),
        package_count: packages.len(),
        property_count,
        subtype_count,
        resolution,
    })
}

/// Run resolution and filtering exactly the way generation would, and
/// report the outcome without generating anything.
fn preview_resolution(index: &TypeIndex, opts: &CheckOptions) -> Result<ResolutionPreview> {
    let filter = PatternFilter::new(&opts.include, &opts.exclude).map_err(|e| eyre!("{e}"))?;
    let introspector = IndexIntrospector::new(index);

    // Scratch report; only the retained set and not-found list matter here
    let mut scratch = GenerationReport::new();
    let resolution = resolve(&introspector, &opts.packages, &opts.types);
    let resolved: Vec<String> = resolution
        .types
        .iter()
        .map(|t| t.qualified_name.clone())
        .collect();

    let retained = remove_generated_artifacts(resolution.types, &mut scratch);
    let retained: Vec<String> = filter
        .apply(retained, &mut scratch)
        .into_iter()
        .map(|t| t.qualified_name)
        .collect();

    let excluded = resolved
        .into_iter()
        .filter(|name| !retained.contains(name))
        .collect();

    Ok(ResolutionPreview {
        retained,
        excluded,
        not_found: resolution.not_found,
    })
}

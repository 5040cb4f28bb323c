//! Generate operation - runs the engine and summarizes the outcome.

use std::path::PathBuf;

use attest_codegen::{
    Engine, EntryPointFlavor, ErrorPolicy, FileRole, IndexIntrospector, Severity,
};
use attest_index::TypeIndex;

use crate::reports::{GenerateReport, PreviewFile};

/// Everything one generation run needs beyond the index itself.
pub struct GenerateOptions {
    pub packages: Vec<String>,
    pub types: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub hierarchical: bool,
    pub entry_points: Vec<EntryPointFlavor>,
    pub entry_point_package: Option<String>,
    pub templates: Vec<(String, PathBuf)>,
    pub keep_going: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub output: PathBuf,
}

/// Execute the generate operation.
///
/// Runs the engine over the index and folds its run report into the
/// command-level report the CLI renders.
pub fn generate(index: &TypeIndex, opts: GenerateOptions) -> GenerateReport {
    let introspector = IndexIntrospector::new(index);
    let policy = if opts.keep_going {
        ErrorPolicy::Continue
    } else {
        ErrorPolicy::FailFast
    };

    let mut engine = Engine::new(&introspector)
        .include_patterns(opts.include)
        .exclude_patterns(opts.exclude)
        .entry_points(opts.entry_points)
        .entry_point_package(opts.entry_point_package)
        .template_overrides(opts.templates)
        .error_policy(policy)
        .dry_run(opts.dry_run);

    let report = engine.generate(&opts.packages, &opts.types, &opts.output, opts.hierarchical);

    let mut assertion_files = Vec::new();
    let mut entry_point_files = Vec::new();
    for record in report.generated_files() {
        let path = record.path.display().to_string();
        match record.role {
            FileRole::EntryPoint(_) => entry_point_files.push(path),
            FileRole::Assert | FileRole::AbstractAssert => assertion_files.push(path),
        }
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut debug = Vec::new();
    for diag in report.diagnostics() {
        let message = format!("[{}] {}", diag.stage, diag.message);
        match diag.severity {
            Severity::Error => errors.push(message),
            Severity::Warning => warnings.push(message),
            Severity::Debug if opts.verbose => debug.push(message),
            Severity::Debug => {}
        }
    }

    let previews = report
        .previews()
        .iter()
        .map(|p| PreviewFile {
            path: p.path.display().to_string(),
            content: p.content.clone(),
        })
        .collect();

    GenerateReport {
        destination: opts.output,
        dry_run: opts.dry_run,
        assertion_files,
        entry_point_files,
        errors,
        warnings,
        debug,
        previews,
        failure: report.failure().map(|e| e.to_string()),
    }
}

//! Run report: an append-only accumulator fed by every pipeline stage.

use std::path::{Path, PathBuf};

use crate::{EntryPointFlavor, GenerationError};

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A per-type failure (only recorded when the run keeps going).
    Error,
    /// Something was skipped or fell back to a default.
    Warning,
    /// Observability detail, hidden unless verbose output is requested.
    Debug,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Debug => write!(f, "debug"),
        }
    }
}

/// A diagnostic message from a pipeline stage.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The stage that produced this diagnostic.
    pub stage: String,
    /// The diagnostic message.
    pub message: String,
}

impl Diagnostic {
    pub fn error(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            stage: stage.into(),
            message: message.into(),
        }
    }

    pub fn warning(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            stage: stage.into(),
            message: message.into(),
        }
    }

    pub fn debug(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Debug,
            stage: stage.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: [{}] {}", self.severity, self.stage, self.message)
    }
}

/// The logical role a generated file plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// A concrete assertion class.
    Assert,
    /// An abstract parent assertion class (hierarchical mode only).
    AbstractAssert,
    /// An aggregating entry-point class of the given flavor.
    EntryPoint(EntryPointFlavor),
}

/// A generated file's path plus the role it plays.
#[derive(Debug, Clone)]
pub struct GeneratedFileRecord {
    pub path: PathBuf,
    pub role: FileRole,
}

/// A non-fatal template override problem: the default template for that
/// kind stays in effect.
#[derive(Debug, Clone)]
pub struct TemplateError {
    pub kind: String,
    pub path: PathBuf,
    pub message: String,
}

/// A file that would be generated, captured instead of written in
/// dry-run mode.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    pub path: PathBuf,
    pub content: String,
}

/// Accumulated outcome of one generation run.
///
/// Records are append-only: no operation removes or mutates a previously
/// added record. At most one terminal failure is recorded, and its
/// presence marks the run as failed regardless of how many files were
/// generated before the abort point.
#[derive(Debug, Default)]
pub struct GenerationReport {
    input_packages: Vec<String>,
    input_types: Vec<String>,
    destination: Option<PathBuf>,
    excluded_types: Vec<String>,
    not_found: Vec<String>,
    generated: Vec<GeneratedFileRecord>,
    template_errors: Vec<TemplateError>,
    diagnostics: Vec<Diagnostic>,
    previews: Vec<PreviewFile>,
    failure: Option<GenerationError>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the requested packages and explicit type names, verbatim.
    pub fn record_inputs(&mut self, packages: &[String], type_names: &[String]) {
        self.input_packages.extend(packages.iter().cloned());
        self.input_types.extend(type_names.iter().cloned());
    }

    pub fn record_destination(&mut self, destination: &Path) {
        self.destination = Some(destination.to_path_buf());
    }

    /// Record a resolved type dropped by filtering.
    pub fn record_excluded(&mut self, qualified_name: impl Into<String>) {
        self.excluded_types.push(qualified_name.into());
    }

    /// Record an explicitly-named type that could not be resolved.
    pub fn record_not_found(&mut self, name: impl Into<String>) {
        self.not_found.push(name.into());
    }

    pub fn record_file(&mut self, path: PathBuf, role: FileRole) {
        self.generated.push(GeneratedFileRecord { path, role });
    }

    pub fn record_template_error(&mut self, error: TemplateError) {
        self.template_errors.push(error);
    }

    pub fn record_preview(&mut self, preview: PreviewFile) {
        self.previews.push(preview);
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Record the terminal failure. The first failure wins; the run is
    /// aborted right after, so a second call would be a pipeline bug.
    pub fn set_failure(&mut self, failure: GenerationError) {
        if self.failure.is_none() {
            self.failure = Some(failure);
        }
    }

    pub fn input_packages(&self) -> &[String] {
        &self.input_packages
    }

    pub fn input_types(&self) -> &[String] {
        &self.input_types
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn excluded_types(&self) -> &[String] {
        &self.excluded_types
    }

    pub fn not_found(&self) -> &[String] {
        &self.not_found
    }

    pub fn generated_files(&self) -> &[GeneratedFileRecord] {
        &self.generated
    }

    /// Generated assertion files (concrete and abstract), without entry points.
    pub fn assertion_files(&self) -> impl Iterator<Item = &GeneratedFileRecord> {
        self.generated
            .iter()
            .filter(|r| matches!(r.role, FileRole::Assert | FileRole::AbstractAssert))
    }

    /// Generated entry-point files, optionally restricted to one flavor.
    pub fn entry_point_files(
        &self,
        flavor: Option<EntryPointFlavor>,
    ) -> impl Iterator<Item = &GeneratedFileRecord> {
        self.generated.iter().filter(move |r| match r.role {
            FileRole::EntryPoint(f) => flavor.is_none() || flavor == Some(f),
            _ => false,
        })
    }

    pub fn template_errors(&self) -> &[TemplateError] {
        &self.template_errors
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn previews(&self) -> &[PreviewFile] {
        &self.previews
    }

    pub fn failure(&self) -> Option<&GenerationError> {
        self.failure.as_ref()
    }

    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }
}

//! The engine façade: configuration plus the single `generate` run.

use std::path::{Path, PathBuf};

use crate::{
    DefaultBackend, Diagnostic, EntryPointBuilder, EntryPointFlavor, GenerationDriver,
    GenerationError, GenerationReport, PatternFilter, TemplateBackend, TemplateError,
    TemplateKind, TypeIntrospector, convert, remove_generated_artifacts, resolve,
};

/// What to do when one type fails to convert or render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the whole run on the first per-type failure, so entry points
    /// never reference a type whose assertion file does not exist.
    #[default]
    FailFast,
    /// Record the failure, drop the type from the retained set and keep
    /// going. Entry points are built over the surviving types only.
    Continue,
}

/// The generation engine, configured once before a run.
///
/// All run state lives in the per-run [`GenerationReport`]; the engine
/// itself only carries configuration and can be reused across runs.
pub struct Engine<'a> {
    introspector: &'a dyn TypeIntrospector,
    backend: Box<dyn TemplateBackend>,
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
    entry_points: Vec<EntryPointFlavor>,
    entry_point_package: Option<String>,
    template_overrides: Vec<(String, PathBuf)>,
    policy: ErrorPolicy,
    dry_run: bool,
}

impl<'a> Engine<'a> {
    pub fn new(introspector: &'a dyn TypeIntrospector) -> Self {
        Self {
            introspector,
            backend: Box::new(DefaultBackend::new()),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            entry_points: Vec::new(),
            entry_point_package: None,
            template_overrides: Vec::new(),
            policy: ErrorPolicy::default(),
            dry_run: false,
        }
    }

    /// Replace the template back end (defaults to [`DefaultBackend`]).
    pub fn backend(mut self, backend: impl TemplateBackend + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    /// Include patterns over fully-qualified names; empty means everything.
    pub fn include_patterns(mut self, patterns: Vec<String>) -> Self {
        self.include_patterns = patterns;
        self
    }

    /// Exclude patterns over fully-qualified names; exclude wins.
    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Entry-point flavors to generate, possibly none.
    pub fn entry_points(mut self, flavors: Vec<EntryPointFlavor>) -> Self {
        self.entry_points = flavors;
        self
    }

    /// Package for entry-point classes; derived from the retained
    /// packages when unset.
    pub fn entry_point_package(mut self, package: Option<String>) -> Self {
        self.entry_point_package = package;
        self
    }

    /// Template overrides as (kind key, file path) pairs, applied before
    /// generation begins.
    pub fn template_overrides(mut self, overrides: Vec<(String, PathBuf)>) -> Self {
        self.template_overrides = overrides;
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Capture previews on the report instead of writing files.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run one full generation pass.
    ///
    /// Never returns an error: fatal problems are captured as the
    /// report's terminal failure, with whatever files were emitted before
    /// the abort point still on disk.
    pub fn generate(
        &mut self,
        packages: &[String],
        type_names: &[String],
        destination: &Path,
        hierarchical: bool,
    ) -> GenerationReport {
        let mut report = GenerationReport::new();
        report.record_inputs(packages, type_names);
        report.record_destination(destination);

        if let Err(failure) = self.register_template_overrides(&mut report) {
            report.set_failure(failure);
            return report;
        }

        let filter = match PatternFilter::new(&self.include_patterns, &self.exclude_patterns) {
            Ok(filter) => filter,
            Err(failure) => {
                report.set_failure(failure);
                return report;
            }
        };

        let resolution = resolve(self.introspector, packages, type_names);
        for name in &resolution.not_found {
            report.record_not_found(name.clone());
            report.add_diagnostic(Diagnostic::warning(
                "resolve",
                format!("input type not found: {}", name),
            ));
        }

        let resolved_names: Vec<String> = resolution
            .types
            .iter()
            .map(|t| t.qualified_name.clone())
            .collect();
        let retained = remove_generated_artifacts(resolution.types, &mut report);
        let retained = filter.apply(retained, &mut report);
        let retained_names: std::collections::HashSet<&str> =
            retained.iter().map(|t| t.qualified_name.as_str()).collect();
        for name in &resolved_names {
            if !retained_names.contains(name.as_str()) {
                report.record_excluded(name.clone());
            }
        }

        let mut descriptions = Vec::with_capacity(retained.len());
        for raw in &retained {
            match convert(raw) {
                Ok(description) => descriptions.push(description),
                Err(source) => {
                    let failure = GenerationError::Conversion {
                        type_name: raw.qualified_name.clone(),
                        source,
                    };
                    match self.policy {
                        ErrorPolicy::FailFast => {
                            report.set_failure(failure);
                            return report;
                        }
                        ErrorPolicy::Continue => {
                            report.add_diagnostic(Diagnostic::error(
                                "convert",
                                format!("skipping {}: {}", raw.qualified_name, failure),
                            ));
                        }
                    }
                }
            }
        }

        let driver = GenerationDriver::new(self.backend.as_ref(), destination, self.dry_run);
        let generated =
            match driver.generate(&descriptions, hierarchical, self.policy, &mut report) {
                Ok(generated) => generated,
                Err(failure) => {
                    report.set_failure(failure);
                    return report;
                }
            };

        // Entry points only run once all per-type generation is complete:
        // they read the full surviving description set.
        let builder = EntryPointBuilder::new(self.backend.as_ref(), destination, self.dry_run);
        if let Err(failure) = builder.build(
            &generated,
            &self.entry_points,
            self.entry_point_package.as_deref(),
            &mut report,
        ) {
            report.set_failure(failure);
        }

        report
    }

    /// Validate every override key up front, then load the readable ones.
    /// An unknown key is fatal; an unreadable file only loses that one
    /// override.
    fn register_template_overrides(
        &mut self,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        let mut parsed: Vec<(TemplateKind, String, PathBuf)> = Vec::new();
        for (key, path) in &self.template_overrides {
            let kind = key
                .parse::<TemplateKind>()
                .map_err(|key| GenerationError::UnknownTemplateKind { key })?;
            parsed.push((kind, key.clone(), path.clone()));
        }

        for (kind, key, path) in parsed {
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    self.backend.register(kind, text);
                    report.add_diagnostic(Diagnostic::debug(
                        "templates",
                        format!("registered override for '{}' from {}", key, path.display()),
                    ));
                }
                Err(e) => {
                    report.add_diagnostic(Diagnostic::warning(
                        "templates",
                        format!(
                            "ignoring unreadable template override '{}' ({}): {}",
                            key,
                            path.display(),
                            e
                        ),
                    ));
                    report.record_template_error(TemplateError {
                        kind: key,
                        path,
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

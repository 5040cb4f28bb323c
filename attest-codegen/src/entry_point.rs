//! Aggregating entry-point classes generated over the full retained set.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use attest_core::{common_package_prefix, package_to_path, write_source_file};
use attest_describe::TypeDescription;

use crate::{
    FileRole, GenerationError, GenerationReport, PreviewFile, RenderContext, TemplateBackend,
    TemplateKind, template::package_declaration,
};

/// Fallback package for entry-point classes when the retained packages
/// share no common prefix.
pub const DEFAULT_ENTRY_POINT_PACKAGE: &str = "org.attest";

/// One style of aggregator class. A run may generate zero, one or several
/// flavors; each flavor maps to exactly one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPointFlavor {
    /// `Assertions` with static `assertThat` factories.
    Standard,
    /// `BddAssertions` with static `then` factories.
    Bdd,
    /// `SoftAssertions` collecting failures instead of throwing.
    Soft,
    /// `JUnitSoftAssertions` usable as a JUnit rule.
    JunitSoft,
}

impl EntryPointFlavor {
    pub const ALL: [EntryPointFlavor; 4] = [
        EntryPointFlavor::Standard,
        EntryPointFlavor::Bdd,
        EntryPointFlavor::Soft,
        EntryPointFlavor::JunitSoft,
    ];

    /// Simple name of the generated aggregator class.
    pub fn class_name(&self) -> &'static str {
        match self {
            EntryPointFlavor::Standard => "Assertions",
            EntryPointFlavor::Bdd => "BddAssertions",
            EntryPointFlavor::Soft => "SoftAssertions",
            EntryPointFlavor::JunitSoft => "JUnitSoftAssertions",
        }
    }

    /// Template for the aggregator class itself.
    pub fn class_template(&self) -> TemplateKind {
        match self {
            EntryPointFlavor::Standard => TemplateKind::StandardEntryPoint,
            EntryPointFlavor::Bdd => TemplateKind::BddEntryPoint,
            EntryPointFlavor::Soft => TemplateKind::SoftEntryPoint,
            EntryPointFlavor::JunitSoft => TemplateKind::JunitSoftEntryPoint,
        }
    }

    /// Template for one factory method inside the aggregator.
    pub fn method_template(&self) -> TemplateKind {
        match self {
            EntryPointFlavor::Standard | EntryPointFlavor::Bdd => TemplateKind::EntryPointMethod,
            EntryPointFlavor::Soft | EntryPointFlavor::JunitSoft => {
                TemplateKind::SoftEntryPointMethod
            }
        }
    }

    /// Factory method name for static flavors.
    pub fn method_name(&self) -> &'static str {
        match self {
            EntryPointFlavor::Bdd => "then",
            _ => "assertThat",
        }
    }
}

impl std::fmt::Display for EntryPointFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntryPointFlavor::Standard => "standard",
            EntryPointFlavor::Bdd => "bdd",
            EntryPointFlavor::Soft => "soft",
            EntryPointFlavor::JunitSoft => "junit-soft",
        };
        f.write_str(name)
    }
}

impl FromStr for EntryPointFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(EntryPointFlavor::Standard),
            "bdd" => Ok(EntryPointFlavor::Bdd),
            "soft" => Ok(EntryPointFlavor::Soft),
            "junit-soft" => Ok(EntryPointFlavor::JunitSoft),
            other => Err(other.to_string()),
        }
    }
}

/// Builds one aggregator file per requested flavor, with one factory
/// method per retained description.
pub struct EntryPointBuilder<'a> {
    backend: &'a dyn TemplateBackend,
    destination: &'a Path,
    dry_run: bool,
}

impl<'a> EntryPointBuilder<'a> {
    pub fn new(backend: &'a dyn TemplateBackend, destination: &'a Path, dry_run: bool) -> Self {
        Self {
            backend,
            destination,
            dry_run,
        }
    }

    /// Generate the aggregator files.
    ///
    /// Factory methods are sorted by fully-qualified type name so reruns
    /// over the same retained set produce byte-identical files. A flavor
    /// requested more than once is generated once.
    pub fn build(
        &self,
        descriptions: &[TypeDescription],
        flavors: &[EntryPointFlavor],
        target_package: Option<&str>,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        let package = match target_package {
            Some(package) => package.to_string(),
            None => derive_entry_point_package(descriptions),
        };

        let mut sorted: Vec<&TypeDescription> = descriptions.iter().collect();
        sorted.sort_by(|a, b| a.qualified_name().cmp(b.qualified_name()));

        let mut seen = HashSet::new();
        for flavor in flavors {
            if !seen.insert(*flavor) {
                continue;
            }
            let content = self.render_entry_point(*flavor, &sorted, &package)?;
            let path = self.entry_point_file(&package, *flavor);
            self.emit(path, content, *flavor, report)?;
        }
        Ok(())
    }

    fn render_entry_point(
        &self,
        flavor: EntryPointFlavor,
        sorted: &[&TypeDescription],
        package: &str,
    ) -> Result<String, GenerationError> {
        let mut methods = String::new();
        for description in sorted {
            let mut ctx = RenderContext::new();
            ctx.set("assert_type", assert_type_of(description))
                .set("method_name", flavor.method_name());
            let rendered = self
                .backend
                .render(flavor.method_template(), Some(description), &ctx)
                .map_err(|source| GenerationError::Render {
                    kind: flavor.method_template(),
                    context: description.qualified_name().to_string(),
                    source,
                })?;
            methods.push_str(&rendered);
        }

        let mut ctx = RenderContext::new();
        ctx.set("package_declaration", package_declaration(package))
            .set("entry_point_methods", methods);
        self.backend
            .render(flavor.class_template(), None, &ctx)
            .map_err(|source| GenerationError::Render {
                kind: flavor.class_template(),
                context: flavor.class_name().to_string(),
                source,
            })
    }

    fn entry_point_file(&self, package: &str, flavor: EntryPointFlavor) -> PathBuf {
        let file_name = format!("{}.java", flavor.class_name());
        if package.is_empty() {
            self.destination.join(file_name)
        } else {
            self.destination
                .join(package_to_path(package))
                .join(file_name)
        }
    }

    fn emit(
        &self,
        path: PathBuf,
        content: String,
        flavor: EntryPointFlavor,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        if self.dry_run {
            report.record_preview(PreviewFile {
                path: path.clone(),
                content,
            });
        } else {
            write_source_file(&path, &content).map_err(|source| GenerationError::Io {
                path: path.clone(),
                source,
            })?;
        }
        report.record_file(path, FileRole::EntryPoint(flavor));
        Ok(())
    }
}

/// The package entry points land in when none is requested: the common
/// prefix of all retained packages, else a fixed default.
fn derive_entry_point_package(descriptions: &[TypeDescription]) -> String {
    common_package_prefix(
        descriptions
            .iter()
            .map(|d| d.package())
            .filter(|p| !p.is_empty()),
    )
    .unwrap_or_else(|| DEFAULT_ENTRY_POINT_PACKAGE.to_string())
}

/// Fully-qualified name of a type's generated assertion class.
fn assert_type_of(description: &TypeDescription) -> String {
    if description.package().is_empty() {
        format!("{}Assert", description.simple_name())
    } else {
        format!(
            "{}.{}Assert",
            description.package(),
            description.simple_name()
        )
    }
}

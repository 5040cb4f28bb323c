//! Per-type generation of assertion source files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use attest_core::{package_of, package_to_path, simple_name, to_pascal_case, write_source_file};
use attest_describe::{Property, TypeDescription};

use crate::{
    Diagnostic, ErrorPolicy, FileRole, GenerationError, GenerationReport, PreviewFile,
    RenderContext, TemplateBackend, TemplateKind,
};

const STAGE: &str = "generate";

/// The generic base every assertion chain terminates at when the
/// superclass is not part of the retained set.
const BASE_ASSERT: &str = "org.assertj.core.api.AbstractObjectAssert";

/// Drives flat or hierarchical assertion-file generation, type by type,
/// in retained-set order.
pub struct GenerationDriver<'a> {
    backend: &'a dyn TemplateBackend,
    destination: &'a Path,
    dry_run: bool,
}

impl<'a> GenerationDriver<'a> {
    pub fn new(backend: &'a dyn TemplateBackend, destination: &'a Path, dry_run: bool) -> Self {
        Self {
            backend,
            destination,
            dry_run,
        }
    }

    /// Generate assertion files for every description, fail-fast by
    /// default. Returns the descriptions that were fully generated, which
    /// is the whole input unless the policy keeps the run going past
    /// per-type failures. Write failures are terminal under either
    /// policy.
    pub fn generate(
        &self,
        descriptions: &[TypeDescription],
        hierarchical: bool,
        policy: ErrorPolicy,
        report: &mut GenerationReport,
    ) -> Result<Vec<TypeDescription>, GenerationError> {
        let retained: HashSet<&str> = descriptions.iter().map(|d| d.qualified_name()).collect();
        let mut generated = Vec::with_capacity(descriptions.len());

        for description in descriptions {
            let result = if hierarchical {
                self.generate_hierarchical(description, &retained, report)
            } else {
                self.generate_flat(description, report)
            };

            match result {
                Ok(()) => generated.push(description.clone()),
                // A failed write means the destination itself is broken;
                // no policy keeps the run going past it
                Err(e @ GenerationError::Io { .. }) => return Err(e),
                Err(e) => match policy {
                    ErrorPolicy::FailFast => return Err(e),
                    ErrorPolicy::Continue => {
                        report.add_diagnostic(Diagnostic::error(
                            STAGE,
                            format!(
                                "skipping {}: {}",
                                description.qualified_name(),
                                e
                            ),
                        ));
                    }
                },
            }
        }

        Ok(generated)
    }

    fn generate_flat(
        &self,
        description: &TypeDescription,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        let assertions = self.render_property_assertions(
            description,
            &format!("{}Assert", description.simple_name()),
            "this",
        )?;

        let mut ctx = RenderContext::new();
        ctx.set("property_assertions", assertions);
        let content = self.render(TemplateKind::AssertClass, description, &ctx)?;

        let path = self.class_file(
            description.package(),
            &format!("{}Assert.java", description.simple_name()),
        );
        self.emit(path, content, FileRole::Assert, report)
    }

    fn generate_hierarchical(
        &self,
        description: &TypeDescription,
        retained: &HashSet<&str>,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        // Abstract parent class carrying the property assertions
        let assertions = self.render_property_assertions(description, "S", "myself")?;
        let mut ctx = RenderContext::new();
        ctx.set("property_assertions", assertions);
        ctx.set("parent_assert", parent_assert(description, retained));
        let content = self.render(TemplateKind::AbstractAssertClass, description, &ctx)?;
        let path = self.class_file(
            description.package(),
            &format!("Abstract{}Assert.java", description.simple_name()),
        );
        self.emit(path, content, FileRole::AbstractAssert, report)?;

        // Concrete leaf class
        let content = self.render(
            TemplateKind::HierarchicalAssertClass,
            description,
            &RenderContext::new(),
        )?;
        let path = self.class_file(
            description.package(),
            &format!("{}Assert.java", description.simple_name()),
        );
        self.emit(path, content, FileRole::Assert, report)
    }

    fn render_property_assertions(
        &self,
        description: &TypeDescription,
        self_type: &str,
        self_ref: &str,
    ) -> Result<String, GenerationError> {
        let mut out = String::new();
        for property in description.properties() {
            let mut ctx = RenderContext::new();
            ctx.set("property", property.name())
                .set("pascal_property", to_pascal_case(property.name()))
                .set("property_type", property.type_ref().to_string())
                .set("getter", getter_name(property))
                .set("self_type", self_type)
                .set("self_ref", self_ref);
            out.push_str(&self.render(TemplateKind::PropertyAssertion, description, &ctx)?);
        }
        Ok(out)
    }

    fn render(
        &self,
        kind: TemplateKind,
        description: &TypeDescription,
        ctx: &RenderContext,
    ) -> Result<String, GenerationError> {
        self.backend
            .render(kind, Some(description), ctx)
            .map_err(|source| GenerationError::Render {
                kind,
                context: description.qualified_name().to_string(),
                source,
            })
    }

    fn class_file(&self, package: &str, file_name: &str) -> PathBuf {
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
        role: FileRole,
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
        report.record_file(path, role);
        Ok(())
    }
}

/// The parent of a type's abstract assertion class: the superclass's
/// abstract assertion when the superclass is retained, else the generic
/// base assertion.
fn parent_assert(description: &TypeDescription, retained: &HashSet<&str>) -> String {
    match description.superclass() {
        Some(superclass) if retained.contains(superclass) => {
            let package = package_of(superclass);
            let simple = simple_name(superclass);
            if package.is_empty() {
                format!("Abstract{}Assert", simple)
            } else {
                format!("{}.Abstract{}Assert", package, simple)
            }
        }
        _ => BASE_ASSERT.to_string(),
    }
}

/// JavaBean accessor for a property: `get<Pascal>`, or `is<Pascal>` for
/// plain booleans.
fn getter_name(property: &Property) -> String {
    let pascal = to_pascal_case(property.name());
    if property.type_ref().name() == "boolean" {
        format!("is{}", pascal)
    } else {
        format!("get{}", pascal)
    }
}

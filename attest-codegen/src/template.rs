//! The templating seam: template kinds, the back-end trait and the
//! default placeholder-substituting back end.

use std::str::FromStr;

use attest_describe::TypeDescription;
use indexmap::IndexMap;
use thiserror::Error;

/// One overridable template slot.
///
/// Override keys (CLI and config surface) are the snake_case names
/// returned by [`TemplateKind::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Flat-mode concrete assertion class.
    AssertClass,
    /// Hierarchical-mode concrete leaf assertion class.
    HierarchicalAssertClass,
    /// Hierarchical-mode abstract parent assertion class.
    AbstractAssertClass,
    /// One property assertion method, spliced into a class template.
    PropertyAssertion,
    /// Entry-point class, standard flavor.
    StandardEntryPoint,
    /// Entry-point class, BDD flavor.
    BddEntryPoint,
    /// Entry-point class, soft-assertions flavor.
    SoftEntryPoint,
    /// Entry-point class, JUnit-integrated soft-assertions flavor.
    JunitSoftEntryPoint,
    /// One static factory method, spliced into standard/BDD entry points.
    EntryPointMethod,
    /// One proxied factory method, spliced into soft entry points.
    SoftEntryPointMethod,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 10] = [
        TemplateKind::AssertClass,
        TemplateKind::HierarchicalAssertClass,
        TemplateKind::AbstractAssertClass,
        TemplateKind::PropertyAssertion,
        TemplateKind::StandardEntryPoint,
        TemplateKind::BddEntryPoint,
        TemplateKind::SoftEntryPoint,
        TemplateKind::JunitSoftEntryPoint,
        TemplateKind::EntryPointMethod,
        TemplateKind::SoftEntryPointMethod,
    ];

    /// The override key for this kind.
    pub fn key(&self) -> &'static str {
        match self {
            TemplateKind::AssertClass => "assert_class",
            TemplateKind::HierarchicalAssertClass => "hierarchical_assert_class",
            TemplateKind::AbstractAssertClass => "abstract_assert_class",
            TemplateKind::PropertyAssertion => "property_assertion",
            TemplateKind::StandardEntryPoint => "standard_entry_point",
            TemplateKind::BddEntryPoint => "bdd_entry_point",
            TemplateKind::SoftEntryPoint => "soft_entry_point",
            TemplateKind::JunitSoftEntryPoint => "junit_soft_entry_point",
            TemplateKind::EntryPointMethod => "entry_point_method",
            TemplateKind::SoftEntryPointMethod => "soft_entry_point_method",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Rendering failed for one template.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("no template registered for kind '{kind}'")]
    MissingTemplate { kind: TemplateKind },

    #[error("unknown placeholder '${{{placeholder}}}'")]
    UnknownPlaceholder { placeholder: String },

    #[error("unterminated placeholder")]
    UnterminatedPlaceholder,
}

/// Extra substitution values supplied by the caller, on top of the
/// standard placeholders derived from the description.
#[derive(Debug, Default, Clone)]
pub struct RenderContext {
    values: IndexMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Turns a template kind plus a description and context into source text.
///
/// Registration replaces the template for a kind before generation begins;
/// the engine uses it to apply user overrides.
pub trait TemplateBackend {
    fn render(
        &self,
        kind: TemplateKind,
        description: Option<&TypeDescription>,
        ctx: &RenderContext,
    ) -> Result<String, RenderError>;

    fn register(&mut self, kind: TemplateKind, source: String);
}

/// The built-in back end: one template text per kind, `${name}`
/// placeholder substitution.
///
/// Placeholders resolve from the context first, then from the description
/// (`class`, `package`, `qualified_name`, `package_declaration`); anything
/// else is a rendering error.
pub struct DefaultBackend {
    templates: IndexMap<TemplateKind, String>,
}

impl Default for DefaultBackend {
    fn default() -> Self {
        let mut templates = IndexMap::new();
        for kind in TemplateKind::ALL {
            templates.insert(kind, defaults::text(kind).to_string());
        }
        Self { templates }
    }
}

impl DefaultBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve<'a>(
        placeholder: &str,
        description: Option<&'a TypeDescription>,
        ctx: &'a RenderContext,
    ) -> Option<String> {
        if let Some(value) = ctx.get(placeholder) {
            return Some(value.to_string());
        }
        let desc = description?;
        match placeholder {
            "class" => Some(desc.simple_name().to_string()),
            "package" => Some(desc.package().to_string()),
            "qualified_name" => Some(desc.qualified_name().to_string()),
            "package_declaration" => Some(package_declaration(desc.package())),
            _ => None,
        }
    }
}

/// The `package ...;` header for a class in the given package, empty for
/// the default package.
pub fn package_declaration(package: &str) -> String {
    if package.is_empty() {
        String::new()
    } else {
        format!("package {};\n\n", package)
    }
}

impl TemplateBackend for DefaultBackend {
    fn render(
        &self,
        kind: TemplateKind,
        description: Option<&TypeDescription>,
        ctx: &RenderContext,
    ) -> Result<String, RenderError> {
        let template = self
            .templates
            .get(&kind)
            .ok_or(RenderError::MissingTemplate { kind })?;

        let mut out = String::with_capacity(template.len());
        let mut rest = template.as_str();
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find('}')
                .ok_or(RenderError::UnterminatedPlaceholder)?;
            let placeholder = &after[..end];
            let value = Self::resolve(placeholder, description, ctx).ok_or_else(|| {
                RenderError::UnknownPlaceholder {
                    placeholder: placeholder.to_string(),
                }
            })?;
            out.push_str(&value);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn register(&mut self, kind: TemplateKind, source: String) {
        self.templates.insert(kind, source);
    }
}

/// Built-in template texts. The generated sources follow the AssertJ
/// custom-assertion conventions.
mod defaults {
    use super::TemplateKind;

    pub(super) fn text(kind: TemplateKind) -> &'static str {
        match kind {
            TemplateKind::AssertClass => ASSERT_CLASS,
            TemplateKind::HierarchicalAssertClass => HIERARCHICAL_ASSERT_CLASS,
            TemplateKind::AbstractAssertClass => ABSTRACT_ASSERT_CLASS,
            TemplateKind::PropertyAssertion => PROPERTY_ASSERTION,
            TemplateKind::StandardEntryPoint => STANDARD_ENTRY_POINT,
            TemplateKind::BddEntryPoint => BDD_ENTRY_POINT,
            TemplateKind::SoftEntryPoint => SOFT_ENTRY_POINT,
            TemplateKind::JunitSoftEntryPoint => JUNIT_SOFT_ENTRY_POINT,
            TemplateKind::EntryPointMethod => ENTRY_POINT_METHOD,
            TemplateKind::SoftEntryPointMethod => SOFT_ENTRY_POINT_METHOD,
        }
    }

    const ASSERT_CLASS: &str = r#"${package_declaration}/**
 * {@link ${qualified_name}} specific assertions.
 */
public class ${class}Assert extends org.assertj.core.api.AbstractObjectAssert<${class}Assert, ${qualified_name}> {

  /**
   * Creates a new <code>{@link ${class}Assert}</code> to make assertions on actual ${class}.
   */
  public ${class}Assert(${qualified_name} actual) {
    super(actual, ${class}Assert.class);
  }

  /**
   * An entry point for ${class}Assert to follow AssertJ standard <code>assertThat()</code> statements.
   */
  public static ${class}Assert assertThat(${qualified_name} actual) {
    return new ${class}Assert(actual);
  }
${property_assertions}}
"#;

    const HIERARCHICAL_ASSERT_CLASS: &str = r#"${package_declaration}/**
 * {@link ${qualified_name}} specific assertions.
 */
public class ${class}Assert extends Abstract${class}Assert<${class}Assert, ${qualified_name}> {

  /**
   * Creates a new <code>{@link ${class}Assert}</code> to make assertions on actual ${class}.
   */
  public ${class}Assert(${qualified_name} actual) {
    super(actual, ${class}Assert.class);
  }

  /**
   * An entry point for ${class}Assert to follow AssertJ standard <code>assertThat()</code> statements.
   */
  public static ${class}Assert assertThat(${qualified_name} actual) {
    return new ${class}Assert(actual);
  }
}
"#;

    const ABSTRACT_ASSERT_CLASS: &str = r#"${package_declaration}/**
 * Abstract base class for {@link ${qualified_name}} specific assertions.
 */
public abstract class Abstract${class}Assert<S extends Abstract${class}Assert<S, A>, A extends ${qualified_name}> extends ${parent_assert}<S, A> {

  /**
   * Creates a new <code>{@link Abstract${class}Assert}</code> to make assertions on actual ${class}.
   */
  protected Abstract${class}Assert(A actual, Class<S> selfType) {
    super(actual, selfType);
  }
${property_assertions}}
"#;

    const PROPERTY_ASSERTION: &str = r#"
  /**
   * Verifies that the actual ${class}'s ${property} is equal to the given one.
   */
  public ${self_type} has${pascal_property}(${property_type} ${property}) {
    isNotNull();
    if (!java.util.Objects.deepEquals(actual.${getter}(), ${property})) {
      failWithMessage("\nExpecting ${property} of:\n  <%s>\nto be:\n  <%s>\nbut was:\n  <%s>", actual, ${property}, actual.${getter}());
    }
    return ${self_ref};
  }
"#;

    const STANDARD_ENTRY_POINT: &str = r#"${package_declaration}/**
 * Entry point for assertions of different data types. Each method in this class is a static factory
 * for the type-specific assertion objects.
 */
public class Assertions {
${entry_point_methods}
  /**
   * Creates a new <code>{@link Assertions}</code>.
   */
  protected Assertions() {
    // empty
  }
}
"#;

    const BDD_ENTRY_POINT: &str = r#"${package_declaration}/**
 * BDD-style entry point for assertions of different data types. Each method in this class is a
 * static factory for the type-specific assertion objects.
 */
public class BddAssertions {
${entry_point_methods}
  /**
   * Creates a new <code>{@link BddAssertions}</code>.
   */
  protected BddAssertions() {
    // empty
  }
}
"#;

    const SOFT_ENTRY_POINT: &str = r#"${package_declaration}/**
 * Entry point for soft assertions of different data types.
 */
public class SoftAssertions extends org.assertj.core.api.SoftAssertions {
${entry_point_methods}}
"#;

    const JUNIT_SOFT_ENTRY_POINT: &str = r#"${package_declaration}/**
 * Entry point for soft assertions of different data types, to be used as a JUnit rule.
 */
public class JUnitSoftAssertions extends org.assertj.core.api.JUnitSoftAssertions {
${entry_point_methods}}
"#;

    const ENTRY_POINT_METHOD: &str = r#"
  /**
   * Creates a new instance of <code>{@link ${assert_type}}</code>.
   */
  public static ${assert_type} ${method_name}(${qualified_name} actual) {
    return new ${assert_type}(actual);
  }
"#;

    const SOFT_ENTRY_POINT_METHOD: &str = r#"
  /**
   * Creates a new "soft" instance of <code>{@link ${assert_type}}</code>.
   */
  public ${assert_type} assertThat(${qualified_name} actual) {
    return proxy(${assert_type}.class, ${qualified_name}.class, actual);
  }
"#;
}

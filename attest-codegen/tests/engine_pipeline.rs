//! End-to-end tests for the generation engine pipeline: resolution,
//! filtering, reporting and failure policies.

use std::path::{Path, PathBuf};

use attest_codegen::{
    DefaultBackend, Engine, EntryPointFlavor, ErrorPolicy, FileRole, GenerationError,
    IndexIntrospector, RenderContext, RenderError, Severity, TemplateBackend, TemplateKind,
};
use attest_describe::TypeDescription;
use attest_index::TypeIndex;

const ZOO: &str = r#"
[types."com.acme.Animal".properties]
name = "String"
good = "boolean"

[types."com.acme.Dog"]
extends = "com.acme.Animal"
[types."com.acme.Dog".properties]
breed = "String"

[types."com.acme.Cat"]
extends = "com.acme.Animal"

[types."com.acme.DogAssert"]
[types."com.acme.Assertions"]
[types."com.acme.internal.Widget"]
[types."org.other.Widget"]
"#;

fn zoo_index() -> TypeIndex {
    TypeIndex::from_str_with_filename(ZOO, "types.toml").expect("fixture index should parse")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn recorded_paths(report: &attest_codegen::GenerationReport) -> Vec<String> {
    report
        .generated_files()
        .iter()
        .map(|r| r.path.display().to_string())
        .collect()
}

#[test]
fn test_retained_set_is_deduplicated_across_routes() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector).dry_run(true);

    // Dog is requested three times: via its package and twice explicitly
    let report = engine.generate(
        &strings(&["com.acme"]),
        &strings(&["com.acme.Dog", "com.acme.Dog", "org.other.Widget"]),
        Path::new("out"),
        false,
    );

    assert!(!report.failed());
    let paths = recorded_paths(&report);
    let dog_files = paths.iter().filter(|p| p.ends_with("DogAssert.java")).count();
    assert_eq!(dog_files, 1);
    assert_eq!(
        paths
            .iter()
            .filter(|p| p.ends_with("org/other/WidgetAssert.java"))
            .count(),
        1
    );
}

#[test]
fn test_generated_artifacts_never_retained() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector).dry_run(true);

    let report = engine.generate(&strings(&["com.acme"]), &[], Path::new("out"), false);

    let paths = recorded_paths(&report);
    assert!(!paths.iter().any(|p| p.contains("DogAssertAssert")));
    assert!(!paths.iter().any(|p| p.contains("AssertionsAssert")));
    assert!(report.excluded_types().contains(&"com.acme.DogAssert".to_string()));
    assert!(report.excluded_types().contains(&"com.acme.Assertions".to_string()));
}

#[test]
fn test_exclude_takes_precedence_over_include() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .include_patterns(strings(&["^com\\.acme\\..*$"]))
        .exclude_patterns(strings(&[".*\\.internal\\..*$"]))
        .dry_run(true);

    let report = engine.generate(&strings(&["com.acme"]), &[], Path::new("out"), false);

    let paths = recorded_paths(&report);
    assert!(!paths.iter().any(|p| p.contains("internal")));
    assert!(
        report
            .excluded_types()
            .contains(&"com.acme.internal.Widget".to_string())
    );
    // The rejection is observable at debug severity, naming the pattern
    assert!(report.diagnostics().iter().any(|d| {
        d.severity == Severity::Debug && d.message.contains(".*\\.internal\\..*$")
    }));
}

#[test]
fn test_excluded_set_is_subset_of_resolved() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .exclude_patterns(strings(&["^com\\.acme\\.Cat$"]))
        .dry_run(true);

    let report = engine.generate(&strings(&["com.acme"]), &[], Path::new("out"), false);

    // Only resolved types can be excluded; org.other.Widget was never resolved
    for name in report.excluded_types() {
        assert!(name.starts_with("com.acme."), "unexpected exclusion: {name}");
    }
}

#[test]
fn test_not_found_reporting() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector).dry_run(true);

    let report = engine.generate(
        &[],
        &strings(&["com.acme.DoesNotExist"]),
        Path::new("out"),
        false,
    );

    assert!(!report.failed());
    assert_eq!(report.not_found(), ["com.acme.DoesNotExist"]);
    assert!(report.generated_files().is_empty());
    assert!(
        report
            .diagnostics()
            .iter()
            .any(|d| d.severity == Severity::Warning && d.message.contains("com.acme.DoesNotExist"))
    );
}

#[test]
fn test_inputs_recorded_verbatim() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector).dry_run(true);

    let report = engine.generate(
        &strings(&["com.acme", "com.acme"]),
        &strings(&["com.acme.Dog"]),
        Path::new("out"),
        false,
    );

    assert_eq!(report.input_packages(), ["com.acme", "com.acme"]);
    assert_eq!(report.input_types(), ["com.acme.Dog"]);
    assert_eq!(report.destination(), Some(Path::new("out")));
}

/// Back end that fails rendering the concrete assertion class of one type.
struct FailOn {
    inner: DefaultBackend,
    qualified_name: &'static str,
}

impl FailOn {
    fn new(qualified_name: &'static str) -> Self {
        Self {
            inner: DefaultBackend::new(),
            qualified_name,
        }
    }
}

impl TemplateBackend for FailOn {
    fn render(
        &self,
        kind: TemplateKind,
        description: Option<&TypeDescription>,
        ctx: &RenderContext,
    ) -> Result<String, RenderError> {
        if kind == TemplateKind::AssertClass
            && description.map(TypeDescription::qualified_name) == Some(self.qualified_name)
        {
            return Err(RenderError::UnknownPlaceholder {
                placeholder: "boom".to_string(),
            });
        }
        self.inner.render(kind, description, ctx)
    }

    fn register(&mut self, kind: TemplateKind, source: String) {
        self.inner.register(kind, source);
    }
}

const FIVE: &str = r#"
[types."com.acme.A"]
[types."com.acme.B"]
[types."com.acme.C"]
[types."com.acme.D"]
[types."com.acme.E"]
"#;

#[test]
fn test_fail_fast_stops_at_first_rendering_error() {
    let index = TypeIndex::from_str_with_filename(FIVE, "types.toml").unwrap();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .backend(FailOn::new("com.acme.C"))
        .entry_points(vec![EntryPointFlavor::Standard])
        .dry_run(true);

    let report = engine.generate(&strings(&["com.acme"]), &[], Path::new("out"), false);

    assert!(report.failed());
    assert!(matches!(
        report.failure(),
        Some(GenerationError::Render { .. })
    ));
    // Deterministic processing order: only A and B were emitted, and no
    // entry point references a type whose file does not exist
    assert_eq!(
        recorded_paths(&report),
        vec!["out/com/acme/AAssert.java", "out/com/acme/BAssert.java"]
    );
}

#[test]
fn test_continue_policy_skips_failing_type() {
    let index = TypeIndex::from_str_with_filename(FIVE, "types.toml").unwrap();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .backend(FailOn::new("com.acme.C"))
        .entry_points(vec![EntryPointFlavor::Standard])
        .error_policy(ErrorPolicy::Continue)
        .dry_run(true);

    let report = engine.generate(&strings(&["com.acme"]), &[], Path::new("out"), false);

    assert!(!report.failed());
    assert!(
        report
            .diagnostics()
            .iter()
            .any(|d| d.severity == Severity::Error && d.message.contains("com.acme.C"))
    );
    assert_eq!(report.assertion_files().count(), 4);

    // The entry point only references surviving types
    let entry = report
        .previews()
        .iter()
        .find(|p| p.path.ends_with("Assertions.java"))
        .expect("entry point preview");
    assert!(!entry.content.contains("CAssert"));
    assert!(entry.content.contains("BAssert"));
    assert!(entry.content.contains("DAssert"));
}

#[test]
fn test_write_failure_is_terminal_even_when_keeping_going() {
    let temp = tempfile::TempDir::new().unwrap();
    // A regular file where the destination directory should be: every
    // write fails
    let blocked = temp.path().join("out");
    std::fs::write(&blocked, "not a directory").unwrap();

    let index = TypeIndex::from_str_with_filename(FIVE, "types.toml").unwrap();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector).error_policy(ErrorPolicy::Continue);

    let report = engine.generate(&strings(&["com.acme"]), &[], &blocked, false);

    assert!(report.failed());
    assert!(matches!(report.failure(), Some(GenerationError::Io { .. })));
    assert!(report.generated_files().is_empty());
}

#[test]
fn test_duplicate_entry_point_flavors_generate_once() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .entry_points(vec![
            EntryPointFlavor::Standard,
            EntryPointFlavor::Standard,
            EntryPointFlavor::Bdd,
        ])
        .dry_run(true);

    let report = engine.generate(&[], &strings(&["com.acme.Cat"]), Path::new("out"), false);

    assert!(!report.failed());
    assert_eq!(report.entry_point_files(None).count(), 2);
    assert_eq!(
        report
            .entry_point_files(Some(EntryPointFlavor::Standard))
            .count(),
        1
    );
}

#[test]
fn test_unknown_template_override_key_rejected_up_front() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .template_overrides(vec![("no_such_kind".to_string(), PathBuf::from("x.txt"))])
        .dry_run(true);

    let report = engine.generate(&strings(&["com.acme"]), &[], Path::new("out"), false);

    assert!(report.failed());
    assert!(matches!(
        report.failure(),
        Some(GenerationError::UnknownTemplateKind { key }) if key == "no_such_kind"
    ));
    assert!(report.generated_files().is_empty());
}

#[test]
fn test_unreadable_template_override_is_recoverable() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .template_overrides(vec![(
            "assert_class".to_string(),
            PathBuf::from("does/not/exist.txt"),
        )])
        .dry_run(true);

    let report = engine.generate(&[], &strings(&["com.acme.Cat"]), Path::new("out"), false);

    assert!(!report.failed());
    assert_eq!(report.template_errors().len(), 1);
    assert_eq!(report.template_errors()[0].kind, "assert_class");

    // The default template stayed in effect
    let preview = &report.previews()[0];
    assert!(preview.content.contains("public class CatAssert"));
}

#[test]
fn test_readable_template_override_replaces_default() {
    let temp = tempfile::TempDir::new().unwrap();
    let override_path = temp.path().join("assert_class.txt");
    std::fs::write(&override_path, "// custom assertion for ${class}\n").unwrap();

    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .template_overrides(vec![("assert_class".to_string(), override_path)])
        .dry_run(true);

    let report = engine.generate(&[], &strings(&["com.acme.Cat"]), Path::new("out"), false);

    assert!(!report.failed());
    assert_eq!(
        report.previews()[0].content,
        "// custom assertion for Cat\n"
    );
}

#[test]
fn test_invalid_pattern_is_terminal() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .include_patterns(strings(&["("]))
        .dry_run(true);

    let report = engine.generate(&strings(&["com.acme"]), &[], Path::new("out"), false);

    assert!(report.failed());
    assert!(matches!(
        report.failure(),
        Some(GenerationError::InvalidPattern { .. })
    ));
}

#[test]
fn test_on_disk_generation_is_deterministic() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let temp = tempfile::TempDir::new().unwrap();

    let mut first = Vec::new();
    for _ in 0..2 {
        let mut engine = Engine::new(&introspector)
            .entry_points(vec![EntryPointFlavor::Standard, EntryPointFlavor::Bdd]);
        let report = engine.generate(
            &strings(&["com.acme"]),
            &[],
            temp.path(),
            true,
        );
        assert!(!report.failed());

        let mut contents: Vec<(PathBuf, String)> = report
            .generated_files()
            .iter()
            .map(|r| (r.path.clone(), std::fs::read_to_string(&r.path).unwrap()))
            .collect();
        contents.sort_by(|a, b| a.0.cmp(&b.0));

        if first.is_empty() {
            first = contents;
        } else {
            assert_eq!(first, contents);
        }
    }

    // Hierarchical mode writes a leaf and an abstract parent per type
    assert!(temp.path().join("com/acme/DogAssert.java").exists());
    assert!(temp.path().join("com/acme/AbstractDogAssert.java").exists());
    assert!(temp.path().join("com/acme/Assertions.java").exists());
    assert!(temp.path().join("com/acme/BddAssertions.java").exists());
}

#[test]
fn test_entry_point_roles_partitioned_by_flavor() {
    let index = zoo_index();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .entry_points(vec![
            EntryPointFlavor::Standard,
            EntryPointFlavor::Soft,
            EntryPointFlavor::JunitSoft,
        ])
        .dry_run(true);

    let report = engine.generate(&[], &strings(&["com.acme.Cat"]), Path::new("out"), false);

    assert_eq!(report.entry_point_files(None).count(), 3);
    let soft: Vec<_> = report
        .entry_point_files(Some(EntryPointFlavor::Soft))
        .collect();
    assert_eq!(soft.len(), 1);
    assert!(soft[0].path.ends_with("SoftAssertions.java"));
    assert!(matches!(
        soft[0].role,
        FileRole::EntryPoint(EntryPointFlavor::Soft)
    ));
}

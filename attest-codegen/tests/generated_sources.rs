//! Tests for the shape of generated source text.

use std::path::Path;

use attest_codegen::{Engine, EntryPointFlavor, GenerationReport, IndexIntrospector};
use attest_index::TypeIndex;

const ZOO: &str = r#"
[types."com.acme.Animal".properties]
name = "String"
good = "boolean"

[types."com.acme.Dog"]
extends = "com.acme.Animal"
[types."com.acme.Dog".properties]
breed = "String"
toys = "java.util.List<com.acme.Toy>"

[types."com.acme.Cat"]
extends = "com.acme.Animal"
"#;

fn generate(hierarchical: bool, flavors: Vec<EntryPointFlavor>) -> GenerationReport {
    let index = TypeIndex::from_str_with_filename(ZOO, "types.toml").unwrap();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .entry_points(flavors)
        .dry_run(true);
    let report = engine.generate(
        &["com.acme".to_string()],
        &[],
        Path::new("out"),
        hierarchical,
    );
    assert!(!report.failed(), "run failed: {:?}", report.failure());
    report
}

fn content<'a>(report: &'a GenerationReport, file_name: &str) -> &'a str {
    report
        .previews()
        .iter()
        .find(|p| p.path.ends_with(file_name))
        .unwrap_or_else(|| panic!("{file_name} not generated"))
        .content
        .as_str()
}

fn sorted_paths(report: &GenerationReport) -> String {
    let mut paths: Vec<String> = report
        .generated_files()
        .iter()
        .map(|r| r.path.display().to_string())
        .collect();
    paths.sort();
    paths.join("\n")
}

#[test]
fn test_flat_paths() {
    let report = generate(false, vec![EntryPointFlavor::Standard]);
    insta::assert_snapshot!("flat_paths", sorted_paths(&report));
}

#[test]
fn test_hierarchical_paths() {
    let report = generate(true, vec![EntryPointFlavor::Standard, EntryPointFlavor::Bdd]);
    insta::assert_snapshot!("hierarchical_paths", sorted_paths(&report));
}

#[test]
fn test_flat_assert_class_shape() {
    let report = generate(false, Vec::new());
    let dog = content(&report, "DogAssert.java");

    assert!(dog.starts_with("package com.acme;\n"));
    assert!(dog.contains(
        "public class DogAssert extends org.assertj.core.api.AbstractObjectAssert<DogAssert, com.acme.Dog>"
    ));
    // One assertion method per property, with the declared type preserved
    assert!(dog.contains("public DogAssert hasBreed(String breed)"));
    assert!(dog.contains("public DogAssert hasToys(java.util.List<com.acme.Toy> toys)"));
    assert!(dog.contains("actual.getBreed()"));
    assert!(dog.contains("return this;"));
}

#[test]
fn test_boolean_property_uses_is_accessor() {
    let report = generate(false, Vec::new());
    let animal = content(&report, "AnimalAssert.java");

    assert!(animal.contains("public AnimalAssert hasGood(boolean good)"));
    assert!(animal.contains("actual.isGood()"));
    assert!(animal.contains("actual.getName()"));
}

#[test]
fn test_hierarchical_parent_chain_mirrors_type_hierarchy() {
    let report = generate(true, Vec::new());

    // Dog's abstract parent extends Animal's, since Animal is retained
    let abstract_dog = content(&report, "AbstractDogAssert.java");
    assert!(abstract_dog.contains(
        "public abstract class AbstractDogAssert<S extends AbstractDogAssert<S, A>, A extends com.acme.Dog> extends com.acme.AbstractAnimalAssert<S, A>"
    ));
    // Property assertions live on the abstract class and return myself
    assert!(abstract_dog.contains("public S hasBreed(String breed)"));
    assert!(abstract_dog.contains("return myself;"));

    // Animal has no retained superclass, so its chain ends at the base
    let abstract_animal = content(&report, "AbstractAnimalAssert.java");
    assert!(abstract_animal.contains("extends org.assertj.core.api.AbstractObjectAssert<S, A>"));

    // The leaf is concrete and carries the static entry point
    let dog = content(&report, "DogAssert.java");
    assert!(dog.contains("public class DogAssert extends AbstractDogAssert<DogAssert, com.acme.Dog>"));
    assert!(dog.contains("public static DogAssert assertThat(com.acme.Dog actual)"));
}

#[test]
fn test_hierarchical_chain_ends_at_base_when_superclass_not_retained() {
    let index = TypeIndex::from_str_with_filename(ZOO, "types.toml").unwrap();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector).dry_run(true);

    // Only Dog is retained; Animal exists but was not requested
    let report = engine.generate(&[], &["com.acme.Dog".to_string()], Path::new("out"), true);

    let abstract_dog = content(&report, "AbstractDogAssert.java");
    assert!(abstract_dog.contains("extends org.assertj.core.api.AbstractObjectAssert<S, A>"));
}

#[test]
fn test_standard_entry_point_content() {
    let index = TypeIndex::from_str_with_filename(ZOO, "types.toml").unwrap();
    let introspector = IndexIntrospector::new(&index);
    let mut engine = Engine::new(&introspector)
        .entry_points(vec![EntryPointFlavor::Standard])
        .dry_run(true);
    let report = engine.generate(&[], &["com.acme.Dog".to_string()], Path::new("out"), false);

    let expected = r#"package com.acme;

/**
 * Entry point for assertions of different data types. Each method in this class is a static factory
 * for the type-specific assertion objects.
 */
public class Assertions {

  /**
   * Creates a new instance of <code>{@link com.acme.DogAssert}</code>.
   */
  public static com.acme.DogAssert assertThat(com.acme.Dog actual) {
    return new com.acme.DogAssert(actual);
  }

  /**
   * Creates a new <code>{@link Assertions}</code>.
   */
  protected Assertions() {
    // empty
  }
}
"#;
    assert_eq!(content(&report, "Assertions.java"), expected);
}

#[test]
fn test_entry_point_methods_sorted_by_qualified_name() {
    let report = generate(false, vec![EntryPointFlavor::Standard]);
    let entry = content(&report, "Assertions.java");

    let animal = entry.find("AnimalAssert assertThat").unwrap();
    let cat = entry.find("CatAssert assertThat").unwrap();
    let dog = entry.find("DogAssert assertThat").unwrap();
    assert!(animal < cat && cat < dog);
}

#[test]
fn test_entry_point_generation_is_idempotent() {
    let first = generate(false, vec![EntryPointFlavor::Standard]);
    let second = generate(false, vec![EntryPointFlavor::Standard]);

    assert_eq!(
        content(&first, "Assertions.java"),
        content(&second, "Assertions.java")
    );
}

#[test]
fn test_bdd_entry_point_uses_then() {
    let report = generate(false, vec![EntryPointFlavor::Bdd]);
    let bdd = content(&report, "BddAssertions.java");

    assert!(bdd.contains("public class BddAssertions"));
    assert!(bdd.contains("public static com.acme.DogAssert then(com.acme.Dog actual)"));
    assert!(!bdd.contains("assertThat"));
}

#[test]
fn test_soft_entry_points_proxy_their_assertions() {
    let report = generate(
        false,
        vec![EntryPointFlavor::Soft, EntryPointFlavor::JunitSoft],
    );

    let soft = content(&report, "SoftAssertions.java");
    assert!(soft.contains("public class SoftAssertions extends org.assertj.core.api.SoftAssertions"));
    assert!(soft.contains("return proxy(com.acme.DogAssert.class, com.acme.Dog.class, actual);"));

    let junit = content(&report, "JUnitSoftAssertions.java");
    assert!(junit.contains(
        "public class JUnitSoftAssertions extends org.assertj.core.api.JUnitSoftAssertions"
    ));
}

use crate::{fixture_path, fixture_paths, fixtures_dir};
use elm_deps::resolve::Resolution;
use elm_deps::{find_all_dependencies, find_all_dependencies_with, DependencyWalker};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn three_children() -> Vec<PathBuf> {
    fixture_paths(&["Test/ChildA.elm", "Test/ChildB.elm", "Native/Child.js"])
}

#[test]
fn main_without_module_declaration() {
    let deps = find_all_dependencies(&fixture_path("SimplestMain.elm")).unwrap();
    assert_eq!(deps, Vec::<PathBuf>::new());
}

#[test]
fn module_with_three_dependencies() {
    let deps = find_all_dependencies(&fixture_path("Parent.elm")).unwrap();
    assert_eq!(deps, three_children());
}

#[test]
fn port_module_with_three_dependencies() {
    let deps = find_all_dependencies(&fixture_path("ParentWithPort.elm")).unwrap();
    assert_eq!(deps, three_children());
}

#[test]
fn comments_between_imports() {
    let deps =
        find_all_dependencies(&fixture_path("ParentWithUnindentedMultilineComment.elm")).unwrap();
    assert_eq!(deps, three_children());
}

#[test]
fn nested_dependencies() {
    let deps = find_all_dependencies(&fixture_path("ParentWithNestedDeps.elm")).unwrap();
    assert_eq!(
        deps,
        fixture_paths(&[
            "Test/ChildA.elm",
            "Test/Sample/NestedChild.elm",
            "Test/ChildB.elm",
            "Native/Child.js",
        ])
    );
}

#[test]
fn non_root_entry_resolves_against_its_module_root() {
    let deps = find_all_dependencies(&fixture_path("Nested/Parent/Test.elm")).unwrap();
    assert_eq!(
        deps,
        fixture_paths(&[
            "Test/ChildA.elm",
            "Nested/Child.elm",
            "Nested/Test/Child.elm",
            "Test/Sample/NestedChild.elm",
            "Test/ChildB.elm",
            "Native/Child.js",
        ])
    );
}

#[test]
fn dependencies_in_another_source_directory() {
    let deps = find_all_dependencies(&fixture_path("ParentWithOtherSrcDeps.elm")).unwrap();
    assert_eq!(deps, fixture_paths(&["other-src/OtherChild.elm"]));
}

#[test]
fn module_in_secondary_root_finds_primary_root_modules() {
    let deps = find_all_dependencies(&fixture_path("other-src/OtherParent.elm")).unwrap();
    assert_eq!(deps, fixture_paths(&["Test/ChildA.elm"]));
}

#[test]
fn manifest_without_source_directories_is_ignored() {
    let deps =
        find_all_dependencies(&fixture_path("no-source-directories-elm-json/Main.elm")).unwrap();
    assert_eq!(deps, Vec::<PathBuf>::new());
}

#[test]
fn malformed_manifest_is_ignored() {
    let deps = find_all_dependencies(&fixture_path("malformed-elm-json/Main.elm")).unwrap();
    assert_eq!(deps, Vec::<PathBuf>::new());
}

#[test]
fn source_roots_can_be_disabled() {
    let report = DependencyWalker::new()
        .without_source_roots()
        .walk(&fixture_path("ParentWithOtherSrcDeps.elm"), None)
        .unwrap();
    assert!(report.dependencies.is_empty());
    assert_eq!(
        report.unreadable,
        fixture_paths(&["Html.elm", "OtherChild.elm"])
    );
}

#[test]
fn explicit_base_dir() {
    let deps = find_all_dependencies_with(
        &fixture_path("Parent.elm"),
        &[],
        Some(&fixtures_dir()),
        &[],
    )
    .unwrap();
    assert_eq!(deps, three_children());
}

#[test]
fn known_dependencies_are_kept_and_not_repeated() {
    let known = fixture_paths(&["Test/ChildB.elm"]);
    let deps = find_all_dependencies_with(&fixture_path("Parent.elm"), &known, None, &[]).unwrap();
    assert_eq!(
        deps,
        fixture_paths(&["Test/ChildB.elm", "Test/ChildA.elm", "Native/Child.js"])
    );
}

#[test]
fn visited_entry_is_not_rescanned() {
    let entry = fixture_path("Parent.elm");
    let deps = find_all_dependencies_with(&entry, &[], None, &[entry.clone()]).unwrap();
    assert!(deps.is_empty());
}

#[test]
fn repeated_resolution_is_identical() {
    let entry = fixture_path("Nested/Parent/Test.elm");
    let first = find_all_dependencies(&entry).unwrap();
    let second = find_all_dependencies(&entry).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unnormalized_entry_path_gives_normalized_output() {
    let entry = fixtures_dir().join("Test").join("..").join("./Parent.elm");
    let deps = find_all_dependencies(&entry).unwrap();
    assert_eq!(deps, three_children());
}

#[test]
fn missing_entry_is_a_hard_failure() {
    assert!(find_all_dependencies(&fixture_path("DoesNotExist.elm")).is_err());
}

#[test]
fn missing_entry_with_base_dir_is_soft() {
    let deps = find_all_dependencies_with(
        &fixture_path("DoesNotExist.elm"),
        &[],
        Some(&fixtures_dir()),
        &[],
    )
    .unwrap();
    assert!(deps.is_empty());
}

#[test]
fn report_edges_cover_readable_imports() {
    let report = DependencyWalker::new()
        .walk_seeded(&fixture_path("Nested/Parent/Test.elm"), None, Resolution::default())
        .unwrap();
    let nested_child = fixture_path("Nested/Child.elm");
    let child_a = fixture_path("Test/ChildA.elm");
    assert!(report
        .edges
        .iter()
        .any(|(from, to)| *from == nested_child && *to == child_a));
    assert!(report
        .edges
        .iter()
        .all(|(_, to)| *to != fixture_path("Html.elm")));
}

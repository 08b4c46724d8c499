#![allow(non_snake_case)]

use super::*;

fn schema_set() -> SchemaSet {
    SchemaSet::new(vec![
        SchemaFile::new("google/protobuf/empty.proto").with_package("google.protobuf"),
        SchemaFile::new("a.proto")
            .with_package("a")
            .with_dependency("google/protobuf/empty.proto"),
        SchemaFile::new("b.proto").with_package("b").with_dependency("a.proto"),
    ])
}

fn names(files: &[&SchemaFile]) -> Vec<String> {
    files.iter().map(|f| f.name.clone()).collect()
}

#[test]
fn select_files___keeps_request_order() {
    let set = schema_set();

    let selected = select_files(&["b.proto", "a.proto"], &set).unwrap();

    assert_eq!(names(&selected), ["b.proto", "a.proto"]);
}

#[test]
fn select_files___does_not_add_imports() {
    let set = schema_set();

    let selected = select_files(&["b.proto"], &set).unwrap();

    assert_eq!(names(&selected), ["b.proto"]);
}

#[test]
fn select_files___deduplicates() {
    let set = schema_set();

    let selected = select_files(&["a.proto", "b.proto", "a.proto"], &set).unwrap();

    assert_eq!(names(&selected), ["a.proto", "b.proto"]);
}

#[test]
fn select_files___unknown_entry___reports_every_missing_name() {
    let set = schema_set();

    let err = select_files(&["missing.proto", "a.proto", "other.proto"], &set).unwrap_err();

    assert_eq!(
        err,
        GenerateError::UnknownEntryFiles(vec!["missing.proto".into(), "other.proto".into()])
    );
}

#[test]
fn select_files___empty_request___selects_nothing() {
    let set = schema_set();

    let selected = select_files::<String>(&[], &set).unwrap();

    assert!(selected.is_empty());
}

#[test]
fn select_files___repeated_call___is_identical() {
    let set = schema_set();
    let request = vec!["b.proto".to_string(), "google/protobuf/empty.proto".to_string()];

    let first = select_files(&request, &set).unwrap();
    let second = select_files(&request, &set).unwrap();

    assert_eq!(first, second);
}

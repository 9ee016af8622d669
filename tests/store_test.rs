//! Tests for loading TOML catalogs from disk

use std::fs;

use tempfile::TempDir;

use catalog_tree::application::ApplicationError;
use catalog_tree::domain::DomainError;
use catalog_tree::infrastructure::traits::{CatalogRepository, RealFileSystem};
use catalog_tree::infrastructure::{InfraError, TomlCatalogStore};
use catalog_tree::util::testing::init_test_setup;

#[test]
fn given_valid_catalog_when_loading_then_records_keep_file_order() {
    init_test_setup();
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[[categories]]
id = 2
alias = "child"
parent_id = 1
position = 5

[[categories]]
id = 1
alias = "root"
"#,
    )
    .unwrap();

    // Act
    let store = TomlCatalogStore::load(&RealFileSystem, &path).unwrap();

    // Assert
    assert_eq!(store.source(), Some(path.as_path()));
    let arena = store.find_active_categories().unwrap();
    let records: Vec<(&str, i64, bool)> = arena
        .iter()
        .map(|(_, node)| (node.record.alias.as_str(), node.record.position, node.record.active))
        .collect();
    assert_eq!(records, vec![("child", 5, true), ("root", 0, true)]);

    let child = arena.find_by_alias("child").unwrap();
    assert_eq!(arena.get(child).unwrap().parent, arena.find_by_alias("root"));
    assert!(arena.get(child).unwrap().children.is_empty());
}

#[test]
fn given_missing_file_when_loading_then_catalog_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.toml");

    let result = TomlCatalogStore::load(&RealFileSystem, &path);

    assert!(matches!(result, Err(InfraError::Catalog { path: p, .. }) if p == path));
}

#[test]
fn given_directory_when_loading_then_catalog_error() {
    let temp = TempDir::new().unwrap();

    let result = TomlCatalogStore::load(&RealFileSystem, temp.path());

    assert!(matches!(result, Err(InfraError::Catalog { .. })));
}

#[test]
fn given_malformed_toml_when_loading_then_catalog_error_names_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "[[categories]]\nid = \"one\"\n").unwrap();

    let err = TomlCatalogStore::load(&RealFileSystem, &path).unwrap_err();

    assert!(matches!(err, InfraError::Catalog { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_duplicate_active_alias_when_loading_then_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("dup.toml");
    fs::write(
        &path,
        r#"
[[categories]]
id = 1
alias = "phones"

[[categories]]
id = 2
alias = "phones"
"#,
    )
    .unwrap();

    let result = TomlCatalogStore::load(&RealFileSystem, &path);

    assert!(matches!(
        result,
        Err(InfraError::Application(ApplicationError::Domain(
            DomainError::DuplicateCategoryAlias(a)
        ))) if a == "phones"
    ));
}

#[test]
fn given_empty_document_when_loading_then_empty_catalog() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let store = TomlCatalogStore::load(&RealFileSystem, &path).unwrap();

    assert!(store.find_all_categories().unwrap().is_empty());
    assert!(store.models().unwrap().is_empty());
}

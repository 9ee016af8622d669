//! Tests for characteristic based model filtering

use std::path::PathBuf;
use std::sync::Arc;

use rstest::{fixture, rstest};

use catalog_tree::application::services::{group_by_characteristic, CharacteristicService};
use catalog_tree::domain::{
    CategoryId, Characteristic, CharacteristicId, CharacteristicValue, FilterId, ValueFilter,
    ValueId,
};
use catalog_tree::infrastructure::traits::RealFileSystem;
use catalog_tree::infrastructure::{CatalogDocument, TomlCatalogStore};
use catalog_tree::util::testing::init_test_setup;

#[fixture]
fn service() -> CharacteristicService {
    init_test_setup();
    let path =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources/catalogs/shop.toml");
    let store = TomlCatalogStore::load(&RealFileSystem, &path).unwrap();
    CharacteristicService::new(Arc::new(store))
}

fn values(ids: &[u64]) -> ValueFilter {
    ValueFilter {
        value_ids: ids.iter().copied().map(ValueId).collect(),
        ..Default::default()
    }
}

fn model_aliases(service: &CharacteristicService, filter: &ValueFilter) -> Vec<String> {
    service
        .filter_models(filter)
        .unwrap()
        .into_iter()
        .map(|m| m.alias)
        .collect()
}

// ============================================================
// filter_models
// ============================================================

#[rstest]
fn given_empty_filter_when_filtering_then_every_model_passes(service: CharacteristicService) {
    let models = model_aliases(&service, &ValueFilter::default());

    assert_eq!(
        models,
        vec![
            "phone-x-black-64",
            "phone-x-white-64",
            "phone-x-black-128",
            "phone-x-white-128"
        ]
    );
}

#[rstest]
#[case(values(&[10]), vec!["phone-x-black-64", "phone-x-black-128"])]
#[case(values(&[10, 11]), vec!["phone-x-black-64", "phone-x-white-64", "phone-x-black-128", "phone-x-white-128"])]
#[case(values(&[10, 20]), vec!["phone-x-black-64"])]
#[case(values(&[10, 11, 21]), vec!["phone-x-black-128", "phone-x-white-128"])]
#[case(values(&[999]), vec![])]
fn given_selected_values_when_filtering_then_models_cover_every_selected_characteristic(
    service: CharacteristicService,
    #[case] filter: ValueFilter,
    #[case] expected: Vec<&str>,
) {
    assert_eq!(model_aliases(&service, &filter), expected);
}

#[rstest]
fn given_category_filter_when_filtering_then_category_values_are_available(
    service: CharacteristicService,
) {
    // Arrange: black and white are offered in smartphones
    let filter = ValueFilter {
        category: Some(CategoryId(3)),
        ..Default::default()
    };

    // Act
    let models = model_aliases(&service, &filter);

    // Assert
    assert_eq!(models.len(), 4);
}

#[rstest]
fn given_saved_filter_when_filtering_then_filter_values_are_available(
    service: CharacteristicService,
) {
    // Arrange: saved filter 100 holds white and 64gb
    let filter = ValueFilter {
        filter: Some(FilterId(100)),
        ..Default::default()
    };

    // Act
    let models = model_aliases(&service, &filter);

    // Assert
    assert_eq!(models, vec!["phone-x-white-64"]);
}

// ============================================================
// values_with_model_counts
// ============================================================

#[rstest]
fn given_no_selection_when_counting_then_each_value_counts_its_models(
    service: CharacteristicService,
) {
    let counts = service
        .values_with_model_counts(&ValueFilter::default(), None)
        .unwrap();

    let summary: Vec<(&str, &str, usize)> = counts
        .iter()
        .map(|c| (c.characteristic.as_str(), c.value.alias.as_str(), c.models_count))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("color", "black", 2),
            ("color", "white", 2),
            ("memory", "64gb", 2),
            ("memory", "128gb", 2),
        ]
    );
}

#[rstest]
fn given_black_selected_when_counting_then_counts_reflect_adding_each_value(
    service: CharacteristicService,
) {
    let counts = service.values_with_model_counts(&values(&[10]), None).unwrap();

    let summary: Vec<(&str, usize)> = counts
        .iter()
        .map(|c| (c.value.alias.as_str(), c.models_count))
        .collect();
    assert_eq!(
        summary,
        vec![("black", 2), ("white", 2), ("64gb", 1), ("128gb", 1)]
    );
}

#[rstest]
#[case(Some(true), vec!["black", "white"])]
#[case(Some(false), vec!["64gb", "128gb"])]
#[case(None, vec!["black", "white", "64gb", "128gb"])]
fn given_menu_flag_when_counting_then_only_matching_characteristics_listed(
    service: CharacteristicService,
    #[case] in_menu: Option<bool>,
    #[case] expected: Vec<&str>,
) {
    let counts = service
        .values_with_model_counts(&ValueFilter::default(), in_menu)
        .unwrap();

    let listed: Vec<&str> = counts.iter().map(|c| c.value.alias.as_str()).collect();
    assert_eq!(listed, expected);
}

// ============================================================
// group_by_characteristic
// ============================================================

fn characteristic(id: u64, alias: &str) -> Characteristic {
    Characteristic {
        id: CharacteristicId(id),
        alias: alias.to_string(),
        in_menu: true,
    }
}

fn value(id: u64, characteristic: u64, alias: &str, position: i64) -> CharacteristicValue {
    CharacteristicValue {
        id: ValueId(id),
        characteristic_id: CharacteristicId(characteristic),
        alias: alias.to_string(),
        position,
        category_ids: Vec::new(),
        filter_ids: Vec::new(),
    }
}

#[test]
fn given_interleaved_positions_when_grouping_counts_then_one_group_per_characteristic() {
    init_test_setup();
    // Arrange: color at positions 1 and 3, memory at 2
    let document = CatalogDocument {
        characteristics: vec![characteristic(1, "color"), characteristic(2, "memory")],
        values: vec![
            value(10, 1, "black", 1),
            value(20, 2, "64gb", 2),
            value(11, 1, "white", 3),
        ],
        ..Default::default()
    };
    let service =
        CharacteristicService::new(Arc::new(TomlCatalogStore::from_document(document).unwrap()));
    let counts = service
        .values_with_model_counts(&ValueFilter::default(), None)
        .unwrap();

    // Act
    let groups = group_by_characteristic(&counts);

    // Assert
    let summary: Vec<(&str, Vec<&str>)> = groups
        .iter()
        .map(|(name, group)| (*name, group.iter().map(|c| c.value.alias.as_str()).collect()))
        .collect();
    assert_eq!(
        summary,
        vec![("color", vec!["black", "white"]), ("memory", vec!["64gb"])]
    );
}

//! Domain entities: core catalog data structures

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Stable identifier of a category record.
    CategoryId
);
id_type!(CharacteristicId);
id_type!(ValueId);
id_type!(FilterId);
id_type!(ProductId);
id_type!(ModelId);

fn default_active() -> bool {
    true
}

/// Flat category record as handed out by the persistence layer.
///
/// Parent/child wiring does not live here: the resolved parent link and the
/// derived children list belong to the arena node wrapping the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    /// Human-readable slug, unique within the active set
    pub alias: String,
    /// Parent category, None for roots
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub position: i64,
}

impl CategoryRecord {
    pub fn new(id: u64, alias: impl Into<String>, parent_id: Option<u64>) -> Self {
        Self {
            id: CategoryId(id),
            alias: alias.into(),
            parent_id: parent_id.map(CategoryId),
            active: true,
            position: 0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl fmt::Display for CategoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alias)
    }
}

/// A product characteristic such as "color" or "memory".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristic {
    pub id: CharacteristicId,
    pub alias: String,
    /// Whether the characteristic is offered in navigation menus
    #[serde(default)]
    pub in_menu: bool,
}

/// One selectable value of a characteristic, e.g. color "black".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicValue {
    pub id: ValueId,
    pub characteristic_id: CharacteristicId,
    pub alias: String,
    #[serde(default)]
    pub position: i64,
    /// Categories this value is offered in
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
    /// Saved filters this value belongs to
    #[serde(default)]
    pub filter_ids: Vec<FilterId>,
}

/// A catalog product, assigned to one category per tree level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub alias: String,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
}

/// A concrete sellable variant of a product, described by characteristic values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductModel {
    pub id: ModelId,
    pub product_id: ProductId,
    pub alias: String,
    #[serde(default)]
    pub value_ids: Vec<ValueId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_record_without_parent_when_checking_root_then_true() {
        let record = CategoryRecord::new(1, "root", None);
        assert!(record.is_root());
        assert!(record.active);
        assert_eq!(record.to_string(), "root");
    }

    #[test]
    fn given_toml_record_without_optional_fields_when_deserializing_then_uses_defaults() {
        let record: CategoryRecord = toml::from_str("id = 7\nalias = \"phones\"\n").unwrap();
        assert_eq!(record.id, CategoryId(7));
        assert_eq!(record.parent_id, None);
        assert!(record.active);
        assert_eq!(record.position, 0);
    }
}

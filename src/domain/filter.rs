//! Characteristic value filtering for product models.
//!
//! A filter selects a set of *available* values. A model matches when the
//! values it carries from that set cover every characteristic the set spans:
//! picking "black" and "white" for color plus "64gb" for memory matches models
//! that are black or white AND have 64gb.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::{
    CategoryId, CharacteristicId, CharacteristicValue, FilterId, ProductModel, ValueId,
};

/// User selection narrowing down product models.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueFilter {
    /// Explicitly selected characteristic values
    pub value_ids: Vec<ValueId>,
    /// Values offered in this category are available
    pub category: Option<CategoryId>,
    /// Values belonging to this saved filter are available
    pub filter: Option<FilterId>,
}

impl ValueFilter {
    /// Filtering only applies when some selection is present.
    pub fn is_active(&self) -> bool {
        !self.value_ids.is_empty() || self.category.is_some() || self.filter.is_some()
    }

    /// Whether `value` belongs to the available set (any criterion suffices).
    pub fn admits(&self, value: &CharacteristicValue) -> bool {
        self.value_ids.contains(&value.id)
            || self
                .category
                .is_some_and(|category| value.category_ids.contains(&category))
            || self
                .filter
                .is_some_and(|filter| value.filter_ids.contains(&filter))
    }
}

/// Available value set with the characteristic lookup needed for matching.
#[derive(Debug)]
pub struct AvailableValues {
    characteristic_of: HashMap<ValueId, CharacteristicId>,
    available: HashSet<ValueId>,
    required: HashSet<CharacteristicId>,
}

impl AvailableValues {
    /// Evaluate `filter` against the full value list.
    pub fn new(values: &[CharacteristicValue], filter: &ValueFilter) -> Self {
        Self::with_current(values, filter, None)
    }

    /// Same as `new`, additionally treating `current` as available.
    pub fn with_current(
        values: &[CharacteristicValue],
        filter: &ValueFilter,
        current: Option<ValueId>,
    ) -> Self {
        let characteristic_of = values
            .iter()
            .map(|value| (value.id, value.characteristic_id))
            .collect();
        let mut set = Self {
            characteristic_of,
            available: HashSet::new(),
            required: HashSet::new(),
        };
        for value in values {
            if Some(value.id) == current || filter.admits(value) {
                set.available.insert(value.id);
                set.required.insert(value.characteristic_id);
            }
        }
        set
    }

    pub fn contains(&self, id: ValueId) -> bool {
        self.available.contains(&id)
    }

    /// Number of distinct characteristics a model must cover.
    pub fn required_characteristics(&self) -> usize {
        self.required.len()
    }

    /// Whether the model's available values span every required characteristic.
    pub fn matches(&self, model: &ProductModel) -> bool {
        let covered: HashSet<CharacteristicId> = model
            .value_ids
            .iter()
            .filter(|id| self.contains(**id))
            .filter_map(|id| self.characteristic_of.get(id).copied())
            .collect();
        !covered.is_empty() && covered.len() >= self.required_characteristics()
    }
}

/// Models passing `filter`; an inactive filter passes everything.
pub fn filter_models<'m>(
    models: &'m [ProductModel],
    values: &[CharacteristicValue],
    filter: &ValueFilter,
) -> Vec<&'m ProductModel> {
    if !filter.is_active() {
        return models.iter().collect();
    }
    let available = AvailableValues::new(values, filter);
    models.iter().filter(|model| available.matches(model)).collect()
}

//! Characteristic value service
//!
//! Filters product models by selected characteristic values and counts how
//! many models each value would leave when picked.

use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    filter_models, AvailableValues, CharacteristicId, CharacteristicValue, ProductModel,
    ValueFilter,
};
use crate::infrastructure::traits::CatalogRepository;

/// A characteristic value with the number of models it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    pub value: CharacteristicValue,
    pub characteristic: String,
    pub models_count: usize,
}

/// Counts grouped by characteristic, groups ordered by first appearance.
///
/// Values keep their position order inside each group.
pub fn group_by_characteristic(counts: &[ValueCount]) -> Vec<(&str, Vec<&ValueCount>)> {
    let mut groups = counts
        .iter()
        .into_group_map_by(|&count| count.characteristic.as_str());
    counts
        .iter()
        .map(|count| count.characteristic.as_str())
        .unique()
        .filter_map(|name| groups.remove(&name).map(|group| (name, group)))
        .collect()
}

/// Service for characteristic based model filtering.
pub struct CharacteristicService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CharacteristicService {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// Models matching `filter`, in store order.
    #[instrument(level = "debug", skip(self))]
    pub fn filter_models(&self, filter: &ValueFilter) -> ApplicationResult<Vec<ProductModel>> {
        let values = self.catalog.values()?;
        let models = self.catalog.models()?;
        let matching: Vec<ProductModel> = filter_models(&models, &values, filter)
            .into_iter()
            .cloned()
            .collect();
        debug!("filter_models: {} of {} match", matching.len(), models.len());
        Ok(matching)
    }

    /// Every value ordered by position, with the count of matching models.
    ///
    /// A value's count covers models carrying it that still match `filter`
    /// once the value itself is added to the selection. With `in_menu` set,
    /// only values of characteristics with that menu flag are listed.
    #[instrument(level = "debug", skip(self))]
    pub fn values_with_model_counts(
        &self,
        filter: &ValueFilter,
        in_menu: Option<bool>,
    ) -> ApplicationResult<Vec<ValueCount>> {
        let characteristics: HashMap<CharacteristicId, _> = self
            .catalog
            .characteristics()?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let mut values = self.catalog.values()?;
        let models = self.catalog.models()?;
        values.sort_by_key(|value| (value.position, value.id));

        let counts = values
            .iter()
            .filter_map(|value| {
                let characteristic = characteristics.get(&value.characteristic_id)?;
                if in_menu.is_some_and(|flag| characteristic.in_menu != flag) {
                    return None;
                }
                let with_value: Vec<&ProductModel> = models
                    .iter()
                    .filter(|model| model.value_ids.contains(&value.id))
                    .collect();
                let models_count = if filter.is_active() {
                    let available = AvailableValues::with_current(&values, filter, Some(value.id));
                    with_value
                        .into_iter()
                        .filter(|model| available.matches(model))
                        .count()
                } else {
                    with_value.len()
                };
                Some(ValueCount {
                    value: value.clone(),
                    characteristic: characteristic.alias.clone(),
                    models_count,
                })
            })
            .collect();
        Ok(counts)
    }
}

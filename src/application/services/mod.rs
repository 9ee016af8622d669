//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `CatalogRepository` boundary trait
//! but are themselves concrete structs, not traits.

mod category;
mod characteristic;

pub use category::{CategoryForest, CategoryService};
pub use characteristic::{group_by_characteristic, CharacteristicService, ValueCount};

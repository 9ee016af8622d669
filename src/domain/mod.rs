//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod filter;

pub use arena::{CategoryArena, CategoryNode};
pub use builder::CategoryTreeBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use filter::{filter_models, AvailableValues, ValueFilter};

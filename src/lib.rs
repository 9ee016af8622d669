//! Product catalog toolkit.
//!
//! Rebuilds category hierarchies from flat record sets, walks ancestor chains
//! and filters product models by characteristic values.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{CategoryArena, CategoryRecord, CategoryTreeBuilder, DomainError};

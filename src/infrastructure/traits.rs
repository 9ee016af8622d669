//! I/O boundary traits for testability
//!
//! These traits abstract storage access, allowing services
//! to be tested with in-memory implementations.

use std::io;
use std::path::Path;

use crate::application::ApplicationResult;
use crate::domain::{
    CategoryArena, CategoryRecord, Characteristic, CharacteristicValue, Product, ProductModel,
};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Catalog persistence abstraction.
///
/// Category arenas handed out are fully materialized: every record of the
/// returned set is present and the `parent` links are resolved within that
/// set. Children lists are left empty for the tree builder.
pub trait CatalogRepository: Send + Sync {
    /// Active categories only, in store order.
    fn find_active_categories(&self) -> ApplicationResult<CategoryArena>;

    /// Every category regardless of its active flag, in store order.
    fn find_all_categories(&self) -> ApplicationResult<CategoryArena>;

    /// Product by alias.
    fn find_product(&self, alias: &str) -> ApplicationResult<Option<Product>>;

    /// Single lookup step: the product's category directly below `previous`,
    /// or one of its root categories when `previous` is None.
    fn find_category_by_product(
        &self,
        product: &Product,
        previous: Option<&CategoryRecord>,
    ) -> ApplicationResult<Option<CategoryRecord>>;

    /// All characteristics, in store order.
    fn characteristics(&self) -> ApplicationResult<Vec<Characteristic>>;

    /// All characteristic values, in store order.
    fn values(&self) -> ApplicationResult<Vec<CharacteristicValue>>;

    /// All product models, in store order.
    fn models(&self) -> ApplicationResult<Vec<ProductModel>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

//! TOML-file backed catalog store
//!
//! The whole catalog document is read once; queries are answered from memory.
//!
//! ```toml
//! [[categories]]
//! id = 1
//! alias = "phones"
//!
//! [[categories]]
//! id = 2
//! alias = "smartphones"
//! parent_id = 1
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    CategoryArena, CategoryRecord, Characteristic, CharacteristicValue, DomainError,
    DomainResult, Product, ProductModel,
};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{CatalogRepository, FileSystem};

/// Raw catalog document as stored on disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    pub categories: Vec<CategoryRecord>,
    pub characteristics: Vec<Characteristic>,
    pub values: Vec<CharacteristicValue>,
    pub products: Vec<Product>,
    pub models: Vec<ProductModel>,
}

impl CatalogDocument {
    /// Reject duplicate category ids, and duplicate aliases within the active set.
    pub fn validate(&self) -> DomainResult<()> {
        let mut ids = HashSet::new();
        let mut aliases = HashSet::new();
        for record in &self.categories {
            if !ids.insert(record.id) {
                return Err(DomainError::DuplicateCategoryId(record.id));
            }
            if record.active && !aliases.insert(record.alias.as_str()) {
                return Err(DomainError::DuplicateCategoryAlias(record.alias.clone()));
            }
        }
        Ok(())
    }
}

/// Catalog repository reading a single TOML document.
#[derive(Debug)]
pub struct TomlCatalogStore {
    document: CatalogDocument,
    source: Option<PathBuf>,
}

impl TomlCatalogStore {
    /// Load and validate the catalog at `path`.
    #[instrument(level = "debug", skip(fs))]
    pub fn load(fs: &dyn FileSystem, path: &Path) -> InfraResult<Self> {
        if !fs.is_file(path) {
            return Err(InfraError::Catalog {
                path: path.to_path_buf(),
                message: "not a file".to_string(),
            });
        }
        let content = fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read catalog {}", path.display()), e))?;
        let document: CatalogDocument =
            toml::from_str(&content).map_err(|e| InfraError::Catalog {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let mut store = Self::from_document(document)?;
        store.source = Some(path.to_path_buf());
        debug!(
            "loaded catalog: {} categories, {} values, {} models",
            store.document.categories.len(),
            store.document.values.len(),
            store.document.models.len()
        );
        Ok(store)
    }

    /// Wrap an already parsed document.
    pub fn from_document(document: CatalogDocument) -> InfraResult<Self> {
        document.validate()?;
        Ok(Self {
            document,
            source: None,
        })
    }

    /// File the catalog was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Build an arena of `records` with parent links resolved inside the set.
    fn hydrate<'a>(records: impl Iterator<Item = &'a CategoryRecord>) -> CategoryArena {
        let mut arena: CategoryArena = records.cloned().collect();
        let mut by_id = HashMap::new();
        for (idx, node) in arena.iter() {
            by_id.entry(node.record.id).or_insert(idx);
        }
        let links: Vec<_> = arena
            .iter()
            .filter_map(|(idx, node)| {
                let parent_id = node.record.parent_id?;
                by_id.get(&parent_id).map(|&parent| (idx, parent))
            })
            .collect();

        for (idx, parent) in links {
            arena.set_parent(idx, Some(parent));
        }
        arena
    }
}

impl CatalogRepository for TomlCatalogStore {
    fn find_active_categories(&self) -> ApplicationResult<CategoryArena> {
        Ok(Self::hydrate(
            self.document.categories.iter().filter(|record| record.active),
        ))
    }

    fn find_all_categories(&self) -> ApplicationResult<CategoryArena> {
        Ok(Self::hydrate(self.document.categories.iter()))
    }

    fn find_product(&self, alias: &str) -> ApplicationResult<Option<Product>> {
        Ok(self
            .document
            .products
            .iter()
            .find(|product| product.alias == alias)
            .cloned())
    }

    fn find_category_by_product(
        &self,
        product: &Product,
        previous: Option<&CategoryRecord>,
    ) -> ApplicationResult<Option<CategoryRecord>> {
        let parent_id = previous.map(|category| category.id);
        Ok(product
            .category_ids
            .iter()
            .filter_map(|id| self.document.categories.iter().find(|c| c.id == *id))
            .find(|category| category.parent_id == parent_id)
            .cloned())
    }

    fn characteristics(&self) -> ApplicationResult<Vec<Characteristic>> {
        Ok(self.document.characteristics.clone())
    }

    fn values(&self) -> ApplicationResult<Vec<CharacteristicValue>> {
        Ok(self.document.values.clone())
    }

    fn models(&self) -> ApplicationResult<Vec<ProductModel>> {
        Ok(self.document.models.clone())
    }
}

//! Category hierarchy service
//!
//! Builds category forests from the repository and answers hierarchy queries.

use std::sync::Arc;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CategoryArena, CategoryRecord, CategoryTreeBuilder};
use crate::infrastructure::traits::CatalogRepository;

/// Categories with wired children and the roots of every tree.
#[derive(Debug)]
pub struct CategoryForest {
    pub arena: CategoryArena,
    /// Root nodes in store order
    pub roots: Vec<Index>,
}

impl CategoryForest {
    pub fn root_records(&self) -> Vec<&CategoryRecord> {
        self.roots
            .iter()
            .filter_map(|&idx| self.arena.record(idx))
            .collect()
    }

    /// Root whose alias is `alias`.
    pub fn find_root(&self, alias: &str) -> Option<Index> {
        self.roots
            .iter()
            .copied()
            .find(|&idx| self.arena.record(idx).is_some_and(|r| r.alias == alias))
    }
}

/// Service answering category hierarchy questions.
pub struct CategoryService {
    catalog: Arc<dyn CatalogRepository>,
    include_inactive: bool,
}

impl CategoryService {
    pub fn new(catalog: Arc<dyn CatalogRepository>, include_inactive: bool) -> Self {
        Self {
            catalog,
            include_inactive,
        }
    }

    fn load_categories(&self) -> ApplicationResult<CategoryArena> {
        if self.include_inactive {
            self.catalog.find_all_categories()
        } else {
            self.catalog.find_active_categories()
        }
    }

    /// Top level categories with their nested children filled in.
    #[instrument(level = "debug", skip(self))]
    pub fn top_level_with_children(&self) -> ApplicationResult<CategoryForest> {
        let mut arena = self.load_categories()?;
        let roots = CategoryTreeBuilder::new().build_tree(&mut arena);
        debug!(
            "top_level_with_children: {} records, {} roots",
            arena.len(),
            roots.len()
        );
        Ok(CategoryForest { arena, roots })
    }

    /// Whether `alias` is `root` itself or one of its descendants.
    ///
    /// Used to highlight the menu branch containing the current category.
    pub fn is_current_category_alias(
        &self,
        forest: &CategoryForest,
        root: Index,
        alias: &str,
    ) -> ApplicationResult<bool> {
        Ok(CategoryTreeBuilder::new().is_alias_in_subtree(&forest.arena, root, alias)?)
    }

    /// Categories of a product, one per level, gathered by repeated lookups.
    #[instrument(level = "debug", skip(self))]
    pub fn product_categories(&self, product_alias: &str) -> ApplicationResult<Vec<CategoryRecord>> {
        let product = self
            .catalog
            .find_product(product_alias)?
            .ok_or_else(|| ApplicationError::ProductNotFound(product_alias.to_string()))?;

        CategoryTreeBuilder::new().path_via_external_lookup(&product, |product, previous| {
            self.catalog.find_category_by_product(product, previous)
        })
    }

    /// The category named `alias` preceded by all of its ancestors, root first.
    #[instrument(level = "debug", skip(self))]
    pub fn categories_with_parents(&self, alias: &str) -> ApplicationResult<Vec<CategoryRecord>> {
        let arena = self.catalog.find_all_categories()?;
        // Aliases are only unique among active categories
        let idx = arena
            .iter()
            .find(|(_, node)| node.record.active && node.record.alias == alias)
            .map(|(idx, _)| idx)
            .or_else(|| arena.find_by_alias(alias))
            .ok_or_else(|| ApplicationError::CategoryNotFound(alias.to_string()))?;

        let chain = CategoryTreeBuilder::new().ancestor_chain(&arena, idx)?;
        Ok(chain
            .into_iter()
            .filter_map(|idx| arena.record(idx).cloned())
            .collect())
    }
}

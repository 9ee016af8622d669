//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::instrument;

use crate::application::services::{CategoryService, CharacteristicService};
use crate::application::ApplicationError;
use crate::config::Settings;
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::store::TomlCatalogStore;
use crate::infrastructure::traits::{CatalogRepository, RealFileSystem};

/// Container holding the shared dependencies of all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Catalog repository
    pub catalog: Arc<dyn CatalogRepository>,
}

impl ServiceContainer {
    /// Create a container reading the configured catalog from disk.
    #[instrument(level = "debug", skip(settings))]
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let path = settings.catalog.clone().ok_or_else(|| ApplicationError::Config {
            message: "no catalog file configured (use --catalog or set `catalog`)".to_string(),
        })?;
        let store = TomlCatalogStore::load(&RealFileSystem, &path)?;
        Ok(Self::with_deps(settings, Arc::new(store)))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self {
            settings: Arc::new(settings),
            catalog,
        }
    }

    pub fn category_service(&self) -> CategoryService {
        CategoryService::new(Arc::clone(&self.catalog), self.settings.include_inactive)
    }

    pub fn characteristic_service(&self) -> CharacteristicService {
        CharacteristicService::new(Arc::clone(&self.catalog))
    }
}

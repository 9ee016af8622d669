//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/catalog-tree/catalog-tree.toml`
//! 3. Local config: `<project_dir>/.catalog-tree.toml`
//! 4. Environment variables: `CATALOG_TREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Tree display settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeSettings {
    /// Show category ids next to aliases
    pub show_ids: bool,
}

/// Raw tree settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeSettings {
    pub show_ids: Option<bool>,
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog: Option<PathBuf>,
    pub include_inactive: Option<bool>,
    pub tree: RawTreeSettings,
}

/// Unified configuration for catalog-tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog file to load (TOML)
    pub catalog: Option<PathBuf>,
    /// Build trees from inactive categories too
    pub include_inactive: bool,
    /// Tree display settings
    pub tree: TreeSettings,
}

/// Get the XDG config directory for catalog-tree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "catalog-tree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("catalog-tree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".catalog-tree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand shell variables and tilde in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(catalog) = &self.catalog {
            let expanded = expand_env_vars(catalog.to_string_lossy().as_ref());
            self.catalog = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog: overlay.catalog.clone().or_else(|| self.catalog.clone()),
            include_inactive: overlay.include_inactive.unwrap_or(self.include_inactive),
            tree: TreeSettings {
                show_ids: overlay.tree.show_ids.unwrap_or(self.tree.show_ids),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.catalog-tree.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config; relative catalog paths resolve against its directory
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let mut raw = load_raw_settings(&local_path)?;
                raw.catalog = raw.catalog.map(|catalog| {
                    let expanded = PathBuf::from(expand_env_vars(&catalog.to_string_lossy()));
                    if expanded.is_relative() {
                        dir.join(expanded)
                    } else {
                        expanded
                    }
                });
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply CATALOG_TREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CATALOG_TREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog") {
            settings.catalog = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("include_inactive") {
            settings.include_inactive = val;
        }
        if let Ok(val) = config.get_bool("tree.show_ids") {
            settings.tree.show_ids = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# catalog-tree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/catalog-tree/catalog-tree.toml
#   Local:  <project_dir>/.catalog-tree.toml
#   Env:    CATALOG_TREE_* environment variables (e.g. CATALOG_TREE_CATALOG)

# Catalog file to load (relative paths resolve against the local config's directory)
# catalog = "~/shop/catalog.toml"

# Build trees from inactive categories as well
# include_inactive = false

[tree]
# Show category ids next to aliases
# show_ids = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overlay_values_when_merging_then_keeps_base() {
        let base = Settings {
            catalog: Some(PathBuf::from("/data/catalog.toml")),
            include_inactive: true,
            tree: TreeSettings { show_ids: true },
        };

        let merged = base.merge_with(&RawSettings::default());

        assert_eq!(merged, base);
    }

    #[test]
    fn given_overlay_values_when_merging_then_overlay_wins() {
        let base = Settings::default();
        let overlay = RawSettings {
            catalog: Some(PathBuf::from("other.toml")),
            include_inactive: Some(true),
            tree: RawTreeSettings {
                show_ids: Some(true),
            },
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.catalog, Some(PathBuf::from("other.toml")));
        assert!(merged.include_inactive);
        assert!(merged.tree.show_ids);
    }

    #[test]
    fn given_tilde_in_catalog_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            catalog: Some(PathBuf::from("~/catalog.toml")),
            ..Default::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let catalog = settings.catalog.unwrap();
        assert!(
            catalog.to_string_lossy().starts_with(&home),
            "catalog should start with home dir: {}",
            catalog.display()
        );
    }

    #[test]
    fn given_template_when_parsing_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.catalog.is_none());
    }
}

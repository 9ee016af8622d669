//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Product catalog toolkit: category trees, ancestor chains and characteristic value filtering
#[derive(Parser, Debug)]
#[command(name = "catalog-tree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Catalog file (overrides config)
    #[arg(short, long, global = true, env = "CATALOG_TREE_CATALOG", value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Include inactive categories
    #[arg(long, global = true)]
    pub include_inactive: bool,

    /// Project directory holding `.catalog-tree.toml` (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show category hierarchy as tree
    Tree {
        /// Only the tree below this root alias
        root: Option<String>,
    },

    /// List top level categories
    Roots,

    /// Check whether a category is inside another category's subtree
    Contains {
        /// Alias of the category whose subtree is searched
        root: String,
        /// Alias to look for
        alias: String,
    },

    /// Show a category preceded by its ancestors
    Ancestors {
        /// Category alias
        alias: String,
    },

    /// Show the categories of a product, one per level
    Path {
        /// Product alias
        product: String,
    },

    /// List product models matching a value filter
    Models {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List characteristic values with matching model counts
    Values {
        #[command(flatten)]
        filter: FilterArgs,
        /// Only characteristics with this menu flag
        #[arg(long)]
        in_menu: Option<bool>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Value filter selection
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Selected characteristic value id (repeatable)
    #[arg(long = "value", value_name = "ID")]
    pub values: Vec<u64>,
    /// Category id whose values are selected
    #[arg(long, value_name = "ID")]
    pub category: Option<u64>,
    /// Saved filter id whose values are selected
    #[arg(long, value_name = "ID")]
    pub filter: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a config template
    Template,
    /// Show config file locations
    Path,
}

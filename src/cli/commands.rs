//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{group_by_characteristic, CategoryForest};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, FilterArgs};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{CategoryId, CategoryRecord, FilterId, ValueFilter, ValueId};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;

impl From<&FilterArgs> for ValueFilter {
    fn from(args: &FilterArgs) -> Self {
        Self {
            value_ids: args.values.iter().copied().map(ValueId).collect(),
            category: args.category.map(CategoryId),
            filter: args.filter.map(FilterId),
        }
    }
}

/// Execute the parsed command line, returning the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let project_dir = resolve_project_dir(cli);
    let settings = load_settings(cli, &project_dir)?;

    match &cli.command {
        Some(Commands::Tree { root }) => cmd_tree(settings, root.as_deref()),
        Some(Commands::Roots) => cmd_roots(settings),
        Some(Commands::Contains { root, alias }) => cmd_contains(settings, root, alias),
        Some(Commands::Ancestors { alias }) => cmd_ancestors(settings, alias),
        Some(Commands::Path { product }) => cmd_path(settings, product),
        Some(Commands::Models { filter }) => cmd_models(settings, filter),
        Some(Commands::Values { filter, in_menu }) => cmd_values(settings, filter, *in_menu),
        Some(Commands::Config { command }) => cmd_config(&settings, &project_dir, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(exitcode::OK)
        }
        None => {
            let _ = Cli::command().print_help();
            Ok(exitcode::USAGE)
        }
    }
}

fn resolve_project_dir(cli: &Cli) -> PathBuf {
    cli.project_dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Layered settings with command line flags applied last.
fn load_settings(cli: &Cli, project_dir: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(project_dir))?;
    if let Some(catalog) = &cli.catalog {
        settings.catalog = Some(catalog.clone());
    }
    if cli.include_inactive {
        settings.include_inactive = true;
    }
    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

fn label(show_ids: bool) -> impl Fn(&CategoryRecord) -> String {
    move |record: &CategoryRecord| {
        if show_ids {
            format!("{} ({})", record.alias, record.id)
        } else {
            record.alias.clone()
        }
    }
}

fn find_root(forest: &CategoryForest, alias: &str) -> CliResult<generational_arena::Index> {
    forest
        .find_root(alias)
        .ok_or_else(|| ApplicationError::CategoryNotFound(alias.to_string()).into())
}

#[instrument(skip(settings))]
fn cmd_tree(settings: Settings, root: Option<&str>) -> CliResult<i32> {
    let show_ids = settings.tree.show_ids;
    let container = ServiceContainer::new(settings)?;
    let forest = container.category_service().top_level_with_children()?;

    let roots = match root {
        Some(alias) => vec![find_root(&forest, alias)?],
        None => forest.roots.clone(),
    };
    if roots.is_empty() {
        output::warning("no top level categories");
    }
    for idx in roots {
        output::info(&forest.arena.to_tree_string(idx, label(show_ids)));
    }
    Ok(exitcode::OK)
}

#[instrument(skip(settings))]
fn cmd_roots(settings: Settings) -> CliResult<i32> {
    let show_ids = settings.tree.show_ids;
    let container = ServiceContainer::new(settings)?;
    let forest = container.category_service().top_level_with_children()?;
    let label = label(show_ids);
    for record in forest.root_records() {
        output::info(&label(record));
    }
    Ok(exitcode::OK)
}

#[instrument(skip(settings))]
fn cmd_contains(settings: Settings, root: &str, alias: &str) -> CliResult<i32> {
    let container = ServiceContainer::new(settings)?;
    let service = container.category_service();
    let forest = service.top_level_with_children()?;
    let root_idx = forest
        .arena
        .find_by_alias(root)
        .ok_or_else(|| ApplicationError::CategoryNotFound(root.to_string()))?;

    if service.is_current_category_alias(&forest, root_idx, alias)? {
        output::success(&format!("{alias} is in {root}"));
        Ok(exitcode::OK)
    } else {
        output::failure(&format!("{alias} is not in {root}"));
        Ok(exitcode::NO)
    }
}

#[instrument(skip(settings))]
fn cmd_ancestors(settings: Settings, alias: &str) -> CliResult<i32> {
    let container = ServiceContainer::new(settings)?;
    let chain = container.category_service().categories_with_parents(alias)?;
    output::info(&chain.iter().map(|c| c.alias.as_str()).join(" > "));
    Ok(exitcode::OK)
}

#[instrument(skip(settings))]
fn cmd_path(settings: Settings, product: &str) -> CliResult<i32> {
    let container = ServiceContainer::new(settings)?;
    let categories = container.category_service().product_categories(product)?;
    if categories.is_empty() {
        output::warning(&format!("product {product} has no categories"));
    } else {
        output::info(&categories.iter().map(|c| c.alias.as_str()).join(" > "));
    }
    Ok(exitcode::OK)
}

#[instrument(skip(settings))]
fn cmd_models(settings: Settings, filter: &FilterArgs) -> CliResult<i32> {
    let container = ServiceContainer::new(settings)?;
    let models = container
        .characteristic_service()
        .filter_models(&ValueFilter::from(filter))?;
    for model in models {
        output::info(&model.alias);
    }
    Ok(exitcode::OK)
}

#[instrument(skip(settings))]
fn cmd_values(settings: Settings, filter: &FilterArgs, in_menu: Option<bool>) -> CliResult<i32> {
    let container = ServiceContainer::new(settings)?;
    let counts = container
        .characteristic_service()
        .values_with_model_counts(&ValueFilter::from(filter), in_menu)?;

    for (characteristic, group) in group_by_characteristic(&counts) {
        output::header(characteristic);
        for count in group {
            output::detail(&format!("{} ({})", count.value.alias, count.models_count));
        }
    }
    Ok(exitcode::OK)
}

fn cmd_config(settings: &Settings, project_dir: &Path, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::warning("global: cannot determine config directory"),
            }
            output::info(&format!(
                "local:  {}",
                local_config_path(project_dir).display()
            ));
        }
    }
    Ok(exitcode::OK)
}

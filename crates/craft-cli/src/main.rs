//! Craftplan CLI - ranked crafting plans.
//!
//! - `craftplan plan <ITEM> [COUNT]` - ranked plans for a request
//! - `craftplan tree <ITEM> [COUNT]` - the pruned recipe tree as JSON
//! - `craftplan items` - items in the recipe database

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::{fmt, EnvFilter};

use craft_core::{ActionPath, Ledger, WorldSnapshot};
use craft_data::{RecipeDb, RecipeSource};
use craft_planner::{PlanOptions, Planner, PlannerConfig};

#[derive(Parser)]
#[command(name = "craftplan")]
#[command(about = "Plan how to obtain items from recipes, inventory and surroundings", version)]
struct Cli {
    /// Recipe dataset directory (defaults to the built-in dataset)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Planner config file (defaults to .craftplan/config.yaml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print ranked plans
    Plan {
        #[command(flatten)]
        request: Request,

        /// Number of plans to print
        #[arg(long)]
        top: Option<usize>,

        /// Run the enumeration strategies on parallel workers
        #[arg(long)]
        parallel: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the pruned recipe tree as JSON
    Tree {
        #[command(flatten)]
        request: Request,
    },

    /// List items in the recipe database
    Items,
}

#[derive(Args)]
struct Request {
    /// Item to obtain
    item: String,

    /// How many
    #[arg(default_value_t = 1)]
    count: u32,

    /// YAML map of owned item -> count
    #[arg(long)]
    inventory: Option<PathBuf>,

    /// YAML map of nearby block/mob -> { count, closestDistance, averageDistance }
    #[arg(long)]
    world: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let db = load_db(cli.data.as_deref())?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Plan {
            request,
            top,
            parallel,
            json,
        } => {
            let mut config = config;
            if let Some(top) = top {
                config.top = top;
            }
            config.parallel |= parallel;
            run_plan(Planner::new(Arc::new(db), config), &request, json).await
        }
        Commands::Tree { request } => show_tree(Planner::new(Arc::new(db), config), &request),
        Commands::Items => list_items(&db),
    }
}

fn load_db(data: Option<&Path>) -> Result<RecipeDb> {
    match data {
        Some(dir) => RecipeDb::load(RecipeSource::Path(dir.to_path_buf()))
            .with_context(|| format!("Failed to load recipe data from {}", dir.display())),
        None => RecipeDb::embedded().context("Failed to load built-in recipe data"),
    }
}

fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    match path {
        Some(path) => PlannerConfig::load(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            PlannerConfig::load_from_dir(&cwd)
        }
    }
}

fn read_yaml<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} from {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {what} from {}", path.display()))
}

fn plan_options(request: &Request) -> Result<PlanOptions> {
    let inventory: Ledger = match &request.inventory {
        Some(path) => read_yaml(path, "inventory")?,
        None => Ledger::new(),
    };
    let mut options = PlanOptions::new(inventory);
    if let Some(path) = &request.world {
        options = options.with_world(read_yaml::<WorldSnapshot>(path, "world snapshot")?);
    }
    Ok(options)
}

async fn run_plan(planner: Planner, request: &Request, json: bool) -> Result<()> {
    let options = plan_options(request)?;
    tracing::info!(item = %request.item, count = request.count, "Planning");

    let plans = if planner.config().parallel {
        planner
            .plan_parallel(&request.item, request.count, &options)
            .await
    } else {
        planner.plan(&request.item, request.count, &options)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    if plans.is_empty() {
        let owned = options.inventory.count(&request.item);
        if owned >= request.count {
            println!("Already have {owned} {}.", request.item);
        } else {
            println!("No plan found for {} x{}.", request.item, request.count);
        }
        return Ok(());
    }

    for (rank, plan) in plans.iter().enumerate() {
        print_plan(rank + 1, plan);
    }
    Ok(())
}

fn print_plan(rank: usize, plan: &ActionPath) {
    println!(
        "Plan {rank}: {} steps, weight {}",
        plan.len(),
        plan.weight()
    );
    print!("{plan}");
    println!();
}

fn show_tree(planner: Planner, request: &Request) -> Result<()> {
    let options = plan_options(request)?;
    let tree = planner.build_tree(&request.item, request.count, &options);
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

fn list_items(db: &RecipeDb) -> Result<()> {
    println!("Items: {}", db.len());
    for item in db.items() {
        let mut notes = Vec::new();
        if let Some(family) = &item.family {
            notes.push(format!("family {family}"));
        }
        if let Some(tool) = &item.tool {
            notes.push(format!("{} tier {}", tool.kind, tool.tier));
        }
        if item.persistent {
            notes.push("persistent".to_string());
        }
        if notes.is_empty() {
            println!("  {}", item.name);
        } else {
            println!("  {} ({})", item.name, notes.join(", "));
        }
    }
    Ok(())
}

//! Comic Cart CLI - catalog and cart tools.
//!
//! # Usage
//!
//! ```bash
//! # List the built-in catalog (or a catalog file)
//! cart-cli catalog list
//! cart-cli catalog list --file catalog.yaml
//!
//! # Check a catalog file without starting the server
//! cart-cli catalog validate catalog.yaml
//!
//! # Replay cart actions and log the cart after each one
//! cart-cli cart simulate add:1 add:1 add:2 set:1=5 remove:2 checkout
//! ```
//!
//! # Commands
//!
//! - `catalog list` - Log every product with its price
//! - `catalog validate` - Parse and validate a catalog file
//! - `cart simulate` - Apply a sequence of actions to an empty cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comic_cart_core::CartAction;

mod commands;

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(author, version, about = "Comic Cart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect product catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Work with carts offline
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products in a catalog
    List {
        /// Catalog YAML file (defaults to `SHOP_CATALOG_PATH`, then the built-in catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Validate a catalog file
    Validate {
        /// Catalog YAML file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum CartCommand {
    /// Apply actions to an empty cart and log each resulting view
    Simulate {
        /// Catalog YAML file (defaults to `SHOP_CATALOG_PATH`, then the built-in catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Actions: `add:<id>`, `set:<id>=<qty>`, `remove:<id>`, `checkout`
        #[arg(required = true, value_parser = commands::cart::parse_action)]
        actions: Vec<CartAction>,
    },
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { file } => commands::catalog::list(file)?,
            CatalogAction::Validate { file } => commands::catalog::validate(&file)?,
        },
        Commands::Cart { action } => match action {
            CartCommand::Simulate { file, actions } => commands::cart::simulate(file, &actions)?,
        },
    }
    Ok(())
}

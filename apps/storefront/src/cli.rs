//! # Command Line
//!
//! `storefront` drives a session from the terminal. Each invocation starts
//! a session (so the cart is hydrated from the data directory), runs one
//! command, and prints the response as pretty JSON on stdout.
//!
//! ```text
//! storefront products --category chairs --price 200-500 --sort price-ascending
//! storefront add p1 --quantity 2
//! storefront checkout
//! storefront init-config --catalog-file products.json
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::commands::{cart, product};
use crate::state::{ConfigState, Session};
use crate::open_session;

#[derive(Parser, Debug)]
#[command(author, version, about = "Storefront catalog and cart", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file of product records to use instead of the CMS
    #[arg(long, global = true)]
    pub catalog_file: Option<PathBuf>,

    /// Directory holding the saved cart
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List products for the shop grid
    Products {
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "all")]
        price: String,
        #[arg(long, default_value = "default")]
        sort: String,
    },
    /// Show one product by slug
    Product { slug: String },
    /// Search products by name or category
    Search { query: String },
    /// List category options
    Categories,
    /// List featured products
    Featured,
    /// Show the cart
    Cart,
    /// Add a product to the cart
    Add {
        product_id: String,
        #[arg(long, short)]
        quantity: Option<i64>,
    },
    /// Set a product's quantity (0 removes it)
    Update { product_id: String, quantity: i64 },
    /// Remove a product from the cart
    Remove { product_id: String },
    /// Empty the cart
    Clear,
    /// Show the checkout summary
    Checkout,
    /// Write the effective configuration to the config file
    InitConfig,
}

impl Cli {
    /// Loads configuration and applies the command-line overrides.
    pub fn load_config(&self) -> anyhow::Result<ConfigState> {
        let mut config =
            ConfigState::load(self.config.clone()).context("failed to load configuration")?;

        if let Some(file) = &self.catalog_file {
            config.content.catalog_file = Some(file.clone());
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }

        Ok(config)
    }

    /// Config file this invocation reads and `init-config` writes.
    fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(ConfigState::default_config_path)
    }
}

/// Runs the parsed invocation, returning the JSON to print.
pub async fn run(cli: &Cli) -> anyhow::Result<String> {
    if cli.command == Command::InitConfig {
        let path = init_config(cli)?;
        return to_json(&serde_json::json!({ "configPath": path }));
    }

    let config = cli.load_config()?;
    let session = open_session(config).await?;
    execute(&session, &cli.command).await
}

/// Saves the effective configuration (file, environment and flags merged)
/// so later invocations can drop the flags. An existing file is kept.
pub fn init_config(cli: &Cli) -> anyhow::Result<PathBuf> {
    let path = cli
        .config_path()
        .context("no config directory on this platform, pass --config")?;
    if path.exists() {
        anyhow::bail!("config file already exists: {}", path.display());
    }

    let config = cli.load_config()?;
    config
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}

/// Runs one command against `session`, returning the JSON to print.
pub async fn execute(session: &Session, command: &Command) -> anyhow::Result<String> {
    match command {
        Command::Products {
            category,
            price,
            sort,
        } => to_json(&product::list_products(session, category, price, sort).await),
        Command::Product { slug } => to_json(&product::get_product(session, slug).await?),
        Command::Search { query } => to_json(&product::search_products(session, query).await),
        Command::Categories => to_json(&product::list_categories(session).await),
        Command::Featured => to_json(&product::featured_products(session).await),
        Command::Cart => to_json(&cart::get_cart(session).await),
        Command::Add {
            product_id,
            quantity,
        } => to_json(&cart::add_to_cart(session, product_id, *quantity).await?),
        Command::Update {
            product_id,
            quantity,
        } => to_json(&cart::update_cart_item(session, product_id, *quantity).await),
        Command::Remove { product_id } => {
            to_json(&cart::remove_from_cart(session, product_id).await)
        }
        Command::Clear => to_json(&cart::clear_cart(session).await),
        Command::Checkout => to_json(&cart::checkout_summary(session).await),
        Command::InitConfig => anyhow::bail!("init-config does not run inside a session"),
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize response")
}

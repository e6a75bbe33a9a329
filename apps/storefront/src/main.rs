//! # Storefront Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Parse arguments
//! 3. Load configuration (defaults -> storefront.toml -> STOREFRONT_* env -> flags)
//! 4. Open the local store and start the session (`init-config` instead
//!    saves the configuration and stops)
//! 5. Run the command and print its JSON

use anyhow::Result;
use clap::Parser;
use storefront_app::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    storefront_app::init_tracing();

    let args = Cli::parse();
    let output = cli::run(&args).await?;
    println!("{}", output);

    Ok(())
}

//! # Storefront App Library
//!
//! Session state and render-facing commands for the storefront, plus the
//! wiring the `storefront` binary uses to start a session.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (logging, session startup)
//! ├── cli.rs          ◄─── `storefront` command line
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Layered configuration
//! │   ├── catalog.rs  ◄─── Catalog Store
//! │   ├── cart.rs     ◄─── Cart Store (persisted)
//! │   └── session.rs  ◄─── Session context
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Shop grid, product page, search
//! │   └── cart.rs     ◄─── Cart manipulation, checkout summary
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use storefront_store::{LocalStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{ConfigState, Session};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays clean for command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_store=trace` - Trace one crate only
/// - Default: INFO, DEBUG for the storefront crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens storage and starts a session for `config`.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Pick Content Provider ────────────────────────────────────────────► │
/// │     • catalog_file set: FixtureProvider                                 │
/// │     • else project_id set: SanityClient                                 │
/// │                                                                         │
/// │  2. Open Local Store ─────────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/storefront/                                 │
/// │     • Override with STOREFRONT_DATA_DIR                                 │
/// │                                                                         │
/// │  3. Session::start ───────────────────────────────────────────────────► │
/// │     • hydrate cart from "cartItems"                                     │
/// │     • load catalog once                                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn open_session(config: ConfigState) -> Result<Session, ApiError> {
    let provider = config.build_provider()?;

    let data_dir: PathBuf = config.data_dir();
    info!(?data_dir, "Opening local store");
    let store = LocalStore::open(StoreConfig::new(data_dir)).await?;

    Ok(Session::start(config, provider, store).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_open_session_from_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("products.json");
        let mut file = std::fs::File::create(&catalog_path).unwrap();
        file.write_all(
            br#"[{"id": "p1", "name": "Bar chair", "slug": "bar-chair", "price": 450, "category": "Chairs"}]"#,
        )
        .unwrap();

        let mut config = ConfigState::default();
        config.content.catalog_file = Some(catalog_path);
        config.storage.data_dir = Some(dir.path().join("data"));

        let session = open_session(config).await.unwrap();
        assert!(session.catalog().is_ready().await);
        assert_eq!(session.catalog().snapshot().await.len(), 1);
        assert!(dir.path().join("data").is_dir());
    }

    #[tokio::test]
    async fn test_open_session_without_content_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigState::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());

        let err = open_session(config).await.unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ConfigError);
    }
}

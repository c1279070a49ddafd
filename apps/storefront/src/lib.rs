//! # ShopSphere Storefront Library
//!
//! The terminal storefront: session holders, the view coordinator, and the
//! shell that drives them.
//!
//! ## Module Organization
//! ```text
//! shopsphere_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── shell.rs        ◄─── Read-command-render loop
//! ├── render.rs       ◄─── Frame → text
//! ├── state/
//! │   ├── auth.rs     ◄─── AuthSession (watch)
//! │   ├── cart.rs     ◄─── CartSession (watch)
//! │   ├── catalog.rs  ◄─── ProductCatalog, CatalogEvent
//! │   ├── config.rs   ◄─── AppConfig (TOML + env)
//! │   ├── form.rs     ◄─── Admin ProductForm
//! │   └── view.rs     ◄─── ViewCoordinator
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing & dispatch
//! │   ├── session.rs  ◄─── Navigation, login, logout
//! │   ├── product.rs  ◄─── Browse, edit/delete requests
//! │   ├── cart.rs     ◄─── Cart drawer, checkout
//! │   └── admin.rs    ◄─── Product form
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use shopsphere_api::{MockApiService, StorefrontApi};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shell::Shell;
use state::AppConfig;

/// Runs the storefront on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info,shopsphere=debug; override with RUST_LOG            │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • shopsphere.toml, then SHOPSPHERE_* variables                      │
/// │                                                                         │
/// │  3. Build the Mock API ───────────────────────────────────────────────► │
/// │     • Demo catalog, demo users, configured latency                      │
/// │                                                                         │
/// │  4. Session Check ────────────────────────────────────────────────────► │
/// │     • "Loading..." until a stored token is verified or absent           │
/// │                                                                         │
/// │  5. Shell Loop ───────────────────────────────────────────────────────► │
/// │     • One command per line until quit or end of input                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting ShopSphere storefront");

    let config = AppConfig::load(None).context("failed to load configuration")?;
    info!(store = %config.store_name, latency_ms = config.api_latency_ms, "Configuration loaded");

    let api: Arc<dyn StorefrontApi> =
        Arc::new(MockApiService::new(config.api_config()).context("failed to start mock API")?);

    let mut shell = Shell::new(config, api);
    let mut stdout = std::io::stdout();

    print!("{}", shell.render().await);
    shell.start().await;

    shell.run(tokio::io::stdin(), &mut stdout).await?;

    info!("Storefront closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopsphere_api=trace` - Trace the mock API only
/// - Default: INFO, DEBUG for the shopsphere crates
///
/// Logs go to stderr so they stay out of the rendered frames.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopsphere=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! # Storefront Library
//!
//! Everything behind the `storefront` binary: configuration, the cart
//! store, and the command handlers.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore (cart + persistence + subscribers)
//! │   └── config.rs   ◄─── StorefrontConfig
//! ├── commands/
//! │   ├── mod.rs      ◄─── Output rendering
//! │   ├── product.rs  ◄─── Listing / detail
//! │   └── cart.rs     ◄─── Cart edits / order summary
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{CartAction, Cli, Command};
use error::AppResult;
use state::{CartStore, StorefrontConfig};
use storefront_catalog::{CachedCatalog, Catalog, HttpCatalog};
use storefront_core::{PersistedCart, QuantityStep, CART_STORAGE_KEY};
use storefront_db::{CartWriter, Database, DbConfig, DbError, WriterTask};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
///
/// ## Log Levels
/// - `RUST_LOG=warn` - Quiet
/// - `RUST_LOG=storefront_db=trace` - One crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one CLI command and returns what should be printed on stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Load Config ──────────────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → STOREFRONT_* env                     │
/// │                                                                         │
/// │  2. Build Catalog ────────────────────────────────────────────────────► │
/// │     • HttpCatalog behind a CachedCatalog                                │
/// │                                                                         │
/// │  3. Cart commands only: Open Local Storage ───────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations                          │
/// │     • Rehydrate cart (selection starts empty)                           │
/// │     • Spawn background CartWriter                                       │
/// │                                                                         │
/// │  4. Run Command, then drop the store and flush the writer              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<String> {
    let config = StorefrontConfig::load(cli.config.clone())?;
    let catalog = CachedCatalog::new(
        HttpCatalog::new(&config.catalog.base_url, config.catalog_timeout())?,
        config.cache_ttl(),
    );

    execute(cli, &config, &catalog).await
}

/// Dispatches a parsed command against an already-built catalog.
pub async fn execute(
    cli: Cli,
    config: &StorefrontConfig,
    catalog: &dyn Catalog,
) -> AppResult<String> {
    let json = cli.json;

    match cli.command {
        Command::Products => {
            let response = commands::product::list_products(catalog).await?;
            commands::render(&response, json)
        }
        Command::Product { id } => {
            let response = commands::product::product_detail(catalog, &id).await?;
            commands::render(&response, json)
        }
        Command::Cart(action) => {
            let mut session = CartSession::open(config).await?;
            let result = run_cart_action(&mut session.store, catalog, action, json).await;
            session.close().await;
            result
        }
        Command::Summary { select, all } => {
            let mut session = CartSession::open(config).await?;
            let result = commands::cart::summary(&mut session.store, &select, all)
                .and_then(|response| commands::render(&response, json));
            session.close().await;
            result
        }
    }
}

/// Storage-backed cart for the duration of one command.
struct CartSession {
    db: Database,
    store: CartStore,
    writer: WriterTask,
}

impl CartSession {
    /// Opens local storage, rehydrates the cart and starts the writer.
    async fn open(config: &StorefrontConfig) -> AppResult<Self> {
        let db = open_database(config).await?;
        let saved = load_saved_cart(&db).await?;
        let (sink, writer) = CartWriter::spawn(db.local_storage());
        let store = CartStore::rehydrate(saved, Arc::new(sink), config.summary_policy());

        Ok(CartSession { db, store, writer })
    }

    /// Drops the store, waits for the last snapshot to be written, closes
    /// the pool.
    async fn close(self) {
        let CartSession { db, store, writer } = self;
        drop(store);
        writer.finish().await;
        db.close().await;
    }
}

async fn run_cart_action(
    store: &mut CartStore,
    catalog: &dyn Catalog,
    action: CartAction,
    json: bool,
) -> AppResult<String> {
    use commands::cart;

    let response = match action {
        CartAction::Show => cart::show_cart(store),
        CartAction::Add { id, quantity } => cart::add_to_cart(store, catalog, &id, quantity).await?,
        CartAction::Remove { id } => cart::remove_from_cart(store, &id)?,
        CartAction::Set { id, quantity } => cart::set_quantity(store, &id, quantity)?,
        CartAction::Inc { id } => cart::step_quantity(store, &id, QuantityStep::Increment)?,
        CartAction::Dec { id } => cart::step_quantity(store, &id, QuantityStep::Decrement)?,
        CartAction::Clear => cart::clear_cart(store),
    };

    commands::render(&response, json)
}

async fn open_database(config: &StorefrontConfig) -> AppResult<Database> {
    let path = config.database_path()?;
    info!(?path, "Opening local storage");
    Ok(Database::new(DbConfig::new(path)).await?)
}

/// Reads the stored cart. A document that no longer decodes is deleted
/// and the session starts with an empty cart.
async fn load_saved_cart(db: &Database) -> AppResult<Option<PersistedCart>> {
    let storage = db.local_storage();
    match storage.load_cart().await {
        Ok(saved) => Ok(saved),
        Err(e @ DbError::Serialization { .. }) => {
            warn!(error = %e, "Stored cart is unreadable, starting empty");
            storage.remove(CART_STORAGE_KEY).await?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

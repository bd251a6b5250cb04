//! # brew-terminal: Counter Terminal Shell
//!
//! Wires the engine, the fixture providers and the ambient concerns
//! (configuration, logging, session) into commands a front end can call.
//!
//! ## Module Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brew POS Terminal                                │
//! │                                                                         │
//! │  main.rs ────► Logging, config, scripted counter session                │
//! │                                                                         │
//! │  lib.rs ─────► init_tracing, AppState                                   │
//! │                                                                         │
//! │  commands/ ──► get_menu, add_to_order, select_reward, confirm_payment   │
//! │                                                                         │
//! │  state/ ─────► ConfigState, CatalogState, LoyaltyState, OrderState,     │
//! │                SessionStore                                             │
//! │                                                                         │
//! │  error.rs ───► ApiError { code, message }                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (defaults, config.toml, `BREW_*` env)
//! 3. Create state objects from the fixture providers
//! 4. Serve commands

pub mod commands;
pub mod error;
pub mod state;

use brew_fixtures::{InMemoryCatalog, InMemoryLoyalty, StaffDirectory};
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{CatalogState, ConfigState, LoyaltyState, OrderState, SessionStore};

/// All terminal state, created once at startup.
///
/// Commands take the individual fields, not the whole bundle.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ConfigState,
    pub catalog: CatalogState,
    pub loyalty: LoyaltyState,
    pub order: OrderState,
    pub session: SessionStore,
}

impl AppState {
    /// State over the seeded fixtures.
    pub fn new(config: ConfigState) -> Self {
        let order = OrderState::new(config.new_checkout());
        info!(
            store = %config.store_name,
            tax_rate_bps = config.tax_rate_bps,
            "State initialized"
        );

        AppState {
            catalog: CatalogState::new(InMemoryCatalog::seeded()),
            loyalty: LoyaltyState::new(InMemoryLoyalty::seeded()),
            session: SessionStore::new(StaffDirectory::seeded()),
            order,
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new(ConfigState::default())
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=brew_core=trace` - Show trace for the engine only
/// - Default: INFO, DEBUG for the brew crates
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,brew=debug"));

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

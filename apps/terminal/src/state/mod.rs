//! # State Module
//!
//! Shared state for the terminal commands.
//!
//! Each concern gets its own state type, and each command takes only the
//! states it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐    │
//! │  │ ConfigState  │ │ CatalogState │ │ LoyaltyState │ │  OrderState  │    │
//! │  │ (read-only)  │ │ Arc<Mutex<   │ │ Arc<Mutex<   │ │ Arc<Mutex<   │    │
//! │  │ tax, symbol, │ │  InMemory    │ │  InMemory    │ │  Order>>     │    │
//! │  │ valuation    │ │  Catalog>>   │ │  Loyalty>>   │ │ cart+checkout│    │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘    │
//! │                                                                         │
//! │  ┌──────────────────────────────┐                                       │
//! │  │ SessionStore                 │                                       │
//! │  │ "currentUser" → JSON         │                                       │
//! │  └──────────────────────────────┘                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lock Order
//! When a command needs several states it locks catalog, then loyalty, then
//! order. Session and config never hold a lock across another.

mod catalog;
mod config;
mod order;
mod session;

pub use catalog::{CatalogState, LoyaltyState};
pub use config::{
    default_config_path, ConfigError, ConfigState, CONFIG_FILE_NAME, ENV_CONFIG_PATH,
    ENV_CURRENCY_SYMBOL, ENV_FREE_ITEM_VALUATION, ENV_MEMBER_SEARCH_LIMIT, ENV_STORE_NAME,
    ENV_TAX_RATE,
};
pub use order::{Order, OrderState};
pub use session::{SessionStore, CURRENT_USER_KEY};

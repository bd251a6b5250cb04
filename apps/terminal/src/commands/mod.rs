//! # Terminal Commands
//!
//! Every operation the front end can call.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Menu browsing, add-on and item toggles
//! ├── cart.rs      ◄─── Building the order
//! ├── checkout.rs  ◄─── Payment screen through confirmation
//! ├── loyalty.rs   ◄─── Member search, rewards, enrollment
//! ├── session.rs   ◄─── Staff login
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn get_add_ons(catalog: &CatalogState)
//!
//! // Needs catalog (add-on prices) and the order
//! fn add_to_order(catalog: &CatalogState, order: &OrderState, ...)
//!
//! // Needs the session for operator attribution
//! fn confirm_payment(config: &ConfigState, catalog: &CatalogState,
//!                    order: &OrderState, session: &SessionStore)
//! ```
//!
//! Results serialize as camelCase JSON; failures as [`ApiError`](crate::error::ApiError).

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod loyalty;
pub mod session;

//! # brew-fixtures: In-Memory Data for Brew POS
//!
//! The shop's resident data and the providers that serve it to the engine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  brew-terminal commands                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  brew-fixtures (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐  ┌────────────────┐  ┌────────────────┐   │   │
//! │  │   │ InMemoryCatalog│  │ InMemoryLoyalty│  │ StaffDirectory │   │   │
//! │  │   │  menu, add-ons │  │ members,rewards│  │ users, login   │   │   │
//! │  │   └───────┬────────┘  └───────┬────────┘  └────────────────┘   │   │
//! │  └───────────┼───────────────────┼─────────────────────────────────┘   │
//! │              │ CatalogProvider   │ LoyaltyProvider                      │
//! │              ▼                   ▼                                      │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         brew-core                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use brew_core::{Cart, CatalogProvider, Size};
//! use brew_fixtures::InMemoryCatalog;
//!
//! let catalog = InMemoryCatalog::seeded();
//! let cappuccino = catalog.find_item("1").unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_to_order(cappuccino, 2, Size::Small, vec!["Extra Espresso Shot".into()]).unwrap();
//! assert_eq!(cart.subtotal(catalog.add_ons()).value.centavos(), 25_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod loyalty;
pub mod staff;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::InMemoryCatalog;
pub use error::{FixtureError, FixtureResult};
pub use loyalty::InMemoryLoyalty;
pub use staff::StaffDirectory;

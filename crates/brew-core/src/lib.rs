//! # brew-core: Order and Payment Engine for Brew POS
//!
//! This crate holds the order-building and payment-computation logic of the
//! coffee-shop terminal as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brew POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front end (order screen)                      │   │
//! │  │    Menu grid ──► Add-on dialog ──► Order panel ──► Payment       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    brew-terminal (app shell)                     │   │
//! │  │    config, session store, Mutex<Cart>, ApiError                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brew-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  money   │  │ catalog  │  │   cart   │  │   checkout   │   │   │
//! │  │   │  Money   │  │ MenuItem │  │   Cart   │  │  Checkout    │   │   │
//! │  │   │ TaxRate  │  │  AddOn   │  │ CartLine │  │  rewards     │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CatalogProvider / LoyaltyProvider      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 brew-fixtures (in-memory data)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer centavo arithmetic
//! - [`types`] - Tax rate, drink size, payment method
//! - [`catalog`] - Menu items, add-ons, the catalog provider trait
//! - [`pricing`] - Unit prices and catalog-gap warnings
//! - [`cart`] - The in-progress order
//! - [`loyalty`] - Members, rewards, member lookup, enrollment
//! - [`rewards`] - Reward eligibility and valuation
//! - [`checkout`] - The payment state machine
//! - [`session`] - Logged-in staff member
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use brew_core::money::Money;
//! use brew_core::types::TaxRate;
//!
//! // ₱400.00 after discounts, 12% VAT
//! let taxable = Money::from_pesos(400);
//! let tax = taxable.calculate_tax(TaxRate::default());
//!
//! assert_eq!(tax, Money::from_pesos(48));
//! assert_eq!((taxable + tax).to_string(), "₱448.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod loyalty;
pub mod money;
pub mod pricing;
pub mod rewards;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, PricedLine};
pub use catalog::{AddOn, AddOnCategory, CatalogProvider, MenuItem, MenuStatus, MenuType};
pub use checkout::{Checkout, CheckoutSnapshot, CheckoutStage, CheckoutTotals, FinalizedPayment};
pub use error::{CoreError, CoreResult, ValidationError};
pub use loyalty::{LoyaltyMember, LoyaltyProvider, LoyaltySegment, Reward, RewardKind};
pub use money::Money;
pub use pricing::{PriceWarning, Priced};
pub use rewards::{CheapestLineValuation, RewardValuation, ValuationStrategy, ZeroValuation};
pub use session::{CurrentUser, OperatorRef, StaffRole};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// 12% VAT in basis points.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1200;

/// How many name matches the member lookup returns.
pub const DEFAULT_MEMBER_SEARCH_LIMIT: usize = 5;

/// Points credited to a newly enrolled loyalty member.
pub const WELCOME_POINTS: u32 = 100;

/// Prefix of generated order ids (`ORD-<unix millis>`).
pub const ORDER_ID_PREFIX: &str = "ORD";

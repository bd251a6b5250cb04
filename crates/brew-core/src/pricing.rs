//! # Line Pricing
//!
//! Resolves what one unit of a cart line costs.
//!
//! ```text
//! unit price = size price (missing → 0, warn)
//!            + Σ add-on price for each selected name
//!                  (unknown name → 0, warn)
//!                  (available = false → 0, warn)
//! ```
//!
//! Catalog gaps never fail a sale. They contribute zero and are reported
//! back as [`PriceWarning`]s so the operator screen and the logs can show
//! them.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;
use ts_rs::TS;

use crate::catalog::{AddOn, MenuItem};
use crate::money::Money;
use crate::types::Size;

/// A catalog data gap found while pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceWarning {
    /// The item carries no price for the chosen size.
    MissingSizePrice { menu_id: String, size: Size },
    /// No add-on with this name exists in the price list.
    UnknownAddOn { name: String },
    /// The add-on exists but is switched off.
    UnavailableAddOn { name: String },
}

impl fmt::Display for PriceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceWarning::MissingSizePrice { menu_id, size } => {
                write!(f, "menu item {} has no {} price", menu_id, size)
            }
            PriceWarning::UnknownAddOn { name } => write!(f, "add-on '{}' not found", name),
            PriceWarning::UnavailableAddOn { name } => {
                write!(f, "add-on '{}' is unavailable", name)
            }
        }
    }
}

/// A computed amount plus any catalog gaps hit along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priced<T> {
    pub value: T,
    pub warnings: Vec<PriceWarning>,
}

impl<T> Priced<T> {
    pub fn clean(value: T) -> Self {
        Priced {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Price of a single add-on by name, as the cart sees it.
fn add_on_price(name: &str, add_ons: &[AddOn], warnings: &mut Vec<PriceWarning>) -> Money {
    match add_ons.iter().find(|a| a.name == name) {
        Some(add_on) if add_on.available => add_on.price,
        Some(_) => {
            warn!(add_on = %name, "Unavailable add-on priced at zero");
            warnings.push(PriceWarning::UnavailableAddOn {
                name: name.to_string(),
            });
            Money::zero()
        }
        None => {
            warn!(add_on = %name, "Unknown add-on priced at zero");
            warnings.push(PriceWarning::UnknownAddOn {
                name: name.to_string(),
            });
            Money::zero()
        }
    }
}

/// Resolves the unit price of `item` in `size` with the named add-ons.
///
/// ## Example
/// ```rust,ignore
/// // Cappuccino small (₱100) + Extra Espresso Shot (₱25)
/// let unit = unit_price(&cappuccino, Size::Small, &["Extra Espresso Shot".into()], add_ons);
/// assert_eq!(unit.value, Money::from_pesos(125));
/// ```
pub fn unit_price(
    item: &MenuItem,
    size: Size,
    selected_add_ons: &[String],
    add_ons: &[AddOn],
) -> Priced<Money> {
    let mut warnings = Vec::new();

    let base = item.price_for(size).unwrap_or_else(|| {
        warn!(menu_id = %item.menu_id, size = %size, "Missing size price treated as zero");
        warnings.push(PriceWarning::MissingSizePrice {
            menu_id: item.menu_id.clone(),
            size,
        });
        Money::zero()
    });

    let extras: Money = selected_add_ons
        .iter()
        .map(|name| add_on_price(name, add_ons, &mut warnings))
        .sum();

    Priced {
        value: base + extras,
        warnings,
    }
}

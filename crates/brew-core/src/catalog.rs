//! # Catalog
//!
//! Menu items, add-ons, and the [`CatalogProvider`] seam the cart engine
//! reads them through.
//!
//! ```text
//! ┌─────────────────────────┐        ┌─────────────────────────┐
//! │        MenuItem         │        │          AddOn          │
//! │  ─────────────────────  │        │  ─────────────────────  │
//! │  menu_id (stable)       │        │  id                     │
//! │  name, type, status     │        │  name  ◄── cart lines   │
//! │  small/medium/large     │        │  price, category        │
//! │    price (Option)       │        │  available (gate)       │
//! └─────────────────────────┘        └─────────────────────────┘
//! ```
//!
//! The catalog is read-only to the engine. Whoever implements the provider
//! may flip `AddOn::available` between reads; prices are always resolved at
//! computation time, so the change affects the next subtotal only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Size;

// =============================================================================
// Menu Item
// =============================================================================

/// Menu category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum MenuType {
    Hot,
    Cold,
    MilkTea,
    Frappe,
    Soda,
}

impl MenuType {
    pub const ALL: [MenuType; 5] = [
        MenuType::Hot,
        MenuType::Cold,
        MenuType::MilkTea,
        MenuType::Frappe,
        MenuType::Soda,
    ];

    /// Catalog tag, e.g. `milk-tea`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuType::Hot => "hot",
            MenuType::Cold => "cold",
            MenuType::MilkTea => "milk-tea",
            MenuType::Frappe => "frappe",
            MenuType::Soda => "soda",
        }
    }

    /// Label shown on category buttons.
    pub fn label(&self) -> &'static str {
        match self {
            MenuType::Hot => "Hot",
            MenuType::Cold => "Iced",
            MenuType::MilkTea => "Milk Tea",
            MenuType::Frappe => "Frappe",
            MenuType::Soda => "Soda",
        }
    }
}

impl fmt::Display for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        MenuType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "menu type".to_string(),
                reason: format!("unknown category '{}'", needle),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MenuStatus {
    Available,
    Unavailable,
}

impl MenuStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuStatus::Available => "available",
            MenuStatus::Unavailable => "unavailable",
        }
    }
}

/// A sellable drink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Stable catalog identifier.
    pub menu_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub menu_type: MenuType,
    pub status: MenuStatus,
    pub small_price: Option<Money>,
    pub medium_price: Option<Money>,
    pub large_price: Option<Money>,
    pub description: Option<String>,
    /// Preparation time in minutes.
    pub prep_time: u32,
}

impl MenuItem {
    /// Price for a size, `None` when the size is not offered.
    pub fn price_for(&self, size: Size) -> Option<Money> {
        match size {
            Size::Small => self.small_price,
            Size::Medium => self.medium_price,
            Size::Large => self.large_price,
        }
    }

    /// Sizes this item can be ordered in, smallest first.
    pub fn offered_sizes(&self) -> Vec<Size> {
        Size::ALL
            .into_iter()
            .filter(|s| self.price_for(*s).is_some())
            .collect()
    }

    pub fn is_available(&self) -> bool {
        self.status == MenuStatus::Available
    }

    /// Available and priced in at least one size.
    pub fn is_orderable(&self) -> bool {
        self.is_available() && !self.offered_sizes().is_empty()
    }
}

// =============================================================================
// Add-On
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AddOnCategory {
    Syrup,
    Sauce,
    Topping,
    Extra,
    Milk,
}

/// An optional modifier attachable to any cart line.
///
/// Cart lines reference add-ons by `name`, which is the matching key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub category: AddOnCategory,
    pub description: Option<String>,
    /// Only available add-ons may be selected or priced.
    pub available: bool,
}

// =============================================================================
// Provider
// =============================================================================

/// Read access to the menu and add-on price list.
pub trait CatalogProvider {
    fn menu_items(&self) -> &[MenuItem];

    fn add_ons(&self) -> &[AddOn];

    fn find_item(&self, menu_id: &str) -> Option<&MenuItem> {
        self.menu_items().iter().find(|i| i.menu_id == menu_id)
    }

    /// Add-ons an operator may currently tick in the order dialog.
    fn available_add_ons(&self) -> Vec<&AddOn> {
        self.add_ons().iter().filter(|a| a.available).collect()
    }
}

// =============================================================================
// Browsing
// =============================================================================

/// Filters the menu the way the order screen does.
///
/// `category = None` means "All Items". The search term is matched
/// case-insensitively against name, category tag and status; a blank term
/// matches everything.
///
/// ## Example
/// ```rust,ignore
/// let iced = filter_menu(catalog.menu_items(), Some(MenuType::Cold), "");
/// let caramel = filter_menu(catalog.menu_items(), None, "caramel");
/// ```
pub fn filter_menu<'a>(
    items: &'a [MenuItem],
    category: Option<MenuType>,
    term: &str,
) -> Vec<&'a MenuItem> {
    let term = term.trim().to_lowercase();

    items
        .iter()
        .filter(|item| category.map_or(true, |c| item.menu_type == c))
        .filter(|item| {
            term.is_empty()
                || item.name.to_lowercase().contains(&term)
                || item.menu_type.as_str().contains(&term)
                || item.status.as_str().contains(&term)
        })
        .collect()
}

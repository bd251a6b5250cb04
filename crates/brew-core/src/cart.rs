//! # Cart Engine
//!
//! Holds the in-progress order and prices it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Engine Call             Cart Change           │
//! │  ───────────────          ───────────             ───────────           │
//! │                                                                         │
//! │  "Add to Order" ────────► add_to_order() ───────► merge or push line   │
//! │                                                                         │
//! │  Trash icon ────────────► remove_line() ────────► lines.retain(..)     │
//! │                                                                         │
//! │  "Reset" ───────────────► reset() ──────────────► lines.clear()        │
//! │                                                                         │
//! │  Order panel ───────────► subtotal() ───────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Merge Key
//! Two additions with the same `(menu_id, size, add-on set)` become one line
//! with the quantities summed. Add-on order does not matter for the key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::catalog::{AddOn, MenuItem};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{unit_price, Priced};
use crate::types::Size;
use crate::validation::validate_quantity;

// =============================================================================
// Cart Line
// =============================================================================

/// One row of the current order.
///
/// ## Design Notes
/// - `item` is a snapshot of the menu item taken when the line was created,
///   so the order panel keeps showing what was rung up.
/// - Add-on *prices* are not frozen: they are looked up on every
///   computation, so switching an add-on off affects the next total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Unique line identifier (UUID v4).
    pub line_id: String,
    pub item: MenuItem,
    pub selected_size: Size,
    /// Deduplicated, in the order the operator ticked them.
    pub selected_add_ons: Vec<String>,
    pub quantity: i64,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Whether this line merges with an addition of the given key.
    fn matches(&self, menu_id: &str, size: Size, add_on_key: &[String]) -> bool {
        self.item.menu_id == menu_id
            && self.selected_size == size
            && add_on_set(&self.selected_add_ons) == add_on_key
    }

    pub fn unit_price(&self, add_ons: &[AddOn]) -> Priced<Money> {
        unit_price(&self.item, self.selected_size, &self.selected_add_ons, add_ons)
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self, add_ons: &[AddOn]) -> Priced<Money> {
        let unit = self.unit_price(add_ons);
        Priced {
            value: unit.value.multiply_quantity(self.quantity),
            warnings: unit.warnings,
        }
    }
}

/// Rejection for a line quantity whose base price total would not fit.
fn quantity_out_of_range(base_price: Money) -> CoreError {
    ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: i64::MAX / base_price.centavos().max(1),
    }
    .into()
}

/// Sorted, deduplicated add-on names: the order-insensitive part of the key.
fn add_on_set(names: &[String]) -> Vec<String> {
    let mut set = names.to_vec();
    set.sort();
    set.dedup();
    set
}

/// Removes repeats while keeping first-seen order.
fn dedup_keep_order(names: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

/// A cart line with its prices resolved, for order review and receipts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    pub line_id: String,
    pub menu_id: String,
    pub name: String,
    pub size: Size,
    pub add_ons: Vec<String>,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress order.
///
/// ## Invariants
/// - No two lines share a merge key
/// - Every line has `quantity >= 1`
/// - Every line's item was available and priced in its size when added
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds `quantity` of `item` in `size` with the named add-ons.
    ///
    /// ## Behavior
    /// - Same merge key already in cart: quantity increases (no cap beyond
    ///   what a line total can hold)
    /// - Otherwise: a new line is appended with a fresh id
    ///
    /// ## Errors
    /// - [`CoreError::ItemUnavailable`] if the item is switched off
    /// - [`CoreError::Validation`] if `quantity < 1`
    /// - [`CoreError::SizeNotOffered`] if the item has no price for `size`
    /// - [`CoreError::Validation`] (`OutOfRange`) if the line quantity or
    ///   its base price total would not fit in an `i64`
    ///
    /// The cart is untouched on error.
    ///
    /// ## Returns
    /// The id of the line that was created or merged into.
    pub fn add_to_order(
        &mut self,
        item: &MenuItem,
        quantity: i64,
        size: Size,
        add_ons: Vec<String>,
    ) -> CoreResult<String> {
        if !item.is_available() {
            return Err(CoreError::ItemUnavailable {
                menu_id: item.menu_id.clone(),
                name: item.name.clone(),
            });
        }

        validate_quantity(quantity)?;

        let Some(base_price) = item.price_for(size) else {
            return Err(CoreError::SizeNotOffered {
                name: item.name.clone(),
                size,
            });
        };

        let add_ons = dedup_keep_order(add_ons);
        let key = add_on_set(&add_ons);
        let existing = self
            .lines
            .iter()
            .position(|l| l.matches(&item.menu_id, size, &key));

        let merged_quantity = match existing {
            Some(index) => self.lines[index].quantity.checked_add(quantity),
            None => Some(quantity),
        }
        .filter(|q| base_price.checked_multiply_quantity(*q).is_some())
        .ok_or_else(|| quantity_out_of_range(base_price))?;

        if let Some(index) = existing {
            let line = &mut self.lines[index];
            line.quantity = merged_quantity;
            debug!(line_id = %line.line_id, quantity = line.quantity, "Merged into existing line");
            return Ok(line.line_id.clone());
        }

        let line = CartLine {
            line_id: Uuid::new_v4().to_string(),
            item: item.clone(),
            selected_size: size,
            selected_add_ons: add_ons,
            quantity,
            added_at: Utc::now(),
        };
        debug!(line_id = %line.line_id, menu_id = %item.menu_id, size = %size, quantity, "Added line");
        let line_id = line.line_id.clone();
        self.lines.push(line);
        Ok(line_id)
    }

    /// Removes a line by id. Returns whether anything was removed.
    pub fn remove_line(&mut self, line_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.line_id != line_id);
        before != self.lines.len()
    }

    /// Clears all lines.
    pub fn reset(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.line_id == line_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of line totals. Zero for an empty cart.
    pub fn subtotal(&self, add_ons: &[AddOn]) -> Priced<Money> {
        let mut warnings = Vec::new();
        let value = self
            .lines
            .iter()
            .map(|line| {
                let total = line.line_total(add_ons);
                warnings.extend(total.warnings);
                total.value
            })
            .sum();
        Priced { value, warnings }
    }

    /// Unit prices of every line, in cart order.
    pub fn unit_prices(&self, add_ons: &[AddOn]) -> Vec<Money> {
        self.lines
            .iter()
            .map(|l| l.unit_price(add_ons).value)
            .collect()
    }

    /// Every line with prices resolved.
    pub fn priced_lines(&self, add_ons: &[AddOn]) -> Vec<PricedLine> {
        self.lines
            .iter()
            .map(|line| {
                let unit = line.unit_price(add_ons).value;
                PricedLine {
                    line_id: line.line_id.clone(),
                    menu_id: line.item.menu_id.clone(),
                    name: line.item.name.clone(),
                    size: line.selected_size,
                    add_ons: line.selected_add_ons.clone(),
                    quantity: line.quantity,
                    unit_price: unit,
                    line_total: unit.multiply_quantity(line.quantity),
                }
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AddOnCategory, MenuStatus, MenuType};
    use crate::error::ValidationError;
    use crate::pricing::PriceWarning;

    fn item(id: &str, small: Option<i64>, medium: Option<i64>) -> MenuItem {
        MenuItem {
            menu_id: id.to_string(),
            name: format!("Drink {}", id),
            menu_type: MenuType::Hot,
            status: MenuStatus::Available,
            small_price: small.map(Money::from_pesos),
            medium_price: medium.map(Money::from_pesos),
            large_price: None,
            description: None,
            prep_time: 3,
        }
    }

    fn add_ons() -> Vec<AddOn> {
        vec![
            AddOn {
                id: "espresso-shot".to_string(),
                name: "Extra Espresso Shot".to_string(),
                price: Money::from_pesos(25),
                category: AddOnCategory::Extra,
                description: None,
                available: true,
            },
            AddOn {
                id: "vanilla-syrup".to_string(),
                name: "Vanilla Syrup".to_string(),
                price: Money::from_pesos(15),
                category: AddOnCategory::Syrup,
                description: None,
                available: true,
            },
        ]
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_same_key_merges() {
        let mut cart = Cart::new();
        let drink = item("1", Some(100), Some(200));

        let first = cart
            .add_to_order(&drink, 2, Size::Small, names(&["Vanilla Syrup", "Extra Espresso Shot"]))
            .unwrap();
        let second = cart
            .add_to_order(&drink, 3, Size::Small, names(&["Extra Espresso Shot", "Vanilla Syrup"]))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_different_size_or_add_ons_make_new_lines() {
        let mut cart = Cart::new();
        let drink = item("1", Some(100), Some(200));

        cart.add_to_order(&drink, 1, Size::Small, vec![]).unwrap();
        cart.add_to_order(&drink, 1, Size::Medium, vec![]).unwrap();
        cart.add_to_order(&drink, 1, Size::Small, names(&["Vanilla Syrup"]))
            .unwrap();

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_duplicate_add_on_names_collapse() {
        let mut cart = Cart::new();
        let drink = item("1", Some(100), None);

        cart.add_to_order(&drink, 1, Size::Small, names(&["Vanilla Syrup", "Vanilla Syrup"]))
            .unwrap();
        cart.add_to_order(&drink, 1, Size::Small, names(&["Vanilla Syrup"]))
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].selected_add_ons, names(&["Vanilla Syrup"]));
        assert_eq!(cart.subtotal(&add_ons()).value, Money::from_pesos(230));
    }

    #[test]
    fn test_rejections_leave_cart_unchanged() {
        let mut cart = Cart::new();
        let drink = item("1", Some(100), None);
        cart.add_to_order(&drink, 1, Size::Small, vec![]).unwrap();
        let before = cart.lines().to_vec();

        let err = cart.add_to_order(&drink, 0, Size::Small, vec![]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));

        let err = cart.add_to_order(&drink, 1, Size::Medium, vec![]).unwrap_err();
        assert!(matches!(err, CoreError::SizeNotOffered { size: Size::Medium, .. }));

        let mut off = drink.clone();
        off.status = MenuStatus::Unavailable;
        let err = cart.add_to_order(&off, 1, Size::Small, vec![]).unwrap_err();
        assert!(matches!(err, CoreError::ItemUnavailable { .. }));

        assert_eq!(cart.lines(), before.as_slice());
    }

    #[test]
    fn test_large_quantity_is_priced_exactly() {
        let mut cart = Cart::new();
        let drink = item("1", Some(100), None);
        let most = i64::MAX / 10_000;

        cart.add_to_order(&drink, most, Size::Small, vec![]).unwrap();
        assert_eq!(cart.total_quantity(), most);
        assert_eq!(cart.subtotal(&[]).value.centavos(), most * 10_000);
    }

    #[test]
    fn test_quantity_that_cannot_be_priced_is_rejected() {
        let mut cart = Cart::new();
        let drink = item("1", Some(100), None);

        let err = cart
            .add_to_order(&drink, i64::MAX / 10, Size::Small, vec![])
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { min: 1, .. })
        ));
        assert!(cart.is_empty());

        let most = i64::MAX / 10_000;
        let id = cart.add_to_order(&drink, most, Size::Small, vec![]).unwrap();
        let err = cart.add_to_order(&drink, 1, Size::Small, vec![]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(cart.line(&id).unwrap().quantity, most);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_merge_past_i64_is_rejected() {
        let mut cart = Cart::new();
        let free_refill = item("9", Some(0), None);

        let id = cart
            .add_to_order(&free_refill, i64::MAX, Size::Small, vec![])
            .unwrap();
        let err = cart
            .add_to_order(&free_refill, 1, Size::Small, vec![])
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(cart.line(&id).unwrap().quantity, i64::MAX);
        assert_eq!(cart.subtotal(&[]).value, Money::zero());
    }

    #[test]
    fn test_add_ons_on_huge_line_saturate_subtotal() {
        let mut cart = Cart::new();
        let drink = item("1", Some(100), None);
        cart.add_to_order(
            &drink,
            i64::MAX / 10_000,
            Size::Small,
            vec!["Extra Espresso Shot".to_string()],
        )
        .unwrap();
        cart.add_to_order(&item("2", Some(90), None), 1, Size::Small, vec![])
            .unwrap();

        assert_eq!(cart.subtotal(&add_ons()).value.centavos(), i64::MAX);
        assert_eq!(cart.priced_lines(&add_ons())[0].line_total.centavos(), i64::MAX);
    }

    #[test]
    fn test_remove_line_and_reset() {
        let mut cart = Cart::new();
        let a = cart
            .add_to_order(&item("1", Some(100), None), 1, Size::Small, vec![])
            .unwrap();
        cart.add_to_order(&item("2", Some(90), None), 1, Size::Small, vec![])
            .unwrap();

        assert!(cart.remove_line(&a));
        assert!(!cart.remove_line(&a));
        assert!(!cart.remove_line("no-such-line"));
        assert_eq!(cart.len(), 1);

        cart.reset();
        assert!(cart.is_empty());
        cart.reset();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal(&add_ons()).value, Money::zero());

        cart.add_to_order(&item("1", Some(100), None), 2, Size::Small, names(&["Extra Espresso Shot"]))
            .unwrap();
        cart.add_to_order(&item("2", None, Some(200)), 1, Size::Medium, vec![])
            .unwrap();

        let expected: Money = cart
            .lines()
            .iter()
            .map(|l| l.unit_price(&add_ons()).value.multiply_quantity(l.quantity))
            .sum();
        let subtotal = cart.subtotal(&add_ons());
        assert_eq!(subtotal.value, expected);
        assert_eq!(subtotal.value, Money::from_pesos(450));
        assert!(subtotal.is_clean());
    }

    #[test]
    fn test_add_on_toggle_affects_next_subtotal() {
        let mut cart = Cart::new();
        cart.add_to_order(&item("1", Some(100), None), 1, Size::Small, names(&["Vanilla Syrup"]))
            .unwrap();

        let mut list = add_ons();
        assert_eq!(cart.subtotal(&list).value, Money::from_pesos(115));

        list[1].available = false;
        let subtotal = cart.subtotal(&list);
        assert_eq!(subtotal.value, Money::from_pesos(100));
        assert_eq!(
            subtotal.warnings,
            vec![PriceWarning::UnavailableAddOn {
                name: "Vanilla Syrup".to_string()
            }]
        );
    }

    #[test]
    fn test_priced_lines() {
        let mut cart = Cart::new();
        cart.add_to_order(&item("1", Some(100), None), 2, Size::Small, names(&["Extra Espresso Shot"]))
            .unwrap();

        let lines = cart.priced_lines(&add_ons());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].unit_price, Money::from_pesos(125));
        assert_eq!(lines[0].line_total, Money::from_pesos(250));
        assert_eq!(cart.unit_prices(&add_ons()), vec![Money::from_pesos(125)]);
    }
}

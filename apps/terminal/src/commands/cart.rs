//! # Cart Commands
//!
//! Building the order on the POS screen.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐        │
//! │  │  Empty   │────►│ Building │────►│ Payment  │────►│Confirmed │        │
//! │  │  Cart    │     │          │     │  screen  │     │ (empty)  │        │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘        │
//! │                        │   ▲             │                              │
//! │                add_to_order│        back_to_order                       │
//! │                remove_line └─────────────┘                              │
//! │                reset_order                                              │
//! │                                                                         │
//! │  Outside Building the cart is frozen: edits fail with INVALID_STAGE.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brew_core::{AddOn, Cart, CatalogProvider, Money, PriceWarning, PricedLine, Size};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, OrderState};

/// Cart response including priced lines and the subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<PricedLine>,
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub warnings: Vec<PriceWarning>,
}

impl CartResponse {
    pub fn price(cart: &Cart, add_ons: &[AddOn]) -> Self {
        let subtotal = cart.subtotal(add_ons);
        CartResponse {
            lines: cart.priced_lines(add_ons),
            line_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal: subtotal.value,
            warnings: subtotal.warnings,
        }
    }
}

/// Gets the current cart, priced against today's add-on list.
pub fn get_cart(catalog: &CatalogState, order: &OrderState) -> CartResponse {
    debug!("get_cart command");
    catalog.with_catalog(|c| order.with_order(|o| CartResponse::price(&o.cart, c.add_ons())))
}

/// Adds a drink to the order.
///
/// ## Behavior
/// - Same drink, size and add-on set already in the cart: quantity increases
/// - Otherwise: a new line
///
/// ## Arguments
/// * `menu_id` - Menu item to add
/// * `quantity` - Quantity to add (default: 1)
/// * `size` - `"small"`, `"medium"` or `"large"`
/// * `add_ons` - Add-on names
pub fn add_to_order(
    catalog: &CatalogState,
    order: &OrderState,
    menu_id: &str,
    quantity: Option<i64>,
    size: &str,
    add_ons: Vec<String>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(menu_id, quantity, size, "add_to_order command");

    let size: Size = size.parse()?;

    catalog.with_catalog(|c| -> Result<CartResponse, ApiError> {
        let item = c
            .find_item(menu_id)
            .ok_or_else(|| ApiError::not_found("Menu item", menu_id))?;

        order.with_order_mut(|o| -> Result<CartResponse, ApiError> {
            o.ensure_building("add to the order")?;
            o.cart.add_to_order(item, quantity, size, add_ons)?;
            Ok(CartResponse::price(&o.cart, c.add_ons()))
        })
    })
}

/// Removes one line from the order. An unknown id leaves the cart as is.
pub fn remove_line(
    catalog: &CatalogState,
    order: &OrderState,
    line_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(line_id, "remove_line command");

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CartResponse, ApiError> {
            o.ensure_building("remove a line")?;
            if !o.cart.remove_line(line_id) {
                debug!(line_id, "No such cart line; nothing removed");
            }
            Ok(CartResponse::price(&o.cart, c.add_ons()))
        })
    })
}

/// Empties the cart ("Reset Order").
pub fn reset_order(catalog: &CatalogState, order: &OrderState) -> Result<CartResponse, ApiError> {
    debug!("reset_order command");

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CartResponse, ApiError> {
            o.ensure_building("reset the order")?;
            o.cart.reset();
            Ok(CartResponse::price(&o.cart, c.add_ons()))
        })
    })
}

//! # Checkout Commands
//!
//! The payment screen, from "Proceed to Payment" to the finalized record.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment Flow                                         │
//! │                                                                         │
//! │  proceed_to_payment                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  attach_member ──► select_reward / remove_reward   (optional)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  set_payment_method("cash") ──► enter_amount("600")                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  confirm_payment ──► FinalizedPayment                                   │
//! │                       cart emptied, next order starts fresh             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the updated [`CheckoutSnapshot`] so the screen can
//! redraw totals and change without a second call.

use brew_core::{
    AddOn, CatalogProvider, CheckoutSnapshot, FinalizedPayment, LoyaltyProvider, Money,
    PaymentMethod,
};
use chrono::Utc;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, LoyaltyState, Order, OrderState, SessionStore};

fn snapshot(order: &Order, add_ons: &[AddOn]) -> CheckoutSnapshot {
    order.checkout.snapshot(&order.cart, add_ons)
}

/// Current payment screen state.
pub fn get_checkout(catalog: &CatalogState, order: &OrderState) -> CheckoutSnapshot {
    debug!("get_checkout command");
    catalog.with_catalog(|c| order.with_order(|o| snapshot(o, c.add_ons())))
}

/// Leaves the POS screen for the payment screen.
///
/// ## Errors
/// `CART_ERROR` when the cart is empty
pub fn proceed_to_payment(
    catalog: &CatalogState,
    order: &OrderState,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!("proceed_to_payment command");

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CheckoutSnapshot, ApiError> {
            o.checkout.begin(&o.cart)?;
            Ok(snapshot(o, c.add_ons()))
        })
    })
}

/// "Back to POS": discards member, rewards, method and amount. The cart
/// is kept.
pub fn back_to_order(
    catalog: &CatalogState,
    order: &OrderState,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!("back_to_order command");

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CheckoutSnapshot, ApiError> {
            o.checkout.back_to_order()?;
            Ok(snapshot(o, c.add_ons()))
        })
    })
}

/// Attaches a loyalty member found through `search_members`.
pub fn attach_member(
    catalog: &CatalogState,
    loyalty: &LoyaltyState,
    order: &OrderState,
    member_id: &str,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!(member_id, "attach_member command");

    let member = loyalty
        .with_loyalty(|l| l.find_member(member_id).cloned())
        .ok_or_else(|| ApiError::not_found("Loyalty member", member_id))?;

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CheckoutSnapshot, ApiError> {
            o.checkout.attach_member(member)?;
            Ok(snapshot(o, c.add_ons()))
        })
    })
}

pub fn detach_member(
    catalog: &CatalogState,
    order: &OrderState,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!("detach_member command");

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CheckoutSnapshot, ApiError> {
            o.checkout.detach_member()?;
            Ok(snapshot(o, c.add_ons()))
        })
    })
}

/// Adds a reward for the attached member.
///
/// ## Errors
/// `LOYALTY_ERROR` for no member, too few points (counting rewards already
/// picked), an unmet minimum purchase or a duplicate pick
pub fn select_reward(
    catalog: &CatalogState,
    loyalty: &LoyaltyState,
    order: &OrderState,
    reward_id: &str,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!(reward_id, "select_reward command");

    let reward = loyalty
        .with_loyalty(|l| l.find_reward(reward_id).cloned())
        .ok_or_else(|| ApiError::not_found("Reward", reward_id))?;

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CheckoutSnapshot, ApiError> {
            let subtotal = o.cart.subtotal(c.add_ons()).value;
            o.checkout.select_reward(&reward, subtotal)?;
            Ok(snapshot(o, c.add_ons()))
        })
    })
}

/// Drops a selected reward. An id that is not selected changes nothing.
pub fn remove_reward(
    catalog: &CatalogState,
    order: &OrderState,
    reward_id: &str,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!(reward_id, "remove_reward command");

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CheckoutSnapshot, ApiError> {
            if !o.checkout.remove_reward(reward_id)? {
                debug!(reward_id, "Reward was not selected; nothing removed");
            }
            Ok(snapshot(o, c.add_ons()))
        })
    })
}

/// Customer name and order notes from the payment form.
pub fn set_customer_details(
    catalog: &CatalogState,
    order: &OrderState,
    name: &str,
    notes: &str,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!(name, "set_customer_details command");

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CheckoutSnapshot, ApiError> {
            o.checkout.set_customer_name(name)?;
            o.checkout.set_customer_notes(notes)?;
            Ok(snapshot(o, c.add_ons()))
        })
    })
}

/// Chooses `"cash"` or `"gcash"`. GCash pre-fills the amount with the total
/// but is refused at confirmation while it stays disabled.
pub fn set_payment_method(
    catalog: &CatalogState,
    order: &OrderState,
    method: &str,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!(method, "set_payment_method command");
    let method: PaymentMethod = method.parse()?;

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CheckoutSnapshot, ApiError> {
            let total = o.checkout.totals_for(&o.cart, c.add_ons()).value.total;
            o.checkout.set_payment_method(method, total)?;
            Ok(snapshot(o, c.add_ons()))
        })
    })
}

/// Cash tendered, as typed into the amount field (`"600"`, `"₱1,000.50"`).
pub fn enter_amount(
    catalog: &CatalogState,
    order: &OrderState,
    amount: &str,
) -> Result<CheckoutSnapshot, ApiError> {
    debug!(amount, "enter_amount command");
    let amount = Money::parse(amount)?;

    catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<CheckoutSnapshot, ApiError> {
            o.checkout.enter_amount(amount)?;
            Ok(snapshot(o, c.add_ons()))
        })
    })
}

/// Finalizes the payment.
///
/// ## Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Operator comes from the session store ("Guest" if logged out)       │
/// │  2. Checkout::confirm validates method and amount, emits the record     │
/// │  3. On success the order is replaced by a fresh one                     │
/// │  4. On failure nothing changes; the operator fixes input and retries    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn confirm_payment(
    config: &ConfigState,
    catalog: &CatalogState,
    order: &OrderState,
    session: &SessionStore,
) -> Result<FinalizedPayment, ApiError> {
    debug!("confirm_payment command");
    let operator = session.operator();

    let payment = catalog.with_catalog(|c| {
        order.with_order_mut(|o| -> Result<FinalizedPayment, ApiError> {
            let payment = o
                .checkout
                .confirm(&mut o.cart, c.add_ons(), operator, Utc::now())?;
            *o = Order::new(config.new_checkout());
            Ok(payment)
        })
    })?;

    info!(
        order_id = %payment.order_id,
        customer = %payment.customer_name,
        member_id = payment.member.as_ref().map(|m| m.id.as_str()),
        rewards = payment.selected_rewards.len(),
        subtotal = %config.format_currency(payment.subtotal),
        discount = %config.format_currency(payment.rewards_discount),
        tax = %config.format_currency(payment.tax),
        total = %config.format_currency(payment.total),
        paid = %config.format_currency(payment.amount_paid),
        change = %config.format_currency(payment.change),
        operator = %payment.operator.display_name,
        "Order finalized"
    );

    Ok(payment)
}

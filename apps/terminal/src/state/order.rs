//! # Order State
//!
//! The order being rung up: its cart and its checkout, behind one mutex so a
//! confirmation sees both at once.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  OrderState                                  │
//! │  Arc<Mutex<Order>>                           │
//! │     ├── cart: Cart                           │
//! │     └── checkout: Checkout                   │
//! │                                              │
//! │  Building ─► cart commands allowed           │
//! │  any other stage ─► cart is frozen           │
//! │  confirmed ─► fresh Checkout, empty Cart     │
//! └──────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use brew_core::{Cart, Checkout, CheckoutStage, CoreError, CoreResult};

/// One customer's order.
#[derive(Debug, Default)]
pub struct Order {
    pub cart: Cart,
    pub checkout: Checkout,
}

impl Order {
    pub fn new(checkout: Checkout) -> Self {
        Order {
            cart: Cart::new(),
            checkout,
        }
    }

    /// Cart edits are only allowed while the order is being built.
    pub fn ensure_building(&self, action: &'static str) -> CoreResult<()> {
        match self.checkout.stage() {
            CheckoutStage::Building => Ok(()),
            stage => Err(CoreError::InvalidStage { action, stage }),
        }
    }
}

/// Shared order state.
///
/// ## Thread Safety
/// `Arc<Mutex<Order>>`: every order operation mutates, so a `RwLock` would
/// buy nothing. A poisoned lock is recovered, since `Order` has no invariant
/// that a panicking reader could break halfway.
#[derive(Debug, Clone)]
pub struct OrderState {
    order: Arc<Mutex<Order>>,
}

impl OrderState {
    pub fn new(checkout: Checkout) -> Self {
        OrderState {
            order: Arc::new(Mutex::new(Order::new(checkout))),
        }
    }

    /// Executes a function with read access to the order.
    pub fn with_order<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Order) -> R,
    {
        let order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        f(&order)
    }

    /// Executes a function with write access to the order.
    pub fn with_order_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Order) -> R,
    {
        let mut order = self.order.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut order)
    }
}

impl Default for OrderState {
    fn default() -> Self {
        OrderState::new(Checkout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::{MenuItem, MenuStatus, MenuType, Money, Size};

    fn americano() -> MenuItem {
        MenuItem {
            menu_id: "3".to_string(),
            name: "Americano".to_string(),
            menu_type: MenuType::Hot,
            status: MenuStatus::Available,
            small_price: Some(Money::from_pesos(100)),
            medium_price: None,
            large_price: None,
            description: None,
            prep_time: 2,
        }
    }

    #[test]
    fn test_cart_frozen_outside_building() {
        let state = OrderState::default();

        state.with_order_mut(|o| {
            assert!(o.ensure_building("add to the order").is_ok());
            o.cart.add_to_order(&americano(), 1, Size::Small, vec![]).unwrap();
            o.checkout.begin(&o.cart).unwrap();
        });

        let err = state.with_order(|o| o.ensure_building("add to the order").unwrap_err());
        assert!(matches!(err, CoreError::InvalidStage { .. }));
    }
}

//! # Checkout Engine
//!
//! Turns a cart into a [`FinalizedPayment`]: loyalty member, rewards, tax,
//! payment method, cash tendered, change.
//!
//! ## State Machine
//! ```text
//! ┌──────────┐ begin()  ┌─────────────────┐ set_payment_method(Cash) ┌─────────────┐
//! │ Building │ ───────► │ MethodSelection │ ───────────────────────► │ AmountEntry │
//! └──────────┘          └─────────────────┘                          └─────────────┘
//!      ▲                   │          ▲                                     │
//!      │ back_to_order()   │ attach_  │ detach_                             │ confirm()
//!      │                   ▼ member() │ member()                            ▼
//!      │             ┌──────────────────┐                             ┌───────────┐
//!      └──────────── │ RewardsSelection │                             │ Confirmed │
//!                    └──────────────────┘                             └───────────┘
//! ```
//!
//! All panels of the payment screen are live at once, so every stage past
//! `Building` accepts every checkout operation; the stage records how far the
//! operator has got. `Confirmed` is terminal: everything is rejected with
//! [`CoreError::CheckoutClosed`].
//!
//! ## Totals
//! ```text
//! rewards_discount = min(Σ reward_value(r), subtotal)
//! tax              = (subtotal - rewards_discount) × tax_rate
//! total            = subtotal - rewards_discount + tax
//! change           = max(0, amount_paid - total)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::cart::{Cart, PricedLine};
use crate::catalog::AddOn;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::loyalty::{LoyaltyMember, Reward};
use crate::money::Money;
use crate::pricing::{PriceWarning, Priced};
use crate::rewards::{reward_value, select_reward, RewardValuation, ZeroValuation};
use crate::session::OperatorRef;
use crate::types::{PaymentMethod, TaxRate};
use crate::ORDER_ID_PREFIX;

// =============================================================================
// Stage
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    /// Cart may still change.
    Building,
    /// A loyalty member is attached; rewards can be toggled.
    RewardsSelection,
    /// Waiting for a payment method.
    MethodSelection,
    /// Cash chosen; waiting for the amount tendered.
    AmountEntry,
    /// Payment record emitted.
    Confirmed,
}

impl CheckoutStage {
    /// Past `Building` and not yet `Confirmed`.
    pub fn is_open(&self) -> bool {
        !matches!(self, CheckoutStage::Building | CheckoutStage::Confirmed)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Order-level amounts.
///
/// ## Invariants
/// - `0 <= rewards_discount <= subtotal`
/// - `tax >= 0`, `total >= 0`
/// - `total == subtotal - rewards_discount + tax`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    pub subtotal: Money,
    pub rewards_discount: Money,
    pub tax: Money,
    pub total: Money,
}

/// Computes discount, tax and total for a subtotal and a reward selection.
///
/// Each reward is valued on its own (percentage rewards capped at their
/// maximum), then the sum is capped at the subtotal.
pub fn compute_totals(
    subtotal: Money,
    rewards: &[Reward],
    tax_rate: TaxRate,
    valuation: &dyn RewardValuation,
    unit_prices: &[Money],
) -> CheckoutTotals {
    let subtotal = subtotal.clamp_non_negative();

    let uncapped: Money = rewards
        .iter()
        .map(|r| reward_value(r, subtotal, valuation, unit_prices))
        .sum();
    let rewards_discount = uncapped.min(subtotal);
    if rewards_discount < uncapped {
        debug!(%uncapped, %subtotal, "Rewards discount capped at subtotal");
    }

    let taxable = subtotal - rewards_discount;
    let tax = taxable.calculate_tax(tax_rate).clamp_non_negative();

    CheckoutTotals {
        subtotal,
        rewards_discount,
        tax,
        total: taxable + tax,
    }
}

/// `max(0, paid - total)`.
pub fn compute_change(paid: Money, total: Money) -> Money {
    paid.saturating_sub(total)
}

// =============================================================================
// Finalized Payment
// =============================================================================

/// The record emitted by a successful confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedPayment {
    /// `ORD-<unix millis>`.
    pub order_id: String,
    pub customer_name: String,
    pub customer_notes: String,
    pub member: Option<LoyaltyMember>,
    pub selected_rewards: Vec<Reward>,
    pub lines: Vec<PricedLine>,
    pub subtotal: Money,
    pub rewards_discount: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    pub amount_paid: Money,
    pub change: Money,
    pub operator: OperatorRef,
    /// Catalog gaps seen while pricing this order.
    pub warnings: Vec<PriceWarning>,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

/// What the payment screen renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSnapshot {
    pub stage: CheckoutStage,
    pub member: Option<LoyaltyMember>,
    pub selected_rewards: Vec<Reward>,
    pub customer_name: String,
    pub customer_notes: String,
    pub payment_method: Option<PaymentMethod>,
    pub amount_paid: Option<Money>,
    pub totals: CheckoutTotals,
    pub change: Money,
    pub warnings: Vec<PriceWarning>,
}

// =============================================================================
// Checkout
// =============================================================================

/// One payment in progress.
pub struct Checkout {
    stage: CheckoutStage,
    member: Option<LoyaltyMember>,
    selected_rewards: Vec<Reward>,
    customer_name: String,
    customer_notes: String,
    payment_method: Option<PaymentMethod>,
    amount_paid: Option<Money>,
    tax_rate: TaxRate,
    valuation: Box<dyn RewardValuation + Send + Sync>,
}

impl fmt::Debug for Checkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkout")
            .field("stage", &self.stage)
            .field("member", &self.member.as_ref().map(|m| &m.id))
            .field("selected_rewards", &self.selected_rewards.len())
            .field("payment_method", &self.payment_method)
            .field("amount_paid", &self.amount_paid)
            .field("tax_rate", &self.tax_rate)
            .finish()
    }
}

impl Default for Checkout {
    fn default() -> Self {
        Checkout::new(TaxRate::default())
    }
}

impl Checkout {
    /// A fresh checkout in `Building`, valuing free items at zero.
    pub fn new(tax_rate: TaxRate) -> Self {
        Checkout {
            stage: CheckoutStage::Building,
            member: None,
            selected_rewards: Vec::new(),
            customer_name: String::new(),
            customer_notes: String::new(),
            payment_method: None,
            amount_paid: None,
            tax_rate,
            valuation: Box::new(ZeroValuation),
        }
    }

    /// Replaces the free-item valuation strategy.
    pub fn with_valuation(mut self, valuation: impl RewardValuation + Send + Sync + 'static) -> Self {
        self.valuation = Box::new(valuation);
        self
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    pub fn member(&self) -> Option<&LoyaltyMember> {
        self.member.as_ref()
    }

    pub fn selected_rewards(&self) -> &[Reward] {
        &self.selected_rewards
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn amount_paid(&self) -> Option<Money> {
        self.amount_paid
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    fn ensure_open(&self, action: &'static str) -> CoreResult<()> {
        match self.stage {
            CheckoutStage::Confirmed => Err(CoreError::CheckoutClosed),
            CheckoutStage::Building => Err(CoreError::InvalidStage {
                action,
                stage: self.stage,
            }),
            _ => Ok(()),
        }
    }

    /// Recomputes the stage from what has been filled in.
    fn settle_stage(&mut self) {
        self.stage = match (self.payment_method, &self.member) {
            (Some(PaymentMethod::Cash), _) => CheckoutStage::AmountEntry,
            (Some(_), _) => CheckoutStage::MethodSelection,
            (None, Some(_)) => CheckoutStage::RewardsSelection,
            (None, None) => CheckoutStage::MethodSelection,
        };
    }

    /// Leaves `Building` ("Proceed to Payment").
    ///
    /// ## Errors
    /// - [`CoreError::EmptyOrder`] for an empty cart
    /// - [`CoreError::InvalidStage`] if already past `Building`
    pub fn begin(&mut self, cart: &Cart) -> CoreResult<()> {
        match self.stage {
            CheckoutStage::Building => {}
            CheckoutStage::Confirmed => return Err(CoreError::CheckoutClosed),
            stage => {
                return Err(CoreError::InvalidStage {
                    action: "begin checkout",
                    stage,
                })
            }
        }

        if cart.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        self.settle_stage();
        debug!(lines = cart.len(), stage = ?self.stage, "Checkout started");
        Ok(())
    }

    /// Returns to `Building` ("Back to POS"), dropping everything entered.
    pub fn back_to_order(&mut self) -> CoreResult<()> {
        if self.stage == CheckoutStage::Confirmed {
            return Err(CoreError::CheckoutClosed);
        }

        self.member = None;
        self.selected_rewards.clear();
        self.customer_name.clear();
        self.customer_notes.clear();
        self.payment_method = None;
        self.amount_paid = None;
        self.stage = CheckoutStage::Building;
        Ok(())
    }

    /// Attaches a loyalty member and fills the customer name from it.
    ///
    /// Switching to a different member drops rewards picked for the old one.
    pub fn attach_member(&mut self, member: LoyaltyMember) -> CoreResult<()> {
        self.ensure_open("attach a loyalty member")?;

        if !member.is_active {
            return Err(CoreError::MemberInactive {
                member_id: member.id.clone(),
            });
        }

        if self.member.as_ref().map(|m| &m.id) != Some(&member.id) {
            self.selected_rewards.clear();
        }
        debug!(member_id = %member.id, points = member.points, "Loyalty member attached");
        self.customer_name = member.name.clone();
        self.member = Some(member);
        self.settle_stage();
        Ok(())
    }

    /// Removes the member and every selected reward.
    pub fn detach_member(&mut self) -> CoreResult<()> {
        self.ensure_open("detach the loyalty member")?;

        self.member = None;
        self.selected_rewards.clear();
        self.settle_stage();
        Ok(())
    }

    /// Adds `reward` to the selection if the attached member can take it.
    ///
    /// ## Errors
    /// - [`CoreError::MemberRequired`] with no member attached
    /// - Anything [`select_reward`] refuses
    pub fn select_reward(&mut self, reward: &Reward, subtotal: Money) -> CoreResult<()> {
        self.ensure_open("select a reward")?;

        let member = self.member.as_ref().ok_or(CoreError::MemberRequired)?;
        select_reward(member, reward, &self.selected_rewards, subtotal)?;

        debug!(reward_id = %reward.id, "Reward selected");
        self.selected_rewards.push(reward.clone());
        Ok(())
    }

    /// Drops a reward by id. Returns whether it was selected.
    pub fn remove_reward(&mut self, reward_id: &str) -> CoreResult<bool> {
        self.ensure_open("remove a reward")?;

        let before = self.selected_rewards.len();
        self.selected_rewards.retain(|r| r.id != reward_id);
        Ok(before != self.selected_rewards.len())
    }

    pub fn set_customer_name(&mut self, name: &str) -> CoreResult<()> {
        self.ensure_open("edit the customer name")?;
        self.customer_name = name.trim().to_string();
        Ok(())
    }

    pub fn set_customer_notes(&mut self, notes: &str) -> CoreResult<()> {
        self.ensure_open("edit the order notes")?;
        self.customer_notes = notes.trim().to_string();
        Ok(())
    }

    /// Chooses how the customer pays.
    ///
    /// Non-cash methods pre-fill the amount with `total`, since no change is
    /// given. Cash clears it for manual entry. Disabled methods may be
    /// selected here but are refused at [`confirm`](Self::confirm).
    pub fn set_payment_method(&mut self, method: PaymentMethod, total: Money) -> CoreResult<()> {
        self.ensure_open("choose a payment method")?;

        self.amount_paid = if method.requires_amount_entry() {
            None
        } else {
            Some(total)
        };
        self.payment_method = Some(method);
        self.settle_stage();
        debug!(method = %method, "Payment method selected");
        Ok(())
    }

    /// Records the cash tendered.
    pub fn enter_amount(&mut self, amount: Money) -> CoreResult<()> {
        self.ensure_open("enter an amount")?;

        match self.payment_method {
            None => return Err(CoreError::PaymentMethodRequired),
            Some(PaymentMethod::Cash) => {}
            Some(_) => {
                return Err(CoreError::InvalidStage {
                    action: "enter an amount",
                    stage: self.stage,
                })
            }
        }

        if amount.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "amount paid".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }

        self.amount_paid = Some(amount);
        Ok(())
    }

    /// Totals for `subtotal` with the current reward selection.
    pub fn totals(&self, subtotal: Money, unit_prices: &[Money]) -> CheckoutTotals {
        compute_totals(
            subtotal,
            &self.selected_rewards,
            self.tax_rate,
            self.valuation.as_ref(),
            unit_prices,
        )
    }

    /// Totals priced straight from the cart.
    pub fn totals_for(&self, cart: &Cart, add_ons: &[AddOn]) -> Priced<CheckoutTotals> {
        let subtotal = cart.subtotal(add_ons);
        Priced {
            value: self.totals(subtotal.value, &cart.unit_prices(add_ons)),
            warnings: subtotal.warnings,
        }
    }

    /// Change due for the amount currently entered.
    pub fn change(&self, total: Money) -> Money {
        compute_change(self.amount_paid.unwrap_or_default(), total)
    }

    pub fn snapshot(&self, cart: &Cart, add_ons: &[AddOn]) -> CheckoutSnapshot {
        let priced = self.totals_for(cart, add_ons);
        CheckoutSnapshot {
            stage: self.stage,
            member: self.member.clone(),
            selected_rewards: self.selected_rewards.clone(),
            customer_name: self.customer_name.clone(),
            customer_notes: self.customer_notes.clone(),
            payment_method: self.payment_method,
            amount_paid: self.amount_paid,
            totals: priced.value,
            change: self.change(priced.value.total),
            warnings: priced.warnings,
        }
    }

    /// Finalizes the payment.
    ///
    /// ## Process
    /// 1. Stage is open, cart is not empty
    /// 2. A method is chosen and enabled
    /// 3. Every selected reward still meets its minimum purchase against the
    ///    subtotal priced now (add-ons may have been switched off since)
    /// 4. Cash covers the total
    /// 5. Emit the record, clear the cart, move to `Confirmed`
    ///
    /// ## Errors
    /// Any failure leaves both the cart and this checkout untouched, so the
    /// operator can fix the input and confirm again.
    pub fn confirm(
        &mut self,
        cart: &mut Cart,
        add_ons: &[AddOn],
        operator: OperatorRef,
        now: DateTime<Utc>,
    ) -> CoreResult<FinalizedPayment> {
        self.ensure_open("confirm payment")?;

        if cart.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        let method = self.payment_method.ok_or(CoreError::PaymentMethodRequired)?;
        if !method.is_enabled() {
            warn!(method = %method, "Confirmation refused for disabled payment method");
            return Err(CoreError::PaymentMethodDisabled { method });
        }

        let priced = self.totals_for(cart, add_ons);
        let totals = priced.value;

        let below_minimum = self.selected_rewards.iter().find_map(|reward| {
            reward
                .min_purchase
                .filter(|minimum| totals.subtotal < *minimum)
                .map(|minimum| (reward, minimum))
        });
        if let Some((reward, minimum)) = below_minimum {
            warn!(reward_id = %reward.id, subtotal = %totals.subtotal, "Reward minimum no longer met");
            return Err(CoreError::MinimumPurchaseNotMet {
                reward_id: reward.id.clone(),
                minimum,
                subtotal: totals.subtotal,
            });
        }

        let amount_paid = self.amount_paid.unwrap_or_default();
        if method.requires_amount_entry() && amount_paid < totals.total {
            warn!(paid = %amount_paid, total = %totals.total, "Insufficient payment");
            return Err(CoreError::InsufficientPayment {
                paid: amount_paid,
                total: totals.total,
            });
        }

        let payment = FinalizedPayment {
            order_id: format!("{}-{}", ORDER_ID_PREFIX, now.timestamp_millis()),
            customer_name: self.customer_name.clone(),
            customer_notes: self.customer_notes.clone(),
            member: self.member.clone(),
            selected_rewards: self.selected_rewards.clone(),
            lines: cart.priced_lines(add_ons),
            subtotal: totals.subtotal,
            rewards_discount: totals.rewards_discount,
            tax: totals.tax,
            total: totals.total,
            payment_method: method,
            amount_paid,
            change: compute_change(amount_paid, totals.total),
            operator,
            warnings: priced.warnings,
            timestamp: now,
        };

        cart.reset();
        self.stage = CheckoutStage::Confirmed;

        info!(
            order_id = %payment.order_id,
            total = %payment.total,
            change = %payment.change,
            method = %payment.payment_method,
            "Payment confirmed"
        );
        Ok(payment)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

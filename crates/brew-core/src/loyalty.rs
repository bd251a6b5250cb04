//! # Loyalty
//!
//! Loyalty members, the rewards catalog, member lookup and enrollment.
//!
//! ## Member Lookup
//! ```text
//! search term ──► blank? ──yes──► []
//!                   │
//!                   no
//!                   ▼
//!          exact phone match (active)? ──yes──► [that member]
//!                   │
//!                   no
//!                   ▼
//!          active members whose name contains term (case-insensitive)
//!                   │
//!                   ▼
//!              first `limit` (default 5)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::validation::{validate_email, validate_name, validate_phone, ValidationResult};
use crate::WELCOME_POINTS;

// =============================================================================
// Members
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LoyaltySegment {
    Regular,
    Vip,
    Premium,
}

impl fmt::Display for LoyaltySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoyaltySegment::Regular => f.write_str("Regular"),
            LoyaltySegment::Vip => f.write_str("VIP"),
            LoyaltySegment::Premium => f.write_str("Premium"),
        }
    }
}

/// An enrolled customer with a points balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyMember {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub points: u32,
    pub segment: LoyaltySegment,
    pub total_spent: Money,
    /// Only active members can be attached at checkout.
    pub is_active: bool,
}

// =============================================================================
// Rewards
// =============================================================================

/// Shape of a reward's benefit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewardKind {
    /// Flat amount off.
    Discount { amount: Money },
    /// Percentage of the subtotal, optionally capped.
    #[serde(rename_all = "camelCase")]
    PercentageOff {
        /// 2000 = 20%.
        percentage_bps: u32,
        max_discount: Option<Money>,
    },
    /// A named free item; valued by the checkout's valuation strategy.
    #[serde(rename_all = "camelCase")]
    FreeItem { item_name: String },
    BuyOneGetOne,
}

/// A redeemable loyalty benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub description: String,
    pub points_required: u32,
    pub kind: RewardKind,
    pub min_purchase: Option<Money>,
    pub is_active: bool,
}

impl Reward {
    /// Whether `subtotal` satisfies the minimum purchase, if any.
    pub fn meets_minimum(&self, subtotal: Money) -> bool {
        self.min_purchase.map_or(true, |min| subtotal >= min)
    }
}

// =============================================================================
// Provider
// =============================================================================

/// Read access to loyalty members and the rewards catalog.
pub trait LoyaltyProvider {
    fn members(&self) -> &[LoyaltyMember];

    fn rewards(&self) -> &[Reward];

    fn find_member(&self, id: &str) -> Option<&LoyaltyMember> {
        self.members().iter().find(|m| m.id == id)
    }

    fn find_reward(&self, id: &str) -> Option<&Reward> {
        self.rewards().iter().find(|r| r.id == id)
    }

    fn search_members(&self, term: &str, limit: usize) -> Vec<&LoyaltyMember> {
        search_members(self.members(), term, limit)
    }

    fn available_rewards(&self, points: u32, subtotal: Money) -> Vec<&Reward> {
        available_rewards(self.rewards(), points, subtotal)
    }
}

/// Looks up members the way the payment screen does.
///
/// An exact phone match on an active member wins outright. Otherwise returns
/// up to `limit` active members whose name contains `term`, ignoring case.
pub fn search_members<'a>(
    members: &'a [LoyaltyMember],
    term: &str,
    limit: usize,
) -> Vec<&'a LoyaltyMember> {
    let term = term.trim();
    if term.is_empty() {
        return Vec::new();
    }

    if let Some(member) = members.iter().find(|m| m.is_active && m.phone == term) {
        return vec![member];
    }

    let needle = term.to_lowercase();
    members
        .iter()
        .filter(|m| m.is_active && m.name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// Rewards a member with `points` could pick on an order of `subtotal`.
///
/// Does not account for rewards already selected; see
/// [`select_reward`](crate::rewards::select_reward) for the cumulative rule.
pub fn available_rewards(rewards: &[Reward], points: u32, subtotal: Money) -> Vec<&Reward> {
    rewards
        .iter()
        .filter(|r| r.is_active && r.points_required <= points && r.meets_minimum(subtotal))
        .collect()
}

// =============================================================================
// Enrollment
// =============================================================================

/// A validated sign-up request from the "Join Loyalty" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Enrollment {
    /// Builds the member record for this sign-up with the welcome bonus.
    pub fn into_member(self, id: String) -> LoyaltyMember {
        LoyaltyMember {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            points: WELCOME_POINTS,
            segment: LoyaltySegment::Regular,
            total_spent: Money::zero(),
            is_active: true,
        }
    }
}

/// Validates the join form and returns trimmed fields.
///
/// ## Errors
/// The first failing field, checked in form order (name, phone, email).
pub fn validate_enrollment(name: &str, phone: &str, email: &str) -> ValidationResult<Enrollment> {
    validate_name(name)?;
    validate_phone(phone)?;
    validate_email(email)?;

    Ok(Enrollment {
        name: name.trim().to_string(),
        phone: phone.trim().to_string(),
        email: email.trim().to_string(),
    })
}

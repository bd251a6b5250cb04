//! # Rewards
//!
//! Reward eligibility and how much a reward takes off an order.
//!
//! ## Valuation Rules
//! ```text
//! ┌──────────────────┬──────────────────────────────────────────────────┐
//! │ RewardKind       │ value                                            │
//! ├──────────────────┼──────────────────────────────────────────────────┤
//! │ Discount         │ amount                                           │
//! │ PercentageOff    │ min(subtotal × pct, max_discount)                │
//! │ FreeItem         │ RewardValuation (default: 0)                     │
//! │ BuyOneGetOne     │ RewardValuation (default: 0)                     │
//! └──────────────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! Values are per reward. The joint cap at the subtotal is applied by
//! [`compute_totals`](crate::checkout::compute_totals).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::loyalty::{LoyaltyMember, Reward, RewardKind};
use crate::money::Money;

// =============================================================================
// Valuation
// =============================================================================

/// Prices rewards that give away an item instead of an amount.
pub trait RewardValuation {
    /// Value of a `FreeItem` or `BuyOneGetOne` reward, given the unit prices
    /// of every line in the cart.
    fn free_item_value(&self, reward: &Reward, unit_prices: &[Money]) -> Money;
}

/// Free items cost nothing. The checkout default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroValuation;

impl RewardValuation for ZeroValuation {
    fn free_item_value(&self, _reward: &Reward, _unit_prices: &[Money]) -> Money {
        Money::zero()
    }
}

/// Free items are worth the cheapest unit in the cart.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestLineValuation;

impl RewardValuation for CheapestLineValuation {
    fn free_item_value(&self, _reward: &Reward, unit_prices: &[Money]) -> Money {
        unit_prices.iter().copied().min().unwrap_or_default()
    }
}

/// Configurable choice of [`RewardValuation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ValuationStrategy {
    #[default]
    Zero,
    CheapestLine,
}

impl ValuationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValuationStrategy::Zero => "zero",
            ValuationStrategy::CheapestLine => "cheapest-line",
        }
    }
}

impl RewardValuation for ValuationStrategy {
    fn free_item_value(&self, reward: &Reward, unit_prices: &[Money]) -> Money {
        match self {
            ValuationStrategy::Zero => ZeroValuation.free_item_value(reward, unit_prices),
            ValuationStrategy::CheapestLine => {
                CheapestLineValuation.free_item_value(reward, unit_prices)
            }
        }
    }
}

impl fmt::Display for ValuationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValuationStrategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero" => Ok(ValuationStrategy::Zero),
            "cheapest-line" | "cheapest_line" => Ok(ValuationStrategy::CheapestLine),
            other => Err(ValidationError::InvalidFormat {
                field: "free item valuation".to_string(),
                reason: format!("expected 'zero' or 'cheapest-line', got '{}'", other),
            }),
        }
    }
}

/// How much one reward takes off an order of `subtotal`.
///
/// ## Example
/// ```rust,ignore
/// // 20% off, max ₱200, on ₱2000 → ₱200 (capped, not ₱400)
/// let value = reward_value(&twenty_percent, Money::from_pesos(2000), &ZeroValuation, &[]);
/// assert_eq!(value, Money::from_pesos(200));
/// ```
pub fn reward_value(
    reward: &Reward,
    subtotal: Money,
    valuation: &dyn RewardValuation,
    unit_prices: &[Money],
) -> Money {
    let value = match &reward.kind {
        RewardKind::Discount { amount } => *amount,
        RewardKind::PercentageOff {
            percentage_bps,
            max_discount,
        } => {
            let raw = subtotal.percentage_of(*percentage_bps);
            match max_discount {
                Some(max) => raw.min(*max),
                None => raw,
            }
        }
        RewardKind::FreeItem { .. } | RewardKind::BuyOneGetOne => {
            valuation.free_item_value(reward, unit_prices)
        }
    };
    value.clamp_non_negative()
}

// =============================================================================
// Eligibility
// =============================================================================

/// Checks whether `reward` may join `already_selected` for `member`.
///
/// ## Rules
/// - Member and reward are both active
/// - Reward is not already selected
/// - `member.points >= Σ already_selected points + reward.points_required`
/// - `subtotal >= reward.min_purchase` when a minimum is set
///
/// Refusal is all-or-nothing; the caller's selection is never touched here.
pub fn select_reward(
    member: &LoyaltyMember,
    reward: &Reward,
    already_selected: &[Reward],
    subtotal: Money,
) -> CoreResult<()> {
    if !member.is_active {
        return Err(CoreError::MemberInactive {
            member_id: member.id.clone(),
        });
    }

    if !reward.is_active {
        return Err(CoreError::RewardInactive {
            reward_id: reward.id.clone(),
        });
    }

    if already_selected.iter().any(|r| r.id == reward.id) {
        return Err(CoreError::RewardAlreadySelected {
            reward_id: reward.id.clone(),
        });
    }

    let committed = already_selected
        .iter()
        .fold(0_u32, |acc, r| acc.saturating_add(r.points_required));
    let remaining = member.points.saturating_sub(committed);
    if remaining < reward.points_required {
        return Err(CoreError::InsufficientPoints {
            reward_id: reward.id.clone(),
            available: remaining,
            required: reward.points_required,
        });
    }

    if let Some(minimum) = reward.min_purchase {
        if subtotal < minimum {
            return Err(CoreError::MinimumPurchaseNotMet {
                reward_id: reward.id.clone(),
                minimum,
                subtotal,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loyalty::LoyaltySegment;

    fn member(points: u32) -> LoyaltyMember {
        LoyaltyMember {
            id: "LM001".to_string(),
            name: "John Smith".to_string(),
            phone: "+63 912 345 6789".to_string(),
            email: "john.smith@email.com".to_string(),
            points,
            segment: LoyaltySegment::Vip,
            total_spent: Money::zero(),
            is_active: true,
        }
    }

    fn reward(id: &str, points: u32, kind: RewardKind) -> Reward {
        Reward {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            points_required: points,
            kind,
            min_purchase: None,
            is_active: true,
        }
    }

    fn twenty_percent() -> Reward {
        reward(
            "RWD004",
            300,
            RewardKind::PercentageOff {
                percentage_bps: 2000,
                max_discount: Some(Money::from_pesos(200)),
            },
        )
    }

    #[test]
    fn test_percentage_is_capped() {
        let value = reward_value(&twenty_percent(), Money::from_pesos(2000), &ZeroValuation, &[]);
        assert_eq!(value, Money::from_pesos(200));

        let value = reward_value(&twenty_percent(), Money::from_pesos(500), &ZeroValuation, &[]);
        assert_eq!(value, Money::from_pesos(100));
    }

    #[test]
    fn test_flat_discount() {
        let fifty = reward(
            "RWD001",
            100,
            RewardKind::Discount {
                amount: Money::from_pesos(50),
            },
        );
        assert_eq!(
            reward_value(&fifty, Money::from_pesos(10), &ZeroValuation, &[]),
            Money::from_pesos(50)
        );
    }

    #[test]
    fn test_free_item_valuation_strategies() {
        let free = reward(
            "RWD005",
            150,
            RewardKind::FreeItem {
                item_name: "Medium Coffee".to_string(),
            },
        );
        let bogo = reward("RWD002", 75, RewardKind::BuyOneGetOne);
        let prices = [Money::from_pesos(125), Money::from_pesos(90)];

        assert_eq!(reward_value(&free, Money::from_pesos(215), &ZeroValuation, &prices), Money::zero());
        assert_eq!(
            reward_value(&bogo, Money::from_pesos(215), &CheapestLineValuation, &prices),
            Money::from_pesos(90)
        );
        assert_eq!(
            reward_value(&free, Money::zero(), &ValuationStrategy::CheapestLine, &[]),
            Money::zero()
        );
    }

    #[test]
    fn test_points_are_cumulative() {
        let john = member(450);
        let first = twenty_percent();
        let second = reward("RWD005", 150, RewardKind::BuyOneGetOne);
        let third = reward("RWD001", 100, RewardKind::BuyOneGetOne);

        assert!(select_reward(&john, &first, &[], Money::from_pesos(500)).is_ok());
        assert!(select_reward(&john, &second, &[first.clone()], Money::from_pesos(500)).is_ok());

        let err = select_reward(&john, &third, &[first, second], Money::from_pesos(500)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientPoints {
                available: 0,
                required: 100,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_inactive_and_minimum() {
        let john = member(1000);
        let mut hundred_off = reward(
            "RWD003",
            200,
            RewardKind::Discount {
                amount: Money::from_pesos(100),
            },
        );
        hundred_off.min_purchase = Some(Money::from_pesos(500));

        let err = select_reward(&john, &hundred_off, &[], Money::from_pesos(499)).unwrap_err();
        assert!(matches!(err, CoreError::MinimumPurchaseNotMet { .. }));
        assert!(select_reward(&john, &hundred_off, &[], Money::from_pesos(500)).is_ok());

        let err = select_reward(&john, &hundred_off, &[hundred_off.clone()], Money::from_pesos(500))
            .unwrap_err();
        assert!(matches!(err, CoreError::RewardAlreadySelected { .. }));

        hundred_off.is_active = false;
        let err = select_reward(&john, &hundred_off, &[], Money::from_pesos(500)).unwrap_err();
        assert!(matches!(err, CoreError::RewardInactive { .. }));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("cheapest-line".parse::<ValuationStrategy>().unwrap(), ValuationStrategy::CheapestLine);
        assert_eq!("ZERO".parse::<ValuationStrategy>().unwrap(), ValuationStrategy::Zero);
        assert!("free".parse::<ValuationStrategy>().is_err());
    }
}

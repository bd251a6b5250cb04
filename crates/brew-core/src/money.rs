//! # Money Module
//!
//! Provides the `Money` type for handling peso amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats, 12% tax on ₱448.00 can come out as 53.760000000000005    │
//! │  and change due as 51.99999999999997.                                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    ₱448.00 = 44800 centavos                                             │
//! │    Tax and percentage discounts round once, explicitly, to a centavo   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brew_core::money::Money;
//!
//! let cappuccino = Money::from_pesos(100);
//! let espresso_shot = Money::from_pesos(25);
//!
//! let unit = cappuccino + espresso_shot;
//! assert_eq!(unit.multiply_quantity(2), Money::from_pesos(250));
//! assert_eq!(unit.to_string(), "₱125.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

/// Currency symbol used by `Display`.
pub const CURRENCY_SYMBOL: &str = "₱";

// =============================================================================
// Money Type
// =============================================================================

/// A peso amount stored as centavos.
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results (e.g. `paid - total`) may be
///   negative; every value that leaves the checkout engine is clamped first
/// - **Saturating operators**: `+`, `-`, `*` and `sum()` stop at the `i64`
///   bounds instead of overflowing
/// - **Single field tuple struct**: zero-cost wrapper over i64
///
/// ## Where Money Flows
/// ```text
/// MenuItem size price ──┬──► unit price ──► line total ──► subtotal
/// AddOn price ──────────┘                                    │
///                                                            ▼
///                         reward discount ──► taxable ──► tax ──► total
///                                                                  │
///                                              amount paid ──► change
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Creates a Money value from whole pesos.
    ///
    /// Catalog prices are whole pesos, so fixtures use this.
    #[inline]
    pub const fn from_pesos(pesos: i64) -> Self {
        Money(pesos * 100)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-peso portion (truncated toward zero).
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `self`, or zero if `self` is negative.
    #[inline]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Subtracts without going below zero.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// let paid = Money::from_pesos(400);
    /// let total = Money::from_centavos(44_800);
    /// assert_eq!(paid.saturating_sub(total), Money::zero());
    /// ```
    #[inline]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0)).clamp_non_negative()
    }

    /// Calculates tax, rounding half up to the nearest centavo.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 is the half-centavo rounding term.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    /// use brew_core::types::TaxRate;
    ///
    /// let taxable = Money::from_pesos(400);
    /// let tax = taxable.calculate_tax(TaxRate::from_bps(1200));
    /// assert_eq!(tax, Money::from_pesos(48));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage_of(rate.bps())
    }

    /// Returns `bps / 10000` of this amount, rounded to the nearest centavo.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// // 20% of ₱2000
    /// assert_eq!(Money::from_pesos(2000).percentage_of(2000), Money::from_pesos(400));
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        // i128 keeps large orders from overflowing before the division
        let centavos = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_centavos(centavos as i64)
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies money by a quantity; `None` if the product does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// assert_eq!(Money::from_pesos(2).checked_multiply_quantity(3), Some(Money::from_pesos(6)));
    /// assert_eq!(Money::from_pesos(2).checked_multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(centavos) => Some(Money(centavos)),
            None => None,
        }
    }

    /// Parses an operator-entered peso amount such as `"500"`, `"500.5"` or
    /// `"₱1,250.00"`.
    ///
    /// ## Rules
    /// - Optional leading peso sign, thousands separators allowed
    /// - At most two decimal places
    /// - Negative amounts are rejected
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// assert_eq!(Money::parse("500.5").unwrap().centavos(), 50_050);
    /// assert!(Money::parse("12.345").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let cleaned: String = input
            .trim()
            .trim_start_matches(CURRENCY_SYMBOL)
            .chars()
            .filter(|c| *c != ',')
            .collect();

        if cleaned.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (whole, frac) = match cleaned.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (cleaned.as_str(), ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("no digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("must be a non-negative number"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let pesos: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };
        let centavos: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("bad decimals"))? * 10,
            _ => frac.parse().map_err(|_| invalid("bad decimals"))?,
        };

        pesos
            .checked_mul(100)
            .and_then(|c| c.checked_add(centavos))
            .map(Money::from_centavos)
            .ok_or_else(|| invalid("amount is too large"))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `₱1234.50`; the front end handles grouping.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.pesos().abs(),
            self.centavos_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pesos() {
        let money = Money::from_pesos(125);
        assert_eq!(money.centavos(), 12_500);
        assert_eq!(money.pesos(), 125);
        assert_eq!(money.centavos_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_centavos(44_800).to_string(), "₱448.00");
        assert_eq!(Money::from_centavos(5_376).to_string(), "₱53.76");
        assert_eq!(Money::from_centavos(-550).to_string(), "-₱5.50");
        assert_eq!(Money::zero().to_string(), "₱0.00");
    }

    #[test]
    fn test_tax_twelve_percent() {
        let rate = TaxRate::from_bps(1200);
        assert_eq!(Money::from_pesos(500).calculate_tax(rate), Money::from_pesos(60));
        // ₱123.45 × 12% = ₱14.814 → ₱14.81
        assert_eq!(Money::from_centavos(12_345).calculate_tax(rate).centavos(), 1_481);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 15% of ₱0.10 = 1.5 centavos → 2
        assert_eq!(Money::from_centavos(10).percentage_of(1500).centavos(), 2);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let big = Money::from_centavos(i64::MAX / 10);
        assert_eq!(big.multiply_quantity(100).centavos(), i64::MAX);
        assert_eq!((big * 100).centavos(), i64::MAX);
        assert_eq!((Money::from_centavos(i64::MAX) + Money::from_pesos(1)).centavos(), i64::MAX);
        let total: Money = vec![big.multiply_quantity(20), big].into_iter().sum();
        assert_eq!(total.centavos(), i64::MAX);
        assert_eq!(big.checked_multiply_quantity(100), None);
        assert_eq!(big.checked_multiply_quantity(2), Some(Money::from_centavos(i64::MAX / 10 * 2)));
    }

    #[test]
    fn test_saturating_sub() {
        let total = Money::from_centavos(44_800);
        assert_eq!(Money::from_pesos(500).saturating_sub(total).centavos(), 5_200);
        assert_eq!(Money::from_pesos(400).saturating_sub(total), Money::zero());
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_pesos(250), Money::from_pesos(200), Money::from_centavos(50)];
        let total: Money = lines.iter().sum();
        assert_eq!(total.centavos(), 45_050);
        assert_eq!(Vec::<Money>::new().into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_parse_amounts() {
        assert_eq!(Money::parse("500").unwrap(), Money::from_pesos(500));
        assert_eq!(Money::parse(" 500.00 ").unwrap(), Money::from_pesos(500));
        assert_eq!(Money::parse("₱1,250.5").unwrap().centavos(), 125_050);
        assert_eq!(Money::parse(".75").unwrap().centavos(), 75);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(Money::parse(""), Err(ValidationError::Required { .. })));
        assert!(Money::parse("-5").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }
}

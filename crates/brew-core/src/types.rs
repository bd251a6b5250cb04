//! # Shared Value Types
//!
//! Small value types used across the cart and checkout engines.
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │    TaxRate      │   │      Size       │   │ PaymentMethod   │
//! │  ─────────────  │   │  ─────────────  │   │  ─────────────  │
//! │  bps (u32)      │   │  Small          │   │  Cash           │
//! │  1200 = 12%     │   │  Medium         │   │  GCash (off)    │
//! └─────────────────┘   │  Large          │   └─────────────────┘
//!                       └─────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so the 12% VAT is `1200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for config input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    /// 12% VAT.
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Size
// =============================================================================

/// Drink size. A size is offered iff the item has a price for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Small, Size::Medium, Size::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

/// The order screen pre-selects medium.
impl Default for Size {
    fn default() -> Self {
        Size::Medium
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "s" => Ok(Size::Small),
            "medium" | "m" => Ok(Size::Medium),
            "large" | "l" => Ok(Size::Large),
            other => Err(ValidationError::InvalidFormat {
                field: "size".to_string(),
                reason: format!("unknown size '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash; the only method that needs an amount entered.
    Cash,
    /// Mobile wallet. Placeholder for a future integration.
    Gcash,
}

impl PaymentMethod {
    /// Whether the method can currently complete a payment.
    pub const fn is_enabled(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }

    pub const fn requires_amount_entry(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("Cash"),
            PaymentMethod::Gcash => f.write_str("GCash"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "gcash" => Ok(PaymentMethod::Gcash),
            other => Err(ValidationError::InvalidFormat {
                field: "payment method".to_string(),
                reason: format!("unknown method '{}'", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_default_is_twelve_percent() {
        let rate = TaxRate::default();
        assert_eq!(rate.bps(), 1200);
        assert!((rate.percentage() - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(12.0).bps(), 1200);
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_size_parsing() {
        assert_eq!("Small".parse::<Size>().unwrap(), Size::Small);
        assert_eq!(" l ".parse::<Size>().unwrap(), Size::Large);
        assert!("venti".parse::<Size>().is_err());
        assert_eq!(Size::default(), Size::Medium);
    }

    #[test]
    fn test_gcash_is_disabled() {
        assert!(PaymentMethod::Cash.is_enabled());
        assert!(!PaymentMethod::Gcash.is_enabled());
        assert_eq!("GCASH".parse::<PaymentMethod>().unwrap(), PaymentMethod::Gcash);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Size::Medium).unwrap(), "\"medium\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Gcash).unwrap(), "\"gcash\"");
    }
}

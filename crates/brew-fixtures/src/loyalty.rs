//! # Loyalty Fixtures
//!
//! Eight loyalty members, eight rewards, and [`InMemoryLoyalty`], which also
//! accepts new enrollments for the lifetime of the process.

use brew_core::loyalty::validate_enrollment;
use brew_core::{LoyaltyMember, LoyaltyProvider, LoyaltySegment, Money, Reward, RewardKind};
use tracing::info;

use crate::error::{FixtureError, FixtureResult};

// =============================================================================
// Members
// =============================================================================

const MEMBERS: &[(&str, &str, &str, u32, LoyaltySegment, i64)] = &[
    ("LM001", "John Smith", "+63 912 345 6789", 450, LoyaltySegment::Vip, 2500),
    ("LM002", "Maria Garcia", "+63 917 234 5678", 120, LoyaltySegment::Regular, 800),
    ("LM003", "David Johnson", "+63 918 345 6789", 750, LoyaltySegment::Premium, 5000),
    ("LM004", "Sarah Wilson", "+63 919 456 7890", 80, LoyaltySegment::Regular, 400),
    ("LM005", "Michael Brown", "+63 920 567 8901", 320, LoyaltySegment::Vip, 1800),
    ("LM006", "Lisa Davis", "+63 921 678 9012", 950, LoyaltySegment::Premium, 7500),
    ("LM007", "Robert Miller", "+63 922 789 0123", 60, LoyaltySegment::Regular, 300),
    ("LM008", "Jennifer Taylor", "+63 923 890 1234", 180, LoyaltySegment::Vip, 1200),
];

/// Email in the fixture convention, `first.last@email.com`.
fn fixture_email(name: &str) -> String {
    format!("{}@email.com", name.to_lowercase().replace(' ', "."))
}

pub fn members() -> Vec<LoyaltyMember> {
    MEMBERS
        .iter()
        .map(|(id, name, phone, points, segment, spent)| LoyaltyMember {
            id: id.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: fixture_email(name),
            points: *points,
            segment: *segment,
            total_spent: Money::from_pesos(*spent),
            is_active: true,
        })
        .collect()
}

// =============================================================================
// Rewards
// =============================================================================

fn reward(
    id: &str,
    name: &str,
    description: &str,
    points_required: u32,
    kind: RewardKind,
    min_purchase: Option<i64>,
) -> Reward {
    Reward {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        points_required,
        kind,
        min_purchase: min_purchase.map(Money::from_pesos),
        is_active: true,
    }
}

fn flat(pesos: i64) -> RewardKind {
    RewardKind::Discount {
        amount: Money::from_pesos(pesos),
    }
}

fn percent(pct: u32, max_pesos: i64) -> RewardKind {
    RewardKind::PercentageOff {
        percentage_bps: pct * 100,
        max_discount: Some(Money::from_pesos(max_pesos)),
    }
}

fn free(item_name: &str) -> RewardKind {
    RewardKind::FreeItem {
        item_name: item_name.to_string(),
    }
}

pub fn rewards() -> Vec<Reward> {
    vec![
        reward("RWD001", "₱50 Discount", "₱50 off on your next purchase", 100, flat(50), None),
        reward(
            "RWD002",
            "Buy 1 Take 1",
            "Buy one item, get one free (same or lesser value)",
            75,
            free("Any item"),
            None,
        ),
        reward("RWD003", "₱100 Discount", "₱100 off on purchases above ₱500", 200, flat(100), Some(500)),
        reward("RWD004", "20% Discount", "20% off on your entire purchase", 300, percent(20, 200), None),
        reward("RWD005", "Free Coffee", "Free medium coffee of your choice", 150, free("Medium Coffee"), None),
        reward("RWD006", "15% Off", "15% off on orders above ₱300", 180, percent(15, 150), Some(300)),
        reward("RWD007", "Free Pastry", "Free pastry with any drink purchase", 120, free("Any Pastry"), None),
        reward("RWD008", "₱200 Discount", "₱200 off on purchases above ₱1000", 400, flat(200), Some(1000)),
    ]
}

// =============================================================================
// Provider
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct InMemoryLoyalty {
    members: Vec<LoyaltyMember>,
    rewards: Vec<Reward>,
}

impl InMemoryLoyalty {
    pub fn new(members: Vec<LoyaltyMember>, rewards: Vec<Reward>) -> Self {
        InMemoryLoyalty { members, rewards }
    }

    pub fn seeded() -> Self {
        InMemoryLoyalty::new(members(), rewards())
    }

    /// Signs up a new member from the "Join Loyalty" form.
    ///
    /// ## Errors
    /// - [`FixtureError::Validation`] for a bad name, phone or email
    /// - [`FixtureError::DuplicatePhone`] if an active member has the phone
    pub fn enroll(&mut self, name: &str, phone: &str, email: &str) -> FixtureResult<LoyaltyMember> {
        let enrollment = validate_enrollment(name, phone, email)?;

        if self
            .members
            .iter()
            .any(|m| m.is_active && m.phone == enrollment.phone)
        {
            return Err(FixtureError::DuplicatePhone(enrollment.phone));
        }

        let id = format!("LM{:03}", self.members.len() + 1);
        let member = enrollment.into_member(id);
        info!(member_id = %member.id, points = member.points, "Loyalty member enrolled");

        self.members.push(member.clone());
        Ok(member)
    }
}

impl LoyaltyProvider for InMemoryLoyalty {
    fn members(&self) -> &[LoyaltyMember] {
        &self.members
    }

    fn rewards(&self) -> &[Reward] {
        &self.rewards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::DEFAULT_MEMBER_SEARCH_LIMIT;

    #[test]
    fn test_fixture_counts() {
        let loyalty = InMemoryLoyalty::seeded();
        assert_eq!(loyalty.members().len(), 8);
        assert_eq!(loyalty.rewards().len(), 8);
        assert_eq!(loyalty.find_member("LM002").unwrap().email, "maria.garcia@email.com");
    }

    #[test]
    fn test_search_by_phone_and_name() {
        let loyalty = InMemoryLoyalty::seeded();

        let by_phone = loyalty.search_members("+63 920 567 8901", DEFAULT_MEMBER_SEARCH_LIMIT);
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Michael Brown");

        // "a" appears in six names; the lookup returns five
        let by_name = loyalty.search_members("A", DEFAULT_MEMBER_SEARCH_LIMIT);
        assert_eq!(by_name.len(), 5);
    }

    #[test]
    fn test_available_rewards_for_maria() {
        let loyalty = InMemoryLoyalty::seeded();
        let maria = loyalty.find_member("LM002").unwrap();

        let ids: Vec<_> = loyalty
            .available_rewards(maria.points, Money::from_pesos(250))
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["RWD001", "RWD002", "RWD007"]);
    }

    #[test]
    fn test_enroll() {
        let mut loyalty = InMemoryLoyalty::seeded();

        let member = loyalty
            .enroll("Pia Reyes", "+63 915 111 2222", "pia.reyes@email.com")
            .unwrap();
        assert_eq!(member.id, "LM009");
        assert_eq!(member.points, 100);
        assert_eq!(loyalty.search_members("pia", 5).len(), 1);

        assert!(matches!(
            loyalty.enroll("Someone Else", "+63 915 111 2222", "else@email.com"),
            Err(FixtureError::DuplicatePhone(_))
        ));
        assert!(matches!(
            loyalty.enroll("", "+63 915 000 0000", "x@email.com"),
            Err(FixtureError::Validation(_))
        ));
        assert_eq!(loyalty.members().len(), 9);
    }
}

//! # Loyalty Commands
//!
//! Member lookup, the rewards list and "Join Loyalty".

use brew_core::validation::validate_search_term;
use brew_core::{CatalogProvider, CoreError, LoyaltyMember, LoyaltyProvider, Reward};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, LoyaltyState, OrderState};

/// Finds members by exact phone number or by name.
///
/// ## Behavior
/// - Blank term: no results
/// - Phone matches an active member exactly: that member only
/// - Otherwise: active members whose name contains the term, at most
///   `memberSearchLimit` of them
pub fn search_members(
    config: &ConfigState,
    loyalty: &LoyaltyState,
    term: &str,
) -> Result<Vec<LoyaltyMember>, ApiError> {
    debug!(term, "search_members command");
    let term = validate_search_term(term)?;

    Ok(loyalty.with_loyalty(|l| {
        l.search_members(&term, config.member_search_limit)
            .into_iter()
            .cloned()
            .collect()
    }))
}

/// Rewards the attached member could pick on the current order.
///
/// ## Errors
/// `LOYALTY_ERROR` when no member is attached
pub fn get_available_rewards(
    catalog: &CatalogState,
    loyalty: &LoyaltyState,
    order: &OrderState,
) -> Result<Vec<Reward>, ApiError> {
    debug!("get_available_rewards command");

    let (points, subtotal) = catalog.with_catalog(|c| {
        order.with_order(|o| {
            o.checkout
                .member()
                .map(|m| (m.points, o.cart.subtotal(c.add_ons()).value))
        })
    })
    .ok_or(CoreError::MemberRequired)?;

    Ok(loyalty.with_loyalty(|l| {
        l.available_rewards(points, subtotal)
            .into_iter()
            .cloned()
            .collect()
    }))
}

/// Signs up a new member with the welcome points.
pub fn enroll_member(
    loyalty: &LoyaltyState,
    name: &str,
    phone: &str,
    email: &str,
) -> Result<LoyaltyMember, ApiError> {
    debug!(name, phone, "enroll_member command");
    Ok(loyalty.with_loyalty_mut(|l| l.enroll(name, phone, email))?)
}

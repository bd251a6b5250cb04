//! # Catalog Commands
//!
//! Menu browsing for the order screen and the two management toggles.

use brew_core::catalog::filter_menu;
use brew_core::validation::validate_search_term;
use brew_core::{AddOn, CatalogProvider, MenuItem, MenuStatus, MenuType};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CatalogState;

/// Category tab value meaning every category.
pub const ALL_CATEGORIES: &str = "all";

/// Lists menu items for a category tab and search box.
///
/// ## Arguments
/// * `category` - `"all"` (or `None`) or a menu type tag such as `"milk-tea"`
/// * `term` - Matched against name, category and status, ignoring case
pub fn get_menu(
    catalog: &CatalogState,
    category: Option<&str>,
    term: &str,
) -> Result<Vec<MenuItem>, ApiError> {
    debug!(?category, term, "get_menu command");

    let category = match category.map(str::trim) {
        None => None,
        Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => None,
        Some(c) => Some(c.parse::<MenuType>()?),
    };
    let term = validate_search_term(term)?;

    Ok(catalog.with_catalog(|c| {
        filter_menu(c.menu_items(), category, &term)
            .into_iter()
            .cloned()
            .collect()
    }))
}

/// Add-ons the operator may pick right now.
pub fn get_add_ons(catalog: &CatalogState) -> Vec<AddOn> {
    debug!("get_add_ons command");
    catalog.with_catalog(|c| c.available_add_ons().into_iter().cloned().collect())
}

/// Switches an add-on on or off. Existing cart lines reprice on the next
/// read; finalized payments keep what they recorded.
pub fn set_add_on_availability(
    catalog: &CatalogState,
    add_on_id: &str,
    available: bool,
) -> Result<(), ApiError> {
    debug!(add_on_id, available, "set_add_on_availability command");
    catalog.with_catalog_mut(|c| c.set_add_on_availability(add_on_id, available))?;
    Ok(())
}

pub fn set_menu_item_available(
    catalog: &CatalogState,
    menu_id: &str,
    available: bool,
) -> Result<(), ApiError> {
    debug!(menu_id, available, "set_menu_item_available command");
    let status = if available {
        MenuStatus::Available
    } else {
        MenuStatus::Unavailable
    };
    catalog.with_catalog_mut(|c| c.set_item_status(menu_id, status))?;
    Ok(())
}

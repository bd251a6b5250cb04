//! # Catalog Fixtures
//!
//! The ten-drink menu and the nineteen add-ons, served through
//! [`InMemoryCatalog`].
//!
//! ```text
//! ┌──────────────────────────┬──────┬──────┬──────┬─────────────┐
//! │ Item                     │  S   │  M   │  L   │ Status      │
//! ├──────────────────────────┼──────┼──────┼──────┼─────────────┤
//! │ 1  Cappuccino (hot)      │ 100  │ 200  │  -   │ available   │
//! │ 2  Iced Cappuccino       │ 100  │ 200  │ 300  │ available   │
//! │ 3  Americano             │ 100  │ 200  │ 300  │ available   │
//! │ 4  Mocha                 │ 100  │ 200  │ 300  │ unavailable │
//! │ 5  Vanilla Latte         │ 100  │ 200  │ 300  │ available   │
//! │ 6  Caramel Frappe        │ 120  │ 220  │ 320  │ available   │
//! │ 7  Strawberry Soda       │  90  │ 180  │ 270  │ available   │
//! │ 8  Matcha Milk Tea       │ 110  │ 210  │ 310  │ unavailable │
//! │ 9  Hazelnut Frappe       │ 130  │ 230  │ 330  │ available   │
//! │ 10 Classic Soda          │  80  │ 160  │ 240  │ available   │
//! └──────────────────────────┴──────┴──────┴──────┴─────────────┘
//! ```

use brew_core::{AddOn, AddOnCategory, CatalogProvider, MenuItem, MenuStatus, MenuType, Money};
use tracing::info;

use crate::error::{FixtureError, FixtureResult};

// =============================================================================
// Menu
// =============================================================================

type MenuRow = (
    &'static str,
    &'static str,
    MenuType,
    MenuStatus,
    [Option<i64>; 3],
    &'static str,
    u32,
);

const MENU: &[MenuRow] = &[
    ("1", "Cappuccino", MenuType::Hot, MenuStatus::Available, [Some(100), Some(200), None],
     "Classic Italian coffee with steamed milk and foam", 3),
    ("2", "Iced Cappuccino", MenuType::Cold, MenuStatus::Available, [Some(100), Some(200), Some(300)],
     "Refreshing iced version of our classic cappuccino", 4),
    ("3", "Americano", MenuType::Hot, MenuStatus::Available, [Some(100), Some(200), Some(300)],
     "Strong black coffee with hot water", 2),
    ("4", "Mocha", MenuType::Hot, MenuStatus::Unavailable, [Some(100), Some(200), Some(300)],
     "Rich chocolate coffee with steamed milk", 4),
    ("5", "Vanilla Latte", MenuType::MilkTea, MenuStatus::Available, [Some(100), Some(200), Some(300)],
     "Smooth latte with vanilla flavoring", 3),
    ("6", "Caramel Frappe", MenuType::Frappe, MenuStatus::Available, [Some(120), Some(220), Some(320)],
     "Blended ice drink with caramel flavoring", 5),
    ("7", "Strawberry Soda", MenuType::Soda, MenuStatus::Available, [Some(90), Some(180), Some(270)],
     "Refreshing strawberry flavored soda", 2),
    ("8", "Matcha Milk Tea", MenuType::MilkTea, MenuStatus::Unavailable, [Some(110), Some(210), Some(310)],
     "Traditional Japanese green tea with milk", 4),
    ("9", "Hazelnut Frappe", MenuType::Frappe, MenuStatus::Available, [Some(130), Some(230), Some(330)],
     "Rich hazelnut flavored blended drink", 5),
    ("10", "Classic Soda", MenuType::Soda, MenuStatus::Available, [Some(80), Some(160), Some(240)],
     "Classic carbonated soda drink", 1),
];

/// The shop's menu.
pub fn menu_items() -> Vec<MenuItem> {
    MENU.iter()
        .map(|(id, name, menu_type, status, [s, m, l], description, prep)| MenuItem {
            menu_id: id.to_string(),
            name: name.to_string(),
            menu_type: *menu_type,
            status: *status,
            small_price: s.map(Money::from_pesos),
            medium_price: m.map(Money::from_pesos),
            large_price: l.map(Money::from_pesos),
            description: Some(description.to_string()),
            prep_time: *prep,
        })
        .collect()
}

// =============================================================================
// Add-ons
// =============================================================================

const ADD_ONS: &[(&str, &str, i64, AddOnCategory, &str)] = &[
    ("espresso-shot", "Extra Espresso Shot", 25, AddOnCategory::Extra, "Additional shot of espresso"),
    ("caramel-syrup", "Caramel Syrup", 15, AddOnCategory::Syrup, "Sweet caramel flavoring"),
    ("vanilla-syrup", "Vanilla Syrup", 15, AddOnCategory::Syrup, "Classic vanilla flavoring"),
    ("hazelnut-syrup", "Hazelnut Syrup", 15, AddOnCategory::Syrup, "Rich hazelnut flavoring"),
    ("blueberry-syrup", "Blueberry Syrup", 15, AddOnCategory::Syrup, "Fruity blueberry flavoring"),
    ("strawberry-syrup", "Strawberry Syrup", 15, AddOnCategory::Syrup, "Sweet strawberry flavoring"),
    ("green-apple-syrup", "Green Apple Syrup", 15, AddOnCategory::Syrup, "Tart green apple flavoring"),
    ("mango-syrup", "Mango Syrup", 15, AddOnCategory::Syrup, "Tropical mango flavoring"),
    ("lychee-syrup", "Lychee Syrup", 15, AddOnCategory::Syrup, "Exotic lychee flavoring"),
    ("chocolate-sauce", "Chocolate Sauce", 20, AddOnCategory::Sauce, "Rich chocolate drizzle"),
    ("caramel-sauce", "Caramel Sauce", 20, AddOnCategory::Sauce, "Sweet caramel drizzle"),
    ("white-chocolate-sauce", "White Chocolate Sauce", 20, AddOnCategory::Sauce, "Creamy white chocolate drizzle"),
    ("whipped-cream", "Whipped Cream", 10, AddOnCategory::Topping, "Light and fluffy cream"),
    ("cinnamon-powder", "Cinnamon Powder", 5, AddOnCategory::Topping, "Warm spice dusting"),
    ("cocoa-powder", "Cocoa Powder", 5, AddOnCategory::Topping, "Rich chocolate dusting"),
    ("oat-milk", "Oat Milk", 8, AddOnCategory::Milk, "Creamy plant-based milk"),
    ("almond-milk", "Almond Milk", 8, AddOnCategory::Milk, "Nutty plant-based milk"),
    ("soy-milk", "Soy Milk", 8, AddOnCategory::Milk, "Smooth plant-based milk"),
    ("coconut-milk", "Coconut Milk", 8, AddOnCategory::Milk, "Tropical plant-based milk"),
];

/// The add-on price list, all available.
pub fn add_ons() -> Vec<AddOn> {
    ADD_ONS
        .iter()
        .map(|(id, name, pesos, category, description)| AddOn {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::from_pesos(*pesos),
            category: *category,
            description: Some(description.to_string()),
            available: true,
        })
        .collect()
}

// =============================================================================
// Provider
// =============================================================================

/// Catalog held in memory, editable from the management screens.
///
/// ## Usage
/// ```rust
/// use brew_core::CatalogProvider;
/// use brew_fixtures::InMemoryCatalog;
///
/// let mut catalog = InMemoryCatalog::seeded();
/// catalog.set_add_on_availability("whipped-cream", false).unwrap();
/// assert_eq!(catalog.available_add_ons().len(), 18);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<MenuItem>,
    add_ons: Vec<AddOn>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<MenuItem>, add_ons: Vec<AddOn>) -> Self {
        InMemoryCatalog { items, add_ons }
    }

    /// The shop's fixture menu and add-ons.
    pub fn seeded() -> Self {
        InMemoryCatalog::new(menu_items(), add_ons())
    }

    /// Switches an add-on on or off. Affects the next price computation.
    pub fn set_add_on_availability(&mut self, add_on_id: &str, available: bool) -> FixtureResult<()> {
        let add_on = self
            .add_ons
            .iter_mut()
            .find(|a| a.id == add_on_id)
            .ok_or_else(|| FixtureError::AddOnNotFound(add_on_id.to_string()))?;

        add_on.available = available;
        info!(add_on = %add_on.name, available, "Add-on availability changed");
        Ok(())
    }

    /// Marks a menu item available or unavailable.
    pub fn set_item_status(&mut self, menu_id: &str, status: MenuStatus) -> FixtureResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.menu_id == menu_id)
            .ok_or_else(|| FixtureError::MenuItemNotFound(menu_id.to_string()))?;

        item.status = status;
        info!(menu_id, status = status.as_str(), "Menu item status changed");
        Ok(())
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn menu_items(&self) -> &[MenuItem] {
        &self.items
    }

    fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }
}

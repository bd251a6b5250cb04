//! # Brew POS Terminal Entry Point
//!
//! Runs one scripted counter session against the fixture data and prints
//! the finalized payment as JSON.
//!
//! ## Usage
//! ```bash
//! cargo run -p brew-terminal
//!
//! # Engine trace, cheapest-line valuation for free-item rewards
//! RUST_LOG=brew_core=trace BREW_FREE_ITEM_VALUATION=cheapest-line cargo run -p brew-terminal
//! ```
//!
//! ## Script
//! 1. Cashier logs in
//! 2. 2 × Cappuccino (small, extra shot) and a large Classic Soda with cream
//! 3. John Smith's loyalty card, ₱50 Discount reward
//! 4. Cash, ₱600 tendered
//! 5. Confirm

use brew_terminal::commands::{cart, checkout, loyalty, session};
use brew_terminal::state::ConfigState;
use brew_terminal::{init_tracing, AppState};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Brew POS terminal");

    let config = ConfigState::load()?;
    let app = AppState::new(config);

    session::login(&app.session, "cashier", "cashier123")?;

    cart::add_to_order(
        &app.catalog,
        &app.order,
        "1",
        Some(2),
        "small",
        vec!["Extra Espresso Shot".to_string()],
    )?;
    let order = cart::add_to_order(
        &app.catalog,
        &app.order,
        "10",
        None,
        "large",
        vec!["Whipped Cream".to_string()],
    )?;
    info!(
        lines = order.line_count,
        subtotal = %app.config.format_currency(order.subtotal),
        "Order built"
    );

    checkout::proceed_to_payment(&app.catalog, &app.order)?;

    let member = loyalty::search_members(&app.config, &app.loyalty, "+63 912 345 6789")?
        .into_iter()
        .next()
        .ok_or("fixture member missing")?;
    checkout::attach_member(&app.catalog, &app.loyalty, &app.order, &member.id)?;
    checkout::select_reward(&app.catalog, &app.loyalty, &app.order, "RWD001")?;

    checkout::set_payment_method(&app.catalog, &app.order, "cash")?;
    let screen = checkout::enter_amount(&app.catalog, &app.order, "600")?;
    info!(
        total = %app.config.format_currency(screen.totals.total),
        change = %app.config.format_currency(screen.change),
        "Ready to confirm"
    );

    let payment = checkout::confirm_payment(&app.config, &app.catalog, &app.order, &app.session)?;
    println!("{}", serde_json::to_string_pretty(&payment)?);

    Ok(())
}

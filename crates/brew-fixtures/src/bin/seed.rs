//! # Fixture Dump
//!
//! Writes the fixture data as camelCase JSON, the shape the front end loads.
//!
//! ## Usage
//! ```bash
//! # Everything to stdout
//! cargo run -p brew-fixtures --bin seed
//!
//! # One collection
//! cargo run -p brew-fixtures --bin seed -- --only menu
//!
//! # To a file
//! cargo run -p brew-fixtures --bin seed -- --out ./fixtures.json
//! ```

use brew_core::{CatalogProvider, LoyaltyProvider};
use brew_fixtures::{InMemoryCatalog, InMemoryLoyalty, StaffDirectory};
use serde_json::{json, Value};
use std::env;
use std::fs;

const COLLECTIONS: &[&str] = &["menu", "addOns", "members", "rewards", "staff"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut only: Option<String> = None;
    let mut out: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--only" | "-o" => {
                if i + 1 < args.len() {
                    only = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--out" => {
                if i + 1 < args.len() {
                    out = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Brew POS Fixture Dump");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --only <NAME>  One of: {}", COLLECTIONS.join(", "));
                println!("      --out <PATH>   Write to a file instead of stdout");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let catalog = InMemoryCatalog::seeded();
    let loyalty = InMemoryLoyalty::seeded();
    let staff = StaffDirectory::seeded();

    let all = json!({
        "menu": catalog.menu_items(),
        "addOns": catalog.add_ons(),
        "members": loyalty.members(),
        "rewards": loyalty.rewards(),
        "staff": staff.users(),
    });

    let payload: Value = match only {
        Some(name) => match all.get(&name) {
            Some(collection) => collection.clone(),
            None => {
                eprintln!("Unknown collection '{}'. Expected one of: {}", name, COLLECTIONS.join(", "));
                std::process::exit(2);
            }
        },
        None => all,
    };

    let text = serde_json::to_string_pretty(&payload)?;
    match out {
        Some(path) => {
            fs::write(&path, text)?;
            eprintln!("✓ Wrote fixtures to {}", path);
        }
        None => println!("{}", text),
    }

    Ok(())
}

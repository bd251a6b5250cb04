//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current terminal configuration.
///
/// ## When Used
/// - Startup (store name in the header)
/// - Currency formatting
/// - Receipt text
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

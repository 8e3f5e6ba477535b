//! Exit codes for the CLI

use relnotes_core::RelnotesError;

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Exit code for an error returned by a command
pub fn for_error(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<RelnotesError>() {
        Some(RelnotesError::Config(_)) => CONFIG_ERROR,
        _ => ERROR,
    }
}

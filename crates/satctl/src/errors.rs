//! Exit codes for satctl

use satfinder_common::SatError;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// No article found in either language
pub const EXIT_NOT_FOUND: i32 = 2;

/// Titles found but no summary could be loaded
pub const EXIT_SUMMARY_UNAVAILABLE: i32 = 3;

/// Empty query or bad usage
pub const EXIT_USAGE: i32 = 64;

/// Configuration could not be loaded
pub const EXIT_CONFIG: i32 = 78;

/// Exit status for an error bubbled up to `main`
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<SatError>()
        .map(SatError::exit_code)
        .unwrap_or(EXIT_GENERAL_ERROR)
}

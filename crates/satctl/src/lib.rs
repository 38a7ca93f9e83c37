//! SatFinder Control - CLI client library
//!
//! Exposed as a library so argument parsing and command behavior can be
//! tested without spawning the binary.

pub mod cli;
pub mod commands;
pub mod errors;
pub mod logging;

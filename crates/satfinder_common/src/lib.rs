//! SatFinder Common - satellite lookup across encyclopedia, entity store and orbital catalog
//!
//! Resolves a free-text query to an article title, an entity record and a TLE set,
//! then merges them into one fact sheet.

pub mod claims;
pub mod config;
pub mod error;
pub mod memo;
pub mod reconcile;
pub mod render;
pub mod sources;
pub mod types;

pub use claims::{ClaimValue, EntityRecord};
pub use config::SatConfig;
pub use error::SatError;
pub use reconcile::{Reconciler, Stage};
pub use types::*;

//! Shared building blocks for the contact book crates.
//! - Logging initialisation used by every binary and test harness.
//! - Startup directory checks.
//! - Small wire types shared between the server and its clients.

pub mod env;
pub mod types;
pub mod utils;

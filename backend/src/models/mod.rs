//! Database models for the Warehouse Management Platform
//!
//! Re-exports domain models from the shared crate

pub use shared::models::*;

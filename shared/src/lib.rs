//! Shared types and models for the Warehouse Management Platform
//!
//! This crate contains types shared between the backend service and other
//! components of the system (API clients, tooling).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;

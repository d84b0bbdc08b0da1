//! Request middleware for the Warehouse Management Platform

mod auth;

pub use auth::auth_middleware;

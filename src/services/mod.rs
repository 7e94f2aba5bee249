//! Business logic services.

pub mod auth;
pub mod metrics;
pub mod posts;
pub mod route_guard;
pub mod summary;

//! Request extractors and layers.

pub mod auth;
pub mod guard;

//! Request models for API endpoints.

pub mod container;

pub use container::*;

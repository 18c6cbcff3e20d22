//! Response models for API endpoints.

pub mod api;
pub mod container;
pub mod pagination;

pub use api::*;
pub use container::*;
pub use pagination::*;

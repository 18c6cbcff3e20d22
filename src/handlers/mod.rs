//! HTTP request handlers organized by domain.

pub mod container_handler;
pub mod system_handler;

pub use container_handler::*;
pub use system_handler::*;

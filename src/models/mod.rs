//! Data models organized by type.

pub mod container;
pub mod requests;
pub mod responses;

pub use container::*;
pub use requests::*;
pub use responses::*;

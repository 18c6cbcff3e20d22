//! Request validation helpers.

pub mod common;
pub mod container;

pub use common::*;
pub use container::*;

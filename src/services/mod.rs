//! Services organized by domain concern.

pub mod container_service;

pub use container_service::ContainerService;

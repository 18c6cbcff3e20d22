//! Success message constants used throughout the application.

// Lifecycle messages
pub const MSG_CONTAINER_STOPPED: &str = "The container was stopped";
pub const MSG_CONTAINER_STARTED: &str = "The container was started";

// Listing metadata
pub const OBJECT_NAME_DOCKERS: &str = "Dockers";

// System messages
pub const MSG_PONG: &str = "pong";

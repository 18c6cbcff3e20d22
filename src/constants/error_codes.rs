//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Container listing
pub const CODE_SEARCH_BAD_REQUEST: &str = "container.Search.BadRequest";
pub const CODE_SEARCH_NOT_FOUND: &str = "container.Search.NotFound";
pub const CODE_SEARCH_ERROR: &str = "container.Search.Error";

// Container lifecycle
pub const CODE_STOP_ERROR: &str = "container.Stop.Error";
pub const CODE_START_ERROR: &str = "container.Start.Error";
pub const CODE_CREATE_BAD_REQUEST: &str = "container.Create.BadRequest";
pub const CODE_CREATE_ERROR: &str = "container.Create.Error";

// Container observation
pub const CODE_LOGS_NOT_FOUND: &str = "container.Logs.NotFound";
pub const CODE_LOGS_ERROR: &str = "container.Logs.Error";
pub const CODE_RESOURCES_ERROR: &str = "container.Resources.Error";

// Validation errors
pub const CODE_VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const CODE_INVALID_FORMAT: &str = "INVALID_FORMAT";

// Generic errors
pub const CODE_RESOURCE_NOT_FOUND: &str = "Ressource.NotFound";
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";

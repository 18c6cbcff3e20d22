//! Error message constants used throughout the application.

// Listing errors
pub const ERR_NO_CONTAINERS: &str = "Data not found.";
pub const ERR_OFFSET_EXCEEDS_COUNT: &str = "Offset cannot be higher than count.";
pub const ERR_INVALID_QUERY: &str = "Invalid query parameters";

// Request body errors
pub const ERR_INVALID_REQUEST_FORMAT: &str = "Invalid request format";

// Runtime errors
pub const ERR_RUNTIME_TIMEOUT: &str = "Container runtime did not answer in time";
pub const ERR_NO_STATS: &str = "No stats returned for container";

// Routing errors
pub const ERR_RESOURCE_NOT_FOUND: &str = "ressource not found";

// Validation errors
pub const ERR_IMAGE_REQUIRED: &str = "Image is required";
pub const ERR_INVALID_PORT: &str = "Ports must be numbers between 1 and 65535";

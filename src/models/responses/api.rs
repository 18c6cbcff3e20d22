//! Generic API response models.

use serde::Serialize;
use utoipa::ToSchema;

/// Response carrying only a status message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Whether the request was successful
    #[schema(example = true)]
    pub success: bool,
    /// Status message
    #[schema(example = "The container was stopped")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Whether the request was successful (always false for errors)
    #[schema(example = false)]
    pub success: bool,
    /// Machine-readable error code
    #[schema(example = "container.Search.NotFound")]
    pub code: String,
    /// Error message
    #[schema(example = "Data not found.")]
    pub message: String,
    /// Detailed validation errors (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Liveness response
#[derive(Debug, Serialize, ToSchema)]
pub struct PingResponse {
    #[schema(example = "pong")]
    pub message: String,
}

/// Version response
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    /// API version string
    #[schema(example = "1.0.0")]
    pub version: String,
}

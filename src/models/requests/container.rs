//! Container-related request models.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::validators::{validate_image, validate_ports};

/// Query parameters for listing containers
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContainerListQuery {
    /// 1-based position of the first container to return (0 or absent: start)
    pub offset: Option<i64>,
    /// Maximum number of containers to return (0 or absent: server default)
    pub count: Option<i64>,
}

/// Request payload for creating and starting a container
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContainerRequest {
    /// Image to run, pulled first when missing locally
    #[validate(custom = "validate_image")]
    #[schema(example = "nginx:latest")]
    pub image: String,
    /// Command overriding the image default
    #[serde(default)]
    #[schema(example = json!(["nginx", "-g", "daemon off;"]))]
    pub command: Vec<String>,
    /// TCP ports published on the same host port
    #[serde(default)]
    #[validate(custom = "validate_ports")]
    #[schema(example = json!(["8080"]))]
    pub ports: Vec<String>,
}

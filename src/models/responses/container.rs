//! Container-related response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ContainerSummary;

/// Container data returned in listings
#[derive(Debug, Serialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContainerResponse {
    /// Container ID
    #[schema(example = "123456789abc")]
    pub id: String,
    /// Container names, each with a leading slash
    #[schema(example = json!(["/fake-nginx"]))]
    pub names: Vec<String>,
    /// Image the container runs
    #[schema(example = "nginx:latest")]
    pub image: String,
    /// Lifecycle state
    #[schema(example = "running")]
    pub state: String,
    /// Human-readable status
    #[schema(example = "Up 10 minutes")]
    pub status: String,
    /// Creation time as a Unix timestamp
    pub created: i64,
}

impl From<ContainerSummary> for ContainerResponse {
    fn from(c: ContainerSummary) -> Self {
        Self {
            id: c.id,
            names: c.names,
            image: c.image,
            state: c.state,
            status: c.status,
            created: c.created,
        }
    }
}

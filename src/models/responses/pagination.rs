//! Pagination response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::ContainerResponse;

/// Metadata describing the returned page
#[derive(Debug, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetaResponse {
    /// Kind of object listed
    #[schema(example = "Dockers")]
    pub object_name: String,
    /// Number of items available in total
    pub total_count: usize,
    /// Number of items in this page
    pub count: usize,
    /// 1-based position of the first item in this page
    pub offset: usize,
}

/// Paginated container list response
#[derive(Debug, Serialize, ToSchema)]
pub struct ContainerListResponse {
    pub meta: MetaResponse,
    pub data: Vec<ContainerResponse>,
}

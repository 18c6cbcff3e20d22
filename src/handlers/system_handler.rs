//! Service-level handlers: liveness, version, API document and the 404 fallback.

use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::config::Config;
use crate::constants::{CODE_RESOURCE_NOT_FOUND, ERR_RESOURCE_NOT_FOUND, MSG_PONG};
use crate::errors::ApiError;
use crate::models::{PingResponse, VersionResponse};
use crate::openapi::ApiDoc;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/ping",
    tag = "System",
    responses(
        (status = 200, description = "Service is up", body = PingResponse)
    )
)]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(PingResponse {
        message: MSG_PONG.to_string(),
    })
}

/// API version
#[utoipa::path(
    get,
    path = "/version",
    tag = "System",
    responses(
        (status = 200, description = "Configured API version", body = VersionResponse)
    )
)]
pub async fn version(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::Ok().json(VersionResponse {
        version: config.api_version.clone(),
    })
}

pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

pub async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound {
        code: CODE_RESOURCE_NOT_FOUND.to_string(),
        message: ERR_RESOURCE_NOT_FOUND.to_string(),
    })
}

//! Container handlers: listing, lifecycle, logs and resource usage.

use std::io;

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use futures::{future, stream, StreamExt};
use log::{debug, info, warn};
use validator::Validate;

use crate::config::Config;
use crate::constants::{
    CODE_CREATE_ERROR, CODE_LOGS_ERROR, CODE_LOGS_NOT_FOUND, CODE_RESOURCES_ERROR,
    CODE_SEARCH_BAD_REQUEST, CODE_SEARCH_ERROR, CODE_SEARCH_NOT_FOUND, CODE_START_ERROR,
    CODE_STOP_ERROR, ERR_NO_CONTAINERS, ERR_OFFSET_EXCEEDS_COUNT, MSG_CONTAINER_STARTED,
    MSG_CONTAINER_STOPPED, OBJECT_NAME_DOCKERS,
};
use crate::errors::ApiError;
use crate::models::{
    ContainerListQuery, ContainerListResponse, CreateContainerRequest, MessageResponse,
    MetaResponse,
};
use crate::runtime::{ContainerSpec, LogStream};
use crate::services::ContainerService;
use crate::utils::pagination::{self, PageError};
use crate::validators::validation_errors_to_api_error;

/// List containers with offset/count pagination
#[utoipa::path(
    get,
    path = "/v1/dockers",
    tag = "Dockers",
    params(ContainerListQuery),
    responses(
        (status = 200, description = "Page of containers", body = ContainerListResponse),
        (status = 400, description = "Malformed parameters or offset past the end", body = crate::models::ErrorResponse),
        (status = 404, description = "No containers", body = crate::models::ErrorResponse),
        (status = 500, description = "Container runtime failure", body = crate::models::ErrorResponse)
    )
)]
pub async fn list_containers(
    container_service: web::Data<ContainerService>,
    config: web::Data<Config>,
    query: web::Query<ContainerListQuery>,
) -> Result<HttpResponse, ApiError> {
    let offset = query.offset.unwrap_or(0);
    let count = query.count.unwrap_or(0);
    debug!("Listing containers (offset: {}, count: {})", offset, count);

    let containers = container_service
        .list()
        .await
        .map_err(|e| e.with_code(CODE_SEARCH_ERROR))?;

    let page = pagination::resolve(containers, offset, count, config.default_page_count)
        .map_err(|e| {
            warn!("Container listing rejected: {}", e);
            match e {
                PageError::Empty => ApiError::NotFound {
                    code: CODE_SEARCH_NOT_FOUND.to_string(),
                    message: ERR_NO_CONTAINERS.to_string(),
                },
                PageError::OffsetOutOfRange { .. } => ApiError::BadRequest {
                    code: CODE_SEARCH_BAD_REQUEST.to_string(),
                    message: ERR_OFFSET_EXCEEDS_COUNT.to_string(),
                },
            }
        })?;

    Ok(HttpResponse::Ok().json(ContainerListResponse {
        meta: MetaResponse {
            object_name: OBJECT_NAME_DOCKERS.to_string(),
            total_count: page.total_count,
            count: page.returned_count,
            offset: page.effective_offset,
        },
        data: page.items,
    }))
}

/// Stop a container
#[utoipa::path(
    post,
    path = "/v1/dockers/stop/{id}",
    tag = "Dockers",
    params(
        ("id" = String, Path, description = "Container ID or name")
    ),
    responses(
        (status = 200, description = "Container stopped", body = MessageResponse),
        (status = 500, description = "Container runtime failure", body = crate::models::ErrorResponse)
    )
)]
pub async fn stop_container(
    container_service: web::Data<ContainerService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let container_id = path.into_inner();
    container_service
        .stop(&container_id)
        .await
        .map_err(|e| e.with_code(CODE_STOP_ERROR))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(MSG_CONTAINER_STOPPED)))
}

/// Start a container
#[utoipa::path(
    post,
    path = "/v1/dockers/start/{id}",
    tag = "Dockers",
    params(
        ("id" = String, Path, description = "Container ID or name")
    ),
    responses(
        (status = 200, description = "Container started", body = MessageResponse),
        (status = 500, description = "Container runtime failure", body = crate::models::ErrorResponse)
    )
)]
pub async fn start_container(
    container_service: web::Data<ContainerService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let container_id = path.into_inner();
    container_service
        .start(&container_id)
        .await
        .map_err(|e| e.with_code(CODE_START_ERROR))?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(MSG_CONTAINER_STARTED)))
}

/// Create and start a container, then stream its logs
///
/// The image is pulled first when it is not present locally. The response is a
/// plain-text stream: a short header followed by the container output.
#[utoipa::path(
    put,
    path = "/v1/dockers/create/{name}",
    tag = "Dockers",
    params(
        ("name" = String, Path, description = "Name of the new container")
    ),
    request_body = CreateContainerRequest,
    responses(
        (status = 200, description = "Container started; body streams its logs", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request body", body = crate::models::ErrorResponse),
        (status = 500, description = "Container runtime failure", body = crate::models::ErrorResponse)
    )
)]
pub async fn create_container(
    container_service: web::Data<ContainerService>,
    path: web::Path<String>,
    body: web::Json<CreateContainerRequest>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    body.validate().map_err(|e| {
        let err = validation_errors_to_api_error(e);
        warn!("Create container {} rejected: {}", name, err);
        err
    })?;

    let req = body.into_inner();
    let spec = ContainerSpec {
        name,
        image: req.image,
        command: req.command,
        ports: req.ports,
    };

    container_service
        .ensure_image(&spec.image)
        .await
        .map_err(|e| e.with_code(CODE_CREATE_ERROR))?;
    let container_id = container_service
        .create(&spec)
        .await
        .map_err(|e| e.with_code(CODE_CREATE_ERROR))?;
    container_service
        .start(&container_id)
        .await
        .map_err(|e| e.with_code(CODE_START_ERROR))?;

    let header = format!(
        "Starting container...\nContainer ID: {}\nLogs:\n",
        container_id
    );
    let logs = container_service
        .logs(&container_id)
        .await
        .map_err(narrow_logs_error)?;
    let logs = log_body(&container_id, logs);
    let body = stream::once(future::ready(Ok(web::Bytes::from(header)))).chain(logs);

    info!("Streaming logs of new container {}", container_id);
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .streaming(body))
}

/// Stream the logs of a container
#[utoipa::path(
    get,
    path = "/v1/dockers/{id}/logs",
    tag = "Dockers",
    params(
        ("id" = String, Path, description = "Container ID or name")
    ),
    responses(
        (status = 200, description = "Container output, followed until the container exits", body = String, content_type = "text/plain"),
        (status = 404, description = "No such container", body = crate::models::ErrorResponse),
        (status = 500, description = "Container runtime failure", body = crate::models::ErrorResponse)
    )
)]
pub async fn container_logs(
    container_service: web::Data<ContainerService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let container_id = path.into_inner();
    debug!("Streaming logs of container {}", container_id);

    let logs = container_service
        .logs(&container_id)
        .await
        .map_err(narrow_logs_error)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .streaming(log_body(&container_id, logs)))
}

/// CPU and memory usage of a container
#[utoipa::path(
    get,
    path = "/v1/dockers/{id}/ressources",
    tag = "Dockers",
    params(
        ("id" = String, Path, description = "Container ID or name")
    ),
    responses(
        (status = 200, description = "Resource usage summary", body = String, content_type = "text/plain"),
        (status = 500, description = "Container runtime failure", body = crate::models::ErrorResponse)
    )
)]
pub async fn container_resources(
    container_service: web::Data<ContainerService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let container_id = path.into_inner();

    let stats = container_service
        .stats(&container_id)
        .await
        .map_err(|e| e.with_code(CODE_RESOURCES_ERROR))?;
    let name = container_service
        .container_name(&container_id)
        .await
        .map_err(|e| e.with_code(CODE_RESOURCES_ERROR))?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(format!(
            "Container: {}\nCPU: {:.2}%\nMemory: {} / {} ({:.2}%)",
            name,
            stats.cpu_percent,
            stats.memory_usage,
            stats.memory_limit,
            stats.memory_percent
        )))
}

fn narrow_logs_error(err: ApiError) -> ApiError {
    match err {
        ApiError::NotFound { .. } => err.with_code(CODE_LOGS_NOT_FOUND),
        err => err.with_code(CODE_LOGS_ERROR),
    }
}

/// Adapt runtime log lines into response body chunks.
///
/// An error after the first line ends the response; the client sees a
/// truncated body.
fn log_body(
    container_id: &str,
    logs: LogStream,
) -> impl futures::Stream<Item = Result<web::Bytes, io::Error>> + 'static {
    let container_id = container_id.to_string();
    logs.map(move |line| {
        line.map(web::Bytes::from).map_err(|err| {
            warn!("Log stream of container {} failed: {}", container_id, err);
            io::Error::other(err)
        })
    })
}

use utoipa::OpenApi;

use crate::models::{
    ContainerListResponse, ContainerResponse, CreateContainerRequest, ErrorResponse,
    MessageResponse, MetaResponse, PingResponse, VersionResponse,
};

/// OpenAPI documentation for the Docker administration API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docker Admin API",
        version = "1.0.0",
        description = "REST administration of Docker containers: listing with pagination, lifecycle operations, logs and resource usage.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "System", description = "Liveness and version endpoints"),
        (name = "Dockers", description = "Container listing, lifecycle, logs and resource usage")
    ),
    paths(
        crate::handlers::ping,
        crate::handlers::version,
        crate::handlers::list_containers,
        crate::handlers::stop_container,
        crate::handlers::start_container,
        crate::handlers::create_container,
        crate::handlers::container_logs,
        crate::handlers::container_resources
    ),
    components(
        schemas(
            CreateContainerRequest,
            ContainerResponse,
            ContainerListResponse,
            MetaResponse,
            MessageResponse,
            ErrorResponse,
            PingResponse,
            VersionResponse
        )
    )
)]
pub struct ApiDoc;

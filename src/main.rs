mod config;
mod constants;
mod errors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod routes;
mod runtime;
mod services;
mod utils;
mod validators;

use std::io;

use actix_web::{web, HttpServer};
use log::info;

use crate::config::Config;
use crate::services::ContainerService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load configuration and initialize the logger
    let config =
        Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    utils::logger::init(config.log_format);

    // Connect to Docker, or fall back to fake data
    let runtime = runtime::select(&config).await;
    info!("Using {} container runtime", runtime.describe());

    let container_service = web::Data::new(ContainerService::new(runtime, config.docker_timeout));

    // Start HTTP server
    let server_addr = config.bind_address();
    info!(
        "Starting server at http://{} (version {}, mode {})",
        server_addr,
        config.api_version,
        config.mode.as_deref().unwrap_or("dev")
    );
    let config = web::Data::new(config);

    HttpServer::new(move || routes::build_app(config.clone(), container_service.clone()))
        .bind(&server_addr)?
        .run()
        .await
}

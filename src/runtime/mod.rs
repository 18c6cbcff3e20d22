//! Container runtime abstraction.
//!
//! Handlers never talk to Docker directly: they go through
//! [`ContainerService`](crate::services::ContainerService), which holds one
//! shared [`ContainerRuntime`]. [`DockerRuntime`] forwards to the Docker
//! Engine API; [`FakeRuntime`] serves canned data when no daemon is reachable.

pub mod docker;
pub mod fake;

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use bollard::errors::Error as DockerError;
use futures::Stream;
use log::warn;

use crate::config::Config;
use crate::models::{ContainerSummary, RawStats};

pub use docker::DockerRuntime;
pub use fake::FakeRuntime;

/// Log lines of a container, in emission order.
pub type LogStream = Pin<Box<dyn Stream<Item = Result<String, DockerError>> + Send>>;

/// Everything needed to create a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    /// Host ports, each published on the same container TCP port.
    pub ports: Vec<String>,
}

#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Human-readable name for startup logs.
    fn describe(&self) -> &'static str;

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, DockerError>;

    async fn stop_container(&self, id: &str) -> Result<(), DockerError>;

    async fn start_container(&self, id: &str) -> Result<(), DockerError>;

    async fn image_exists(&self, image: &str) -> Result<bool, DockerError>;

    /// Pull `image` and wait until the registry transfer completes.
    async fn pull_image(&self, image: &str) -> Result<(), DockerError>;

    /// Returns the ID of the created container.
    async fn create_container(&self, spec: &ContainerSpec) -> Result<String, DockerError>;

    /// Follow stdout and stderr of a container until it exits or the stream is dropped.
    fn logs(&self, id: &str) -> LogStream;

    /// One stats sample, or `None` when the daemon returned nothing.
    async fn stats(&self, id: &str) -> Result<Option<RawStats>, DockerError>;

    /// Raw container name as reported by inspect (usually with a leading slash).
    async fn container_name(&self, id: &str) -> Result<String, DockerError>;
}

/// Pick the runtime for this process.
///
/// Falls back to [`FakeRuntime`] when fake mode is requested or the Docker
/// daemon cannot be reached within the configured timeout.
pub async fn select(config: &Config) -> Arc<dyn ContainerRuntime> {
    if config.docker_fake {
        warn!("DOCKER_FAKE is set, serving fake container data");
        return Arc::new(FakeRuntime::new());
    }

    match tokio::time::timeout(config.docker_timeout, DockerRuntime::connect()).await {
        Ok(Ok(runtime)) => Arc::new(runtime),
        Ok(Err(err)) => {
            warn!("Docker daemon unreachable ({}), serving fake container data", err);
            Arc::new(FakeRuntime::new())
        }
        Err(_) => {
            warn!(
                "Docker daemon did not answer within {:?}, serving fake container data",
                config.docker_timeout
            );
            Arc::new(FakeRuntime::new())
        }
    }
}

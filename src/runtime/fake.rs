//! Canned runtime used when Docker is disabled or unreachable.

use async_trait::async_trait;
use bollard::errors::Error as DockerError;
use futures::stream;
use log::warn;

use super::{ContainerRuntime, ContainerSpec, LogStream};
use crate::models::{ContainerSummary, RawStats};

#[derive(Debug, Clone, Default)]
pub struct FakeRuntime;

impl FakeRuntime {
    pub fn new() -> Self {
        Self
    }

    fn containers() -> Vec<ContainerSummary> {
        vec![
            ContainerSummary {
                id: "123456789abc".to_string(),
                names: vec!["/fake-nginx".to_string()],
                image: "nginx:latest".to_string(),
                state: "running".to_string(),
                status: "Up 10 minutes".to_string(),
                created: 0,
            },
            ContainerSummary {
                id: "987654321xyz".to_string(),
                names: vec!["/fake-redis".to_string()],
                image: "redis:latest".to_string(),
                state: "exited".to_string(),
                status: "Exited (0) 5 minutes ago".to_string(),
                created: 0,
            },
        ]
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    fn describe(&self) -> &'static str {
        "fake"
    }

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, DockerError> {
        warn!("Returning fake container data");
        Ok(Self::containers())
    }

    async fn stop_container(&self, _id: &str) -> Result<(), DockerError> {
        Ok(())
    }

    async fn start_container(&self, _id: &str) -> Result<(), DockerError> {
        Ok(())
    }

    async fn image_exists(&self, _image: &str) -> Result<bool, DockerError> {
        Ok(true)
    }

    async fn pull_image(&self, _image: &str) -> Result<(), DockerError> {
        Ok(())
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<String, DockerError> {
        Ok(format!("fake-{}", spec.name))
    }

    fn logs(&self, id: &str) -> LogStream {
        let lines = vec![
            Ok(format!("[fake] container {} started\n", id)),
            Ok(format!("[fake] container {} ready\n", id)),
        ];
        Box::pin(stream::iter(lines))
    }

    async fn stats(&self, _id: &str) -> Result<Option<RawStats>, DockerError> {
        Ok(Some(RawStats {
            memory_usage: 64 * 1024 * 1024,
            memory_limit: 512 * 1024 * 1024,
            ..Default::default()
        }))
    }

    async fn container_name(&self, id: &str) -> Result<String, DockerError> {
        Ok(format!("/fake-{}", id))
    }
}

//! Docker Engine backed runtime.

use std::collections::HashMap;

use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, InspectContainerOptions, ListContainersOptions, LogsOptions,
    StartContainerOptions, StatsOptions,
};
use bollard::errors::Error as DockerError;
use bollard::image::CreateImageOptions;
use bollard::models::{CreateImageInfo, HostConfig, PortBinding};
use bollard::Docker;
use futures::StreamExt;
use log::{debug, info};

use super::{ContainerRuntime, ContainerSpec, LogStream};
use crate::models::{ContainerSummary, RawStats};

#[derive(Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect with the local defaults (`DOCKER_HOST` or the platform socket)
    /// and make sure the daemon answers.
    pub async fn connect() -> Result<Self, DockerError> {
        let docker = Docker::connect_with_local_defaults()?.negotiate_version().await?;
        docker.ping().await?;
        Ok(Self { docker })
    }
}

/// Port bindings and exposed ports for `ports`, each bound to `0.0.0.0:<port>`.
fn port_config(
    ports: &[String],
) -> (
    HashMap<String, Option<Vec<PortBinding>>>,
    HashMap<String, HashMap<(), ()>>,
) {
    let mut bindings = HashMap::new();
    let mut exposed = HashMap::new();

    for port in ports {
        let key = format!("{}/tcp", port.trim());
        bindings.insert(
            key.clone(),
            Some(vec![PortBinding {
                host_ip: Some("0.0.0.0".to_string()),
                host_port: Some(port.trim().to_string()),
            }]),
        );
        exposed.insert(key, HashMap::new());
    }

    (bindings, exposed)
}

/// Status line of one pull progress item, or the error it carries.
fn pull_progress(progress: CreateImageInfo) -> Result<Option<String>, DockerError> {
    match progress.error {
        Some(error) => Err(DockerError::DockerStreamError { error }),
        None => Ok(progress.status),
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    fn describe(&self) -> &'static str {
        "docker"
    }

    async fn list_containers(&self) -> Result<Vec<ContainerSummary>, DockerError> {
        let containers = self
            .docker
            .list_containers(None::<ListContainersOptions<String>>)
            .await?;

        Ok(containers.into_iter().map(ContainerSummary::from).collect())
    }

    async fn stop_container(&self, id: &str) -> Result<(), DockerError> {
        self.docker.stop_container(id, None).await
    }

    async fn start_container(&self, id: &str) -> Result<(), DockerError> {
        self.docker
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
    }

    async fn image_exists(&self, image: &str) -> Result<bool, DockerError> {
        match self.docker.inspect_image(image).await {
            Ok(_) => Ok(true),
            Err(DockerError::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn pull_image(&self, image: &str) -> Result<(), DockerError> {
        let mut stream = self.docker.create_image(
            Some(CreateImageOptions {
                from_image: image,
                ..Default::default()
            }),
            None,
            None,
        );

        while let Some(result) = stream.next().await {
            if let Some(status) = pull_progress(result?)? {
                debug!("Pull {}: {}", image, status);
            }
        }

        info!("Pulled image {}", image);
        Ok(())
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<String, DockerError> {
        let (port_bindings, exposed_ports) = port_config(&spec.ports);

        let config = Config {
            image: Some(spec.image.clone()),
            cmd: (!spec.command.is_empty()).then(|| spec.command.clone()),
            exposed_ports: Some(exposed_ports),
            host_config: Some(HostConfig {
                port_bindings: Some(port_bindings),
                ..Default::default()
            }),
            ..Default::default()
        };

        let options = CreateContainerOptions {
            name: spec.name.as_str(),
            ..Default::default()
        };

        let response = self.docker.create_container(Some(options), config).await?;
        Ok(response.id)
    }

    fn logs(&self, id: &str) -> LogStream {
        let stream = self.docker.logs(
            id,
            Some(LogsOptions::<String> {
                follow: true,
                stdout: true,
                stderr: true,
                ..Default::default()
            }),
        );

        Box::pin(stream.map(|chunk| chunk.map(|output| output.to_string())))
    }

    async fn stats(&self, id: &str) -> Result<Option<RawStats>, DockerError> {
        let sample = self
            .docker
            .stats(
                id,
                Some(StatsOptions {
                    stream: false,
                    ..Default::default()
                }),
            )
            .next()
            .await
            .transpose()?;

        Ok(sample.map(|stats| RawStats {
            cpu_total_usage: stats.cpu_stats.cpu_usage.total_usage,
            precpu_total_usage: stats.precpu_stats.cpu_usage.total_usage,
            system_cpu_usage: stats.cpu_stats.system_cpu_usage.unwrap_or(0),
            presystem_cpu_usage: stats.precpu_stats.system_cpu_usage.unwrap_or(0),
            memory_usage: stats.memory_stats.usage.unwrap_or(0),
            memory_limit: stats.memory_stats.limit.unwrap_or(0),
        }))
    }

    async fn container_name(&self, id: &str) -> Result<String, DockerError> {
        let info = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await?;
        Ok(info.name.unwrap_or_default())
    }
}

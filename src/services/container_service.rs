//! Container service: the single entry point from handlers to the runtime.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bollard::errors::Error as DockerError;
use futures::{future, stream, StreamExt};
use log::{debug, error, info};

use crate::constants::{CODE_INTERNAL_ERROR, CODE_RESOURCE_NOT_FOUND, ERR_NO_STATS};
use crate::errors::ApiError;
use crate::models::{ContainerResponse, ContainerStats};
use crate::runtime::{ContainerRuntime, ContainerSpec, LogStream};

pub struct ContainerService {
    runtime: Arc<dyn ContainerRuntime>,
    timeout: Duration,
}

impl ContainerService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, timeout: Duration) -> Self {
        Self { runtime, timeout }
    }

    /// Await a runtime call, bounded by the configured timeout.
    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, DockerError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                error!("{} failed: {}", operation, err);
                Err(err.into())
            }
            Err(elapsed) => {
                error!("{} timed out after {:?}", operation, self.timeout);
                Err(elapsed.into())
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<ContainerResponse>, ApiError> {
        let containers = self
            .bounded("list containers", self.runtime.list_containers())
            .await?;
        debug!("Runtime returned {} containers", containers.len());
        Ok(containers.into_iter().map(ContainerResponse::from).collect())
    }

    pub async fn stop(&self, id: &str) -> Result<(), ApiError> {
        self.bounded("stop container", self.runtime.stop_container(id))
            .await?;
        info!("Stopped container {}", id);
        Ok(())
    }

    pub async fn start(&self, id: &str) -> Result<(), ApiError> {
        self.bounded("start container", self.runtime.start_container(id))
            .await?;
        info!("Started container {}", id);
        Ok(())
    }

    /// Pull `image` unless it is already present locally.
    ///
    /// The transfer itself is not bounded by the call timeout; dropping the
    /// request cancels it.
    pub async fn ensure_image(&self, image: &str) -> Result<(), ApiError> {
        if self
            .bounded("inspect image", self.runtime.image_exists(image))
            .await?
        {
            info!("Image {} found locally", image);
            return Ok(());
        }

        info!("Pulling image: {}", image);
        self.runtime.pull_image(image).await.map_err(|err| {
            error!("pull image {} failed: {}", image, err);
            ApiError::InternalServerError {
                code: CODE_INTERNAL_ERROR.to_string(),
                message: format!("failed to pull image: {}", err),
            }
        })
    }

    /// Create a container and return its ID.
    pub async fn create(&self, spec: &ContainerSpec) -> Result<String, ApiError> {
        let id = self
            .bounded("create container", self.runtime.create_container(spec))
            .await?;
        info!("Created container {} ({}) from {}", spec.name, id, spec.image);
        Ok(id)
    }

    /// Open the log stream of a container.
    ///
    /// The first item is awaited, up to the call timeout, so that a stream
    /// failing straight away surfaces as an error before any response is sent.
    /// A container that stays silent past the timeout still gets its stream.
    pub async fn logs(&self, id: &str) -> Result<LogStream, ApiError> {
        let mut logs = self.runtime.logs(id);

        match tokio::time::timeout(self.timeout, logs.next()).await {
            Ok(Some(Ok(first))) => Ok(Box::pin(
                stream::once(future::ready(Ok(first))).chain(logs),
            )),
            Ok(Some(Err(err))) => {
                error!("container logs {} failed: {}", id, err);
                Err(log_stream_error(err))
            }
            Ok(None) => Ok(Box::pin(stream::empty())),
            Err(_) => {
                debug!("Container {} silent for {:?}, streaming anyway", id, self.timeout);
                Ok(logs)
            }
        }
    }

    pub async fn stats(&self, id: &str) -> Result<ContainerStats, ApiError> {
        let raw = self
            .bounded("container stats", self.runtime.stats(id))
            .await?
            .ok_or_else(|| ApiError::InternalServerError {
                code: CODE_INTERNAL_ERROR.to_string(),
                message: format!("{} {}", ERR_NO_STATS, id),
            })?;
        Ok(raw.into())
    }

    /// Container name without the leading slash Docker prefixes it with.
    pub async fn container_name(&self, id: &str) -> Result<String, ApiError> {
        let name = self
            .bounded("inspect container", self.runtime.container_name(id))
            .await?;
        Ok(name.trim_start_matches('/').to_string())
    }
}

/// An unknown container is a `404`; anything else the runtime reports is a `500`.
fn log_stream_error(err: DockerError) -> ApiError {
    match err {
        DockerError::DockerResponseServerError {
            status_code: 404,
            message,
        } => ApiError::NotFound {
            code: CODE_RESOURCE_NOT_FOUND.to_string(),
            message,
        },
        err => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContainerSummary, RawStats};
    use crate::runtime::FakeRuntime;
    use async_trait::async_trait;

    /// Runtime whose calls never complete.
    struct HangingRuntime;

    #[async_trait]
    impl ContainerRuntime for HangingRuntime {
        fn describe(&self) -> &'static str {
            "hanging"
        }

        async fn list_containers(&self) -> Result<Vec<ContainerSummary>, DockerError> {
            futures::future::pending().await
        }

        async fn stop_container(&self, _id: &str) -> Result<(), DockerError> {
            futures::future::pending().await
        }

        async fn start_container(&self, _id: &str) -> Result<(), DockerError> {
            futures::future::pending().await
        }

        async fn image_exists(&self, _image: &str) -> Result<bool, DockerError> {
            futures::future::pending().await
        }

        async fn pull_image(&self, _image: &str) -> Result<(), DockerError> {
            futures::future::pending().await
        }

        async fn create_container(&self, _spec: &ContainerSpec) -> Result<String, DockerError> {
            futures::future::pending().await
        }

        fn logs(&self, _id: &str) -> LogStream {
            Box::pin(futures::stream::pending())
        }

        async fn stats(&self, _id: &str) -> Result<Option<RawStats>, DockerError> {
            Ok(None)
        }

        async fn container_name(&self, _id: &str) -> Result<String, DockerError> {
            futures::future::pending().await
        }
    }

    fn fake_service() -> ContainerService {
        ContainerService::new(Arc::new(FakeRuntime::new()), Duration::from_secs(1))
    }

    #[actix_web::test]
    async fn test_list_maps_summaries() {
        let containers = fake_service().list().await.unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].names, vec!["/fake-nginx".to_string()]);
    }

    #[actix_web::test]
    async fn test_container_name_strips_slash() {
        let name = fake_service().container_name("abc").await.unwrap();
        assert_eq!(name, "fake-abc");
    }

    #[actix_web::test]
    async fn test_timeout_becomes_internal_error() {
        let service = ContainerService::new(Arc::new(HangingRuntime), Duration::from_millis(20));
        let err = service.list().await.unwrap_err();
        assert!(matches!(err, ApiError::InternalServerError { .. }));
    }

    #[actix_web::test]
    async fn test_missing_stats_is_internal_error() {
        let service = ContainerService::new(Arc::new(HangingRuntime), Duration::from_millis(20));
        let err = service.stats("abc").await.unwrap_err();
        assert!(err.to_string().contains(ERR_NO_STATS));
    }

    #[actix_web::test]
    async fn test_logs_keep_first_line() {
        let lines: Vec<String> = fake_service()
            .logs("abc")
            .await
            .unwrap()
            .map(|line| line.unwrap())
            .collect()
            .await;
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[fake] container abc started"));
    }

    #[actix_web::test]
    async fn test_silent_logs_still_stream() {
        let service = ContainerService::new(Arc::new(HangingRuntime), Duration::from_millis(20));
        assert!(service.logs("abc").await.is_ok());
    }

    #[test]
    fn test_log_stream_error_status() {
        let missing = log_stream_error(DockerError::DockerResponseServerError {
            status_code: 404,
            message: "No such container: nope".to_string(),
        });
        assert!(matches!(missing, ApiError::NotFound { ref message, .. } if message.contains("nope")));

        let broken = log_stream_error(DockerError::DockerResponseServerError {
            status_code: 500,
            message: "daemon exploded".to_string(),
        });
        assert!(matches!(broken, ApiError::InternalServerError { .. }));
    }
}

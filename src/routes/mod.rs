use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{web, App};

use crate::config::Config;
use crate::constants::{
    CODE_CREATE_BAD_REQUEST, CODE_INVALID_FORMAT, ERR_INVALID_QUERY, ERR_INVALID_REQUEST_FORMAT,
};
use crate::errors::ApiError;
use crate::handlers;
use crate::middleware::CorsMiddleware;
use crate::services::ContainerService;

/// Build the application with its shared state, middleware and routes.
pub fn build_app(
    config: web::Data<Config>,
    container_service: web::Data<ContainerService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = CorsMiddleware::new(&config.allow_origin);

    App::new()
        .wrap(cors)
        .wrap(Logger::default())
        .app_data(config)
        .app_data(container_service)
        .configure(configure_routes)
        .default_service(web::to(handlers::not_found))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .app_data(json_config())
        .route("/ping", web::get().to(handlers::ping))
        .route("/version", web::get().to(handlers::version))
        .route(
            "/api-docs/openapi.json",
            web::get().to(handlers::openapi_json),
        )
        .service(
            web::scope("/v1").service(
                web::scope("/dockers")
                    // Paginated listing
                    .route("", web::get().to(handlers::list_containers))
                    // Lifecycle
                    .route("/stop/{id}", web::post().to(handlers::stop_container))
                    .route("/start/{id}", web::post().to(handlers::start_container))
                    .route("/create/{name}", web::put().to(handlers::create_container))
                    // Observation
                    .route("/{id}/logs", web::get().to(handlers::container_logs))
                    .route(
                        "/{id}/ressources",
                        web::get().to(handlers::container_resources),
                    ),
            ),
        );
}

/// Malformed query strings become `400` responses in the API error format.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest {
            code: CODE_INVALID_FORMAT.to_string(),
            message: format!("{}: {}", ERR_INVALID_QUERY, err),
        }
        .into()
    })
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest {
            code: CODE_CREATE_BAD_REQUEST.to_string(),
            message: format!("{}: {}", ERR_INVALID_REQUEST_FORMAT, err),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::http::{Method, StatusCode};
    use actix_web::test;
    use async_trait::async_trait;
    use bollard::errors::Error as DockerError;
    use serde_json::{json, Value};

    use super::*;
    use crate::models::{ContainerSummary, RawStats};
    use crate::runtime::{ContainerRuntime, ContainerSpec, FakeRuntime, LogStream};

    const ALL_CALLS: &[&str] = &[
        "list", "stop", "start", "image", "pull", "create", "logs", "stats", "name",
    ];

    /// Runtime serving a fixed container list, failing the named calls.
    struct StubRuntime {
        containers: Vec<ContainerSummary>,
        failing: Vec<&'static str>,
        image_present: bool,
    }

    impl StubRuntime {
        fn with(n: usize) -> Self {
            let containers = (0..n)
                .map(|i| ContainerSummary {
                    id: format!("c{}", i),
                    names: vec![format!("/container-{}", i)],
                    state: "running".to_string(),
                    ..Default::default()
                })
                .collect();
            Self {
                containers,
                failing: Vec::new(),
                image_present: true,
            }
        }

        fn failing() -> Self {
            Self::failing_at(ALL_CALLS)
        }

        fn failing_at(calls: &[&'static str]) -> Self {
            Self {
                failing: calls.to_vec(),
                ..Self::with(0)
            }
        }

        fn without_image(mut self) -> Self {
            self.image_present = false;
            self
        }

        fn answer<T>(&self, call: &str, value: T) -> Result<T, DockerError> {
            if self.failing.contains(&call) {
                Err(DockerError::DockerResponseServerError {
                    status_code: 500,
                    message: format!("daemon exploded during {}", call),
                })
            } else {
                Ok(value)
            }
        }
    }

    #[async_trait]
    impl ContainerRuntime for StubRuntime {
        fn describe(&self) -> &'static str {
            "stub"
        }

        async fn list_containers(&self) -> Result<Vec<ContainerSummary>, DockerError> {
            self.answer("list", self.containers.clone())
        }

        async fn stop_container(&self, _id: &str) -> Result<(), DockerError> {
            self.answer("stop", ())
        }

        async fn start_container(&self, _id: &str) -> Result<(), DockerError> {
            self.answer("start", ())
        }

        async fn image_exists(&self, _image: &str) -> Result<bool, DockerError> {
            self.answer("image", self.image_present)
        }

        async fn pull_image(&self, _image: &str) -> Result<(), DockerError> {
            self.answer("pull", ())
        }

        async fn create_container(&self, spec: &ContainerSpec) -> Result<String, DockerError> {
            self.answer("create", format!("id-{}", spec.name))
        }

        fn logs(&self, id: &str) -> LogStream {
            if self.failing.contains(&"logs") {
                let missing = DockerError::DockerResponseServerError {
                    status_code: 404,
                    message: format!("No such container: {}", id),
                };
                return Box::pin(futures::stream::once(async move {
                    Err::<String, _>(missing)
                }));
            }
            Box::pin(futures::stream::iter(vec![Ok(format!("{} says hi\n", id))]))
        }

        async fn stats(&self, _id: &str) -> Result<Option<RawStats>, DockerError> {
            self.answer(
                "stats",
                Some(RawStats {
                    memory_usage: 64 * 1024 * 1024,
                    memory_limit: 256 * 1024 * 1024,
                    ..Default::default()
                }),
            )
        }

        async fn container_name(&self, id: &str) -> Result<String, DockerError> {
            self.answer("name", format!("/{}", id))
        }
    }

    fn state(
        runtime: Arc<dyn ContainerRuntime>,
    ) -> (web::Data<Config>, web::Data<ContainerService>) {
        let config = Config {
            allow_origin: "http://admin.local".to_string(),
            api_version: "1.2.3".to_string(),
            ..Config::default()
        };
        let service = ContainerService::new(runtime, Duration::from_secs(1));
        (web::Data::new(config), web::Data::new(service))
    }

    async fn get_json(runtime: Arc<dyn ContainerRuntime>, uri: &str) -> (StatusCode, Value) {
        let (config, service) = state(runtime);
        let app = test::init_service(build_app(config, service)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_list_default_page() {
        let (status, body) = get_json(Arc::new(StubRuntime::with(10)), "/v1/dockers").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["meta"],
            json!({"objectName": "Dockers", "totalCount": 10, "count": 10, "offset": 1})
        );
        assert_eq!(body["data"].as_array().unwrap().len(), 10);
    }

    #[actix_web::test]
    async fn test_list_offset_and_count() {
        let (status, body) = get_json(
            Arc::new(StubRuntime::with(10)),
            "/v1/dockers?offset=5&count=3",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["offset"], 5);
        assert_eq!(body["meta"]["count"], 3);
        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["c4", "c5", "c6"]);
    }

    #[actix_web::test]
    async fn test_list_offset_past_end() {
        let (status, body) = get_json(
            Arc::new(StubRuntime::with(10)),
            "/v1/dockers?offset=20&count=5",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "container.Search.BadRequest");
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_list_malformed_query() {
        let (status, body) = get_json(
            Arc::new(StubRuntime::with(10)),
            "/v1/dockers?offset=abc",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_FORMAT");
    }

    #[actix_web::test]
    async fn test_list_empty() {
        let (status, body) = get_json(Arc::new(StubRuntime::with(0)), "/v1/dockers").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "container.Search.NotFound");
    }

    #[actix_web::test]
    async fn test_list_runtime_failure_stops_processing() {
        let (status, body) = get_json(Arc::new(StubRuntime::failing()), "/v1/dockers").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "container.Search.Error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("daemon exploded"));
    }

    #[actix_web::test]
    async fn test_list_fake_runtime() {
        let (status, body) = get_json(Arc::new(FakeRuntime::new()), "/v1/dockers?count=1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["totalCount"], 2);
        assert_eq!(body["data"][0]["names"][0], "/fake-nginx");
    }

    #[actix_web::test]
    async fn test_stop_and_start() {
        let (config, service) = state(Arc::new(FakeRuntime::new()));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::post()
            .uri("/v1/dockers/stop/123456789abc")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "The container was stopped");

        let req = test::TestRequest::post()
            .uri("/v1/dockers/start/123456789abc")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "The container was started");
    }

    #[actix_web::test]
    async fn test_stop_runtime_failure() {
        let (config, service) = state(Arc::new(StubRuntime::failing()));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::post()
            .uri("/v1/dockers/stop/abc")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "container.Stop.Error");
    }

    #[actix_web::test]
    async fn test_start_runtime_failure() {
        let (config, service) = state(Arc::new(StubRuntime::failing()));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::post()
            .uri("/v1/dockers/start/abc")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "container.Start.Error");
    }

    async fn create_with(runtime: StubRuntime) -> (StatusCode, Value) {
        let (config, service) = state(Arc::new(runtime));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::put()
            .uri("/v1/dockers/create/web")
            .set_json(json!({"image": "nginx:latest"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_create_runtime_failures() {
        let cases = [
            (StubRuntime::failing_at(&["image"]), "image"),
            (StubRuntime::failing_at(&["pull"]).without_image(), "pull"),
            (StubRuntime::failing_at(&["create"]), "create"),
        ];

        for (runtime, failing) in cases {
            let (status, body) = create_with(runtime).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", failing);
            assert_eq!(body["code"], "container.Create.Error", "{}", failing);
            assert!(body["message"].as_str().unwrap().contains(failing));
        }
    }

    #[actix_web::test]
    async fn test_create_start_failure() {
        let (status, body) = create_with(StubRuntime::failing_at(&["start"])).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "container.Start.Error");
    }

    #[actix_web::test]
    async fn test_create_pulls_missing_image() {
        let (config, service) = state(Arc::new(StubRuntime::with(0).without_image()));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::put()
            .uri("/v1/dockers/create/web")
            .set_json(json!({"image": "nginx:latest"}))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.starts_with("Starting container...\nContainer ID: id-web\nLogs:\n"));
        assert!(text.ends_with("id-web says hi\n"));
    }

    #[actix_web::test]
    async fn test_create_rejects_blank_image() {
        let (config, service) = state(Arc::new(FakeRuntime::new()));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::put()
            .uri("/v1/dockers/create/web")
            .set_json(json!({"image": "   "}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["errors"], json!(["Image is required"]));
    }

    #[actix_web::test]
    async fn test_create_streams_header_and_logs() {
        let (config, service) = state(Arc::new(FakeRuntime::new()));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::put()
            .uri("/v1/dockers/create/web")
            .set_json(json!({"image": "nginx:latest", "ports": ["8080"]}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.starts_with("Starting container...\nContainer ID: fake-web\nLogs:\n"));
        assert!(text.contains("[fake] container fake-web started"));
    }

    #[actix_web::test]
    async fn test_create_rejects_invalid_body() {
        let (config, service) = state(Arc::new(FakeRuntime::new()));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::put()
            .uri("/v1/dockers/create/web")
            .set_json(json!({"image": "", "ports": ["http"]}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);

        let req = test::TestRequest::put()
            .uri("/v1/dockers/create/web")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "container.Create.BadRequest");
    }

    #[actix_web::test]
    async fn test_resources_text() {
        let (config, service) = state(Arc::new(FakeRuntime::new()));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::get()
            .uri("/v1/dockers/abc/ressources")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(
            std::str::from_utf8(&body).unwrap(),
            "Container: fake-abc\nCPU: 0.00%\nMemory: 64.00 MiB / 512.00 MiB (12.50%)"
        );
    }

    #[actix_web::test]
    async fn test_resources_runtime_failure() {
        for failing in ["stats", "name"] {
            let (status, body) = get_json(
                Arc::new(StubRuntime::failing_at(&[failing])),
                "/v1/dockers/abc/ressources",
            )
            .await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["code"], "container.Resources.Error");
            assert!(body["message"].as_str().unwrap().contains(failing));
        }
    }

    #[actix_web::test]
    async fn test_logs_stream() {
        let (config, service) = state(Arc::new(FakeRuntime::new()));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::get()
            .uri("/v1/dockers/abc/logs")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[actix_web::test]
    async fn test_logs_of_unknown_container() {
        let (status, body) = get_json(
            Arc::new(StubRuntime::failing_at(&["logs"])),
            "/v1/dockers/nope/logs",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "container.Logs.NotFound");
        assert!(body["message"].as_str().unwrap().contains("nope"));
    }

    #[actix_web::test]
    async fn test_ping_version_and_fallback() {
        let (status, body) = get_json(Arc::new(FakeRuntime::new()), "/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");

        let (status, body) = get_json(Arc::new(FakeRuntime::new()), "/version").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], "1.2.3");

        let (status, body) = get_json(Arc::new(FakeRuntime::new()), "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "Ressource.NotFound");
    }

    #[actix_web::test]
    async fn test_cors_on_app() {
        let (config, service) = state(Arc::new(FakeRuntime::new()));
        let app = test::init_service(build_app(config, service)).await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/v1/dockers")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get("access-control-allow-origin").unwrap(),
            "http://admin.local"
        );
    }

    #[actix_web::test]
    async fn test_openapi_document_served() {
        let (status, body) =
            get_json(Arc::new(FakeRuntime::new()), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/v1/dockers"].is_object());
    }
}

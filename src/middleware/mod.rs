use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{
            HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_EXPOSE_HEADERS,
        },
        Method,
    },
    Error, HttpResponse,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use log::warn;
use std::rc::Rc;

const ALLOW_METHODS: &str = "POST, GET, OPTIONS, PUT, DELETE, UPDATE, PATCH";
const ALLOW_HEADERS: &str =
    "Origin, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

/// Adds the CORS headers to every response and answers preflight
/// `OPTIONS` requests directly.
pub struct CorsMiddleware {
    allow_origin: Rc<str>,
}

impl CorsMiddleware {
    pub fn new(allow_origin: &str) -> Self {
        Self {
            allow_origin: Rc::from(allow_origin),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CorsMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(CorsMiddlewareService {
            service: Rc::new(service),
            allow_origin: Rc::clone(&self.allow_origin),
        })
    }
}

pub struct CorsMiddlewareService<S> {
    service: Rc<S>,
    allow_origin: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for CorsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let allow_origin = Rc::clone(&self.allow_origin);

        Box::pin(async move {
            // Preflight requests never reach routing
            if req.method() == Method::OPTIONS {
                let mut res = req
                    .into_response(HttpResponse::Ok().finish())
                    .map_into_right_body();
                apply_cors_headers(res.headers_mut(), &allow_origin);
                return Ok(res);
            }

            let mut res = service.call(req).await?.map_into_left_body();
            apply_cors_headers(res.headers_mut(), &allow_origin);
            Ok(res)
        })
    }
}

fn apply_cors_headers(headers: &mut HeaderMap, allow_origin: &str) {
    if let Ok(origin) = HeaderValue::from_str(allow_origin) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    } else {
        warn!("ALLOW_ORIGIN is not a valid header value: {:?}", allow_origin);
    }
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("Content-Length"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}

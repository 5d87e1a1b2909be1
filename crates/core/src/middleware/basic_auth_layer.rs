use std::{
    future::{ready, Future},
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{http::Request, response::Response};
use tower::{Layer, Service};

use crate::{
    authentication::{Decision, Interceptor},
    middleware::unauthorized::{challenge_response, DefaultUnauthorizedHandler, UnauthorizedHandler},
};

/// Tower layer applying the Basic auth check in front of any `http` service.
#[derive(Clone)]
pub struct BasicAuthLayer {
    interceptor: Interceptor,
    handler: Arc<dyn UnauthorizedHandler>,
}

impl BasicAuthLayer {
    pub fn new(interceptor: Interceptor) -> Self {
        Self { interceptor, handler: Arc::new(DefaultUnauthorizedHandler) }
    }

    pub fn with_unauthorized_handler(mut self, handler: impl UnauthorizedHandler) -> Self {
        self.handler = Arc::new(handler);
        self
    }
}

impl<S> Layer<S> for BasicAuthLayer {
    type Service = BasicAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BasicAuthService {
            inner,
            interceptor: self.interceptor.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

#[derive(Clone)]
pub struct BasicAuthService<S> {
    inner: S,
    interceptor: Interceptor,
    handler: Arc<dyn UnauthorizedHandler>,
}

impl<S, B> Service<Request<B>> for BasicAuthService<S>
where
    S: Service<Request<B>, Response = Response>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        match self.interceptor.check(&req) {
            Decision::Continue => Box::pin(self.inner.call(req)),
            Decision::Reject(verdict) => {
                let (parts, _body) = req.into_parts();
                let response = challenge_response(self.handler.as_ref(), &parts, verdict);
                Box::pin(ready(Ok::<_, S::Error>(response)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authentication::{BasicAuthCredentials, RuleSet, User, UserMatchPolicy};
    use axum::{
        body::Body,
        http::{self, header::WWW_AUTHENTICATE, StatusCode},
        routing::{delete, get, post},
        Router,
    };
    use tower::ServiceExt;

    fn restrict_by_url_router() -> Router {
        let interceptor = Interceptor::new(
            RuleSet::new(false, Vec::<String>::new(), ["/user/create", "/user/{id}", "/admin/*"]),
            vec![User::new("UserName1", "Password1")],
            UserMatchPolicy::AnyUser,
        );

        Router::new()
            .route("/user/create", post(|| async { "created" }))
            .route("/user/{id}", get(|| async { "user" }).delete(|| async { "deleted" }))
            .route("/admin/create", post(|| async { "admin created" }))
            .route("/admin/{id}", get(|| async { "admin" }).delete(|| async { "admin deleted" }))
            .route("/openurl", get(|| async { "open" }))
            .route("/administrator", delete(|| async { "administrator" }))
            .layer(BasicAuthLayer::new(interceptor))
    }

    fn request(method: &str, uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = http::Request::builder().method(method).uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header("Authorization", authorization);
        }
        builder.body(Body::empty()).unwrap()
    }

    const RESTRICTED: [(&str, &str); 7] = [
        ("POST", "/user/create"),
        ("DELETE", "/user/12"),
        ("GET", "/user/12"),
        ("POST", "/admin/create"),
        ("DELETE", "/admin/10"),
        ("GET", "/admin/10"),
        ("DELETE", "/administrator"),
    ];

    #[tokio::test]
    async fn test_restricted_urls_without_header_are_rejected() {
        for (method, uri) in RESTRICTED {
            let response =
                restrict_by_url_router().oneshot(request(method, uri, None)).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
            assert_eq!(
                response.headers().get(WWW_AUTHENTICATE).unwrap(),
                "Basic realm=Authorization Required"
            );
        }
    }

    #[tokio::test]
    async fn test_restricted_urls_with_valid_header_pass() {
        let header = BasicAuthCredentials::encode_header("UserName1", "Password1");

        for (method, uri) in RESTRICTED {
            let response =
                restrict_by_url_router().oneshot(request(method, uri, Some(&header))).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{} {}", method, uri);
        }
    }

    #[tokio::test]
    async fn test_open_url_passes_with_or_without_header() {
        let header = BasicAuthCredentials::encode_header("UserName1", "Password1");

        for authorization in [None, Some(header.as_str()), Some("garbage")] {
            let response = restrict_by_url_router()
                .oneshot(request("GET", "/openurl", authorization))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_non_base64_payload_is_rejected() {
        let response = restrict_by_url_router()
            .oneshot(request("GET", "/admin/10", Some("Basic ***")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_layer_wraps_plain_service() {
        let interceptor = Interceptor::new(
            RuleSet::new(true, Vec::<String>::new(), Vec::<String>::new()),
            vec![User::new("user", "password")],
            UserMatchPolicy::EveryUser,
        );
        let service = BasicAuthLayer::new(interceptor).layer(tower::service_fn(
            |_req: Request<Body>| async {
                Ok::<_, std::convert::Infallible>(Response::new(Body::empty()))
            },
        ));

        let rejected = service.clone().oneshot(request("GET", "/", None)).await.unwrap();
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

        let header = BasicAuthCredentials::encode_header("user", "password");
        let accepted = service.oneshot(request("GET", "/hi", Some(&header))).await.unwrap();
        assert_eq!(accepted.status(), StatusCode::OK);
    }
}

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    authentication::{Decision, Interceptor},
    middleware::unauthorized::{challenge_response, DefaultUnauthorizedHandler, UnauthorizedHandler},
};

/// State for [`basic_auth_guard`], mounted with `middleware::from_fn_with_state`.
#[derive(Clone)]
pub struct AuthGuardState {
    interceptor: Interceptor,
    handler: Arc<dyn UnauthorizedHandler>,
}

impl AuthGuardState {
    pub fn new(interceptor: Interceptor) -> Self {
        Self { interceptor, handler: Arc::new(DefaultUnauthorizedHandler) }
    }

    pub fn with_unauthorized_handler(mut self, handler: impl UnauthorizedHandler) -> Self {
        self.handler = Arc::new(handler);
        self
    }

    pub fn interceptor(&self) -> &Interceptor {
        &self.interceptor
    }
}

/// Basic auth middleware for axum routers.
///
/// Requests that pass the configured rules go to the next handler untouched. Rejected
/// requests never reach it: the unauthorized handler writes the response and the
/// `WWW-Authenticate` challenge is added to it.
///
/// # Example
/// ```rust,ignore
/// let guard = AuthGuardState::new(Interceptor::from_config(&config));
/// let app = Router::new()
///     .route("/admin/{id}", get(admin))
///     .layer(middleware::from_fn_with_state(guard, basic_auth_guard));
/// ```
pub async fn basic_auth_guard(
    State(state): State<AuthGuardState>,
    req: Request,
    next: Next,
) -> Response {
    match state.interceptor.check(&req) {
        Decision::Continue => next.run(req).await,
        Decision::Reject(verdict) => {
            let (parts, _body) = req.into_parts();
            challenge_response(state.handler.as_ref(), &parts, verdict)
        }
    }
}

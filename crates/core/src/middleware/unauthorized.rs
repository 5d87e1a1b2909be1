use axum::{
    http::{header::WWW_AUTHENTICATE, request::Parts, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::{
    authentication::{Verdict, WWW_AUTHENTICATE_CHALLENGE},
    shared::unauthorized,
};

/// Writes the response for a request that failed the Basic auth check.
///
/// Supplied by whoever mounts the middleware. The `WWW-Authenticate` challenge is
/// always set on whatever response the handler returns.
pub trait UnauthorizedHandler: Send + Sync + 'static {
    fn on_unauthorized(&self, parts: &Parts, verdict: Verdict) -> Response;
}

impl<F> UnauthorizedHandler for F
where
    F: Fn(&Parts, Verdict) -> Response + Send + Sync + 'static,
{
    fn on_unauthorized(&self, parts: &Parts, verdict: Verdict) -> Response {
        self(parts, verdict)
    }
}

/// Answers `401 Unauthorized` with a plain text body.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUnauthorizedHandler;

impl UnauthorizedHandler for DefaultUnauthorizedHandler {
    fn on_unauthorized(&self, _parts: &Parts, _verdict: Verdict) -> Response {
        unauthorized(None).into_response()
    }
}

pub(crate) fn challenge_response(
    handler: &dyn UnauthorizedHandler,
    parts: &Parts,
    verdict: Verdict,
) -> Response {
    let mut response = handler.on_unauthorized(parts, verdict);
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static(WWW_AUTHENTICATE_CHALLENGE));
    response
}

use axum::http::StatusCode;

pub type HttpError = (StatusCode, String);

pub fn unauthorized(message: Option<String>) -> HttpError {
    (StatusCode::UNAUTHORIZED, message.unwrap_or("Unauthorized".to_string()))
}

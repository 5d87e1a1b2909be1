use std::{path::Path, time::Instant};

use axum::{
    extract::Request,
    http::{HeaderValue, Method, Uri},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info, warn};

use crate::{
    authentication::Interceptor,
    load_env_from_project_path,
    middleware::{basic_auth_guard, AuthGuardState},
    read,
    shared::HttpError,
    yaml::{ApiConfig, ReadYamlError, CONFIG_FILE_NAME},
};

#[derive(Error, Debug)]
pub enum StartError {
    #[error("Failed to find {0} in the project directory")]
    NoYamlFileFound(String),

    #[error("{0}")]
    ReadYamlError(#[from] ReadYamlError),

    #[error("Failed to start the API: {0}")]
    ApiStartupError(#[from] std::io::Error),
}

/// Health check endpoint
async fn health_check() -> Result<Json<String>, HttpError> {
    Ok(Json("healthy".to_string()))
}

#[derive(Debug, Serialize)]
struct EchoResponse {
    method: String,
    path: String,
}

/// Answers every other route, so any path can be tried against the rules.
async fn echo(method: Method, uri: Uri) -> Json<EchoResponse> {
    Json(EchoResponse { method: method.to_string(), path: uri.path().to_string() })
}

/// Middleware that logs all HTTP requests and responses with timing information.
async fn activity_logger(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let duration = start.elapsed();

    if status.is_server_error() {
        error!("{} {} responded with {} after {:?}", method, uri, status, duration);
    } else if status.is_client_error() {
        warn!("{} {} responded with {} after {:?}", method, uri, status, duration);
    } else {
        info!("{} {} responded with {} after {:?}", method, uri, status, duration);
    }

    response
}

fn cors_layer(api_config: &ApiConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(
            if api_config.allowed_origins.as_ref().is_none_or(|origins| origins.is_empty()) {
                AllowOrigin::any()
            } else {
                AllowOrigin::list(
                    api_config
                        .allowed_origins
                        .clone()
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|origin| HeaderValue::from_str(&origin).ok())
                        .collect::<Vec<HeaderValue>>(),
                )
            },
        )
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Builds the demo router: `/health` plus an echo fallback, all behind the guard.
pub fn create_router(interceptor: Interceptor, api_config: &ApiConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback(echo)
        .layer(middleware::from_fn_with_state(AuthGuardState::new(interceptor), basic_auth_guard))
        .layer(middleware::from_fn(activity_logger))
        .layer(cors_layer(api_config))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for the shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping the server");
}

pub async fn start(project_path: &Path) -> Result<(), StartError> {
    load_env_from_project_path(project_path);

    let yaml_path = project_path.join(CONFIG_FILE_NAME);
    if !yaml_path.exists() {
        error!("Could not find {} in {}", CONFIG_FILE_NAME, project_path.display());
        return Err(StartError::NoYamlFileFound(CONFIG_FILE_NAME.to_string()));
    }

    let config = read(&yaml_path, false)?;
    let interceptor = Interceptor::from_config(&config);

    let rules = interceptor.rules();
    info!(
        "Loaded {} user(s), require_auth_for_all: {}, {} restricted method(s), {} restricted url(s)",
        interceptor.users().len(),
        rules.require_auth_for_all(),
        rules.restricted_methods().len(),
        rules.restricted_urls().len()
    );
    if rules.is_empty() {
        warn!("No restrictions configured, every request will be allowed");
    }

    let app = create_router(interceptor, &config.api_config);

    let address = format!(
        "{}:{}",
        config.api_config.host.clone().unwrap_or("localhost".to_string()),
        config.api_config.port
    );

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("basicguard is up on http://{}", address);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

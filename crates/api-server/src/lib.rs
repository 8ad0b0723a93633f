pub mod analysis_routes;
pub mod config;
mod request_id;
mod security_headers;


use std::sync::Arc;

use analysis_core::{AnalysisError, FieldError};
use analysis_orchestrator::AnalysisOrchestrator;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::ServerConfig;
pub use request_id::RequestId;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AnalysisOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: AnalysisOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Handler error: an HTTP status plus the underlying cause.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
    fields: Vec<FieldError>,
    request_id: Option<String>,
}

impl AppError {
    pub fn with_status(status: StatusCode, error: anyhow::Error) -> Self {
        Self {
            status,
            error,
            fields: Vec::new(),
            request_id: None,
        }
    }

    pub fn bad_request(error: anyhow::Error) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, error)
    }

    pub fn not_found(error: anyhow::Error) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, error)
    }

    /// Validation failures become 400 with field details; anything else is a
    /// 500 whose cause stays in the logs.
    pub fn analysis(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Validation(fields) => Self {
                status: StatusCode::BAD_REQUEST,
                error: anyhow::anyhow!(AnalysisError::Validation(fields.clone())),
                fields,
                request_id: None,
            },
            fault @ AnalysisError::ComputationFault(_) => {
                Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, fault.into())
            }
        }
    }

    /// Echo the correlation id in the error body so a client can quote it.
    pub fn with_request_id(mut self, id: &RequestId) -> Self {
        self.request_id = Some(id.0.clone());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(request_id = ?self.request_id, "Request failed: {:#}", self.error);
            "Internal server error during analysis".to_string()
        } else {
            self.error.to_string()
        };

        let mut body = json!({
            "success": false,
            "error": message,
        });
        if !self.fields.is_empty() {
            body["fields"] = json!(self.fields);
        }
        if let Some(id) = self.request_id {
            body["requestId"] = json!(id);
        }

        (self.status, Json(body)).into_response()
    }
}

async fn endpoint_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint not found",
        })),
    )
}

/// Full router with middleware stack.
pub fn app(state: AppState, config: &ServerConfig) -> anyhow::Result<Router> {
    let origin: HeaderValue = config
        .cors_origin
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid CORS_ORIGIN '{}': {}", config.cors_origin, e))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http",
            method = %request.method(),
            uri = %request.uri(),
            request_id = tracing::field::Empty,
        )
    });

    Ok(analysis_routes::analysis_routes()
        .fallback(endpoint_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(middleware::from_fn(security_headers::security_headers_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(trace)
        .layer(cors))
}

fn init_tracing(json_logging: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json_logging {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    init_tracing(config.json_logging);

    let state = AppState::new(AnalysisOrchestrator::new());
    let router = app(state, &config)?;

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Real Estate Analysis API running on {}", addr);
    tracing::info!("Health check: http://{}/api/health", addr);
    tracing::info!("CORS enabled for: {}", config.cors_origin);

    axum::serve(listener, router).await?;
    Ok(())
}

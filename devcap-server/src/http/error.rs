//! API error types and the error envelope middleware
//!
//! Handlers return `ApiError`. Its response carries a production-safe body
//! plus an `ErrorReport` extension; `render_errors` logs every report and,
//! in development, rewrites server errors to include the original message
//! and stack. Panics are turned into the same report by `panic_response`.
//!
//! Envelope: `{"error": {"message": string, "stack"?: string}}`

use std::any::Any;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;

use crate::config::Environment;
use crate::db::repos::DbError;
use crate::models::ValidationError;

/// Message sent for every server error outside development
pub const GENERIC_MESSAGE: &str = "Internal Server Error";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Malformed path, query or body (400)
    BadRequest(String),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// A foreign key pointed at a missing row whose id is unknown (404)
    MissingReference(&'static str),

    /// No route matched (404)
    NoRoute,

    /// Route matched but not the method (405)
    MethodNotAllowed,

    /// Unique constraint hit (409)
    Conflict(String),

    /// Database error (500)
    Database(DbError),

    /// Anything else (500)
    Internal(anyhow::Error),
}

/// What went wrong, attached to the response for the envelope middleware
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub message: String,
    pub stack: Option<String>,
    /// Server-side fault whose details are hidden outside development
    pub internal: bool,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<&'a str>,
}

fn envelope(status: StatusCode, message: &str, stack: Option<&str>) -> Response {
    let body = ErrorEnvelope {
        error: ErrorBody { message, stack },
    };
    (status, Json(body)).into_response()
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } | Self::MissingReference(_) | Self::NoRoute => {
                StatusCode::NOT_FOUND
            }
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_report(self) -> ErrorReport {
        match self {
            Self::Validation(e) => ErrorReport::client(e.to_string()),
            Self::BadRequest(message) | Self::Conflict(message) => ErrorReport::client(message),
            Self::NotFound { resource, id } => {
                ErrorReport::client(format!("{} '{}' not found", resource, id))
            }
            Self::MissingReference(resource) => {
                ErrorReport::client(format!("referenced {} not found", resource))
            }
            Self::NoRoute => ErrorReport::client("Not Found".to_owned()),
            Self::MethodNotAllowed => ErrorReport::client("Method Not Allowed".to_owned()),
            Self::Database(e) => ErrorReport::internal(anyhow::Error::new(e)),
            Self::Internal(e) => ErrorReport::internal(e),
        }
    }
}

impl ErrorReport {
    fn client(message: String) -> Self {
        Self {
            message,
            stack: None,
            internal: false,
        }
    }

    fn internal(err: anyhow::Error) -> Self {
        Self {
            message: err.to_string(),
            // Debug output carries the cause chain and, when enabled, a backtrace
            stack: Some(format!("{:?}", err)),
            internal: true,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let report = self.into_report();

        let mut response = if report.internal {
            envelope(status, GENERIC_MESSAGE, None)
        } else {
            envelope(status, &report.message, None)
        };
        response.extensions_mut().insert(report);
        response
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::MissingReference { resource } => Self::MissingReference(resource),
            DbError::Conflict(message) => Self::Conflict(message),
            _ => Self::Database(e),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

/// Log every error report and expose internals only where allowed.
pub async fn render_errors(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let mut response = next.run(request).await;

    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };
    let status = response.status();

    if report.internal {
        tracing::error!(
            %method,
            %uri,
            status = status.as_u16(),
            error = %report.message,
            stack = report.stack.as_deref().unwrap_or_default(),
            "request failed"
        );
    } else {
        tracing::info!(
            %method,
            %uri,
            status = status.as_u16(),
            error = %report.message,
            "request rejected"
        );
    }

    if report.internal && environment.exposes_internals() {
        return envelope(status, &report.message, report.stack.as_deref());
    }
    response
}

/// Convert a caught panic into an internal error response.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "unknown panic payload".to_owned()
    };

    ApiError::Internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}

/// Wrap a router with panic catching and the error envelope middleware.
pub fn with_error_handling<S>(router: Router<S>, environment: Environment) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(environment, render_errors))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NoRoute
}

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

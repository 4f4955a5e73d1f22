/*
 * Responsibility
 * - App-wide AppError taxonomy
 * - IntoResponse impl (HTTP status / JSON error body)
 * - Stable error codes for clients; ErrorMeta extension for the access log
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

/// Attached to error responses so the logging middleware can correlate the
/// error code with the request id without re-parsing the body.
#[derive(Debug, Clone)]
pub struct ErrorMeta {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    BusinessLogic {
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    Database {
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    ExternalService {
        message: String,
        details: Option<Value>,
    },

    #[error("authentication required")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("an unexpected error occurred")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: None,
        }
    }

    pub fn validation_with(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn business_logic(message: impl Into<String>) -> Self {
        Self::BusinessLogic {
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            details: None,
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            details: None,
        }
    }

    pub fn external_service(message: impl Into<String>) -> Self {
        Self::ExternalService {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(self, details: Value) -> Self {
        match self {
            Self::Validation { message, .. } => Self::Validation {
                message,
                details: Some(details),
            },
            Self::BusinessLogic { message, .. } => Self::BusinessLogic {
                message,
                details: Some(details),
            },
            Self::NotFound { message, .. } => Self::NotFound {
                message,
                details: Some(details),
            },
            Self::Database { message, .. } => Self::Database {
                message,
                details: Some(details),
            },
            Self::ExternalService { message, .. } => Self::ExternalService {
                message,
                details: Some(details),
            },
            other => other,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BusinessLogic { .. } => "BUSINESS_LOGIC_ERROR",
            Self::NotFound { .. } => "RESOURCE_NOT_FOUND",
            Self::Database { .. } => "DATABASE_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BusinessLogic { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ExternalService { .. } => StatusCode::BAD_GATEWAY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            Self::Validation { details, .. }
            | Self::BusinessLogic { details, .. }
            | Self::NotFound { details, .. }
            | Self::Database { details, .. }
            | Self::ExternalService { details, .. } => details.clone(),
            Self::Unauthorized | Self::Forbidden(_) | Self::Internal => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: message.clone(),
                details: self.details(),
                timestamp: Utc::now(),
            },
        };

        let mut response = (status, Json(body)).into_response();
        response
            .extensions_mut()
            .insert(ErrorMeta { code, message });
        response
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        // The cause stays in the log; the client only sees the generic body.
        tracing::error!(error = ?e, "unhandled error");
        Self::Internal
    }
}

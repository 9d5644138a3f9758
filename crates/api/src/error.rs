use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orderhub_auth::AuthError;
use orderhub_database::{DeliveryError, UserError};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Body shape for expected, application-level rejections.
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = AppError)]
pub struct ErrorResponse {
    /// Human-readable rejection message.
    #[schema(example = "Invalid credentials")]
    pub message: String,
}

/// One field-level finding of request body validation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationIssue {
    /// Field that failed validation.
    #[schema(example = "email")]
    pub field: String,
    #[schema(example = "Invalid email")]
    pub message: String,
    /// Machine-readable issue code.
    #[schema(example = "invalid_string")]
    pub code: String,
}

/// Body shape returned when structural validation of a request body fails.
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = ValidationError)]
pub struct ValidationErrorResponse {
    #[schema(example = "validation error:")]
    pub message: String,
    pub issues: Vec<ValidationIssue>,
}

/// Body shape for unexpected failures. Never carries internal details.
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = ServerError)]
pub struct ServerErrorResponse {
    #[schema(example = "Internal server error")]
    pub message: String,
}

/// The single error type every handler propagates into. One of three
/// mutually exclusive response shapes leaves the boundary:
/// `ValidationError` (400 with issues), `AppError` (4xx, message only), or
/// `ServerError` (500, generic message).
#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<ValidationIssue>),
    App { status: StatusCode, message: String },
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::App {
            status,
            message: message.into(),
        }
    }

    pub fn validation(issues: Vec<ValidationIssue>) -> Self {
        Self::Validation(issues)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(issues) => {
                let body = Json(ValidationErrorResponse {
                    message: "validation error:".to_string(),
                    issues,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::App { status, message } => {
                let body = Json(ErrorResponse { message });
                (status, body).into_response()
            }
            ApiError::Internal(error) => {
                error!(error = ?error, "internal error");
                let body = Json(ServerErrorResponse {
                    message: "Internal server error".to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        Self::Internal(error)
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::UserExists => Self::bad_request(error.to_string()),
            AuthError::InvalidCredentials => Self::unauthorized(error.to_string()),
            AuthError::InvalidToken => Self::unauthorized(error.to_string()),
            AuthError::UserNotFound => Self::not_found(error.to_string()),
            AuthError::TokenCreation(_) | AuthError::PasswordHash(_) | AuthError::Database(_) => {
                Self::Internal(anyhow::Error::new(error))
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::UserNotFound => Self::not_found(error.to_string()),
            UserError::EmailAlreadyExists => Self::bad_request(error.to_string()),
            UserError::DatabaseError(_) => Self::Internal(anyhow::Error::new(error)),
        }
    }
}

impl From<DeliveryError> for ApiError {
    fn from(error: DeliveryError) -> Self {
        match error {
            DeliveryError::DeliveryNotFound | DeliveryError::UserNotFound => {
                Self::not_found(error.to_string())
            }
            DeliveryError::DatabaseError(_) => Self::Internal(anyhow::Error::new(error)),
        }
    }
}

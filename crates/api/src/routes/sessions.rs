use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::routes::models::{CreateSessionRequest, User};
use crate::validation::Validator;
use crate::{ApiError, AppState};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    /// JWT used to authenticate protected requests.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user_without_password: User,
}

#[utoipa::path(
    post,
    path = "/sessions",
    tag = "Sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session created", body = CreateSessionResponse),
        (status = 400, description = "Validation failed", body = crate::error::ValidationErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let mut validator = Validator::new();
    let email = validator.require("email", &payload.email);
    if let Some(email) = email {
        validator.email("email", email);
    }
    let password = validator.require("password", &payload.password);
    validator.finish()?;

    let (token, user) = state
        .authenticator()
        .login(email.unwrap_or_default(), password.unwrap_or_default())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(CreateSessionResponse {
        token,
        user_without_password: user.into(),
    }))
}

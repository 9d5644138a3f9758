use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use orderhub_auth::NewAccount;
use orderhub_database::UserRole;
use serde::Serialize;
use utoipa::ToSchema;

use crate::routes::models::{CreateUserRequest, User};
use crate::validation::Validator;
use crate::{ApiError, AppState};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub new_user: User,
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Validation failed or email already taken", body = crate::error::ValidationErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let mut validator = Validator::new();
    let name = validator.require("name", &payload.name);
    let email = validator.require("email", &payload.email);
    if let Some(email) = email {
        validator.email("email", email);
    }
    let password = validator.require("password", &payload.password);
    if let Some(password) = password {
        validator.min_len("password", password, 6);
    }
    let role = match validator.optional_str("role", &payload.role) {
        Some(value) => validator.enum_value("role", value, UserRole::parse),
        None => Some(UserRole::Customer),
    };
    validator.finish()?;

    let new_user = state
        .authenticator()
        .register(NewAccount {
            name: name.unwrap_or_default().to_string(),
            email: email.unwrap_or_default().to_string(),
            password: password.unwrap_or_default().to_string(),
            role: role.unwrap_or_default(),
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            new_user: new_user.into(),
        }),
    ))
}

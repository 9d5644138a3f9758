use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use orderhub_database::{NewDeliveryLog, UserRole};
use serde::Serialize;
use utoipa::ToSchema;

use crate::routes::models::{CreateDeliveryLogRequest, Delivery, DeliveryLog};
use crate::validation::Validator;
use crate::{ApiError, AppState};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryLogResponse {
    pub delivery_log: DeliveryLog,
}

#[utoipa::path(
    post,
    path = "/delivery-logs",
    tag = "Delivery Logs",
    security(("bearerAuth" = [])),
    request_body = CreateDeliveryLogRequest,
    responses(
        (status = 201, description = "Log attached to the delivery", body = DeliveryLogResponse),
        (status = 400, description = "Validation failed", body = crate::error::ValidationErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Requires the sale role", body = crate::error::ErrorResponse),
        (status = 404, description = "Delivery not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_delivery_log(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateDeliveryLogRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DeliveryLogResponse>), ApiError> {
    state.authenticate_sale(&headers).await?;

    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let mut validator = Validator::new();
    let delivery_id = validator.require("delivery_id", &payload.delivery_id);
    let description = validator.require("description", &payload.description);
    validator.finish()?;

    let log = state
        .delivery_logs()
        .create(&NewDeliveryLog {
            delivery_id: delivery_id.unwrap_or_default().to_string(),
            description: description.unwrap_or_default().to_string(),
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(DeliveryLogResponse {
            delivery_log: log.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/delivery-logs/{delivery_id}",
    tag = "Delivery Logs",
    security(("bearerAuth" = [])),
    params(
        ("delivery_id" = String, Path, description = "Delivery ID")
    ),
    responses(
        (status = 200, description = "Delivery with its tracking logs", body = crate::routes::deliveries::DeliveryResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Customers may only view their own deliveries", body = crate::error::ErrorResponse),
        (status = 404, description = "Delivery not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn show_delivery_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(delivery_id): Path<String>,
) -> Result<Json<crate::routes::deliveries::DeliveryResponse>, ApiError> {
    let user = state.authenticate(&headers).await?;

    let delivery = state
        .deliveries()
        .find_with_user(&delivery_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Delivery not found"))?;

    if user.role == UserRole::Customer && delivery.delivery.user_id != user.id {
        return Err(ApiError::forbidden(
            "Customers may only view their own deliveries",
        ));
    }

    let logs = state
        .delivery_logs()
        .list_for_delivery(&delivery_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(crate::routes::deliveries::DeliveryResponse {
        delivery: Delivery::from_entity_with_user(delivery).with_logs(logs),
    }))
}

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use orderhub_database::{NewDelivery, UserRole};
use serde::Serialize;
use utoipa::ToSchema;

use crate::routes::models::{
    CreateDeliveryRequest, Delivery, UpdateDeliveryStatusRequest,
};
use crate::validation::Validator;
use crate::{ApiError, AppState};

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryResponse {
    pub delivery: Delivery,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveriesListResponse {
    pub deliveries: Vec<Delivery>,
}

#[utoipa::path(
    post,
    path = "/deliveries",
    tag = "Deliveries",
    security(("bearerAuth" = [])),
    request_body = CreateDeliveryRequest,
    responses(
        (status = 201, description = "Delivery created", body = DeliveryResponse),
        (status = 400, description = "Validation failed", body = crate::error::ValidationErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Customers may only create deliveries for themselves", body = crate::error::ErrorResponse),
        (status = 404, description = "Owning user not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_delivery(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateDeliveryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DeliveryResponse>), ApiError> {
    let user = state.authenticate(&headers).await?;

    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let mut validator = Validator::new();
    let user_id = validator.require("user_id", &payload.user_id);
    let description = validator.require("description", &payload.description);
    validator.finish()?;

    let user_id = user_id.unwrap_or_default().to_string();
    if user.role == UserRole::Customer && user_id != user.id {
        return Err(ApiError::forbidden(
            "Customers may only create deliveries for themselves",
        ));
    }

    let delivery = state
        .deliveries()
        .create(&NewDelivery {
            user_id,
            description: description.unwrap_or_default().to_string(),
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(DeliveryResponse {
            delivery: Delivery::from_entity(delivery),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/deliveries",
    tag = "Deliveries",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "All deliveries with their owners", body = DeliveriesListResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Requires the sale role", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_deliveries(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DeliveriesListResponse>, ApiError> {
    state.authenticate_sale(&headers).await?;

    let deliveries = state.deliveries().list_all().await.map_err(ApiError::from)?;

    Ok(Json(DeliveriesListResponse {
        deliveries: deliveries
            .into_iter()
            .map(Delivery::from_entity_with_user)
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/deliveries/{delivery_id}",
    tag = "Deliveries",
    security(("bearerAuth" = [])),
    params(
        ("delivery_id" = String, Path, description = "Delivery ID")
    ),
    responses(
        (status = 200, description = "Delivery with owner and logs", body = DeliveryResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Customers may only view their own deliveries", body = crate::error::ErrorResponse),
        (status = 404, description = "Delivery not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_delivery(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<DeliveryResponse>, ApiError> {
    let user = state.authenticate(&headers).await?;

    let delivery = state
        .deliveries()
        .find_with_user(&id)
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
        .list_for_delivery(&id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DeliveryResponse {
        delivery: Delivery::from_entity_with_user(delivery).with_logs(logs),
    }))
}

#[utoipa::path(
    patch,
    path = "/deliveries/{delivery_id}/status",
    tag = "Deliveries",
    security(("bearerAuth" = [])),
    params(
        ("delivery_id" = String, Path, description = "Delivery ID")
    ),
    request_body = UpdateDeliveryStatusRequest,
    responses(
        (status = 200, description = "Delivery status updated", body = DeliveryResponse),
        (status = 400, description = "Validation failed", body = crate::error::ValidationErrorResponse),
        (status = 401, description = "Authentication required", body = crate::error::ErrorResponse),
        (status = 403, description = "Requires the sale role", body = crate::error::ErrorResponse),
        (status = 404, description = "Delivery not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_delivery_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDeliveryStatusRequest>, JsonRejection>,
) -> Result<Json<DeliveryResponse>, ApiError> {
    state.authenticate_sale(&headers).await?;

    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let mut validator = Validator::new();
    let status = validator
        .require("status", &payload.status)
        .and_then(|value| {
            validator.enum_value("status", value, orderhub_database::DeliveryStatus::parse)
        });
    validator.finish()?;
    let status = status.ok_or_else(|| ApiError::bad_request("Invalid status"))?;

    let delivery = state
        .deliveries()
        .update_status(&id, status)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DeliveryResponse {
        delivery: Delivery::from_entity(delivery),
    }))
}

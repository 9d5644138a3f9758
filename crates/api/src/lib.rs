mod error;
mod state;
mod util;
mod validation;

pub mod docs;
pub mod routes;

pub use error::ApiError;
pub use state::AppState;

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    response::Redirect,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa_swagger_ui::SwaggerUi;

pub fn build_router(state: AppState, openapi: utoipa::openapi::OpenApi) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/docs") }))
        .route("/health", get(routes::health::health_check))
        .route("/users", post(routes::users::create_user))
        .route("/sessions", post(routes::sessions::create_session))
        .route("/deliveries", post(routes::deliveries::create_delivery))
        .route("/deliveries", get(routes::deliveries::list_deliveries))
        .route(
            "/deliveries/:delivery_id",
            get(routes::deliveries::get_delivery),
        )
        .route(
            "/deliveries/:delivery_id/status",
            patch(routes::deliveries::update_delivery_status),
        )
        .route(
            "/delivery-logs",
            post(routes::delivery_logs::create_delivery_log),
        )
        .route(
            "/delivery-logs/:delivery_id",
            get(routes::delivery_logs::show_delivery_logs),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi))
        .with_state(state)
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

use axum::http::HeaderMap;
use orderhub_auth::Authenticator;
use orderhub_database::{DeliveryLogRepository, DeliveryRepository, User, UserRole};
use sqlx::SqlitePool;

use crate::{util::require_bearer, ApiError};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    authenticator: Authenticator,
    deliveries: DeliveryRepository,
    delivery_logs: DeliveryLogRepository,
}

impl AppState {
    pub fn new(pool: SqlitePool, authenticator: Authenticator) -> Self {
        Self {
            deliveries: DeliveryRepository::new(pool.clone()),
            delivery_logs: DeliveryLogRepository::new(pool),
            authenticator,
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn deliveries(&self) -> &DeliveryRepository {
        &self.deliveries
    }

    pub fn delivery_logs(&self) -> &DeliveryLogRepository {
        &self.delivery_logs
    }

    /// Resolve the bearer token in the request headers to a user.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<User, ApiError> {
        let token = require_bearer(headers)?;
        self.authenticator
            .authenticate_token(&token)
            .await
            .map_err(ApiError::from)
    }

    /// Like [`authenticate`](Self::authenticate), but additionally requires
    /// the `sale` role.
    pub async fn authenticate_sale(&self, headers: &HeaderMap) -> Result<User, ApiError> {
        let user = self.authenticate(headers).await?;
        if user.role != UserRole::Sale {
            return Err(ApiError::forbidden("Insufficient permissions"));
        }
        Ok(user)
    }
}

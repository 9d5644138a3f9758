//! Delivery repository for database operations.

use crate::entities::delivery::{
    Delivery, DeliveryStatus, DeliveryWithUser, NewDelivery, UserSummary,
};
use crate::types::{DeliveryError, DeliveryResult};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Repository for delivery database operations.
#[derive(Clone)]
pub struct DeliveryRepository {
    pool: SqlitePool,
}

impl DeliveryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new delivery for the given user. The owning user must exist.
    pub async fn create(&self, new_delivery: &NewDelivery) -> DeliveryResult<Delivery> {
        let owner = sqlx::query("SELECT 1 FROM users WHERE id = ?")
            .bind(&new_delivery.user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        if owner.is_none() {
            return Err(DeliveryError::UserNotFound);
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let status = DeliveryStatus::default();

        sqlx::query(
            "INSERT INTO deliveries (id, user_id, description, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, NULL)",
        )
        .bind(&id)
        .bind(&new_delivery.user_id)
        .bind(&new_delivery.description)
        .bind(status.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        Ok(Delivery {
            id,
            user_id: new_delivery.user_id.clone(),
            description: new_delivery.description.clone(),
            status,
            created_at: now,
            updated_at: None,
        })
    }

    /// Find a delivery by ID.
    pub async fn find_by_id(&self, id: &str) -> DeliveryResult<Option<Delivery>> {
        let row = sqlx::query(
            "SELECT id, user_id, description, status, created_at, updated_at FROM deliveries WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| Self::row_to_delivery(&row)))
    }

    /// Find a delivery together with its owner summary.
    pub async fn find_with_user(&self, id: &str) -> DeliveryResult<Option<DeliveryWithUser>> {
        let row = sqlx::query(
            "SELECT d.id, d.user_id, d.description, d.status, d.created_at, d.updated_at, \
                    u.name AS user_name, u.email AS user_email \
             FROM deliveries d JOIN users u ON u.id = d.user_id \
             WHERE d.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| Self::row_to_delivery_with_user(&row)))
    }

    /// List all deliveries with their owner summaries, newest first.
    pub async fn list_all(&self) -> DeliveryResult<Vec<DeliveryWithUser>> {
        let rows = sqlx::query(
            "SELECT d.id, d.user_id, d.description, d.status, d.created_at, d.updated_at, \
                    u.name AS user_name, u.email AS user_email \
             FROM deliveries d JOIN users u ON u.id = d.user_id \
             ORDER BY d.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        Ok(rows
            .iter()
            .map(Self::row_to_delivery_with_user)
            .collect())
    }

    /// Update the status of a delivery and stamp `updated_at`.
    pub async fn update_status(
        &self,
        id: &str,
        status: DeliveryStatus,
    ) -> DeliveryResult<Delivery> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query("UPDATE deliveries SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(&now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DeliveryError::DeliveryNotFound);
        }

        self.find_by_id(id)
            .await?
            .ok_or(DeliveryError::DeliveryNotFound)
    }

    fn row_to_delivery(row: &sqlx::sqlite::SqliteRow) -> Delivery {
        Delivery {
            id: row.get("id"),
            user_id: row.get("user_id"),
            description: row.get("description"),
            status: DeliveryStatus::from(row.get::<String, _>("status").as_str()),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    fn row_to_delivery_with_user(row: &sqlx::sqlite::SqliteRow) -> DeliveryWithUser {
        DeliveryWithUser {
            delivery: Self::row_to_delivery(row),
            user: UserSummary {
                name: row.get("user_name"),
                email: row.get("user_email"),
            },
        }
    }
}

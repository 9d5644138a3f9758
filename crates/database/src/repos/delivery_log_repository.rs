//! Delivery log repository for database operations.

use crate::entities::delivery_log::{DeliveryLog, NewDeliveryLog};
use crate::types::{DeliveryError, DeliveryResult};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Repository for delivery log database operations.
#[derive(Clone)]
pub struct DeliveryLogRepository {
    pool: SqlitePool,
}

impl DeliveryLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Attach a tracking log to a delivery. The delivery must exist.
    pub async fn create(&self, new_log: &NewDeliveryLog) -> DeliveryResult<DeliveryLog> {
        let delivery = sqlx::query("SELECT 1 FROM deliveries WHERE id = ?")
            .bind(&new_log.delivery_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        if delivery.is_none() {
            return Err(DeliveryError::DeliveryNotFound);
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO delivery_logs (id, delivery_id, description, created_at, updated_at) VALUES (?, ?, ?, ?, NULL)",
        )
        .bind(&id)
        .bind(&new_log.delivery_id)
        .bind(&new_log.description)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        Ok(DeliveryLog {
            id,
            delivery_id: new_log.delivery_id.clone(),
            description: new_log.description.clone(),
            created_at: now,
            updated_at: None,
        })
    }

    /// List the logs of a delivery in insertion order.
    pub async fn list_for_delivery(&self, delivery_id: &str) -> DeliveryResult<Vec<DeliveryLog>> {
        let rows = sqlx::query(
            "SELECT id, delivery_id, description, created_at, updated_at \
             FROM delivery_logs WHERE delivery_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(delivery_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|row| DeliveryLog {
                id: row.get("id"),
                delivery_id: row.get("delivery_id"),
                description: row.get("description"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            })
            .collect())
    }
}

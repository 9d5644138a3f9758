//! OrderHub database crate.
//!
//! Connection management, embedded migrations, and the repository layer for
//! users, deliveries, and delivery logs.

use sqlx::SqlitePool;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::{DeliveryLogRepository, DeliveryRepository, UserRepository};

pub use entities::{
    delivery::{Delivery, DeliveryStatus, DeliveryWithUser, NewDelivery, UserSummary},
    delivery_log::{DeliveryLog, NewDeliveryLog},
    user::{NewUser, User, UserRole},
};

pub use types::{
    errors::{DatabaseError, DeliveryError, UserError},
    DatabaseResult, DeliveryResult, UserResult,
};

use orderhub_config::DatabaseConfig;

/// Connect to the database and bring the schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(pool)
}

//! Error types for the database layer.

use thiserror::Error;

/// General database error.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),
}

/// User-specific database errors.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("User with same email already exists")]
    EmailAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Delivery- and delivery-log-specific database errors.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Delivery not found")]
    DeliveryNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

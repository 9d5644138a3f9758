//! Shared types and result aliases for the database layer.

pub mod errors;

pub use errors::{DatabaseError, DeliveryError, UserError};

pub type DatabaseResult<T> = Result<T, DatabaseError>;
pub type UserResult<T> = Result<T, UserError>;
pub type DeliveryResult<T> = Result<T, DeliveryError>;

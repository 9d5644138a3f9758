//! Repository implementations over the SQLite pool.

pub mod delivery_log_repository;
pub mod delivery_repository;
pub mod user_repository;

pub use delivery_log_repository::DeliveryLogRepository;
pub use delivery_repository::DeliveryRepository;
pub use user_repository::UserRepository;

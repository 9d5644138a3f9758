pub mod deliveries;
pub mod delivery_logs;
pub mod health;
pub mod models;
pub mod sessions;
pub mod users;

//! Entity definitions for the OrderHub domain.

pub mod delivery;
pub mod delivery_log;
pub mod user;

pub use delivery::{Delivery, DeliveryStatus, DeliveryWithUser, NewDelivery, UserSummary};
pub use delivery_log::{DeliveryLog, NewDeliveryLog};
pub use user::{NewUser, User, UserRole};

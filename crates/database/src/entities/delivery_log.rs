//! Delivery log entity definitions.

use serde::{Deserialize, Serialize};

/// A timestamped tracking event attached to a delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryLog {
    pub id: String,
    pub delivery_id: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Data required to insert a new delivery log row.
#[derive(Debug, Clone)]
pub struct NewDeliveryLog {
    pub delivery_id: String,
    pub description: String,
}

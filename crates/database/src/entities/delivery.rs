//! Delivery entity definitions.

use serde::{Deserialize, Serialize};

/// Delivery entity representing a tracked order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub status: DeliveryStatus,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Data required to insert a new delivery row.
#[derive(Debug, Clone)]
pub struct NewDelivery {
    pub user_id: String,
    pub description: String,
}

/// Owner details embedded alongside a delivery in list/detail reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
}

/// A delivery joined with its owner summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryWithUser {
    pub delivery: Delivery,
    pub user: UserSummary,
}

/// Current stage of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    #[default]
    Accepted,
    Production,
    Shipped,
    Delivered,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Accepted => "accepted",
            DeliveryStatus::Production => "production",
            DeliveryStatus::Shipped => "shipped",
            DeliveryStatus::Delivered => "delivered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "accepted" => Some(DeliveryStatus::Accepted),
            "production" => Some(DeliveryStatus::Production),
            "shipped" => Some(DeliveryStatus::Shipped),
            "delivered" => Some(DeliveryStatus::Delivered),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DeliveryStatus {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            DeliveryStatus::Accepted,
            DeliveryStatus::Production,
            DeliveryStatus::Shipped,
            DeliveryStatus::Delivered,
        ] {
            assert_eq!(DeliveryStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&DeliveryStatus::Production).unwrap();
        assert_eq!(json, "\"production\"");
    }

    #[test]
    fn unknown_status_string_is_rejected_by_parse() {
        assert_eq!(DeliveryStatus::parse("returned"), None);
    }
}

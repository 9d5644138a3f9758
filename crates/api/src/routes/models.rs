//! Wire-level payload types shared across routes. These mirror the shapes
//! the API documents: responses use camelCase keys, request bodies keep the
//! documented snake_case identifiers (`user_id`, `delivery_id`).
//!
//! Request types keep every field optional so the validation layer can
//! report all missing/invalid fields at once instead of failing on the
//! first during deserialization.

use orderhub_database as db;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role a user holds in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[schema(example = "customer")]
pub enum UserRole {
    Customer,
    Sale,
}

impl From<db::UserRole> for UserRole {
    fn from(value: db::UserRole) -> Self {
        match value {
            db::UserRole::Customer => UserRole::Customer,
            db::UserRole::Sale => UserRole::Sale,
        }
    }
}

impl From<UserRole> for db::UserRole {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::Customer => db::UserRole::Customer,
            UserRole::Sale => db::UserRole::Sale,
        }
    }
}

/// Status of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
#[schema(example = "accepted")]
pub enum DeliveryStatus {
    Accepted,
    Production,
    Shipped,
    Delivered,
}

impl From<db::DeliveryStatus> for DeliveryStatus {
    fn from(value: db::DeliveryStatus) -> Self {
        match value {
            db::DeliveryStatus::Accepted => DeliveryStatus::Accepted,
            db::DeliveryStatus::Production => DeliveryStatus::Production,
            db::DeliveryStatus::Shipped => DeliveryStatus::Shipped,
            db::DeliveryStatus::Delivered => DeliveryStatus::Delivered,
        }
    }
}

/// A user as it appears in responses. The password never leaves the
/// server, so the shape simply has no field for it.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
    #[schema(example = "Joao Silva")]
    pub name: String,
    #[schema(example = "joao@example.com")]
    pub email: String,
    pub role: UserRole,
    #[schema(example = "2024-01-15T10:30:00.000Z")]
    pub created_at: String,
    #[schema(example = json!(null))]
    pub updated_at: Option<String>,
}

impl From<db::User> for User {
    fn from(value: db::User) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            role: value.role.into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Owner details embedded in delivery responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    #[schema(example = "Joao Silva")]
    pub name: String,
    #[schema(example = "joao@example.com")]
    pub email: String,
}

impl From<db::UserSummary> for UserSummary {
    fn from(value: db::UserSummary) -> Self {
        Self {
            name: value.name,
            email: value.email,
        }
    }
}

/// A tracking event attached to a delivery.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryLog {
    pub id: String,
    #[schema(example = "Package left the warehouse")]
    pub description: String,
    pub delivery_id: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<db::DeliveryLog> for DeliveryLog {
    fn from(value: db::DeliveryLog) -> Self {
        Self {
            id: value.id,
            description: value.description,
            delivery_id: value.delivery_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// A delivery, optionally enriched with its owner summary and logs.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: String,
    pub user_id: String,
    #[schema(example = "Electronics package")]
    pub description: String,
    pub status: DeliveryStatus,
    pub created_at: String,
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<DeliveryLog>>,
}

impl Delivery {
    pub fn from_entity(value: db::Delivery) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            description: value.description,
            status: value.status.into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
            user: None,
            logs: None,
        }
    }

    pub fn from_entity_with_user(value: db::DeliveryWithUser) -> Self {
        let mut delivery = Self::from_entity(value.delivery);
        delivery.user = Some(value.user.into());
        delivery
    }

    pub fn with_logs(mut self, logs: Vec<db::DeliveryLog>) -> Self {
        self.logs = Some(logs.into_iter().map(DeliveryLog::from).collect());
        self
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------
//
// Fields deserialize as raw JSON values so that a missing field and a
// present-but-wrong-typed field can both be reported as field-level
// `invalid_type` issues instead of failing body extraction outright.

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(value_type = Option<String>, example = "Joao Silva")]
    pub name: Option<serde_json::Value>,
    #[schema(value_type = Option<String>, example = "joao@example.com")]
    pub email: Option<serde_json::Value>,
    /// Minimum of 6 characters.
    #[schema(value_type = Option<String>, example = "senha123")]
    pub password: Option<serde_json::Value>,
    /// Defaults to `customer` when omitted.
    #[schema(value_type = Option<String>, example = "customer")]
    pub role: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    #[schema(value_type = Option<String>, example = "joao@example.com")]
    pub email: Option<serde_json::Value>,
    #[schema(value_type = Option<String>, example = "senha123")]
    pub password: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDeliveryRequest {
    #[schema(value_type = Option<String>, example = "123e4567-e89b-12d3-a456-426614174000")]
    pub user_id: Option<serde_json::Value>,
    #[schema(value_type = Option<String>, example = "Electronics package")]
    pub description: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDeliveryStatusRequest {
    #[schema(value_type = Option<String>, example = "shipped")]
    pub status: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDeliveryLogRequest {
    #[schema(value_type = Option<String>, example = "123e4567-e89b-12d3-a456-426614174000")]
    pub delivery_id: Option<serde_json::Value>,
    #[schema(value_type = Option<String>, example = "Package left the warehouse")]
    pub description: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_payload_uses_camel_case_and_no_password() {
        let user = User::from(db::User {
            id: "u1".to_string(),
            name: "Joao Silva".to_string(),
            email: "joao@example.com".to_string(),
            password_hash: "argon2-hash".to_string(),
            role: db::UserRole::Customer,
            created_at: "2024-01-15T10:30:00Z".to_string(),
            updated_at: None,
        });

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["createdAt"], "2024-01-15T10:30:00Z");
        assert_eq!(json["role"], "customer");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn delivery_payload_omits_empty_embeds() {
        let delivery = Delivery::from_entity(db::Delivery {
            id: "d1".to_string(),
            user_id: "u1".to_string(),
            description: "Book order".to_string(),
            status: db::DeliveryStatus::Accepted,
            created_at: "2024-01-15T10:30:00Z".to_string(),
            updated_at: None,
        });

        let json = serde_json::to_value(&delivery).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["status"], "accepted");
        assert!(json.get("user").is_none());
        assert!(json.get("logs").is_none());
    }

    #[test]
    fn delivery_payload_embeds_user_and_logs_when_loaded() {
        let delivery = Delivery::from_entity_with_user(db::DeliveryWithUser {
            delivery: db::Delivery {
                id: "d1".to_string(),
                user_id: "u1".to_string(),
                description: "Book order".to_string(),
                status: db::DeliveryStatus::Shipped,
                created_at: "2024-01-15T10:30:00Z".to_string(),
                updated_at: Some("2024-01-16T08:00:00Z".to_string()),
            },
            user: db::UserSummary {
                name: "Joao Silva".to_string(),
                email: "joao@example.com".to_string(),
            },
        })
        .with_logs(vec![db::DeliveryLog {
            id: "l1".to_string(),
            delivery_id: "d1".to_string(),
            description: "Package left the warehouse".to_string(),
            created_at: "2024-01-16T08:00:00Z".to_string(),
            updated_at: None,
        }]);

        let json = serde_json::to_value(&delivery).unwrap();
        assert_eq!(json["user"]["email"], "joao@example.com");
        assert_eq!(json["logs"][0]["deliveryId"], "d1");
    }
}

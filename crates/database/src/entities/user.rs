//! User entity definitions.

use serde::{Deserialize, Serialize};

/// User entity representing an account in the system.
///
/// Timestamps are stored as RFC 3339 strings; `updated_at` stays `None`
/// until the row is first mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Data required to insert a new user row. The password arrives already
/// hashed; plaintext never crosses the repository boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Role a user holds in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Customer,
    Sale,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Sale => "sale",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(UserRole::Customer),
            "sale" => Some(UserRole::Sale),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!(UserRole::parse("customer"), Some(UserRole::Customer));
        assert_eq!(UserRole::parse("sale"), Some(UserRole::Sale));
        assert_eq!(UserRole::Customer.as_str(), "customer");
        assert_eq!(UserRole::Sale.as_str(), "sale");
    }

    #[test]
    fn unknown_role_falls_back_to_customer() {
        assert_eq!(UserRole::from("manager"), UserRole::Customer);
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: "u1".to_string(),
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            password_hash: "argon2-hash".to_string(),
            role: UserRole::Customer,
            created_at: "2024-01-15T10:30:00Z".to_string(),
            updated_at: None,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2-hash"));
    }
}

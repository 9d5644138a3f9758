//! User repository for database operations.

use crate::entities::user::{NewUser, User, UserRole};
use crate::types::{UserError, UserResult};
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by ID.
    pub async fn find_by_id(&self, id: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, role, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| Self::row_to_user(&row)))
    }

    /// Find user by email.
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, role, created_at, updated_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.map(|row| Self::row_to_user(&row)))
    }

    /// Check whether an email is already taken.
    pub async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let row = sqlx::query("SELECT 1 FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.is_some())
    }

    /// Create a new user. Duplicate emails surface as
    /// [`UserError::EmailAlreadyExists`].
    pub async fn create(&self, new_user: &NewUser) -> UserResult<User> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, NULL)",
        )
        .bind(&id)
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                UserError::EmailAlreadyExists
            } else {
                UserError::DatabaseError(e.to_string())
            }
        })?;

        Ok(User {
            id,
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            role: new_user.role,
            created_at: now,
            updated_at: None,
        })
    }

    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
        User {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            role: UserRole::from(row.get::<String, _>("role").as_str()),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialize_database;
    use orderhub_config::DatabaseConfig;
    use tempfile::TempDir;

    async fn test_repository() -> (UserRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("users.db").display());
        let pool = initialize_database(&DatabaseConfig {
            url: db_url,
            max_connections: 1,
        })
        .await
        .unwrap();
        (UserRepository::new(pool), temp_dir)
    }

    fn sample_user() -> NewUser {
        NewUser {
            name: "Joao Silva".to_string(),
            email: "joao@example.com".to_string(),
            password_hash: "hashed".to_string(),
            role: UserRole::Customer,
        }
    }

    #[tokio::test]
    async fn create_and_find_user() {
        let (repo, _dir) = test_repository().await;

        let created = repo.create(&sample_user()).await.unwrap();
        assert_eq!(created.role, UserRole::Customer);
        assert!(created.updated_at.is_none());

        let by_id = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_email = repo.find_by_email("joao@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (repo, _dir) = test_repository().await;

        repo.create(&sample_user()).await.unwrap();
        let result = repo.create(&sample_user()).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn email_exists_reflects_state() {
        let (repo, _dir) = test_repository().await;

        assert!(!repo.email_exists("joao@example.com").await.unwrap());
        repo.create(&sample_user()).await.unwrap();
        assert!(repo.email_exists("joao@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn missing_user_returns_none() {
        let (repo, _dir) = test_repository().await;

        assert!(repo.find_by_id("missing").await.unwrap().is_none());
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }
}

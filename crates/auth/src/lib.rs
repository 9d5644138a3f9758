//! Authentication for the OrderHub backend: password registration and
//! login backed by the user repository, with stateless HS256 JWT access
//! tokens.

use sqlx::SqlitePool;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use orderhub_config::AuthConfig;
use orderhub_database::{NewUser, User, UserError, UserRepository, UserRole};

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtManager};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User with same email already exists")]
    UserExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("token creation failed: {0}")]
    TokenCreation(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error("database error: {0}")]
    Database(String),
}

impl From<UserError> for AuthError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::UserNotFound => AuthError::UserNotFound,
            UserError::EmailAlreadyExists => AuthError::UserExists,
            UserError::DatabaseError(message) => AuthError::Database(message),
        }
    }
}

/// Registration payload, validated upstream at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Registers accounts, checks credentials, and issues/verifies tokens.
#[derive(Clone)]
pub struct Authenticator {
    users: UserRepository,
    jwt: JwtManager,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: &AuthConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt: JwtManager::new(
                &config.jwt_secret,
                Duration::from_secs(config.token_ttl_seconds),
            ),
        }
    }

    /// Register a new account. The password is hashed before it reaches the
    /// repository.
    pub async fn register(&self, account: NewAccount) -> Result<User, AuthError> {
        if self.users.email_exists(&account.email).await? {
            return Err(AuthError::UserExists);
        }

        let password_hash = password::hash_password(&account.password)?;

        let user = self
            .users
            .create(&NewUser {
                name: account.name,
                email: account.email,
                password_hash,
                role: account.role,
            })
            .await?;

        info!(user = %user.id, role = %user.role, "registered new user");
        Ok(user)
    }

    /// Check credentials and issue an access token.
    ///
    /// A missing user and a wrong password are indistinguishable to the
    /// caller, both yield [`AuthError::InvalidCredentials`].
    pub async fn login(&self, email: &str, pass: &str) -> Result<(String, User), AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify_password(pass, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt.generate_token(&user.id, user.role.as_str())?;

        info!(user = %user.id, "session issued");
        Ok((token, user))
    }

    /// Validate a bearer token and load the user it belongs to.
    pub async fn authenticate_token(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.jwt.validate_token(token)?;

        self.users
            .find_by_id(&claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}

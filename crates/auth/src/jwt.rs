//! JWT issuance and validation.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::AuthError;

const ISSUER: &str = "orderhub-api";

/// JWT claims carried by every OrderHub access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: String,
    /// Role the user held when the token was issued.
    pub role: String,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
    /// Unique token ID.
    pub jti: String,
}

/// Signs and validates HS256 tokens.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_duration: Duration,
}

impl JwtManager {
    pub fn new(secret: &str, token_duration: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            token_duration,
        }
    }

    /// Generate a token for a user.
    pub fn generate_token(&self, user_id: &str, role: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::TokenCreation("system time before unix epoch".to_string()))?;

        let exp = now + self.token_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: exp.as_secs() as usize,
            iat: now.as_secs() as usize,
            iss: ISSUER.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validate a token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

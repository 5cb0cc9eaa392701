//! JWT token utilities for session tokens.
//!
//! Tokens are minted by the HTTP layer after credential validation succeeds
//! and checked by the `jwt_auth` middleware on protected routes.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::auth::models::AuthenticatedUser;
use crate::errors::{ServiceError, ServiceResult};

/// JWT Claims structure identifying the authenticated user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub email: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance signing with `secret`.
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds,
        }
    }

    /// Token lifetime in seconds.
    pub fn expires_in(&self) -> u64 {
        self.expires_in_seconds
    }

    /// Generate a new JWT token for an authenticated user
    pub fn generate_token(&self, user: &AuthenticatedUser) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = i64::try_from(self.expires_in_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| ServiceError::internal_error("Token expiry out of range"))?;

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::authorization(format!("Token validation failed: {}", e)))
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            name: "A".to_string(),
        }
    }

    #[test]
    fn test_token_round_trip_carries_identity() {
        let jwt = JwtUtils::new("secret", 3600);
        let token = jwt.generate_token(&user()).unwrap();
        let claims = jwt.validate_token(&token).unwrap();

        assert_eq!(claims.user_id(), "u1");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let token = JwtUtils::new("secret", 3600).generate_token(&user()).unwrap();
        let err = JwtUtils::new("other", 3600)
            .validate_token(&token)
            .unwrap_err();
        assert_eq!(err.error_type(), "authorization");
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(JwtUtils::new("secret", 60).validate_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_unrepresentable_expiry_is_error() {
        for expires_in in [100_000_000_000_000_000, u64::MAX] {
            let err = JwtUtils::new("secret", expires_in)
                .generate_token(&user())
                .unwrap_err();
            assert_eq!(err.error_type(), "internal_error");
        }
    }
}

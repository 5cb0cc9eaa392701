//! Data structures for authentication-related entities.
//!
//! This module defines the credential request, the opaque request context
//! forwarded to the authentication backend, the resolved identity and the
//! token response returned to clients.

use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::utils::validation::not_an_object;
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use serde::Serialize;
use serde_json::{Map, Value};

/// Ambient information about the inbound request. Only ever forwarded to the
/// authentication backend, never inspected by the validators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_agent: Option<String>,
    pub forwarded_for: Option<String>,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        Self {
            user_agent: header(USER_AGENT.as_str()),
            forwarded_for: header("x-forwarded-for"),
        }
    }
}

/// Credential pair as submitted, plus the request context.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub(crate) payload: Map<String, Value>,
    pub context: RequestContext,
}

impl AuthRequest {
    /// Wraps a raw JSON body, rejecting anything that is not an object.
    pub fn from_json(body: Value, context: RequestContext) -> ServiceResult<Self> {
        match body {
            Value::Object(payload) => Ok(Self { payload, context }),
            other => Err(ServiceError::validation(vec![not_an_object(&other)])),
        }
    }

    #[cfg(test)]
    pub fn new(email: &str, password: &str, context: RequestContext) -> Self {
        let mut payload = Map::new();
        payload.insert("email".to_string(), Value::from(email));
        payload.insert("password".to_string(), Value::from(password));
        Self { payload, context }
    }
}

/// Identity resolved by a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Output of credential validation: the cleaned email and the resolved user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedCredentials {
    pub email: String,
    pub user: AuthenticatedUser,
}

/// Token issued after successful authentication
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: u64, // Token expiration in seconds
}

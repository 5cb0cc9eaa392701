//! Core business logic for credential authentication.

use crate::auth::models::*;
use crate::errors::{ServiceError, ServiceResult};
use crate::services::user_store::Authenticator;
use crate::utils::validation::{FieldSpec, Rule, validate_fields};
use std::sync::Arc;

/// Message returned for every credential mismatch, whichever field was wrong.
pub const UNABLE_TO_AUTHENTICATE: &str = "Unable to authenticate with provided credentials";

/// Credential fields. The password is never trimmed: surrounding whitespace
/// is part of the secret.
pub const CREDENTIAL_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "email",
        trim_whitespace: true,
        rules: &[Rule::Email],
    },
    FieldSpec {
        name: "password",
        trim_whitespace: false,
        rules: &[],
    },
];

/// Validates credential pairs and resolves them through the authentication
/// backend. Does not issue tokens.
#[derive(Clone)]
pub struct CredentialAuthenticator {
    backend: Arc<dyn Authenticator>,
}

impl CredentialAuthenticator {
    pub fn new(backend: Arc<dyn Authenticator>) -> Self {
        Self { backend }
    }

    /// Validate and authenticate the user
    ///
    /// # Errors
    /// - `ServiceError::Validation` when the email or password is missing or
    ///   malformed; the backend is not consulted
    /// - `ServiceError::Authorization` when the backend finds no match
    /// - `ServiceError::Database` when the backend is unavailable
    pub async fn authenticate(&self, request: AuthRequest) -> ServiceResult<ValidatedCredentials> {
        let mut fields =
            validate_fields(CREDENTIAL_FIELDS, &request.payload).map_err(ServiceError::validation)?;

        let email = fields.take("email");
        let password = fields.take("password");

        let user = self
            .backend
            .authenticate(&request.context, &email, &password)
            .await?;

        match user {
            Some(user) => {
                tracing::info!("Authenticated user {}", user.id);
                Ok(ValidatedCredentials { email, user })
            }
            None => {
                tracing::debug!("Authentication failed");
                Err(ServiceError::authorization(UNABLE_TO_AUTHENTICATE))
            }
        }
    }
}

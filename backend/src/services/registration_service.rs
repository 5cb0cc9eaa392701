//! Registration validation and user creation.

use crate::api::user::models::{PublicUserView, RegistrationInput};
use crate::errors::{FieldError, ServiceError, ServiceResult};
use crate::services::user_service::MAX_PASSWORD_BYTES;
use crate::services::user_store::UserStore;
use crate::utils::validation::{FieldSpec, Rule, validate_fields};
use std::sync::Arc;

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 5;

/// Registration fields in the order their errors are reported.
pub const REGISTRATION_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "email",
        trim_whitespace: true,
        rules: &[Rule::MaxLength(255), Rule::Email],
    },
    FieldSpec {
        name: "password",
        trim_whitespace: true,
        rules: &[
            Rule::MinLength(PASSWORD_MIN_LENGTH),
            Rule::MaxBytes(MAX_PASSWORD_BYTES),
        ],
    },
    FieldSpec {
        name: "name",
        trim_whitespace: true,
        rules: &[Rule::MaxLength(255)],
    },
];

/// Validates registration payloads and hands valid ones to the user store.
#[derive(Clone)]
pub struct RegistrationValidator {
    store: Arc<dyn UserStore>,
}

impl RegistrationValidator {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Validates `input` and creates the user it describes.
    ///
    /// The store is only called once every field has passed, so a rejected
    /// payload never leaves a partial record behind.
    ///
    /// # Errors
    /// - `ServiceError::Validation` listing every failing field, including a
    ///   `unique` error on `email` when the store reports a duplicate
    /// - `ServiceError::Database` when the store is unavailable
    pub async fn validate_and_create(
        &self,
        input: RegistrationInput,
    ) -> ServiceResult<PublicUserView> {
        let mut fields = validate_fields(REGISTRATION_FIELDS, &input.payload).map_err(|errors| {
            let error = ServiceError::validation(errors);
            tracing::info!(fields = ?error.failing_fields(), "Registration rejected");
            error
        })?;

        let email = fields.take("email");
        let password = fields.take("password");
        let name = fields.take("name");

        let user = match self.store.create_user(&email, &password, &name).await {
            Ok(user) => user,
            Err(ServiceError::AlreadyExists { .. }) => {
                tracing::info!("Registration rejected: email already registered");
                return Err(ServiceError::validation(vec![FieldError::new(
                    "email",
                    "unique",
                    "user with this email already exists.",
                )]));
            }
            Err(e) => {
                tracing::error!("User store failed during registration: {}", e);
                return Err(e);
            }
        };

        tracing::info!("Registered user {}", user.email);
        Ok(PublicUserView::from(user))
    }
}

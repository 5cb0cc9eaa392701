//! Central module for organizing the application's API endpoints.
//!
//! Holds the shared handler state and the user registration endpoints;
//! token and profile routes live in the `auth` module.

pub mod common;
pub mod user;

use crate::auth::service::CredentialAuthenticator;
use crate::services::registration_service::RegistrationValidator;
use crate::services::user_store::{Authenticator, UserStore};
use crate::utils::jwt::JwtUtils;
use std::sync::Arc;

/// State shared by every handler, injected as an `Extension`.
#[derive(Clone)]
pub struct AppState {
    pub registration: RegistrationValidator,
    pub credentials: CredentialAuthenticator,
    pub users: Arc<dyn UserStore>,
    pub jwt: Arc<JwtUtils>,
}

impl AppState {
    /// Wires both validators to a single user store implementation.
    pub fn new<S>(store: Arc<S>, jwt: JwtUtils) -> Self
    where
        S: UserStore + Authenticator + 'static,
    {
        Self {
            registration: RegistrationValidator::new(store.clone()),
            credentials: CredentialAuthenticator::new(store.clone()),
            users: store,
            jwt: Arc::new(jwt),
        }
    }
}

//! Collaborator interfaces consumed by the registration and credential
//! validators.
//!
//! The validators receive these as `Arc<dyn ...>` at construction time, so
//! the SQLite-backed [`UserService`](super::user_service::UserService) can be
//! swapped for an in-memory fake in tests.

use crate::auth::models::{AuthenticatedUser, RequestContext};
use crate::database::models::User;
use crate::errors::ServiceResult;
use async_trait::async_trait;

/// Owner of persistent user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user, hashing `password` before it is persisted.
    ///
    /// # Errors
    /// Returns `ServiceError::AlreadyExists` when the email is taken. The
    /// check and the insert must be atomic.
    async fn create_user(&self, email: &str, password: &str, name: &str) -> ServiceResult<User>;

    /// Looks a user up by identifier.
    async fn find_by_id(&self, id: &str) -> ServiceResult<Option<User>>;
}

/// Compares submitted credentials against stored password hashes.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Returns the matching user, or `None` when the credentials do not
    /// resolve to an active account.
    async fn authenticate(
        &self,
        context: &RequestContext,
        email: &str,
        password: &str,
    ) -> ServiceResult<Option<AuthenticatedUser>>;
}

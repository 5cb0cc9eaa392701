//! User business logic service.
//!
//! SQLite-backed implementation of the user store and the authentication
//! backend. Owns password hashing: raw passwords enter here and only bcrypt
//! hashes leave for the database.

use crate::auth::models::{AuthenticatedUser, RequestContext};
use crate::database::models::{CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::services::user_store::{Authenticator, UserStore};
use async_trait::async_trait;
use bcrypt::{BcryptError, non_truncating_hash, non_truncating_verify};
use sqlx::SqlitePool;

/// Largest password bcrypt can hash without silently dropping input.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Clone)]
pub struct UserService {
    /// Shared database connection pool
    pool: SqlitePool,
    /// bcrypt work factor used for new hashes
    cost: u32,
}

impl UserService {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool
    /// * `cost` - bcrypt cost for newly hashed passwords
    pub fn new(pool: SqlitePool, cost: u32) -> Self {
        Self { pool, cost }
    }

    /// Lowercases the domain part of an email address, leaving the local
    /// part untouched. Addresses without `@` are returned trimmed.
    pub fn normalize_email(email: &str) -> String {
        let email = email.trim();
        match email.rsplit_once('@') {
            Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
            None => email.to_string(),
        }
    }

    /// Function to hash a password before storing in database
    ///
    /// # Arguments
    /// * `password` - Plain text password to hash
    ///
    /// # Returns
    /// Hashed password string
    ///
    /// # Errors
    /// Returns a `password` validation error when the password exceeds
    /// [`MAX_PASSWORD_BYTES`], `ServiceError::InternalError` if hashing fails
    async fn hash_password(&self, password: &str) -> ServiceResult<String> {
        let password = password.to_string();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || non_truncating_hash(password, cost))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Hashing task failed: {}", e)))?;

        match hashed {
            Ok(hashed) => Ok(hashed),
            Err(BcryptError::Truncation(_)) => Err(ServiceError::field(
                "password",
                "max_length",
                format!(
                    "Ensure this field has no more than {} bytes.",
                    MAX_PASSWORD_BYTES
                ),
            )),
            Err(e) => Err(ServiceError::internal_error(format!(
                "Password hashing failed: {}",
                e
            ))),
        }
    }

    /// Function to verify a password against the stored hash
    ///
    /// # Returns
    /// `true` if password matches hash, `false` otherwise. A password longer
    /// than [`MAX_PASSWORD_BYTES`] never matches.
    ///
    /// # Errors
    /// Returns `ServiceError` if the stored hash is malformed
    async fn verify_password(password: &str, password_hash: &str) -> ServiceResult<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        let verified =
            tokio::task::spawn_blocking(move || non_truncating_verify(password, &password_hash))
                .await
                .map_err(|e| {
                    ServiceError::internal_error(format!("Verification task failed: {}", e))
                })?;

        match verified {
            Ok(matches) => Ok(matches),
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(e) => Err(ServiceError::internal_error(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }
}

fn is_unique_violation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl UserStore for UserService {
    async fn create_user(&self, email: &str, password: &str, name: &str) -> ServiceResult<User> {
        let email = Self::normalize_email(email);
        if email.is_empty() {
            return Err(ServiceError::field(
                "email",
                "required",
                "Users must have an email address.",
            ));
        }

        let password_hash = self.hash_password(password).await?;

        let data = CreateUser {
            id: uuid::Uuid::now_v7().to_string(),
            email: email.clone(),
            name: name.to_string(),
            password_hash,
        };

        let repo = UserRepository::new(&self.pool);
        match repo.create_user(data).await {
            Ok(user) => Ok(user),
            Err(e) if is_unique_violation(&e) => Err(ServiceError::already_exists("User", email)),
            Err(e) => Err(ServiceError::from(e)),
        }
    }

    async fn find_by_id(&self, id: &str) -> ServiceResult<Option<User>> {
        let repo = UserRepository::new(&self.pool);
        Ok(repo.get_user_by_id(id).await?)
    }
}

#[async_trait]
impl Authenticator for UserService {
    async fn authenticate(
        &self,
        context: &RequestContext,
        email: &str,
        password: &str,
    ) -> ServiceResult<Option<AuthenticatedUser>> {
        tracing::debug!(
            user_agent = context.user_agent.as_deref().unwrap_or("-"),
            forwarded_for = context.forwarded_for.as_deref().unwrap_or("-"),
            "Checking credentials"
        );

        let repo = UserRepository::new(&self.pool);
        let Some(user) = repo.get_user_by_email(email).await? else {
            // Spend the same hashing work as a real check so the response
            // time does not reveal whether the email is registered.
            return match self.hash_password(password).await {
                Ok(_) | Err(ServiceError::Validation { .. }) => Ok(None),
                Err(e) => Err(e),
            };
        };

        if !Self::verify_password(password, &user.password_hash).await? || !user.is_active {
            return Ok(None);
        }

        Ok(Some(AuthenticatedUser::from(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::repositories::user_repository::tests::set_active;

    async fn service() -> UserService {
        UserService::new(test_pool().await, 4)
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(UserService::normalize_email("Bob@EXAMPLE.Com"), "Bob@example.com");
        assert_eq!(UserService::normalize_email(" a@B.com "), "a@b.com");
        assert_eq!(UserService::normalize_email("no-at-sign"), "no-at-sign");
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let service = service().await;
        let user = service
            .create_user("a@B.com", "abcde", "A")
            .await
            .unwrap();

        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.name, "A");
        assert_ne!(user.password_hash, "abcde");
        assert!(non_truncating_verify("abcde", &user.password_hash).unwrap());

        let found = service.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@b.com");
        assert!(service.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_already_exists() {
        let service = service().await;
        service.create_user("a@b.com", "abcde", "A").await.unwrap();

        let err = service
            .create_user("a@B.COM", "other", "B")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_matches_stored_hash() {
        let service = service().await;
        let created = service.create_user("a@b.com", "abcde", "A").await.unwrap();
        let context = RequestContext::default();

        let user = service
            .authenticate(&context, "a@b.com", "abcde")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, created.id);
        assert_eq!(user.name, "A");

        assert!(
            service
                .authenticate(&context, "a@b.com", "wrong")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            service
                .authenticate(&context, "nobody@b.com", "abcde")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_authenticate_preserves_whitespace() {
        let service = service().await;
        // Stored hashes are of exactly what the store was given.
        service.create_user("a@b.com", " secret ", "A").await.unwrap();
        let context = RequestContext::default();

        assert!(
            service
                .authenticate(&context, "a@b.com", " secret ")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            service
                .authenticate(&context, "a@b.com", "secret")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_bytes_past_hash_limit_are_not_ignored() {
        let service = service().await;
        let context = RequestContext::default();
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);
        service.create_user("a@b.com", &prefix, "A").await.unwrap();

        assert!(
            service
                .authenticate(&context, "a@b.com", &prefix)
                .await
                .unwrap()
                .is_some()
        );
        for attempt in [format!("{}WRONG", prefix), format!("{}RIGHT", prefix)] {
            assert!(
                service
                    .authenticate(&context, "a@b.com", &attempt)
                    .await
                    .unwrap()
                    .is_none()
            );
        }
        assert!(
            service
                .authenticate(&context, "nobody@b.com", &format!("{}WRONG", prefix))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_overlong_password_not_stored() {
        let service = service().await;
        let password = format!("{}RIGHT", "a".repeat(MAX_PASSWORD_BYTES));

        let err = service
            .create_user("a@b.com", &password, "A")
            .await
            .unwrap_err();
        assert_eq!(err.failing_fields(), vec!["password"]);

        let repo = UserRepository::new(&service.pool);
        assert!(repo.get_user_by_email("a@b.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inactive_user_cannot_authenticate() {
        let service = service().await;
        let user = service.create_user("a@b.com", "abcde", "A").await.unwrap();
        assert!(set_active(&service.pool, &user.id, false).await);

        let result = service
            .authenticate(&RequestContext::default(), "a@b.com", "abcde")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_closed_pool_is_dependency_error() {
        let service = service().await;
        service.pool.close().await;

        let err = service
            .create_user("a@b.com", "abcde", "A")
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "dependency_unavailable");
    }
}

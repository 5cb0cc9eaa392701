//! Request and response shapes for user registration.

use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::utils::validation::not_an_object;
use serde::Serialize;
use serde_json::{Map, Value};

/// Client-submitted registration fields, kept as raw JSON so that a missing
/// field and an explicit `null` remain distinguishable during validation.
#[derive(Debug, Clone)]
pub struct RegistrationInput {
    pub(crate) payload: Map<String, Value>,
}

impl RegistrationInput {
    /// Wraps a raw JSON body, rejecting anything that is not an object.
    pub fn from_json(body: Value) -> ServiceResult<Self> {
        match body {
            Value::Object(payload) => Ok(Self { payload }),
            other => Err(ServiceError::validation(vec![not_an_object(&other)])),
        }
    }

    #[cfg(test)]
    pub fn new(email: &str, password: &str, name: &str) -> Self {
        let mut payload = Map::new();
        payload.insert("email".to_string(), Value::from(email));
        payload.insert("password".to_string(), Value::from(password));
        payload.insert("name".to_string(), Value::from(name));
        Self { payload }
    }
}

/// Public representation of a user record. Has no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUserView {
    pub email: String,
    pub name: String,
}

impl From<User> for PublicUserView {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            name: user.name,
        }
    }
}

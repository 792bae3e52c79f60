use crate::domain::User as DomainUser;
use async_graphql::{InputObject, Object, SimpleObject};

/// GraphQL representation of a User. The password hash is never exposed.
#[derive(Clone)]
pub struct User {
    pub inner: DomainUser,
}

impl From<DomainUser> for User {
    fn from(user: DomainUser) -> Self {
        Self { inner: user }
    }
}

#[Object]
impl User {
    async fn id(&self) -> i32 {
        self.inner.id.unwrap_or_default()
    }

    async fn created_at(&self) -> String {
        super::epoch_millis(&self.inner.created_at)
    }

    async fn updated_at(&self) -> String {
        super::epoch_millis(&self.inner.updated_at)
    }

    async fn username(&self) -> &str {
        &self.inner.username
    }
}

/// Credentials accepted by `register` and `login`
#[derive(InputObject, Debug, Clone)]
pub struct UsernamePasswordInput {
    pub username: String,
    pub password: String,
}

/// A validation failure tied to one input field
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Result of `register` / `login`: either field errors or the user, never both
#[derive(SimpleObject, Clone)]
pub struct UserResponse {
    pub error: Option<Vec<FieldError>>,
    pub user: Option<User>,
}

impl UserResponse {
    pub fn field_error(field: &str, message: &str) -> Self {
        Self {
            error: Some(vec![FieldError::new(field, message)]),
            user: None,
        }
    }

    pub fn with_user(user: DomainUser) -> Self {
        Self {
            error: None,
            user: Some(user.into()),
        }
    }
}

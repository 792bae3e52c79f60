#![allow(dead_code)]

use async_graphql::{Request, Response, Variables};
use async_trait::async_trait;
use reddit_server::auth::{Argon2Hasher, PasswordHasher};
use reddit_server::domain::{Post, PostId, User};
use reddit_server::graphql::{create_schema, GraphQLContext, GraphQLSchema};
use reddit_server::storage::{InMemoryStorage, Storage};
use reddit_server::{AppError, Result};
use serde_json::Value;
use std::sync::Arc;

pub struct TestApp {
    pub schema: GraphQLSchema,
    pub storage: Arc<dyn Storage>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_storage(Arc::new(InMemoryStorage::new()))
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());
        Self {
            schema: create_schema(hasher),
            storage,
        }
    }

    /// Execute a document and return the raw response, errors included
    pub async fn execute_raw(&self, query: &str, variables: Value) -> Response {
        let request = Request::new(query)
            .variables(Variables::from_json(variables))
            .data(GraphQLContext::new(self.storage.clone()));
        self.schema.execute(request).await
    }

    /// Execute a document and return its `data` as JSON, panicking on GraphQL errors
    pub async fn execute(&self, query: &str, variables: Value) -> Value {
        let response = self.execute_raw(query, variables).await;
        assert!(
            response.errors.is_empty(),
            "unexpected GraphQL errors: {:?}",
            response.errors
        );
        response.data.into_json().expect("response data is valid JSON")
    }
}

pub const REGISTER: &str = r#"
    mutation Register($username: String!, $password: String!) {
        register(options: { username: $username, password: $password }) {
            error { field message }
            user { id username createdAt updatedAt }
        }
    }
"#;

pub const LOGIN: &str = r#"
    mutation Login($username: String!, $password: String!) {
        login(options: { username: $username, password: $password }) {
            error { field message }
            user { id username }
        }
    }
"#;

/// In-memory storage with injectable failures
#[derive(Default)]
pub struct FaultyStorage {
    pub inner: InMemoryStorage,
    /// `create_user` fails with a non-constraint database error
    pub fail_user_inserts: bool,
    /// The post disappears between lookup and update
    pub delete_before_update: bool,
}

#[async_trait]
impl Storage for FaultyStorage {
    async fn get_all_posts(&self) -> Result<Vec<Post>> {
        self.inner.get_all_posts().await
    }

    async fn get_post_by_id(&self, id: PostId) -> Result<Option<Post>> {
        self.inner.get_post_by_id(id).await
    }

    async fn create_post(&self, post: &mut Post) -> Result<()> {
        self.inner.create_post(post).await
    }

    async fn update_post(&self, post: &Post) -> Result<u64> {
        if self.delete_before_update {
            if let Some(id) = post.id {
                self.inner.delete_post(id).await?;
            }
        }
        self.inner.update_post(post).await
    }

    async fn delete_post(&self, id: PostId) -> Result<u64> {
        self.inner.delete_post(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.inner.get_user_by_username(username).await
    }

    async fn create_user(&self, user: &mut User) -> Result<()> {
        if self.fail_user_inserts {
            return Err(AppError::database("disk I/O error"));
        }
        self.inner.create_user(user).await
    }
}

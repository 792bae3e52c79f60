//! Persistence context for posts and users.
//!
//! Resolvers talk to storage only through [`Storage`]; consistency (id
//! assignment, username uniqueness) is the implementation's job.

#[cfg(feature = "db")]
pub mod database;
pub mod in_memory;

#[cfg(feature = "db")]
pub use database::DatabaseStorage;
pub use in_memory::InMemoryStorage;

use crate::domain::{Post, PostId, User};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    // Post operations
    async fn get_all_posts(&self) -> Result<Vec<Post>>;
    async fn get_post_by_id(&self, id: PostId) -> Result<Option<Post>>;
    /// Insert `post` and write the assigned id back into it
    async fn create_post(&self, post: &mut Post) -> Result<()>;
    /// Persist the title and `updated_at` of an existing post. Returns the
    /// number of rows changed; 0 when the post no longer exists.
    async fn update_post(&self, post: &Post) -> Result<u64>;
    /// Returns the number of rows removed
    async fn delete_post(&self, id: PostId) -> Result<u64>;

    // User operations
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    /// Insert `user`, failing with `AppError::UniqueViolation` when the
    /// username is already taken
    async fn create_user(&self, user: &mut User) -> Result<()>;
}

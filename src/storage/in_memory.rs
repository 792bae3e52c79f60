use super::Storage;
use crate::constants::USERNAME_FIELD;
use crate::domain::{Post, PostId, User, UserId};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

struct Table<K, V> {
    rows: BTreeMap<K, V>,
    next_id: K,
}

impl<K: Default, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: K::default(),
        }
    }
}

/// In-memory storage implementation for development/testing
pub struct InMemoryStorage {
    posts: Arc<RwLock<Table<PostId, Post>>>,
    users: Arc<RwLock<Table<UserId, User>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(Table::default())),
            users: Arc::new(RwLock::new(Table::default())),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get_all_posts(&self) -> Result<Vec<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.rows.values().cloned().collect())
    }

    async fn get_post_by_id(&self, id: PostId) -> Result<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.rows.get(&id).cloned())
    }

    async fn create_post(&self, post: &mut Post) -> Result<()> {
        let mut posts = self.posts.write().await;
        posts.next_id += 1;
        let id = posts.next_id;
        post.id = Some(id);
        posts.rows.insert(id, post.clone());

        debug!("Created post: {} with id {}", post.title, id);
        Ok(())
    }

    async fn update_post(&self, post: &Post) -> Result<u64> {
        let id = post
            .id
            .ok_or_else(|| AppError::database("Cannot update a post without an id"))?;
        let mut posts = self.posts.write().await;
        match posts.rows.get_mut(&id) {
            Some(existing) => {
                existing.title = post.title.clone();
                existing.updated_at = post.updated_at;
                debug!("Updated post {}", id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_post(&self, id: PostId) -> Result<u64> {
        let mut posts = self.posts.write().await;
        Ok(u64::from(posts.rows.remove(&id).is_some()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create_user(&self, user: &mut User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.rows.values().any(|u| u.username == user.username) {
            return Err(AppError::UniqueViolation {
                field: USERNAME_FIELD.to_string(),
            });
        }
        users.next_id += 1;
        let id = users.next_id;
        user.id = Some(id);
        users.rows.insert(id, user.clone());

        debug!("Created user: {} with id {}", user.username, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_assigned_sequentially() {
        let storage = InMemoryStorage::new();
        let mut a = Post::new("a");
        let mut b = Post::new("b");
        storage.create_post(&mut a).await.unwrap();
        storage.create_post(&mut b).await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));

        let titles: Vec<_> = storage
            .get_all_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let storage = InMemoryStorage::new();
        let mut a = Post::new("a");
        storage.create_post(&mut a).await.unwrap();
        assert_eq!(storage.delete_post(1).await.unwrap(), 1);
        assert_eq!(storage.delete_post(1).await.unwrap(), 0);

        let mut b = Post::new("b");
        storage.create_post(&mut b).await.unwrap();
        assert_eq!(b.id, Some(2));
    }

    #[tokio::test]
    async fn update_of_missing_post_changes_nothing() {
        let storage = InMemoryStorage::new();
        let mut post = Post::new("ghost");
        post.id = Some(42);
        assert_eq!(storage.update_post(&post).await.unwrap(), 0);
        assert!(storage.get_all_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_unique_violation() {
        let storage = InMemoryStorage::new();
        let mut first = User::new("alice1", "hash");
        storage.create_user(&mut first).await.unwrap();

        let mut second = User::new("alice1", "other-hash");
        let err = storage.create_user(&mut second).await.unwrap_err();
        assert!(err.is_unique_violation());
        assert_eq!(second.id, None);

        let found = storage.get_user_by_username("alice1").await.unwrap().unwrap();
        assert_eq!(found.password, "hash");
    }
}

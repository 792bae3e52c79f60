use super::Storage;
use crate::constants::USERNAME_FIELD;
use crate::db::DatabaseManager;
use crate::domain::{Post, PostId, User};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::Row;
use std::sync::Arc;
use tracing::debug;

const POST_COLUMNS: &str = "id, created_at, updated_at, title";
const USER_COLUMNS: &str = "id, created_at, updated_at, username, password";

/// libSQL-backed storage; every call runs on its own connection
pub struct DatabaseStorage {
    db: Arc<DatabaseManager>,
}

impl DatabaseStorage {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    fn row_to_post(row: &Row) -> Result<Post> {
        Ok(Post {
            id: Some(Self::get_id(row, 0)?),
            created_at: Self::get_timestamp(row, 1)?,
            updated_at: Self::get_timestamp(row, 2)?,
            title: Self::get_text(row, 3)?,
        })
    }

    fn row_to_user(row: &Row) -> Result<User> {
        Ok(User {
            id: Some(Self::get_id(row, 0)?),
            created_at: Self::get_timestamp(row, 1)?,
            updated_at: Self::get_timestamp(row, 2)?,
            username: Self::get_text(row, 3)?,
            password: Self::get_text(row, 4)?,
        })
    }

    fn get_id(row: &Row, idx: i32) -> Result<i32> {
        let id: i64 = row
            .get(idx)
            .map_err(|e| AppError::database(format!("Failed to get id: {e}")))?;
        Self::to_id(id)
    }

    fn to_id(rowid: i64) -> Result<i32> {
        i32::try_from(rowid).map_err(|_| AppError::database(format!("Id {rowid} out of range")))
    }

    fn get_text(row: &Row, idx: i32) -> Result<String> {
        row.get(idx)
            .map_err(|e| AppError::database(format!("Failed to get column {idx}: {e}")))
    }

    fn get_timestamp(row: &Row, idx: i32) -> Result<DateTime<Utc>> {
        let raw = Self::get_text(row, idx)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| AppError::database(format!("Invalid timestamp '{raw}': {e}")))
    }

    fn is_unique_violation(err: &libsql::Error) -> bool {
        err.to_string().contains("UNIQUE constraint failed")
    }
}

#[async_trait]
impl Storage for DatabaseStorage {
    async fn get_all_posts(&self) -> Result<Vec<Post>> {
        let conn = self.db.get_connection()?;
        let mut rows = conn
            .query(&format!("SELECT {POST_COLUMNS} FROM post"), ())
            .await
            .map_err(|e| AppError::database(format!("Failed to query posts: {e}")))?;

        let mut posts = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::database(format!("Failed to read row: {e}")))?
        {
            posts.push(Self::row_to_post(&row)?);
        }
        Ok(posts)
    }

    async fn get_post_by_id(&self, id: PostId) -> Result<Option<Post>> {
        let conn = self.db.get_connection()?;
        let mut rows = conn
            .query(
                &format!("SELECT {POST_COLUMNS} FROM post WHERE id = ?1"),
                libsql::params![i64::from(id)],
            )
            .await
            .map_err(|e| AppError::database(format!("Failed to query post: {e}")))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::database(format!("Failed to read row: {e}")))?
        {
            Some(row) => Ok(Some(Self::row_to_post(&row)?)),
            None => Ok(None),
        }
    }

    async fn create_post(&self, post: &mut Post) -> Result<()> {
        let conn = self.db.get_connection()?;
        conn.execute(
            "INSERT INTO post (created_at, updated_at, title) VALUES (?1, ?2, ?3)",
            libsql::params![
                post.created_at.to_rfc3339(),
                post.updated_at.to_rfc3339(),
                post.title.clone()
            ],
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to insert post: {e}")))?;

        let id = Self::to_id(conn.last_insert_rowid())?;
        post.id = Some(id);

        debug!("Created post: {} with id {}", post.title, id);
        Ok(())
    }

    async fn update_post(&self, post: &Post) -> Result<u64> {
        let id = post
            .id
            .ok_or_else(|| AppError::database("Cannot update a post without an id"))?;
        let conn = self.db.get_connection()?;
        let changed = conn
            .execute(
                "UPDATE post SET title = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![post.title.clone(), post.updated_at.to_rfc3339(), i64::from(id)],
            )
            .await
            .map_err(|e| AppError::database(format!("Failed to update post: {e}")))?;

        debug!("Updated {} post(s) with id {}", changed, id);
        Ok(changed)
    }

    async fn delete_post(&self, id: PostId) -> Result<u64> {
        let conn = self.db.get_connection()?;
        let removed = conn
            .execute("DELETE FROM post WHERE id = ?1", libsql::params![i64::from(id)])
            .await
            .map_err(|e| AppError::database(format!("Failed to delete post: {e}")))?;

        debug!("Deleted {} post(s) with id {}", removed, id);
        Ok(removed)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.db.get_connection()?;
        let mut rows = conn
            .query(
                &format!("SELECT {USER_COLUMNS} FROM \"user\" WHERE username = ?1"),
                libsql::params![username],
            )
            .await
            .map_err(|e| AppError::database(format!("Failed to query user: {e}")))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::database(format!("Failed to read row: {e}")))?
        {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create_user(&self, user: &mut User) -> Result<()> {
        let conn = self.db.get_connection()?;
        let inserted = conn
            .execute(
                "INSERT INTO \"user\" (created_at, updated_at, username, password) \
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    user.created_at.to_rfc3339(),
                    user.updated_at.to_rfc3339(),
                    user.username.clone(),
                    user.password.clone()
                ],
            )
            .await;

        match inserted {
            Ok(_) => {}
            Err(e) if Self::is_unique_violation(&e) => {
                return Err(AppError::UniqueViolation {
                    field: USERNAME_FIELD.to_string(),
                })
            }
            Err(e) => return Err(AppError::database(format!("Failed to insert user: {e}"))),
        }

        let id = Self::to_id(conn.last_insert_rowid())?;
        user.id = Some(id);

        debug!("Created user: {} with id {}", user.username, id);
        Ok(())
    }
}

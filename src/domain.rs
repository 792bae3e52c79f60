use chrono::{DateTime, Utc};
use serde::Serialize;

pub type PostId = i32;
pub type UserId = i32;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Assigned by storage on insert
    pub id: Option<PostId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
}

impl Post {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            created_at: now,
            updated_at: now,
            title: title.into(),
        }
    }

    /// Replace the title and refresh `updated_at`
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    /// argon2 PHC string, never the plaintext
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            created_at: now,
            updated_at: now,
            username: username.into(),
            password: password_hash.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_has_matching_timestamps_and_no_id() {
        let post = Post::new("first");
        assert_eq!(post.id, None);
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(post.title, "first");
    }

    #[test]
    fn rename_refreshes_updated_at_only() {
        let mut post = Post::new("before");
        let created = post.created_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        post.rename("after");
        assert_eq!(post.title, "after");
        assert_eq!(post.created_at, created);
        assert!(post.updated_at > created);
    }

    #[test]
    fn user_serialization_omits_password() {
        let user = User::new("alice1", "$argon2id$v=19$...");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "alice1");
        assert!(json.get("password").is_none());
    }
}

use crate::domain::Post as DomainPost;
use async_graphql::Object;

/// GraphQL representation of a Post
#[derive(Clone)]
pub struct Post {
    pub inner: DomainPost,
}

impl From<DomainPost> for Post {
    fn from(post: DomainPost) -> Self {
        Self { inner: post }
    }
}

#[Object]
impl Post {
    /// The unique identifier for the post
    async fn id(&self) -> i32 {
        self.inner.id.unwrap_or_default()
    }

    /// Creation time, in milliseconds since the Unix epoch
    async fn created_at(&self) -> String {
        super::epoch_millis(&self.inner.created_at)
    }

    /// Last modification time, in milliseconds since the Unix epoch
    async fn updated_at(&self) -> String {
        super::epoch_millis(&self.inner.updated_at)
    }

    async fn title(&self) -> &str {
        &self.inner.title
    }
}

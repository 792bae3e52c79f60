use crate::domain::Post as DomainPost;
use crate::graphql::schema::GraphQLContext;
use crate::graphql::types::Post;
use crate::metrics;
use async_graphql::{Context, FieldResult, Object};
use tracing::{debug, info};

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// Get all posts
    async fn posts(&self, ctx: &Context<'_>) -> FieldResult<Vec<Post>> {
        let context = ctx.data::<GraphQLContext>()?;

        match context.storage.get_all_posts().await {
            Ok(posts) => Ok(posts.into_iter().map(|p| p.into()).collect()),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a post by ID, or null if there is none
    async fn post(&self, ctx: &Context<'_>, id: i32) -> FieldResult<Option<Post>> {
        let context = ctx.data::<GraphQLContext>()?;

        match context.storage.get_post_by_id(id).await {
            Ok(post) => Ok(post.map(|p| p.into())),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Create a post. The title is stored as given, empty or not.
    async fn create_post(&self, ctx: &Context<'_>, title: String) -> FieldResult<Post> {
        let context = ctx.data::<GraphQLContext>()?;

        let mut post = DomainPost::new(title);
        context.storage.create_post(&mut post).await?;

        info!(post_id = ?post.id, "Created post");
        metrics::posts::created();
        Ok(post.into())
    }

    /// Change a post's title; null if the post does not exist
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: i32,
        title: String,
    ) -> FieldResult<Option<Post>> {
        let context = ctx.data::<GraphQLContext>()?;

        let Some(mut post) = context.storage.get_post_by_id(id).await? else {
            debug!(post_id = id, "Update skipped, post not found");
            return Ok(None);
        };

        post.rename(title);
        if context.storage.update_post(&post).await? == 0 {
            debug!(post_id = id, "Update skipped, post removed concurrently");
            return Ok(None);
        }

        info!(post_id = id, "Updated post");
        metrics::posts::updated();
        Ok(Some(post.into()))
    }

    /// Delete a post; false if nothing matched
    async fn delete_post(&self, ctx: &Context<'_>, id: i32) -> FieldResult<bool> {
        let context = ctx.data::<GraphQLContext>()?;

        let removed = context.storage.delete_post(id).await?;
        if removed == 0 {
            return Ok(false);
        }

        info!(post_id = id, "Deleted post");
        metrics::posts::deleted();
        Ok(true)
    }
}

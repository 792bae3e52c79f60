pub mod hello;
pub mod post;
pub mod user;

use async_graphql::MergedObject;

pub use hello::HelloQuery;
pub use post::{PostMutation, PostQuery};
pub use user::UserMutation;

/// Root query object for GraphQL
#[derive(MergedObject, Default)]
pub struct Query(HelloQuery, PostQuery);

/// Root mutation object for GraphQL
#[derive(MergedObject, Default)]
pub struct Mutation(PostMutation, UserMutation);

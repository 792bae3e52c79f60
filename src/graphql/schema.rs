use crate::auth::PasswordHasher;
use crate::graphql::resolvers::{Mutation, Query};
use crate::storage::Storage;
use async_graphql::{EmptySubscription, Schema};
use std::sync::Arc;
use uuid::Uuid;

/// Per-request context: the persistence handle a resolver may use, scoped to
/// one GraphQL request
pub struct GraphQLContext {
    pub storage: Arc<dyn Storage>,
    pub request_id: Uuid,
}

impl GraphQLContext {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            request_id: Uuid::new_v4(),
        }
    }
}

/// The complete GraphQL schema
pub type GraphQLSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema. Storage is not part of the schema; it arrives with each
/// request as a [`GraphQLContext`].
pub fn create_schema(hasher: Arc<dyn PasswordHasher>) -> GraphQLSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(hasher)
        .finish()
}

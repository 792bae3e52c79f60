use crate::constants::HELLO_REPLY;
use async_graphql::Object;

#[derive(Default)]
pub struct HelloQuery;

#[Object]
impl HelloQuery {
    /// Liveness check for the GraphQL layer
    async fn hello(&self) -> &'static str {
        HELLO_REPLY
    }
}

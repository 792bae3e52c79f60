use crate::auth::PasswordHasher;
use crate::constants::ROOT_GREETING;
use crate::graphql::schema::{create_schema, GraphQLContext, GraphQLSchema};
use crate::metrics;
use crate::storage::Storage;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    http::Method,
    response::{Html, IntoResponse, Json},
    routing::get,
    Extension, Router,
};
use hyper::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, Instrument};

/// Plain-text greeting on `/`
async fn root() -> &'static str {
    ROOT_GREETING
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "reddit-server-graphql",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus text exposition
async fn metrics_endpoint() -> impl IntoResponse {
    metrics::render()
}

/// GraphQL handler (supports GET and POST).
///
/// Every request gets its own [`GraphQLContext`], dropped when the response
/// is produced.
async fn graphql_handler(
    Extension(schema): Extension<GraphQLSchema>,
    Extension(storage): Extension<Arc<dyn Storage>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let context = GraphQLContext::new(storage);
    let span = info_span!("graphql_request", request_id = %context.request_id);
    metrics::graphql_request();

    schema
        .execute(req.into_inner().data(context))
        .instrument(span)
        .await
        .into()
}

/// GraphiQL IDE
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Create the HTTP server with all routes, including GraphQL
pub fn create_server(storage: Arc<dyn Storage>, hasher: Arc<dyn PasswordHasher>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let schema = create_schema(hasher);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .route("/graphql", get(graphql_handler).post(graphql_handler))
        .route("/graphiql", get(graphiql))
        .layer(Extension(schema))
        .layer(Extension(storage))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Start the HTTP server and serve until the process is stopped
pub async fn start_server(
    storage: Arc<dyn Storage>,
    hasher: Arc<dyn PasswordHasher>,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let app = create_server(storage, hasher);

    info!("HTTP server listening on http://{addr}");
    info!("GraphQL:      http://{addr}/graphql");
    info!("GraphiQL UI:  http://{addr}/graphiql");

    Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

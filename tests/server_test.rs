use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use reddit_server::auth::{Argon2Hasher, PasswordHasher};
use reddit_server::server::create_server;
use reddit_server::storage::{InMemoryStorage, Storage};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> axum::Router {
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());
    create_server(storage, hasher)
}

async fn body_string(response: axum::response::Response) -> Result<String> {
    let bytes = hyper::body::to_bytes(response.into_body()).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

fn graphql_post(body: Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri("/graphql")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?)
}

#[tokio::test]
async fn root_greets_the_client() -> Result<()> {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await?, "Hello client!");
    Ok(())
}

#[tokio::test]
async fn health_reports_healthy() -> Result<()> {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await?)?;
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn graphiql_serves_html() -> Result<()> {
    let response = app()
        .oneshot(Request::builder().uri("/graphiql").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await?.contains("/graphql"));
    Ok(())
}

#[tokio::test]
async fn graphql_post_executes_against_request_storage() -> Result<()> {
    let app = app();

    let create = graphql_post(json!({
        "query": "mutation { createPost(title: \"over http\") { id title } }"
    }))?;
    let response = app.clone().oneshot(create).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await?)?;
    assert_eq!(body["data"]["createPost"], json!({ "id": 1, "title": "over http" }));

    // Storage is shared across requests even though each request gets its own context
    let list = graphql_post(json!({ "query": "{ posts { title } }" }))?;
    let response = app.oneshot(list).await?;
    let body: Value = serde_json::from_str(&body_string(response).await?)?;
    assert_eq!(body["data"]["posts"], json!([{ "title": "over http" }]));
    Ok(())
}

#[tokio::test]
async fn graphql_get_runs_queries() -> Result<()> {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/graphql?query=%7B%20hello%20%7D")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await?)?;
    assert_eq!(body["data"]["hello"], "hello world");
    Ok(())
}

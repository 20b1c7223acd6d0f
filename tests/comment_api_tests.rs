use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use devhub_comments::{
    config::Config,
    create_app,
    models::user::UserProfile,
    services::{AuthService, CommentService, Database, UserService},
    state::AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const TEST_USER_ID: &str = "9b2f1a3c-0d4e-4b6a-8f21-5c7e9d0a1b2c";

fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        environment: "test".to_string(),
        database_url: "mem://".to_string(),
        database_namespace: "devhub_test".to_string(),
        database_name: "comments_test".to_string(),
        database_username: "root".to_string(),
        database_password: "root".to_string(),
        jwt_secret: "test-secret".to_string(),
        cors_allowed_origins: "http://localhost:3001".to_string(),
    }
}

async fn test_state() -> Arc<AppState> {
    let config = test_config();
    let db = Arc::new(Database::new(&config).await.expect("in-memory database"));
    let auth_service = AuthService::new(&config);
    let user_service = UserService::new(db.clone()).await.expect("user service");
    let comment_service = CommentService::new(db.clone(), user_service.clone())
        .await
        .expect("comment service");

    Arc::new(AppState {
        config,
        db: (*db).clone(),
        auth_service,
        user_service,
        comment_service,
    })
}

async fn seed_profile(state: &Arc<AppState>) -> UserProfile {
    state
        .user_service
        .create_profile(&UserProfile {
            id: TEST_USER_ID.to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            avatar: Some("https://gravatar.example/ada".to_string()),
            created_at: chrono::Utc::now(),
        })
        .await
        .expect("seeded profile")
}

fn bearer(state: &Arc<AppState>) -> String {
    let token = state
        .auth_service
        .issue_jwt(TEST_USER_ID, 3600)
        .expect("token");
    format!("Bearer {}", token)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_json(uri: &str, payload: Value, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(authorization) = authorization {
        builder = builder.header(header::AUTHORIZATION, authorization);
    }

    builder
        .body(Body::from(payload.to_string()))
        .expect("request")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request handled");
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("response body");

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, body)
}

#[tokio::test]
async fn listing_comments_on_empty_store_returns_empty_array() {
    let state = test_state().await;
    let app = create_app(state);

    let (status, body) = send(app, get_request("/api/comments")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn creating_without_authentication_returns_401_and_persists_nothing() {
    let state = test_state().await;
    seed_profile(&state).await;
    let app = create_app(state);

    let (status, _) = send(
        app.clone(),
        post_json(
            "/api/comments",
            json!({ "text": "First!", "post": "post-42" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = send(app, get_request("/api/comments")).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn creating_with_invalid_token_returns_401() {
    let state = test_state().await;
    seed_profile(&state).await;
    let app = create_app(state);

    let (status, _) = send(
        app,
        post_json(
            "/api/comments",
            json!({ "text": "First!", "post": "post-42" }),
            Some("Bearer not-a-real-token"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn creating_with_empty_text_returns_400_with_error_list() {
    let state = test_state().await;
    seed_profile(&state).await;
    let authorization = bearer(&state);
    let app = create_app(state);

    let (status, body) = send(
        app,
        post_json(
            "/api/comments",
            json!({ "text": "", "post": "post-42" }),
            Some(&authorization),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["param"], "text");
    assert_eq!(errors[0]["msg"], "Comment text is required");
}

#[tokio::test]
async fn created_comment_is_retrievable_with_identical_fields() {
    let state = test_state().await;
    seed_profile(&state).await;
    let authorization = bearer(&state);
    let app = create_app(state);

    let (status, created) = send(
        app.clone(),
        post_json(
            "/api/comments",
            json!({ "text": "First!", "post": "post-42" }),
            Some(&authorization),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["text"], "First!");
    assert_eq!(created["post"], "post-42");
    assert_eq!(created["user"], TEST_USER_ID);
    assert_eq!(created["parentComment"], Value::Null);
    assert_eq!(created["name"], "Ada Lovelace");
    assert_eq!(created["avatar"], "https://gravatar.example/ada");

    let id = created["id"].as_str().expect("assigned id");
    let (status, fetched) = send(app.clone(), get_request(&format!("/api/comments/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, listed) = send(app, get_request("/api/comments")).await;
    assert_eq!(listed.as_array().expect("comment list").len(), 1);
}

#[tokio::test]
async fn replies_reference_their_parent_comment() {
    let state = test_state().await;
    seed_profile(&state).await;
    let authorization = bearer(&state);
    let app = create_app(state);

    let (_, parent) = send(
        app.clone(),
        post_json(
            "/api/comments",
            json!({ "text": "First!", "post": "post-42" }),
            Some(&authorization),
        ),
    )
    .await;
    let parent_id = parent["id"].as_str().expect("parent id");

    let (status, reply) = send(
        app.clone(),
        post_json(
            "/api/comments",
            json!({ "text": "Agreed", "post": "post-42", "parentComment": parent_id }),
            Some(&authorization),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["parentComment"], parent_id);

    // Parent references are stored verbatim; replies to ids that do not
    // resolve are deliberately accepted.
    let (status, orphan) = send(
        app,
        post_json(
            "/api/comments",
            json!({ "text": "Into the void", "post": "post-42", "parentComment": "missing" }),
            Some(&authorization),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orphan["parentComment"], "missing");
}

#[tokio::test]
async fn getting_a_missing_comment_returns_404_with_msg_body() {
    let state = test_state().await;
    let app = create_app(state);

    let (status, body) = send(app, get_request("/api/comments/nonexistent")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "msg": "Comment not found" }));
}

#[tokio::test]
async fn denormalized_author_snapshot_survives_profile_edits() {
    let state = test_state().await;
    seed_profile(&state).await;
    let authorization = bearer(&state);
    let app = create_app(state.clone());

    let (_, created) = send(
        app.clone(),
        post_json(
            "/api/comments",
            json!({ "text": "First!", "post": "post-42" }),
            Some(&authorization),
        ),
    )
    .await;
    let id = created["id"].as_str().expect("assigned id").to_string();

    state
        .db
        .query_with_params(
            "UPDATE type::thing('user_profile', $id) SET name = $name, avatar = $avatar",
            json!({
                "id": TEST_USER_ID,
                "name": "A. Byron",
                "avatar": "https://gravatar.example/byron",
            }),
        )
        .await
        .expect("profile updated");

    let profile = state
        .user_service
        .get_profile(TEST_USER_ID)
        .await
        .expect("profile query")
        .expect("profile present");
    assert_eq!(profile.name, "A. Byron");

    let (_, fetched) = send(app, get_request(&format!("/api/comments/{}", id))).await;
    assert_eq!(fetched["name"], "Ada Lovelace");
    assert_eq!(fetched["avatar"], "https://gravatar.example/ada");
}

#[tokio::test]
async fn authenticated_user_without_profile_gets_opaque_500() {
    let state = test_state().await;
    let authorization = bearer(&state);
    let app = create_app(state);

    let (status, body) = send(
        app,
        post_json(
            "/api/comments",
            json!({ "text": "First!", "post": "post-42" }),
            Some(&authorization),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "msg": "Server error" }));
}

#[tokio::test]
async fn health_check_is_public() {
    let state = test_state().await;
    let app = create_app(state);

    let response = app
        .oneshot(get_request("/health"))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);
}

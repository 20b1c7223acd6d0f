use crate::{
    error::{AppError, Result},
    models::comment::{Comment, CreateCommentRequest},
    services::auth::AuthUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_comments))
        .route("/", post(create_comment))
        .route("/:id", get(get_comment))
}

/// GET /api/comments — every comment, public.
async fn list_comments(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Comment>>> {
    let comments = state.comment_service.list_comments().await?;
    Ok(Json(comments))
}

/// POST /api/comments — add a comment, authenticated.
async fn create_comment(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Json<Comment>> {
    let comment = state
        .comment_service
        .create_comment(&user.id, request)
        .await?;

    Ok(Json(comment))
}

/// GET /api/comments/:id — a single comment, public.
async fn get_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<String>,
) -> Result<Json<Comment>> {
    let comment = state
        .comment_service
        .get_comment(&comment_id)
        .await?
        .ok_or_else(|| AppError::not_found("Comment"))?;

    Ok(Json(comment))
}

use crate::{error::AppError, services::auth::AuthUser, state::AppState};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Authentication middleware.
///
/// Validates a bearer token when one is present and attaches the
/// authenticated user id to the request. Handlers that require
/// authentication extract [`AuthUser`]; public routes never look for it, so
/// unauthenticated requests pass through untouched.
pub async fn auth_middleware(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request<Body>,
    next: Next<Body>,
) -> Result<Response, AppError> {
    if let Some(auth_header) = headers.get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                match app_state.auth_service.verify_jwt(token) {
                    Ok(claims) => {
                        debug!("Authenticated user: {}", claims.sub);
                        request.extensions_mut().insert(AuthUser { id: claims.sub });
                    }
                    Err(e) => {
                        // The request continues unauthenticated; protected
                        // handlers reject it at extraction time.
                        debug!("Rejected bearer token: {}", e);
                    }
                }
            }
        }
    }

    Ok(next.run(request).await)
}

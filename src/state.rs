use crate::{
    config::Config,
    services::{AuthService, CommentService, Database, UserService},
};

/// Shared application state: configuration plus the collaborators every
/// request path draws its dependencies from.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub comment_service: CommentService,
}

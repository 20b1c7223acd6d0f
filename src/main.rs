use anyhow::Context;
use devhub_comments::{
    config::Config,
    create_app,
    services::{AuthService, CommentService, Database, UserService},
    state::AppState,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "devhub_comments=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting comment service...");

    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    info!("Environment: {}", config.environment);

    let db = Arc::new(match Database::new(&config).await {
        Ok(db) => {
            db.verify_connection()
                .await
                .context("Database connection failed")?;
            info!("Database connection established successfully");
            db
        }
        Err(e) => {
            error!("Failed to create database connection: {}", e);
            return Err(anyhow::anyhow!("Database initialization failed"));
        }
    });

    let auth_service = AuthService::new(&config);
    let user_service = UserService::new(db.clone()).await?;
    let comment_service = CommentService::new(db.clone(), user_service.clone()).await?;

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: (*db).clone(),
        auth_service,
        user_service,
        comment_service,
    });

    let app = create_app(app_state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting server on http://{}", addr);

    axum::Server::bind(&addr.parse()?)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

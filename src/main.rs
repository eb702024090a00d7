//! vlog - blog platform backend

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vlog::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{SqlxPostRepository, SqlxTagRepository},
    },
    services::{PostService, TagService},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vlog=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting vlog...");

    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    db::ensure_schema(&pool).await?;
    tracing::info!("Database schema ready");

    let tag_repo = SqlxTagRepository::boxed(pool.clone());
    let post_service = Arc::new(PostService::new(
        SqlxPostRepository::boxed(pool.clone()),
        tag_repo.clone(),
    ));
    let tag_service = Arc::new(TagService::new(tag_repo));

    let state = AppState {
        pool: pool.clone(),
        post_service,
        tag_service,
        search_config: Arc::new(config.search.clone()),
    };

    let app = api::build_router(state, &config.server.cors_origin)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    pool.close().await;
    Ok(())
}

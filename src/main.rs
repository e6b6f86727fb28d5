use std::sync::Arc;

use movie_api::{AppState, config::Config, db, store::MovieStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movie_api=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url, config.db_max_connections).await?;
    let state = Arc::new(AppState { movies: MovieStore::new(db) });

    let app = movie_api::app(state, config.cors_enabled);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, cors = config.cors_enabled, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

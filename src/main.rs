use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinematch_api::{
    api::{create_router, AppState},
    config::Config,
    services::{loader, posters::TmdbPosterProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let posters = TmdbPosterProvider::from_config(&config)?;
    let state = AppState::new(config.clone(), Arc::new(posters));

    spawn_artifact_load(state.clone());

    let app = create_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads the startup artifacts in the background.
///
/// A missing or malformed artifact leaves the service answering 503 on the
/// data endpoints; it never takes the process down.
fn spawn_artifact_load(state: AppState) {
    tokio::spawn(async move {
        let movies_path = state.config.movies_path.clone();
        let similarity_path = state.config.similarity_path.clone();
        tracing::info!(%movies_path, %similarity_path, "Loading recommendation artifacts");

        let result =
            tokio::task::spawn_blocking(move || loader::load_engine(&movies_path, &similarity_path))
                .await;

        match result {
            Ok(Ok(engine)) => state.install_engine(engine).await,
            Ok(Err(e)) => tracing::error!(
                error = %e,
                "Failed to load recommendation artifacts; service will report unavailable"
            ),
            Err(e) => tracing::error!(error = %e, "Artifact load task failed"),
        }
    });
}

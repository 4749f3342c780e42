use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::Config,
    services::{posters::PosterProvider, RecommendationEngine},
};

/// Shared application state
///
/// The engine slot starts empty and is filled exactly once, by the startup
/// load task. Until then handlers report the not-loaded condition; after
/// that the engine is only ever read.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<Option<RecommendationEngine>>>,
    pub posters: Arc<dyn PosterProvider>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state in the not-loaded condition.
    pub fn new(config: Config, posters: Arc<dyn PosterProvider>) -> Self {
        Self {
            engine: Arc::new(RwLock::new(None)),
            posters,
            config: Arc::new(config),
        }
    }

    /// Marks the service ready by installing a loaded engine.
    pub async fn install_engine(&self, engine: RecommendationEngine) {
        *self.engine.write().await = Some(engine);
        tracing::info!("Recommendation engine installed; service is ready");
    }

    /// Whether the startup load has completed.
    pub async fn is_ready(&self) -> bool {
        self.engine.read().await.is_some()
    }
}

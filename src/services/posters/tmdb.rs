//! TMDB poster provider
//!
//! Resolves poster URLs via TMDB's movie-details endpoint:
//! `GET /movie/{id}?api_key=…&language=en-US`, taking the optional
//! `poster_path` field and composing it onto the configured image base URL.
//!
//! Lookups are memoized in-process with a TTL; both hits and misses are
//! cached so a movie without a poster does not trigger a fetch per request.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tokio::sync::RwLock;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::posters::PosterProvider,
};

pub struct TmdbPosterProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    image_url: String,
    cache_ttl: Duration,
    cache: RwLock<HashMap<i64, CachedPoster>>,
}

struct CachedPoster {
    resolved_at: Instant,
    url: Option<String>,
}

impl TmdbPosterProvider {
    /// Creates a provider from application configuration.
    ///
    /// A missing API key is not an error here; it degrades every lookup to
    /// `None` instead of failing startup.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        if config.tmdb_api_key.is_none() {
            tracing::warn!("TMDB_API_KEY is not set; poster resolution is disabled");
        }

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.poster_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            image_url: config.tmdb_image_url.clone(),
            cache_ttl: Duration::from_secs(config.poster_cache_ttl_secs),
            cache: RwLock::new(HashMap::new()),
        })
    }

    async fn resolve(&self, movie_id: i64) -> AppResult<Option<String>> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return Ok(None),
        };

        let url = format!("{}/movie/{}", self.api_url, movie_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key.as_str()), ("language", "en-US")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {} for movie {}",
                response.status(),
                movie_id
            )));
        }

        let details: serde_json::Value = response.json().await?;
        Ok(extract_poster_path(&details).map(|path| compose_poster_url(&self.image_url, path)))
    }
}

#[async_trait]
impl PosterProvider for TmdbPosterProvider {
    async fn poster_url(&self, movie_id: i64) -> Option<String> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(&movie_id) {
                if entry.resolved_at.elapsed() < self.cache_ttl {
                    return entry.url.clone();
                }
            }
        }

        let url = match self.resolve(movie_id).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "Poster lookup failed");
                None
            }
        };

        let mut cache = self.cache.write().await;
        cache.insert(
            movie_id,
            CachedPoster {
                resolved_at: Instant::now(),
                url: url.clone(),
            },
        );

        url
    }
}

fn extract_poster_path(details: &serde_json::Value) -> Option<&str> {
    details.get("poster_path")?.as_str()
}

fn compose_poster_url(image_base: &str, poster_path: &str) -> String {
    format!("{}{}", image_base, poster_path)
}

use async_trait::async_trait;

pub mod tmdb;

pub use tmdb::TmdbPosterProvider;

/// Poster metadata provider abstraction
///
/// Poster resolution is best-effort: implementations return `None` for any
/// failure (missing credentials, network error, non-2xx status, missing
/// field) rather than an error. A poster that cannot be resolved must never
/// fail or block the recommendation response it decorates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PosterProvider: Send + Sync {
    /// Resolves a full poster image URL for a movie id, if one exists.
    async fn poster_url(&self, movie_id: i64) -> Option<String>;
}

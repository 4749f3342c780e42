use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::Movie;
use crate::services::engine::DEFAULT_RECOMMENDATIONS;

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub movie_name: String,
    pub id: i64,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_name: movie.title.clone(),
            id: movie.id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub movie_name: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<String>,
    pub poster_paths: Vec<String>,
}

// Handlers

/// Health check endpoint; `ready` reports whether the startup load finished
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "ready": state.is_ready().await,
    }))
}

/// Full movie catalog, in load order
pub async fn get_movies(State(state): State<AppState>) -> AppResult<Json<Vec<MovieResponse>>> {
    let guard = state.engine.read().await;
    let engine = guard.as_ref().ok_or(AppError::NotLoaded)?;
    let movies = engine.movies().iter().map(MovieResponse::from).collect();
    Ok(Json(movies))
}

/// Ranked recommendations for a movie, with best-effort poster URLs
///
/// `poster_paths` is positionally aligned with `recommendations`; an
/// unresolved poster is the empty string on the wire.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    if request.movie_name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "movie_name cannot be empty".to_string(),
        ));
    }

    // The read guard is held only for the lookup, not the poster fetches.
    let ranked = {
        let guard = state.engine.read().await;
        let engine = guard.as_ref().ok_or(AppError::NotLoaded)?;
        engine.recommend(&request.movie_name, DEFAULT_RECOMMENDATIONS)?
    };

    let mut recommendations = Vec::with_capacity(ranked.len());
    let mut poster_paths = Vec::with_capacity(ranked.len());
    for rec in ranked {
        let poster = state.posters.poster_url(rec.movie.id).await;
        poster_paths.push(poster.unwrap_or_default());
        recommendations.push(rec.movie.title);
    }

    Ok(Json(RecommendResponse {
        recommendations,
        poster_paths,
    }))
}

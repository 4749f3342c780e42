use serde::{Deserialize, Serialize};

/// A catalog entry, one row of the movie table.
///
/// The artifact uses the upstream dataset's column names (`movie_id`,
/// `title`); `movie_id` is the TMDB identifier used for poster lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "movie_id")]
    pub id: i64,
    pub title: String,
}

/// A single ranked recommendation produced by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie: Movie,
    pub score: f32,
}

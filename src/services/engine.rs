use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, Recommendation},
};

/// Number of recommendations returned per query
pub const DEFAULT_RECOMMENDATIONS: usize = 5;

/// In-memory recommendation engine
///
/// Owns the movie catalog and the precomputed similarity matrix. Built once
/// at startup by the loader and never mutated afterwards; all operations are
/// read-only. `score(i, j)` is the similarity between catalog rows `i` and
/// `j`, and the matrix row order is 1:1 with the catalog order — a mismatch
/// is rejected at construction rather than trusted.
#[derive(Debug)]
pub struct RecommendationEngine {
    movies: Vec<Movie>,
    matrix: Vec<Vec<f32>>,
}

impl RecommendationEngine {
    /// Builds an engine, validating catalog/matrix alignment.
    ///
    /// The matrix must be square with one row per catalog entry. Duplicate
    /// titles are allowed but logged, since lookups resolve to the first
    /// matching row.
    pub fn new(movies: Vec<Movie>, matrix: Vec<Vec<f32>>) -> AppResult<Self> {
        if movies.is_empty() {
            return Err(AppError::Artifact("movie catalog is empty".to_string()));
        }
        if matrix.len() != movies.len() {
            return Err(AppError::Artifact(format!(
                "similarity matrix has {} rows but the catalog has {} movies",
                matrix.len(),
                movies.len()
            )));
        }
        for (i, row) in matrix.iter().enumerate() {
            if row.len() != movies.len() {
                return Err(AppError::Artifact(format!(
                    "similarity matrix row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    movies.len()
                )));
            }
        }

        {
            let mut seen = std::collections::HashSet::with_capacity(movies.len());
            for movie in &movies {
                if !seen.insert(movie.title.as_str()) {
                    tracing::warn!(
                        title = %movie.title,
                        "Duplicate title in catalog; lookups will resolve to the first occurrence"
                    );
                }
            }
        }

        Ok(Self { movies, matrix })
    }

    /// The full catalog, in load order.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Returns up to `k` movies most similar to `title`, best first.
    ///
    /// Title matching is exact and case-sensitive; the first matching
    /// catalog row wins. The queried movie itself is never returned. Ties
    /// in score preserve catalog order (the sort is stable), so repeated
    /// calls are deterministic.
    pub fn recommend(&self, title: &str, k: usize) -> AppResult<Vec<Recommendation>> {
        let query_index = self
            .movies
            .iter()
            .position(|m| m.title == title)
            .ok_or_else(|| AppError::NotFound(title.to_string()))?;

        let row = &self.matrix[query_index];
        let mut scored: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
        // NaN scores compare as equal so the sort stays total and stable.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let recommendations = scored
            .into_iter()
            .filter(|(index, _)| *index != query_index)
            .take(k)
            .map(|(index, score)| Recommendation {
                movie: self.movies[index].clone(),
                score,
            })
            .collect();

        Ok(recommendations)
    }
}

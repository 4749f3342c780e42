pub mod engine;
pub mod loader;
pub mod posters;

pub use engine::RecommendationEngine;

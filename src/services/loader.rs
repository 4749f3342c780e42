use std::{fs, path::Path};

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::engine::RecommendationEngine,
};

/// Startup artifact loading
///
/// Two externally-produced JSON artifacts back the service:
/// - the movie catalog: an array of `{"movie_id": i64, "title": String}`
/// - the similarity matrix: an array of equal-length float arrays, one row
///   per catalog entry
///
/// Both are read once at process start. Any failure here leaves the service
/// in the "not loaded" state; it never crashes the process.
pub fn load_engine(
    movies_path: impl AsRef<Path>,
    similarity_path: impl AsRef<Path>,
) -> AppResult<RecommendationEngine> {
    let movies = load_catalog(movies_path.as_ref())?;
    let matrix = load_matrix(similarity_path.as_ref())?;

    let engine = RecommendationEngine::new(movies, matrix)?;
    tracing::info!(
        movies = engine.movies().len(),
        "Recommendation artifacts loaded"
    );
    Ok(engine)
}

fn load_catalog(path: &Path) -> AppResult<Vec<Movie>> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Artifact(format!("failed to parse {}: {}", path.display(), e)))
}

fn load_matrix(path: &Path) -> AppResult<Vec<Vec<f32>>> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Artifact(format!("failed to parse {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct ArtifactDir {
        dir: PathBuf,
    }

    impl ArtifactDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("cinematch-{}-{}", name, std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            Self { dir }
        }

        fn write(&self, file: &str, contents: &str) -> PathBuf {
            let path = self.dir.join(file);
            fs::write(&path, contents).unwrap();
            path
        }
    }

    impl Drop for ArtifactDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn loads_engine_from_json_artifacts() {
        let dir = ArtifactDir::new("load-ok");
        let movies = dir.write(
            "movie_list.json",
            r#"[{"movie_id": 1, "title": "Avatar"},
                {"movie_id": 2, "title": "Titanic"},
                {"movie_id": 3, "title": "Up"}]"#,
        );
        let matrix = dir.write(
            "similarity.json",
            "[[1.0, 0.3, 0.9], [0.3, 1.0, 0.5], [0.9, 0.5, 1.0]]",
        );

        let engine = load_engine(&movies, &matrix).unwrap();
        assert_eq!(engine.movies().len(), 3);
        assert_eq!(engine.movies()[0].title, "Avatar");

        let recs = engine.recommend("Avatar", 5).unwrap();
        let titles: Vec<&str> = recs.iter().map(|r| r.movie.title.as_str()).collect();
        assert_eq!(titles, vec!["Up", "Titanic"]);
    }

    #[test]
    fn missing_artifact_is_an_io_error() {
        let dir = ArtifactDir::new("load-missing");
        let matrix = dir.write("similarity.json", "[[1.0]]");
        let err = load_engine(dir.dir.join("nope.json"), matrix).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn malformed_catalog_is_an_artifact_error() {
        let dir = ArtifactDir::new("load-bad-catalog");
        let movies = dir.write("movie_list.json", r#"[{"title": "missing id"}]"#);
        let matrix = dir.write("similarity.json", "[[1.0]]");
        let err = load_engine(movies, matrix).unwrap_err();
        assert!(matches!(err, AppError::Artifact(_)));
    }

    #[test]
    fn misaligned_artifacts_are_rejected() {
        let dir = ArtifactDir::new("load-misaligned");
        let movies = dir.write(
            "movie_list.json",
            r#"[{"movie_id": 1, "title": "A"}, {"movie_id": 2, "title": "B"}]"#,
        );
        let matrix = dir.write("similarity.json", "[[1.0, 0.5]]");
        let err = load_engine(movies, matrix).unwrap_err();
        assert!(matches!(err, AppError::Artifact(_)));
    }
}

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the serialized movie catalog artifact
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Path to the serialized similarity matrix artifact
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// TMDB API key; posters degrade to "no image" when absent
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL poster paths are composed onto
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Per-request timeout for poster metadata fetches, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// How long resolved poster URLs are memoized, in seconds
    #[serde(default = "default_poster_cache_ttl_secs")]
    pub poster_cache_ttl_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movies_path() -> String {
    "data/movie_list.json".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_poster_cache_ttl_secs() -> u64 {
    3600
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

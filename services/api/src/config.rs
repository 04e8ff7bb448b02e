//! Service configuration

use anyhow::Result;

/// Top-level settings of the API service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Socket address to listen on
    pub bind_addr: String,
    /// Origins allowed by CORS; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl ServiceConfig {
    /// Create a new ServiceConfig from environment variables
    ///
    /// # Environment Variables
    /// - `API_BIND_ADDR`: Listen address (default: "0.0.0.0:3001")
    /// - `CORS_ALLOWED_ORIGINS`: Comma-separated origins (default: any)
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            std::env::var("API_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());

        let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(ServiceConfig {
            bind_addr,
            allowed_origins,
        })
    }
}

/// Upstream movie database settings
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    /// Cache TTL for upstream responses in seconds
    pub cache_ttl: u64,
}

impl TmdbConfig {
    /// Create a new TmdbConfig from environment variables
    ///
    /// # Environment Variables
    /// - `TMDB_API_KEY`: API key (required)
    /// - `TMDB_BASE_URL`: API base URL (default: "https://api.themoviedb.org/3")
    /// - `TMDB_LANGUAGE`: Response language (default: "ko-KR")
    /// - `MOVIE_CACHE_TTL`: Cache TTL in seconds (default: 600)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TMDB_API_KEY")
            .map_err(|_| anyhow::anyhow!("TMDB_API_KEY environment variable not set"))?;

        let base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());

        let language = std::env::var("TMDB_LANGUAGE").unwrap_or_else(|_| "ko-KR".to_string());

        let cache_ttl = std::env::var("MOVIE_CACHE_TTL")
            .unwrap_or_else(|_| "600".to_string())
            .parse()
            .unwrap_or(600);

        Ok(TmdbConfig {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            language,
            cache_ttl,
        })
    }
}

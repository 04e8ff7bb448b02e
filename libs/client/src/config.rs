//! Client configuration

use anyhow::Result;

/// Configuration for talking to the backend API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, including the `/api` prefix
    pub api_base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl ClientConfig {
    /// Create a new ClientConfig from environment variables
    ///
    /// # Environment Variables
    /// - `API_BASE_URL`: Backend base URL (default: "http://localhost:3001/api")
    /// - `API_TIMEOUT`: Request timeout in seconds (default: 10)
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3001/api".to_string());

        let timeout_seconds = std::env::var("API_TIMEOUT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Ok(ClientConfig {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            timeout_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_client_config_defaults() {
        unsafe {
            std::env::remove_var("API_BASE_URL");
            std::env::remove_var("API_TIMEOUT");
        }

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3001/api");
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    #[serial]
    fn test_client_config_trims_trailing_slash() {
        unsafe {
            std::env::set_var("API_BASE_URL", "https://movies.example.com/api/");
            std::env::set_var("API_TIMEOUT", "3");
        }

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_base_url, "https://movies.example.com/api");
        assert_eq!(config.timeout_seconds, 3);

        unsafe {
            std::env::remove_var("API_BASE_URL");
            std::env::remove_var("API_TIMEOUT");
        }
    }
}

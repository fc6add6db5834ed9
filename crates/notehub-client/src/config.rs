// ABOUTME: Connection settings for the NoteHub API
// ABOUTME: Built once by the caller and handed to NoteHubClient::new

use crate::error::{ApiError, Result};
use url::Url;

/// Public NoteHub deployment used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://notehub-public.goit.study/api";

/// Base URL and bearer token, fixed for the lifetime of a client
#[derive(Clone)]
pub struct ApiConfig {
    base_url: Url,
    token: String,
}

impl ApiConfig {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| ApiError::Config(format!("Invalid base URL {:?}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "Base URL {} cannot carry a path",
                base_url
            )));
        }

        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ApiError::Config("API token is empty".into()));
        }

        Ok(Self { base_url, token })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let config = ApiConfig::new(DEFAULT_BASE_URL, "abc").unwrap();
        assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.token(), "abc");
    }

    #[test]
    fn test_new_trims_token() {
        let config = ApiConfig::new("http://localhost:3000", "  tok\n").unwrap();
        assert_eq!(config.token(), "tok");
    }

    #[test]
    fn test_new_rejects_empty_token() {
        let err = ApiConfig::new(DEFAULT_BASE_URL, "   ").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_new_rejects_bad_url() {
        assert!(ApiConfig::new("not a url", "tok").is_err());
        assert!(ApiConfig::new("mailto:someone@example.com", "tok").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ApiConfig::new(DEFAULT_BASE_URL, "secret-token").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("REDACTED"));
    }
}

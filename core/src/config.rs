//! Client configuration: where the backend lives and which credentials to
//! attach beyond the cookie session.

use std::env;

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "SOCIONET_API_URL";

/// Environment variable holding an optional bearer token.
pub const TOKEN_ENV: &str = "SOCIONET_API_TOKEN";

/// Backend used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://socionetback-production.up.railway.app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>) {
        (self.base_url, self.token)
    }

    /// Resolve the configuration from the process environment, loading a
    /// `.env` file first when one exists. Blank values count as unset.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let base_url = non_blank(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            token: non_blank(TOKEN_ENV),
            ..Self::new(&base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_host() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_none());
    }

    #[test]
    fn reads_url_and_token_from_lookup() {
        let config = ClientConfig::from_lookup(|key| match key {
            BASE_URL_ENV => Some("http://localhost:4000/".to_string()),
            TOKEN_ENV => Some("tok".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://localhost:4000");
        assert_eq!(config.token.as_deref(), Some("tok"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = ClientConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_none());
    }

    #[test]
    fn trailing_slashes_are_stripped_once_at_construction() {
        let config = ClientConfig::new("http://localhost:4000//");
        assert_eq!(config.base_url(), "http://localhost:4000");
        assert_eq!(config.token(), None);
    }
}

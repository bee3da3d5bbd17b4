//! Configuration management for the Graph API client

use std::time::Duration;

use compact_str::CompactString;

use super::error::{ClientError, Result};
use crate::config::AppConfig;

/// Graph API root used when no override is configured
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com/v18.0";

/// Main configuration for the Graph API client
#[derive(Clone)]
pub struct ClientConfig {
    /// Graph API base URL, including the version segment
    pub base_url: CompactString,
    /// Page access token
    pub access_token: CompactString,
    /// Target page identifier
    pub page_id: CompactString,
    /// Request configuration
    pub request: RequestConfig,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Request timeout
    pub timeout: Duration,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

// The token stays out of logs and panic output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("page_id", &self.page_id)
            .field("request", &self.request)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new client configuration against the public Graph API
    pub fn new(access_token: impl Into<CompactString>, page_id: impl Into<CompactString>) -> Self {
        Self {
            base_url: DEFAULT_GRAPH_URL.into(),
            access_token: access_token.into(),
            page_id: page_id.into(),
            request: RequestConfig::default(),
        }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(ClientError::config("Access token cannot be empty"));
        }

        if self.page_id.trim().is_empty() {
            return Err(ClientError::config("Page id cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::config("Base URL must start with http:// or https://"));
        }

        if self.request.timeout.is_zero() {
            return Err(ClientError::config("Timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Set the Graph API base URL
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<CompactString>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set request timeout
    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = timeout;
        self
    }
}

impl TryFrom<&AppConfig> for ClientConfig {
    type Error = ClientError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        config.ensure_credentials()?;

        let mut builder = ClientConfig::builder()
            .access_token(config.access_token.as_str())
            .page_id(config.page_id.as_str())
            .timeout(Duration::from_secs(config.timeout_secs));

        if let Some(url) = &config.graph_url {
            builder = builder.base_url(url.as_str());
        }

        builder.build()
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<CompactString>,
    access_token: Option<CompactString>,
    page_id: Option<CompactString>,
    request: Option<RequestConfig>,
}

impl ClientConfigBuilder {
    /// Set base URL
    pub fn base_url(mut self, url: impl Into<CompactString>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set page access token
    pub fn access_token(mut self, token: impl Into<CompactString>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set page id
    pub fn page_id(mut self, page_id: impl Into<CompactString>) -> Self {
        self.page_id = Some(page_id.into());
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let mut request = self.request.unwrap_or_default();
        request.timeout = timeout;
        self.request = Some(request);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        let access_token = self
            .access_token
            .ok_or_else(|| ClientError::config("Access token is required"))?;
        let page_id = self
            .page_id
            .ok_or_else(|| ClientError::config("Page id is required"))?;

        let config = ClientConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_GRAPH_URL.into()),
            access_token,
            page_id,
            request: self.request.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .access_token("page-token")
            .page_id("1234567890")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.base_url, DEFAULT_GRAPH_URL);
        assert_eq!(config.access_token, "page-token");
        assert_eq!(config.page_id, "1234567890");
        assert_eq!(config.request.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_requires_credentials() {
        let result = ClientConfig::builder().page_id("1234567890").build();
        assert!(matches!(result, Err(ClientError::Config(_))));

        let result = ClientConfig::builder().access_token("page-token").build();
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::new("token", "42").validate().is_ok());

        // Empty token
        assert!(ClientConfig::new("", "42").validate().is_err());
        assert!(ClientConfig::new("   ", "42").validate().is_err());

        // Empty page id
        assert!(ClientConfig::new("token", "").validate().is_err());

        // Invalid URL
        let config = ClientConfig::new("token", "42").with_base_url("graph.facebook.com");
        assert!(config.validate().is_err());

        // Zero timeout
        let config = ClientConfig::new("token", "42").with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("super-secret", "42");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_from_app_config() {
        let app_config = AppConfig {
            access_token: "page-token".into(),
            page_id: "42".into(),
            graph_url: Some("http://localhost:9999/v18.0".into()),
            timeout_secs: 7,
            log_level: None,
        };

        let client_config = ClientConfig::try_from(&app_config).unwrap();
        assert_eq!(client_config.base_url, "http://localhost:9999/v18.0");
        assert_eq!(client_config.access_token, "page-token");
        assert_eq!(client_config.page_id, "42");
        assert_eq!(client_config.request.timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_from_app_config_missing_credentials() {
        let app_config = AppConfig::default();
        let result = ClientConfig::try_from(&app_config);
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}

//! Connection settings for the Jira instance.

use std::fmt;
use std::time::Duration;

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Tracker location and credential, built once at startup.
#[derive(Clone)]
pub struct JiraConfig {
    base_url: String,
    credential: String,
    timeout: Duration,
}

impl JiraConfig {
    /// Create a config. A trailing `/` on the base URL is dropped.
    pub fn new(base_url: impl Into<String>, credential: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            credential: credential.into().trim().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Both the URL and the credential are present.
    pub fn is_complete(&self) -> bool {
        !self.base_url.is_empty() && !self.credential.is_empty()
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.credential)
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let credential = if self.credential.is_empty() { "" } else { "***" };
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("credential", &credential)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = JiraConfig::new("https://jira.example.com/", "token");
        assert_eq!(config.base_url(), "https://jira.example.com");
    }

    #[test]
    fn test_incomplete_config() {
        assert!(!JiraConfig::new("", "token").is_complete());
        assert!(!JiraConfig::new("https://jira.example.com", "").is_complete());
        assert!(!JiraConfig::new("   ", "  ").is_complete());
        assert!(JiraConfig::new("https://jira.example.com", "token").is_complete());
    }

    #[test]
    fn test_debug_redacts_credential() {
        let config = JiraConfig::new("https://jira.example.com", "s3cr3t");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("s3cr3t"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn test_bearer_header() {
        let config = JiraConfig::new("https://jira.example.com", "abc");
        assert_eq!(config.bearer(), "Bearer abc");
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}

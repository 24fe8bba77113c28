//! Jira REST API v2 client.
//!
//! Read-only access to `/rest/api/2/issue/{key}` and `/rest/api/2/search`.
//! Every request carries the bearer credential; failures are classified into
//! [`JiraError::Http`] or [`JiraError::Transport`] and never retried.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::JiraConfig;
use crate::error::{JiraError, JiraResult};

/// Smallest page size sent upstream.
pub const MIN_RESULTS: i64 = 1;

/// Largest page size sent upstream.
pub const MAX_RESULTS: i64 = 100;

/// Jira HTTP client.
#[derive(Clone)]
pub struct JiraClient {
    base_url: String,
    bearer: String,
    client: reqwest::Client,
}

/// One page of search results.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub issues: Vec<Value>,
    #[serde(default)]
    pub total: u64,
}

/// Clamp a requested page size into `[MIN_RESULTS, MAX_RESULTS]`.
pub fn clamp_max_results(requested: i64) -> i64 {
    requested.clamp(MIN_RESULTS, MAX_RESULTS)
}

impl JiraClient {
    /// Create a client for the configured instance.
    pub fn new(config: &JiraConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();

        Self {
            base_url: config.base_url().to_string(),
            bearer: config.bearer(),
            client,
        }
    }

    /// Fetch a single issue by key.
    ///
    /// The key is a single path segment: `/`, `?` and `#` are percent-encoded.
    pub async fn get_issue(&self, key: &str) -> JiraResult<Value> {
        let url = endpoint_url(&self.base_url, &["issue", key])?;
        self.get_json(url, &[]).await
    }

    /// Run a JQL search and return one bounded page.
    pub async fn search(
        &self,
        jql: &str,
        max_results: i64,
        fields: &[&str],
    ) -> JiraResult<SearchPage> {
        let max_results = clamp_max_results(max_results).to_string();
        let fields = fields.join(",");
        let params = [
            ("jql", jql),
            ("maxResults", max_results.as_str()),
            ("fields", fields.as_str()),
        ];

        let url = endpoint_url(&self.base_url, &["search"])?;
        let body = self.get_json(url, &params).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn get_json(&self, url: Url, params: &[(&str, &str)]) -> JiraResult<Value> {
        debug!(%url, ?params, "Jira request");

        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, &self.bearer)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "Jira request failed");
                JiraError::Transport(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| JiraError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Jira returned an error status");
            return Err(JiraError::Http {
                status: status.as_u16(),
                detail: error_detail(&text),
            });
        }

        parse_json(&text)
            .map_err(|e| JiraError::unexpected(format!("invalid JSON from Jira: {}", e)))
    }
}

/// `{base_url}/rest/api/2/` followed by `segments`, each percent-encoded as
/// one path segment.
fn endpoint_url(base_url: &str, segments: &[&str]) -> JiraResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| JiraError::Config(format!("Invalid JIRA_URL '{}': {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| JiraError::Config(format!("JIRA_URL '{}' cannot be a base URL", base_url)))?
        .pop_if_empty()
        .extend(["rest", "api", "2"])
        .extend(segments);

    Ok(url)
}

/// Parse a JSON document with no nesting limit.
///
/// Rich-text descriptions nest far deeper than serde_json's default limit of
/// 128; the stack grows on demand while the tree is built.
fn parse_json(text: &str) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Best-effort extraction of an error body: `errorMessages` when present,
/// the whole JSON document otherwise, or the raw text if it is not JSON.
fn error_detail(body: &str) -> Value {
    match parse_json(body) {
        Ok(Value::Object(mut map)) => match map.remove("errorMessages") {
            Some(messages) => messages,
            None => Value::Object(map),
        },
        Ok(other) => other,
        Err(_) => Value::String(body.to_string()),
    }
}

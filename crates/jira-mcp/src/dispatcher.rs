//! Tool dispatch.
//!
//! Routes a tool call to its handler and turns every failure into an
//! [`ErrorEnvelope`]. Nothing fails across this boundary: the caller always
//! gets a JSON object back.

use jira_core::client::JiraClient;
use jira_core::jql::{my_issues_jql, SearchFilters};
use jira_core::normalize::{normalize_all, IssueRecord, MyIssuesResult, SearchResult};
use jira_core::{JiraConfig, JiraError, JiraResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::registry::{DEFAULT_MAX_RESULTS, GET_ISSUE, GET_MY_ISSUES, SEARCH_ISSUES};

/// Reported for every call while the URL or credential is missing.
pub const MISSING_CONFIG: &str = "Missing JIRA_URL or JIRA_PAT in environment variables";

/// Fields requested by `search_issues`.
pub const SEARCH_FIELDS: &[&str] = &[
    "summary", "status", "assignee", "issuetype", "priority", "created", "updated",
];

/// Fields requested by `get_my_issues`.
pub const MY_ISSUES_FIELDS: &[&str] = &["summary", "status", "issuetype", "priority", "updated"];

/// Flat error payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }
}

impl From<JiraError> for ErrorEnvelope {
    fn from(err: JiraError) -> Self {
        match err {
            JiraError::Config(msg) | JiraError::Validation(msg) => Self::new(msg),
            JiraError::Http { status, detail } => Self {
                error: format!("Jira HTTP Error: {}", status),
                detail: Some(detail),
            },
            JiraError::Transport(msg) => Self {
                error: "Jira connection error".to_string(),
                detail: Some(Value::String(msg)),
            },
            JiraError::Unexpected(msg) => Self::new(format!("Unexpected error: {}", msg)),
        }
    }
}

/// Outcome of one tool call.
#[derive(Debug, Clone)]
pub enum ToolResponse {
    /// Pretty-printed JSON body.
    Success(String),
    Error(ErrorEnvelope),
}

impl ToolResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Response body as JSON text.
    pub fn to_text(&self) -> String {
        match self {
            Self::Success(body) => body.clone(),
            Self::Error(envelope) => serde_json::to_string(envelope)
                .unwrap_or_else(|_| format!("{{\"error\": {:?}}}", envelope.error)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GetIssueArgs {
    issue_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchIssuesArgs {
    #[serde(flatten)]
    filters: SearchFilters,
    max_results: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct MyIssuesArgs {
    status: Option<String>,
    max_results: Option<i64>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ToolOutput {
    Issue(IssueRecord),
    Search(SearchResult),
    MyIssues(MyIssuesResult),
}

/// Routes tool calls to their handlers.
pub struct Dispatcher {
    config: JiraConfig,
    client: JiraClient,
}

impl Dispatcher {
    pub fn new(config: JiraConfig) -> Self {
        let client = JiraClient::new(&config);
        Self { config, client }
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    /// Run one tool call to completion.
    pub async fn dispatch(&self, name: &str, arguments: Option<Value>) -> ToolResponse {
        let result = self
            .call(name, arguments)
            .await
            .and_then(|output| serde_json::to_string_pretty(&output).map_err(JiraError::from));

        match result {
            Ok(body) => ToolResponse::Success(body),
            Err(err) => {
                warn!(tool = name, error = %err, "Tool call failed");
                ToolResponse::Error(err.into())
            }
        }
    }

    async fn call(&self, name: &str, arguments: Option<Value>) -> JiraResult<ToolOutput> {
        if !self.config.is_complete() {
            return Err(JiraError::Config(MISSING_CONFIG.to_string()));
        }

        let arguments = match arguments {
            None | Some(Value::Null) => Value::Object(Default::default()),
            Some(value) => value,
        };

        match name {
            GET_ISSUE => self.get_issue(parse_args(name, arguments)?).await,
            SEARCH_ISSUES => self.search_issues(parse_args(name, arguments)?).await,
            GET_MY_ISSUES => self.get_my_issues(parse_args(name, arguments)?).await,
            _ => Err(JiraError::validation(format!("Unknown tool: {}", name))),
        }
    }

    async fn get_issue(&self, args: GetIssueArgs) -> JiraResult<ToolOutput> {
        let key = args
            .issue_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| JiraError::validation("issue_key is required"))?;

        let issue = self.client.get_issue(&key).await?;
        Ok(ToolOutput::Issue(IssueRecord::from_issue(
            &issue,
            self.config.base_url(),
        )))
    }

    async fn search_issues(&self, args: SearchIssuesArgs) -> JiraResult<ToolOutput> {
        let jql = args.filters.to_jql();
        let max_results = args.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        debug!(%jql, max_results, "search_issues");

        let page = self.client.search(&jql, max_results, SEARCH_FIELDS).await?;
        let issues = normalize_all(&page.issues, self.config.base_url());
        Ok(ToolOutput::Search(SearchResult::new(jql, page.total, issues)))
    }

    async fn get_my_issues(&self, args: MyIssuesArgs) -> JiraResult<ToolOutput> {
        // An empty status adds no clause but is still echoed back.
        let jql = my_issues_jql(args.status.as_deref());
        let max_results = args.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        debug!(%jql, max_results, "get_my_issues");

        let page = self.client.search(&jql, max_results, MY_ISSUES_FIELDS).await?;
        let issues = normalize_all(&page.issues, self.config.base_url());
        Ok(ToolOutput::MyIssues(MyIssuesResult::new(
            args.status,
            page.total,
            issues,
        )))
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> JiraResult<T> {
    serde_json::from_value(arguments)
        .map_err(|e| JiraError::validation(format!("Invalid arguments for {}: {}", tool, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unconfigured() -> Dispatcher {
        Dispatcher::new(JiraConfig::new("", ""))
    }

    fn configured() -> Dispatcher {
        // Tests below fail before any request is made.
        Dispatcher::new(JiraConfig::new("http://127.0.0.1:1", "token"))
    }

    fn envelope(response: ToolResponse) -> ErrorEnvelope {
        match response {
            ToolResponse::Error(envelope) => envelope,
            ToolResponse::Success(body) => panic!("expected error, got {}", body),
        }
    }

    #[tokio::test]
    async fn test_missing_config_short_circuits_every_tool() {
        let dispatcher = unconfigured();
        for name in [GET_ISSUE, SEARCH_ISSUES, GET_MY_ISSUES, "nope"] {
            let response = dispatcher
                .dispatch(name, Some(json!({ "issue_key": "A-1" })))
                .await;
            assert_eq!(envelope(response), ErrorEnvelope::new(MISSING_CONFIG));
        }
    }

    #[tokio::test]
    async fn test_missing_issue_key() {
        let dispatcher = configured();
        for args in [None, Some(json!({})), Some(json!({ "issue_key": "" }))] {
            let response = dispatcher.dispatch(GET_ISSUE, args).await;
            assert_eq!(envelope(response), ErrorEnvelope::new("issue_key is required"));
        }
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let response = configured().dispatch("delete_issue", None).await;
        assert!(response.is_error());
        assert_eq!(response.to_text(), r#"{"error":"Unknown tool: delete_issue"}"#);
    }

    #[tokio::test]
    async fn test_wrong_argument_type() {
        let response = configured()
            .dispatch(SEARCH_ISSUES, Some(json!({ "max_results": "lots" })))
            .await;
        let envelope = envelope(response);
        assert!(envelope.error.starts_with("Invalid arguments for search_issues"));
        assert_eq!(envelope.detail, None);
    }

    #[test]
    fn test_envelope_from_errors() {
        let http = ErrorEnvelope::from(JiraError::Http {
            status: 404,
            detail: json!(["Issue does not exist"]),
        });
        assert_eq!(http.error, "Jira HTTP Error: 404");
        assert_eq!(http.detail, Some(json!(["Issue does not exist"])));

        let transport = ErrorEnvelope::from(JiraError::Transport("connection refused".into()));
        assert_eq!(transport.error, "Jira connection error");
        assert_eq!(transport.detail, Some(json!("connection refused")));

        let unexpected = ErrorEnvelope::from(JiraError::unexpected("invalid JSON"));
        assert_eq!(unexpected.error, "Unexpected error: invalid JSON");
    }
}

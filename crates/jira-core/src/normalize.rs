//! Normalized issue records and search results.

use serde::Serialize;
use serde_json::Value;

use crate::rich_text::extract_text;

/// Assignee shown when the issue has none.
pub const UNASSIGNED: &str = "Unassigned";

/// Stable, caller-facing shape of a Jira issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueRecord {
    pub key: Option<String>,
    pub summary: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
    pub assignee: String,
    pub priority: Option<String>,
    pub reporter: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub description: String,
    pub url: String,
}

/// Result of a general issue search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub total: u64,
    pub count: usize,
    pub jql: String,
    pub issues: Vec<IssueRecord>,
}

/// Result of a "my issues" search.
#[derive(Debug, Clone, Serialize)]
pub struct MyIssuesResult {
    pub total: u64,
    pub count: usize,
    pub status_filter: Option<String>,
    pub issues: Vec<IssueRecord>,
}

impl SearchResult {
    pub fn new(jql: String, total: u64, issues: Vec<IssueRecord>) -> Self {
        let count = issues.len();
        Self {
            total: total.max(count as u64),
            count,
            jql,
            issues,
        }
    }
}

impl MyIssuesResult {
    pub fn new(status_filter: Option<String>, total: u64, issues: Vec<IssueRecord>) -> Self {
        let count = issues.len();
        Self {
            total: total.max(count as u64),
            count,
            status_filter,
            issues,
        }
    }
}

impl IssueRecord {
    /// Map a raw issue payload onto an [`IssueRecord`].
    ///
    /// Missing nested objects become `None`. The URL is always built from
    /// `base_url`, with an empty key segment when the payload has no key.
    pub fn from_issue(issue: &Value, base_url: &str) -> Self {
        let key = string_at(issue, &["key"]);
        let fields = issue.get("fields").unwrap_or(&Value::Null);

        let url = format!("{}/browse/{}", base_url, key.as_deref().unwrap_or(""));

        Self {
            summary: string_at(fields, &["summary"]),
            status: string_at(fields, &["status", "name"]),
            issue_type: string_at(fields, &["issuetype", "name"]),
            assignee: string_at(fields, &["assignee", "displayName"])
                .unwrap_or_else(|| UNASSIGNED.to_string()),
            priority: string_at(fields, &["priority", "name"]),
            reporter: string_at(fields, &["reporter", "displayName"]),
            created: string_at(fields, &["created"]),
            updated: string_at(fields, &["updated"]),
            description: extract_text(fields.get("description")),
            key,
            url,
        }
    }
}

/// Normalize every issue in a page, keeping upstream order.
pub fn normalize_all(issues: &[Value], base_url: &str) -> Vec<IssueRecord> {
    issues
        .iter()
        .map(|issue| IssueRecord::from_issue(issue, base_url))
        .collect()
}

fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |current, segment| current.get(segment))
        .and_then(Value::as_str)
        .map(str::to_string)
}

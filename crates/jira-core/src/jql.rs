//! JQL construction from structured filters.
//!
//! Values are quoted verbatim. Embedded double quotes are not escaped, so a
//! value containing `"` produces JQL the server will reject.

use serde::Deserialize;

/// Literal accepted for "the caller", matched case-insensitively.
pub const CURRENT_USER_TOKEN: &str = "currentuser()";

/// JQL function resolving to the authenticated user.
pub const CURRENT_USER_FN: &str = "currentUser()";

/// Emitted when no filter contributes a clause.
pub const DEFAULT_ORDERING: &str = "order by created DESC";

/// Filters accepted by issue search. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilters {
    pub project: Option<String>,
    pub status: Option<String>,
    pub assignee: Option<String>,
    pub issue_type: Option<String>,
    /// Accepted but not turned into a clause.
    pub priority: Option<String>,
    /// Accepted but not turned into a clause.
    pub fix_version: Option<String>,
    pub text: Option<String>,
}

impl SearchFilters {
    /// Build the JQL for a general search.
    ///
    /// Clauses follow field order and are joined with `AND`. With no usable
    /// filter the result is [`DEFAULT_ORDERING`].
    pub fn to_jql(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(project) = present(&self.project) {
            parts.push(format!("project = \"{}\"", project));
        }
        if let Some(status) = present(&self.status) {
            parts.push(status_clause(status));
        }
        if let Some(assignee) = present(&self.assignee) {
            parts.push(assignee_clause(assignee));
        }
        if let Some(issue_type) = present(&self.issue_type) {
            parts.push(format!("issuetype = \"{}\"", issue_type));
        }
        if let Some(text) = present(&self.text) {
            parts.push(format!(
                "(summary ~ \"{text}\" OR description ~ \"{text}\")",
                text = text
            ));
        }

        if parts.is_empty() {
            DEFAULT_ORDERING.to_string()
        } else {
            parts.join(" AND ")
        }
    }
}

/// Build the JQL for the caller's own issues, most recently updated first.
pub fn my_issues_jql(status: Option<&str>) -> String {
    let mut jql = format!("assignee = {}", CURRENT_USER_FN);
    if let Some(status) = status.filter(|s| !s.is_empty()) {
        jql.push_str(" AND ");
        jql.push_str(&status_clause(status));
    }
    jql.push_str(" ORDER BY updated DESC");
    jql
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn status_clause(status: &str) -> String {
    format!("status = \"{}\"", status)
}

fn assignee_clause(assignee: &str) -> String {
    if assignee.eq_ignore_ascii_case(CURRENT_USER_TOKEN) {
        format!("assignee = {}", CURRENT_USER_FN)
    } else {
        format!("assignee = \"{}\"", assignee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters() -> SearchFilters {
        SearchFilters::default()
    }

    #[test]
    fn test_empty_filters_use_default_ordering() {
        assert_eq!(filters().to_jql(), "order by created DESC");
    }

    #[test]
    fn test_empty_strings_are_ignored() {
        let f = SearchFilters {
            project: Some(String::new()),
            text: Some(String::new()),
            ..filters()
        };
        assert_eq!(f.to_jql(), DEFAULT_ORDERING);
    }

    #[test]
    fn test_project_and_status() {
        let f = SearchFilters {
            project: Some("DEV".into()),
            status: Some("Done".into()),
            ..filters()
        };
        assert_eq!(f.to_jql(), r#"project = "DEV" AND status = "Done""#);
    }

    #[test]
    fn test_all_filters_in_fixed_order() {
        let f = SearchFilters {
            text: Some("login".into()),
            issue_type: Some("Bug".into()),
            assignee: Some("jdoe".into()),
            status: Some("In Progress".into()),
            project: Some("PROJ".into()),
            priority: None,
            fix_version: None,
        };
        assert_eq!(
            f.to_jql(),
            r#"project = "PROJ" AND status = "In Progress" AND assignee = "jdoe" AND issuetype = "Bug" AND (summary ~ "login" OR description ~ "login")"#
        );
    }

    #[test]
    fn test_current_user_any_casing() {
        for token in ["currentUser()", "CURRENTUSER()", "currentuser()"] {
            let f = SearchFilters {
                assignee: Some(token.into()),
                ..filters()
            };
            assert_eq!(f.to_jql(), "assignee = currentUser()");
        }
    }

    #[test]
    fn test_priority_and_fix_version_do_not_add_clauses() {
        let f = SearchFilters {
            priority: Some("P1".into()),
            fix_version: Some("25.11".into()),
            ..filters()
        };
        assert_eq!(f.to_jql(), DEFAULT_ORDERING);

        let f = SearchFilters {
            project: Some("DEV".into()),
            priority: Some("P1".into()),
            ..filters()
        };
        assert_eq!(f.to_jql(), r#"project = "DEV""#);
    }

    #[test]
    fn test_quotes_are_not_escaped() {
        let f = SearchFilters {
            text: Some(r#"say "hi""#.into()),
            ..filters()
        };
        assert_eq!(
            f.to_jql(),
            r#"(summary ~ "say "hi"" OR description ~ "say "hi"")"#
        );
    }

    #[test]
    fn test_my_issues_jql() {
        assert_eq!(
            my_issues_jql(None),
            "assignee = currentUser() ORDER BY updated DESC"
        );
        assert_eq!(
            my_issues_jql(Some("To Do")),
            r#"assignee = currentUser() AND status = "To Do" ORDER BY updated DESC"#
        );
        assert_eq!(
            my_issues_jql(Some("")),
            "assignee = currentUser() ORDER BY updated DESC"
        );
    }
}

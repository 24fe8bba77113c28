//! Static tool declarations.

use serde::Serialize;

pub const GET_ISSUE: &str = "get_issue";
pub const SEARCH_ISSUES: &str = "search_issues";
pub const GET_MY_ISSUES: &str = "get_my_issues";

/// Page size used when `max_results` is not given.
pub const DEFAULT_MAX_RESULTS: i64 = 20;

/// Tool definition.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Every tool the server exposes, in listing order.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GET_ISSUE.to_string(),
            description: "Get complete details of a specific Jira ticket".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issue_key": {
                        "type": "string",
                        "description": "Issue key (e.g.: PROJ-123, DEV-45)"
                    }
                },
                "required": ["issue_key"]
            }),
        },
        ToolDefinition {
            name: SEARCH_ISSUES.to_string(),
            description: "Search for Jira tickets by different criteria like status, project, assignee, etc."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project": {
                        "type": "string",
                        "description": "Project key (e.g.: PROJ, DEV)"
                    },
                    "status": {
                        "type": "string",
                        "description": "Issue status (e.g.: 'To Do', 'In Progress', 'Done')"
                    },
                    "assignee": {
                        "type": "string",
                        "description": "Assignee email or name. Use 'currentUser()' for your tickets"
                    },
                    "issue_type": {
                        "type": "string",
                        "description": "Issue type (e.g.: Bug, Task, Story)"
                    },
                    "priority": {
                        "type": "string",
                        "description": "Issue priority (e.g.: P1, P2, P3)"
                    },
                    "fix_version": {
                        "type": "string",
                        "description": "Issue fix version (e.g.: 25.11, 25.13, 25.14)"
                    },
                    "text": {
                        "type": "string",
                        "description": "Search by text in summary or description"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results (default: 20, max: 100)",
                        "default": DEFAULT_MAX_RESULTS
                    }
                },
                "required": []
            }),
        },
        ToolDefinition {
            name: GET_MY_ISSUES.to_string(),
            description: "Get all tickets assigned to you (current user)".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "status": {
                        "type": "string",
                        "description": "Filter by specific status (optional)"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results",
                        "default": DEFAULT_MAX_RESULTS
                    }
                },
                "required": []
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_three_unique_tools() {
        let tools = tool_definitions();
        let names: HashSet<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tools.len(), 3);
        assert_eq!(names, HashSet::from([GET_ISSUE, SEARCH_ISSUES, GET_MY_ISSUES]));
    }

    #[test]
    fn test_required_fields() {
        for tool in tool_definitions() {
            let required = tool.input_schema["required"].as_array().unwrap();
            if tool.name == GET_ISSUE {
                assert_eq!(required, &vec![serde_json::json!("issue_key")]);
            } else {
                assert!(required.is_empty());
                assert_eq!(tool.input_schema["properties"]["max_results"]["default"], 20);
            }
        }
    }

    #[test]
    fn test_serializes_input_schema_in_camel_case() {
        let value = serde_json::to_value(&tool_definitions()[0]).unwrap();
        assert!(value.get("inputSchema").is_some());
        assert!(value.get("input_schema").is_none());
    }
}

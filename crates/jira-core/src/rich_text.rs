//! Plain-text extraction from Atlassian Document Format (ADF) trees.
//!
//! A description is either a legacy plain string, or a tree of nodes where
//! each node may carry a `text` field and a `content` list of children.

use serde_json::Value;

/// Flatten a rich-text node into plain text.
///
/// Text fragments are collected in document order (pre-order, depth-first)
/// and joined with a single space. Absent or null input yields `""`; a plain
/// string is returned verbatim.
pub fn extract_text(node: Option<&Value>) -> String {
    let root = match node {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(s)) => return s.clone(),
        Some(other) => other,
    };

    let mut parts: Vec<&str> = Vec::new();
    let mut stack: Vec<&Value> = vec![root];

    while let Some(current) = stack.pop() {
        match current {
            Value::Object(map) => {
                if let Some(text) = map.get("text").and_then(Value::as_str) {
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
                if let Some(Value::Array(children)) = map.get("content") {
                    stack.extend(children.iter().rev());
                }
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            // Bare strings inside a tree are not text nodes.
            _ => {}
        }
    }

    parts.join(" ")
}

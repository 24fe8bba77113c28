//! Jira Core Library
//!
//! Translation layer between structured tool arguments and the Jira REST API:
//! JQL building, rich-text flattening, issue normalization and the HTTP client.

pub mod client;
pub mod config;
pub mod error;
pub mod jql;
pub mod normalize;
pub mod rich_text;

pub use client::{JiraClient, SearchPage};
pub use config::JiraConfig;
pub use error::{JiraError, JiraResult};
pub use jql::SearchFilters;
pub use normalize::{IssueRecord, MyIssuesResult, SearchResult};

//! Jira MCP Server
//!
//! Read-only Jira tools exposed over the Model Context Protocol.

pub mod dispatcher;
pub mod registry;
pub mod server;

pub use dispatcher::{Dispatcher, ErrorEnvelope, ToolResponse};
pub use registry::{tool_definitions, ToolDefinition};

use jira_core::JiraConfig;

/// Run the MCP server over stdio.
pub async fn run_stdio_server(config: JiraConfig) -> anyhow::Result<()> {
    server::run_stdio(Dispatcher::new(config)).await
}

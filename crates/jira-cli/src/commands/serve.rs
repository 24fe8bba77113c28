//! Stdio server command.

use anyhow::Result;
use colored::Colorize;
use jira_core::JiraConfig;
use jira_mcp::tool_definitions;
use tracing::warn;

pub async fn execute(config: JiraConfig) -> Result<()> {
    eprintln!(
        "  {} {} {}",
        "●".green().bold(),
        "Jira MCP".cyan().bold(),
        "server running (stdio)".bold()
    );
    eprintln!("  {} {} tools", "▸".dimmed(), tool_definitions().len());
    if config.is_complete() {
        eprintln!("  {} {}", "▸".dimmed(), config.base_url());
    } else {
        warn!("JIRA_URL or JIRA_PAT is not set; every tool call will report a configuration error");
    }
    eprintln!("  {} Ctrl+C to stop", "▸".dimmed());
    eprintln!();

    jira_mcp::run_stdio_server(config).await
}

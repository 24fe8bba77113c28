//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use jira_core::config::DEFAULT_TIMEOUT_SECS;
use jira_core::JiraConfig;
use std::path::PathBuf;
use std::time::Duration;

pub mod call;
pub mod serve;
pub mod tools;

/// Read-only Jira tools over the Model Context Protocol
#[derive(Parser)]
#[command(name = "jira-mcp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Append logs to this file in addition to stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the Jira instance lives and how to authenticate.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Jira base URL (e.g. https://jira.example.com)
    #[arg(long, global = true, env = "JIRA_URL", default_value = "")]
    pub jira_url: String,

    /// Personal access token sent as a bearer credential
    #[arg(long, global = true, env = "JIRA_PAT", default_value = "", hide_env_values = true)]
    pub jira_pat: String,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, env = "JIRA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl ConnectionArgs {
    pub fn to_config(&self) -> JiraConfig {
        JiraConfig::new(&self.jira_url, &self.jira_pat)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server over stdio (default)
    Serve,

    /// List the available tools
    Tools(tools::ToolsArgs),

    /// Invoke one tool and print its JSON response
    Call(call::CallArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.connection.to_config();

        match self.command.unwrap_or(Commands::Serve) {
            Commands::Serve => serve::execute(config).await,
            Commands::Tools(args) => tools::execute(args),
            Commands::Call(args) => call::execute(args, config).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_build_config() {
        let cli = Cli::try_parse_from([
            "jira-mcp",
            "--jira-url",
            "https://jira.example.com/",
            "--jira-pat",
            "tok",
            "--timeout-secs",
            "5",
            "tools",
        ])
        .unwrap();
        let config = cli.connection.to_config();
        assert_eq!(config.base_url(), "https://jira.example.com");
        assert!(config.is_complete());
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_call_args() {
        let cli = Cli::try_parse_from([
            "jira-mcp",
            "call",
            "get_issue",
            "--args",
            r#"{"issue_key":"A-1"}"#,
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Call(args)) => {
                assert_eq!(args.tool, "get_issue");
                assert_eq!(args.args.as_deref(), Some(r#"{"issue_key":"A-1"}"#));
            }
            _ => panic!("expected call"),
        }
    }
}

//! One-shot tool invocation.

use anyhow::{Context, Result};
use clap::Args;
use jira_core::JiraConfig;
use jira_mcp::Dispatcher;

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name (get_issue, search_issues, get_my_issues)
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(long)]
    pub args: Option<String>,
}

pub async fn execute(args: CallArgs, config: JiraConfig) -> Result<()> {
    let arguments = args
        .args
        .as_deref()
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("--args must be valid JSON")?;

    let response = Dispatcher::new(config).dispatch(&args.tool, arguments).await;
    println!("{}", response.to_text());

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

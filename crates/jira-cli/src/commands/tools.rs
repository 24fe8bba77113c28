//! Tool listing command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use jira_mcp::tool_definitions;

#[derive(Args, Debug)]
pub struct ToolsArgs {
    /// Print the raw `tools/list` JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ToolsArgs) -> Result<()> {
    let tools = tool_definitions();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "tools": tools }))?);
        return Ok(());
    }

    println!();
    println!("{}", "  Tools".bold().underline());
    println!();
    for tool in &tools {
        let required: Vec<&str> = tool.input_schema["required"]
            .as_array()
            .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();
        let optional: Vec<&str> = tool.input_schema["properties"]
            .as_object()
            .map(|p| {
                p.keys()
                    .map(String::as_str)
                    .filter(|k| !required.contains(k))
                    .collect()
            })
            .unwrap_or_default();

        println!("  {} {}", "▸".dimmed(), tool.name.cyan().bold());
        println!("    {}", tool.description);
        if !required.is_empty() {
            println!("    {} {}", "required:".dimmed(), required.join(", "));
        }
        if !optional.is_empty() {
            println!("    {} {}", "optional:".dimmed(), optional.join(", "));
        }
        println!();
    }

    Ok(())
}

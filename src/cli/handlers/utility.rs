//! Commands that run without the generation backend: `tools` and `read`.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output_json, print_hint, print_table, OutputMode};
use crate::mcp::resources::read_file_resource;
use crate::mcp::ToolRegistry;

#[derive(Debug, Serialize)]
struct ToolSummary<'a> {
    name: &'a str,
    description: &'a str,
    required: Vec<&'a str>,
}

pub fn handle_tools(mode: OutputMode) -> Result<()> {
    let registry = ToolRegistry::new()?;
    let summaries: Vec<ToolSummary> = registry
        .descriptors()
        .iter()
        .map(|d| ToolSummary {
            name: d.name,
            description: d.description,
            required: d.required_fields(),
        })
        .collect();

    match mode {
        OutputMode::Json => output_json(&summaries),
        OutputMode::Markdown => {
            println!("| Tool | Required | Description |\n|---|---|---|");
            for s in &summaries {
                println!("| `{}` | {} | {} |", s.name, s.required.join(", "), s.description);
            }
        }
        OutputMode::Human => {
            let rows = summaries
                .iter()
                .map(|s| {
                    vec![
                        s.name.to_string(),
                        s.required.join(", "),
                        s.description.to_string(),
                    ]
                })
                .collect();
            print_table(&["Tool", "Required", "Description"], rows);
            print_hint("Run `plan-mcp serve` to expose these over MCP stdio.");
        }
    }
    Ok(())
}

pub async fn handle_read(path: &Path, mode: OutputMode) -> Result<()> {
    let path = std::path::absolute(path)?;
    let text = read_file_resource(&path.display().to_string()).await?;
    match mode {
        OutputMode::Json => output_json(&serde_json::json!({
            "uri": format!("file://{}", path.display()),
            "text": text,
        })),
        _ => println!("{}", text),
    }
    Ok(())
}

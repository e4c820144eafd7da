//! Partition a module list into output chunks.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

use super::OutputFormat;
use crate::chunks::{ChunkPlan, ModuleRecord, plan_chunks};
use crate::context::BuildContext;
use crate::core::ChunkError;

/// Read a JSON array of modules and show which chunk each one lands in.
///
/// Each element has an `id` and optionally `resource`, `size`, `chunks` and
/// `async`:
///
/// ```json
/// [
///   { "id": "react", "resource": "/app/node_modules/react/index.js", "size": 6500 },
///   { "id": "./src/page.js", "resource": "/app/src/page.js", "chunks": ["page"], "async": true }
/// ]
/// ```
#[derive(Args, Debug, Clone)]
pub struct PlanCommand {
    /// Module list file, or `-` for stdin
    pub modules: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl PlanCommand {
    /// Read the module list, plan it and print the plan.
    pub async fn execute(&self, context: &BuildContext, cwd: &Path) -> Result<()> {
        let modules = self.read_modules(cwd).await?;
        tracing::debug!("Planning {} module(s)", modules.len());
        let plan = plan_chunks(context.policy(), &modules);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
            OutputFormat::Text => print_plan(&plan),
        }
        Ok(())
    }

    async fn read_modules(&self, cwd: &Path) -> Result<Vec<ModuleRecord>> {
        let (label, content) = if self.modules.as_os_str() == "-" {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("Failed to read module list from stdin")?;
            ("<stdin>".to_string(), content)
        } else {
            let path = cwd.join(&self.modules);
            let content = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read module list: {}", path.display()))?;
            (path.display().to_string(), content)
        };

        parse_modules(&content, &label)
    }
}

fn parse_modules(content: &str, label: &str) -> Result<Vec<ModuleRecord>> {
    serde_json::from_str(content).map_err(|e| {
        ChunkError::ModuleListParseError {
            file: label.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn print_plan(plan: &ChunkPlan) {
    for chunk in &plan.chunks {
        let origin = match &chunk.cache_group {
            Some(group) => format!("cache group {group}"),
            None => "origin chunk".to_string(),
        };
        println!(
            "{} {} ({} module(s), {} bytes)",
            chunk.name.bold(),
            format!("[{origin}]").dimmed(),
            chunk.modules.len(),
            chunk.size
        );
        for module in &chunk.modules {
            println!("  {module}");
        }
    }
    if let Some(runtime) = &plan.runtime_chunk {
        println!("{} {}", runtime.bold(), "[runtime]".dimmed());
    }
}

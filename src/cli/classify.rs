//! Classify module resource paths against the build's policy.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use super::OutputFormat;
use crate::chunks::{ModuleRecord, is_framework_module};
use crate::constants::MAIN_CHUNK_NAME;
use crate::context::BuildContext;
use crate::utils::normalize_path;

/// Report, for each resource path, whether it belongs to the framework chunk
/// and which cache group would claim it.
///
/// Relative paths are taken relative to the working directory. Resources are
/// treated as statically imported from a single entry chunk.
#[derive(Args, Debug, Clone, Default)]
pub struct ClassifyCommand {
    /// Module resource paths
    #[arg(required = true)]
    pub resources: Vec<String>,

    /// Treat the modules as loaded on demand
    #[arg(long = "async")]
    pub is_async: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Classification {
    resource: String,
    framework: bool,
    cache_group: Option<String>,
}

impl ClassifyCommand {
    /// Classify every resource and print the result.
    pub fn execute(&self, context: &BuildContext, cwd: &Path) -> Result<()> {
        let results = self.classify(context, cwd);
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
            OutputFormat::Text => {
                for result in &results {
                    let marker = if result.framework {
                        "framework".green().bold()
                    } else {
                        "-".dimmed()
                    };
                    match &result.cache_group {
                        Some(group) if !result.framework => {
                            println!("{marker}  {}  {}", result.resource, format!("[{group}]").cyan());
                        }
                        _ => println!("{marker}  {}", result.resource),
                    }
                }
            }
        }
        Ok(())
    }

    fn classify(&self, context: &BuildContext, cwd: &Path) -> Vec<Classification> {
        self.resources
            .iter()
            .map(|resource| {
                let resource = absolute_resource(resource, cwd);
                let module = ModuleRecord {
                    id: resource.clone(),
                    resource: Some(resource.clone()),
                    size: 0,
                    chunks: vec![MAIN_CHUNK_NAME.to_string()],
                    is_async: self.is_async,
                };
                Classification {
                    framework: is_framework_module(context.framework_paths(), Some(resource.as_str())),
                    cache_group: context.policy().assign(&module).map(|group| group.name.clone()),
                    resource,
                }
            })
            .collect()
    }
}

fn absolute_resource(resource: &str, cwd: &Path) -> String {
    let path = Path::new(resource);
    if path.is_absolute() {
        resource.to_string()
    } else {
        normalize_path(&cwd.join(path)).to_string_lossy().into_owned()
    }
}

//! Print the framework path set of the current build.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use super::OutputFormat;
use crate::config::BuildMode;
use crate::context::BuildContext;
use crate::resolver::ResolveReport;

/// Resolve the framework packages and print the directories that make up the
/// framework chunk.
///
/// In development mode nothing is resolved and the set is empty.
#[derive(Args, Debug, Clone, Default)]
pub struct ResolveCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Show which package introduced each directory and every skipped lookup
    #[arg(long)]
    pub explain: bool,
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    mode: BuildMode,
    root: &'a Path,
    packages: &'a [String],
    #[serde(flatten)]
    report: &'a ResolveReport,
}

impl ResolveCommand {
    /// Print the context's resolution result.
    pub fn execute(&self, context: &BuildContext) -> Result<()> {
        let config = context.config();
        match self.format {
            OutputFormat::Json => {
                let output = ResolveOutput {
                    mode: config.mode,
                    root: &config.root,
                    packages: &config.framework_packages,
                    report: context.report(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => self.print_text(context),
        }
        Ok(())
    }

    fn print_text(&self, context: &BuildContext) {
        if !context.mode().resolves_framework() {
            println!(
                "{} development build, framework chunk disabled",
                "⚠".yellow()
            );
            return;
        }

        let report = context.report();
        println!(
            "{} {} framework path(s) from {}",
            "✓".green(),
            report.paths.len(),
            context.config().framework_packages.join(", ")
        );

        if self.explain {
            for entry in &report.entries {
                match &entry.introduced_by {
                    Some(parent) => println!(
                        "  {}  {} {}",
                        entry.directory,
                        entry.package.bold(),
                        format!("(via {parent})").dimmed()
                    ),
                    None => println!("  {}  {}", entry.directory, entry.package.bold()),
                }
            }
            if !report.misses.is_empty() {
                println!("\nSkipped lookups:");
                for miss in &report.misses {
                    println!("  {} {}", "✗".red(), miss.message);
                }
            }
            if !report.unreadable.is_empty() {
                println!("\nUnreadable manifests (treated as leaves):");
                for unreadable in &report.unreadable {
                    println!("  {} {}", "⚠".yellow(), unreadable.message);
                }
            }
        } else {
            for prefix in &report.paths {
                println!("  {prefix}");
            }
        }
    }
}

//! Command-line interface for framework-chunks.
//!
//! The binary exposes the resolver and the chunk policy so a project's
//! framework isolation can be inspected without running a bundler.
//!
//! # Available Commands
//!
//! - `resolve` - Resolve the framework path set and print it
//! - `classify` - Report whether module paths belong to the framework chunk
//! - `plan` - Partition a JSON module list into output chunks
//!
//! # Global Options
//!
//! All commands support these global options:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--config` - Path to a `framework-chunks.toml`
//! - `--root` - Directory package lookup starts from
//! - `--mode` - `development` or `production`, overriding `NODE_ENV`
//! - `--package` - Framework root package (repeatable)
//!
//! # Example
//!
//! ```bash
//! # Which directories end up in the framework chunk?
//! NODE_ENV=production framework-chunks resolve --explain
//!
//! # Is this file framework code?
//! framework-chunks --mode production classify "$PWD/node_modules/react/index.js"
//!
//! # Where does every module go?
//! framework-chunks --mode production plan modules.json --format json
//! ```

mod classify;
mod plan;
mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{BuildConfig, BuildMode, ConfigOverrides};
use crate::constants::NODE_ENV_VAR;
use crate::context::BuildContext;

pub use classify::ClassifyCommand;
pub use plan::PlanCommand;
pub use resolve::ResolveCommand;

/// Output format shared by all commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Runtime configuration for CLI execution.
///
/// Holds what would otherwise be read from the process environment, so tests
/// and embedders can run commands without touching global state.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` keeps `RUST_LOG` or the default.
    pub log_level: Option<String>,

    /// Value of `NODE_ENV`.
    pub node_env: Option<String>,

    /// Directory relative paths and config discovery start from; the process
    /// working directory when `None`.
    pub working_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Calling it again is harmless; only the first subscriber is kept.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => tracing_subscriber::EnvFilter::new(level),
            None => tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Inspect and plan framework chunk isolation for JavaScript builds.
#[derive(Parser)]
#[command(
    name = "framework-chunks",
    about = "Isolate framework packages into a dedicated long-lived chunk",
    version,
    long_about = "framework-chunks resolves the installed directories of framework packages and their \
                  transitive dependencies, and shows how a split-chunks policy assigns modules to chunks."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to `RUST_LOG=debug`).
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors and command results.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file.
    ///
    /// By default `framework-chunks.toml` is searched for in the working
    /// directory and its parents.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory package lookup starts from.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Build mode, overriding the configuration file and `NODE_ENV`.
    #[arg(long, global = true)]
    mode: Option<BuildMode>,

    /// Framework root package; repeat to give several.
    #[arg(short = 'p', long = "package", global = true)]
    packages: Vec<String>,

    /// Node environment; only `production` selects a production build.
    #[arg(long = "node-env", env = NODE_ENV_VAR, global = true, hide = true)]
    node_env: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the framework path set.
    ///
    /// See [`ResolveCommand`] for details.
    Resolve(ResolveCommand),

    /// Classify module resource paths.
    ///
    /// See [`ClassifyCommand`] for details.
    Classify(ClassifyCommand),

    /// Partition a module list into output chunks.
    ///
    /// See [`PlanCommand`] for details.
    Plan(PlanCommand),
}

impl Cli {
    /// Build a [`CliConfig`] from the parsed arguments and the environment.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            node_env: self.node_env.clone(),
            working_dir: None,
        }
    }

    /// Command-line overrides of the configuration file.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            mode: self.mode,
            root: self.root.clone(),
            packages: self.packages.clone(),
        }
    }

    /// Execute the CLI with a specific configuration.
    ///
    /// Loads the build configuration, resolves the build context once and
    /// dispatches to the subcommand.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let cwd = match config.working_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        let build_config = BuildConfig::load(&self.overrides(), &cwd, config.node_env.as_deref()).await?;
        tracing::debug!(
            "Build mode {} with root {} and framework packages {:?}",
            build_config.mode,
            build_config.root.display(),
            build_config.framework_packages
        );
        let context = BuildContext::resolve(build_config).await?;

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&context),
            Commands::Classify(cmd) => cmd.execute(&context, &cwd),
            Commands::Plan(cmd) => cmd.execute(&context, &cwd).await,
        }
    }
}

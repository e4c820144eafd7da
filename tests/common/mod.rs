//! Common test utilities for framework-chunks integration tests
//!
//! Wraps a temporary `node_modules` tree and runs the binary inside it with a
//! controlled environment.

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::path::{Path, PathBuf};

use framework_chunks::constants::CONFIG_FILE_NAME;
use framework_chunks::test_utils::PackageTree;

/// A throwaway project with installed packages.
pub struct TestProject {
    tree: PackageTree,
}

impl TestProject {
    /// Create an empty project.
    pub fn new() -> Result<Self> {
        Ok(Self {
            tree: PackageTree::new()?,
        })
    }

    /// A project with `react` and `react-dom` installed the way npm lays them
    /// out: hoisted, with `react-dom` depending on `react` and `scheduler`.
    pub fn with_react() -> Result<Self> {
        let project = Self::new()?;
        project.install(
            "react",
            r#"{ "name": "react", "version": "18.2.0", "dependencies": { "loose-envify": "^1.1.0" } }"#,
        )?;
        project.install(
            "react-dom",
            r#"{ "name": "react-dom", "version": "18.2.0",
                 "dependencies": { "loose-envify": "^1.1.0", "scheduler": "^0.23.0" } }"#,
        )?;
        project.install(
            "loose-envify",
            r#"{ "name": "loose-envify", "dependencies": { "js-tokens": "^4.0.0" } }"#,
        )?;
        project.install("js-tokens", r#"{ "name": "js-tokens" }"#)?;
        project.install(
            "scheduler",
            r#"{ "name": "scheduler", "dependencies": { "loose-envify": "^1.1.0" } }"#,
        )?;
        project.install("react-slider", r#"{ "name": "react-slider" }"#)?;
        Ok(project)
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        self.tree.root()
    }

    /// The underlying package tree.
    pub fn tree(&self) -> &PackageTree {
        &self.tree
    }

    /// Install a package at the root.
    pub fn install(&self, name: &str, manifest: &str) -> Result<PathBuf> {
        self.tree.install(name, manifest)
    }

    /// Absolute path of `relative` as a string.
    pub fn resource(&self, relative: &str) -> String {
        self.tree.path(relative).to_string_lossy().into_owned()
    }

    /// Directory prefix string of `relative`, as the resolver prints it.
    pub fn prefix(&self, relative: &str) -> String {
        framework_chunks::utils::dir_prefix(&self.tree.path(relative))
    }

    /// Write `framework-chunks.toml` at the root.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        self.tree.write_file(CONFIG_FILE_NAME, content)
    }

    /// Write an arbitrary file.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        self.tree.write_file(relative, content)
    }

    /// The binary, run in the project root with a clean environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("framework-chunks").unwrap();
        cmd.current_dir(self.root())
            .env_remove("NODE_ENV")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run the binary and capture its output.
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.command().args(args).output().context("Failed to run framework-chunks")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }

    /// Run the binary with `--format json` appended and parse stdout.
    pub fn run_json(&self, args: &[&str]) -> Result<serde_json::Value> {
        let mut args = args.to_vec();
        args.extend(["--format", "json"]);
        let output = self.run(&args)?;
        output.assert_success();
        serde_json::from_str(&output.stdout)
            .with_context(|| format!("stdout is not JSON:\n{}", output.stdout))
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(self.success, "Command failed with code {:?}\nStderr: {}", self.code, self.stderr);
        self
    }

    /// Assert the command failed
    pub fn assert_failure(&self) -> &Self {
        assert!(!self.success, "Command unexpectedly succeeded\nStdout: {}", self.stdout);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// String values of a JSON array field.
pub fn strings(value: &serde_json::Value, field: &str) -> Vec<String> {
    value[field]
        .as_array()
        .unwrap_or_else(|| panic!("'{field}' is not an array: {value}"))
        .iter()
        .map(|v| v.as_str().unwrap_or_default().to_string())
        .collect()
}

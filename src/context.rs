//! Per-build context: the resolved framework paths and the chunk policy.

use anyhow::Result;

use crate::chunks::SplitChunksPolicy;
use crate::config::{BuildConfig, BuildMode};
use crate::resolver::{FrameworkPathResolver, FrameworkPathSet, ResolveReport};

/// Everything a bundler needs from this crate for one build.
///
/// Construction resolves the framework paths eagerly, once, in production
/// mode. The set is finalised before the policy captures it, so every
/// classification in the build sees the same prefixes. In development mode no
/// lookup happens and the framework group never claims a module.
#[derive(Debug)]
pub struct BuildContext {
    config: BuildConfig,
    report: ResolveReport,
    policy: SplitChunksPolicy,
}

impl BuildContext {
    /// Resolve and build the policy for `config`.
    ///
    /// Group patterns are compiled here; an invalid pattern is the only error.
    pub fn new(config: BuildConfig) -> Result<Self> {
        let report = if config.mode.resolves_framework() {
            FrameworkPathResolver::with_options(config.lookup)
                .resolve_with_report(config.framework_packages.as_slice(), &config.root)
        } else {
            tracing::debug!("Development build, skipping framework path resolution");
            ResolveReport::default()
        };

        let mut policy = SplitChunksPolicy::for_framework(report.paths.clone(), &config.chunks);
        for group in &config.groups {
            policy.register(group.to_cache_group(config.chunks.min_size)?);
        }

        Ok(Self {
            config,
            report,
            policy,
        })
    }

    /// Like [`BuildContext::new`], with the filesystem walk on the blocking pool.
    pub async fn resolve(config: BuildConfig) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::new(config)).await?
    }

    /// The configuration the context was built from.
    #[must_use]
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build mode.
    #[must_use]
    pub fn mode(&self) -> BuildMode {
        self.config.mode
    }

    /// The framework path set; empty in development mode.
    #[must_use]
    pub fn framework_paths(&self) -> &FrameworkPathSet {
        &self.report.paths
    }

    /// Full resolution report.
    #[must_use]
    pub fn report(&self) -> &ResolveReport {
        &self.report
    }

    /// The split-chunks policy.
    #[must_use]
    pub fn policy(&self) -> &SplitChunksPolicy {
        &self.policy
    }
}

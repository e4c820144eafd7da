//! Module classification and split-chunks cache groups.
//!
//! The framework classifier is a prefix test of a module's resource path against
//! the [`FrameworkPathSet`]. It is handed to the chunk policy as a closure that
//! owns an `Arc` of the finalised set, so nothing the resolver does afterwards
//! can change an already registered group, and the closure can be called from
//! any number of threads without locking.
//!
//! The policy is a priority-ordered list of [`CacheGroup`]s. The framework group
//! sits at priority 40 with `enforce` set; the `vendors` and `default` groups
//! mirror the bundler defaults the framework group has to win against.
//!
//! # Examples
//!
//! ```rust
//! use framework_chunks::chunks::is_framework_module;
//! use framework_chunks::resolver::FrameworkPathSet;
//!
//! let paths: FrameworkPathSet = ["/proj/node_modules/react/"].into_iter().collect();
//! assert!(is_framework_module(&paths, Some("/proj/node_modules/react/index.js")));
//! assert!(!is_framework_module(&paths, Some("/proj/node_modules/react-slider/index.js")));
//! assert!(!is_framework_module(&paths, None));
//! ```

pub mod planner;

pub use planner::{ChunkPlan, ModuleRecord, PlannedChunk, plan_chunks};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::constants::{
    DEFAULT_GROUP_MIN_CHUNKS, DEFAULT_GROUP_NAME, DEFAULT_GROUP_PRIORITY, DEFAULT_MIN_SIZE,
    FRAMEWORK_CHUNK_NAME, FRAMEWORK_PRIORITY, NODE_MODULES, RUNTIME_CHUNK_NAME,
    VENDORS_CHUNK_NAME, VENDORS_PRIORITY,
};
use crate::core::ChunkError;
use crate::resolver::FrameworkPathSet;

/// Whether a module with the given resource path belongs to the framework chunk.
///
/// Modules without a resource (synthetic or virtual modules) never do.
#[must_use]
pub fn is_framework_module(paths: &FrameworkPathSet, resource: Option<&str>) -> bool {
    resource.is_some_and(|resource| paths.matches(resource))
}

/// Shareable module predicate over an optional resource path.
pub type ModulePredicate = Arc<dyn Fn(Option<&str>) -> bool + Send + Sync>;

/// Capture `paths` by value in a framework predicate.
#[must_use]
pub fn framework_predicate(paths: FrameworkPathSet) -> ModulePredicate {
    let paths = Arc::new(paths);
    Arc::new(move |resource: Option<&str>| is_framework_module(&paths, resource))
}

/// How a cache group decides whether a module matches.
#[derive(Clone)]
pub enum ModuleTest {
    /// Every module matches
    Any,
    /// Modules whose resource matches the regex
    Pattern(Regex),
    /// Modules accepted by the predicate
    Predicate(ModulePredicate),
}

impl ModuleTest {
    /// Evaluate the test for a module resource.
    #[must_use]
    pub fn accepts(&self, resource: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern(regex) => resource.is_some_and(|r| regex.is_match(r)),
            Self::Predicate(predicate) => predicate(resource),
        }
    }
}

impl fmt::Debug for ModuleTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Which modules a cache group may take, by how they are loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkScope {
    /// Initial and async modules
    #[default]
    All,
    /// Only modules loaded with the initial chunks
    Initial,
    /// Only modules loaded on demand
    Async,
}

impl ChunkScope {
    /// Whether a module with the given loading kind is in scope.
    #[must_use]
    pub const fn admits(self, is_async: bool) -> bool {
        match self {
            Self::All => true,
            Self::Initial => !is_async,
            Self::Async => is_async,
        }
    }
}

/// One named rule of the split-chunks policy.
#[derive(Debug, Clone)]
pub struct CacheGroup {
    /// Output chunk name
    pub name: String,
    /// Loading kinds the group may take
    pub scope: ChunkScope,
    /// Higher priorities claim modules first
    pub priority: i32,
    /// Bypass `min_size` and `min_chunks`; materialise with a single member
    pub enforce: bool,
    /// Minimum total size in bytes before the group becomes a chunk
    pub min_size: u64,
    /// Minimum number of origin chunks a module must appear in
    pub min_chunks: usize,
    /// Membership test
    pub test: ModuleTest,
}

impl CacheGroup {
    /// The framework group: scope `All`, enforced, membership by `predicate`.
    #[must_use]
    pub fn framework(name: impl Into<String>, priority: i32, predicate: ModulePredicate) -> Self {
        Self {
            name: name.into(),
            scope: ChunkScope::All,
            priority,
            enforce: true,
            min_size: 0,
            min_chunks: 1,
            test: ModuleTest::Predicate(predicate),
        }
    }

    /// The default group for other `node_modules` code.
    #[must_use]
    pub fn vendors(min_size: u64) -> Self {
        Self {
            name: VENDORS_CHUNK_NAME.to_string(),
            scope: ChunkScope::Async,
            priority: VENDORS_PRIORITY,
            enforce: false,
            min_size,
            min_chunks: 1,
            test: ModuleTest::Predicate(Arc::new(|resource: Option<&str>| {
                resource.is_some_and(has_node_modules_segment)
            })),
        }
    }

    /// The default group for modules shared by several chunks.
    #[must_use]
    pub fn shared(min_size: u64) -> Self {
        Self {
            name: DEFAULT_GROUP_NAME.to_string(),
            scope: ChunkScope::Async,
            priority: DEFAULT_GROUP_PRIORITY,
            enforce: false,
            min_size,
            min_chunks: DEFAULT_GROUP_MIN_CHUNKS,
            test: ModuleTest::Any,
        }
    }

    /// A pattern group compiled from user configuration.
    pub fn pattern(
        name: impl Into<String>,
        pattern: &str,
        priority: i32,
        scope: ChunkScope,
        enforce: bool,
        min_size: u64,
    ) -> Result<Self, ChunkError> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|e| ChunkError::InvalidPattern {
            group: name.clone(),
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name,
            scope,
            priority,
            enforce,
            min_size,
            min_chunks: 1,
            test: ModuleTest::Pattern(regex),
        })
    }

    /// Whether this group may take `module`, ignoring competing groups.
    #[must_use]
    pub fn claims(&self, module: &ModuleRecord) -> bool {
        if !self.scope.admits(module.is_async) {
            return false;
        }
        if !self.enforce && module.origin_chunk_count() < self.min_chunks {
            return false;
        }
        self.test.accepts(module.resource.as_deref())
    }
}

/// Whether `resource` has a `node_modules` directory component, with either
/// separator on both sides.
#[must_use]
pub fn has_node_modules_segment(resource: &str) -> bool {
    let is_separator = |c: Option<char>| matches!(c, Some('/') | Some('\\'));
    resource.match_indices(NODE_MODULES).any(|(at, matched)| {
        is_separator(resource[..at].chars().next_back())
            && is_separator(resource[at + matched.len()..].chars().next())
    })
}

/// Options of the framework group and the default groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkOptions {
    /// Name of the framework chunk
    pub framework_name: String,
    /// Priority of the framework group
    pub framework_priority: i32,
    /// Name of the runtime chunk, `None` to keep the runtime in each entry
    pub runtime_chunk: Option<String>,
    /// Register the `vendors` and `default` groups
    pub default_groups: bool,
    /// `min_size` of the non-enforced default groups
    pub min_size: u64,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            framework_name: FRAMEWORK_CHUNK_NAME.to_string(),
            framework_priority: FRAMEWORK_PRIORITY,
            runtime_chunk: Some(RUNTIME_CHUNK_NAME.to_string()),
            default_groups: true,
            min_size: DEFAULT_MIN_SIZE,
        }
    }
}

/// Priority-ordered set of cache groups plus the runtime chunk setting.
#[derive(Debug, Clone, Default)]
pub struct SplitChunksPolicy {
    groups: Vec<CacheGroup>,
    runtime_chunk: Option<String>,
}

impl SplitChunksPolicy {
    /// Empty policy.
    #[must_use]
    pub fn new(runtime_chunk: Option<String>) -> Self {
        Self {
            groups: Vec::new(),
            runtime_chunk,
        }
    }

    /// Policy with the framework group for `paths` and, if enabled, the default
    /// groups.
    #[must_use]
    pub fn for_framework(paths: FrameworkPathSet, options: &ChunkOptions) -> Self {
        let mut policy = Self::new(options.runtime_chunk.clone());
        policy.register(CacheGroup::framework(
            options.framework_name.clone(),
            options.framework_priority,
            framework_predicate(paths),
        ));
        if options.default_groups {
            policy.register(CacheGroup::vendors(options.min_size));
            policy.register(CacheGroup::shared(options.min_size));
        }
        policy
    }

    /// Add a group, keeping groups sorted by descending priority.
    ///
    /// Groups of equal priority keep registration order.
    pub fn register(&mut self, group: CacheGroup) {
        let at = self.groups.iter().position(|g| g.priority < group.priority).unwrap_or(self.groups.len());
        tracing::debug!("Registering cache group '{}' (priority {})", group.name, group.priority);
        self.groups.insert(at, group);
    }

    /// Groups in evaluation order.
    #[must_use]
    pub fn groups(&self) -> &[CacheGroup] {
        &self.groups
    }

    /// Name of the separate runtime chunk, if any.
    #[must_use]
    pub fn runtime_chunk(&self) -> Option<&str> {
        self.runtime_chunk.as_deref()
    }

    /// Highest-priority group that claims `module`.
    #[must_use]
    pub fn assign(&self, module: &ModuleRecord) -> Option<&CacheGroup> {
        self.groups.iter().find(|group| group.claims(module))
    }
}

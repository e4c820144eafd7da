//! Chunk planning over a flat list of modules.
//!
//! This is the consumer side of the cache groups: enough of a bundler's
//! chunk-splitting step to show where every module ends up. Each module is
//! claimed by the highest-priority group that accepts it. A claimed group turns
//! into an output chunk when it is enforced or its members reach `min_size`;
//! otherwise the members stay in the chunks they came from.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::SplitChunksPolicy;
use crate::constants::MAIN_CHUNK_NAME;

/// A module as reported by the build graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Module identifier
    pub id: String,
    /// Canonical resource path; absent for synthetic modules
    #[serde(default)]
    pub resource: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Chunks the module would be emitted in without splitting
    #[serde(default)]
    pub chunks: Vec<String>,
    /// Whether the module is only loaded on demand
    #[serde(default, rename = "async")]
    pub is_async: bool,
}

impl ModuleRecord {
    /// Origin chunk names, [`MAIN_CHUNK_NAME`] when none were reported.
    #[must_use]
    pub fn origin_chunks(&self) -> Vec<&str> {
        if self.chunks.is_empty() {
            vec![MAIN_CHUNK_NAME]
        } else {
            self.chunks.iter().map(String::as_str).collect()
        }
    }

    /// Number of distinct origin chunks (at least one).
    #[must_use]
    pub fn origin_chunk_count(&self) -> usize {
        let mut chunks = self.origin_chunks();
        chunks.sort_unstable();
        chunks.dedup();
        chunks.len()
    }
}

/// One output chunk of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedChunk {
    /// Chunk name
    pub name: String,
    /// Cache group that produced the chunk; `None` for origin chunks
    pub cache_group: Option<String>,
    /// Module ids in input order
    pub modules: Vec<String>,
    /// Total size of the modules in bytes
    pub size: u64,
}

/// The result of planning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkPlan {
    /// Output chunks in first-appearance order
    pub chunks: Vec<PlannedChunk>,
    /// Separate runtime chunk, if configured
    pub runtime_chunk: Option<String>,
}

impl ChunkPlan {
    /// The chunk called `name`.
    #[must_use]
    pub fn chunk(&self, name: &str) -> Option<&PlannedChunk> {
        self.chunks.iter().find(|chunk| chunk.name == name)
    }

    /// Names of the chunks that contain `module_id`.
    #[must_use]
    pub fn chunks_of(&self, module_id: &str) -> Vec<&str> {
        self.chunks
            .iter()
            .filter(|chunk| chunk.modules.iter().any(|id| id == module_id))
            .map(|chunk| chunk.name.as_str())
            .collect()
    }
}

#[derive(Default)]
struct ChunkBuilder {
    chunks: Vec<PlannedChunk>,
    index: HashMap<String, usize>,
}

impl ChunkBuilder {
    fn add(&mut self, name: &str, cache_group: Option<&str>, module: &ModuleRecord) {
        let at = match self.index.get(name) {
            Some(&at) => at,
            None => {
                self.chunks.push(PlannedChunk {
                    name: name.to_string(),
                    cache_group: cache_group.map(str::to_string),
                    modules: Vec::new(),
                    size: 0,
                });
                self.index.insert(name.to_string(), self.chunks.len() - 1);
                self.chunks.len() - 1
            }
        };
        let chunk = &mut self.chunks[at];
        if !chunk.modules.contains(&module.id) {
            chunk.modules.push(module.id.clone());
            chunk.size = chunk.size.saturating_add(module.size);
        }
    }
}

/// Partition `modules` into output chunks according to `policy`.
#[must_use]
pub fn plan_chunks(policy: &SplitChunksPolicy, modules: &[ModuleRecord]) -> ChunkPlan {
    let groups = policy.groups();

    let claims: Vec<Option<usize>> =
        modules.iter().map(|module| groups.iter().position(|group| group.claims(module))).collect();

    let mut totals = vec![0_u64; groups.len()];
    for (module, claim) in modules.iter().zip(&claims) {
        if let Some(at) = claim {
            totals[*at] = totals[*at].saturating_add(module.size);
        }
    }

    let materialized: Vec<bool> = groups
        .iter()
        .zip(&totals)
        .map(|(group, total)| {
            let keep = group.enforce || *total >= group.min_size;
            if !keep && *total > 0 {
                tracing::debug!(
                    "Cache group '{}' below min_size ({} < {}), keeping modules in origin chunks",
                    group.name,
                    total,
                    group.min_size
                );
            }
            keep
        })
        .collect();

    let mut builder = ChunkBuilder::default();
    for (module, claim) in modules.iter().zip(&claims) {
        match claim {
            Some(at) if materialized[*at] => {
                let group = &groups[*at];
                builder.add(&group.name, Some(&group.name), module);
            }
            _ => {
                for origin in module.origin_chunks() {
                    builder.add(origin, None, module);
                }
            }
        }
    }

    ChunkPlan {
        chunks: builder.chunks,
        runtime_chunk: policy.runtime_chunk().map(str::to_string),
    }
}

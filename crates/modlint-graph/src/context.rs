//! Per-invocation graph context.
//!
//! One `GraphContext` is the entire mutable state of a lint invocation:
//! the dependency graph plus the resolution and cycle-verdict caches.
//! It replaces hidden process-wide state with an explicit handle the
//! caller owns and passes into rule adapters.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cycle::{self, CycleResult};
use crate::graph::{DependencyGraph, ImportKind};
use crate::module_id::ModuleId;
use crate::resolver::{Resolution, Resolver, ResolverConfig};

/// Shared state for one lint invocation over one project snapshot.
///
/// The host linter calls rules file by file on a single thread, so the
/// context takes `&mut self` and needs no internal locking. A concurrent
/// host must serialize access externally. Two runs over different project
/// roots must use separate contexts.
#[derive(Debug)]
pub struct GraphContext {
    resolver: Resolver,
    graph: DependencyGraph,
    resolutions: HashMap<(PathBuf, String), Resolution>,
    verdicts: HashMap<ModuleId, CycleResult>,
}

impl GraphContext {
    /// Creates an empty context with the given resolver configuration.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            resolver: Resolver::new(config),
            graph: DependencyGraph::new(),
            resolutions: HashMap::new(),
            verdicts: HashMap::new(),
        }
    }

    /// Resolves a specifier, memoized per `(importer, specifier)` pair.
    ///
    /// The memo assumes filesystem state does not change within one
    /// invocation; `reset_all` discards it along with everything else.
    pub fn resolve(&mut self, importing_file: &Path, specifier: &str) -> Resolution {
        let key = (importing_file.to_path_buf(), specifier.to_string());
        if let Some(hit) = self.resolutions.get(&key) {
            return hit.clone();
        }
        let resolved = self.resolver.resolve(importing_file, specifier);
        self.resolutions.insert(key, resolved.clone());
        resolved
    }

    /// Records an import edge.
    ///
    /// A new edge can create a cycle through any node previously proven
    /// clean, so every cached verdict is invalidated wholesale rather
    /// than per node.
    pub fn record_edge(
        &mut self,
        from: ModuleId,
        to: ModuleId,
        kind: ImportKind,
        via: impl Into<String>,
    ) {
        self.verdicts.clear();
        self.graph.add_edge(from, to, kind, via);
    }

    /// Queries for a cycle reachable from `id`.
    ///
    /// Verdicts are cached until the next `record_edge` or `reset_all`,
    /// which amortizes the once-per-edge queries rules issue while a
    /// file's imports are being replayed.
    pub fn cycle_through(&mut self, id: &ModuleId) -> CycleResult {
        if let Some(hit) = self.verdicts.get(id) {
            return hit.clone();
        }
        let verdict = cycle::find_cycle(&self.graph, id);
        self.verdicts.insert(id.clone(), verdict.clone());
        verdict
    }

    /// Read access to the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Drops all nodes, edges, and cached answers, yielding a
    /// guaranteed-fresh view of the project.
    pub fn reset_all(&mut self) {
        self.graph.reset();
        self.resolutions.clear();
        self.verdicts.clear();
    }
}

//! Dependency graph store.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::module_id::ModuleId;

/// Whether an import carries runtime value bindings or only types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// Regular import; creates runtime coupling.
    Value,
    /// `import type` / `export type ... from`; erased at build time.
    TypeOnly,
}

/// A directed import relationship between two modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Importing module.
    pub from: ModuleId,
    /// Imported module.
    pub to: ModuleId,
    /// Value or type-only import.
    pub kind: ImportKind,
    /// Specifier text as written in the source.
    pub via: String,
}

/// Directed multigraph of module imports.
///
/// Nodes are created lazily on first reference, so a module can appear in
/// the graph before its own file has been visited and the graph is usable
/// while still partial. Per-node edge order and node iteration order are
/// insertion order, which keeps diagnostics deterministic for a fixed
/// file-visit order.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    outgoing: IndexMap<ModuleId, Vec<Edge>>,
    incoming: IndexMap<ModuleId, Vec<Edge>>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an import edge, creating both endpoint nodes if needed.
    ///
    /// Identical `(from, to, kind, via)` tuples are de-duplicated; distinct
    /// specifiers between the same pair all remain, so import-listing
    /// diagnostics can see every spelling. Edges originating from an
    /// external module are ignored: externals are leaves.
    pub fn add_edge(
        &mut self,
        from: ModuleId,
        to: ModuleId,
        kind: ImportKind,
        via: impl Into<String>,
    ) {
        if from.is_external() {
            tracing::debug!("ignoring edge out of external module {from}");
            return;
        }

        let edge = Edge {
            from,
            to,
            kind,
            via: via.into(),
        };

        let out = self.outgoing.entry(edge.from.clone()).or_default();
        if out.contains(&edge) {
            return;
        }
        out.push(edge.clone());

        self.outgoing.entry(edge.to.clone()).or_default();
        self.incoming.entry(edge.from.clone()).or_default();
        self.incoming.entry(edge.to.clone()).or_default().push(edge);
    }

    /// Outgoing edges of a node, in insertion order.
    #[must_use]
    pub fn out_edges(&self, node: &ModuleId) -> &[Edge] {
        self.outgoing.get(node).map_or(&[], Vec::as_slice)
    }

    /// Incoming edges of a node, in insertion order.
    #[must_use]
    pub fn in_edges(&self, node: &ModuleId) -> &[Edge] {
        self.incoming.get(node).map_or(&[], Vec::as_slice)
    }

    /// Whether the node has been referenced by any recorded edge.
    #[must_use]
    pub fn has_node(&self, node: &ModuleId) -> bool {
        self.outgoing.contains_key(node)
    }

    /// Number of nodes currently in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    /// All nodes, in first-reference order.
    pub fn nodes(&self) -> impl Iterator<Item = &ModuleId> {
        self.outgoing.keys()
    }

    /// Drops all nodes and edges.
    pub fn reset(&mut self) {
        self.outgoing.clear();
        self.incoming.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn internal(name: &str) -> ModuleId {
        ModuleId::internal(format!("/proj/src/{name}"))
    }

    #[test]
    fn add_edge_creates_both_nodes() {
        let mut g = DependencyGraph::new();
        g.add_edge(internal("a.ts"), internal("b.ts"), ImportKind::Value, "./b");

        assert!(g.has_node(&internal("a.ts")));
        assert!(g.has_node(&internal("b.ts")));
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn target_node_exists_before_its_file_is_visited() {
        let mut g = DependencyGraph::new();
        g.add_edge(internal("a.ts"), internal("b.ts"), ImportKind::Value, "./b");

        // b.ts has not been visited, but it is queryable already.
        assert!(g.out_edges(&internal("b.ts")).is_empty());
        assert_eq!(g.in_edges(&internal("b.ts")).len(), 1);
    }

    #[test]
    fn identical_edges_are_deduplicated() {
        let mut g = DependencyGraph::new();
        g.add_edge(internal("a.ts"), internal("b.ts"), ImportKind::Value, "./b");
        g.add_edge(internal("a.ts"), internal("b.ts"), ImportKind::Value, "./b");

        assert_eq!(g.out_edges(&internal("a.ts")).len(), 1);
        assert_eq!(g.in_edges(&internal("b.ts")).len(), 1);
    }

    #[test]
    fn distinct_specifiers_between_same_pair_all_remain() {
        let mut g = DependencyGraph::new();
        g.add_edge(internal("a.ts"), internal("b.ts"), ImportKind::Value, "./b");
        g.add_edge(internal("a.ts"), internal("b.ts"), ImportKind::Value, "./b.ts");
        g.add_edge(internal("a.ts"), internal("b.ts"), ImportKind::TypeOnly, "./b");

        assert_eq!(g.out_edges(&internal("a.ts")).len(), 3);
    }

    #[test]
    fn edge_order_is_insertion_order() {
        let mut g = DependencyGraph::new();
        g.add_edge(internal("a.ts"), internal("c.ts"), ImportKind::Value, "./c");
        g.add_edge(internal("a.ts"), internal("b.ts"), ImportKind::Value, "./b");

        let vias: Vec<&str> = g
            .out_edges(&internal("a.ts"))
            .iter()
            .map(|e| e.via.as_str())
            .collect();
        assert_eq!(vias, vec!["./c", "./b"]);
    }

    #[test]
    fn edges_out_of_external_modules_are_ignored() {
        let mut g = DependencyGraph::new();
        g.add_edge(
            ModuleId::external("lodash"),
            internal("a.ts"),
            ImportKind::Value,
            "./a",
        );

        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn reset_drops_everything() {
        let mut g = DependencyGraph::new();
        g.add_edge(internal("a.ts"), internal("b.ts"), ImportKind::Value, "./b");
        g.reset();

        assert!(!g.has_node(&internal("a.ts")));
        assert!(!g.has_node(&internal("b.ts")));
        assert_eq!(g.node_count(), 0);
    }
}

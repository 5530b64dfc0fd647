//! Cycle detection over the dependency graph.

use std::collections::HashSet;

use crate::graph::DependencyGraph;
use crate::module_id::ModuleId;

/// Result of a cycle query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleResult {
    /// No path from the queried module leads back around.
    NoCycle,
    /// A cycle was found. The path lists each member exactly once and is
    /// rotated so the smallest member comes first, so rotations of the
    /// same cycle report identically across runs.
    Cycle(Vec<ModuleId>),
}

impl CycleResult {
    /// Returns true if a cycle was found.
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle(_))
    }

    /// The cycle members, empty for `NoCycle`.
    #[must_use]
    pub fn members(&self) -> &[ModuleId] {
        match self {
            Self::Cycle(path) => path,
            Self::NoCycle => &[],
        }
    }
}

/// Searches for a cycle reachable from `start`.
///
/// Iterative depth-first traversal over outgoing edges. A back-edge to a
/// node currently on the traversal stack closes a cycle; the reported path
/// is the stack slice from that node to the current one. External modules
/// are leaves and terminate traversal immediately. Worst case O(V + E);
/// a start node with no outgoing edges answers in O(1).
#[must_use]
pub fn find_cycle(graph: &DependencyGraph, start: &ModuleId) -> CycleResult {
    if start.is_external() || graph.out_edges(start).is_empty() {
        return CycleResult::NoCycle;
    }

    // `stack` holds (node, next-edge cursor); `on_stack` mirrors it for
    // O(1) back-edge checks; `explored` holds nodes whose entire reachable
    // subtree is known cycle-free within this query.
    let mut stack: Vec<(ModuleId, usize)> = vec![(start.clone(), 0)];
    let mut on_stack: HashSet<ModuleId> = HashSet::new();
    on_stack.insert(start.clone());
    let mut explored: HashSet<ModuleId> = HashSet::new();

    while let Some((node, cursor)) = stack.last().cloned() {
        let edges = graph.out_edges(&node);

        if cursor >= edges.len() {
            stack.pop();
            on_stack.remove(&node);
            explored.insert(node);
            continue;
        }

        if let Some(frame) = stack.last_mut() {
            frame.1 += 1;
        }

        let target = &edges[cursor].to;
        if target.is_external() || explored.contains(target) {
            continue;
        }
        if on_stack.contains(target) {
            return close_cycle(&stack, target);
        }

        on_stack.insert(target.clone());
        stack.push((target.clone(), 0));
    }

    CycleResult::NoCycle
}

/// Builds the reported path from the stack slice `[target ..= current]`.
fn close_cycle(stack: &[(ModuleId, usize)], target: &ModuleId) -> CycleResult {
    let Some(pos) = stack.iter().position(|(node, _)| node == target) else {
        // An on-stack node must be findable on the stack. If bookkeeping
        // ever disagrees, degrade this single query to NoCycle instead of
        // taking down the whole lint run.
        tracing::warn!("cycle detector bookkeeping out of sync for {target}");
        return CycleResult::NoCycle;
    };

    let mut path: Vec<ModuleId> = stack[pos..].iter().map(|(node, _)| node.clone()).collect();
    rotate_to_min(&mut path);
    CycleResult::Cycle(path)
}

/// Rotates the path in place so its smallest member is first.
fn rotate_to_min(path: &mut [ModuleId]) {
    let min_pos = path
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map_or(0, |(i, _)| i);
    path.rotate_left(min_pos);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ImportKind;

    fn internal(name: &str) -> ModuleId {
        ModuleId::internal(format!("/proj/src/{name}"))
    }

    fn edge(g: &mut DependencyGraph, from: &str, to: &str) {
        g.add_edge(
            internal(from),
            internal(to),
            ImportKind::Value,
            format!("./{}", to.trim_end_matches(".ts")),
        );
    }

    #[test]
    fn node_without_out_edges_has_no_cycle() {
        let g = DependencyGraph::new();
        assert_eq!(find_cycle(&g, &internal("a.ts")), CycleResult::NoCycle);
    }

    #[test]
    fn chain_has_no_cycle() {
        let mut g = DependencyGraph::new();
        edge(&mut g, "a.ts", "b.ts");
        edge(&mut g, "b.ts", "c.ts");

        for name in ["a.ts", "b.ts", "c.ts"] {
            assert_eq!(find_cycle(&g, &internal(name)), CycleResult::NoCycle);
        }
    }

    #[test]
    fn self_import_is_a_single_node_cycle() {
        let mut g = DependencyGraph::new();
        g.add_edge(internal("a.ts"), internal("a.ts"), ImportKind::Value, "./a");

        assert_eq!(
            find_cycle(&g, &internal("a.ts")),
            CycleResult::Cycle(vec![internal("a.ts")])
        );
    }

    #[test]
    fn three_node_cycle_found_from_every_member() {
        let mut g = DependencyGraph::new();
        edge(&mut g, "a.ts", "b.ts");
        edge(&mut g, "b.ts", "c.ts");
        edge(&mut g, "c.ts", "a.ts");

        for name in ["a.ts", "b.ts", "c.ts"] {
            let result = find_cycle(&g, &internal(name));
            let mut members = result.members().to_vec();
            members.sort();
            assert_eq!(
                members,
                vec![internal("a.ts"), internal("b.ts"), internal("c.ts")],
                "queried from {name}"
            );
        }
    }

    #[test]
    fn cycle_rotation_is_stable_across_start_nodes() {
        let mut g = DependencyGraph::new();
        edge(&mut g, "a.ts", "b.ts");
        edge(&mut g, "b.ts", "c.ts");
        edge(&mut g, "c.ts", "a.ts");

        let from_a = find_cycle(&g, &internal("a.ts"));
        let from_b = find_cycle(&g, &internal("b.ts"));
        let from_c = find_cycle(&g, &internal("c.ts"));
        assert_eq!(from_a, from_b);
        assert_eq!(from_b, from_c);
        // Smallest member first.
        assert_eq!(from_a.members().first(), Some(&internal("a.ts")));
    }

    #[test]
    fn external_targets_terminate_traversal() {
        let mut g = DependencyGraph::new();
        g.add_edge(
            internal("a.ts"),
            ModuleId::external("lodash"),
            ImportKind::Value,
            "lodash",
        );
        g.add_edge(
            internal("a.ts"),
            ModuleId::external("@acme/ui"),
            ImportKind::Value,
            "@acme/ui",
        );

        assert_eq!(find_cycle(&g, &internal("a.ts")), CycleResult::NoCycle);
    }

    #[test]
    fn side_branch_does_not_produce_false_cycle() {
        // a -> b -> c, plus c -> b closes a cycle not containing a.
        let mut g = DependencyGraph::new();
        edge(&mut g, "a.ts", "b.ts");
        edge(&mut g, "b.ts", "c.ts");
        edge(&mut g, "c.ts", "b.ts");

        let result = find_cycle(&g, &internal("a.ts"));
        let mut members = result.members().to_vec();
        members.sort();
        assert_eq!(members, vec![internal("b.ts"), internal("c.ts")]);
    }

    #[test]
    fn diamond_without_back_edge_is_clean() {
        let mut g = DependencyGraph::new();
        edge(&mut g, "a.ts", "b.ts");
        edge(&mut g, "a.ts", "c.ts");
        edge(&mut g, "b.ts", "d.ts");
        edge(&mut g, "c.ts", "d.ts");

        for name in ["a.ts", "b.ts", "c.ts", "d.ts"] {
            assert_eq!(find_cycle(&g, &internal(name)), CycleResult::NoCycle);
        }
    }

    #[test]
    fn two_runs_report_identical_paths() {
        let mut g = DependencyGraph::new();
        edge(&mut g, "m.ts", "n.ts");
        edge(&mut g, "n.ts", "m.ts");

        assert_eq!(find_cycle(&g, &internal("m.ts")), find_cycle(&g, &internal("m.ts")));
    }
}

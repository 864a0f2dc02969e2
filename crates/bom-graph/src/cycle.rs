use crate::arena::{Arena, NodeIndex};
use bom_core::Part;
use std::collections::HashSet;

/// DFS cycle detector used to build a human-readable witness path once
/// [`crate::level::LevelAssigner`] has already concluded, via the `N+1`-pass
/// bound, that the graph does not level-assign.
pub struct CycleDetector<'a> {
    arena: &'a Arena,
}

impl<'a> CycleDetector<'a> {
    pub fn new(arena: &'a Arena) -> Self {
        Self { arena }
    }

    /// First cycle found by DFS, as a sequence of node indices `p0 -> p1 -> ... -> p0`.
    /// Pass the result to [`Self::describe`] to render it as part identifiers.
    pub fn find_witness(&self) -> Option<Vec<NodeIndex>> {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();
        let mut path = Vec::new();

        for idx in 0..self.arena.node_count() {
            let node = NodeIndex(idx);
            if !visited.contains(&node) {
                if let Some(cycle) = self.dfs(node, &mut visited, &mut rec_stack, &mut path) {
                    return Some(cycle);
                }
            }
        }

        None
    }

    fn dfs(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        rec_stack: &mut HashSet<NodeIndex>,
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<NodeIndex>> {
        visited.insert(node);
        rec_stack.insert(node);
        path.push(node);

        for (child, _) in self.arena.children(node) {
            if rec_stack.contains(&child) {
                let start = path.iter().position(|&n| n == child).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(child);
                return Some(cycle);
            }
            if !visited.contains(&child) {
                if let Some(cycle) = self.dfs(child, visited, rec_stack, path) {
                    return Some(cycle);
                }
            }
        }

        path.pop();
        rec_stack.remove(&node);
        None
    }

    fn part_path(&self, indices: &[NodeIndex]) -> Vec<Part> {
        indices
            .iter()
            .filter_map(|&idx| self.arena.node(idx))
            .map(|node| node.part.clone())
            .collect()
    }

    /// Render a witness path as `A -> B -> C -> A`.
    pub fn describe(&self, indices: &[NodeIndex]) -> String {
        self.part_path(indices)
            .iter()
            .map(Part::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

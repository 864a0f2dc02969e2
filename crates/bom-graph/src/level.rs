use crate::cycle::CycleDetector;
use crate::graph::BomGraph;
use bom_core::{BomError, Part, Result};
use std::collections::HashMap;

/// Low-level codes assigned to every part reachable in a [`BomGraph`],
/// keyed by part. A part never seen by the graph (a pure stock item with
/// no BOM edges at all) is not present here — callers default such lookups
/// to level 0, per the "remaining stock item" rule.
#[derive(Debug, Clone, Default)]
pub struct Levels(HashMap<Part, u32>);

impl Levels {
    /// The assigned level, or `0` for any part the graph never recorded.
    pub fn get(&self, part: &Part) -> u32 {
        self.0.get(part).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Part, &u32)> {
        self.0.iter()
    }

    pub fn max_level(&self) -> u32 {
        self.0.values().copied().max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Assigns each BOM-reachable part a low-level code equal to the longest
/// acyclic path from any top assembly to that part.
///
/// The frontier starts at every top assembly (level 0) and relaxes
/// `level(child) = max(level(child), level(parent) + 1)` across every edge,
/// repeating until a pass makes no change. A BOM that doesn't reach a fixed
/// point within `N+1` passes — `N` the number of distinct parts in the
/// graph — is cyclic; so is any part with an incoming edge that the
/// relaxation never reaches at all, since that can only happen if every
/// path to it loops back on itself with no top assembly at the other end.
pub struct LevelAssigner;

impl LevelAssigner {
    pub fn assign(graph: &BomGraph) -> Result<Levels> {
        let arena = graph.arena();
        let node_count = arena.node_count();

        let mut levels: HashMap<_, u32> = HashMap::with_capacity(node_count);
        for &root in graph.roots() {
            levels.insert(root, 0);
        }

        let max_passes = node_count + 1;
        let mut converged = false;

        for pass in 0..max_passes {
            let mut changed = false;
            for edge in arena.edges() {
                let Some(&parent_level) = levels.get(&edge.source) else {
                    continue;
                };
                let candidate = parent_level + 1;
                let should_update = match levels.get(&edge.target) {
                    Some(&existing) => candidate > existing,
                    None => true,
                };
                if should_update {
                    levels.insert(edge.target, candidate);
                    changed = true;
                }
            }
            if !changed {
                tracing::debug!(pass, nodes_leveled = levels.len(), "level relaxation converged");
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::debug!(max_passes, "level relaxation did not converge, checking for a cycle");
            return Err(cyclic_bom_error(graph));
        }

        // Any node with an incoming edge but no assigned level sits in a
        // cycle that no top assembly reaches — the relaxation pass never
        // touched it because its only "parent" never had a level either.
        for (idx, node) in arena.nodes().iter().enumerate() {
            let node_idx = crate::arena::NodeIndex(idx);
            if !node.incoming.is_empty() && !levels.contains_key(&node_idx) {
                return Err(cyclic_bom_error(graph));
            }
        }

        let by_part = levels
            .into_iter()
            .filter_map(|(idx, level)| arena.node(idx).map(|n| (n.part.clone(), level)))
            .collect();

        Ok(Levels(by_part))
    }
}

fn cyclic_bom_error(graph: &BomGraph) -> BomError {
    let detector = CycleDetector::new(graph.arena());
    let witness = detector
        .find_witness()
        .map(|path| detector.describe(&path))
        .unwrap_or_else(|| "<cycle not isolated>".to_string());
    BomError::CyclicBom(witness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_core::{BomEdge, InMemoryBomRepository};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn edge(parent: &str, child: &str) -> BomEdge {
        BomEdge::new(
            Part::new(parent),
            Part::new(child),
            Decimal::ONE,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            BomEdge::NO_EXPIRY,
        )
        .unwrap()
    }

    #[test]
    fn single_level_bom_assigns_llc_one_to_components() {
        let mut repo = InMemoryBomRepository::new();
        repo.add_edge(edge("A", "B"));
        repo.add_edge(edge("A", "C"));

        let graph = BomGraph::from_repository(&repo).unwrap();
        let levels = LevelAssigner::assign(&graph).unwrap();

        assert_eq!(levels.get(&Part::new("A")), 0);
        assert_eq!(levels.get(&Part::new("B")), 1);
        assert_eq!(levels.get(&Part::new("C")), 1);
    }

    #[test]
    fn shared_component_takes_the_longest_path() {
        // A -> B -> D (depth 2)
        // A -> D       (depth 1, shorter, should lose to the longer path)
        let mut repo = InMemoryBomRepository::new();
        repo.add_edge(edge("A", "B"));
        repo.add_edge(edge("B", "D"));
        repo.add_edge(edge("A", "D"));

        let graph = BomGraph::from_repository(&repo).unwrap();
        let levels = LevelAssigner::assign(&graph).unwrap();

        assert_eq!(levels.get(&Part::new("D")), 2);
    }

    #[test]
    fn part_outside_the_graph_defaults_to_llc_zero() {
        let repo = InMemoryBomRepository::new();
        let graph = BomGraph::from_repository(&repo).unwrap();
        let levels = LevelAssigner::assign(&graph).unwrap();

        assert_eq!(levels.get(&Part::new("PURCHASED-ONLY")), 0);
    }

    #[test]
    fn direct_cycle_is_rejected() {
        let mut repo = InMemoryBomRepository::new();
        repo.add_edge(edge("A", "B"));
        repo.add_edge(edge("B", "A"));

        let graph = BomGraph::from_repository(&repo).unwrap();
        let err = LevelAssigner::assign(&graph).unwrap_err();
        assert!(matches!(err, BomError::CyclicBom(_)));
    }

    #[test]
    fn cycle_attached_below_a_root_is_still_rejected() {
        // A is a real top assembly, but B <-> C loops forever beneath it.
        let mut repo = InMemoryBomRepository::new();
        repo.add_edge(edge("A", "B"));
        repo.add_edge(edge("B", "C"));
        repo.add_edge(edge("C", "B"));

        let graph = BomGraph::from_repository(&repo).unwrap();
        let err = LevelAssigner::assign(&graph).unwrap_err();
        assert!(matches!(err, BomError::CyclicBom(_)));
    }

    #[test]
    fn tie_break_order_is_ascending_part_id() {
        let mut repo = InMemoryBomRepository::new();
        repo.add_edge(edge("A", "Z"));
        repo.add_edge(edge("A", "M"));
        repo.add_edge(edge("A", "B"));

        let graph = BomGraph::from_repository(&repo).unwrap();
        let levels = LevelAssigner::assign(&graph).unwrap();

        let mut same_level: Vec<_> = levels
            .iter()
            .filter(|(_, &lvl)| lvl == 1)
            .map(|(part, _)| part.as_str().to_string())
            .collect();
        same_level.sort();
        assert_eq!(same_level, vec!["B", "M", "Z"]);
    }
}

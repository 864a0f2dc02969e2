use crate::arena::{Arena, NodeIndex};
use bom_core::{BomEdge, BomRepository, Part, Result};
use std::collections::HashSet;

/// BOM graph — the arena plus the set of top assemblies (parts that are a
/// parent of some edge but never a child of any edge), which seed
/// [`crate::level::LevelAssigner`]'s frontier.
pub struct BomGraph {
    arena: Arena,
    roots: Vec<NodeIndex>,
}

impl BomGraph {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(node_capacity, edge_capacity),
            roots: Vec::new(),
        }
    }

    /// Build a graph from every BOM edge a repository knows about.
    ///
    /// Every edge is accepted, even ones that together close a cycle:
    /// detecting that is `LevelAssigner`'s job, not the graph's, so a
    /// malformed BOM still loads in full and can be diagnosed with a
    /// witness path.
    pub fn from_repository<R: BomRepository>(repo: &R) -> Result<Self> {
        let all_edges = repo.get_all_bom_edges()?;

        let mut parts = HashSet::new();
        for edge in &all_edges {
            parts.insert(edge.parent_part.clone());
            parts.insert(edge.child_part.clone());
        }

        let mut graph = Self::with_capacity(parts.len(), all_edges.len());
        for edge in all_edges {
            graph.add_edge(edge);
        }
        graph.identify_roots();

        Ok(graph)
    }

    /// Add a single BOM edge, creating its endpoint nodes as needed.
    pub fn add_edge(&mut self, edge: BomEdge) -> NodeIndex {
        let parent_node = self.arena.add_node(edge.parent_part.clone());
        let child_node = self.arena.add_node(edge.child_part.clone());
        self.arena.add_edge(parent_node, child_node, edge);
        parent_node
    }

    /// A node with no incoming edges: a top assembly, never itself a
    /// component of anything else in the loaded BOM.
    fn identify_roots(&mut self) {
        self.roots.clear();
        for (idx, node) in self.arena.nodes().iter().enumerate() {
            if node.incoming.is_empty() {
                self.roots.push(NodeIndex(idx));
            }
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    pub fn find_node(&self, part: &Part) -> Option<NodeIndex> {
        self.arena.find_node(part)
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.arena.node_count(),
            edge_count: self.arena.edge_count(),
            root_count: self.roots.len(),
        }
    }
}

impl Default for BomGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub root_count: usize,
}

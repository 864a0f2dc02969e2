use bom_core::{BomEdge, Part};
use std::collections::HashMap;

/// Node index in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(pub usize);

/// Edge index in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeIndex(pub usize);

/// Node data in the BOM graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub part: Part,
    pub incoming: Vec<EdgeIndex>,
    pub outgoing: Vec<EdgeIndex>,
}

/// Edge data representing a parent-child relationship.
#[derive(Debug, Clone)]
pub struct Edge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub bom_edge: BomEdge,
}

/// Arena-based graph structure for the BOM.
///
/// Edges here are accepted unconditionally — a malformed BOM that cycles
/// back on itself must still load in full so that `LevelAssigner` can
/// detect and report the cycle itself, rather than the graph silently
/// refusing the cycle-closing edge at insertion time.
pub struct Arena {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    part_index: HashMap<Part, NodeIndex>,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            part_index: HashMap::new(),
        }
    }

    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_capacity),
            edges: Vec::with_capacity(edge_capacity),
            part_index: HashMap::with_capacity(node_capacity),
        }
    }

    /// Add a node if absent, returning its index either way.
    pub fn add_node(&mut self, part: Part) -> NodeIndex {
        if let Some(&idx) = self.part_index.get(&part) {
            return idx;
        }

        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(Node {
            part: part.clone(),
            incoming: Vec::new(),
            outgoing: Vec::new(),
        });
        self.part_index.insert(part, idx);
        idx
    }

    pub fn add_edge(&mut self, parent: NodeIndex, child: NodeIndex, bom_edge: BomEdge) -> EdgeIndex {
        let edge_idx = EdgeIndex(self.edges.len());
        self.edges.push(Edge {
            source: parent,
            target: child,
            bom_edge,
        });

        self.nodes[parent.0].outgoing.push(edge_idx);
        self.nodes[child.0].incoming.push(edge_idx);

        edge_idx
    }

    #[inline]
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.0)
    }

    #[inline]
    pub fn edge(&self, index: EdgeIndex) -> Option<&Edge> {
        self.edges.get(index.0)
    }

    pub fn find_node(&self, part: &Part) -> Option<NodeIndex> {
        self.part_index.get(part).copied()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn children(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, &Edge)> + '_ {
        self.node(node)
            .into_iter()
            .flat_map(|n| n.outgoing.iter())
            .filter_map(|&edge_idx| self.edge(edge_idx).map(|edge| (edge.target, edge)))
    }

    pub fn parents(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, &Edge)> + '_ {
        self.node(node)
            .into_iter()
            .flat_map(|n| n.incoming.iter())
            .filter_map(|&edge_idx| self.edge(edge_idx).map(|edge| (edge.source, edge)))
    }

    /// Depth-first search for a path `source -> ... -> target`, used only to
    /// build a human-readable witness once `LevelAssigner` has already
    /// concluded a cycle exists.
    pub fn find_path(&self, source: NodeIndex, target: NodeIndex) -> Option<Vec<NodeIndex>> {
        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![vec![source]];

        while let Some(path) = stack.pop() {
            let current = *path.last().unwrap();
            if current == target && path.len() > 1 {
                return Some(path);
            }
            if visited[current.0] {
                continue;
            }
            visited[current.0] = true;

            for (child, _) in self.children(current) {
                let mut next_path = path.clone();
                next_path.push(child);
                stack.push(next_path);
            }
        }

        None
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

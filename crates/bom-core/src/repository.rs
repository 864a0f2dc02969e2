use crate::{BomEdge, Result};

/// Read access to the full BOM edge set, historical and active alike.
///
/// Separated from the richer `mrp-adapters::StorageReader` so that
/// `bom-graph` can build and level-assign a graph without depending on the
/// rest of the MRP read surface (sales orders, inventory, and so on).
pub trait BomRepository: Send + Sync {
    /// All BOM edges, regardless of effectivity. Level assignment needs the
    /// full history so low-level codes stay stable across time; explosion
    /// filters down to [`BomEdge::is_active`] edges separately.
    fn get_all_bom_edges(&self) -> Result<Vec<BomEdge>>;
}

/// In-memory [`BomRepository`] for tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBomRepository {
    edges: Vec<BomEdge>,
}

impl InMemoryBomRepository {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    pub fn with_edges(edges: Vec<BomEdge>) -> Self {
        Self { edges }
    }

    pub fn add_edge(&mut self, edge: BomEdge) {
        self.edges.push(edge);
    }
}

impl BomRepository for InMemoryBomRepository {
    fn get_all_bom_edges(&self) -> Result<Vec<BomEdge>> {
        Ok(self.edges.clone())
    }
}

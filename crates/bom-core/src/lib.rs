//! Core BOM types: part identity, the parent/child edge, and the read-only
//! repository trait `bom-graph` builds a graph from.

pub mod edge;
pub mod error;
pub mod part;
pub mod repository;

pub use edge::BomEdge;
pub use error::{BomError, Result};
pub use part::{Part, PART_ID_MAX_LEN};
pub use repository::{BomRepository, InMemoryBomRepository};

//! Arena-backed BOM graph and the longest-path low-level-code assigner
//! built on top of it.

pub mod arena;
pub mod cycle;
pub mod graph;
pub mod level;

pub use arena::{Arena, Edge, EdgeIndex, Node, NodeIndex};
pub use cycle::CycleDetector;
pub use graph::{BomGraph, GraphStats};
pub use level::{LevelAssigner, Levels};

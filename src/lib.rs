//! Umbrella crate re-exporting the MRP engine's public surface so callers
//! can depend on a single `mrp` crate instead of wiring up each workspace
//! member directly.

pub use bom_core::{BomEdge, BomError, BomRepository, Part};
pub use bom_graph::{BomGraph, LevelAssigner, Levels};
pub use mrp_adapters::{InMemoryStorage, StorageReader, StorageWriter};
pub use mrp_calc::{Catalog, CatalogEntry, Engine, Netter, RequirementsLoader, SuppliesLoader};
pub use mrp_core::{
    CalendarDays, DateOffset, EngineConfig, MrpError, PlannedOrder, Requirement, Result, Run,
    RunSummary, Supply, WorkCalendar,
};

//! The MRP calculation engine: catalog resolution, demand/supply loading,
//! per-part netting, and the `Engine` that sequences them into a run.

pub mod catalog;
pub mod engine;
pub mod netter;
pub mod requirements_loader;
pub mod supplies_loader;

pub use catalog::{Catalog, CatalogEntry};
pub use engine::Engine;
pub use netter::{Netter, PartNetResult};
pub use requirements_loader::RequirementsLoader;
pub use supplies_loader::SuppliesLoader;

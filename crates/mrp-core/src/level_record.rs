use bom_core::Part;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The resolved low-level code and planning attributes for one part —
/// the row the storage adapter's Levels set persists per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRecord {
    pub part: Part,
    pub llc: u32,
    pub lead_time_days: u32,
    pub pan_size: Decimal,
    pub shrink_factor: Decimal,
    pub eoq: Decimal,
}

impl LevelRecord {
    pub fn new(part: Part, llc: u32) -> Self {
        Self {
            part,
            llc,
            lead_time_days: 0,
            pan_size: Decimal::ZERO,
            shrink_factor: Decimal::ZERO,
            eoq: Decimal::ZERO,
        }
    }
}

//! Per-part planning attributes, resolved once and read-only thereafter.

use bom_core::Part;
use mrp_adapters::{ItemMasterRecord, PreferredSupplierLeadTime};
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub lead_time_days: u32,
    pub pan_size: Decimal,
    pub shrink_factor: Decimal,
    pub eoq: Decimal,
}

impl Default for CatalogEntry {
    fn default() -> Self {
        Self {
            lead_time_days: 0,
            pan_size: Decimal::ZERO,
            shrink_factor: Decimal::ZERO,
            eoq: Decimal::ZERO,
        }
    }
}

/// Planning attributes for every part, resolved from item master and
/// preferred-supplier data. A part absent from both sources defaults to
/// the zero entry (pass-through: no lead time, no lot sizing, no shrink).
pub struct Catalog {
    entries: HashMap<Part, CatalogEntry>,
}

impl Catalog {
    pub fn build(
        item_master: &[ItemMasterRecord],
        preferred_supplier_lead_times: &[PreferredSupplierLeadTime],
    ) -> Self {
        let mut entries: HashMap<Part, CatalogEntry> = HashMap::new();

        for item in item_master {
            entries.insert(
                item.part.clone(),
                CatalogEntry {
                    lead_time_days: item.lead_time_days.unwrap_or(0),
                    pan_size: item.pan_size,
                    shrink_factor: item.shrink_factor,
                    eoq: item.eoq,
                },
            );
        }

        for preferred in preferred_supplier_lead_times {
            if preferred.lead_time_days > 0 {
                entries
                    .entry(preferred.part.clone())
                    .or_default()
                    .lead_time_days = preferred.lead_time_days;
            }
        }

        Self { entries }
    }

    pub fn get(&self, part: &Part) -> CatalogEntry {
        self.entries.get(part).copied().unwrap_or_default()
    }
}

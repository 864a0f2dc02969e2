//! Raw record shapes the storage adapter's read side hands back — one per
//! source table named in the external-interface surface. These are ERP
//! facts, not yet `Requirement`/`Supply` rows; the loaders in `mrp-calc`
//! turn them into those.

use bom_core::Part;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Open, non-quote, non-discontinued sales order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrderLine {
    pub order_no: String,
    pub part: Part,
    pub ordered: Decimal,
    pub invoiced: Decimal,
    pub due_date: NaiveDate,
}

/// An open work order: both a demand (its components) and a supply (its
/// output), which is why the read surface exposes one method for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    pub wo_no: String,
    pub output_part: Part,
    pub qty_reqd: Decimal,
    pub qty_received: Decimal,
    pub required_by: NaiveDate,
    pub components: Vec<WorkOrderComponent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderComponent {
    pub part: Part,
    pub qty_per_unit: Decimal,
}

/// An already-issued stock move against one component of a work order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMove {
    pub part: Part,
    pub quantity: Decimal,
}

/// Manual planning input, used when `useMrpDemands` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrpDemandRecord {
    pub order_no: String,
    pub part: Part,
    pub quantity: Decimal,
    pub required_date: NaiveDate,
}

/// Reorder-level and on-hand figures for one part at one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationStock {
    pub part: Part,
    pub location: String,
    pub reorder_level: Decimal,
    pub on_hand: Decimal,
}

/// Open purchase-order line (status not in Cancelled/Rejected/Completed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub order_no: String,
    pub part: Part,
    pub ordered: Decimal,
    pub received: Decimal,
    pub due_date: NaiveDate,
}

/// A positive stock move contributing to on-hand quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositiveStockMove {
    pub part: Part,
    pub location: String,
    pub quantity: Decimal,
}

/// Item master row: planning attributes that don't come from the
/// preferred-supplier table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemMasterRecord {
    pub part: Part,
    pub lead_time_days: Option<u32>,
    pub pan_size: Decimal,
    pub shrink_factor: Decimal,
    pub eoq: Decimal,
}

impl ItemMasterRecord {
    pub fn new(part: Part) -> Self {
        Self {
            part,
            lead_time_days: None,
            pan_size: Decimal::ZERO,
            shrink_factor: Decimal::ZERO,
            eoq: Decimal::ZERO,
        }
    }
}

/// Preferred-supplier lead time, takes precedence over the item master's
/// own `lead_time_days` when present and positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferredSupplierLeadTime {
    pub part: Part,
    pub lead_time_days: u32,
}

/// A location filter passed to the reorder and on-hand read methods.
/// Empty, or containing `"All"`, means "don't filter — aggregate every
/// location".
#[derive(Debug, Clone, Default)]
pub struct LocationFilter(pub HashSet<String>);

impl LocationFilter {
    pub fn all() -> Self {
        Self(HashSet::new())
    }

    pub fn matches(&self, location: &str) -> bool {
        self.0.is_empty() || self.0.contains("All") || self.0.contains(location)
    }
}

impl From<&HashSet<String>> for LocationFilter {
    fn from(set: &HashSet<String>) -> Self {
        Self(set.clone())
    }
}

use crate::requirement::DemandType;
use bom_core::Part;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A replenishment order emitted by the netter to close a net shortfall.
/// Planned orders never become supplies within the same run — they feed
/// the *requirements* set one level lower, via explosion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedOrder {
    pub part: Part,
    pub due_date: NaiveDate,
    pub quantity: Decimal,
    pub source_demand_type: DemandType,
    pub source_order_no: String,
}

impl PlannedOrder {
    pub fn new(
        part: Part,
        due_date: NaiveDate,
        quantity: Decimal,
        source_demand_type: DemandType,
        source_order_no: impl Into<String>,
    ) -> Self {
        Self {
            part,
            due_date,
            quantity,
            source_demand_type,
            source_order_no: source_order_no.into(),
        }
    }
}

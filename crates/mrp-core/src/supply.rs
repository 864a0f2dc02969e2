use bom_core::Part;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source of a supply row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// Open purchase-order line.
    Po,
    /// Open work-order receipt.
    Wo,
    /// On-hand inventory (quantity on hand).
    Qoh,
}

/// Sentinel due date on-hand supplies carry so they sort before every dated
/// supply and are consumed first.
pub fn past_due_sentinel() -> NaiveDate {
    NaiveDate::MIN
}

/// A single line of supply against a part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supply {
    pub id: Uuid,
    pub part: Part,
    pub due_date: NaiveDate,
    pub supply_qty: Decimal,
    pub order_type: OrderType,
    pub order_no: String,
    /// Advisory rescheduled date; starts equal to `due_date`. Updated at
    /// most once, the first time allocation finds this supply later than
    /// its matched requirement by more than the configured leeway.
    pub mrp_date: NaiveDate,
    /// Whether `mrp_date` has already been advised away from `due_date`.
    pub update_flag: bool,
}

impl Supply {
    pub fn new(
        part: Part,
        due_date: NaiveDate,
        supply_qty: Decimal,
        order_type: OrderType,
        order_no: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            part,
            due_date,
            supply_qty,
            order_type,
            order_no: order_no.into(),
            mrp_date: due_date,
            update_flag: false,
        }
    }

    /// On-hand inventory, carrying the past-due sentinel date.
    pub fn on_hand(part: Part, supply_qty: Decimal, order_no: impl Into<String>) -> Self {
        Self::new(part, past_due_sentinel(), supply_qty, OrderType::Qoh, order_no)
    }

    /// Advise a new `mrp_date`, once. No-op if already advised.
    pub fn advise_reschedule(&mut self, new_date: NaiveDate) {
        if self.mrp_date == self.due_date && new_date != self.due_date {
            self.mrp_date = new_date;
            self.update_flag = true;
        }
    }
}

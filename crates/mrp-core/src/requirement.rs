use bom_core::Part;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Source of a requirement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandType {
    /// Sales order line.
    So,
    /// Work-order component need.
    Wo,
    /// MRP demand record (manual planning input).
    Mrpd,
    /// Reorder-point top-up.
    Reord,
}

/// A single line of demand against a part, at a point in the netting
/// pipeline. `quantity` is consumed downward during allocation and may
/// reach zero without the row being removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    pub part: Part,
    pub date_required: NaiveDate,
    pub quantity: Decimal,
    pub demand_type: DemandType,
    pub order_no: String,
    /// `true` for a requirement sourced from an external driver (sales,
    /// work order, MRP demand, reorder); `false` for dependent demand
    /// injected by explosion of a parent's planned order.
    pub direct_demand: bool,
    /// The part this requirement traces back to: itself for direct demand,
    /// the parent part for exploded dependent demand.
    pub where_required: Part,
}

impl Requirement {
    pub fn new(
        part: Part,
        date_required: NaiveDate,
        quantity: Decimal,
        demand_type: DemandType,
        order_no: impl Into<String>,
        direct_demand: bool,
        where_required: Part,
    ) -> Self {
        Self {
            part,
            date_required,
            quantity,
            demand_type,
            order_no: order_no.into(),
            direct_demand,
            where_required,
        }
    }

    /// A direct requirement traces to itself.
    pub fn direct(
        part: Part,
        date_required: NaiveDate,
        quantity: Decimal,
        demand_type: DemandType,
        order_no: impl Into<String>,
    ) -> Self {
        let where_required = part.clone();
        Self::new(part, date_required, quantity, demand_type, order_no, true, where_required)
    }

    pub fn is_unmet(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn direct_requirement_traces_to_itself() {
        let req = Requirement::direct(
            Part::new("A"),
            date(2024, 2, 1),
            Decimal::from(50),
            DemandType::So,
            "SO-100",
        );
        assert_eq!(req.where_required, Part::new("A"));
        assert!(req.direct_demand);
        assert!(req.is_unmet());
    }

    #[test]
    fn zero_quantity_is_not_unmet() {
        let mut req = Requirement::direct(
            Part::new("A"),
            date(2024, 2, 1),
            Decimal::from(50),
            DemandType::So,
            "SO-100",
        );
        req.quantity = Decimal::ZERO;
        assert!(!req.is_unmet());
    }
}

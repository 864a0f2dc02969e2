use bom_core::Part;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::audit::ParametersAudit;

/// Per-part line of a run summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub part: Part,
    pub gross_requirements: Decimal,
    pub scheduled_receipts: Decimal,
    /// `scheduled_receipts - gross_requirements`.
    pub projected_balance: Decimal,
    pub net_requirements: Decimal,
    pub first_planned_quantity: Option<Decimal>,
    pub first_planned_date: Option<NaiveDate>,
}

impl ComponentSummary {
    pub fn new(part: Part, gross_requirements: Decimal, scheduled_receipts: Decimal, net_requirements: Decimal) -> Self {
        Self {
            part,
            gross_requirements,
            scheduled_receipts,
            projected_balance: scheduled_receipts - gross_requirements,
            net_requirements,
            first_planned_quantity: None,
            first_planned_date: None,
        }
    }
}

/// Returned from a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(with = "duration_millis")]
    pub run_time: Duration,
    pub parameters: ParametersAudit,
    pub planned_order_count: usize,
    pub total_planned_quantity: Decimal,
    pub per_part: Vec<ComponentSummary>,
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u128(duration.as_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projected_balance_is_receipts_minus_requirements() {
        let summary = ComponentSummary::new(Part::new("A"), Decimal::from(50), Decimal::from(50), Decimal::ZERO);
        assert_eq!(summary.projected_balance, Decimal::ZERO);
    }
}

use crate::{BomError, Part, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A parent→child BOM relationship, with the quantity of child consumed per
/// unit of parent and the date range over which the relationship applies.
///
/// All edges — including ones no longer effective — participate in level
/// assignment so that low-level codes stay stable across time. Only active
/// edges (`is_active`) are used for dependent-demand explosion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomEdge {
    pub parent_part: Part,
    pub child_part: Part,
    pub quantity_per: Decimal,
    pub effective_from: NaiveDate,
    /// Exclusive end of effectivity. Use [`BomEdge::NO_EXPIRY`] for an edge
    /// with no planned end date.
    pub effective_to: NaiveDate,
}

impl BomEdge {
    /// Sentinel "never expires" date, used in place of an optional end date.
    pub const NO_EXPIRY: NaiveDate = NaiveDate::MAX;

    pub fn new(
        parent_part: Part,
        child_part: Part,
        quantity_per: Decimal,
        effective_from: NaiveDate,
        effective_to: NaiveDate,
    ) -> Result<Self> {
        if quantity_per <= Decimal::ZERO {
            return Err(BomError::InvalidEdge(format!(
                "quantity_per must be > 0 for {} -> {}, got {}",
                parent_part, child_part, quantity_per
            )));
        }
        Ok(Self {
            parent_part,
            child_part,
            quantity_per,
            effective_from,
            effective_to,
        })
    }

    /// Active iff `effective_from <= today < effective_to`.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.effective_from <= today && today < self.effective_to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let result = BomEdge::new(
            Part::new("A"),
            Part::new("B"),
            Decimal::ZERO,
            date(2024, 1, 1),
            BomEdge::NO_EXPIRY,
        );
        assert!(result.is_err());
    }

    #[test]
    fn active_within_range_inclusive_exclusive() {
        let edge = BomEdge::new(
            Part::new("A"),
            Part::new("B"),
            Decimal::ONE,
            date(2024, 1, 1),
            date(2024, 6, 1),
        )
        .unwrap();

        assert!(!edge.is_active(date(2023, 12, 31)));
        assert!(edge.is_active(date(2024, 1, 1)));
        assert!(edge.is_active(date(2024, 5, 31)));
        assert!(!edge.is_active(date(2024, 6, 1)));
    }

    #[test]
    fn no_expiry_stays_active_indefinitely() {
        let edge = BomEdge::new(
            Part::new("A"),
            Part::new("B"),
            Decimal::ONE,
            date(2024, 1, 1),
            BomEdge::NO_EXPIRY,
        )
        .unwrap();

        assert!(edge.is_active(date(2099, 1, 1)));
    }
}

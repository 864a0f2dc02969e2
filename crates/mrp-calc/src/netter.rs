//! The core per-part netting algorithm: FIFO allocation of supply against
//! requirement, advisory rescheduling, lot sizing, due-date offset, and
//! dependent-demand explosion.

use bom_core::Part;
use mrp_core::{DateOffset, EngineConfig, PlannedOrder, Requirement, Supply};
use rust_decimal::Decimal;

/// Result of netting one part. `requirements` and `supplies` are the same
/// rows passed in, mutated in place by allocation — callers write these
/// back to the working sets (consumed quantity, advisory reschedules).
pub struct PartNetResult {
    pub requirements: Vec<Requirement>,
    pub supplies: Vec<Supply>,
    pub planned_orders: Vec<PlannedOrder>,
    pub dependent_requirements: Vec<Requirement>,
    pub gross_requirements: Decimal,
    pub scheduled_receipts: Decimal,
    pub net_requirements: Decimal,
}

pub struct Netter;

impl Netter {
    /// `requirements` and `supplies` must already be filtered to `part`.
    /// `children` is the part's active BOM children as `(component, qtyPer)`
    /// pairs, resolved by the caller against `today`.
    pub fn net_part(
        part: &Part,
        mut requirements: Vec<Requirement>,
        mut supplies: Vec<Supply>,
        entry: crate::catalog::CatalogEntry,
        config: &EngineConfig,
        date_offset: &dyn DateOffset,
        children: &[(Part, Decimal)],
    ) -> PartNetResult {
        requirements.sort_by_key(|r| r.date_required);
        supplies.sort_by_key(|s| s.due_date);

        let gross_requirements = requirements.iter().map(|r| r.quantity).sum();
        let scheduled_receipts = supplies.iter().map(|s| s.supply_qty).sum();

        Self::allocate(&mut requirements, &mut supplies, config.leeway_days);

        let net_requirements = requirements
            .iter()
            .filter(|r| r.is_unmet())
            .map(|r| r.quantity)
            .sum();

        let (planned_orders, dependent_requirements) =
            Self::lot_size(part, &requirements, &entry, config, date_offset, children);

        PartNetResult {
            requirements,
            supplies,
            planned_orders,
            dependent_requirements,
            gross_requirements,
            scheduled_receipts,
            net_requirements,
        }
    }

    /// Two-index FIFO allocation. Advisory reschedule fires before the
    /// quantity comparison, exactly once per supply.
    fn allocate(requirements: &mut [Requirement], supplies: &mut [Supply], leeway_days: i64) {
        let mut r = 0;
        let mut s = 0;

        while r < requirements.len() && s < supplies.len() {
            let req_date = requirements[r].date_required;
            let sup_due = supplies[s].due_date;

            if (sup_due - req_date).num_days() > leeway_days {
                supplies[s].advise_reschedule(req_date);
            }

            let req_qty = requirements[r].quantity;
            let sup_qty = supplies[s].supply_qty;

            if req_qty > sup_qty {
                requirements[r].quantity -= sup_qty;
                supplies[s].supply_qty = Decimal::ZERO;
                s += 1;
            } else if req_qty < sup_qty {
                supplies[s].supply_qty -= req_qty;
                requirements[r].quantity = Decimal::ZERO;
                r += 1;
            } else {
                requirements[r].quantity = Decimal::ZERO;
                supplies[s].supply_qty = Decimal::ZERO;
                r += 1;
                s += 1;
            }
        }
    }

    /// Lot sizing and dependent-demand explosion. A dependent requirement's
    /// `date_required` is the parent's planned `due_date` unchanged — the
    /// child's own lead time is applied once more, when the child is netted
    /// at its own (lower) level, not again here. Explosion does not
    /// pre-subtract the child's lead time.
    fn lot_size(
        part: &Part,
        requirements: &[Requirement],
        entry: &crate::catalog::CatalogEntry,
        config: &EngineConfig,
        date_offset: &dyn DateOffset,
        children: &[(Part, Decimal)],
    ) -> (Vec<PlannedOrder>, Vec<Requirement>) {
        let hundred = Decimal::from(100);
        let mut carry = Decimal::ZERO;
        let mut planned_orders = Vec::new();
        let mut dependent_requirements = Vec::new();

        for req in requirements.iter().filter(|r| r.is_unmet()) {
            let mut needed = req.quantity;

            if config.use_shrinkage && entry.shrink_factor > Decimal::ZERO && entry.shrink_factor < hundred {
                needed = (needed * hundred / (hundred - entry.shrink_factor)).round_dp(2);
            }

            if carry >= needed {
                carry -= needed;
                continue;
            }

            let mut plan_qty = needed - carry;
            carry = Decimal::ZERO;

            if config.use_eoq && entry.eoq > plan_qty {
                carry = entry.eoq - plan_qty;
                plan_qty = entry.eoq;
            }

            if config.use_pan_size && entry.pan_size > Decimal::ZERO {
                plan_qty = (plan_qty / entry.pan_size).ceil() * entry.pan_size;
            }

            let due_date = date_offset.offset(req.date_required, -(entry.lead_time_days as i64));

            planned_orders.push(PlannedOrder::new(
                part.clone(),
                due_date,
                plan_qty,
                req.demand_type,
                req.order_no.clone(),
            ));

            for (child, qty_per) in children {
                dependent_requirements.push(Requirement::new(
                    child.clone(),
                    due_date,
                    plan_qty * qty_per,
                    req.demand_type,
                    req.order_no.clone(),
                    false,
                    part.clone(),
                ));
            }
        }

        (planned_orders, dependent_requirements)
    }
}

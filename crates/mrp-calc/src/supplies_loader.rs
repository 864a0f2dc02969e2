//! Populates the working supplies set from open purchase orders, on-hand
//! inventory, and open work-order receipts.

use bom_core::Part;
use mrp_adapters::{LocationFilter, StorageReader};
use mrp_core::{EngineConfig, OrderType, Result, Supply};
use rust_decimal::Decimal;
use std::collections::HashMap;

pub struct SuppliesLoader;

impl SuppliesLoader {
    pub fn load(reader: &dyn StorageReader, config: &EngineConfig) -> Result<Vec<Supply>> {
        let mut supplies = Vec::new();

        for line in reader.get_open_purchase_orders()? {
            let quantity = line.ordered - line.received;
            if quantity > Decimal::ZERO {
                supplies.push(Supply::new(
                    line.part,
                    line.due_date,
                    quantity,
                    OrderType::Po,
                    line.order_no,
                ));
            }
        }

        let filter: LocationFilter = (&config.locations).into();
        let mut on_hand_by_part: HashMap<Part, Decimal> = HashMap::new();
        for move_ in reader.get_positive_stock_moves(&filter)? {
            *on_hand_by_part.entry(move_.part).or_default() += move_.quantity;
        }
        for (part, quantity) in on_hand_by_part {
            if quantity > Decimal::ZERO {
                supplies.push(Supply::on_hand(part, quantity, "QOH"));
            }
        }

        for wo in reader.get_open_work_orders()? {
            let quantity = wo.qty_reqd - wo.qty_received;
            if quantity > Decimal::ZERO {
                supplies.push(Supply::new(
                    wo.output_part,
                    wo.required_by,
                    quantity,
                    OrderType::Wo,
                    wo.wo_no,
                ));
            }
        }

        tracing::debug!(rows = supplies.len(), "supplies loaded");
        Ok(supplies)
    }
}

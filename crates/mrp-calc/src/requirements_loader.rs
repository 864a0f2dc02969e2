//! Populates the working requirements set from every direct-demand source.

use chrono::NaiveDate;
use mrp_adapters::{LocationFilter, StorageReader};
use mrp_core::{DemandType, EngineConfig, Requirement, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;

pub struct RequirementsLoader;

impl RequirementsLoader {
    /// `today` drives the reorder source's `dateRequired`; every other
    /// source carries its own date from the underlying record.
    pub fn load(
        reader: &dyn StorageReader,
        config: &EngineConfig,
        today: NaiveDate,
    ) -> Result<Vec<Requirement>> {
        let mut requirements = Vec::new();

        for line in reader.get_open_sales_orders()? {
            let quantity = line.ordered - line.invoiced;
            if quantity > Decimal::ZERO {
                requirements.push(Requirement::direct(
                    line.part,
                    line.due_date,
                    quantity,
                    DemandType::So,
                    line.order_no,
                ));
            }
        }

        for wo in reader.get_open_work_orders()? {
            let issued = reader.get_issued_stock_moves_for_wo(&wo.wo_no)?;
            let mut issued_by_part: HashMap<_, Decimal> = HashMap::new();
            for move_ in issued {
                *issued_by_part.entry(move_.part).or_default() += move_.quantity;
            }

            for component in &wo.components {
                let gross = component.qty_per_unit * wo.qty_reqd;
                let already_issued = issued_by_part
                    .get(&component.part)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let quantity = gross - already_issued;
                if quantity > Decimal::ZERO {
                    requirements.push(Requirement::direct(
                        component.part.clone(),
                        wo.required_by,
                        quantity,
                        DemandType::Wo,
                        wo.wo_no.clone(),
                    ));
                }
            }
        }

        if config.use_mrp_demands {
            for demand in reader.get_mrp_demands()? {
                if demand.quantity > Decimal::ZERO {
                    requirements.push(Requirement::direct(
                        demand.part,
                        demand.required_date,
                        demand.quantity,
                        DemandType::Mrpd,
                        demand.order_no,
                    ));
                }
            }
        }

        if config.use_reorder_level_demands {
            let filter: LocationFilter = (&config.locations).into();
            for row in reader.get_location_stock(&filter)? {
                let gap = row.reorder_level - row.on_hand;
                if gap > Decimal::ZERO {
                    requirements.push(Requirement::direct(
                        row.part,
                        today,
                        gap,
                        DemandType::Reord,
                        row.location,
                    ));
                }
            }
        }

        tracing::debug!(rows = requirements.len(), "requirements loaded");
        Ok(requirements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_core::Part;
    use mrp_adapters::{
        InMemoryStorage, LocationStock, MrpDemandRecord, SalesOrderLine, WorkOrder,
        WorkOrderComponent,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sales_order_nets_invoiced_quantity() {
        let storage = InMemoryStorage::new();
        storage.add_sales_order(SalesOrderLine {
            order_no: "SO-100".to_string(),
            part: Part::new("A"),
            ordered: Decimal::from(50),
            invoiced: Decimal::from(10),
            due_date: date(2024, 2, 1),
        });

        let reqs =
            RequirementsLoader::load(&storage, &EngineConfig::default(), date(2024, 1, 1)).unwrap();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].quantity, Decimal::from(40));
        assert!(reqs[0].direct_demand);
    }

    #[test]
    fn work_order_component_need_nets_issued_stock_moves() {
        let storage = InMemoryStorage::new();
        storage.add_work_order(WorkOrder {
            wo_no: "WO-1".to_string(),
            output_part: Part::new("A"),
            qty_reqd: Decimal::from(10),
            qty_received: Decimal::ZERO,
            required_by: date(2024, 3, 1),
            components: vec![WorkOrderComponent {
                part: Part::new("B"),
                qty_per_unit: Decimal::from(2),
            }],
        });
        storage.add_issued_stock_move(
            "WO-1",
            mrp_adapters::StockMove {
                part: Part::new("B"),
                quantity: Decimal::from(5),
            },
        );

        let reqs =
            RequirementsLoader::load(&storage, &EngineConfig::default(), date(2024, 1, 1)).unwrap();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].part, Part::new("B"));
        assert_eq!(reqs[0].quantity, Decimal::from(15));
    }

    #[test]
    fn mrp_demands_are_skipped_unless_enabled() {
        let storage = InMemoryStorage::new();
        storage.add_mrp_demand(MrpDemandRecord {
            order_no: "MRPD-1".to_string(),
            part: Part::new("A"),
            quantity: Decimal::from(20),
            required_date: date(2024, 4, 1),
        });

        let reqs =
            RequirementsLoader::load(&storage, &EngineConfig::default(), date(2024, 1, 1)).unwrap();
        assert!(reqs.is_empty());

        let config = EngineConfig::default().with_use_mrp_demands(true);
        let reqs = RequirementsLoader::load(&storage, &config, date(2024, 1, 1)).unwrap();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].demand_type, DemandType::Mrpd);
    }

    #[test]
    fn reorder_gap_uses_today_as_date_required() {
        let storage = InMemoryStorage::new();
        storage.add_location_stock(LocationStock {
            part: Part::new("A"),
            location: "WH1".to_string(),
            reorder_level: Decimal::from(100),
            on_hand: Decimal::from(30),
        });

        let config = EngineConfig::default().with_use_reorder_level_demands(true);
        let today = date(2024, 5, 1);
        let reqs = RequirementsLoader::load(&storage, &config, today).unwrap();

        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].quantity, Decimal::from(70));
        assert_eq!(reqs[0].date_required, today);
        assert_eq!(reqs[0].demand_type, DemandType::Reord);
    }
}

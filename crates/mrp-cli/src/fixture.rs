//! JSON fixture format the CLI loads into an [`InMemoryStorage`]: one file
//! carries the BOM, item master, and every demand/supply source the engine
//! reads through `StorageReader`.

use std::path::Path;

use anyhow::{Context, Result};
use bom_core::{BomEdge, Part};
use chrono::NaiveDate;
use mrp_adapters::{
    InMemoryStorage, ItemMasterRecord, LocationStock, MrpDemandRecord, PositiveStockMove,
    PreferredSupplierLeadTime, PurchaseOrderLine, SalesOrderLine, StockMove, WorkOrder,
    WorkOrderComponent,
};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub bom_edges: Vec<BomEdgeRow>,
    #[serde(default)]
    pub item_master: Vec<ItemMasterRow>,
    #[serde(default)]
    pub preferred_supplier_lead_times: Vec<PreferredSupplierRow>,
    #[serde(default)]
    pub sales_orders: Vec<SalesOrderRow>,
    #[serde(default)]
    pub work_orders: Vec<WorkOrderRow>,
    #[serde(default)]
    pub mrp_demands: Vec<MrpDemandRow>,
    #[serde(default)]
    pub location_stock: Vec<LocationStockRow>,
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrderRow>,
    #[serde(default)]
    pub positive_stock_moves: Vec<PositiveStockMoveRow>,
}

#[derive(Debug, Deserialize)]
pub struct BomEdgeRow {
    pub parent: String,
    pub child: String,
    pub quantity_per: Decimal,
    #[serde(default = "default_effective_from")]
    pub effective_from: NaiveDate,
    #[serde(default = "default_effective_to")]
    pub effective_to: NaiveDate,
}

fn default_effective_from() -> NaiveDate {
    NaiveDate::MIN
}

fn default_effective_to() -> NaiveDate {
    BomEdge::NO_EXPIRY
}

#[derive(Debug, Deserialize)]
pub struct ItemMasterRow {
    pub part: String,
    #[serde(default)]
    pub lead_time_days: Option<u32>,
    #[serde(default)]
    pub pan_size: Decimal,
    #[serde(default)]
    pub shrink_factor: Decimal,
    #[serde(default)]
    pub eoq: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct PreferredSupplierRow {
    pub part: String,
    pub lead_time_days: u32,
}

#[derive(Debug, Deserialize)]
pub struct SalesOrderRow {
    pub order_no: String,
    pub part: String,
    pub ordered: Decimal,
    #[serde(default)]
    pub invoiced: Decimal,
    pub due_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct WorkOrderRow {
    pub wo_no: String,
    pub output_part: String,
    pub qty_reqd: Decimal,
    #[serde(default)]
    pub qty_received: Decimal,
    pub required_by: NaiveDate,
    #[serde(default)]
    pub components: Vec<WorkOrderComponentRow>,
    #[serde(default)]
    pub issued_stock_moves: Vec<StockMoveRow>,
}

#[derive(Debug, Deserialize)]
pub struct WorkOrderComponentRow {
    pub part: String,
    pub qty_per_unit: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct StockMoveRow {
    pub part: String,
    pub quantity: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct MrpDemandRow {
    pub order_no: String,
    pub part: String,
    pub quantity: Decimal,
    pub required_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct LocationStockRow {
    pub part: String,
    pub location: String,
    pub reorder_level: Decimal,
    pub on_hand: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct PurchaseOrderRow {
    pub order_no: String,
    pub part: String,
    pub ordered: Decimal,
    #[serde(default)]
    pub received: Decimal,
    pub due_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct PositiveStockMoveRow {
    pub part: String,
    pub location: String,
    pub quantity: Decimal,
}

pub fn load(path: &Path) -> Result<Fixture> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing fixture {}", path.display()))
}

/// Populate a fresh [`InMemoryStorage`] from a parsed fixture.
pub fn into_storage(fixture: Fixture) -> InMemoryStorage {
    let storage = InMemoryStorage::new();

    for row in fixture.bom_edges {
        if let Ok(edge) = BomEdge::new(
            Part::new(row.parent),
            Part::new(row.child),
            row.quantity_per,
            row.effective_from,
            row.effective_to,
        ) {
            storage.add_bom_edge(edge);
        }
    }

    for row in fixture.item_master {
        let mut item = ItemMasterRecord::new(Part::new(row.part));
        item.lead_time_days = row.lead_time_days;
        item.pan_size = row.pan_size;
        item.shrink_factor = row.shrink_factor;
        item.eoq = row.eoq;
        storage.add_item_master(item);
    }

    for row in fixture.preferred_supplier_lead_times {
        storage.add_preferred_supplier_lead_time(PreferredSupplierLeadTime {
            part: Part::new(row.part),
            lead_time_days: row.lead_time_days,
        });
    }

    for row in fixture.sales_orders {
        storage.add_sales_order(SalesOrderLine {
            order_no: row.order_no,
            part: Part::new(row.part),
            ordered: row.ordered,
            invoiced: row.invoiced,
            due_date: row.due_date,
        });
    }

    for row in fixture.work_orders {
        let wo_no = row.wo_no.clone();
        for mv in &row.issued_stock_moves {
            storage.add_issued_stock_move(
                wo_no.clone(),
                StockMove {
                    part: Part::new(mv.part.clone()),
                    quantity: mv.quantity,
                },
            );
        }
        storage.add_work_order(WorkOrder {
            wo_no: row.wo_no,
            output_part: Part::new(row.output_part),
            qty_reqd: row.qty_reqd,
            qty_received: row.qty_received,
            required_by: row.required_by,
            components: row
                .components
                .into_iter()
                .map(|c| WorkOrderComponent {
                    part: Part::new(c.part),
                    qty_per_unit: c.qty_per_unit,
                })
                .collect(),
        });
    }

    for row in fixture.mrp_demands {
        storage.add_mrp_demand(MrpDemandRecord {
            order_no: row.order_no,
            part: Part::new(row.part),
            quantity: row.quantity,
            required_date: row.required_date,
        });
    }

    for row in fixture.location_stock {
        storage.add_location_stock(LocationStock {
            part: Part::new(row.part),
            location: row.location,
            reorder_level: row.reorder_level,
            on_hand: row.on_hand,
        });
    }

    for row in fixture.purchase_orders {
        storage.add_purchase_order(PurchaseOrderLine {
            order_no: row.order_no,
            part: Part::new(row.part),
            ordered: row.ordered,
            received: row.received,
            due_date: row.due_date,
        });
    }

    for row in fixture.positive_stock_moves {
        storage.add_positive_stock_move(PositiveStockMove {
            part: Part::new(row.part),
            location: row.location,
            quantity: row.quantity,
        });
    }

    storage
}

use crate::reader::StorageReader;
use crate::records::{
    ItemMasterRecord, LocationFilter, LocationStock, MrpDemandRecord, PositiveStockMove,
    PreferredSupplierLeadTime, PurchaseOrderLine, SalesOrderLine, StockMove, WorkOrder,
};
use crate::writer::StorageWriter;
use bom_core::BomEdge;
use mrp_core::{LevelRecord, MrpError, ParametersAudit, PlannedOrder, Requirement, Result, Supply};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

fn lock_err(what: &str) -> MrpError {
    MrpError::StorageError(format!("poisoned lock on {what}"))
}

/// An in-memory `StorageReader + StorageWriter`, used by tests, the CLI,
/// and the doc examples. Every source table is its own `RwLock`.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    bom_edges: Arc<RwLock<Vec<BomEdge>>>,
    item_master: Arc<RwLock<Vec<ItemMasterRecord>>>,
    preferred_supplier_lead_times: Arc<RwLock<Vec<PreferredSupplierLeadTime>>>,
    sales_orders: Arc<RwLock<Vec<SalesOrderLine>>>,
    work_orders: Arc<RwLock<Vec<WorkOrder>>>,
    issued_stock_moves: Arc<RwLock<HashMap<String, Vec<StockMove>>>>,
    mrp_demands: Arc<RwLock<Vec<MrpDemandRecord>>>,
    location_stock: Arc<RwLock<Vec<LocationStock>>>,
    purchase_orders: Arc<RwLock<Vec<PurchaseOrderLine>>>,
    positive_stock_moves: Arc<RwLock<Vec<PositiveStockMove>>>,

    requirements: Arc<RwLock<Vec<Requirement>>>,
    supplies: Arc<RwLock<Vec<Supply>>>,
    planned_orders: Arc<RwLock<Vec<PlannedOrder>>>,
    levels: Arc<RwLock<Vec<LevelRecord>>>,
    parameters_audit: Arc<RwLock<Vec<ParametersAudit>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bom_edge(&self, edge: BomEdge) {
        self.bom_edges.write().expect("lock").push(edge);
    }

    pub fn add_item_master(&self, item: ItemMasterRecord) {
        self.item_master.write().expect("lock").push(item);
    }

    pub fn add_preferred_supplier_lead_time(&self, row: PreferredSupplierLeadTime) {
        self.preferred_supplier_lead_times.write().expect("lock").push(row);
    }

    pub fn add_sales_order(&self, row: SalesOrderLine) {
        self.sales_orders.write().expect("lock").push(row);
    }

    pub fn add_work_order(&self, row: WorkOrder) {
        self.work_orders.write().expect("lock").push(row);
    }

    pub fn add_issued_stock_move(&self, wo_no: impl Into<String>, row: StockMove) {
        self.issued_stock_moves
            .write()
            .expect("lock")
            .entry(wo_no.into())
            .or_default()
            .push(row);
    }

    pub fn add_mrp_demand(&self, row: MrpDemandRecord) {
        self.mrp_demands.write().expect("lock").push(row);
    }

    pub fn add_location_stock(&self, row: LocationStock) {
        self.location_stock.write().expect("lock").push(row);
    }

    pub fn add_purchase_order(&self, row: PurchaseOrderLine) {
        self.purchase_orders.write().expect("lock").push(row);
    }

    pub fn add_positive_stock_move(&self, row: PositiveStockMove) {
        self.positive_stock_moves.write().expect("lock").push(row);
    }
}

impl StorageReader for InMemoryStorage {
    fn get_bom_edges(&self) -> Result<Vec<BomEdge>> {
        Ok(self.bom_edges.read().map_err(|_| lock_err("bom_edges"))?.clone())
    }

    fn get_item_master(&self) -> Result<Vec<ItemMasterRecord>> {
        Ok(self.item_master.read().map_err(|_| lock_err("item_master"))?.clone())
    }

    fn get_preferred_supplier_lead_times(&self) -> Result<Vec<PreferredSupplierLeadTime>> {
        Ok(self
            .preferred_supplier_lead_times
            .read()
            .map_err(|_| lock_err("preferred_supplier_lead_times"))?
            .clone())
    }

    fn get_open_sales_orders(&self) -> Result<Vec<SalesOrderLine>> {
        Ok(self.sales_orders.read().map_err(|_| lock_err("sales_orders"))?.clone())
    }

    fn get_open_work_orders(&self) -> Result<Vec<WorkOrder>> {
        Ok(self.work_orders.read().map_err(|_| lock_err("work_orders"))?.clone())
    }

    fn get_issued_stock_moves_for_wo(&self, wo_no: &str) -> Result<Vec<StockMove>> {
        Ok(self
            .issued_stock_moves
            .read()
            .map_err(|_| lock_err("issued_stock_moves"))?
            .get(wo_no)
            .cloned()
            .unwrap_or_default())
    }

    fn get_mrp_demands(&self) -> Result<Vec<MrpDemandRecord>> {
        Ok(self.mrp_demands.read().map_err(|_| lock_err("mrp_demands"))?.clone())
    }

    fn get_location_stock(&self, filter: &LocationFilter) -> Result<Vec<LocationStock>> {
        Ok(self
            .location_stock
            .read()
            .map_err(|_| lock_err("location_stock"))?
            .iter()
            .filter(|row| filter.matches(&row.location))
            .cloned()
            .collect())
    }

    fn get_open_purchase_orders(&self) -> Result<Vec<PurchaseOrderLine>> {
        Ok(self.purchase_orders.read().map_err(|_| lock_err("purchase_orders"))?.clone())
    }

    fn get_positive_stock_moves(&self, filter: &LocationFilter) -> Result<Vec<PositiveStockMove>> {
        Ok(self
            .positive_stock_moves
            .read()
            .map_err(|_| lock_err("positive_stock_moves"))?
            .iter()
            .filter(|row| filter.matches(&row.location))
            .cloned()
            .collect())
    }
}

impl StorageWriter for InMemoryStorage {
    fn clear_requirements(&self) -> Result<()> {
        self.requirements.write().map_err(|_| lock_err("requirements"))?.clear();
        Ok(())
    }

    fn write_requirements(&self, rows: &[Requirement]) -> Result<()> {
        self.requirements
            .write()
            .map_err(|_| lock_err("requirements"))?
            .extend_from_slice(rows);
        Ok(())
    }

    fn read_requirements(&self) -> Result<Vec<Requirement>> {
        Ok(self.requirements.read().map_err(|_| lock_err("requirements"))?.clone())
    }

    fn clear_supplies(&self) -> Result<()> {
        self.supplies.write().map_err(|_| lock_err("supplies"))?.clear();
        Ok(())
    }

    fn write_supplies(&self, rows: &[Supply]) -> Result<()> {
        self.supplies.write().map_err(|_| lock_err("supplies"))?.extend_from_slice(rows);
        Ok(())
    }

    fn read_supplies(&self) -> Result<Vec<Supply>> {
        Ok(self.supplies.read().map_err(|_| lock_err("supplies"))?.clone())
    }

    fn clear_planned_orders(&self) -> Result<()> {
        self.planned_orders.write().map_err(|_| lock_err("planned_orders"))?.clear();
        Ok(())
    }

    fn write_planned_orders(&self, rows: &[PlannedOrder]) -> Result<()> {
        self.planned_orders
            .write()
            .map_err(|_| lock_err("planned_orders"))?
            .extend_from_slice(rows);
        Ok(())
    }

    fn read_planned_orders(&self) -> Result<Vec<PlannedOrder>> {
        Ok(self.planned_orders.read().map_err(|_| lock_err("planned_orders"))?.clone())
    }

    fn clear_levels(&self) -> Result<()> {
        self.levels.write().map_err(|_| lock_err("levels"))?.clear();
        Ok(())
    }

    fn write_levels(&self, rows: &[LevelRecord]) -> Result<()> {
        self.levels.write().map_err(|_| lock_err("levels"))?.extend_from_slice(rows);
        Ok(())
    }

    fn read_levels(&self) -> Result<Vec<LevelRecord>> {
        Ok(self.levels.read().map_err(|_| lock_err("levels"))?.clone())
    }

    fn write_parameters_audit(&self, audit: &ParametersAudit) -> Result<()> {
        self.parameters_audit
            .write()
            .map_err(|_| lock_err("parameters_audit"))?
            .push(audit.clone());
        Ok(())
    }

    fn read_parameters_audit(&self) -> Result<Vec<ParametersAudit>> {
        Ok(self
            .parameters_audit
            .read()
            .map_err(|_| lock_err("parameters_audit"))?
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn round_trips_sales_orders() {
        let storage = InMemoryStorage::new();
        storage.add_sales_order(SalesOrderLine {
            order_no: "SO-1".to_string(),
            part: bom_core::Part::new("A"),
            ordered: Decimal::from(10),
            invoiced: Decimal::ZERO,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        });

        let rows = storage.get_open_sales_orders().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_no, "SO-1");
    }

    #[test]
    fn location_filter_narrows_on_hand_rows() {
        let storage = InMemoryStorage::new();
        storage.add_positive_stock_move(PositiveStockMove {
            part: bom_core::Part::new("A"),
            location: "WH1".to_string(),
            quantity: Decimal::from(5),
        });
        storage.add_positive_stock_move(PositiveStockMove {
            part: bom_core::Part::new("A"),
            location: "WH2".to_string(),
            quantity: Decimal::from(7),
        });

        let filter = LocationFilter(["WH1".to_string()].into());
        let rows = storage.get_positive_stock_moves(&filter).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location, "WH1");
    }

    #[test]
    fn write_read_round_trips_requirements() {
        let storage = InMemoryStorage::new();
        let req = Requirement::direct(
            bom_core::Part::new("A"),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            Decimal::from(50),
            mrp_core::DemandType::So,
            "SO-100",
        );
        storage.write_requirements(std::slice::from_ref(&req)).unwrap();
        assert_eq!(storage.read_requirements().unwrap().len(), 1);

        storage.clear_requirements().unwrap();
        assert!(storage.read_requirements().unwrap().is_empty());
    }
}

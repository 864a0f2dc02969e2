use crate::records::{
    ItemMasterRecord, LocationFilter, LocationStock, MrpDemandRecord, PositiveStockMove,
    PreferredSupplierLeadTime, PurchaseOrderLine, SalesOrderLine, StockMove, WorkOrder,
};
use bom_core::BomEdge;
use mrp_core::Result;

/// Read side of the storage adapter. Every method returns a finite,
/// restartable sequence of records — callers may re-read at will within a
/// run; nothing here is a cursor.
pub trait StorageReader: Send + Sync {
    fn get_bom_edges(&self) -> Result<Vec<BomEdge>>;
    fn get_item_master(&self) -> Result<Vec<ItemMasterRecord>>;
    fn get_preferred_supplier_lead_times(&self) -> Result<Vec<PreferredSupplierLeadTime>>;
    fn get_open_sales_orders(&self) -> Result<Vec<SalesOrderLine>>;
    fn get_open_work_orders(&self) -> Result<Vec<WorkOrder>>;
    fn get_issued_stock_moves_for_wo(&self, wo_no: &str) -> Result<Vec<StockMove>>;
    fn get_mrp_demands(&self) -> Result<Vec<MrpDemandRecord>>;
    fn get_location_stock(&self, filter: &LocationFilter) -> Result<Vec<LocationStock>>;
    fn get_open_purchase_orders(&self) -> Result<Vec<PurchaseOrderLine>>;
    fn get_positive_stock_moves(&self, filter: &LocationFilter) -> Result<Vec<PositiveStockMove>>;
}

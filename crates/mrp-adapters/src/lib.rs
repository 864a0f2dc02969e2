pub mod memory;
pub mod reader;
pub mod records;
pub mod writer;

pub use memory::InMemoryStorage;
pub use reader::StorageReader;
pub use records::{
    ItemMasterRecord, LocationFilter, LocationStock, MrpDemandRecord, PositiveStockMove,
    PreferredSupplierLeadTime, PurchaseOrderLine, SalesOrderLine, StockMove, WorkOrder,
    WorkOrderComponent,
};
pub use writer::StorageWriter;

use mrp_core::{LevelRecord, ParametersAudit, PlannedOrder, Requirement, Result, Supply};

/// Write side of the storage adapter: create/clear/read/write the
/// Requirements, Supplies, PlannedOrders, and Levels working sets, plus the
/// per-run Parameters audit row. A `Run` owns these exclusively for its
/// duration and releases them on every exit path.
pub trait StorageWriter: Send + Sync {
    fn clear_requirements(&self) -> Result<()>;
    fn write_requirements(&self, rows: &[Requirement]) -> Result<()>;
    fn read_requirements(&self) -> Result<Vec<Requirement>>;

    fn clear_supplies(&self) -> Result<()>;
    fn write_supplies(&self, rows: &[Supply]) -> Result<()>;
    fn read_supplies(&self) -> Result<Vec<Supply>>;

    fn clear_planned_orders(&self) -> Result<()>;
    fn write_planned_orders(&self, rows: &[PlannedOrder]) -> Result<()>;
    fn read_planned_orders(&self) -> Result<Vec<PlannedOrder>>;

    fn clear_levels(&self) -> Result<()>;
    fn write_levels(&self, rows: &[LevelRecord]) -> Result<()>;
    fn read_levels(&self) -> Result<Vec<LevelRecord>>;

    fn write_parameters_audit(&self, audit: &ParametersAudit) -> Result<()>;
    fn read_parameters_audit(&self) -> Result<Vec<ParametersAudit>>;
}

use crate::error::{MrpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The recognized engine options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub use_mrp_demands: bool,
    pub use_reorder_level_demands: bool,
    pub use_eoq: bool,
    pub use_pan_size: bool,
    pub use_shrinkage: bool,
    /// Days of slack before a late supply triggers an advisory reschedule.
    pub leeway_days: i64,
    /// Applies to reorder and on-hand loaders only. Empty or containing
    /// `"All"` disables filtering — every location is aggregated into one
    /// figure per part.
    pub locations: HashSet<String>,
}

impl EngineConfig {
    pub fn new(leeway_days: i64) -> Result<Self> {
        let config = Self {
            use_mrp_demands: false,
            use_reorder_level_demands: false,
            use_eoq: false,
            use_pan_size: false,
            use_shrinkage: false,
            leeway_days,
            locations: HashSet::new(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.leeway_days < 0 {
            return Err(MrpError::ConfigError {
                field: "leewayDays".to_string(),
                reason: format!("must be >= 0, got {}", self.leeway_days),
            });
        }
        Ok(())
    }

    pub fn with_use_mrp_demands(mut self, value: bool) -> Self {
        self.use_mrp_demands = value;
        self
    }

    pub fn with_use_reorder_level_demands(mut self, value: bool) -> Self {
        self.use_reorder_level_demands = value;
        self
    }

    pub fn with_use_eoq(mut self, value: bool) -> Self {
        self.use_eoq = value;
        self
    }

    pub fn with_use_pan_size(mut self, value: bool) -> Self {
        self.use_pan_size = value;
        self
    }

    pub fn with_use_shrinkage(mut self, value: bool) -> Self {
        self.use_shrinkage = value;
        self
    }

    pub fn with_locations(mut self, locations: HashSet<String>) -> Self {
        self.locations = locations;
        self
    }

    /// `true` if the reorder/on-hand loaders should filter by
    /// `self.locations`; `false` if they should aggregate across all
    /// locations (empty set, or the literal `"All"` entry).
    pub fn filters_by_location(&self) -> bool {
        !(self.locations.is_empty() || self.locations.contains("All"))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(0).expect("leeway_days=0 is always valid")
    }
}

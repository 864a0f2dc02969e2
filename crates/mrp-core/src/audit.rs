use crate::config::EngineConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row persisted per run: the configuration flags as y/n, the location
/// filter joined, and the run timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametersAudit {
    pub use_mrp_demands: char,
    pub use_reorder_level_demands: char,
    pub use_eoq: char,
    pub use_pan_size: char,
    pub use_shrinkage: char,
    pub leeway_days: i64,
    pub location_filter: String,
    pub run_timestamp: DateTime<Utc>,
}

fn yn(flag: bool) -> char {
    if flag {
        'y'
    } else {
        'n'
    }
}

impl ParametersAudit {
    pub fn from_config(config: &EngineConfig, run_timestamp: DateTime<Utc>) -> Self {
        let mut locations: Vec<&str> = config.locations.iter().map(String::as_str).collect();
        locations.sort();

        Self {
            use_mrp_demands: yn(config.use_mrp_demands),
            use_reorder_level_demands: yn(config.use_reorder_level_demands),
            use_eoq: yn(config.use_eoq),
            use_pan_size: yn(config.use_pan_size),
            use_shrinkage: yn(config.use_shrinkage),
            leeway_days: config.leeway_days,
            location_filter: locations.join(","),
            run_timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_flags_as_y_n() {
        let config = EngineConfig::default().with_use_eoq(true);
        let audit = ParametersAudit::from_config(&config, Utc::now());
        assert_eq!(audit.use_eoq, 'y');
        assert_eq!(audit.use_mrp_demands, 'n');
    }

    #[test]
    fn joins_sorted_locations() {
        let config = EngineConfig::default().with_locations(["WH2".to_string(), "WH1".to_string()].into());
        let audit = ParametersAudit::from_config(&config, Utc::now());
        assert_eq!(audit.location_filter, "WH1,WH2");
    }
}

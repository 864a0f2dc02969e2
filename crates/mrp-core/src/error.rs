use thiserror::Error;

/// Errors surfaced by the planning engine. The engine is fail-fast: any of
/// these aborts the in-progress run, fires `EventSink::failed`, and releases
/// the run's working sets before propagating to the caller.
#[derive(Debug, Error)]
pub enum MrpError {
    #[error("cyclic BOM detected: {0}")]
    CyclicBom(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("a run is already in progress")]
    AlreadyRunning,

    #[error("run cancelled")]
    Cancelled,

    #[error("invalid configuration: {field} — {reason}")]
    ConfigError { field: String, reason: String },

    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl From<bom_core::BomError> for MrpError {
    fn from(err: bom_core::BomError) -> Self {
        match err {
            bom_core::BomError::CyclicBom(witness) => MrpError::CyclicBom(witness),
            other => MrpError::StorageError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, MrpError>;

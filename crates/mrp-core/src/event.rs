use crate::config::EngineConfig;
use crate::error::MrpError;
use crate::summary::RunSummary;

/// Fire-and-forget run lifecycle notifications. No ordering guarantee
/// across subscribers; the engine never waits on a handler.
pub trait EventSink: Send + Sync {
    fn started(&self, config: &EngineConfig);
    fn succeeded(&self, summary: &RunSummary);
    fn failed(&self, error: &MrpError, config: &EngineConfig);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn started(&self, _config: &EngineConfig) {}
    fn succeeded(&self, _summary: &RunSummary) {}
    fn failed(&self, _error: &MrpError, _config: &EngineConfig) {}
}

/// Logs every event through `tracing`, at the same density the pipeline
/// stages themselves log at.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn started(&self, config: &EngineConfig) {
        tracing::info!(
            leeway_days = config.leeway_days,
            use_eoq = config.use_eoq,
            use_pan_size = config.use_pan_size,
            "mrp run started"
        );
    }

    fn succeeded(&self, summary: &RunSummary) {
        tracing::info!(
            planned_order_count = summary.planned_order_count,
            total_planned_quantity = %summary.total_planned_quantity,
            run_time_ms = summary.run_time.as_millis(),
            "mrp run succeeded"
        );
    }

    fn failed(&self, error: &MrpError, _config: &EngineConfig) {
        tracing::error!(error = %error, "mrp run failed");
    }
}

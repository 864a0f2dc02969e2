use crate::error::{MrpError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Cooperative cancellation, checked between parts and between levels —
/// never inside a tight loop, since the netter does not yield mid-part.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A single invocation of the pipeline. Owns its working sets exclusively
/// for its duration; destroyed at end-of-run unless the caller retains the
/// audit snapshot.
#[derive(Debug, Clone)]
pub struct Run {
    pub id: Uuid,
    pub started_at: Instant,
    pub cancellation: CancellationToken,
    pub deadline: Option<Instant>,
}

impl Run {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Instant::now(),
            cancellation: CancellationToken::new(),
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Checked between parts and between levels; returns `Cancelled` or
    /// `InternalInvariantViolation` is never raised from here — a blown
    /// deadline surfaces as cancellation, since the engine has no separate
    /// `Timeout` error kind.
    pub fn check(&self) -> Result<()> {
        if self.cancellation.is_cancelled() {
            return Err(MrpError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(MrpError::Cancelled);
            }
        }
        Ok(())
    }
}

impl Default for Run {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fresh_run_checks_clean() {
        assert!(Run::new().check().is_ok());
    }

    #[test]
    fn cancelled_token_fails_check() {
        let run = Run::new();
        run.cancellation.cancel();
        assert!(matches!(run.check(), Err(MrpError::Cancelled)));
    }

    #[test]
    fn past_deadline_fails_check() {
        let run = Run::new().with_deadline(Instant::now() - Duration::from_secs(1));
        assert!(matches!(run.check(), Err(MrpError::Cancelled)));
    }
}

//! Progress reporting for the analysis batch.

use std::sync::Arc;
use std::time::Duration;

/// Callback invoked once per completed task, in completion order.
pub type ProgressSink = Arc<dyn Fn(ProgressReport) + Send + Sync>;

/// A snapshot of batch progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressReport {
    /// Tasks completed so far.
    pub processed: usize,
    /// Total tasks in the batch.
    pub total: usize,
    /// Time since the batch started.
    pub elapsed: Duration,
    /// Estimated time remaining; `None` until at least one task finished.
    pub remaining: Option<Duration>,
}

impl ProgressReport {
    /// Build a report, estimating the remaining time as
    /// `elapsed / processed * (total - processed)`.
    pub fn compute(processed: usize, total: usize, elapsed: Duration) -> Self {
        let remaining = if processed == 0 {
            None
        } else {
            let per_task = elapsed.as_secs_f64() / processed as f64;
            let left = total.saturating_sub(processed) as f64;
            Some(Duration::from_secs_f64(per_task * left))
        };
        Self {
            processed,
            total,
            elapsed,
            remaining,
        }
    }

    /// Whether every task in the batch has completed.
    pub fn is_done(&self) -> bool {
        self.processed >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eta_halfway() {
        let report = ProgressReport::compute(5, 10, Duration::from_secs(10));
        assert_eq!(report.remaining, Some(Duration::from_secs(10)));
        assert!(!report.is_done());
    }

    #[test]
    fn test_no_division_by_zero() {
        let report = ProgressReport::compute(0, 0, Duration::ZERO);
        assert_eq!(report.remaining, None);

        let report = ProgressReport::compute(0, 10, Duration::from_secs(1));
        assert_eq!(report.remaining, None);
    }

    #[test]
    fn test_done_batch_has_zero_remaining() {
        let report = ProgressReport::compute(10, 10, Duration::from_secs(30));
        assert_eq!(report.remaining, Some(Duration::ZERO));
        assert!(report.is_done());
    }
}

//! Run summarizer
//!
//! Condenses a finished run into the aggregate the caller displays:
//! step counts by outcome and the approximate elapsed time.

use serde::{Deserialize, Serialize};

use crate::core::RunReport;

/// Aggregate view of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_steps: usize,
    pub success_count: usize,
    pub failed_count: usize,
    /// Approximate wall-clock duration in seconds
    pub execution_time_secs: f64,
}

impl RunSummary {
    pub fn from_report(report: &RunReport) -> Self {
        Self {
            total_steps: report.entries.len(),
            success_count: report.success_count(),
            failed_count: report.failed_count(),
            execution_time_secs: report.elapsed().num_milliseconds() as f64 / 1000.0,
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} steps: {} succeeded, {} failed in {:.1}s",
            self.total_steps, self.success_count, self.failed_count, self.execution_time_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, LogEntry, Outcome};
    use chrono::{Duration, Utc};

    #[test]
    fn aggregates_counts_and_elapsed_time() {
        let action = Action::click("#a");
        let started_at = Utc::now();
        let report = RunReport {
            entries: vec![
                LogEntry::record(1, &action, Outcome::Success),
                LogEntry::record(2, &action, Outcome::Failed),
                LogEntry::record(3, &action, Outcome::Success),
            ],
            started_at,
            finished_at: started_at + Duration::milliseconds(4500),
        };

        let summary = RunSummary::from_report(&report);
        assert_eq!(summary.total_steps, 3);
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failed_count, 1);
        assert!((summary.execution_time_secs - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn displays_a_one_line_aggregate() {
        let summary = RunSummary {
            total_steps: 4,
            success_count: 4,
            failed_count: 0,
            execution_time_secs: 6.0,
        };
        assert_eq!(summary.to_string(), "4 steps: 4 succeeded, 0 failed in 6.0s");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::Verdict;

/// Every verdict of one run, in case order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub suite: String,
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub verdicts: Vec<Verdict>,
}

impl RunReport {
    pub fn new(
        suite: impl Into<String>,
        base_url: impl Into<String>,
        started_at: DateTime<Utc>,
        verdicts: Vec<Verdict>,
    ) -> Self {
        let passed = verdicts.iter().filter(|v| v.passed()).count();
        let errored = verdicts.iter().filter(|v| v.is_network_error()).count();
        let failed = verdicts.len() - passed - errored;

        Self {
            run_id: Uuid::new_v4(),
            suite: suite.into(),
            base_url: base_url.into(),
            started_at,
            finished_at: Utc::now(),
            passed,
            failed,
            errored,
            verdicts,
        }
    }

    pub fn total(&self) -> usize {
        self.verdicts.len()
    }

    pub fn success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }

    /// Verdicts that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|v| !v.passed())
    }

    pub fn verdict(&self, case: &str) -> Option<&Verdict> {
        self.verdicts.iter().find(|v| v.case == case)
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} passed, {} failed, {} network errors ({} total)",
            self.suite,
            self.passed,
            self.failed,
            self.errored,
            self.total()
        )
    }
}

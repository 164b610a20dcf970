use crate::scenario::ScenarioResult;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The aggregate over one batch of scenarios.
///
/// Results are keyed and iterated by scenario id in ascending order, which is the order every
/// renderer uses. Two reports built from the same results are equal regardless of the order the
/// scenarios completed in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchReport {
    pub results: BTreeMap<String, ScenarioResult>,
    pub total: usize,
    pub passed: usize,
    /// Ids of every scenario that did not pass, ascending.
    pub failed_ids: Vec<String>,
}

/// Aggregate the results of a batch into a report.
pub fn build_report(results: BTreeMap<String, ScenarioResult>) -> BatchReport {
    let failed_ids = results
        .iter()
        .filter(|(_, result)| !result.passed())
        .map(|(id, _)| id.clone())
        .collect::<Vec<_>>();

    BatchReport {
        total: results.len(),
        passed: results.len() - failed_ids.len(),
        failed_ids,
        results,
    }
}

impl BatchReport {
    /// Scenario results in rendering order.
    pub fn scenarios(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.values()
    }

    pub fn failed(&self) -> usize {
        self.failed_ids.len()
    }

    pub fn all_passed(&self) -> bool {
        self.failed_ids.is_empty()
    }

    /// Every SLA tier reported by any scenario in the batch, ascending.
    pub fn tier_ids(&self) -> Vec<u32> {
        self.scenarios()
            .flat_map(|result| result.sla_records.iter().map(|record| record.tier_id))
            .sorted()
            .dedup()
            .collect()
    }
}

/// A compact, single line, record of a batch run.
///
/// These are appended to a history file so that runs can be compared over time without keeping
/// every full report around.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchSummary {
    /// The name given to the run, if any.
    pub run_name: Option<String>,
    /// The time the run started
    ///
    /// This is a Unix timestamp in seconds.
    pub started_at: i64,
    /// How the scenarios were scheduled, `sequential` or `concurrent`.
    pub mode: String,
    pub total: usize,
    pub passed: usize,
    pub failed_ids: Vec<String>,
}

impl BatchSummary {
    pub fn from_report(
        report: &BatchReport,
        run_name: Option<String>,
        started_at: i64,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            run_name,
            started_at,
            mode: mode.into(),
            total: report.total,
            passed: report.passed,
            failed_ids: report.failed_ids.clone(),
        }
    }
}

use crate::sla::SlaRecord;
use serde::{Deserialize, Serialize};

/// The outcome of running one scenario against the simulator.
///
/// A result with [ScenarioResult::failure] set never carries SLA records. Use
/// [ScenarioResult::completed] or [ScenarioResult::failed] to build one so that the ordering and
/// failure rules hold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioResult {
    /// Identifier of the scenario, unique within a batch.
    pub scenario_id: String,
    /// Compliance per SLA tier, ascending by tier id.
    pub sla_records: Vec<SlaRecord>,
    /// Total energy reported by the simulator, in KW-Hour.
    pub energy_kwh: Option<f64>,
    /// Simulated run time reported by the simulator, in seconds.
    pub runtime_s: Option<f64>,
    /// Why the scenario could not be run or interpreted, if it could not.
    pub failure: Option<String>,
}

impl ScenarioResult {
    /// A scenario whose simulator process ran to completion.
    ///
    /// The SLA records are sorted by tier id, whatever order the simulator printed them in.
    pub fn completed(
        scenario_id: impl Into<String>,
        mut sla_records: Vec<SlaRecord>,
        energy_kwh: Option<f64>,
        runtime_s: Option<f64>,
    ) -> Self {
        sla_records.sort_by_key(|record| record.tier_id);

        Self {
            scenario_id: scenario_id.into(),
            sla_records,
            energy_kwh,
            runtime_s,
            failure: None,
        }
    }

    /// A scenario that could not be run, or whose worker failed.
    pub fn failed(scenario_id: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            sla_records: Vec::with_capacity(0),
            energy_kwh: None,
            runtime_s: None,
            failure: Some(failure.into()),
        }
    }

    /// A scenario passes when it reported at least one SLA tier and every tier passed.
    ///
    /// No compliance data at all is treated as a failure.
    pub fn passed(&self) -> bool {
        !self.sla_records.is_empty() && self.sla_records.iter().all(SlaRecord::passed)
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sla::record;

    #[test]
    fn records_are_sorted_by_tier() {
        let result = ScenarioResult::completed(
            "a.md",
            vec![record(2, 99.0, 90.0), record(0, 99.0, 90.0), record(1, 99.0, 90.0)],
            None,
            None,
        );

        let tiers = result
            .sla_records
            .iter()
            .map(|r| r.tier_id)
            .collect::<Vec<_>>();
        assert_eq!(vec![0, 1, 2], tiers);
    }

    #[test]
    fn no_compliance_data_does_not_pass() {
        let result = ScenarioResult::completed("a.md", vec![], Some(12.5), Some(3.2));
        assert!(!result.passed());
        assert!(!result.is_failure());
    }

    #[test]
    fn single_failing_tier_fails_scenario() {
        let result = ScenarioResult::completed(
            "a.md",
            vec![record(0, 99.0, 90.0), record(1, 80.0, 90.0)],
            None,
            None,
        );
        assert!(!result.passed());
    }

    #[test]
    fn failed_scenario_has_no_records() {
        let result = ScenarioResult::failed("a.md", "could not launch");
        assert!(result.sla_records.is_empty());
        assert!(!result.passed());
        assert_eq!(Some("could not launch"), result.failure.as_deref());
    }
}

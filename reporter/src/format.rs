use cloudsim_harness_summary_model::{ScenarioResult, SlaRecord};

pub(crate) const PASS: &str = "PASS";
pub(crate) const FAIL: &str = "FAIL";

pub(crate) fn status(passed: bool) -> &'static str {
    if passed {
        PASS
    } else {
        FAIL
    }
}

pub(crate) fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Required compliance is shown as configured, `95%` or `99.5%`.
pub(crate) fn required(value: f64) -> String {
    format!("{value}%")
}

pub(crate) fn violations(record: &SlaRecord) -> String {
    format!("{}/{}", record.violation_count, record.sample_count)
}

pub(crate) fn optional(value: Option<f64>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |value| value.to_string())
}

pub(crate) fn record_for_tier(result: &ScenarioResult, tier_id: u32) -> Option<&SlaRecord> {
    result
        .sla_records
        .iter()
        .find(|record| record.tier_id == tier_id)
}

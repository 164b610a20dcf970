use crate::format::{optional, percent, record_for_tier, required, status};
use cloudsim_harness_summary_model::{BatchReport, ScenarioResult};
use tabled::builder::Builder;
use tabled::settings::Style;

const TITLE: &str = "CloudSim Test Results";
const PLACEHOLDER: &str = "-";

/// Render the batch as a fixed width text document.
///
/// There is one row per scenario and one column per SLA tier seen anywhere in the batch. A tier a
/// scenario did not report is left blank.
pub fn render_text(report: &BatchReport) -> String {
    let tiers = report.tier_ids();

    let mut builder = Builder::default();
    let mut header = vec!["Testcase".to_string(), "Status".to_string()];
    header.extend(tiers.iter().map(|tier_id| format!("SLA{tier_id}")));
    header.push("Energy (KW-Hour)".to_string());
    header.push("Runtime (s)".to_string());
    builder.push_record(header);

    for result in report.scenarios() {
        let mut row = vec![
            result.scenario_id.clone(),
            status(result.passed()).to_string(),
        ];
        row.extend(tiers.iter().map(|tier_id| sla_cell(result, *tier_id)));
        row.push(optional(result.energy_kwh, PLACEHOLDER));
        row.push(optional(result.runtime_s, PLACEHOLDER));
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::modern());

    let mut lines = vec![
        TITLE.to_string(),
        "=".repeat(TITLE.len()),
        String::new(),
        table.to_string(),
        String::new(),
        "Summary".to_string(),
        format!("Total testcases: {}", report.total),
        format!("Passed testcases: {}", report.passed),
        format!("Failed testcases: {}", report.failed()),
    ];
    if !report.all_passed() {
        lines.push(format!("Failed tests: {}", report.failed_ids.join(", ")));
    }

    let errors = report
        .scenarios()
        .filter_map(|result| {
            result
                .failure
                .as_ref()
                .map(|failure| format!("  {}: {failure}", result.scenario_id))
        })
        .collect::<Vec<_>>();
    if !errors.is_empty() {
        lines.push(String::new());
        lines.push("Errors".to_string());
        lines.extend(errors);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn sla_cell(result: &ScenarioResult, tier_id: u32) -> String {
    match record_for_tier(result, tier_id) {
        Some(record) => format!(
            "{} / {} {}",
            percent(record.compliance_pct),
            required(record.required_pct),
            status(record.passed())
        ),
        None => String::new(),
    }
}

use crate::document::{document, Element};
use crate::format::{percent, required, violations};
use cloudsim_harness_summary_model::{BatchReport, ColorTier, ScenarioResult, SlaRecord};

const TITLE: &str = "CloudSim Test Results";
const PLACEHOLDER: &str = "N/A";

const STYLE: &str = r#"body {
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
  margin: 40px auto;
  max-width: 1200px;
  padding: 0 20px;
  line-height: 1.6;
}
.test-case {
  margin-bottom: 30px;
  border: 1px solid #e1e4e8;
  border-radius: 6px;
  padding: 20px;
  background: #fff;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}
.test-header {
  border-bottom: 1px solid #e1e4e8;
  margin-bottom: 15px;
  padding-bottom: 10px;
}
.pass { color: #28a745; }
.fail { color: #dc3545; }
.tier-high { background: #dcffe4; color: #22863a; }
.tier-medium { background: #fff5b1; color: #735c0f; }
.tier-low { background: #ffdce0; color: #cb2431; }
.sla-table {
  width: 100%;
  border-collapse: collapse;
  margin: 10px 0;
}
.sla-table th, .sla-table td {
  padding: 8px;
  text-align: left;
  border: 1px solid #e1e4e8;
}
.sla-table th { background: #f6f8fa; }
.metrics {
  display: flex;
  gap: 20px;
  margin-top: 15px;
}
.metric {
  padding: 10px;
  background: #f6f8fa;
  border-radius: 4px;
}
.summary {
  margin-bottom: 30px;
  padding: 20px;
  background: #f8f9fa;
  border-radius: 6px;
}"#;

/// Render the batch as a self-contained HTML document.
///
/// The stylesheet is embedded, nothing is loaded from elsewhere. The summary comes first, followed
/// by one block per scenario in id order.
pub fn render_html(report: &BatchReport) -> String {
    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(Element::new("title").text(TITLE))
        .child(Element::new("style").raw(STYLE));

    let body = Element::new("body")
        .child(Element::new("h1").text(TITLE))
        .child(summary(report))
        .children(report.scenarios().map(scenario_block));

    document(head, body)
}

fn summary(report: &BatchReport) -> Element {
    let summary = Element::new("div")
        .class("summary")
        .child(Element::new("h2").text("Summary"))
        .child(
            Element::new("p")
                .class(pass_class(report.all_passed()))
                .text(format!(
                    "Test Status: {}/{} testcases passed",
                    report.passed, report.total
                )),
        )
        .child(Element::new("p").text(format!("Total testcases: {}", report.total)))
        .child(Element::new("p").text(format!("Passed testcases: {}", report.passed)))
        .child(Element::new("p").text(format!("Failed testcases: {}", report.failed())));

    if report.all_passed() {
        summary
    } else {
        summary.child(
            Element::new("p")
                .class("fail")
                .text(format!("Failed tests: {}", report.failed_ids.join(", "))),
        )
    }
}

fn scenario_block(result: &ScenarioResult) -> Element {
    let passed = result.passed();
    let header = Element::new("div")
        .class("test-header")
        .child(Element::new("h2").text(&result.scenario_id))
        .child(
            Element::new("p")
                .class(pass_class(passed))
                .text(status_text(passed)),
        );

    let detail = match &result.failure {
        Some(failure) => Element::new("p")
            .class("fail")
            .text(format!("Error: {failure}")),
        None if result.sla_records.is_empty() => Element::new("p")
            .class("fail")
            .text("No SLA compliance data reported"),
        None => sla_table(&result.sla_records),
    };

    let energy = result
        .energy_kwh
        .map(|value| format!("{value} KW-Hour"))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let runtime = result
        .runtime_s
        .map(|value| format!("{value} seconds"))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    Element::new("div")
        .class("test-case")
        .child(header)
        .child(detail)
        .child(
            Element::new("div")
                .class("metrics")
                .child(metric("Total Energy:", energy))
                .child(metric("Runtime:", runtime)),
        )
}

fn sla_table(records: &[SlaRecord]) -> Element {
    let header = Element::new("tr").children(
        ["SLA Level", "Compliance", "Required", "Violations", "Status"]
            .into_iter()
            .map(|name| Element::new("th").text(name)),
    );

    Element::new("table")
        .class("sla-table")
        .child(header)
        .children(records.iter().map(sla_row))
}

fn sla_row(record: &SlaRecord) -> Element {
    let passed = record.passed();

    Element::new("tr")
        .class(pass_class(passed))
        .child(Element::new("td").text(format!("SLA{}", record.tier_id)))
        .child(
            Element::new("td")
                .class(tier_class(record.color_tier()))
                .text(percent(record.compliance_pct)),
        )
        .child(Element::new("td").text(required(record.required_pct)))
        .child(Element::new("td").text(violations(record)))
        .child(Element::new("td").text(status_text(passed)))
}

fn metric(label: &str, value: String) -> Element {
    Element::new("div")
        .class("metric")
        .child(Element::new("strong").text(label))
        .text(value)
}

fn pass_class(passed: bool) -> &'static str {
    if passed {
        "pass"
    } else {
        "fail"
    }
}

fn status_text(passed: bool) -> &'static str {
    if passed {
        "✓ PASS"
    } else {
        "✗ FAIL"
    }
}

pub(crate) fn tier_class(tier: ColorTier) -> &'static str {
    match tier {
        ColorTier::High => "tier-high",
        ColorTier::Medium => "tier-medium",
        ColorTier::Low => "tier-low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_classes() {
        assert_eq!("tier-high", tier_class(ColorTier::High));
        assert_eq!("tier-medium", tier_class(ColorTier::Medium));
        assert_eq!("tier-low", tier_class(ColorTier::Low));
    }

    #[test]
    fn metric_is_label_then_value() {
        let html = metric("Runtime:", "N/A".to_string()).render();
        assert_eq!(
            "<div class=\"metric\">\n  <strong>Runtime:</strong>\n  N/A\n</div>\n",
            html
        );
    }
}

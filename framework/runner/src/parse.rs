//! Extraction of structured facts from the simulator's text output.
//!
//! The simulator prints free-text logging interleaved with a handful of result lines, any of which
//! may be wrapped in terminal colour codes. Every line is stripped of escape codes first, then
//! checked with a cheap substring test before the full pattern is tried. Lines that do not match
//! are ignored.

use cloudsim_harness_summary_model::SlaRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static ESCAPE_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("Invalid escape code pattern")
});

// `[0-9]` rather than `\d`, which would also accept non-ASCII digits that `parse` rejects.
static SLA_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^SLA([0-9]+): Violations = ([0-9]+)/([0-9]+) \(([0-9.]+)% violations, ([0-9.]+)% compliance\) \[Required: ([0-9.]+)% compliance\]\s*$",
    )
    .expect("Invalid SLA line pattern")
});

static ENERGY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Total Energy ([0-9.]+)KW-Hour").expect("Invalid energy pattern"));

static RUNTIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"finished in ([0-9.]+) seconds").expect("Invalid runtime pattern"));

/// A single fact recognised on one line of output.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputFact {
    Sla(SlaRecord),
    EnergyKwh(f64),
    RuntimeS(f64),
}

/// Everything recognised in one run's output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedOutput {
    /// In the order they were printed.
    pub sla_records: Vec<SlaRecord>,
    /// The last energy value printed, if any.
    pub energy_kwh: Option<f64>,
    /// The last runtime value printed, if any.
    pub runtime_s: Option<f64>,
}

impl ParsedOutput {
    pub fn push(&mut self, fact: OutputFact) {
        match fact {
            OutputFact::Sla(record) => self.sla_records.push(record),
            OutputFact::EnergyKwh(value) => self.energy_kwh = Some(value),
            OutputFact::RuntimeS(value) => self.runtime_s = Some(value),
        }
    }
}

/// Remove terminal colour and cursor escape sequences from a line.
///
/// An escape byte that does not start a complete sequence is dropped on its own, without the
/// character after it. The output never contains an escape byte, so stripping it again is a no-op.
pub fn strip_escape_codes(line: &str) -> Cow<'_, str> {
    let stripped = ESCAPE_CODE.replace_all(line, "");
    if stripped.contains('\x1b') {
        Cow::Owned(stripped.replace('\x1b', ""))
    } else {
        stripped
    }
}

/// Parse an SLA compliance line.
///
/// The line must match the full shape, for example
/// `SLA1: Violations = 3/100 (3.00% violations, 97.00% compliance) [Required: 95.0% compliance]`.
/// Escape codes are stripped first. Anything else gives `None`.
pub fn parse_sla_line(line: &str) -> Option<SlaRecord> {
    let line = strip_escape_codes(line);
    let captures = SLA_LINE.captures(&line)?;

    Some(SlaRecord {
        tier_id: captures[1].parse().ok()?,
        violation_count: captures[2].parse().ok()?,
        sample_count: captures[3].parse().ok()?,
        violation_pct: parse_number(&captures[4])?,
        compliance_pct: parse_number(&captures[5])?,
        required_pct: parse_number(&captures[6])?,
    })
}

/// Find `Total Energy <value>KW-Hour` anywhere in the line.
pub fn parse_energy(line: &str) -> Option<f64> {
    let line = strip_escape_codes(line);
    let captures = ENERGY.captures(&line)?;
    parse_number(&captures[1])
}

/// Find `finished in <value> seconds` anywhere in the line.
pub fn parse_runtime(line: &str) -> Option<f64> {
    let line = strip_escape_codes(line);
    let captures = RUNTIME.captures(&line)?;
    parse_number(&captures[1])
}

/// A matched decimal, `None` if it is malformed like `1.2.3` or too large to be finite.
fn parse_number(value: &str) -> Option<f64> {
    value.parse().ok().filter(|value: &f64| value.is_finite())
}

/// Recognise at most one fact on a line of output.
pub fn parse_line(line: &str) -> Option<OutputFact> {
    let line = strip_escape_codes(line);

    if line.contains("SLA") && line.contains("compliance") {
        parse_sla_line(&line).map(OutputFact::Sla)
    } else if line.contains("Total Energy") {
        parse_energy(&line).map(OutputFact::EnergyKwh)
    } else if line.contains("Simulation run finished") {
        parse_runtime(&line).map(OutputFact::RuntimeS)
    } else {
        None
    }
}

/// Parse every line of a run's standard output, in order.
pub fn parse_output(stdout: &str) -> ParsedOutput {
    stdout
        .lines()
        .filter_map(parse_line)
        .fold(ParsedOutput::default(), |mut parsed, fact| {
            parsed.push(fact);
            parsed
        })
}

mod batch;
mod scenario;
mod sla;

use std::io::{BufRead, Read, Write};
use std::path::Path;

pub use batch::{build_report, BatchReport, BatchSummary};
pub use scenario::ScenarioResult;
pub use sla::{ColorTier, SlaRecord, COMFORTABLE_MARGIN_PCT};

/// Serialize a full batch report to a writer as pretty printed JSON.
pub fn store_batch_report<W: Write>(report: &BatchReport, writer: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Load a batch report previously written by [store_batch_report].
pub fn load_batch_report<R: Read>(reader: R) -> anyhow::Result<BatchReport> {
    let reader = std::io::BufReader::new(reader);
    let report: BatchReport = serde_json::from_reader(reader)?;
    Ok(report)
}

/// Append a batch summary to a file
///
/// The summary will be serialized to JSON and output as a single line followed by a newline. The
/// recommended file extension is `.jsonl`.
pub fn append_batch_summary(summary: &BatchSummary, path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    serde_json::to_writer(&mut file, summary)?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Load batch summaries from a file
///
/// The file should contain one JSON object per line. This is the format produced by
/// [append_batch_summary]. Blank lines are skipped.
pub fn load_batch_summaries(path: &Path) -> anyhow::Result<Vec<BatchSummary>> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut summaries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        summaries.push(serde_json::from_str(&line)?);
    }
    Ok(summaries)
}

use crate::{render_html, render_text};
use anyhow::Context;
use chrono::{DateTime, TimeZone};
use cloudsim_harness_summary_model::{store_batch_report, BatchReport};
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// History of every batch run, one JSON object per line, kept in the report directory.
pub const BATCH_SUMMARIES_FILE: &str = "batch_summaries.jsonl";

/// A document that can be written for a batch report.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Text,
    Html,
    Json,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Text, ReportFormat::Html, ReportFormat::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }
}

/// The file name, without extension, for the reports of a run.
///
/// `test_report_<run name>_<timestamp>` when the run is named, otherwise `test_report_<timestamp>`.
pub fn report_stem<Tz>(run_name: Option<&str>, started_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let timestamp = started_at.format("%Y%m%d_%H%M%S");
    match run_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => format!("test_report_{name}_{timestamp}"),
        None => format!("test_report_{timestamp}"),
    }
}

/// Write the report in each of the requested formats to `dir`, creating it if needed.
///
/// Returns the paths that were written, in the order the formats were given.
pub fn write_reports(
    report: &BatchReport,
    dir: &Path,
    stem: &str,
    formats: &[ReportFormat],
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create report directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = dir.join(format!("{stem}.{}", format.extension()));
        let mut file = File::create(&path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;

        match format {
            ReportFormat::Text => file.write_all(render_text(report).as_bytes())?,
            ReportFormat::Html => file.write_all(render_html(report).as_bytes())?,
            ReportFormat::Json => store_batch_report(report, &mut file)?,
        }

        log::debug!("Wrote {format:?} report to {}", path.display());
        written.push(path);
    }

    Ok(written)
}

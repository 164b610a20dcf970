use anyhow::{anyhow, Context};
use chrono::Local;
use clap::Parser;
use cloudsim_harness_runner::prelude::{
    resolve_simulator_path, run, ListScenarioRepository, ProcessSimulator,
};
use cloudsim_harness_summary_model::{append_batch_summary, BatchSummary};
use cloudsim_reporter::{render_text, report_stem, write_reports, BATCH_SUMMARIES_FILE};
use std::sync::Arc;

mod cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = cli::HarnessCli::parse();
    let started_at = Local::now();

    let simulator = resolve_simulator_path(cli.simulator.as_deref())
        .context("Cannot run scenarios without the simulator")?;
    log::info!("Using simulator at {}", simulator.display());

    let repository = ListScenarioRepository::from_paths(&cli.scenarios)?.sorted();

    let report = run(
        cli.engine_config(),
        &repository,
        Arc::new(ProcessSimulator::new(simulator)),
    )?;

    print!("{}", render_text(&report));

    let stem = report_stem(cli.run_name.as_deref(), &started_at);
    for path in write_reports(&report, &cli.report_dir, &stem, &cli.formats())? {
        println!("Test report has been generated: {}", path.display());
    }

    let summary = BatchSummary::from_report(
        &report,
        cli.run_name.clone(),
        started_at.timestamp(),
        cli.mode.to_string(),
    );
    append_batch_summary(&summary, &cli.report_dir.join(BATCH_SUMMARIES_FILE))
        .context("Failed to record batch summary")?;

    // All reports have been written by now, so a failure here only affects the exit code
    if !report.all_passed() {
        let error_message = format!(
            "{} out of {} testcases failed: {}",
            report.failed(),
            report.total,
            report.failed_ids.join(", ")
        );

        if cli.allow_failures {
            log::warn!("{error_message}");
        } else {
            return Err(anyhow!(error_message));
        }
    }

    Ok(())
}

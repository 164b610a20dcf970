use clap::Parser;
use cloudsim_harness_core::prelude::RunMode;
use cloudsim_harness_runner::prelude::EngineConfig;
use cloudsim_reporter::ReportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct HarnessCli {
    /// The scenario files to run.
    ///
    /// Each scenario is identified in the reports by its file name, so file names must be unique.
    #[clap(required = true)]
    pub scenarios: Vec<PathBuf>,

    /// How to schedule the scenarios, `sequential` or `concurrent`.
    #[clap(long, short, default_value = "concurrent")]
    pub mode: RunMode,

    /// The number of scenarios to run at once in concurrent mode.
    ///
    /// Defaults to the number of processing units available.
    #[clap(long, short)]
    pub workers: Option<usize>,

    /// Path to the simulator executable.
    ///
    /// Falls back to the `CLOUDSIM_SIMULATOR_PATH` environment variable and then `./simulator`.
    #[clap(long)]
    pub simulator: Option<String>,

    /// The directory that reports are written to.
    #[clap(long, default_value = "test_results")]
    pub report_dir: PathBuf,

    /// A name for this run, included in the report file names.
    #[clap(long)]
    pub run_name: Option<String>,

    /// The report formats to write. Can be given multiple times, defaults to all formats.
    #[clap(long = "format", value_enum)]
    pub formats: Vec<ReportFormat>,

    /// Do not show a progress bar on the CLI.
    ///
    /// This is recommended for CI/CD environments where the progress bar isn't being looked at by anyone and is just adding noise to the logs.
    #[clap(long, default_value = "false")]
    pub no_progress: bool,

    /// Exit successfully even if some scenarios failed.
    #[clap(long, default_value = "false")]
    pub allow_failures: bool,
}

impl HarnessCli {
    pub fn engine_config(&self) -> EngineConfig {
        let config = EngineConfig::new(self.mode).with_progress(!self.no_progress);
        match self.workers {
            Some(workers) => config.with_workers(workers),
            None => config,
        }
    }

    pub fn formats(&self) -> Vec<ReportFormat> {
        if self.formats.is_empty() {
            ReportFormat::ALL.to_vec()
        } else {
            self.formats.clone()
        }
    }
}

use cloudsim_harness_summary_model::ScenarioResult;
use indicatif::{ProgressBar, ProgressStyle};

/// Shows how many scenarios of the batch have finished.
#[derive(Clone)]
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    /// Create a progress bar over `total` scenarios. When not `enabled`, nothing is drawn.
    ///
    /// Disabling is recommended for CI/CD environments where the progress bar isn't being looked at
    /// by anyone and is just adding noise to the logs.
    pub fn new(total: usize, enabled: bool) -> Self {
        if !enabled {
            return Self::hidden();
        }

        let bar = ProgressBar::new(total as u64);
        match ProgressStyle::with_template(
            "{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} scenarios [{elapsed_precise}] {msg}",
        ) {
            Ok(style) => bar.set_style(style.progress_chars("#>-")),
            Err(e) => log::warn!("Failed to set progress style: {e}"),
        }

        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub(crate) fn scenario_finished(&self, result: &ScenarioResult) {
        self.bar.set_message(result.scenario_id.clone());
        self.bar.inc(1);
    }

    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

use std::sync::Arc;

use cloudsim_harness_summary_model::{build_report, BatchReport};

use crate::engine::{EngineConfig, ExecutionEngine};
use crate::repository::ScenarioRepository;
use crate::scenario::ScenarioRunner;
use crate::simulator::Simulator;
use crate::types::HarnessResult;

/// Run a batch of scenarios against the simulator and aggregate the results.
///
/// Scenario failures do not make this fail, they are reported in the returned [BatchReport].
pub fn run(
    config: EngineConfig,
    repository: &dyn ScenarioRepository,
    simulator: Arc<dyn Simulator>,
) -> HarnessResult<BatchReport> {
    log::info!("Running batch in {} mode", config.mode);

    let engine = ExecutionEngine::new(config, ScenarioRunner::new(simulator));
    let results = engine.run(repository)?;
    let report = build_report(results);

    log::info!(
        "Batch finished: {}/{} scenarios passed",
        report.passed,
        report.total
    );
    if !report.all_passed() {
        log::warn!("Failed scenarios: {}", report.failed_ids.join(", "));
    }

    Ok(report)
}

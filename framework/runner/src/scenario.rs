use crate::parse::parse_output;
use crate::simulator::Simulator;
use cloudsim_harness_summary_model::ScenarioResult;
use std::path::Path;
use std::sync::Arc;

/// Runs one scenario against the simulator and turns its output into a [ScenarioResult].
///
/// Cheap to clone, clones share the same simulator.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    simulator: Arc<dyn Simulator>,
}

impl ScenarioRunner {
    pub fn new(simulator: Arc<dyn Simulator>) -> Self {
        Self { simulator }
    }

    /// Run a single scenario.
    ///
    /// This never fails. If the simulator cannot be launched then the returned result carries the
    /// reason as its failure. A non-zero exit code is logged but the output is still parsed, the
    /// simulator may have printed compliance data before exiting.
    pub fn run(&self, scenario_id: &str, scenario_path: &Path) -> ScenarioResult {
        log::debug!(
            "Running scenario {scenario_id} from {}",
            scenario_path.display()
        );

        let output = match self.simulator.invoke(scenario_path) {
            Ok(output) => output,
            Err(e) => {
                log::error!("Failed to run scenario {scenario_id}: {e}");
                return ScenarioResult::failed(scenario_id, e.to_string());
            }
        };

        if !output.success() {
            match output.exit_code {
                Some(code) => log::warn!("Simulator exited with code {code} for {scenario_id}"),
                None => log::warn!("Simulator was terminated by a signal for {scenario_id}"),
            }
        }
        if !output.stderr.is_empty() {
            log::debug!("Simulator stderr for {scenario_id}:\n{}", output.stderr);
        }

        let parsed = parse_output(&output.stdout);
        if parsed.sla_records.is_empty() {
            log::warn!("Scenario {scenario_id} produced no compliance data");
        }

        ScenarioResult::completed(
            scenario_id,
            parsed.sla_records,
            parsed.energy_kwh,
            parsed.runtime_s,
        )
    }
}

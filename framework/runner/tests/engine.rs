use cloudsim_harness_core::prelude::RunMode;
use cloudsim_harness_runner::prelude::{
    run, EngineConfig, ExecutionEngine, HarnessResult, ListScenarioRepository, ProcessSimulator,
    ScenarioRepository, ScenarioRunner, Simulator, SimulatorError, SimulatorOutput,
};
use cloudsim_harness_summary_model::ScenarioResult;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const PASSING: &str = "\x1b[32mSLA0: Violations = 1/100 (1.00% violations, 99.00% compliance) [Required: 95.0% compliance]\x1b[0m
SLA1: Violations = 3/100 (3.00% violations, 97.00% compliance) [Required: 90.0% compliance]
Total Energy 12.50KW-Hour
Simulation run finished in 3.20 seconds
";

const FAILING: &str = "SLA1: Violations = 30/100 (30.00% violations, 70.00% compliance) [Required: 90.0% compliance]
SLA0: Violations = 0/100 (0.00% violations, 100.00% compliance) [Required: 95.0% compliance]
Total Energy 4KW-Hour
";

const SILENT: &str = "Starting simulation\nWarning: nothing scheduled\n";

/// Answers from a table keyed by scenario file name. Scenarios named `panic*` panic, scenarios
/// named `missing*` fail to launch. A delay keyed by name makes workers finish out of order.
#[derive(Debug, Default)]
struct TableSimulator {
    outputs: HashMap<String, &'static str>,
    delays: HashMap<String, Duration>,
}

impl TableSimulator {
    fn with(mut self, name: &str, output: &'static str) -> Self {
        self.outputs.insert(name.to_string(), output);
        self
    }

    fn delayed(mut self, name: &str, millis: u64) -> Self {
        self.delays
            .insert(name.to_string(), Duration::from_millis(millis));
        self
    }
}

impl Simulator for TableSimulator {
    fn invoke(&self, scenario_path: &Path) -> Result<SimulatorOutput, SimulatorError> {
        let name = scenario_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        if let Some(delay) = self.delays.get(&name) {
            std::thread::sleep(*delay);
        }

        if name.starts_with("panic") {
            panic!("simulator output could not be handled for {name}");
        }
        if name.starts_with("missing") {
            return Err(SimulatorError::Launch {
                executable: PathBuf::from("./simulator"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
            });
        }

        Ok(SimulatorOutput {
            exit_code: Some(0),
            stdout: self.outputs.get(&name).copied().unwrap_or_default().to_string(),
            stderr: String::new(),
        })
    }
}

fn table_simulator() -> Arc<dyn Simulator> {
    Arc::new(
        TableSimulator::default()
            .with("a.md", PASSING)
            .with("b.md", FAILING)
            .with("c.md", SILENT)
            .with("d.md", PASSING)
            .with("e.md", PASSING)
            .delayed("a.md", 60)
            .delayed("b.md", 40)
            .delayed("c.md", 20),
    )
}

fn repository(names: &[&str]) -> ListScenarioRepository {
    ListScenarioRepository::from_paths(names.iter().map(|name| format!("testcases/{name}")))
        .expect("valid repository")
}

#[test]
fn sequential_and_concurrent_reports_match() {
    env_logger::try_init().ok();

    let names = [
        "a.md",
        "b.md",
        "c.md",
        "d.md",
        "e.md",
        "missing.md",
        "panic.md",
    ];

    let sequential = run(
        EngineConfig::new(RunMode::Sequential),
        &repository(&names),
        table_simulator(),
    )
    .unwrap();
    let concurrent = run(
        EngineConfig::new(RunMode::Concurrent).with_workers(4),
        &repository(&names),
        table_simulator(),
    )
    .unwrap();

    assert_eq!(sequential, concurrent);

    assert_eq!(names.len(), concurrent.total);
    assert_eq!(3, concurrent.passed);
    assert_eq!(
        vec!["b.md", "c.md", "missing.md", "panic.md"],
        concurrent.failed_ids
    );
    assert_eq!(
        concurrent.total,
        concurrent.passed + concurrent.failed_ids.len()
    );
}

#[test]
fn panicking_worker_does_not_affect_siblings() {
    let report = run(
        EngineConfig::new(RunMode::Concurrent).with_workers(2),
        &repository(&["panic.md", "a.md", "d.md"]),
        table_simulator(),
    )
    .unwrap();

    let panicked = &report.results["panic.md"];
    assert!(panicked.sla_records.is_empty());
    let failure = panicked.failure.as_deref().expect("should have failed");
    assert!(failure.starts_with("Worker failed:"), "{failure}");
    assert!(failure.contains("could not be handled"), "{failure}");

    assert!(report.results["a.md"].passed());
    assert!(report.results["d.md"].passed());
}

#[test]
fn parsed_values_reach_the_report() {
    let report = run(
        EngineConfig::new(RunMode::Sequential),
        &repository(&["a.md", "c.md"]),
        table_simulator(),
    )
    .unwrap();

    let a = &report.results["a.md"];
    assert_eq!(Some(12.5), a.energy_kwh);
    assert_eq!(Some(3.2), a.runtime_s);
    assert_eq!(2, a.sla_records.len());

    assert_eq!(
        ScenarioResult::completed("c.md", vec![], None, None),
        report.results["c.md"]
    );
}

#[test]
fn single_worker_pool_still_completes_every_scenario() {
    let names = ["a.md", "b.md", "c.md", "d.md"];
    let report = run(
        EngineConfig::new(RunMode::Concurrent).with_workers(1),
        &repository(&names),
        table_simulator(),
    )
    .unwrap();

    assert_eq!(
        names.to_vec(),
        report.results.keys().map(String::as_str).collect::<Vec<_>>()
    );
}

struct PartlyResolvable {
    inner: ListScenarioRepository,
}

impl ScenarioRepository for PartlyResolvable {
    fn scenario_ids(&self) -> Vec<String> {
        let mut ids = self.inner.scenario_ids();
        ids.push("unresolvable.md".to_string());
        ids.push("a.md".to_string());
        ids
    }

    fn resolve(&self, scenario_id: &str) -> HarnessResult<PathBuf> {
        self.inner.resolve(scenario_id)
    }
}

#[test]
fn unresolvable_and_duplicate_ids() {
    let repository = PartlyResolvable {
        inner: repository(&["a.md", "b.md"]),
    };

    let engine = ExecutionEngine::new(
        EngineConfig::new(RunMode::Concurrent).with_workers(2),
        ScenarioRunner::new(table_simulator()),
    );
    let results = engine.run(&repository).unwrap();

    assert_eq!(3, results.len());
    let unresolvable = &results["unresolvable.md"];
    assert!(unresolvable
        .failure
        .as_deref()
        .unwrap()
        .contains("Unknown scenario"));
}

#[test]
fn empty_batch() {
    for mode in [RunMode::Sequential, RunMode::Concurrent] {
        let report = run(
            EngineConfig::new(mode),
            &ListScenarioRepository::new(),
            table_simulator(),
        )
        .unwrap();
        assert_eq!(0, report.total);
        assert!(report.all_passed());
    }
}

#[cfg(unix)]
mod process {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_scenario(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).expect("failed to write scenario");
        path
    }

    #[test]
    fn real_processes_are_parsed() {
        // `cat` prints the scenario file, standing in for a simulator that printed that output.
        let cat = which::which("cat").expect("cat should be available");
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_scenario(&dir, "pass.md", PASSING),
            write_scenario(&dir, "fail.md", FAILING),
            write_scenario(&dir, "silent.md", SILENT),
        ];

        let report = run(
            EngineConfig::new(RunMode::Concurrent).with_workers(2),
            &ListScenarioRepository::from_paths(&paths).unwrap(),
            Arc::new(ProcessSimulator::new(cat)),
        )
        .unwrap();

        assert_eq!(3, report.total);
        assert_eq!(1, report.passed);
        assert_eq!(vec!["fail.md", "silent.md"], report.failed_ids);
        assert_eq!(Some(12.5), report.results["pass.md"].energy_kwh);
    }

    #[test]
    fn non_zero_exit_keeps_partial_output() {
        // `sh` runs the scenario file as a script, so the scenario controls the exit code.
        let sh = which::which("sh").expect("sh should be available");
        let dir = TempDir::new().unwrap();
        let path = write_scenario(
            &dir,
            "warn.md",
            "echo 'SLA0: Violations = 0/5 (0.00% violations, 100.00% compliance) [Required: 95.0% compliance]'\n\
             echo 'something went wrong' >&2\n\
             exit 3\n",
        );

        let report = run(
            EngineConfig::new(RunMode::Sequential),
            &ListScenarioRepository::from_paths([path]).unwrap(),
            Arc::new(ProcessSimulator::new(sh)),
        )
        .unwrap();

        let result = &report.results["warn.md"];
        assert_eq!(None, result.failure);
        assert!(result.passed());
    }

    #[test]
    fn missing_executable_fails_every_scenario_but_completes() {
        let dir = TempDir::new().unwrap();
        let paths = vec![
            write_scenario(&dir, "one.md", PASSING),
            write_scenario(&dir, "two.md", PASSING),
        ];

        let report = run(
            EngineConfig::new(RunMode::Concurrent),
            &ListScenarioRepository::from_paths(&paths).unwrap(),
            Arc::new(ProcessSimulator::new(dir.path().join("no-simulator-here"))),
        )
        .unwrap();

        assert_eq!(2, report.total);
        assert_eq!(0, report.passed);
        for result in report.scenarios() {
            assert!(result
                .failure
                .as_deref()
                .unwrap()
                .starts_with("Failed to launch simulator"));
        }
    }
}

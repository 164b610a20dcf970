use crate::executor::Executor;
use crate::progress::BatchProgress;
use crate::repository::ScenarioRepository;
use crate::scenario::ScenarioRunner;
use crate::types::HarnessResult;
use cloudsim_harness_core::prelude::{RunMode, WorkerFailure};
use cloudsim_harness_summary_model::ScenarioResult;
use futures::StreamExt;
use std::collections::{BTreeMap, HashSet};
use std::num::NonZeroUsize;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};

/// Configuration for the [ExecutionEngine].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub mode: RunMode,
    /// Size of the worker pool in concurrent mode. Defaults to the number of processing units
    /// available to this process.
    pub workers: Option<NonZeroUsize>,
    /// Draw a progress bar while the batch runs.
    pub show_progress: bool,
}

impl EngineConfig {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = NonZeroUsize::new(workers);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The number of scenarios that may run at the same time.
    pub fn worker_count(&self) -> usize {
        match self.mode {
            RunMode::Sequential => 1,
            RunMode::Concurrent => self
                .workers
                .map(NonZeroUsize::get)
                .unwrap_or_else(available_processing_units),
        }
    }
}

/// The number of processing units available to this process, at least 1.
pub fn available_processing_units() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Runs every scenario of a batch exactly once and collects the results by scenario id.
///
/// Failures are contained to the scenario they happen in. A scenario that cannot be resolved,
/// cannot be launched or whose worker panics is recorded with a failure and the batch carries on.
/// Nothing is retried.
pub struct ExecutionEngine {
    config: EngineConfig,
    runner: ScenarioRunner,
}

impl ExecutionEngine {
    pub fn new(config: EngineConfig, runner: ScenarioRunner) -> Self {
        Self { config, runner }
    }

    /// Run all scenarios from the repository.
    ///
    /// Only fails if the engine itself cannot be set up.
    pub fn run(
        &self,
        repository: &dyn ScenarioRepository,
    ) -> HarnessResult<BTreeMap<String, ScenarioResult>> {
        let mut seen = HashSet::new();
        let ids = repository
            .scenario_ids()
            .into_iter()
            .filter(|id| {
                let first = seen.insert(id.clone());
                if !first {
                    log::warn!("Scenario {id} listed more than once, it will only be run once");
                }
                first
            })
            .collect::<Vec<_>>();

        let progress = BatchProgress::new(ids.len(), self.config.show_progress);
        let mut results = BTreeMap::new();

        let mut jobs = Vec::with_capacity(ids.len());
        for id in ids {
            match repository.resolve(&id) {
                Ok(path) => jobs.push((id, path)),
                Err(e) => {
                    let result = ScenarioResult::failed(id, format!("{e:#}"));
                    collect(&mut results, &progress, result);
                }
            }
        }

        match self.config.mode {
            RunMode::Sequential => {
                log::info!("Running {} scenarios sequentially", jobs.len());
                for (id, path) in jobs {
                    let result = run_isolated(&self.runner, &id, &path);
                    collect(&mut results, &progress, result);
                }
            }
            RunMode::Concurrent => self.run_concurrent(jobs, &mut results, &progress)?,
        }

        progress.finish();

        Ok(results)
    }

    fn run_concurrent(
        &self,
        jobs: Vec<(String, PathBuf)>,
        results: &mut BTreeMap<String, ScenarioResult>,
        progress: &BatchProgress,
    ) -> HarnessResult<()> {
        let workers = self.config.worker_count();
        log::info!(
            "Running {} scenarios concurrently using {workers} workers",
            jobs.len()
        );

        let executor = Executor::new(workers)?;
        executor.execute_in_place(async {
            // At most `workers` scenarios are dispatched at once, and they are drained in the order
            // they finish.
            let mut finished = futures::stream::iter(jobs.into_iter().map(|(id, path)| {
                let runner = self.runner.clone();
                async move {
                    let worker_id = id.clone();
                    let joined = tokio::task::spawn_blocking(move || {
                        run_isolated(&runner, &worker_id, &path)
                    })
                    .await;
                    (id, joined)
                }
            }))
            .buffer_unordered(workers);

            while let Some((id, joined)) = finished.next().await {
                let result = match joined {
                    Ok(result) => result,
                    Err(e) if e.is_panic() => {
                        worker_failed(&id, WorkerFailure::from_panic(e.into_panic()))
                    }
                    Err(e) => worker_failed(&id, WorkerFailure::new(e.to_string())),
                };
                collect(results, progress, result);
            }
        });

        Ok(())
    }
}

/// Run one scenario, converting a panic into a failed result for that scenario.
fn run_isolated(runner: &ScenarioRunner, scenario_id: &str, scenario_path: &Path) -> ScenarioResult {
    match std::panic::catch_unwind(AssertUnwindSafe(|| runner.run(scenario_id, scenario_path))) {
        Ok(result) => result,
        Err(payload) => worker_failed(scenario_id, WorkerFailure::from_panic(payload)),
    }
}

fn worker_failed(scenario_id: &str, failure: WorkerFailure) -> ScenarioResult {
    log::error!("Worker for scenario {scenario_id} failed: {failure}");
    ScenarioResult::failed(scenario_id, failure.to_string())
}

fn collect(
    results: &mut BTreeMap<String, ScenarioResult>,
    progress: &BatchProgress,
    result: ScenarioResult,
) {
    match &result.failure {
        Some(failure) => log::info!("✗ Failed {}: {failure}", result.scenario_id),
        None => log::info!("✓ Completed {}", result.scenario_id),
    }
    progress.scenario_finished(&result);
    results.insert(result.scenario_id.clone(), result);
}

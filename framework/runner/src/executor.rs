use crate::types::HarnessResult;
use anyhow::Context;
use std::future::Future;

/// Owns the runtime that concurrent batches are driven on.
///
/// Scenario work runs on the runtime's blocking pool, which is capped at the configured number of
/// workers. Only the collecting loop runs on the runtime thread itself.
#[derive(Debug)]
pub(crate) struct Executor {
    runtime: tokio::runtime::Runtime,
}

impl Executor {
    pub(crate) fn new(workers: usize) -> HarnessResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .max_blocking_threads(workers.max(1))
            .thread_name("scenario-worker")
            .build()
            .context("Failed to create Tokio runtime")?;

        Ok(Self { runtime })
    }

    /// Run async code in place, blocking until it completes.
    pub(crate) fn execute_in_place<T>(&self, fut: impl Future<Output = T>) -> T {
        self.runtime.block_on(fut)
    }
}

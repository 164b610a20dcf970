use crate::types::HarnessResult;
use anyhow::{bail, Context};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Supplies the scenarios for a batch.
///
/// Identifiers must be unique within a batch. How they are discovered is up to the implementation.
pub trait ScenarioRepository {
    /// The scenario identifiers, in the order they should be run sequentially.
    fn scenario_ids(&self) -> Vec<String>;

    /// The path to pass to the simulator for a scenario.
    fn resolve(&self, scenario_id: &str) -> HarnessResult<PathBuf>;
}

/// A repository over an explicit list of scenario files.
///
/// The identifier of each scenario is its file name, so `testcases/small.md` is known as
/// `small.md`.
#[derive(Debug, Clone, Default)]
pub struct ListScenarioRepository {
    order: Vec<String>,
    paths: HashMap<String, PathBuf>,
}

impl ListScenarioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from scenario file paths, keeping their order.
    pub fn from_paths<I, P>(paths: I) -> HarnessResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut repository = Self::new();
        for path in paths {
            repository.add_path(path.as_ref())?;
        }
        Ok(repository)
    }

    /// Add a scenario identified by its file name.
    pub fn add_path(&mut self, path: &Path) -> HarnessResult<()> {
        let id = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("Scenario path has no usable file name: {}", path.display()))?
            .to_string();

        self.add(id, path.to_path_buf())
    }

    /// Add a scenario under an explicit identifier.
    pub fn add(&mut self, id: impl Into<String>, path: PathBuf) -> HarnessResult<()> {
        let id = id.into();
        if let Some(existing) = self.paths.get(&id) {
            bail!(
                "Scenario id '{id}' is used by both '{}' and '{}'",
                existing.display(),
                path.display()
            );
        }

        self.order.push(id.clone());
        self.paths.insert(id, path);
        Ok(())
    }

    /// Sort scenarios by identifier, which is the order reports are rendered in.
    pub fn sorted(mut self) -> Self {
        self.order.sort();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl ScenarioRepository for ListScenarioRepository {
    fn scenario_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    fn resolve(&self, scenario_id: &str) -> HarnessResult<PathBuf> {
        self.paths
            .get(scenario_id)
            .cloned()
            .with_context(|| format!("Unknown scenario: {scenario_id}"))
    }
}

use std::env;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variable to override the path to the simulator executable.
pub const CLOUDSIM_SIMULATOR_PATH_ENV: &str = "CLOUDSIM_SIMULATOR_PATH";

/// The simulator used when nothing else is configured, relative to the working directory.
pub const DEFAULT_SIMULATOR_PATH: &str = "./simulator";

#[derive(thiserror::Error, Debug)]
pub enum SimulatorError {
    #[error("Simulator path set to empty string")]
    EmptyPath,
    #[error("Simulator binary `{name}` not found in PATH")]
    NotInPath {
        name: String,
        #[source]
        source: which::Error,
    },
    #[error("Simulator binary not found at '{}'", path.display())]
    NotFound { path: PathBuf },
    #[error("Failed to launch simulator '{}': {source}", executable.display())]
    Launch {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a simulator run printed and how it exited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulatorOutput {
    /// The exit code, `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    /// Only kept for diagnostics, never parsed.
    pub stderr: String,
}

impl SimulatorOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// The external simulator, invoked once per scenario.
///
/// The invocation blocks until the simulator has exited. Implementations must be shareable between
/// worker threads.
pub trait Simulator: Debug + Send + Sync {
    fn invoke(&self, scenario_path: &Path) -> Result<SimulatorOutput, SimulatorError>;
}

/// Runs the simulator executable as a child process, passing the scenario path as its only
/// argument.
#[derive(Debug, Clone)]
pub struct ProcessSimulator {
    executable: PathBuf,
}

impl ProcessSimulator {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl Simulator for ProcessSimulator {
    fn invoke(&self, scenario_path: &Path) -> Result<SimulatorOutput, SimulatorError> {
        let output = Command::new(&self.executable)
            .arg(scenario_path)
            .output()
            .map_err(|source| SimulatorError::Launch {
                executable: self.executable.clone(),
                source,
            })?;

        Ok(SimulatorOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Get the path to the simulator executable.
///
/// An explicitly configured path is used first, then the [`CLOUDSIM_SIMULATOR_PATH_ENV`]
/// environment variable, then [`DEFAULT_SIMULATOR_PATH`]. A bare name, with no directory
/// component, is looked up in the user's `PATH`.
pub fn resolve_simulator_path(configured: Option<&str>) -> Result<PathBuf, SimulatorError> {
    let from_env = env::var(CLOUDSIM_SIMULATOR_PATH_ENV).ok();
    let value = configured
        .or(from_env.as_deref())
        .unwrap_or(DEFAULT_SIMULATOR_PATH);

    resolve_simulator_value(value)
}

fn resolve_simulator_value(value: &str) -> Result<PathBuf, SimulatorError> {
    if value.is_empty() {
        return Err(SimulatorError::EmptyPath);
    }

    let path = PathBuf::from(value);
    if path.components().count() == 1 && !path.is_absolute() && !path.exists() {
        log::warn!("Simulator '{value}' is not a path so looking in user's 'PATH'");
        return which::which(value).map_err(|source| SimulatorError::NotInPath {
            name: value.to_string(),
            source,
        });
    }

    if !path.exists() {
        return Err(SimulatorError::NotFound { path });
    }

    Ok(path)
}

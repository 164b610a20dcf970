mod engine;
mod executor;
mod parse;
mod progress;
mod repository;
mod run;
mod scenario;
mod simulator;
mod types;

pub mod prelude {
    pub use crate::engine::{available_processing_units, EngineConfig, ExecutionEngine};
    pub use crate::parse::{
        parse_energy, parse_line, parse_output, parse_runtime, parse_sla_line, strip_escape_codes,
        OutputFact, ParsedOutput,
    };
    pub use crate::progress::BatchProgress;
    pub use crate::repository::{ListScenarioRepository, ScenarioRepository};
    pub use crate::run::run;
    pub use crate::scenario::ScenarioRunner;
    pub use crate::simulator::{
        resolve_simulator_path, ProcessSimulator, Simulator, SimulatorError, SimulatorOutput,
        CLOUDSIM_SIMULATOR_PATH_ENV, DEFAULT_SIMULATOR_PATH,
    };
    pub use crate::types::HarnessResult;
}

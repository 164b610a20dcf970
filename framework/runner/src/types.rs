/// Recommended error type for code driving the harness. Scenario-local problems never surface
/// through this type, they are recorded on the scenario's result instead.
pub type HarnessResult<T> = anyhow::Result<T>;

use std::str::FromStr;

/// How the execution engine schedules scenarios.
#[derive(derive_more::Display, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// One scenario at a time, in the order they were given.
    #[display("sequential")]
    Sequential,
    /// A fixed pool of workers, sized to the available processing units unless overridden.
    #[default]
    #[display("concurrent")]
    Concurrent,
}

#[derive(derive_more::Error, derive_more::Display, Debug)]
#[display("Unknown run mode `{value}`, expected `sequential` or `concurrent`")]
pub struct ParseRunModeError {
    value: String,
}

impl FromStr for RunMode {
    type Err = ParseRunModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "serial" | "1" => Ok(RunMode::Sequential),
            "concurrent" | "parallel" | "2" => Ok(RunMode::Concurrent),
            _ => Err(ParseRunModeError {
                value: s.to_string(),
            }),
        }
    }
}

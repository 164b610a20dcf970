use std::any::Any;

/// Raised when the worker running a scenario fails for a reason other than the simulator itself,
/// for example a panic while parsing its output.
///
/// This is never fatal to the batch. The engine records it against the scenario that was being run
/// and carries on with the remaining scenarios.
#[derive(derive_more::Error, derive_more::Display, Debug, Clone, PartialEq)]
#[display("Worker failed: {msg}")]
pub struct WorkerFailure {
    msg: String,
}

impl WorkerFailure {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }

    /// Build a failure from the payload of a caught panic.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let msg = if let Some(msg) = payload.downcast_ref::<&str>() {
            msg.to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "panicked with a non-string payload".to_string()
        };

        Self { msg }
    }
}

impl Default for WorkerFailure {
    fn default() -> Self {
        Self {
            msg: "Worker stopped unexpectedly".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_are_described() {
        let from_str = WorkerFailure::from_panic(Box::new("boom"));
        assert_eq!("Worker failed: boom", from_str.to_string());

        let from_string = WorkerFailure::from_panic(Box::new(format!("boom {}", 2)));
        assert_eq!("Worker failed: boom 2", from_string.to_string());

        let opaque = WorkerFailure::from_panic(Box::new(42_u32));
        assert_eq!(
            "Worker failed: panicked with a non-string payload",
            opaque.to_string()
        );
    }
}

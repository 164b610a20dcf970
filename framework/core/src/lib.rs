mod failure;
mod mode;

pub mod prelude {
    pub use crate::failure::WorkerFailure;
    pub use crate::mode::{ParseRunModeError, RunMode};
}

//! Suite support
//!
//! Assertions, the context shared between steps, and the step runner.

pub mod assertions;
pub mod context;
pub mod step;

pub use assertions::{ensure, ensure_eq, ensure_not_empty, ensure_some};
pub use context::SuiteContext;
pub use step::run_step;

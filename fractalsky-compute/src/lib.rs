pub mod budget;
pub mod dispatcher;
pub mod error;
pub mod escape;
pub mod evaluator;
pub mod session;
pub mod worker;

pub use budget::BudgetTuner;
pub use dispatcher::{PassOutcome, WorkDispatcher, COLORIZE_CHUNK, COMPUTE_CHUNK};
pub use error::{SessionError, WorkerError};
pub use escape::{evaluate, Evaluator, Sample, BAILOUT};
pub use session::RenderSession;
pub use worker::{handle_request, respond};

// Re-export core types for convenience
pub use fractalsky_core::*;

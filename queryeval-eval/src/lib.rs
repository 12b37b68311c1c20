//! The evaluation pipeline: Governor, Validator, Rewriter, Executor,
//! Normalizer, Comparator, and the Orchestrator that composes them.
//! This is the core the whole system exists to run.

pub mod comparator;
pub mod executor;
pub mod governor;
pub mod normalizer;
pub mod orchestrator;
pub mod rewriter;
pub mod validator;

pub use comparator::{compare, ComparisonOutcome};
pub use executor::{ExecutionOutcome, Executor};
pub use governor::Governor;
pub use orchestrator::Orchestrator;
pub use rewriter::rewrite;
pub use validator::validate;

//! Core business logic abstractions

pub mod allocation;
pub mod config;
pub mod error;
pub mod expr;
pub mod log;

// Re-export main types for cleaner imports
pub use allocation::{AllocationOutcome, DepositPlan, Frequency, PlanAllocation, allocate};
pub use error::{AllocationError, EvalError};
pub use expr::{Evaluation, Operator, evaluate};

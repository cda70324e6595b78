//! Typed errors for the evaluator and the allocation engine.
use crate::core::expr::Operator;
use thiserror::Error;

/// Reasons an arithmetic expression is rejected.
///
/// Every variant is a flavor of "invalid expression"; callers surface the
/// message to the user and allow a corrected re-submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error(
        "invalid expression: at least one operator and two operands separated by spaces are required"
    )]
    TooFewTokens,
    #[error("invalid expression: unrecognized token `{0}`")]
    UnrecognizedToken(String),
    #[error("invalid expression: unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("invalid expression: operator `{0}` is missing an operand")]
    MissingOperand(Operator),
    #[error("invalid expression: operands left without an operator to combine them")]
    MissingOperator,
}

/// Validation failures for the allocation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("available funds must not be negative, got {0}")]
    NegativeFunds(f64),
    #[error("deposit plan `{plan}` requests a negative amount ({amount}) for portfolio `{portfolio}`")]
    NegativeAmount {
        plan: String,
        portfolio: String,
        amount: f64,
    },
}

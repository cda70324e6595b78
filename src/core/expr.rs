//! Infix arithmetic expression evaluation.
//!
//! Expressions are whitespace-delimited: `"10 - ( 2 + 3 * ( 7 - 5 ) )"`.
//! Evaluation uses the classic two-stack shunting-yard scheme and records
//! every binary operation it performs, so callers can display how the
//! result was reached.
use crate::core::error::EvalError;
use std::fmt;
use tracing::debug;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Precedence used by the evaluator: multiplicative operators bind
    /// tighter than additive ones.
    pub fn priority(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }

    /// Human-readable operation name for display.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "Addition",
            Operator::Subtract => "Subtraction",
            Operator::Multiply => "Multiplication",
            Operator::Divide => "Division",
        }
    }

    /// Applies the operator with IEEE double-precision semantics. Division
    /// by zero yields `inf`/`NaN` rather than an error.
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        };
        write!(f, "{symbol}")
    }
}

/// Entries on the pending-operator stack. Open parentheses sit on the same
/// stack as operators and act as a barrier for precedence comparisons.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Op(Operator),
    OpenParen,
}

/// The outcome of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Final value, rounded to 2 decimal places.
    pub result: f64,
    /// One `"<lhs> <op> <rhs> = <result>"` record per binary operation, in
    /// evaluation order.
    pub operations: Vec<String>,
    /// The operators applied, in evaluation order.
    pub operators: Vec<Operator>,
}

/// Evaluates a whitespace-delimited infix arithmetic expression.
///
/// Supports `+ - * /` with standard precedence, left-associativity and
/// parentheses. Numbers are decimal literals with an optional sign and
/// fractional part; a leading `-` is only valid as part of a literal
/// (`"-2 + 1"`), not as a unary operator.
///
/// Malformed input is rejected with [`EvalError`] before any partial result
/// can leak: glued tokens (`"1+3"`), a bare number with no operator,
/// unbalanced parentheses and consecutive operators all fail.
pub fn evaluate(expression: &str) -> Result<Evaluation, EvalError> {
    let tokens: Vec<&str> = expression.split_whitespace().collect();
    if tokens.len() <= 1 {
        return Err(EvalError::TooFewTokens);
    }

    let mut operands: Vec<f64> = Vec::new();
    let mut pending: Vec<Pending> = Vec::new();
    let mut operations: Vec<String> = Vec::new();
    let mut operators: Vec<Operator> = Vec::new();

    for token in tokens {
        match token {
            "(" => pending.push(Pending::OpenParen),
            ")" => loop {
                // Evaluate everything back to the matching open parenthesis.
                match pending.pop() {
                    Some(Pending::OpenParen) => break,
                    Some(Pending::Op(op)) => {
                        apply_pending(op, &mut operands, &mut operations, &mut operators)?;
                    }
                    None => return Err(EvalError::UnbalancedParentheses),
                }
            },
            _ => {
                if let Some(op) = Operator::from_token(token) {
                    // Popping while the stacked operator has priority >= the
                    // incoming one makes equal-priority operators evaluate
                    // left to right.
                    while let Some(Pending::Op(top)) = pending.last().copied() {
                        if top.priority() < op.priority() {
                            break;
                        }
                        pending.pop();
                        apply_pending(top, &mut operands, &mut operations, &mut operators)?;
                    }
                    pending.push(Pending::Op(op));
                } else {
                    let value: f64 = token
                        .parse()
                        .map_err(|_| EvalError::UnrecognizedToken(token.to_string()))?;
                    operands.push(value);
                }
            }
        }
    }

    while let Some(entry) = pending.pop() {
        match entry {
            Pending::OpenParen => return Err(EvalError::UnbalancedParentheses),
            Pending::Op(op) => apply_pending(op, &mut operands, &mut operations, &mut operators)?,
        }
    }

    // A well-formed expression reduces to exactly one operand.
    let result = operands.pop().ok_or(EvalError::MissingOperator)?;
    if !operands.is_empty() {
        return Err(EvalError::MissingOperator);
    }

    let rounded = round_two(result);
    debug!(%expression, result = rounded, steps = operations.len(), "Evaluated expression");

    Ok(Evaluation {
        result: rounded,
        operations,
        operators,
    })
}

/// Pops the top two operands, applies `op`, pushes the result back and
/// records the step.
fn apply_pending(
    op: Operator,
    operands: &mut Vec<f64>,
    operations: &mut Vec<String>,
    operators: &mut Vec<Operator>,
) -> Result<(), EvalError> {
    let rhs = operands.pop().ok_or(EvalError::MissingOperand(op))?;
    let lhs = operands.pop().ok_or(EvalError::MissingOperand(op))?;
    let result = op.apply(lhs, rhs);
    operations.push(format!("{lhs} {op} {rhs} = {result}"));
    operators.push(op);
    operands.push(result);
    Ok(())
}

/// Counts how often each operator was applied, preserving first-seen order.
pub fn count_operators(operators: &[Operator]) -> Vec<(Operator, usize)> {
    let mut counts: Vec<(Operator, usize)> = Vec::new();
    for op in operators {
        match counts.iter_mut().find(|(seen, _)| seen == op) {
            Some((_, n)) => *n += 1,
            None => counts.push((*op, 1)),
        }
    }
    counts
}

/// Rounds to 2 decimal places. `inf` and `NaN` pass through unchanged.
fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

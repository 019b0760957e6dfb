//! Expression evaluation: normalize, parse, compute, format

use tracing::debug;

use crate::core::format::{format_with_precision, DEFAULT_PRECISION};
use crate::core::parser::{AstNode, Parser};
use crate::core::{Calculator, EvalResult};

/// Replaces display-only glyphs with their evaluable operators
///
/// ```
/// use scicalc::core::evaluator::normalize;
///
/// assert_eq!(normalize("6×7÷2−1"), "6*7/2-1");
/// ```
#[must_use]
pub fn normalize(expression: &str) -> String {
    expression
        .chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            '−' => '-',
            other => other,
        })
        .collect()
}

/// Evaluator for calculator expressions
#[derive(Debug, Clone)]
pub struct Evaluator {
    precision: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator formatting with the default precision
    #[must_use]
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_PRECISION)
    }

    /// Creates an evaluator formatting results to `precision` fractional digits
    #[must_use]
    pub fn with_precision(precision: usize) -> Self {
        Self { precision }
    }

    /// Returns the number of fractional digits kept in results
    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Evaluates an expression and returns its display string
    pub fn evaluate(&self, expression: &str) -> EvalResult<String> {
        let value = self.evaluate_value(expression)?;
        Ok(format_with_precision(value, self.precision))
    }

    /// Evaluates an expression to its raw numeric value
    pub fn evaluate_value(&self, expression: &str) -> EvalResult<f64> {
        let normalized = normalize(expression);
        let ast = Parser::parse_str(&normalized)?;
        let value = self.evaluate_ast(&ast)?;
        debug!(expression = %normalized, value, "evaluated expression");
        Ok(value)
    }

    /// Evaluates an AST node
    pub fn evaluate_ast(&self, node: &AstNode) -> EvalResult<f64> {
        match node {
            AstNode::Number(n) => Ok(*n),
            AstNode::Negate(inner) => Ok(-self.evaluate_ast(inner)?),
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate_ast(left)?;
                let right_val = self.evaluate_ast(right)?;
                Calculator::calculate(left_val, right_val, *op)
            }
            AstNode::Call { func, arg } => {
                let value = self.evaluate_ast(arg)?;
                Calculator::function(*func, value)
            }
        }
    }
}

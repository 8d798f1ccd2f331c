//! AST evaluator over `f64`

use tracing::debug;

use crate::core::parser::{AstNode, Parser};
use crate::core::{validate_expression, CalcResult};

/// Evaluator for AST expressions
///
/// Arithmetic is plain IEEE-754: `5/0` evaluates to `inf` and `0/0` to
/// `NaN`. Only text that is not a well-formed expression is an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the result
    #[must_use]
    pub fn evaluate(&self, node: &AstNode) -> f64 {
        match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -self.evaluate(inner),
            AstNode::BinaryOp { left, op, right } => {
                op.apply(self.evaluate(left), self.evaluate(right))
            }
        }
    }

    /// Validates, parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        validate_expression(input)?;
        let ast = Parser::parse_str(input)?;
        let value = self.evaluate(&ast);
        debug!(expression = input, value, "evaluated expression");
        Ok(value)
    }
}

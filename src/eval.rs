use crate::ast::{BinaryOperator, Expression, Function, TokenTree};
use crate::error::EvalError;

/// Evaluates a syntax tree to a double-precision result. Pure: no session
/// state is read or written here.
///
/// Division by zero and non-finite results from finite operands are
/// reported as errors rather than surfaced as IEEE infinities; a non-finite
/// *operand* (only reachable through a stored non-finite memory value)
/// propagates untouched.
pub fn evaluate(expression: &TokenTree<Expression>) -> Result<f64, EvalError> {
    match &expression.node {
        Expression::Literal(value) => Ok(*value),

        Expression::UnaryNeg { operand } => Ok(-evaluate(operand)?),

        Expression::BinaryOp { op, lhs, rhs } => {
            let left = evaluate(lhs)?;
            let right = evaluate(rhs)?;

            let result = match op {
                BinaryOperator::Add => left + right,
                BinaryOperator::Sub => left - right,
                BinaryOperator::Mul => left * right,
                BinaryOperator::Div => {
                    if right == 0.0 {
                        return Err(EvalError::DivisionByZero {
                            span: rhs.span.into(),
                        });
                    }
                    left / right
                }
                BinaryOperator::Pow => left.powf(right),
            };

            if left.is_finite() && right.is_finite() && !result.is_finite() {
                // powf yields NaN for a negative base with a fractional
                // exponent; that is a domain failure, not overflow.
                if result.is_nan() {
                    return Err(EvalError::Domain {
                        function: "pow",
                        value: left,
                        span: expression.span.into(),
                    });
                }
                return Err(EvalError::Overflow {
                    span: expression.span.into(),
                });
            }

            Ok(result)
        }

        Expression::Call { function, argument } => {
            let value = evaluate(argument)?;

            let result = match function {
                Function::Sqrt => {
                    if value < 0.0 {
                        return Err(domain_error(*function, value, argument));
                    }
                    value.sqrt()
                }
                Function::Sin => value.sin(),
                Function::Cos => value.cos(),
                Function::Tan => value.tan(),
                Function::Log10 => {
                    if value <= 0.0 {
                        return Err(domain_error(*function, value, argument));
                    }
                    value.log10()
                }
                Function::Ln => {
                    if value <= 0.0 {
                        return Err(domain_error(*function, value, argument));
                    }
                    value.ln()
                }
            };

            Ok(result)
        }
    }
}

fn domain_error(
    function: Function,
    value: f64,
    argument: &TokenTree<Expression>,
) -> EvalError {
    EvalError::Domain {
        function: function.name(),
        value,
        span: argument.span.into(),
    }
}

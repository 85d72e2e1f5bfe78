use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Errors produced while turning input text into tokens.
#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum LexError {
    #[error("unexpected character '{found}'")]
    #[diagnostic(code = "lex::unexpected_character")]
    UnexpectedCharacter {
        found: char,
        #[label("this character")]
        span: SourceSpan,
    },

    #[error("unknown name '{name}'")]
    #[diagnostic(
        code = "lex::unknown_name",
        help("known names are sqrt, sin, cos, tan, log, ln, pi, e, ans, and m")
    )]
    UnknownName {
        name: String,
        #[label("not a function or constant")]
        span: SourceSpan,
    },

    #[error("invalid number '{literal}'")]
    #[diagnostic(code = "lex::invalid_number")]
    InvalidNumber {
        literal: String,
        #[label("this literal")]
        span: SourceSpan,
    },
}

/// Errors produced while building the syntax tree from tokens.
#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum ParseError {
    #[error("unexpected token")]
    #[diagnostic(code = "parse::unexpected_token")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        #[label("expected {expected}, found {found}")]
        span: SourceSpan,
    },

    #[error("unbalanced parentheses")]
    #[diagnostic(code = "parse::unbalanced_parens")]
    UnbalancedParens {
        #[label("this parenthesis is unmatched")]
        span: SourceSpan,
    },

    #[error("missing operand")]
    #[diagnostic(code = "parse::missing_operand")]
    MissingOperand {
        #[label("expected an operand here")]
        span: SourceSpan,
    },

    #[error("empty expression")]
    #[diagnostic(code = "parse::empty_expression")]
    EmptyExpression,
}

/// Errors produced while evaluating a well-formed syntax tree.
#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum EvalError {
    #[error("division by zero")]
    #[diagnostic(code = "eval::division_by_zero")]
    DivisionByZero {
        #[label("this divisor is zero")]
        span: SourceSpan,
    },

    #[error("domain error: {function} is undefined for {value}")]
    #[diagnostic(code = "eval::domain_error")]
    Domain {
        function: &'static str,
        value: f64,
        #[label("argument out of domain")]
        span: SourceSpan,
    },

    #[error("result is too large to represent")]
    #[diagnostic(code = "eval::overflow")]
    Overflow {
        #[label("this operation overflows")]
        span: SourceSpan,
    },
}

/// Umbrella over every stage's failure, as surfaced by
/// [`Session::evaluate_and_record`](crate::session::Session::evaluate_and_record).
#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum CalcError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Eval(#[from] EvalError),
}

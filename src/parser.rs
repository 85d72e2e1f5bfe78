use std::iter::Peekable;
use std::vec;

use crate::ast::{BinaryOperator, Expression, Function, TokenTree};
use crate::error::ParseError;
use crate::token::{Span, Token, TokenKind};

/// Precedence-climbing parser over a resolved token sequence. Consumes the
/// whole input: anything left over after one complete expression is an
/// error.
pub struct Parser {
    tokens: Peekable<vec::IntoIter<Token>>,
    end: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        Self {
            tokens: tokens.into_iter().peekable(),
            end,
        }
    }

    pub fn parse(mut self) -> Result<TokenTree<Expression>, ParseError> {
        if self.tokens.peek().is_none() {
            return Err(ParseError::EmptyExpression);
        }

        let expression = self.parse_expression_within(0)?;

        match self.tokens.next() {
            None => Ok(expression),
            Some(Token {
                kind: TokenKind::CloseParen,
                span,
            }) => Err(ParseError::UnbalancedParens { span: span.into() }),
            Some(token) => Err(ParseError::UnexpectedToken {
                found: token.kind.to_string(),
                expected: "end of expression",
                span: token.span.into(),
            }),
        }
    }

    fn parse_expression_within(
        &mut self,
        min_bp: u8,
    ) -> Result<TokenTree<Expression>, ParseError> {
        let mut lhs = match self.tokens.next() {
            Some(Token {
                kind: TokenKind::Number(n),
                span,
            }) => TokenTree::new(Expression::Literal(n), span),

            Some(Token {
                kind: TokenKind::Ident(name),
                span,
            }) => self.parse_call(&name, span)?,

            Some(Token {
                kind: TokenKind::OpenParen,
                span,
            }) => {
                let inner = self.parse_expression_within(0)?;
                let close = self.expect_close_paren(span)?;
                TokenTree::new(inner.node, Span {
                    start: span.start,
                    end: close.end,
                })
            }

            Some(Token {
                kind: TokenKind::Minus,
                span,
            }) => {
                let ((), r_bp) = prefix_binding_power();
                let operand = self.parse_expression_within(r_bp)?;
                let operand_end = operand.span.end;
                TokenTree::new(
                    Expression::UnaryNeg {
                        operand: Box::new(operand),
                    },
                    Span {
                        start: span.start,
                        end: operand_end,
                    },
                )
            }

            Some(token) => {
                return Err(ParseError::MissingOperand {
                    span: token.span.into(),
                })
            }

            None => {
                return Err(ParseError::MissingOperand {
                    span: (self.end..self.end + 1).into(),
                })
            }
        };

        loop {
            let op = match self.tokens.peek().map(|t| binary_operator(&t.kind)) {
                Some(Some(op)) => op,
                _ => break,
            };

            let (l_bp, r_bp) = infix_binding_power(op);
            if l_bp < min_bp {
                break;
            }
            self.tokens.next();

            let rhs = self.parse_expression_within(r_bp)?;
            let span = Span {
                start: lhs.span.start,
                end: rhs.span.end,
            };
            lhs = TokenTree::new(
                Expression::BinaryOp {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                },
                span,
            );
        }

        Ok(lhs)
    }

    fn parse_call(
        &mut self,
        name: &str,
        span: Span,
    ) -> Result<TokenTree<Expression>, ParseError> {
        let Some(function) = Function::from_name(name) else {
            // Constant names are resolved into number tokens before parsing;
            // an identifier that is not a function means that step was
            // skipped.
            return Err(ParseError::UnexpectedToken {
                found: format!("'{name}'"),
                expected: "a function name",
                span: span.into(),
            });
        };

        match self.tokens.next() {
            Some(Token {
                kind: TokenKind::OpenParen,
                span: open,
            }) => {
                let argument = self.parse_expression_within(0)?;
                let close = self.expect_close_paren(open)?;
                Ok(TokenTree::new(
                    Expression::Call {
                        function,
                        argument: Box::new(argument),
                    },
                    Span {
                        start: span.start,
                        end: close.end,
                    },
                ))
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                found: token.kind.to_string(),
                expected: "'(' after the function name",
                span: token.span.into(),
            }),
            None => Err(ParseError::UnexpectedToken {
                found: "end of input".to_string(),
                expected: "'(' after the function name",
                span: (self.end..self.end + 1).into(),
            }),
        }
    }

    fn expect_close_paren(&mut self, open: Span) -> Result<Span, ParseError> {
        match self.tokens.next() {
            Some(Token {
                kind: TokenKind::CloseParen,
                span,
            }) => Ok(span),
            Some(token) => Err(ParseError::UnexpectedToken {
                found: token.kind.to_string(),
                expected: "')'",
                span: token.span.into(),
            }),
            None => Err(ParseError::UnbalancedParens { span: open.into() }),
        }
    }
}

fn prefix_binding_power() -> ((), u8) {
    // Unary minus binds tighter than any infix operator, including `^`,
    // so `-2 ^ 2` is `(-2) ^ 2`.
    ((), 7)
}

fn infix_binding_power(op: BinaryOperator) -> (u8, u8) {
    match op {
        BinaryOperator::Add | BinaryOperator::Sub => (1, 2),
        BinaryOperator::Mul | BinaryOperator::Div => (3, 4),
        BinaryOperator::Pow => (6, 5), // Right associative
    }
}

fn binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    Some(match kind {
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Minus => BinaryOperator::Sub,
        TokenKind::Star => BinaryOperator::Mul,
        TokenKind::Slash => BinaryOperator::Div,
        TokenKind::Caret => BinaryOperator::Pow,
        _ => return None,
    })
}

use crate::token::{Token, TokenKind};

/// Snapshot of the session state substituted during symbol resolution.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Bindings {
    pub ans: f64,
    pub memory: f64,
}

/// Replaces the contextual names `pi`, `e`, `ans`, and `m` with number
/// tokens, keeping each identifier's span.
///
/// Resolution works on whole identifier tokens, never on raw text, so a
/// single-letter name like `e` or `m` can never corrupt part of another word
/// such as `sqrt` or `log`. Function names pass through untouched for the
/// parser to handle; the lexer guarantees no other identifiers exist.
pub fn resolve_symbols(tokens: Vec<Token>, bindings: &Bindings) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|token| {
            let value = match &token.kind {
                TokenKind::Ident(name) => match name.as_str() {
                    "pi" => std::f64::consts::PI,
                    "e" => std::f64::consts::E,
                    "ans" => bindings.ans,
                    "m" => bindings.memory,
                    _ => return token,
                },
                _ => return token,
            };

            Token {
                kind: TokenKind::Number(value),
                span: token.span,
            }
        })
        .collect()
}

use crate::error::LexError;
use crate::token::{Span, Token, TokenKind};

/// The identifier words the lexer accepts: the six built-in functions plus
/// the contextual names resolved into numbers before parsing. Anything else
/// is rejected here, so later stages never see an unknown name.
const KNOWN_NAMES: [&str; 10] = [
    "sqrt", "sin", "cos", "tan", "log", "ln", "pi", "e", "ans", "m",
];

pub struct Lexer<'source> {
    source: &'source str,
    rest: &'source str,
    position: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
        }
    }
}

/// Drives a [`Lexer`] over the whole input, producing the full token
/// sequence or the first error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}

macro_rules! token {
    ($kind:ident, $start:ident, $self:ident) => {
        return Some(Ok(Token {
            kind: TokenKind::$kind,
            span: Span {
                start: $start,
                end: $self.position,
            },
        }))
    };
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.chars();
            let c = chars.next()?;
            let c_start = self.position;

            self.rest = chars.as_str();
            self.position += c.len_utf8();

            match c {
                '+' => token!(Plus, c_start, self),
                '-' => token!(Minus, c_start, self),
                '*' => token!(Star, c_start, self),
                '/' => token!(Slash, c_start, self),
                '^' => token!(Caret, c_start, self),
                '(' => token!(OpenParen, c_start, self),
                ')' => token!(CloseParen, c_start, self),
                ',' => token!(Comma, c_start, self),

                'π' => {
                    return Some(Ok(Token {
                        kind: TokenKind::Ident("pi".to_string()),
                        span: Span {
                            start: c_start,
                            end: self.position,
                        },
                    }))
                }

                '0'..='9' | '.' => return Some(self.lex_number(c_start)),
                'a'..='z' | 'A'..='Z' | '_' => return Some(self.lex_word(c_start)),

                c if c.is_whitespace() => continue,

                _ => {
                    return Some(Err(LexError::UnexpectedCharacter {
                        found: c,
                        span: Span {
                            start: c_start,
                            end: self.position,
                        }
                        .into(),
                    }))
                }
            }
        }
    }
}

impl Lexer<'_> {
    fn lex_number(&mut self, start: usize) -> Result<Token, LexError> {
        let mut seen_dot = self.source[start..].starts_with('.');
        while let Some(c) = self.rest.chars().next() {
            match c {
                '0'..='9' => {}
                '.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            self.position += c.len_utf8();
            self.rest = &self.rest[c.len_utf8()..];
        }

        // A word glued onto a number would be implicit multiplication, which
        // the grammar does not allow; take the whole run so the error points
        // at all of it.
        if matches!(
            self.rest.chars().next(),
            Some('a'..='z' | 'A'..='Z' | '_' | 'π')
        ) {
            while let Some(c) = self.rest.chars().next() {
                if !matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | 'π') {
                    break;
                }
                self.position += c.len_utf8();
                self.rest = &self.rest[c.len_utf8()..];
            }

            return Err(LexError::InvalidNumber {
                literal: self.source[start..self.position].to_string(),
                span: Span {
                    start,
                    end: self.position,
                }
                .into(),
            });
        }

        let literal = &self.source[start..self.position];
        let span = Span {
            start,
            end: self.position,
        };

        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Token {
                kind: TokenKind::Number(value),
                span,
            }),
            _ => Err(LexError::InvalidNumber {
                literal: literal.to_string(),
                span: span.into(),
            }),
        }
    }

    fn lex_word(&mut self, start: usize) -> Result<Token, LexError> {
        while matches!(
            self.rest.chars().next(),
            Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_')
        ) {
            self.position += 1;
            self.rest = &self.rest[1..];
        }

        // Names are case-insensitive; normalize here so every later stage
        // only deals with lowercase.
        let word = self.source[start..self.position].to_lowercase();
        let span = Span {
            start,
            end: self.position,
        };

        if KNOWN_NAMES.contains(&word.as_str()) {
            Ok(Token {
                kind: TokenKind::Ident(word),
                span,
            })
        } else {
            Err(LexError::UnknownName {
                name: word,
                span: span.into(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_numbers() {
        for (input, expected) in [
            ("3", 3.0),
            ("345", 345.0),
            ("3.25", 3.25),
            ("1.", 1.0),
            (".5", 0.5),
            ("0.0", 0.0),
        ] {
            let mut lexer = Lexer::new(input);
            let token = lexer.next().unwrap().unwrap();
            assert_eq!(
                token.kind,
                TokenKind::Number(expected),
                "when lexing '{input}'"
            );
            assert_eq!(token.span, Span {
                start: 0,
                end: input.len()
            });
            assert!(lexer.next().is_none());
        }
    }

    #[test]
    fn rejects_glued_words_after_numbers() {
        let error = tokenize("2sin(1)").unwrap_err();
        assert_eq!(
            error,
            LexError::InvalidNumber {
                literal: "2sin".to_string(),
                span: (0..4).into(),
            }
        );
    }

    #[test]
    fn rejects_non_finite_literals() {
        let input = format!("1{}", "0".repeat(400));
        let error = tokenize(&input).unwrap_err();
        assert!(matches!(error, LexError::InvalidNumber { .. }));
    }

    #[test]
    fn lexes_operators_and_parens() {
        let tokens = tokenize("1+2*(3-4)/5^6").unwrap();
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![
            TokenKind::Number(1.0),
            TokenKind::Plus,
            TokenKind::Number(2.0),
            TokenKind::Star,
            TokenKind::OpenParen,
            TokenKind::Number(3.0),
            TokenKind::Minus,
            TokenKind::Number(4.0),
            TokenKind::CloseParen,
            TokenKind::Slash,
            TokenKind::Number(5.0),
            TokenKind::Caret,
            TokenKind::Number(6.0),
        ]);
    }

    #[test]
    fn lexes_known_words_case_insensitively() {
        for (input, expected) in [
            ("sqrt", "sqrt"),
            ("SQRT", "sqrt"),
            ("Sin", "sin"),
            ("ans", "ans"),
            ("ANS", "ans"),
            ("Pi", "pi"),
            ("e", "e"),
            ("m", "m"),
        ] {
            let mut lexer = Lexer::new(input);
            let token = lexer.next().unwrap().unwrap();
            assert_eq!(
                token.kind,
                TokenKind::Ident(expected.to_string()),
                "when lexing '{input}'"
            );
        }
    }

    #[test]
    fn lexes_pi_glyph() {
        let tokens = tokenize("2 * π").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Ident("pi".to_string()));
        // The span covers the two-byte glyph.
        assert_eq!(tokens[2].span, Span { start: 4, end: 6 });
    }

    #[test]
    fn rejects_unknown_names() {
        for input in ["x", "foo", "sine", "log10"] {
            let error = tokenize(input).unwrap_err();
            assert!(
                matches!(error, LexError::UnknownName { .. }),
                "when lexing '{input}'"
            );
        }
    }

    #[test]
    fn rejects_unexpected_characters() {
        let error = tokenize("2 $ 2").unwrap_err();
        assert_eq!(
            error,
            LexError::UnexpectedCharacter {
                found: '$',
                span: (2..3).into(),
            }
        );
    }

    #[test]
    fn skips_whitespace() {
        let tokens = tokenize("  1 \t+\n2 ").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].span, Span { start: 5, end: 6 });
    }

    #[test]
    fn empty_input_lexes_to_nothing() {
        assert_eq!(tokenize("").unwrap(), vec![]);
        assert_eq!(tokenize("   ").unwrap(), vec![]);
    }
}

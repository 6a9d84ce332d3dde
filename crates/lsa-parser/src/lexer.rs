//! Lexical analyzer for normalized LSA text.
//!
//! The lexer converts text into a stream of [`Token`]s. Whitespace separates
//! tokens but is not required between them and is not emitted.
//!
//! The public entry point is [`tokenize`], which performs error-recovering
//! lexical analysis and collects all diagnostics in a single pass.

use log::debug;
use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, preceded},
    error::ModalResult,
    stream::{LocatingSlice, Location, Stream},
    token::{literal, one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{ConditionalPrefix, PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;

/// Parse the decimal number that follows every numbered token
fn number(input: &mut Input<'_>) -> ModalResult<u32> {
    digit1.parse_to().parse_next(input)
}

/// Parse the start and end markers
fn marker(input: &mut Input<'_>) -> ModalResult<Token> {
    alt((
        literal("Yн").value(Token::Start),
        literal("Yк").value(Token::End),
    ))
    .parse_next(input)
}

/// Parse jump operators and jump points (`w↑` before `↑`)
fn jump(input: &mut Input<'_>) -> ModalResult<Token> {
    alt((
        preceded("w↑", number).map(Token::UnconditionalJump),
        preceded('↑', number).map(Token::ConditionalJump),
        preceded('↓', number).map(Token::JumpPoint),
    ))
    .parse_next(input)
}

/// Parse conditional (`X<n>`, `P<n>`) and operator (`Y<n>`) vertices
fn vertex(input: &mut Input<'_>) -> ModalResult<Token> {
    alt((
        (one_of(['X', 'P']), number).map(|(prefix, number)| Token::Conditional {
            prefix: if prefix == 'X' {
                ConditionalPrefix::X
            } else {
                ConditionalPrefix::P
            },
            number,
        }),
        preceded('Y', number).map(Token::Operator),
    ))
    .parse_next(input)
}

fn whitespace(input: &mut Input<'_>) -> ModalResult<()> {
    take_while(1.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token(input: &mut Input<'_>) -> ModalResult<PositionedToken> {
    let start_pos = input.current_token_start();

    let token = alt((
        marker, // Must come before vertex ('Y' prefix)
        jump,
        vertex,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'c> {
    tokens: Vec<PositionedToken>,
    diagnostics: &'c mut DiagnosticCollector,
}

impl<'c> Lexer<'c> {
    fn new(diagnostics: &'c mut DiagnosticCollector) -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics,
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'_>) {
        while !input.is_empty() {
            if whitespace(&mut input).is_ok() {
                continue;
            }
            match positioned_token(&mut input) {
                Ok(token) => self.tokens.push(token),
                Err(_) => self.skip_unrecognized(&mut input),
            }
        }
    }

    /// Skip a run of characters that starts no token and report it once.
    ///
    /// The run ends at whitespace, at the end of input, or where a token
    /// can be lexed again.
    fn skip_unrecognized(&mut self, input: &mut Input<'_>) {
        let start = input.current_token_start();
        input.next_token();
        while let Some(c) = input.chars().next() {
            if c.is_whitespace() || positioned_token(&mut input.clone()).is_ok() {
                break;
            }
            input.next_token();
        }
        let end = input.current_token_start();

        let span = Span::new(start..end);
        self.diagnostics.emit(
            Diagnostic::error("unrecognized token")
                .with_code(ErrorCode::E001)
                .with_position(self.tokens.len())
                .with_label(span, ErrorCode::E001.description())
                .with_help("expected one of `Yн`, `Yк`, `Y<n>`, `X<n>`, `P<n>`, `↑<n>`, `w↑<n>`, `↓<n>`"),
        );
    }
}

/// Tokenize `input`, reporting unrecognized runs into `diagnostics`.
pub(crate) fn tokenize_into(
    input: &str,
    diagnostics: &mut DiagnosticCollector,
) -> Vec<PositionedToken> {
    let mut lexer = Lexer::new(diagnostics);
    lexer.tokenize(LocatingSlice::new(input));
    let tokens = lexer.tokens;
    debug!(token_count = tokens.len(); "Tokenized scheme");
    tokens
}

/// Parse tokens from normalized text, collecting every error.
///
/// # Returns
///
/// - `Ok(tokens)` - All characters belong to tokens
/// - `Err(ParseError)` - One or more unrecognized runs; contains all diagnostics
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken>, ParseError> {
    let mut diagnostics = DiagnosticCollector::new();
    let tokens = tokenize_into(input, &mut diagnostics);
    diagnostics.finish().map(|_| tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|positioned| positioned.token)
            .collect()
    }

    #[test]
    fn test_all_token_kinds() {
        assert_eq!(
            kinds("Yн Yк Y3 X1 P2 ↑4 w↑5 ↓6"),
            vec![
                Token::Start,
                Token::End,
                Token::Operator(3),
                Token::Conditional {
                    prefix: ConditionalPrefix::X,
                    number: 1
                },
                Token::Conditional {
                    prefix: ConditionalPrefix::P,
                    number: 2
                },
                Token::ConditionalJump(4),
                Token::UnconditionalJump(5),
                Token::JumpPoint(6),
            ]
        );
    }

    #[test]
    fn test_whitespace_is_optional() {
        assert_eq!(
            kinds("YнX0↑1Y0w↑2↓1Yк"),
            vec![
                Token::Start,
                Token::Conditional {
                    prefix: ConditionalPrefix::X,
                    number: 0
                },
                Token::ConditionalJump(1),
                Token::Operator(0),
                Token::UnconditionalJump(2),
                Token::JumpPoint(1),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("Yн Y12 w↑3").unwrap();

        // `н` and `↑` are multi-byte
        assert_eq!(tokens[0].span, Span::new(0..3));
        assert_eq!(tokens[1].span, Span::new(4..7));
        assert_eq!(tokens[2].span, Span::new(8..13));
        assert_eq!(tokens[2].text("Yн Y12 w↑3"), "w↑3");
    }

    #[test]
    fn test_unrecognized_run_is_one_diagnostic() {
        let err = tokenize("Yн abc Y1 Yк").unwrap_err();

        assert_eq!(err.diagnostics().len(), 1);
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert_eq!(diag.primary_span(), Some(Span::new(4..7)));
        assert_eq!(diag.position(), Some(1));
    }

    #[test]
    fn test_lexing_resumes_after_unrecognized_run() {
        let mut diagnostics = DiagnosticCollector::new();
        let tokens = tokenize_into("Yн Z9Y1 ↑ Yк", &mut diagnostics);

        // `Z9` and the bare `↑` are reported, `Y1` is recovered
        assert_eq!(
            tokens.iter().map(|t| t.token).collect::<Vec<_>>(),
            vec![Token::Start, Token::Operator(1), Token::End]
        );
        assert_eq!(diagnostics.into_diagnostics().len(), 2);
    }

    #[test]
    fn test_number_overflow_is_unrecognized() {
        assert!(tokenize("Y99999999999").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
    }
}

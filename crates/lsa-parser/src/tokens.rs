use std::fmt;

use crate::span::Span;

/// Letter that introduces a conditional vertex. Both denote the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionalPrefix {
    X,
    P,
}

/// Token types of the LSA notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    // Markers
    Start, // Yн
    End,   // Yк

    // Vertices
    Operator(u32), // Y<n>
    Conditional {
        prefix: ConditionalPrefix,
        number: u32,
    }, // X<n> / P<n>

    // Jumps
    JumpPoint(u32),         // ↓<n>
    ConditionalJump(u32),   // ↑<n>
    UnconditionalJump(u32), // w↑<n>
}

impl Token {
    /// Returns `true` for the tokens that close a sub-algorithm without being
    /// part of it.
    pub fn closes_branch(&self) -> bool {
        matches!(self, Token::JumpPoint(_) | Token::End)
    }
}

/// A token with its byte range in the normalized source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedToken {
    pub token: Token,
    pub span: Span,
}

impl PositionedToken {
    pub fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }

    /// The token's text in `source`, which must be the text it was lexed from.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start()..self.span.end()]
    }
}

impl std::ops::Deref for PositionedToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl fmt::Display for PositionedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

impl fmt::Display for ConditionalPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionalPrefix::X => write!(f, "X"),
            ConditionalPrefix::P => write!(f, "P"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Start => write!(f, "Yн"),
            Token::End => write!(f, "Yк"),
            Token::Operator(n) => write!(f, "Y{n}"),
            Token::Conditional { prefix, number } => write!(f, "{prefix}{number}"),
            Token::JumpPoint(n) => write!(f, "↓{n}"),
            Token::ConditionalJump(n) => write!(f, "↑{n}"),
            Token::UnconditionalJump(n) => write!(f, "w↑{n}"),
        }
    }
}

//! Structural parser for LSA token streams.
//!
//! This module turns the flat token stream from the [`lexer`](super::lexer)
//! into the element graph of an [`Automaton`]. Conditional vertices are parsed
//! recursively: the jump operator right after the vertex becomes its `lbs`
//! and the sub-algorithm that follows becomes its `rbs`.
//!
//! The public entry point is [`build_automaton`]. It never fails; every
//! problem is reported to the collector and the best-effort graph is
//! returned.

use std::collections::HashMap;

use log::{debug, trace};

use lsa_core::{
    Automaton,
    element::{Conditional, ElementKind, ElementRef},
    identifier::Id,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Parser state for one scheme.
struct Parser<'a> {
    source: &'a str,
    tokens: &'a [PositionedToken],
    cursor: usize,
    automaton: Automaton,
    /// Elements created ahead of the cursor for branch terminators.
    consumed: HashMap<usize, ElementRef>,
    conditional_count: usize,
    diagnostics: &'a mut DiagnosticCollector,
}

impl<'a> Parser<'a> {
    fn new(
        source: &'a str,
        tokens: &'a [PositionedToken],
        diagnostics: &'a mut DiagnosticCollector,
    ) -> Self {
        let texts = tokens
            .iter()
            .map(|token| token.text(source).to_string())
            .collect();
        Self {
            source,
            tokens,
            cursor: 0,
            automaton: Automaton::new(texts, source),
            consumed: HashMap::new(),
            conditional_count: 0,
            diagnostics,
        }
    }

    fn token(&self, position: usize) -> Option<&'a PositionedToken> {
        self.tokens.get(position)
    }

    /// Span of the token at `position`, or an empty span at the end of input.
    fn span(&self, position: usize) -> Span {
        self.token(position).map_or_else(
            || Span::new(self.source.len()..self.source.len()),
            |token| token.span,
        )
    }

    fn element_span(&self, element: ElementRef) -> Span {
        self.span(self.automaton.element(element).position())
    }

    fn id_at(&self, position: usize) -> Id {
        self.token(position)
            .map_or_else(|| Id::new(""), |token| Id::new(token.text(self.source)))
    }

    /// Parse the whole stream.
    fn parse(mut self) -> Automaton {
        let start = self.parse_start();
        self.check_end_exists();

        let mut previous = Some(start);
        while self.cursor < self.tokens.len() {
            if let Some(element) = self.parse_element() {
                if let Some(previous) = previous {
                    self.link(previous, element);
                }
                previous = self.falls_through(element).then_some(element);
            }
        }

        debug!(
            elements = self.automaton.elements().len(),
            conditionals = self.conditional_count,
            jump_points = self.automaton.jump_points().len();
            "Built element graph"
        );
        self.automaton
    }

    /// Create the start element at position 0 and step past its marker.
    fn parse_start(&mut self) -> ElementRef {
        let start = self
            .automaton
            .add_element(Id::new("Yн"), ElementKind::Start, 0);

        if self.token(0).is_some_and(|token| token.token == Token::Start) {
            self.cursor = 1;
        } else {
            let found = self
                .token(0)
                .map_or_else(|| "empty scheme".to_string(), |token| format!("found `{token}`"));
            self.diagnostics.emit(
                Diagnostic::error("scheme must begin with the start marker `Yн`")
                    .with_code(ErrorCode::E100)
                    .with_position(0)
                    .with_label(self.span(0), found)
                    .with_help("add `Yн` at the beginning of the scheme"),
            );
        }
        start
    }

    fn check_end_exists(&mut self) {
        if self.tokens.iter().any(|token| token.token == Token::End) {
            return;
        }
        let position = self.tokens.len();
        self.diagnostics.emit(
            Diagnostic::error("scheme has no end marker `Yк`")
                .with_code(ErrorCode::E101)
                .with_position(position)
                .with_label(self.span(position), "expected `Yк` before the end of the scheme")
                .with_help("add `Yк` where the algorithm terminates"),
        );
    }

    fn falls_through(&self, element: ElementRef) -> bool {
        self.automaton.element(element).kind().falls_through()
    }

    /// Set `to` as the successor of `from`, reporting a conflicting link.
    fn link(&mut self, from: ElementRef, to: ElementRef) {
        if let Err(conflict) = self.automaton.link(from, to) {
            let from_element = self.automaton.element(from);
            let existing = self.automaton.element(conflict.existing);
            let diagnostic = Diagnostic::error(format!(
                "`{}` already continues with `{}`",
                from_element.id(),
                existing.id()
            ))
            .with_code(ErrorCode::E104)
            .with_position(from_element.position())
            .with_label(self.element_span(to), "second successor")
            .with_secondary_label(self.element_span(from), "element with two successors")
            .with_secondary_label(self.element_span(conflict.existing), "first successor");
            self.diagnostics.emit(diagnostic);
        }
    }

    /// Parse the element at the cursor and advance past everything it owns.
    ///
    /// Returns `None` for a start marker that is not the first token.
    fn parse_element(&mut self) -> Option<ElementRef> {
        let position = self.cursor;
        if let Some(&element) = self.consumed.get(&position) {
            self.cursor += 1;
            return Some(element);
        }

        let token = *self.token(position)?;
        let id = self.id_at(position);
        trace!(token:% = token, position; "Parsing element");

        let element = match token.token {
            // Duplicates are reported by the validator
            Token::Start => None,
            Token::End => Some(self.automaton.add_element(id, ElementKind::End, position)),
            Token::Conditional { .. } => return Some(self.parse_conditional_vertex()),
            Token::Operator(_) => Some(self.automaton.add_element(id, ElementKind::Operator, position)),
            Token::JumpPoint(jump_index) => Some(self.add_jump_point(jump_index, position)),
            Token::ConditionalJump(jump_index) => Some(self.automaton.add_element(
                id,
                ElementKind::JumpOperator {
                    jump_index,
                    is_unconditional: false,
                },
                position,
            )),
            Token::UnconditionalJump(jump_index) => Some(self.automaton.add_element(
                id,
                ElementKind::JumpOperator {
                    jump_index,
                    is_unconditional: true,
                },
                position,
            )),
        };
        self.cursor += 1;
        element
    }

    fn add_jump_point(&mut self, jump_index: u32, position: usize) -> ElementRef {
        let id = self.id_at(position);
        let element = self
            .automaton
            .add_element(id, ElementKind::JumpPoint { jump_index }, position);

        if let Err(first) = self.automaton.register_jump_point(jump_index, element) {
            let first_span = self.element_span(first);
            self.diagnostics.emit(
                Diagnostic::error(format!("jump point `{id}` is declared more than once"))
                    .with_code(ErrorCode::E105)
                    .with_position(position)
                    .with_label(self.span(position), "duplicate declaration")
                    .with_secondary_label(first_span, "first declared here")
                    .with_help("give each jump point a unique number"),
            );
        }
        element
    }

    /// Create (or reuse) the element for a terminator at `position` without
    /// moving the cursor.
    fn terminator(&mut self, position: usize) -> Option<ElementRef> {
        if let Some(&element) = self.consumed.get(&position) {
            return Some(element);
        }
        let element = match self.token(position)?.token {
            Token::JumpPoint(jump_index) => self.add_jump_point(jump_index, position),
            Token::End => {
                let id = self.id_at(position);
                self.automaton.add_element(id, ElementKind::End, position)
            }
            _ => return None,
        };
        self.consumed.insert(position, element);
        Some(element)
    }

    /// Parse a conditional vertex with its `↑` jump and its sub-algorithm.
    fn parse_conditional_vertex(&mut self) -> ElementRef {
        let position = self.cursor;
        self.conditional_count += 1;
        let index = self.conditional_count;
        let id = self.id_at(position);
        let vertex = self.automaton.add_element(
            id,
            ElementKind::Conditional(Conditional::new(index)),
            position,
        );
        trace!(id:% = id, index; "Parsing conditional vertex");
        self.cursor += 1;

        let lbs = match self.token(self.cursor).map(|token| token.token) {
            Some(Token::ConditionalJump(jump_index)) => {
                let jump_id = self.id_at(self.cursor);
                let jump = self.automaton.add_element(
                    jump_id,
                    ElementKind::JumpOperator {
                        jump_index,
                        is_unconditional: false,
                    },
                    self.cursor,
                );
                self.cursor += 1;
                Some(jump)
            }
            other => {
                let found = other.map_or_else(
                    || "scheme ends here".to_string(),
                    |token| format!("found `{token}`"),
                );
                self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "conditional vertex `{id}` must be followed by a jump `↑<n>`"
                    ))
                    .with_code(ErrorCode::E102)
                    .with_position(self.cursor)
                    .with_label(self.span(self.cursor), found)
                    .with_secondary_label(self.span(position), "conditional vertex"),
                );
                None
            }
        };

        let rbs = self.parse_sub_algorithm(vertex);
        self.automaton.set_branches(vertex, lbs, rbs);
        vertex
    }

    /// Parse the branch taken when `vertex` is false and return its head.
    ///
    /// The branch closes before a jump point, before the end marker, at the
    /// end of input, or after an unconditional jump.
    fn parse_sub_algorithm(&mut self, vertex: ElementRef) -> Option<ElementRef> {
        let first = self.cursor;
        let opens_empty = self
            .token(first)
            .is_none_or(|token| token.closes_branch());
        if opens_empty {
            let id = self.automaton.element(vertex).id();
            self.diagnostics.emit(
                Diagnostic::error(format!("branch of `{id}` has no elements"))
                    .with_code(ErrorCode::E103)
                    .with_position(first)
                    .with_label(self.span(first), ErrorCode::E103.description())
                    .with_secondary_label(self.element_span(vertex), "conditional vertex")
                    .with_help("add the steps taken when the condition is false"),
            );
            return None;
        }

        let mut head = None;
        let mut previous: Option<ElementRef> = None;
        while let Some(token) = self.token(self.cursor) {
            if token.closes_branch() {
                let terminator = self.terminator(self.cursor);
                if let (Some(previous), Some(terminator)) = (previous, terminator) {
                    self.link(previous, terminator);
                }
                break;
            }

            let closes = matches!(token.token, Token::UnconditionalJump(_));
            if let Some(element) = self.parse_element() {
                head.get_or_insert(element);
                if let Some(previous) = previous {
                    self.link(previous, element);
                }
                previous = self.falls_through(element).then_some(element);
            }
            if closes {
                break;
            }
        }
        head
    }
}

/// Build the element graph for `tokens` lexed from `source`.
pub(crate) fn build_automaton(
    source: &str,
    tokens: &[PositionedToken],
    diagnostics: &mut DiagnosticCollector,
) -> Automaton {
    Parser::new(source, tokens, diagnostics).parse()
}

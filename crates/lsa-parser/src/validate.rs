//! Validation passes over a freshly built element graph.
//!
//! Each pass reads the [`Automaton`] and reports into the shared collector;
//! no pass stops the others.
//!
//! ## Validations Performed
//!
//! - **Start/End Uniqueness**: At most one start marker in the token stream
//!   and at most one end element
//! - **Jump Resolution**: Every jump operator targets a declared jump point
//! - **Jump Point Completion**: A jump point without a successor is linked to
//!   the next element in token order, with a warning
//! - **Conditional Completeness**: Every conditional vertex has both branches

use log::debug;

use lsa_core::{
    Automaton,
    element::{ElementKind, ElementRef},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
    tokens::{PositionedToken, Token},
};

struct Validator<'a> {
    tokens: &'a [PositionedToken],
    automaton: &'a mut Automaton,
    diagnostics: &'a mut DiagnosticCollector,
}

impl Validator<'_> {
    fn span(&self, position: usize) -> Span {
        self.tokens
            .get(position)
            .map_or_else(Span::default, |token| token.span)
    }

    fn element_span(&self, element: ElementRef) -> Span {
        self.span(self.automaton.element(element).position())
    }

    fn run(mut self) {
        self.check_single_start();
        self.check_single_end();
        self.check_jumps_resolve();
        self.complete_jump_points();
        self.check_conditionals_complete();
    }

    fn check_single_start(&mut self) {
        let positions: Vec<usize> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.token == Token::Start)
            .map(|(position, _)| position)
            .collect();
        self.report_duplicates(&positions, ErrorCode::E200, "start marker `Yн`");
    }

    fn check_single_end(&mut self) {
        let positions: Vec<usize> = self
            .automaton
            .elements()
            .iter()
            .filter(|element| element.is_end())
            .map(|element| element.position())
            .collect();
        self.report_duplicates(&positions, ErrorCode::E201, "end marker `Yк`");
    }

    /// Report every position after the first as one diagnostic.
    fn report_duplicates(&mut self, positions: &[usize], code: ErrorCode, what: &str) {
        let [first, rest @ ..] = positions else {
            return;
        };
        let Some(&second) = rest.first() else {
            return;
        };

        let mut diagnostic = Diagnostic::error(format!(
            "{what} appears {} times",
            positions.len()
        ))
        .with_code(code)
        .with_position(second)
        .with_secondary_label(self.span(*first), "first occurrence");
        for &position in rest {
            diagnostic = diagnostic.with_label(self.span(position), "duplicate");
        }
        self.diagnostics
            .emit(diagnostic.with_help(format!("a scheme has exactly one {what}")));
    }

    fn check_jumps_resolve(&mut self) {
        for element in self.automaton.elements() {
            let ElementKind::JumpOperator { jump_index, .. } = element.kind() else {
                continue;
            };
            if self.automaton.jump_point(*jump_index).is_some() {
                continue;
            }
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "`{}` jumps to `↓{jump_index}`, which is never declared",
                    element.id()
                ))
                .with_code(ErrorCode::E202)
                .with_position(element.position())
                .with_label(self.span(element.position()), "unresolved jump")
                .with_help(format!("declare `↓{jump_index}` where control should continue")),
            );
        }
    }

    fn complete_jump_points(&mut self) {
        let dangling: Vec<ElementRef> = self
            .automaton
            .element_refs()
            .filter(|&element| {
                let element = self.automaton.element(element);
                matches!(element.kind(), ElementKind::JumpPoint { .. }) && element.next().is_none()
            })
            .collect();

        for point in dangling {
            let position = self.automaton.element(point).position();
            let id = self.automaton.element(point).id();
            let following = self
                .automaton
                .element_refs()
                .filter(|&element| self.automaton.element(element).position() > position)
                .min_by_key(|&element| self.automaton.element(element).position());

            match following {
                Some(following) => {
                    // A jump point never has a successor here, so linking cannot conflict
                    let _ = self.automaton.link(point, following);
                    let following_id = self.automaton.element(following).id();
                    self.diagnostics.emit(
                        Diagnostic::warning(format!(
                            "jump point `{id}` has no successor; continuing with `{following_id}`"
                        ))
                        .with_code(ErrorCode::W200)
                        .with_position(position)
                        .with_label(self.span(position), "successor inferred from text order")
                        .with_secondary_label(self.element_span(following), "used as successor"),
                    );
                }
                None => {
                    self.diagnostics.emit(
                        Diagnostic::error(format!("jump point `{id}` leads nowhere"))
                            .with_code(ErrorCode::E204)
                            .with_position(position)
                            .with_label(self.span(position), ErrorCode::E204.description())
                            .with_help("place an element or `Yк` after the jump point"),
                    );
                }
            }
        }
    }

    fn check_conditionals_complete(&mut self) {
        for element in self.automaton.elements() {
            let Some(conditional) = element.as_conditional() else {
                continue;
            };
            let missing = match (conditional.lbs(), conditional.rbs()) {
                (Some(_), Some(_)) => continue,
                (None, Some(_)) => "jump taken when true",
                (Some(_), None) => "branch taken when false",
                (None, None) => "both branches",
            };
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "conditional vertex `{}` is missing its {missing}",
                    element.id()
                ))
                .with_code(ErrorCode::E203)
                .with_position(element.position())
                .with_label(self.span(element.position()), ErrorCode::E203.description()),
            );
        }
    }
}

/// Run every validation pass over `automaton`.
///
/// Jump point completion may add successor links.
pub(crate) fn validate(
    automaton: &mut Automaton,
    tokens: &[PositionedToken],
    diagnostics: &mut DiagnosticCollector,
) {
    Validator {
        tokens,
        automaton,
        diagnostics,
    }
    .run();
    debug!(has_errors = diagnostics.has_errors(); "Validated element graph");
}

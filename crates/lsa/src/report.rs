//! Text reports for the console.
//!
//! The layout of these strings is for reading, not parsing.

use std::{fmt::Write, ops::ControlFlow};

use lsa_core::UsageError;

use crate::scheme::Scheme;

impl Scheme {
    /// One line per token: its position, text and kind.
    pub fn get_tokens(&self) -> String {
        let mut out = String::new();
        let automaton = self.automaton();
        for (position, text) in automaton.tokens().iter().enumerate() {
            let kind = automaton
                .element_at(position)
                .map_or("-", |element| automaton.element(element).kind().name());
            let _ = writeln!(out, "{position:>4}  {text:<6} {kind}");
        }
        out
    }

    /// Every distinct loop with the condition vectors that produce it.
    pub fn get_all_loops(&mut self) -> Result<String, UsageError> {
        let report = self.find_all_possible_loops()?;
        let mut out = String::new();
        if report.loop_count() == 0 {
            let _ = writeln!(
                out,
                "no loops in {} assignment(s)",
                report.assignments()
            );
            return Ok(out);
        }

        let _ = writeln!(
            out,
            "{} loop(s) in {} assignment(s)",
            report.loop_count(),
            report.assignments()
        );
        for (number, (found, vectors)) in report.loops().enumerate() {
            let _ = writeln!(out, "loop {}: {found}", number + 1);
            let vectors: Vec<String> = vectors.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "  conditions: {}", vectors.join(", "));
        }
        Ok(out)
    }

    /// The path and outcome of every assignment.
    pub fn get_results(&mut self) -> Result<String, UsageError> {
        let mut out = String::new();
        self.for_each_assignment(|vector, trace| {
            let vector = if vector.is_empty() {
                "-".to_string()
            } else {
                vector.to_string()
            };
            let _ = writeln!(out, "{vector}: {trace} ({})", trace.outcome());
            ControlFlow::Continue(())
        })?;
        Ok(out)
    }
}

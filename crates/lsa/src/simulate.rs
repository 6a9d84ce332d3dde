//! Deterministic execution of a scheme.
//!
//! A run walks from the start element along [`Automaton::get_next`] and
//! records every visited element. With all conditions fixed the walk is
//! deterministic, so revisiting an element means the run is caught in a
//! cycle and it stops there.

use std::{collections::HashSet, fmt, io};

use log::{debug, trace};

use lsa_core::{
    Automaton, UsageError,
    element::{Element, ElementRef},
};

use crate::error::LsaError;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    /// The end element was reached.
    Completed,
    /// An element was visited twice.
    LoopDetected,
    /// An element had no successor.
    DeadEnd,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Completed => write!(f, "completed"),
            RunOutcome::LoopDetected => write!(f, "loop detected"),
            RunOutcome::DeadEnd => write!(f, "dead end"),
        }
    }
}

/// Record of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTrace {
    path: Vec<ElementRef>,
    steps: Vec<String>,
    verbose: bool,
    outcome: RunOutcome,
}

impl RunTrace {
    fn new(verbose: bool) -> Self {
        Self {
            path: Vec::new(),
            steps: Vec::new(),
            verbose,
            outcome: RunOutcome::DeadEnd,
        }
    }

    /// Visited elements in order. On a loop the repeated element is last.
    pub fn path(&self) -> &[ElementRef] {
        &self.path
    }

    /// One rendered step per visited element: its description when verbose,
    /// its id otherwise.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    /// Append `element`; returns the outcome if the run stops here.
    fn visit(
        &mut self,
        automaton: &Automaton,
        element: ElementRef,
        visited: &mut HashSet<ElementRef>,
    ) -> Option<RunOutcome> {
        let current = automaton.element(element);
        trace!(id:% = current.id(), position = current.position(); "Visiting element");
        self.path.push(element);
        self.steps.push(if self.verbose {
            current.description()
        } else {
            current.id().to_string()
        });

        if !visited.insert(element) {
            Some(RunOutcome::LoopDetected)
        } else if current.is_end() {
            Some(RunOutcome::Completed)
        } else {
            None
        }
    }

    fn finish(mut self, outcome: RunOutcome) -> Self {
        debug!(steps = self.path.len(), outcome:% = outcome; "Run finished");
        self.outcome = outcome;
        self
    }
}

impl fmt::Display for RunTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.verbose { "\n" } else { " " };
        write!(f, "{}", self.steps.join(separator))
    }
}

/// Supplies condition values while a run is in progress.
///
/// A value is requested the first time each conditional vertex is reached.
pub trait ConditionOracle {
    fn decide(&mut self, vertex: &Element) -> io::Result<bool>;
}

impl<F> ConditionOracle for F
where
    F: FnMut(&Element) -> io::Result<bool>,
{
    fn decide(&mut self, vertex: &Element) -> io::Result<bool> {
        self(vertex)
    }
}

/// Run with the condition values currently assigned.
///
/// # Errors
///
/// Returns [`UsageError::UndeterminedCondition`] when the walk reaches a
/// conditional vertex without a value.
pub(crate) fn run(automaton: &Automaton, verbose: bool) -> Result<RunTrace, UsageError> {
    let mut trace = RunTrace::new(verbose);
    let mut visited = HashSet::new();
    let Some(mut current) = automaton.start() else {
        return Ok(trace.finish(RunOutcome::DeadEnd));
    };

    loop {
        if let Some(outcome) = trace.visit(automaton, current, &mut visited) {
            return Ok(trace.finish(outcome));
        }
        match automaton.get_next(current)? {
            Some(next) => current = next,
            None => return Ok(trace.finish(RunOutcome::DeadEnd)),
        }
    }
}

/// Run from clean conditions, asking `oracle` for each undetermined vertex.
pub(crate) fn run_interactive(
    automaton: &mut Automaton,
    oracle: &mut dyn ConditionOracle,
    verbose: bool,
) -> Result<RunTrace, LsaError> {
    automaton.reset_conditions();

    let mut trace = RunTrace::new(verbose);
    let mut visited = HashSet::new();
    let Some(mut current) = automaton.start() else {
        return Ok(trace.finish(RunOutcome::DeadEnd));
    };

    loop {
        if let Some(outcome) = trace.visit(automaton, current, &mut visited) {
            return Ok(trace.finish(outcome));
        }

        let element = automaton.element(current);
        let pending = element
            .as_conditional()
            .filter(|conditional| !conditional.value().is_determined())
            .map(|conditional| conditional.index());
        if let Some(index) = pending {
            let value = oracle.decide(element)?;
            automaton.set_condition(index, value)?;
        }

        match automaton.get_next(current)? {
            Some(next) => current = next,
            None => return Ok(trace.finish(RunOutcome::DeadEnd)),
        }
    }
}

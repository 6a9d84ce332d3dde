//! A parsed scheme ready for execution and analysis.

use std::ops::ControlFlow;

use log::{debug, info};

use lsa_core::{
    Automaton, UsageError,
    condition::ConditionVector,
    element::ElementRef,
    matrix::MatrixSchemaBuilder,
};
use lsa_parser::{PositionedToken, error::Diagnostic};

use crate::{
    error::LsaError,
    loops::{Loop, LoopReport, loops_in_path},
    simulate::{self, ConditionOracle, RunTrace},
    structure::SchemeGraph,
};

/// Enumeration needs one mask bit per conditional vertex.
const MASK_BITS: usize = u64::BITS as usize;

/// A validated scheme with its tokens and parse warnings.
///
/// Condition values live inside the scheme, so every operation that assigns
/// them takes `&mut self`.
#[derive(Debug, Clone)]
pub struct Scheme {
    automaton: Automaton,
    tokens: Vec<PositionedToken>,
    warnings: Vec<Diagnostic>,
    max_conditionals: usize,
}

impl Scheme {
    pub(crate) fn new(
        automaton: Automaton,
        tokens: Vec<PositionedToken>,
        warnings: Vec<Diagnostic>,
        max_conditionals: usize,
    ) -> Self {
        Self {
            automaton,
            tokens,
            warnings,
            max_conditionals,
        }
    }

    pub(crate) fn set_warnings(&mut self, warnings: Vec<Diagnostic>) {
        self.warnings = warnings;
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Tokens of the normalized text.
    pub fn tokens(&self) -> &[PositionedToken] {
        &self.tokens
    }

    /// Warnings produced while parsing.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn conditional_count(&self) -> usize {
        self.automaton.conditional_count()
    }

    /// Run with the condition values currently assigned.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::UndeterminedCondition`] if the walk reaches a
    /// conditional vertex without a value.
    pub fn run(&self, verbose: bool) -> Result<RunTrace, UsageError> {
        simulate::run(&self.automaton, verbose)
    }

    /// Assign all conditions from `bits`, then run.
    ///
    /// A malformed vector leaves every condition unchanged.
    pub fn run_with(&mut self, bits: &str, verbose: bool) -> Result<RunTrace, UsageError> {
        self.automaton.set_conditions_from_binary(bits)?;
        self.run(verbose)
    }

    /// Run from clean conditions, asking `oracle` at each undetermined vertex.
    pub fn run_interactive(
        &mut self,
        oracle: &mut dyn ConditionOracle,
        verbose: bool,
    ) -> Result<RunTrace, LsaError> {
        simulate::run_interactive(&mut self.automaton, oracle, verbose)
    }

    pub fn reset_conditions(&mut self) {
        self.automaton.reset_conditions();
    }

    /// Hand the graph to a matrix-schema builder with all conditions reset.
    pub fn matrix_schema<B: MatrixSchemaBuilder>(&mut self, builder: &B) -> B::Schema {
        self.automaton.matrix_schema(builder)
    }

    /// Loops on the path taken under `bits`.
    pub fn detect_loops_for_conditions(&mut self, bits: &str) -> Result<Vec<Loop>, UsageError> {
        let trace = self.run_with(bits, false)?;
        Ok(loops_in_path(&self.automaton, trace.path()))
    }

    /// Run every assignment of the conditions in ascending order.
    ///
    /// `visit` receives each vector with its run and may stop the
    /// enumeration early by returning [`ControlFlow::Break`]. Conditions are
    /// reset afterwards.
    ///
    /// # Returns
    ///
    /// The number of assignments run.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::TooManyConditionals`] when the scheme has more
    /// conditional vertices than the configured limit.
    pub fn for_each_assignment<F>(&mut self, mut visit: F) -> Result<usize, UsageError>
    where
        F: FnMut(&ConditionVector, &RunTrace) -> ControlFlow<()>,
    {
        let count = self.conditional_count();
        let limit = self.max_conditionals.min(MASK_BITS - 1);
        if count > limit {
            return Err(UsageError::TooManyConditionals { count, limit });
        }

        let total = 1u64 << count;
        debug!(conditionals = count, assignments = total; "Enumerating assignments");

        let mut examined = 0;
        let mut outcome = Ok(());
        for mask in 0..total {
            let vector = ConditionVector::from_mask(mask, count);
            self.automaton.apply_conditions(&vector);
            let trace = match self.run(false) {
                Ok(trace) => trace,
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            };
            examined += 1;
            if visit(&vector, &trace).is_break() {
                debug!(examined; "Enumeration stopped early");
                break;
            }
        }

        self.automaton.reset_conditions();
        outcome.map(|()| examined)
    }

    /// Loops reachable under any assignment, with the vectors leading to each.
    pub fn find_all_possible_loops(&mut self) -> Result<LoopReport, UsageError> {
        // Loop canonicalization only reads the structure, which runs never change
        let structure = self.automaton.clone();
        let mut report = LoopReport::default();
        self.for_each_assignment(|vector, trace| {
            report.record(vector, loops_in_path(&structure, trace.path()));
            ControlFlow::Continue(())
        })?;

        info!(
            assignments = report.assignments(),
            loops = report.loop_count();
            "Loop analysis finished"
        );
        Ok(report)
    }

    /// Elements that no assignment of conditions can reach from the start.
    pub fn unreachable(&self) -> Vec<ElementRef> {
        match self.automaton.start() {
            Some(start) => SchemeGraph::from_automaton(&self.automaton).unreachable_from(start),
            None => Vec::new(),
        }
    }
}

//! Property tests for execution and enumeration.

use std::ops::ControlFlow;

use proptest::prelude::*;

use lsa::SchemeBuilder;

/// Three conditionals, two of them nested.
const NESTED: &str = "Yн X1 ↑1 Y1 X2 ↑2 Y2 w↑3 ↓1 Y3 ↓2 X3 ↑3 Y4 ↓3 Yк";

/// `count` conditionals in sequence, each skipping one operator.
fn sequential(count: usize) -> String {
    let mut source = String::from("Yн");
    for i in 1..=count {
        source.push_str(&format!(" X{i} ↑{i} Y{i} ↓{i}"));
    }
    source.push_str(" Yк");
    source
}

fn bits(values: &[bool]) -> String {
    values.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}

proptest! {
    #[test]
    fn run_is_deterministic(values in prop::collection::vec(any::<bool>(), 3)) {
        let bits = bits(&values);
        let mut scheme = SchemeBuilder::default().parse(NESTED).unwrap();

        let first = scheme.run_with(&bits, false).unwrap();
        let second = scheme.run_with(&bits, false).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reset_then_run_matches_fresh_parse(
        earlier in prop::collection::vec(any::<bool>(), 3),
        values in prop::collection::vec(any::<bool>(), 3),
    ) {
        let mut reused = SchemeBuilder::default().parse(NESTED).unwrap();
        reused.run_with(&bits(&earlier), false).unwrap();
        reused.reset_conditions();

        let mut fresh = SchemeBuilder::default().parse(NESTED).unwrap();
        prop_assert_eq!(
            reused.run_with(&bits(&values), false).unwrap(),
            fresh.run_with(&bits(&values), false).unwrap()
        );
    }

    #[test]
    fn reset_is_idempotent(values in prop::collection::vec(any::<bool>(), 3)) {
        let mut scheme = SchemeBuilder::default().parse(NESTED).unwrap();
        scheme.run_with(&bits(&values), false).unwrap();

        scheme.reset_conditions();
        let once = scheme.automaton().clone();
        scheme.reset_conditions();
        prop_assert_eq!(scheme.automaton().elements(), once.elements());
    }

    #[test]
    fn enumeration_runs_every_assignment(count in 0usize..7) {
        let mut scheme = SchemeBuilder::default().parse(&sequential(count)).unwrap();
        prop_assert_eq!(scheme.conditional_count(), count);

        let mut vectors = Vec::new();
        let examined = scheme
            .for_each_assignment(|vector, trace| {
                vectors.push((vector.to_string(), trace.outcome()));
                ControlFlow::Continue(())
            })
            .unwrap();

        prop_assert_eq!(examined, 1 << count);
        prop_assert_eq!(vectors.len(), 1 << count);
        vectors.dedup();
        prop_assert_eq!(vectors.len(), 1 << count);
        prop_assert!(vectors.iter().all(|(_, outcome)| *outcome == lsa::RunOutcome::Completed));
    }
}

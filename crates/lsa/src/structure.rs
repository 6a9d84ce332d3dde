//! Transition graph of a scheme.
//!
//! The element arena only stores the links needed for execution. This module
//! mirrors every possible transition into a [`petgraph`] graph so structural
//! questions such as reachability can use standard graph traversals.

use std::collections::HashSet;

use log::{debug, trace};
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::{Dfs, EdgeRef},
};

use lsa_core::{
    Automaton,
    element::{ElementKind, ElementRef},
};

/// Kind of a transition between two elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Fall-through to `next`
    Next,
    /// Conditional vertex evaluated to true
    WhenTrue,
    /// Conditional vertex evaluated to false
    WhenFalse,
    /// Jump operator to its jump point
    Jump,
}

/// Every transition of a scheme, independent of condition values.
#[derive(Debug)]
pub struct SchemeGraph {
    graph: DiGraph<ElementRef, Transition>,
}

impl SchemeGraph {
    /// Builds the graph; node indices coincide with element handles.
    pub fn from_automaton(automaton: &Automaton) -> Self {
        let mut graph = DiGraph::with_capacity(automaton.elements().len(), 0);
        for element in automaton.element_refs() {
            graph.add_node(element);
        }

        let node = |element: ElementRef| NodeIndex::new(element.index());
        for element in automaton.element_refs() {
            let current = automaton.element(element);
            if let Some(next) = current.next() {
                graph.add_edge(node(element), node(next), Transition::Next);
            }
            match current.kind() {
                ElementKind::Conditional(conditional) => {
                    if let Some(lbs) = conditional.lbs() {
                        graph.add_edge(node(element), node(lbs), Transition::WhenTrue);
                    }
                    if let Some(rbs) = conditional.rbs() {
                        graph.add_edge(node(element), node(rbs), Transition::WhenFalse);
                    }
                }
                ElementKind::JumpOperator { jump_index, .. } => {
                    if let Some(target) = automaton.jump_point(*jump_index) {
                        graph.add_edge(node(element), node(target), Transition::Jump);
                    }
                }
                _ => {}
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Built transition graph"
        );
        Self { graph }
    }

    /// All transitions leaving `element`.
    pub fn transitions(
        &self,
        element: ElementRef,
    ) -> impl Iterator<Item = (Transition, ElementRef)> + '_ {
        self.graph
            .edges(NodeIndex::new(element.index()))
            .map(|edge| (*edge.weight(), self.graph[edge.target()]))
    }

    /// Elements reachable from `from` under some assignment of conditions.
    pub fn reachable_from(&self, from: ElementRef) -> HashSet<ElementRef> {
        let mut reached = HashSet::new();
        let mut dfs = Dfs::new(&self.graph, NodeIndex::new(from.index()));
        while let Some(node) = dfs.next(&self.graph) {
            reached.insert(self.graph[node]);
        }
        reached
    }

    /// Elements that no path from `start` reaches, in token order.
    pub fn unreachable_from(&self, start: ElementRef) -> Vec<ElementRef> {
        let reached = self.reachable_from(start);
        let unreachable: Vec<_> = self
            .graph
            .node_weights()
            .copied()
            .filter(|element| !reached.contains(element))
            .collect();
        trace!(count = unreachable.len(); "Computed unreachable elements");
        unreachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(source: &str) -> (Automaton, SchemeGraph) {
        let automaton = lsa_parser::parse(source).unwrap().automaton;
        let graph = SchemeGraph::from_automaton(&automaton);
        (automaton, graph)
    }

    #[test]
    fn test_all_elements_reachable_in_scenario() {
        let (automaton, graph) = graph("Yн X0 (↑1 | Y0 w↑2) ↓1 Y1 ↓2 Yк");
        let start = automaton.start().unwrap();

        assert!(graph.unreachable_from(start).is_empty());
        assert_eq!(graph.reachable_from(start).len(), automaton.elements().len());
    }

    #[test]
    fn test_code_after_unconditional_jump_is_unreachable() {
        let (automaton, graph) = graph("Yн Y1 w↑1 Y2 ↓1 Yк");
        let start = automaton.start().unwrap();

        let unreachable = graph.unreachable_from(start);
        assert_eq!(unreachable.len(), 1);
        assert_eq!(automaton.element(unreachable[0]).id(), "Y2");
    }

    #[test]
    fn test_conditional_transitions() {
        let (automaton, graph) = graph("Yн X1 ↑1 Y1 ↓1 Yк");
        let vertex = automaton.conditionals()[0];

        let mut kinds: Vec<_> = graph
            .transitions(vertex)
            .map(|(transition, target)| (transition, automaton.element(target).id().to_string()))
            .collect();
        kinds.sort_by_key(|(_, id)| id.clone());
        assert_eq!(
            kinds,
            vec![
                (Transition::WhenFalse, "Y1".to_string()),
                (Transition::WhenTrue, "↑1".to_string()),
            ]
        );
    }
}

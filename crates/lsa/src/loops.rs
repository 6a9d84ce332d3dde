//! Loop detection over run paths.
//!
//! A loop is a stretch of a path that starts and ends on the same element.
//! Loops are canonicalized by rotation so that the same cycle entered at
//! different offsets compares equal.

use std::fmt;

use indexmap::IndexMap;
use log::trace;

use lsa_core::{
    Automaton,
    condition::ConditionVector,
    element::{ElementKind, ElementRef},
    identifier::Id,
};

/// A cycle of elements in canonical rotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Loop {
    elements: Vec<ElementRef>,
    ids: Vec<Id>,
}

impl Loop {
    /// Elements of the cycle, starting at its entry.
    pub fn elements(&self) -> &[ElementRef] {
        &self.elements
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

/// Finds every repeated span of `path` and returns the distinct loops.
///
/// Each `i` is paired with the nearest `j > i` where `path[i] == path[j]`,
/// so the cycle `path[i..j]` covers exactly one lap.
pub fn loops_in_path(automaton: &Automaton, path: &[ElementRef]) -> Vec<Loop> {
    let mut loops: IndexMap<Vec<ElementRef>, Loop> = IndexMap::new();
    for i in 0..path.len() {
        let Some(offset) = path[i + 1..].iter().position(|&element| element == path[i]) else {
            continue;
        };
        let j = i + 1 + offset;
        let cycle = canonical_rotation(automaton, &path[i..j]);
        trace!(start = i, end = j, length = cycle.len(); "Found repeated span");
        loops.entry(cycle.clone()).or_insert_with(|| Loop {
            ids: cycle
                .iter()
                .map(|&element| automaton.element(element).id())
                .collect(),
            elements: cycle,
        });
    }
    loops.into_values().collect()
}

/// Rotate `cycle` to begin at its entry.
///
/// The entry is where a jump back into the cycle lands: the successor of a
/// jump point targeted by a jump operator in the cycle, or a jump point the
/// cycle falls through. Among several candidates the one earliest in the
/// text wins. Without any candidate the earliest element is used.
fn canonical_rotation(automaton: &Automaton, cycle: &[ElementRef]) -> Vec<ElementRef> {
    let position = |element: &ElementRef| automaton.element(*element).position();

    let entries = cycle.iter().filter_map(|&element| {
        let entry = match automaton.element(element).kind() {
            ElementKind::JumpOperator { jump_index, .. } => automaton
                .jump_point(*jump_index)
                .and_then(|point| automaton.element(point).next()),
            ElementKind::JumpPoint { .. } => Some(element),
            _ => None,
        };
        entry.filter(|entry| cycle.contains(entry))
    });

    let entry = entries
        .min_by_key(position)
        .or_else(|| cycle.iter().copied().min_by_key(position));
    let offset = entry
        .and_then(|entry| cycle.iter().position(|&element| element == entry))
        .unwrap_or(0);

    let mut rotated = cycle.to_vec();
    rotated.rotate_left(offset);
    rotated
}

/// Loops found over a full enumeration, with the assignments producing each.
#[derive(Debug, Clone, Default)]
pub struct LoopReport {
    assignments: usize,
    loops: IndexMap<Loop, Vec<ConditionVector>>,
}

impl LoopReport {
    pub(crate) fn record(&mut self, vector: &ConditionVector, loops: Vec<Loop>) {
        self.assignments += 1;
        for found in loops {
            self.loops.entry(found).or_default().push(vector.clone());
        }
    }

    /// Number of condition assignments examined.
    pub fn assignments(&self) -> usize {
        self.assignments
    }

    /// Distinct loops in discovery order, each with its assignments.
    pub fn loops(&self) -> impl Iterator<Item = (&Loop, &[ConditionVector])> {
        self.loops
            .iter()
            .map(|(found, vectors)| (found, vectors.as_slice()))
    }

    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn automaton(source: &str) -> Automaton {
        lsa_parser::parse(source).unwrap().automaton
    }

    #[test]
    fn test_rotation_starts_at_jump_entry() {
        let automaton = automaton("Yн ↓1 Y1 X1 ↑2 w↑1 ↓2 Yк");
        let at = |position| automaton.element_at(position).unwrap();
        let (y1, x1, jump) = (at(2), at(3), at(5));

        // The same cycle seen from a different offset
        let rotated = canonical_rotation(&automaton, &[x1, jump, y1]);
        assert_eq!(rotated, vec![y1, x1, jump]);
    }

    #[test]
    fn test_loops_in_path_deduplicates() {
        let automaton = automaton("Yн ↓1 Y1 X1 ↑2 w↑1 ↓2 Yк");
        let at = |position| automaton.element_at(position).unwrap();
        let (start, point, y1, x1, jump) = (at(0), at(1), at(2), at(3), at(5));

        let path = [start, point, y1, x1, jump, y1, x1, jump, y1];
        let loops = loops_in_path(&automaton, &path);

        // Two laps still give one single-lap loop
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 3);
        assert_eq!(loops[0].to_string(), "Y1 X1 w↑1");
    }

    #[test]
    fn test_path_without_repeats_has_no_loops() {
        let automaton = automaton("Yн Y1 Yк");
        let path: Vec<_> = automaton.element_refs().collect();
        assert!(loops_in_path(&automaton, &path).is_empty());
    }
}

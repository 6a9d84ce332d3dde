//! The automaton: element arena, jump-point registry and condition state.
//!
//! An [`Automaton`] is assembled once by the parser through the construction
//! methods ([`add_element`](Automaton::add_element),
//! [`link`](Automaton::link), [`register_jump_point`](Automaton::register_jump_point),
//! [`set_branches`](Automaton::set_branches)) and is structurally frozen
//! afterwards. The values of conditional vertices are the only state that
//! changes between runs.

use indexmap::IndexMap;
use log::trace;

use crate::{
    condition::ConditionVector,
    element::{ConditionValue, Element, ElementKind, ElementRef},
    error::UsageError,
    identifier::Id,
    matrix::{MatrixSchemaBuilder, SchemeView},
};

/// Outcome of [`Automaton::link`] when the source already has a successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConflict {
    /// The successor that was already recorded.
    pub existing: ElementRef,
}

/// Parsed logical scheme of an algorithm.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    tokens: Vec<String>,
    elements: Vec<Element>,
    jump_points: IndexMap<u32, ElementRef>,
    logical_schema: String,
}

impl Automaton {
    /// Creates an empty automaton for the given token texts and normalized source.
    pub fn new(tokens: Vec<String>, logical_schema: impl Into<String>) -> Self {
        Self {
            tokens,
            elements: Vec::new(),
            jump_points: IndexMap::new(),
            logical_schema: logical_schema.into(),
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Appends an element to the arena and returns its handle.
    pub fn add_element(&mut self, id: Id, kind: ElementKind, position: usize) -> ElementRef {
        let element_ref = ElementRef::new(self.elements.len());
        trace!(id:% = id, kind = kind.name(), position; "Adding element");
        self.elements.push(Element::new(id, kind, position));
        element_ref
    }

    /// Sets `to` as the successor of `from`.
    ///
    /// Re-linking to the same successor is accepted, so convergent paths that
    /// agree are harmless.
    ///
    /// # Errors
    ///
    /// Returns the existing successor if `from` already points elsewhere.
    pub fn link(&mut self, from: ElementRef, to: ElementRef) -> Result<(), LinkConflict> {
        let element = &mut self.elements[from.index()];
        match element.next() {
            Some(existing) if existing != to => Err(LinkConflict { existing }),
            Some(_) => Ok(()),
            None => {
                element.set_next(to);
                Ok(())
            }
        }
    }

    /// Registers `element` as the target of jump index `jump_index`.
    ///
    /// # Errors
    ///
    /// Returns the previously registered jump point if the index is taken;
    /// the registry keeps the first declaration.
    pub fn register_jump_point(
        &mut self,
        jump_index: u32,
        element: ElementRef,
    ) -> Result<(), ElementRef> {
        match self.jump_points.get(&jump_index) {
            Some(existing) => Err(*existing),
            None => {
                self.jump_points.insert(jump_index, element);
                Ok(())
            }
        }
    }

    /// Sets the branches of a conditional vertex. `None` leaves a branch unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `conditional` is not a conditional vertex.
    pub fn set_branches(
        &mut self,
        conditional: ElementRef,
        lbs: Option<ElementRef>,
        rbs: Option<ElementRef>,
    ) {
        let vertex = self.elements[conditional.index()]
            .as_conditional_mut()
            .expect("branches can only be set on conditional vertices");
        if let Some(lbs) = lbs {
            vertex.set_lbs(lbs);
        }
        if let Some(rbs) = rbs {
            vertex.set_rbs(rbs);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Raw token texts in source order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// All elements in creation order, which matches token order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, element: ElementRef) -> &Element {
        &self.elements[element.index()]
    }

    /// Handles of all elements in arena order.
    pub fn element_refs(&self) -> impl Iterator<Item = ElementRef> + '_ {
        (0..self.elements.len()).map(ElementRef::new)
    }

    /// Jump index → declaring jump point, in declaration order.
    pub fn jump_points(&self) -> &IndexMap<u32, ElementRef> {
        &self.jump_points
    }

    pub fn jump_point(&self, jump_index: u32) -> Option<ElementRef> {
        self.jump_points.get(&jump_index).copied()
    }

    /// The normalized source the automaton was parsed from.
    pub fn logical_schema(&self) -> &str {
        &self.logical_schema
    }

    /// The start element. The parser always creates it first.
    pub fn start(&self) -> Option<ElementRef> {
        self.find(Element::is_start)
    }

    /// The first end element.
    pub fn end(&self) -> Option<ElementRef> {
        self.find(Element::is_end)
    }

    /// Finds the element recognized at token `position`.
    pub fn element_at(&self, position: usize) -> Option<ElementRef> {
        self.find(|element| element.position() == position)
    }

    /// Conditional vertices ordered by ascending vertex index.
    pub fn conditionals(&self) -> Vec<ElementRef> {
        let mut conditionals: Vec<_> = self
            .element_refs()
            .filter_map(|element| {
                self.element(element)
                    .as_conditional()
                    .map(|conditional| (conditional.index(), element))
            })
            .collect();
        conditionals.sort_by_key(|(index, _)| *index);
        conditionals.into_iter().map(|(_, element)| element).collect()
    }

    pub fn conditional_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| element.as_conditional().is_some())
            .count()
    }

    fn find(&self, predicate: impl Fn(&Element) -> bool) -> Option<ElementRef> {
        self.elements
            .iter()
            .position(predicate)
            .map(ElementRef::new)
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Returns the element control moves to after `element`.
    ///
    /// - start, operator and jump point: their `next`
    /// - conditional: `lbs` when true, `rbs` when false
    /// - jump operator: the `next` of the jump point it targets
    /// - end: nothing
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::UndeterminedCondition`] for a conditional whose
    /// value has not been assigned.
    pub fn get_next(&self, element: ElementRef) -> Result<Option<ElementRef>, UsageError> {
        let current = self.element(element);
        let next = match current.kind() {
            ElementKind::Start | ElementKind::Operator | ElementKind::JumpPoint { .. } => {
                current.next()
            }
            ElementKind::End => None,
            ElementKind::Conditional(conditional) => match conditional.value() {
                ConditionValue::True => conditional.lbs(),
                ConditionValue::False => conditional.rbs(),
                ConditionValue::Undetermined => {
                    return Err(UsageError::UndeterminedCondition { id: current.id() });
                }
            },
            ElementKind::JumpOperator { jump_index, .. } => self
                .jump_point(*jump_index)
                .and_then(|target| self.element(target).next()),
        };
        Ok(next)
    }

    // =========================================================================
    // Condition state
    // =========================================================================

    /// Assigns every conditional from a `0`/`1` string ordered by vertex index.
    ///
    /// The string is validated completely before any value changes.
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] on a wrong length or a character other than
    /// `0`/`1`.
    pub fn set_conditions_from_binary(&mut self, bits: &str) -> Result<(), UsageError> {
        let vector = ConditionVector::parse(bits, self.conditional_count())?;
        self.apply_conditions(&vector);
        Ok(())
    }

    /// Assigns every conditional from an already validated vector.
    ///
    /// # Panics
    ///
    /// Panics if the vector length differs from the conditional count.
    pub fn apply_conditions(&mut self, vector: &ConditionVector) {
        assert_eq!(
            vector.len(),
            self.conditional_count(),
            "condition vector length must match the conditional count"
        );
        for element in &mut self.elements {
            if let Some(conditional) = element.as_conditional_mut() {
                let value = vector
                    .get(conditional.index())
                    .expect("conditional indices are contiguous from 1");
                conditional.set_value(value.into());
            }
        }
    }

    /// Assigns a single conditional by its 1-based vertex index.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::UnknownConditional`] if no vertex has that index.
    pub fn set_condition(&mut self, index: usize, value: bool) -> Result<(), UsageError> {
        self.elements
            .iter_mut()
            .filter_map(Element::as_conditional_mut)
            .find(|conditional| conditional.index() == index)
            .map(|conditional| conditional.set_value(value.into()))
            .ok_or(UsageError::UnknownConditional(index))
    }

    /// Sets every conditional back to undetermined.
    pub fn reset_conditions(&mut self) {
        for conditional in self.elements.iter_mut().filter_map(Element::as_conditional_mut) {
            conditional.set_value(ConditionValue::Undetermined);
        }
    }

    /// Builds a matrix schema from the graph.
    ///
    /// Conditions are reset first, so the builder always sees a clean graph.
    pub fn matrix_schema<B: MatrixSchemaBuilder>(&mut self, builder: &B) -> B::Schema {
        self.reset_conditions();
        builder.build(SchemeView::new(&self.elements, &self.jump_points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Conditional;

    /// Hand-built `Yн X1 ↑1 Y1 ↓1 Yк` with the right branch falling into ↓1.
    fn small_automaton() -> Automaton {
        let mut automaton = Automaton::new(
            ["Yн", "X1", "↑1", "Y1", "↓1", "Yк"]
                .map(String::from)
                .to_vec(),
            "Yн X1 ↑1 Y1 ↓1 Yк",
        );
        let start = automaton.add_element(Id::new("Yн"), ElementKind::Start, 0);
        let cond = automaton.add_element(
            Id::new("X1"),
            ElementKind::Conditional(Conditional::new(1)),
            1,
        );
        let jump = automaton.add_element(
            Id::new("↑1"),
            ElementKind::JumpOperator {
                jump_index: 1,
                is_unconditional: false,
            },
            2,
        );
        let op = automaton.add_element(Id::new("Y1"), ElementKind::Operator, 3);
        let point = automaton.add_element(Id::new("↓1"), ElementKind::JumpPoint { jump_index: 1 }, 4);
        let end = automaton.add_element(Id::new("Yк"), ElementKind::End, 5);

        automaton.link(start, cond).unwrap();
        automaton.set_branches(cond, Some(jump), Some(op));
        automaton.link(op, point).unwrap();
        automaton.link(point, end).unwrap();
        automaton.register_jump_point(1, point).unwrap();
        automaton
    }

    #[test]
    fn test_link_conflict() {
        let mut automaton = small_automaton();
        let start = automaton.start().unwrap();
        let end = automaton.end().unwrap();
        let cond = ElementRef::new(1);

        assert!(automaton.link(start, cond).is_ok());
        assert_eq!(
            automaton.link(start, end),
            Err(LinkConflict { existing: cond })
        );
    }

    #[test]
    fn test_duplicate_jump_point_keeps_first() {
        let mut automaton = small_automaton();
        let other = ElementRef::new(3);
        assert_eq!(
            automaton.register_jump_point(1, other),
            Err(ElementRef::new(4))
        );
        assert_eq!(automaton.jump_point(1), Some(ElementRef::new(4)));
    }

    #[test]
    fn test_get_next_undetermined_conditional() {
        let automaton = small_automaton();
        let cond = ElementRef::new(1);
        assert_eq!(
            automaton.get_next(cond),
            Err(UsageError::UndeterminedCondition { id: Id::new("X1") })
        );
    }

    #[test]
    fn test_get_next_follows_branches_and_jumps() {
        let mut automaton = small_automaton();
        let cond = ElementRef::new(1);

        automaton.set_conditions_from_binary("1").unwrap();
        assert_eq!(automaton.get_next(cond), Ok(Some(ElementRef::new(2))));
        // The jump operator resolves to the jump point's successor
        assert_eq!(
            automaton.get_next(ElementRef::new(2)),
            Ok(Some(ElementRef::new(5)))
        );

        automaton.set_conditions_from_binary("0").unwrap();
        assert_eq!(automaton.get_next(cond), Ok(Some(ElementRef::new(3))));
        assert_eq!(automaton.get_next(ElementRef::new(5)), Ok(None));
    }

    #[test]
    fn test_bad_vector_leaves_values_untouched() {
        let mut automaton = small_automaton();
        automaton.set_conditions_from_binary("1").unwrap();

        assert!(automaton.set_conditions_from_binary("10").is_err());
        assert!(automaton.set_conditions_from_binary("2").is_err());

        let cond = automaton.element(ElementRef::new(1)).as_conditional().unwrap();
        assert_eq!(cond.value(), ConditionValue::True);
    }

    #[test]
    fn test_reset_and_set_single_condition() {
        let mut automaton = small_automaton();
        automaton.set_condition(1, false).unwrap();
        assert_eq!(
            automaton.set_condition(2, true),
            Err(UsageError::UnknownConditional(2))
        );

        automaton.reset_conditions();
        automaton.reset_conditions();
        let cond = automaton.element(ElementRef::new(1)).as_conditional().unwrap();
        assert_eq!(cond.value(), ConditionValue::Undetermined);
    }

    #[test]
    fn test_lookup_helpers() {
        let automaton = small_automaton();
        assert_eq!(automaton.conditional_count(), 1);
        assert_eq!(automaton.conditionals(), vec![ElementRef::new(1)]);
        assert_eq!(automaton.element_at(4), Some(ElementRef::new(4)));
        assert_eq!(automaton.tokens().len(), 6);
        assert_eq!(automaton.logical_schema(), "Yн X1 ↑1 Y1 ↓1 Yк");
    }
}

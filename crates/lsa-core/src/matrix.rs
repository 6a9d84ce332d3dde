//! Contract for matrix-schema builders.
//!
//! Matrix schemas are computed by an external algebra that only reads the
//! graph. [`Automaton::matrix_schema`](crate::automaton::Automaton::matrix_schema)
//! resets every condition before handing out a [`SchemeView`].

use indexmap::IndexMap;

use crate::element::{Element, ElementRef};

/// Read-only view of a scheme graph with all conditions undetermined.
#[derive(Debug, Clone, Copy)]
pub struct SchemeView<'a> {
    elements: &'a [Element],
    jump_points: &'a IndexMap<u32, ElementRef>,
}

impl<'a> SchemeView<'a> {
    pub(crate) fn new(elements: &'a [Element], jump_points: &'a IndexMap<u32, ElementRef>) -> Self {
        Self {
            elements,
            jump_points,
        }
    }

    /// All elements in token order.
    pub fn elements(&self) -> &'a [Element] {
        self.elements
    }

    /// Jump index → declaring jump point.
    pub fn jump_points(&self) -> &'a IndexMap<u32, ElementRef> {
        self.jump_points
    }

    pub fn element(&self, element: ElementRef) -> &'a Element {
        &self.elements[element.index()]
    }
}

/// Builds a matrix schema from a scheme graph.
pub trait MatrixSchemaBuilder {
    /// The schema representation produced by this builder.
    type Schema;

    fn build(&self, scheme: SchemeView<'_>) -> Self::Schema;
}

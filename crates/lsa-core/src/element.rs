//! Graph elements of a logical scheme.
//!
//! Every element lives in the [`Automaton`](crate::automaton::Automaton)
//! arena and is addressed by an [`ElementRef`]. Successor links are plain
//! handles into the same arena, so back edges and convergent merges need no
//! shared ownership.

use std::fmt;

use crate::identifier::Id;

/// Handle to an element in the automaton arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(usize);

impl ElementRef {
    /// Creates a handle for the arena slot `index`.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena slot this handle points at.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tri-state value of a conditional vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConditionValue {
    /// No value assigned yet. Evaluating the vertex in this state is a usage error.
    #[default]
    Undetermined,
    /// The condition holds; control takes the left branch (`lbs`).
    True,
    /// The condition does not hold; control enters the right branch (`rbs`).
    False,
}

impl ConditionValue {
    /// Returns the boolean value, or `None` when undetermined.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ConditionValue::Undetermined => None,
            ConditionValue::True => Some(true),
            ConditionValue::False => Some(false),
        }
    }

    /// Returns `true` unless the value is [`ConditionValue::Undetermined`].
    pub fn is_determined(self) -> bool {
        !matches!(self, ConditionValue::Undetermined)
    }
}

impl From<bool> for ConditionValue {
    fn from(value: bool) -> Self {
        if value {
            ConditionValue::True
        } else {
            ConditionValue::False
        }
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Undetermined => write!(f, "?"),
            ConditionValue::True => write!(f, "1"),
            ConditionValue::False => write!(f, "0"),
        }
    }
}

/// Branch point of a scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
    index: usize,
    value: ConditionValue,
    lbs: Option<ElementRef>,
    rbs: Option<ElementRef>,
}

impl Conditional {
    /// Creates a conditional with the 1-based vertex `index` and no branches.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            value: ConditionValue::Undetermined,
            lbs: None,
            rbs: None,
        }
    }

    /// 1-based vertex index; the bit position in condition vectors.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> ConditionValue {
        self.value
    }

    /// The jump operator that immediately follows the vertex.
    pub fn lbs(&self) -> Option<ElementRef> {
        self.lbs
    }

    /// Head of the nested sub-algorithm.
    pub fn rbs(&self) -> Option<ElementRef> {
        self.rbs
    }

    /// Returns `true` when both branches are set.
    pub fn is_complete(&self) -> bool {
        self.lbs.is_some() && self.rbs.is_some()
    }

    pub(crate) fn set_value(&mut self, value: ConditionValue) {
        self.value = value;
    }

    pub(crate) fn set_lbs(&mut self, lbs: ElementRef) {
        self.lbs = Some(lbs);
    }

    pub(crate) fn set_rbs(&mut self, rbs: ElementRef) {
        self.rbs = Some(rbs);
    }
}

/// Variant-specific part of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// The single entry point, `Yн`.
    Start,
    /// The single exit point, `Yк`.
    End,
    /// An operator vertex `Y<n>`.
    Operator,
    /// A conditional vertex `X<n>` or `P<n>`.
    Conditional(Conditional),
    /// A jump target `↓<n>`.
    JumpPoint { jump_index: u32 },
    /// A jump `↑<n>` or `w↑<n>`.
    JumpOperator {
        jump_index: u32,
        is_unconditional: bool,
    },
}

impl ElementKind {
    /// Short name of the variant, used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Start => "start",
            ElementKind::End => "end",
            ElementKind::Operator => "operator",
            ElementKind::Conditional(_) => "conditional",
            ElementKind::JumpPoint { .. } => "jump point",
            ElementKind::JumpOperator { .. } => "jump operator",
        }
    }

    /// Returns `true` if control continues to `next` after this element.
    ///
    /// Conditionals branch through `lbs`/`rbs`, jump operators through their
    /// target, and the end element has no successor at all.
    pub fn falls_through(&self) -> bool {
        matches!(
            self,
            ElementKind::Start | ElementKind::Operator | ElementKind::JumpPoint { .. }
        )
    }
}

/// A node of the scheme graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: Id,
    kind: ElementKind,
    position: usize,
    next: Option<ElementRef>,
}

impl Element {
    /// Creates an element recognized at token `position`.
    pub fn new(id: Id, kind: ElementKind, position: usize) -> Self {
        Self {
            id,
            kind,
            position,
            next: None,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Index into the token sequence at which the element was recognized.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn next(&self) -> Option<ElementRef> {
        self.next
    }

    /// Returns the conditional payload if this is a conditional vertex.
    pub fn as_conditional(&self) -> Option<&Conditional> {
        match &self.kind {
            ElementKind::Conditional(conditional) => Some(conditional),
            _ => None,
        }
    }

    pub(crate) fn as_conditional_mut(&mut self) -> Option<&mut Conditional> {
        match &mut self.kind {
            ElementKind::Conditional(conditional) => Some(conditional),
            _ => None,
        }
    }

    /// Jump index of a jump point or jump operator.
    pub fn jump_index(&self) -> Option<u32> {
        match self.kind {
            ElementKind::JumpPoint { jump_index } | ElementKind::JumpOperator { jump_index, .. } => {
                Some(jump_index)
            }
            _ => None,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self.kind, ElementKind::Start)
    }

    pub fn is_end(&self) -> bool {
        matches!(self.kind, ElementKind::End)
    }

    /// Human-readable rendering used by verbose simulation logs.
    ///
    /// Conditionals include their current value, so the text reflects the
    /// state at the moment it is produced.
    pub fn description(&self) -> String {
        match &self.kind {
            ElementKind::Start => format!("{}: start of algorithm", self.id),
            ElementKind::End => format!("{}: end of algorithm", self.id),
            ElementKind::Operator => format!("{}: operator", self.id),
            ElementKind::Conditional(conditional) => format!(
                "{}: condition #{} = {}",
                self.id,
                conditional.index(),
                conditional.value()
            ),
            ElementKind::JumpPoint { jump_index } => {
                format!("{}: jump point {jump_index}", self.id)
            }
            ElementKind::JumpOperator {
                jump_index,
                is_unconditional: true,
            } => format!("{}: unconditional jump to ↓{jump_index}", self.id),
            ElementKind::JumpOperator { jump_index, .. } => {
                format!("{}: conditional jump to ↓{jump_index}", self.id)
            }
        }
    }

    pub(crate) fn set_next(&mut self, next: ElementRef) {
        self.next = Some(next);
    }
}

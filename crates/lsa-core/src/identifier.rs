//! Element labels backed by a global string interner.
//!
//! Element labels such as `Y3`, `X2` or `w↑1` are copied into every run path
//! and loop key, so they are interned once and passed around as a [`Copy`]
//! symbol.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for element labels.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> std::sync::MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned element label.
///
/// # Examples
///
/// ```
/// use lsa_core::identifier::Id;
///
/// let operator = Id::new("Y3");
/// assert_eq!(operator, "Y3");
/// assert_eq!(operator, Id::new("Y3"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a label, interning it on first use.
    pub fn new(label: &str) -> Self {
        Self(interner().get_or_intern(label))
    }

    /// Returns an owned copy of the label.
    pub fn to_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let label = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f.write_str(label)
    }
}

impl From<&str> for Id {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|label| label == *other)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self == &other
    }
}

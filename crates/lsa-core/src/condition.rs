//! Condition vectors: one boolean per conditional vertex.
//!
//! The textual form is a string of `0`/`1` characters ordered by ascending
//! vertex index. A scheme without conditionals accepts only the empty
//! string.

use std::fmt;

use crate::error::UsageError;

/// A validated assignment of values to every conditional vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ConditionVector(Vec<bool>);

impl ConditionVector {
    /// Parses `bits` for a scheme with `expected` conditional vertices.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::VectorLength`] when the character count differs
    /// from `expected` and [`UsageError::VectorCharacter`] on anything other
    /// than `0` or `1`.
    pub fn parse(bits: &str, expected: usize) -> Result<Self, UsageError> {
        let actual = bits.chars().count();
        if actual != expected {
            return Err(UsageError::VectorLength { expected, actual });
        }

        bits.chars()
            .enumerate()
            .map(|(offset, character)| match character {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(UsageError::VectorCharacter { character, offset }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Builds the vector for enumeration step `mask` over `len` vertices.
    ///
    /// The first vertex maps to the most significant bit, so iterating masks
    /// upwards yields vectors in lexicographic order.
    pub fn from_mask(mask: u64, len: usize) -> Self {
        Self(
            (0..len)
                .map(|bit| (mask >> (len - 1 - bit)) & 1 == 1)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value for the vertex with 1-based `index`.
    pub fn get(&self, index: usize) -> Option<bool> {
        index.checked_sub(1).and_then(|i| self.0.get(i).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for ConditionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let vector = ConditionVector::parse("101", 3).unwrap();
        assert_eq!(vector.get(1), Some(true));
        assert_eq!(vector.get(2), Some(false));
        assert_eq!(vector.get(3), Some(true));
        assert_eq!(vector.get(0), None);
        assert_eq!(vector.to_string(), "101");
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(
            ConditionVector::parse("1", 2),
            Err(UsageError::VectorLength {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_parse_bad_character() {
        assert_eq!(
            ConditionVector::parse("1x", 2),
            Err(UsageError::VectorCharacter {
                character: 'x',
                offset: 1
            })
        );
    }

    #[test]
    fn test_empty_vector_for_no_conditionals() {
        let vector = ConditionVector::parse("", 0).unwrap();
        assert!(vector.is_empty());
        assert!(ConditionVector::parse("0", 0).is_err());
    }

    #[test]
    fn test_from_mask_is_msb_first() {
        assert_eq!(ConditionVector::from_mask(0b01, 2).to_string(), "01");
        assert_eq!(ConditionVector::from_mask(0b110, 3).to_string(), "110");
        assert_eq!(ConditionVector::from_mask(0, 0).to_string(), "");
    }
}

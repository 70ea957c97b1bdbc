// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stack-name arithmetic.
//!
//! Stack names run `A..Z, AA, AB, .., AZ, BA, .., ZZ, AAA, ..` — bijective
//! base-26 without a zero digit. The sequence is unbounded, so allocation
//! can never run out of names.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

/// A short uppercase alphabetic name identifying a chain root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StackName(SmolStr);

impl StackName {
    /// The first name in the sequence.
    pub fn first() -> Self {
        Self(SmolStr::new_static("A"))
    }

    pub fn parse(value: &str) -> Result<Self, StackNameError> {
        if value.is_empty() {
            return Err(StackNameError::Empty);
        }
        if let Some(offending) = value.chars().find(|c| !c.is_ascii_uppercase()) {
            return Err(StackNameError::InvalidCharacter(offending));
        }
        Ok(Self(SmolStr::new(value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The next name in sequence order: increment the last letter, carrying
    /// left on `Z`; when every letter carries, grow by one (`ZZ` -> `AAA`).
    pub fn successor(&self) -> Self {
        let mut letters: Vec<u8> = self.0.bytes().collect();
        for letter in letters.iter_mut().rev() {
            if *letter < b'Z' {
                *letter += 1;
                return Self(SmolStr::new(
                    std::str::from_utf8(&letters).unwrap_or_default(),
                ));
            }
            *letter = b'A';
        }
        letters.insert(0, b'A');
        Self(SmolStr::new(
            std::str::from_utf8(&letters).unwrap_or_default(),
        ))
    }
}

impl fmt::Display for StackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialOrd for StackName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StackName {
    /// Sequence order: shorter names sort before longer ones (`Z` < `AA`).
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackNameError {
    Empty,
    InvalidCharacter(char),
}

impl fmt::Display for StackNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("stack name must not be empty"),
            Self::InvalidCharacter(c) => {
                write!(f, "stack name must be uppercase letters, got '{c}'")
            }
        }
    }
}

impl std::error::Error for StackNameError {}

#[cfg(test)]
mod tests {
    use super::{StackName, StackNameError};

    fn name(value: &str) -> StackName {
        StackName::parse(value).expect("stack name")
    }

    #[test]
    fn successor_increments_the_last_letter() {
        assert_eq!(name("A").successor(), name("B"));
        assert_eq!(name("AB").successor(), name("AC"));
    }

    #[test]
    fn successor_carries_on_z() {
        assert_eq!(name("Z").successor(), name("AA"));
        assert_eq!(name("AZ").successor(), name("BA"));
        assert_eq!(name("BZ").successor(), name("CA"));
    }

    #[test]
    fn successor_grows_past_double_letters() {
        assert_eq!(name("ZZ").successor(), name("AAA"));
        assert_eq!(name("AAZ").successor(), name("ABA"));
        assert_eq!(name("ZZZ").successor(), name("AAAA"));
    }

    #[test]
    fn sequence_order_is_shortlex() {
        assert!(name("Z") < name("AA"));
        assert!(name("AA") < name("AB"));
        assert!(name("ZZ") < name("AAA"));
    }

    #[test]
    fn parse_rejects_lowercase_and_empty() {
        assert_eq!(StackName::parse(""), Err(StackNameError::Empty));
        assert_eq!(
            StackName::parse("Ab"),
            Err(StackNameError::InvalidCharacter('b'))
        );
    }

    #[test]
    fn twenty_seventh_name_is_aa() {
        let mut current = StackName::first();
        for _ in 0..26 {
            current = current.successor();
        }
        assert_eq!(current, name("AA"));
    }
}

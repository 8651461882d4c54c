//! Member-number normalization.
//!
//! SKCC numbers are logged with a variety of suffixes: a designation letter
//! (`12345C`, `12345T`, `12345S`), an endorsement multiplier (`12345x2`), or
//! both (`12345Tx2`, `12345 Sx10`). Every award deduplicates on the bare
//! numeric part, so all suffix handling lives here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Achievement designation carried as a member-number suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Designation {
    Centurion,
    Tribune,
    Senator,
}

impl Designation {
    pub const fn letter(self) -> char {
        match self {
            Self::Centurion => 'C',
            Self::Tribune => 'T',
            Self::Senator => 'S',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Centurion => "Centurion",
            Self::Tribune => "Tribune",
            Self::Senator => "Senator",
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'C' => Some(Self::Centurion),
            'T' => Some(Self::Tribune),
            'S' => Some(Self::Senator),
            _ => None,
        }
    }
}

/// Parsed member number: the numeric base plus whatever suffixes were logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberIdentity {
    pub base: String,
    pub designation: Option<Designation>,
    pub multiplier: Option<u32>,
}

impl MemberIdentity {
    /// Parse a raw member-number field. Returns `None` when no numeric base can be recovered.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.split_whitespace().next()?;

        let (head, multiplier) = match token.find(['x', 'X']) {
            Some(index) => (&token[..index], token[index + 1..].parse::<u32>().ok()),
            None => (token, None),
        };

        let (digits, designation) = match head.chars().last().and_then(Designation::from_letter) {
            Some(designation) => (&head[..head.len() - 1], Some(designation)),
            None => (head, None),
        };

        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }

        Some(Self {
            base: digits.to_string(),
            designation,
            multiplier,
        })
    }

    /// Numeric value of the base, used by the prefix-points award.
    pub fn number(&self) -> Option<u64> {
        self.base.parse().ok()
    }
}

impl fmt::Display for MemberIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if let Some(designation) = self.designation {
            write!(f, "{}", designation.letter())?;
        }
        if let Some(multiplier) = self.multiplier {
            write!(f, "x{multiplier}")?;
        }
        Ok(())
    }
}

/// Strip designation and multiplier suffixes, returning the numeric base.
pub fn extract_base_identity(raw: &str) -> Option<String> {
    MemberIdentity::parse(raw).map(|identity| identity.base)
}

/// Designation letter (`C`, `T`, `S`) logged with the number, if any.
pub fn get_designation(raw: &str) -> Option<Designation> {
    MemberIdentity::parse(raw).and_then(|identity| identity.designation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_suffix_convention() {
        for raw in [
            "12345", "12345C", "12345T", "12345S", "12345x2", "12345Tx2", "12345 Tx2",
            " 12345Sx10 ", "12345c",
        ] {
            assert_eq!(
                extract_base_identity(raw).as_deref(),
                Some("12345"),
                "failed on {raw:?}"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_input() {
        for raw in ["", "   ", "ABC", "C", "x2", "12A45", "T12345", "12-345"] {
            assert_eq!(extract_base_identity(raw), None, "accepted {raw:?}");
        }
    }

    #[test]
    fn designation_and_multiplier_are_reported() {
        let identity = MemberIdentity::parse("7788Tx8").expect("parses");
        assert_eq!(identity.base, "7788");
        assert_eq!(identity.designation, Some(Designation::Tribune));
        assert_eq!(identity.multiplier, Some(8));
        assert_eq!(identity.to_string(), "7788Tx8");

        assert_eq!(get_designation("660S"), Some(Designation::Senator));
        assert_eq!(get_designation("660"), None);
        assert_eq!(get_designation("junk"), None);
    }

    #[test]
    fn reparsing_a_base_with_designation_is_stable() {
        for raw in ["1", "42C", "9000Tx3", "31337 Sx10"] {
            let base = extract_base_identity(raw).expect("valid input");
            assert_eq!(
                extract_base_identity(&format!("{base}T")),
                Some(base.clone())
            );
            assert_eq!(extract_base_identity(&base), Some(base));
        }
    }
}

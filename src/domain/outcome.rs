//! Market sides and outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The side of a binary market a participant stakes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Yes,
    No,
}

impl Side {
    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution state of a market.
///
/// Discriminants match the wire encoding (`0` unresolved, `1` yes, `2` no).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Unresolved = 0,
    Yes = 1,
    No = 2,
}

impl Outcome {
    /// The winning side, if the market is resolved.
    #[must_use]
    pub const fn winning_side(self) -> Option<Side> {
        match self {
            Self::Unresolved => None,
            Self::Yes => Some(Side::Yes),
            Self::No => Some(Side::No),
        }
    }

    /// Returns true once an outcome has been set.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    /// Decode the wire encoding. Unknown values yield `None`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unresolved),
            1 => Some(Self::Yes),
            2 => Some(Self::No),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<Side> for Outcome {
    fn from(side: Side) -> Self {
        match side {
            Side::Yes => Self::Yes,
            Side::No => Self::No,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => f.write_str("unresolved"),
            Self::Yes => f.write_str("yes"),
            Self::No => f.write_str("no"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winning_side_follows_outcome() {
        assert_eq!(Outcome::Unresolved.winning_side(), None);
        assert_eq!(Outcome::Yes.winning_side(), Some(Side::Yes));
        assert_eq!(Outcome::No.winning_side(), Some(Side::No));
    }

    #[test]
    fn codes_match_wire_encoding() {
        for outcome in [Outcome::Unresolved, Outcome::Yes, Outcome::No] {
            assert_eq!(Outcome::from_code(outcome.code()), Some(outcome));
        }
        assert_eq!(Outcome::Yes.code(), 1);
        assert_eq!(Outcome::from_code(3), None);
    }

    #[test]
    fn default_is_unresolved() {
        assert!(!Outcome::default().is_resolved());
        assert!(Outcome::from(Side::No).is_resolved());
    }
}

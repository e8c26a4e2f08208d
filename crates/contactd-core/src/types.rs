//! Strong type definitions for contactd.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A store-assigned contact identifier.
///
/// `0` is reserved for "not yet assigned"; the store replaces it on save.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl ContactId {
    /// The unassigned sentinel.
    pub const UNASSIGNED: Self = Self(0);

    /// Create from a raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether the store has assigned this id.
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContactId({})", self.0)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ContactId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for ContactId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_sentinel() {
        assert!(!ContactId::UNASSIGNED.is_assigned());
        assert!(ContactId::new(7).is_assigned());
        assert_eq!(ContactId::default(), ContactId::UNASSIGNED);
    }

    #[test]
    fn test_parse_and_display() {
        let id: ContactId = "1000001".parse().unwrap();
        assert_eq!(id.get(), 1_000_001);
        assert_eq!(id.to_string(), "1000001");
        assert!("abc".parse::<ContactId>().is_err());
        assert!("-1".parse::<ContactId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ContactId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}

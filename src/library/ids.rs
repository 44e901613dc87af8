//! Library entity identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a library entity, distinguishing "no id" from a real id.
///
/// Kodi's web clients conventionally treat a raw id of `0` as "nothing
/// selected" and keep dependent detail queries disabled until a row is
/// picked. [`LibraryId::from_raw`] keeps that convention: raw `0` maps to
/// [`LibraryId::Absent`]. An entity legitimately numbered zero is therefore
/// unreachable through raw ids; construct [`LibraryId::Id`] directly if a
/// server ever hands one out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibraryId {
    /// No identifier; dependent queries stay disabled ("not ready").
    Absent,
    /// A concrete library id.
    Id(u32),
}

impl LibraryId {
    /// Map a raw id to the sentinel, folding `0` into [`LibraryId::Absent`].
    pub fn from_raw(raw: u32) -> Self {
        if raw == 0 {
            LibraryId::Absent
        } else {
            LibraryId::Id(raw)
        }
    }

    pub fn is_absent(self) -> bool {
        matches!(self, LibraryId::Absent)
    }

    /// The numeric id, if present.
    pub fn get(self) -> Option<u32> {
        match self {
            LibraryId::Absent => None,
            LibraryId::Id(id) => Some(id),
        }
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryId::Absent => write!(f, "absent"),
            LibraryId::Id(id) => write!(f, "{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_folds_into_absent() {
        assert_eq!(LibraryId::from_raw(0), LibraryId::Absent);
        assert!(LibraryId::from_raw(0).is_absent());
        assert_eq!(LibraryId::from_raw(0).get(), None);
    }

    #[test]
    fn nonzero_is_a_real_id() {
        assert_eq!(LibraryId::from_raw(42), LibraryId::Id(42));
        assert_eq!(LibraryId::from_raw(42).get(), Some(42));
        assert!(!LibraryId::from_raw(42).is_absent());
    }

    #[test]
    fn explicit_zero_id_is_representable() {
        // The sentinel only guards the raw-id path; a directly constructed
        // id of zero stays an id.
        assert_eq!(LibraryId::Id(0).get(), Some(0));
        assert!(!LibraryId::Id(0).is_absent());
    }

    #[test]
    fn display_names_both_cases() {
        assert_eq!(LibraryId::Absent.to_string(), "absent");
        assert_eq!(LibraryId::Id(7).to_string(), "7");
    }
}

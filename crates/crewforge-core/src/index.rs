//! Dense index newtypes into a [`Roster`](crate::Roster).
//!
//! Identifiers (`PersonId`, `CrewId`, ...) are what callers see; indices are
//! what the model builder and validator work with. An index is only
//! meaningful for the roster that issued it.

use std::fmt;

macro_rules! define_index {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(usize);

        impl $name {
            /// Creates an index from its raw position.
            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the raw position.
            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $label, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }
    };
}

define_index!(
    /// Position of a person in the roster.
    PersonIndex,
    "PersonIndex"
);
define_index!(
    /// Position of a center in the roster.
    CenterIndex,
    "CenterIndex"
);
define_index!(
    /// Position of a crew in the roster.
    CrewIndex,
    "CrewIndex"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip_and_debug() {
        let idx = CrewIndex::new(4);
        assert_eq!(idx.get(), 4);
        assert_eq!(format!("{:?}", idx), "CrewIndex(4)");
        assert_eq!(PersonIndex::from(2), PersonIndex::new(2));
    }
}

//! Handles into the arenas of a `ScopeTree`.

use serde::Serialize;

use crate::error::{Construct, ScopeError};

macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident => $prefix:literal, $construct:expr;)+) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
            pub struct $name(pub u32);

            impl $name {
                #[inline]
                pub(crate) const fn index(self) -> usize {
                    self.0 as usize
                }

                /// Id of the next entry in an arena that holds `len` entries.
                /// Ids are `u32`, so an arena holds at most `u32::MAX + 1`
                /// entries; allocating past that is an error.
                #[inline]
                pub(crate) fn next(len: usize) -> Result<Self, ScopeError> {
                    u32::try_from(len)
                        .map($name)
                        .map_err(|_| ScopeError::CapacityExceeded {
                            construct: $construct,
                        })
                }

                /// Id of an existing entry. Every existing entry was
                /// allocated through `next`, so its index fits.
                #[inline]
                pub(crate) const fn from_index(index: usize) -> Self {
                    $name(index as u32)
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, concat!($prefix, "{}"), self.0)
                }
            }
        )+
    };
}

define_id! {
    /// Index of a `Scope`. The root scope is always `ScopeId(0)`.
    ScopeId => "scope#", Construct::Scope;
    /// Index of a `Variable`.
    VariableId => "var#", Construct::Variable;
    /// Index of an `Assignment`.
    AssignmentId => "assign#", Construct::Assignment;
    /// Index of a `Reference`.
    ReferenceId => "ref#", Construct::Reference;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_allocates_sequential_ids() {
        assert_eq!(ScopeId::next(0), Ok(ScopeId(0)));
        assert_eq!(VariableId::next(7), Ok(VariableId(7)));
        assert_eq!(ReferenceId::from_index(3), ReferenceId(3));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_next_rejects_ids_past_u32() {
        let last = u32::MAX as usize;
        assert_eq!(AssignmentId::next(last), Ok(AssignmentId(u32::MAX)));
        assert_eq!(
            AssignmentId::next(last + 1),
            Err(ScopeError::CapacityExceeded {
                construct: Construct::Assignment
            })
        );
        assert_eq!(
            VariableId::next(last + 1).unwrap_err().to_string(),
            "too many variables: ids are limited to u32"
        );
    }
}

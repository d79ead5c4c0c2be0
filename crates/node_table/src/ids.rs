//! Dense identifier newtypes.
//!
//! Every identifier wraps a `NonZeroU32`, so `Option<Id>` stays four bytes and
//! the raw value `0` can only ever mean "absent".

use core::fmt;
use core::num::NonZeroU32;

macro_rules! dense_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Largest representable identifier.
            pub const MAX: Self = Self(NonZeroU32::MAX);

            /// Wrap a raw identifier; `0` yields `None`.
            #[inline]
            pub const fn from_raw(raw: u32) -> Option<Self> {
                match NonZeroU32::new(raw) {
                    Some(value) => Some(Self(value)),
                    None => None,
                }
            }

            /// Identifier for the row at zero-based `index`.
            #[inline]
            pub fn from_index(index: usize) -> Option<Self> {
                u32::try_from(index)
                    .ok()
                    .and_then(|raw| raw.checked_add(1))
                    .and_then(Self::from_raw)
            }

            /// Raw 1-based value.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0.get()
            }

            /// Zero-based row index into a column.
            #[inline]
            pub const fn index(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

dense_id! {
    /// A node in a [`NodeTable`](crate::NodeTable).
    NodeId
}

dense_id! {
    /// An interned string or class name. Interning is done by the caller.
    Atom
}

dense_id! {
    /// A deduplicated style archetype.
    ArchetypeId
}

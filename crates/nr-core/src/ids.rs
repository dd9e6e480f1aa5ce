//! City and route identifiers.
//!
//! A [`CityId`] is an arena position assigned by the network; a [`RouteId`]
//! is the number the user picked.  Both are `Copy + Ord + Hash` and default
//! to their `INVALID` value.

use std::fmt;

/// Newtype over an unsigned integer with an all-ones "none" value.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Placeholder for "no such id"; never handed out.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.index()
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;

            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Handle of a city in the network's city arena.  Handles are dense,
    /// assigned in insertion order, and never reused (cities are never
    /// removed).
    pub struct CityId(u32);
}

typed_id! {
    /// User-facing route number.  Valid values are bounded by
    /// [`MapConfig`](crate::MapConfig) (1–999 by default).
    pub struct RouteId(u32);
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CityId({})", self.0)
    }
}

/// Route ids print as the bare number because that is what appears in route
/// descriptions.
impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

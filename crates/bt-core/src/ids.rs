//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` so
//! tests and loaders can construct them directly.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The next identifier in sequence.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
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
    /// Passenger sequence number.  Assigned monotonically from 1 as
    /// passengers arrive at stops.
    pub struct PassengerId(u32);
}

typed_id! {
    /// Bus number, assigned from 1 in timetable order.
    pub struct BusId(u32);
}

typed_id! {
    /// Position of a stop along the route, 0 = first stop.
    pub struct StopId(u16);
}

impl PassengerId {
    pub const FIRST: PassengerId = PassengerId(1);
}

impl BusId {
    pub const FIRST: BusId = BusId(1);
}

impl StopId {
    /// The first stop on the route.  Buses are created here.
    pub const ORIGIN: StopId = StopId(0);
}

// Tue Jan 13 2026 - Alex

use crate::structure::Size;
use std::fmt;
use std::ops::Add;

/// Byte offset of a field from the start of its outermost record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset {
    value: u64,
}

impl Offset {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn zero() -> Self {
        Self { value: 0 }
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    pub fn is_aligned(&self, alignment: u64) -> bool {
        alignment == 0 || self.value % alignment == 0
    }

    /// Distance from `earlier` to `self`, zero if `earlier` lies past it.
    pub fn distance_from(&self, earlier: Offset) -> Size {
        Size::new(self.value.saturating_sub(earlier.value))
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Add<Size> for Offset {
    type Output = Offset;

    fn add(self, rhs: Size) -> Offset {
        Offset::new(self.value + rhs.as_u64())
    }
}

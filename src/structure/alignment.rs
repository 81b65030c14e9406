// Tue Jan 13 2026 - Alex

use crate::structure::{LayoutError, Offset};
use std::fmt;

/// A power-of-two byte boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Alignment {
    value: u64,
}

impl Alignment {
    pub const BYTE: Alignment = Alignment { value: 1 };
    pub const WORD: Alignment = Alignment { value: 8 };

    pub fn new(value: u64) -> Result<Self, LayoutError> {
        if value == 0 || !value.is_power_of_two() {
            return Err(LayoutError::InvalidAlignment { field: String::new(), align: value as i64 });
        }
        Ok(Self { value })
    }

    pub fn as_u64(&self) -> u64 {
        self.value
    }

    /// Smallest multiple of this alignment that is `>= offset`.
    pub fn align(&self, offset: Offset) -> Offset {
        Offset::new(self.align_u64(offset.as_u64()))
    }

    pub fn align_u64(&self, value: u64) -> u64 {
        (value + self.value - 1) & !(self.value - 1)
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::WORD
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

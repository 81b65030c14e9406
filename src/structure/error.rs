// Tue Jan 13 2026 - Alex

use thiserror::Error;

/// Invariant violations in field descriptors or laid-out records. These mean
/// the extractor handed over malformed data; the layout is never emitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("field `{field}` has negative size {size}")]
    NegativeSize { field: String, size: i64 },
    #[error("field `{field}` has negative alignment {align}")]
    NegativeAlignment { field: String, align: i64 },
    #[error("field `{field}` has invalid alignment {align}, expected a power of two")]
    InvalidAlignment { field: String, align: i64 },
    #[error("field `{field}` has size {size}, too large for a field descriptor")]
    SizeOverflow { field: String, size: u64 },
    #[error("field `{field}` at offset {offset} is not aligned to {align}")]
    Misaligned { field: String, offset: u64, align: u64 },
    #[error("field `{field}` starts at {found}, expected {expected}")]
    Discontiguous { field: String, expected: u64, found: u64 },
    #[error("field `{field}` spans {start}-{end} but has size {size}")]
    SizeMismatch { field: String, start: u64, end: u64, size: u64 },
}

impl LayoutError {
    /// Attaches the offending field name to an error raised without one.
    pub fn for_field(self, name: &str) -> Self {
        match self {
            LayoutError::InvalidAlignment { field, align } if field.is_empty() => {
                LayoutError::InvalidAlignment { field: name.to_string(), align }
            }
            other => other,
        }
    }
}

// Tue Jan 13 2026 - Alex

use crate::structure::{Field, Size};
use serde::{Deserialize, Serialize};

/// Inclusive range of source lines a declaration spans, 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }
}

/// A struct declaration with its fields laid out left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLayout {
    name: String,
    lines: LineRange,
    fields: Vec<Field>,
}

impl StructLayout {
    pub fn new(name: &str, lines: LineRange, fields: Vec<Field>) -> Self {
        Self {
            name: name.to_string(),
            lines,
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> LineRange {
        self.lines
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| !f.is_padding() && f.name() == name)
    }

    /// Total size, padding included.
    pub fn size(&self) -> Size {
        self.fields.iter().map(Field::size).sum()
    }

    /// Padding bytes, counting padding inside nested records.
    pub fn padding(&self) -> u64 {
        self.fields.iter().map(Field::padding_bytes).sum()
    }

    pub fn with_fields(&self, fields: Vec<Field>) -> Self {
        Self {
            name: self.name.clone(),
            lines: self.lines,
            fields,
        }
    }
}

// Tue Jan 13 2026 - Alex

use crate::structure::{Alignment, LayoutError, Offset, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A field as handed over by an extractor, before layout.
///
/// Size and alignment are signed so that malformed input can be detected and
/// reported instead of wrapping around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldSpec")]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub size: i64,
    pub align: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<Vec<FieldSpec>>,
}

/// Wire form of [`FieldSpec`]. `size` may only be left out of records, whose
/// size comes from their children.
#[derive(Deserialize)]
struct RawFieldSpec {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    size: Option<i64>,
    align: i64,
    #[serde(default)]
    nested: Option<Vec<FieldSpec>>,
}

impl TryFrom<RawFieldSpec> for FieldSpec {
    type Error = String;

    fn try_from(raw: RawFieldSpec) -> Result<Self, Self::Error> {
        let is_record = raw.nested.as_ref().map_or(false, |children| !children.is_empty());
        let size = match raw.size {
            Some(size) => size,
            None if is_record => 0,
            None => return Err(format!("field `{}` has no size", raw.name)),
        };
        Ok(Self {
            name: raw.name,
            type_name: raw.type_name,
            size,
            align: raw.align,
            nested: raw.nested,
        })
    }
}

impl FieldSpec {
    pub fn leaf(name: &str, type_name: &str, size: i64, align: i64) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            size,
            align,
            nested: None,
        }
    }

    /// A record field. Its size is derived from the laid-out children.
    pub fn composite(name: &str, type_name: &str, align: i64, children: Vec<FieldSpec>) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            size: 0,
            align,
            nested: Some(children),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Padding,
    Leaf { align: Alignment },
    Composite { align: Alignment, children: Vec<Field> },
}

/// A field placed at a concrete offset. Gaps between fields are always
/// materialized as padding fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    type_name: String,
    start: Offset,
    size: Size,
    declared_size: Size,
    kind: FieldKind,
}

impl Field {
    pub fn padding(start: Offset, size: Size) -> Self {
        Self {
            name: String::new(),
            type_name: String::new(),
            start,
            size,
            declared_size: size,
            kind: FieldKind::Padding,
        }
    }

    pub fn leaf(name: &str, type_name: &str, start: Offset, size: Size, align: Alignment) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            start,
            size,
            declared_size: size,
            kind: FieldKind::Leaf { align },
        }
    }

    pub fn composite(name: &str, type_name: &str, start: Offset, align: Alignment, children: Vec<Field>) -> Self {
        let size: Size = children.iter().map(|c| c.size).sum();
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            start,
            size,
            declared_size: size,
            kind: FieldKind::Composite { align, children },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn start(&self) -> Offset {
        self.start
    }

    pub fn end(&self) -> Offset {
        self.start + self.size
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Size before a trailing zero-sized field was widened to one byte.
    pub fn declared_size(&self) -> Size {
        self.declared_size
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn align(&self) -> Option<Alignment> {
        match &self.kind {
            FieldKind::Padding => None,
            FieldKind::Leaf { align } | FieldKind::Composite { align, .. } => Some(*align),
        }
    }

    /// Alignment in bytes, 0 for padding.
    pub fn align_bytes(&self) -> u64 {
        self.align().map(|a| a.as_u64()).unwrap_or(0)
    }

    pub fn is_padding(&self) -> bool {
        matches!(self.kind, FieldKind::Padding)
    }

    /// An inline `struct {...}` record. Fields of a named struct type carry
    /// children too, but their layout belongs to the named declaration.
    pub fn is_inline_record(&self) -> bool {
        !self.children().is_empty()
            && self
                .type_name
                .strip_prefix("struct")
                .map_or(false, |rest| rest.trim_start().starts_with('{'))
    }

    pub fn children(&self) -> &[Field] {
        match &self.kind {
            FieldKind::Composite { children, .. } => children,
            _ => &[],
        }
    }

    /// The same composite with `children` in place of its current ones.
    /// Other kinds are returned unchanged.
    pub(crate) fn with_children(&self, children: Vec<Field>) -> Field {
        match &self.kind {
            FieldKind::Composite { align, .. } => {
                Field::composite(&self.name, &self.type_name, self.start, *align, children)
            }
            _ => self.clone(),
        }
    }

    /// Padding bytes in this field, including padding inside nested records.
    pub fn padding_bytes(&self) -> u64 {
        match &self.kind {
            FieldKind::Padding => self.size.as_u64(),
            FieldKind::Leaf { .. } => 0,
            FieldKind::Composite { children, .. } => children.iter().map(Field::padding_bytes).sum(),
        }
    }

    /// Gives a zero-sized trailing field one nominal byte so the padding
    /// after it is computed against a non-empty span.
    pub(crate) fn widen_zero_sized(&mut self) {
        if self.size.is_zero() {
            self.size = Size::new(1);
        }
    }

    /// Converts back to an unplaced descriptor, dropping padding from nested
    /// records. Returns `None` for padding.
    pub fn to_spec(&self) -> Result<Option<FieldSpec>, LayoutError> {
        let spec = match &self.kind {
            FieldKind::Padding => return Ok(None),
            FieldKind::Leaf { align } => {
                let size = i64::try_from(self.declared_size.as_u64()).map_err(|_| LayoutError::SizeOverflow {
                    field: self.name.clone(),
                    size: self.declared_size.as_u64(),
                })?;
                FieldSpec::leaf(&self.name, &self.type_name, size, align.as_u64() as i64)
            }
            FieldKind::Composite { align, children } => FieldSpec::composite(
                &self.name,
                &self.type_name,
                align.as_u64() as i64,
                children_to_specs(children)?,
            ),
        };
        Ok(Some(spec))
    }
}

/// Descriptors for the non-padding fields of a laid-out record.
pub(crate) fn children_to_specs(fields: &[Field]) -> Result<Vec<FieldSpec>, LayoutError> {
    fields.iter().filter_map(|f| f.to_spec().transpose()).collect()
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_padding() {
            return write!(
                f,
                "*padding: {}-{} (size {}, align {})*",
                self.start,
                self.end(),
                self.size,
                self.align_bytes()
            );
        }
        write!(
            f,
            "{} {}: {}-{} (size {}, align {})",
            self.name,
            self.type_name,
            self.start,
            self.end(),
            self.size,
            self.align_bytes()
        )
    }
}

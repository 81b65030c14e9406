// Tue Jan 13 2026 - Alex

use crate::structure::{Field, LayoutError, Offset, StructLayout};

/// Checks that a layout obeys the sequential-allocation invariants: fields
/// are contiguous, aligned and exactly cover any parent record.
pub struct StructureValidator;

impl StructureValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, layout: &StructLayout) -> Result<(), LayoutError> {
        let start = layout.fields().first().map(Field::start).unwrap_or_default();
        self.validate_fields(layout.fields(), start).map(|_| ())
    }

    /// Validates siblings starting at `start` and returns the offset where
    /// the last one ends.
    fn validate_fields(&self, fields: &[Field], start: Offset) -> Result<Offset, LayoutError> {
        let mut expected = start;
        for field in fields {
            if field.start() != expected {
                return Err(LayoutError::Discontiguous {
                    field: field.name().to_string(),
                    expected: expected.as_u64(),
                    found: field.start().as_u64(),
                });
            }

            if let Some(align) = field.align() {
                if !field.start().is_aligned(align.as_u64()) {
                    return Err(LayoutError::Misaligned {
                        field: field.name().to_string(),
                        offset: field.start().as_u64(),
                        align: align.as_u64(),
                    });
                }
            }

            if !field.children().is_empty() {
                let end = self.validate_fields(field.children(), field.start())?;
                if end != field.end() {
                    return Err(LayoutError::SizeMismatch {
                        field: field.name().to_string(),
                        start: field.start().as_u64(),
                        end: end.as_u64(),
                        size: field.size().as_u64(),
                    });
                }
            }

            expected = field.end();
        }
        Ok(expected)
    }
}

impl Default for StructureValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{compute_layout, Alignment, FieldSpec, LineRange, Size};

    #[test]
    fn test_calculated_layouts_are_valid() {
        let fields = compute_layout(&[
            FieldSpec::leaf("A", "bool", 1, 1),
            FieldSpec::composite(
                "C",
                "struct{D int64; E bool}",
                8,
                vec![FieldSpec::leaf("D", "int64", 8, 8), FieldSpec::leaf("E", "bool", 1, 1)],
            ),
            FieldSpec::leaf("F", "uint16", 2, 2),
            FieldSpec::leaf("Z", "struct{}", 0, 1),
        ])
        .unwrap();

        let layout = StructLayout::new("S", LineRange::new(1, 6), fields);
        assert!(StructureValidator::new().validate(&layout).is_ok());

        for pair in layout.fields().windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        let total: Size = layout.fields().iter().map(Field::size).sum();
        assert_eq!(layout.size(), total);
    }

    #[test]
    fn test_detects_gap() {
        let layout = StructLayout::new(
            "Gap",
            LineRange::new(1, 3),
            vec![
                Field::leaf("A", "bool", Offset::new(0), Size::new(1), Alignment::BYTE),
                Field::leaf("B", "int64", Offset::new(8), Size::new(8), Alignment::WORD),
            ],
        );
        let err = StructureValidator::new().validate(&layout).unwrap_err();
        assert_eq!(err, LayoutError::Discontiguous { field: "B".to_string(), expected: 1, found: 8 });
    }

    #[test]
    fn test_detects_misalignment() {
        let layout = StructLayout::new(
            "Odd",
            LineRange::new(1, 3),
            vec![
                Field::leaf("A", "bool", Offset::new(0), Size::new(1), Alignment::BYTE),
                Field::leaf("B", "int64", Offset::new(1), Size::new(8), Alignment::WORD),
            ],
        );
        assert!(matches!(
            StructureValidator::new().validate(&layout),
            Err(LayoutError::Misaligned { offset: 1, align: 8, .. })
        ));
    }
}

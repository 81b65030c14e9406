// Sat Oct 17 2026 - Alex

use crate::structure::{Alignment, Field, FieldSpec, LayoutError, Offset, Size};
use serde::{Deserialize, Serialize};

/// Rule for the alignment of a record as a whole, which decides how much
/// trailing padding it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructAlignment {
    /// Every record is rounded up to this many bytes.
    Fixed(u64),
    /// Records take the largest alignment among their fields.
    Natural,
}

impl StructAlignment {
    fn resolve(&self, specs: &[FieldSpec]) -> Result<Alignment, LayoutError> {
        match self {
            StructAlignment::Fixed(n) => Alignment::new(*n),
            StructAlignment::Natural => {
                let widest = specs.iter().map(|s| s.align).max().unwrap_or(1).max(1);
                Alignment::new(widest as u64)
            }
        }
    }
}

impl Default for StructAlignment {
    fn default() -> Self {
        StructAlignment::Fixed(Alignment::WORD.as_u64())
    }
}

/// Sequential-allocation layout: each field goes at the next offset that
/// satisfies its alignment, in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutCalculator {
    struct_alignment: StructAlignment,
}

impl LayoutCalculator {
    pub fn new(struct_alignment: StructAlignment) -> Self {
        Self { struct_alignment }
    }

    /// Lays out `specs` starting at `base`, recursing into nested records.
    pub fn compute(&self, specs: &[FieldSpec], base: Offset) -> Result<Vec<Field>, LayoutError> {
        let mut out = Vec::with_capacity(specs.len() + 1);
        let mut pos = base;

        for spec in specs {
            let align = validate(spec)?;

            let aligned = align.align(pos);
            if aligned > pos {
                out.push(Field::padding(pos, aligned.distance_from(pos)));
                pos = aligned;
            }

            let field = match spec.nested.as_deref() {
                Some(children) if !children.is_empty() => {
                    let children = self.compute(children, pos)?;
                    Field::composite(&spec.name, &spec.type_name, pos, align, children)
                }
                _ => Field::leaf(&spec.name, &spec.type_name, pos, Size::new(spec.size as u64), align),
            };
            pos = field.end();
            out.push(field);
        }

        let Some(last) = out.last_mut() else {
            return Ok(out);
        };
        if last.size().is_zero() {
            last.widen_zero_sized();
            pos = last.end();
        }

        let struct_align = self.struct_alignment.resolve(specs)?;
        let used = pos.distance_from(base).as_u64();
        let total = struct_align.align_u64(used);
        if total > used {
            out.push(Field::padding(pos, Size::new(total - used)));
        }

        Ok(out)
    }
}

/// Lays out `specs` from offset zero with the default 8-byte record alignment.
pub fn compute_layout(specs: &[FieldSpec]) -> Result<Vec<Field>, LayoutError> {
    LayoutCalculator::default().compute(specs, Offset::zero())
}

fn validate(spec: &FieldSpec) -> Result<Alignment, LayoutError> {
    if spec.size < 0 {
        return Err(LayoutError::NegativeSize { field: spec.name.clone(), size: spec.size });
    }
    if spec.align < 0 {
        return Err(LayoutError::NegativeAlignment { field: spec.name.clone(), align: spec.align });
    }
    Alignment::new(spec.align as u64).map_err(|e| e.for_field(&spec.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::strategies::field_specs;
    use crate::structure::FieldKind;
    use proptest::prelude::*;

    fn spans(fields: &[Field]) -> Vec<(u64, u64, bool)> {
        fields.iter().map(|f| (f.start().as_u64(), f.end().as_u64(), f.is_padding())).collect()
    }

    #[test]
    fn test_padding_between_fields() {
        let fields = compute_layout(&[
            FieldSpec::leaf("A", "int", 8, 8),
            FieldSpec::leaf("B", "bool", 1, 1),
            FieldSpec::leaf("C", "*string", 8, 8),
        ])
        .unwrap();

        assert_eq!(spans(&fields), vec![(0, 8, false), (8, 9, false), (9, 16, true), (16, 24, false)]);
        assert_eq!(fields[2].size(), Size::new(7));
        assert_eq!(fields[2].align_bytes(), 0);
    }

    #[test]
    fn test_trailing_padding_to_word() {
        let fields = compute_layout(&[
            FieldSpec::leaf("A", "int64", 8, 8),
            FieldSpec::leaf("B", "uint16", 2, 2),
            FieldSpec::leaf("C", "bool", 1, 1),
        ])
        .unwrap();

        assert_eq!(spans(&fields), vec![(0, 8, false), (8, 10, false), (10, 11, false), (11, 16, true)]);
    }

    #[test]
    fn test_nested_record_uses_cumulative_size() {
        let fields = compute_layout(&[
            FieldSpec::leaf("A", "int", 8, 8),
            FieldSpec::leaf("B", "bool", 1, 1),
            FieldSpec::composite(
                "C",
                "struct{D int64; E []byte}",
                8,
                vec![FieldSpec::leaf("D", "int64", 8, 8), FieldSpec::leaf("E", "[]byte", 24, 8)],
            ),
            FieldSpec::leaf("F", "*string", 8, 8),
        ])
        .unwrap();

        assert_eq!(
            spans(&fields),
            vec![(0, 8, false), (8, 9, false), (9, 16, true), (16, 48, false), (48, 56, false)]
        );
        let nested = &fields[3];
        assert_eq!(nested.size(), Size::new(32));
        assert_eq!(spans(nested.children()), vec![(16, 24, false), (24, 48, false)]);
    }

    #[test]
    fn test_trailing_zero_sized_field_takes_a_byte() {
        let fields = compute_layout(&[
            FieldSpec::leaf("A", "int64", 8, 8),
            FieldSpec::leaf("Z", "struct{}", 0, 1),
        ])
        .unwrap();

        assert_eq!(spans(&fields), vec![(0, 8, false), (8, 9, false), (9, 16, true)]);
        assert_eq!(fields[1].declared_size(), Size::zero());
    }

    #[test]
    fn test_leading_zero_sized_field_stays_empty() {
        let fields = compute_layout(&[
            FieldSpec::leaf("Z", "[0]int", 0, 8),
            FieldSpec::leaf("A", "int64", 8, 8),
        ])
        .unwrap();

        assert_eq!(spans(&fields), vec![(0, 0, false), (0, 8, false)]);
    }

    #[test]
    fn test_natural_alignment() {
        let calculator = LayoutCalculator::new(StructAlignment::Natural);
        let fields = calculator
            .compute(&[FieldSpec::leaf("A", "int32", 4, 4), FieldSpec::leaf("B", "bool", 1, 1)], Offset::zero())
            .unwrap();
        assert_eq!(spans(&fields), vec![(0, 4, false), (4, 5, false), (5, 8, true)]);

        let fields = calculator.compute(&[FieldSpec::leaf("B", "bool", 1, 1)], Offset::zero()).unwrap();
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_trailing_padding_relative_to_base() {
        let fields = LayoutCalculator::default()
            .compute(&[FieldSpec::leaf("A", "int32", 4, 4)], Offset::new(4))
            .unwrap();
        assert_eq!(spans(&fields), vec![(4, 8, false), (8, 12, true)]);
    }

    #[test]
    fn test_empty_layout() {
        assert!(compute_layout(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_malformed_specs() {
        let err = compute_layout(&[FieldSpec::leaf("A", "int", -1, 8)]).unwrap_err();
        assert_eq!(err, LayoutError::NegativeSize { field: "A".to_string(), size: -1 });

        let err = compute_layout(&[FieldSpec::leaf("A", "int", 8, -8)]).unwrap_err();
        assert_eq!(err, LayoutError::NegativeAlignment { field: "A".to_string(), align: -8 });

        let err = compute_layout(&[FieldSpec::leaf("A", "int", 8, 6)]).unwrap_err();
        assert_eq!(err, LayoutError::InvalidAlignment { field: "A".to_string(), align: 6 });

        let err = compute_layout(&[FieldSpec::leaf("A", "int", 8, 0)]).unwrap_err();
        assert_eq!(err, LayoutError::InvalidAlignment { field: "A".to_string(), align: 0 });
    }

    /// Checks contiguity, alignment and composite sizes, recursively.
    fn check_placement(fields: &[Field], base: u64) -> Result<(), TestCaseError> {
        let mut pos = base;
        for field in fields {
            prop_assert_eq!(field.start().as_u64(), pos);
            if let Some(align) = field.align() {
                prop_assert!(field.start().is_aligned(align.as_u64()));
            }
            if !field.children().is_empty() {
                prop_assert_eq!(field.size(), field.children().iter().map(Field::size).sum::<Size>());
                check_placement(field.children(), pos)?;
            }
            pos = field.end().as_u64();
        }
        Ok(())
    }

    fn leaf_bytes(fields: &[Field]) -> u64 {
        fields
            .iter()
            .map(|f| match f.kind() {
                FieldKind::Padding => 0,
                FieldKind::Leaf { .. } => f.size().as_u64(),
                FieldKind::Composite { children, .. } => leaf_bytes(children),
            })
            .sum()
    }

    proptest! {
        #[test]
        fn test_layout_invariants(specs in field_specs(), natural in any::<bool>()) {
            let alignment = if natural { StructAlignment::Natural } else { StructAlignment::default() };
            let fields = LayoutCalculator::new(alignment).compute(&specs, Offset::zero()).unwrap();

            check_placement(&fields, 0)?;

            let size: u64 = fields.iter().map(|f| f.size().as_u64()).sum();
            let padding: u64 = fields.iter().map(Field::padding_bytes).sum();
            prop_assert_eq!(size, leaf_bytes(&fields) + padding);

            let widest = specs.iter().map(|s| s.align as u64).max().unwrap_or(1);
            let record_align = if natural { widest } else { 8 };
            prop_assert_eq!(size % record_align, 0);
            prop_assert_eq!(fields.iter().filter(|f| !f.is_padding()).count(), specs.len());
        }

        #[test]
        fn test_layout_is_position_independent(specs in field_specs()) {
            let calculator = LayoutCalculator::default();
            let at_zero = calculator.compute(&specs, Offset::zero()).unwrap();
            let shifted = calculator.compute(&specs, Offset::new(64)).unwrap();

            check_placement(&shifted, 64)?;
            let sizes: Vec<Size> = at_zero.iter().map(Field::size).collect();
            let shifted_sizes: Vec<Size> = shifted.iter().map(Field::size).collect();
            prop_assert_eq!(sizes, shifted_sizes);
        }
    }
}

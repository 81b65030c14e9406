// Sat Oct 17 2026 - Alex

use crate::structure::field::children_to_specs;
use crate::structure::{Field, LayoutCalculator, LayoutError, Offset, StructLayout};
use std::cmp::Ordering;

/// Proposes a field order with less padding: zero-sized fields first, then
/// by alignment and size descending, ties broken by name.
///
/// Inline records are reordered too. Fields of a named struct type keep
/// their layout, since the proposal can only reorder this declaration.
///
/// This is a greedy heuristic. The result may still carry padding, and on
/// nested records it is not guaranteed to beat the original order, so
/// callers compare before and after.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldOptimizer {
    calculator: LayoutCalculator,
}

impl FieldOptimizer {
    pub fn new(calculator: LayoutCalculator) -> Self {
        Self { calculator }
    }

    pub fn optimize(&self, layout: &StructLayout) -> Result<StructLayout, LayoutError> {
        let fields = self.arrange(layout.fields())?;

        let specs = children_to_specs(&fields)?;
        let fields = self.calculator.compute(&specs, Offset::zero())?;

        log::trace!(
            "optimized {}: padding {} -> {}",
            layout.name(),
            layout.padding(),
            fields.iter().map(Field::padding_bytes).sum::<u64>()
        );

        Ok(layout.with_fields(fields))
    }

    /// Sorts `fields` without padding. Inline records are arranged and laid
    /// out first so they sort by their new size.
    fn arrange(&self, fields: &[Field]) -> Result<Vec<Field>, LayoutError> {
        let mut arranged = Vec::with_capacity(fields.len());
        for field in fields.iter().filter(|f| !f.is_padding()) {
            if field.is_inline_record() {
                let children = self.arrange(field.children())?;
                let children = self.calculator.compute(&children_to_specs(&children)?, Offset::zero())?;
                arranged.push(field.with_children(children));
            } else {
                arranged.push(field.clone());
            }
        }
        arranged.sort_by(layout_order);
        Ok(arranged)
    }
}

// Declared sizes, so a trailing zero-sized field widened by the previous
// layout still sorts first.
fn layout_order(a: &Field, b: &Field) -> Ordering {
    b.declared_size()
        .is_zero()
        .cmp(&a.declared_size().is_zero())
        .then_with(|| b.align_bytes().cmp(&a.align_bytes()))
        .then_with(|| b.declared_size().cmp(&a.declared_size()))
        .then_with(|| a.name().cmp(b.name()))
}

// Sat Oct 17 2026 - Alex

//! proptest generators for field descriptors.

use crate::structure::FieldSpec;
use proptest::prelude::*;

prop_compose! {
    /// A leaf whose size is a multiple of its power-of-two alignment, as
    /// compilers produce.
    pub fn leaf_spec()(shift in 0u32..4, count in 0i64..5, name in "[a-z]{1,4}") -> FieldSpec {
        let align = 1i64 << shift;
        FieldSpec::leaf(&name, &format!("t{}", align * count), align * count, align)
    }
}

/// Leaves and records nested up to two levels. Records are either inline
/// (`struct{...}`) or of a named type, and take the widest child alignment.
pub fn field_spec() -> impl Strategy<Value = FieldSpec> {
    leaf_spec().prop_recursive(2, 24, 4, |inner| {
        (prop::collection::vec(inner, 1..4), "[a-z]{1,4}", any::<bool>()).prop_map(|(children, name, inline)| {
            let align = children.iter().map(|c| c.align).max().unwrap_or(1);
            let type_name = if inline { "struct{...}".to_string() } else { name.to_uppercase() };
            FieldSpec::composite(&name, &type_name, align, children)
        })
    })
}

pub fn field_specs() -> impl Strategy<Value = Vec<FieldSpec>> {
    prop::collection::vec(field_spec(), 0..8)
}

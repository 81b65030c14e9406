// Tue Jan 15 2026 - Alex

pub mod alignment;
pub mod calculator;
pub mod error;
pub mod field;
pub mod layout;
pub mod offset;
pub mod optimizer;
pub mod serializer;
pub mod size;
#[cfg(test)]
pub(crate) mod strategies;
pub mod validator;

pub use alignment::Alignment;
pub use calculator::{compute_layout, LayoutCalculator, StructAlignment};
pub use error::LayoutError;
pub use field::{Field, FieldKind, FieldSpec};
pub use layout::{LineRange, StructLayout};
pub use offset::Offset;
pub use optimizer::FieldOptimizer;
pub use serializer::SerializableLayout;
pub use size::Size;
pub use validator::StructureValidator;

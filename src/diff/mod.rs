// Tue Jan 15 2026 - Alex

pub mod changes;
pub mod lines;

pub use changes::{changed_lines, changed_structs, structs_touching, ChangedStruct};
pub use lines::{split_lines, BlockKind, DiffBlock, LineDiff};

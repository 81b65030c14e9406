// Tue Jan 13 2026 - Alex

pub mod formatter;
pub mod render;

pub use formatter::{LayoutFormatter, OffsetFormat};
pub use render::{GoRenderer, Renderer};

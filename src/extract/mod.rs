// Sat Oct 17 2026 - Alex

pub mod go;
pub mod manifest;

pub use go::GoExtractor;
pub use manifest::ManifestExtractor;

use crate::structure::{LayoutError, StructLayout};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{}:{line}: {message}", path.display())]
    Parse { path: PathBuf, line: usize, message: String },
    #[error("{}: {message}", path.display())]
    TypeCheck { path: PathBuf, message: String },
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a source file into its struct declarations with computed layouts
/// and line ranges.
///
/// Implementations must lay fields out with the
/// [`LayoutCalculator`](crate::structure::LayoutCalculator). Any error means
/// the file cannot be analyzed and should be skipped.
pub trait StructExtractor: Send + Sync {
    fn extract(&self, path: &Path, source: &[u8]) -> Result<Vec<StructLayout>, ExtractError>;

    fn name(&self) -> &'static str;
}

/// Picks the extractor for a path: JSON manifests by extension, Go source
/// otherwise.
pub fn extractor_for<'a>(
    path: &Path,
    go: &'a GoExtractor,
    manifest: &'a ManifestExtractor,
) -> &'a dyn StructExtractor {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        manifest
    } else {
        go
    }
}

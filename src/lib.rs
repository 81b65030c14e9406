// Tue Jan 15 2026 - Alex

pub mod cli;
pub mod config;
pub mod diff;
pub mod extract;
pub mod output;
pub mod review;
pub mod structure;
pub mod utils;

pub use config::Config;
pub use diff::{changed_structs, ChangedStruct};
pub use extract::{ExtractError, GoExtractor, ManifestExtractor, StructExtractor};
pub use output::{GoRenderer, Renderer};
pub use review::{Advisor, Analyzer, Comment, FileChange, Suggestion};
pub use structure::{FieldOptimizer, LayoutCalculator, LayoutError, StructLayout};

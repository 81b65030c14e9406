// Sat Oct 17 2026 - Alex

pub mod advisor;
pub mod analyzer;

pub use advisor::{Advisor, Regression, Suggestion};
pub use analyzer::{is_vendored, Analyzer, Comment, FileChange};

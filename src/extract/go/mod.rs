// Sat Oct 17 2026 - Alex

pub mod lexer;
pub mod parser;
pub mod sizes;

pub use sizes::GoSizes;

use crate::extract::{ExtractError, StructExtractor};
use crate::structure::{LayoutCalculator, LineRange, Offset, StructLayout};
use parser::Parser;
use sizes::Resolver;
use std::path::{Path, PathBuf};

/// Extracts struct declarations from Go source files.
#[derive(Debug, Clone, Default)]
pub struct GoExtractor {
    calculator: LayoutCalculator,
    sizes: GoSizes,
}

impl GoExtractor {
    pub fn new(word_size: u64, calculator: LayoutCalculator) -> Self {
        Self { calculator, sizes: GoSizes::new(word_size) }
    }
}

impl StructExtractor for GoExtractor {
    fn extract(&self, path: &Path, source: &[u8]) -> Result<Vec<StructLayout>, ExtractError> {
        let src = std::str::from_utf8(source).map_err(|e| {
            let line = source[..e.valid_up_to()].iter().filter(|b| **b == b'\n').count() + 1;
            parse_error(path, line, "invalid UTF-8".to_string())
        })?;

        let tokens = lexer::tokenize(src).map_err(|e| parse_error(path, e.line, e.message))?;
        let decls = Parser::new(src, &tokens)
            .parse_file()
            .map_err(|e| parse_error(path, e.line, e.message))?;

        let mut resolver = Resolver::new(path, self.sizes, self.calculator, &decls)?;
        let mut structs = Vec::new();

        for decl in &decls {
            let Some(specs) = resolver.record_specs(decl)? else {
                if decl.generic {
                    log::debug!("{}: skipping generic type {}", path.display(), decl.name);
                }
                continue;
            };

            let fields = self.calculator.compute(&specs, Offset::zero())?;
            structs.push(StructLayout::new(&decl.name, LineRange::new(decl.start_line, decl.end_line), fields));
        }

        log::debug!("{}: {} type declarations, {} structs", path.display(), decls.len(), structs.len());
        Ok(structs)
    }

    fn name(&self) -> &'static str {
        "go"
    }
}

fn parse_error(path: &Path, line: usize, message: String) -> ExtractError {
    ExtractError::Parse { path: PathBuf::from(path), line, message }
}

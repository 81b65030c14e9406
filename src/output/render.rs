// Sat Oct 17 2026 - Alex

use crate::structure::{Field, StructLayout};
use itertools::Itertools;

/// Turns a laid-out struct back into a declaration for review comments.
pub trait Renderer: Send + Sync {
    fn render(&self, layout: &StructLayout) -> String;

    /// Info string for the fenced code block the declaration goes in.
    fn fence(&self) -> &str;
}

/// Prints gofmt-style Go declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoRenderer;

impl GoRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Inline struct types are spelled out; named ones are referenced by name.
    fn render_fields(&self, fields: &[Field], depth: usize) -> String {
        let indent = "\t".repeat(depth);
        let visible: Vec<&Field> = fields.iter().filter(|f| !f.is_padding()).collect();
        let width = visible.iter().map(|f| f.name().chars().count()).max().unwrap_or(0);

        visible
            .iter()
            .map(|f| {
                let ty = if f.is_inline_record() {
                    format!("struct {{\n{}\n{}}}", self.render_fields(f.children(), depth + 1), indent)
                } else {
                    f.type_name().to_string()
                };
                format!("{}{:<width$} {}", indent, f.name(), ty, width = width)
            })
            .join("\n")
    }
}

impl Renderer for GoRenderer {
    fn render(&self, layout: &StructLayout) -> String {
        if layout.fields().iter().all(Field::is_padding) {
            return format!("type {} struct{{}}", layout.name());
        }
        format!("type {} struct {{\n{}\n}}", layout.name(), self.render_fields(layout.fields(), 1))
    }

    fn fence(&self) -> &str {
        "go"
    }
}

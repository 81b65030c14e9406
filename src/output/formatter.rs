// Tue Jan 13 2026 - Alex

use crate::structure::{Field, StructLayout};

/// Plain-text layout listing for the terminal.
pub struct LayoutFormatter {
    offset_format: OffsetFormat,
    show_padding: bool,
    max_name_width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetFormat {
    Hex,
    Decimal,
}

impl LayoutFormatter {
    pub fn new() -> Self {
        Self {
            offset_format: OffsetFormat::Decimal,
            show_padding: true,
            max_name_width: 32,
        }
    }

    pub fn with_offset_format(mut self, format: OffsetFormat) -> Self {
        self.offset_format = format;
        self
    }

    pub fn with_padding(mut self, show: bool) -> Self {
        self.show_padding = show;
        self
    }

    pub fn format_offset(&self, offset: u64) -> String {
        match self.offset_format {
            OffsetFormat::Hex => format!("+0x{:04x}", offset),
            OffsetFormat::Decimal => format!("+{:<5}", offset),
        }
    }

    pub fn format_structure(&self, layout: &StructLayout) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "struct {} {{  // lines {}-{}, size: {}, padding: {}",
            layout.name(),
            layout.lines().start,
            layout.lines().end,
            layout.size(),
            layout.padding()
        ));

        for field in layout.fields() {
            self.format_field(field, 1, &mut lines);
        }

        lines.push("};".to_string());
        lines.join("\n")
    }

    pub fn format_structure_list(&self, layouts: &[StructLayout]) -> String {
        let mut lines = Vec::new();

        for layout in layouts {
            lines.push(self.format_structure(layout));
            lines.push(String::new());
        }

        lines.join("\n")
    }

    fn format_field(&self, field: &Field, depth: usize, lines: &mut Vec<String>) {
        if field.is_padding() && !self.show_padding {
            return;
        }

        let indent = "    ".repeat(depth);
        let offset = self.format_offset(field.start().as_u64());

        if field.is_padding() {
            lines.push(format!("{}/* {} */ // {} bytes padding", indent, offset, field.size()));
            return;
        }

        let name = if field.name().chars().count() > self.max_name_width {
            let kept: String = field.name().chars().take(self.max_name_width - 3).collect();
            format!("{}...", kept)
        } else {
            field.name().to_string()
        };

        lines.push(format!(
            "{}/* {} */ {:<width$} {};  // {} bytes, align {}",
            indent,
            offset,
            name,
            field.type_name(),
            field.size(),
            field.align_bytes(),
            width = self.max_name_width.min(16)
        ));

        for child in field.children() {
            self.format_field(child, depth + 1, lines);
        }
    }
}

impl Default for LayoutFormatter {
    fn default() -> Self {
        Self::new()
    }
}

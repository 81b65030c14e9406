// Tue Jan 13 2026 - Alex

use crate::structure::StructLayout;
use serde::Serialize;

/// Flat, JSON-friendly summary of a struct layout.
#[derive(Debug, Serialize)]
pub struct SerializableLayout<'a> {
    name: &'a str,
    start_line: usize,
    end_line: usize,
    size: u64,
    padding: u64,
    fields: Vec<SerializableField<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SerializableField<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    type_name: &'a str,
    start: u64,
    end: u64,
    size: u64,
    align: u64,
    is_padding: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<SerializableField<'a>>,
}

impl<'a> From<&'a StructLayout> for SerializableLayout<'a> {
    fn from(layout: &'a StructLayout) -> Self {
        Self {
            name: layout.name(),
            start_line: layout.lines().start,
            end_line: layout.lines().end,
            size: layout.size().as_u64(),
            padding: layout.padding(),
            fields: layout.fields().iter().map(SerializableField::from).collect(),
        }
    }
}

impl<'a> From<&'a crate::structure::Field> for SerializableField<'a> {
    fn from(field: &'a crate::structure::Field) -> Self {
        Self {
            name: field.name(),
            type_name: field.type_name(),
            start: field.start().as_u64(),
            end: field.end().as_u64(),
            size: field.size().as_u64(),
            align: field.align_bytes(),
            is_padding: field.is_padding(),
            children: field.children().iter().map(SerializableField::from).collect(),
        }
    }
}

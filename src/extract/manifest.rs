// Sat Oct 17 2026 - Alex

use crate::extract::{ExtractError, StructExtractor};
use crate::structure::{FieldSpec, LayoutCalculator, LineRange, Offset, StructLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declarations produced by an out-of-process type checker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub structs: Vec<ManifestStruct>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestStruct {
    pub name: String,
    pub lines: LineRange,
    pub fields: Vec<FieldSpec>,
}

/// Reads field descriptors from a JSON manifest and lays them out.
#[derive(Debug, Clone, Default)]
pub struct ManifestExtractor {
    calculator: LayoutCalculator,
}

impl ManifestExtractor {
    pub fn new(calculator: LayoutCalculator) -> Self {
        Self { calculator }
    }

    pub fn layout(&self, manifest: &Manifest) -> Result<Vec<StructLayout>, ExtractError> {
        manifest
            .structs
            .iter()
            .map(|s| {
                let fields = self.calculator.compute(&s.fields, Offset::zero())?;
                Ok(StructLayout::new(&s.name, s.lines, fields))
            })
            .collect()
    }
}

impl StructExtractor for ManifestExtractor {
    fn extract(&self, path: &Path, source: &[u8]) -> Result<Vec<StructLayout>, ExtractError> {
        let manifest: Manifest = serde_json::from_slice(source)?;
        log::debug!("{}: {} structs in manifest", path.display(), manifest.structs.len());
        self.layout(&manifest)
    }

    fn name(&self) -> &'static str {
        "manifest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::LayoutError;

    const MANIFEST: &str = r#"{
        "structs": [
            {
                "name": "Qux",
                "lines": { "start": 15, "end": 23 },
                "fields": [
                    { "name": "A", "type": "int", "size": 8, "align": 8 },
                    { "name": "B", "type": "bool", "size": 1, "align": 1 },
                    {
                        "name": "C",
                        "type": "struct{D int64; E []byte}",
                        "align": 8,
                        "nested": [
                            { "name": "D", "type": "int64", "size": 8, "align": 8 },
                            { "name": "E", "type": "[]byte", "size": 24, "align": 8 }
                        ]
                    },
                    { "name": "F", "type": "*string", "size": 8, "align": 8 }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_manifest_is_laid_out() {
        let structs = ManifestExtractor::default()
            .extract(Path::new("qux.json"), MANIFEST.as_bytes())
            .unwrap();

        assert_eq!(structs.len(), 1);
        let qux = &structs[0];
        assert_eq!(qux.lines(), LineRange::new(15, 23));
        assert_eq!(qux.size().as_u64(), 56);
        assert_eq!(qux.padding(), 7);
        assert_eq!(qux.get_field("C").unwrap().size().as_u64(), 32);
    }

    #[test]
    fn test_malformed_fields_fail_loudly() {
        let manifest = r#"{"structs": [{"name": "Bad", "lines": {"start": 1, "end": 2},
            "fields": [{"name": "A", "type": "int", "size": -8, "align": 8}]}]}"#;
        let err = ManifestExtractor::default()
            .extract(Path::new("bad.json"), manifest.as_bytes())
            .unwrap_err();
        assert!(matches!(err, ExtractError::Layout(LayoutError::NegativeSize { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let err = ManifestExtractor::default()
            .extract(Path::new("bad.json"), b"{ not json")
            .unwrap_err();
        assert!(matches!(err, ExtractError::Manifest(_)));
    }
}

// Sat Oct 17 2026 - Alex

use super::parser::{TypeDecl, TypeExpr};
use crate::extract::ExtractError;
use crate::structure::{FieldSpec, LayoutCalculator, Offset};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// gc size table for a target word size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoSizes {
    word: u64,
}

impl GoSizes {
    pub fn new(word: u64) -> Self {
        Self { word }
    }

    pub fn word(&self) -> u64 {
        self.word
    }

    /// Size and alignment of a predeclared type.
    pub fn builtin(&self, name: &str) -> Option<(u64, u64)> {
        let w = self.word;
        let (size, natural) = match name {
            "bool" | "int8" | "uint8" | "byte" => (1, 1),
            "int16" | "uint16" => (2, 2),
            "int32" | "uint32" | "rune" | "float32" => (4, 4),
            "int64" | "uint64" | "float64" => (8, 8),
            "complex64" => (8, 4),
            "complex128" => (16, 8),
            "int" | "uint" | "uintptr" => (w, w),
            "string" | "error" | "any" => (2 * w, w),
            _ => return None,
        };
        Some((size, natural.min(w)))
    }

    fn word_sized(&self) -> Shape {
        Shape::Scalar { size: self.word, align: self.word }
    }
}

impl Default for GoSizes {
    fn default() -> Self {
        Self::new(8)
    }
}

/// What a type looks like in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Shape {
    Scalar { size: u64, align: u64 },
    Record { specs: Vec<FieldSpec>, size: u64, align: u64 },
}

impl Shape {
    fn size(&self) -> u64 {
        match self {
            Shape::Scalar { size, .. } | Shape::Record { size, .. } => *size,
        }
    }

    fn align(&self) -> u64 {
        match self {
            Shape::Scalar { align, .. } | Shape::Record { align, .. } => *align,
        }
    }
}

/// Resolves the type declarations of one file to shapes.
pub(crate) struct Resolver<'a> {
    path: &'a Path,
    sizes: GoSizes,
    calculator: LayoutCalculator,
    decls: IndexMap<&'a str, &'a TypeDecl>,
    resolved: HashMap<&'a str, Shape>,
    visiting: Vec<&'a str>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        path: &'a Path,
        sizes: GoSizes,
        calculator: LayoutCalculator,
        decls: &'a [TypeDecl],
    ) -> Result<Self, ExtractError> {
        let mut by_name = IndexMap::with_capacity(decls.len());
        for decl in decls {
            if by_name.insert(decl.name.as_str(), decl).is_some() {
                return Err(type_error(path, format!("{} redeclared in this file", decl.name)));
            }
        }

        Ok(Self {
            path,
            sizes,
            calculator,
            decls: by_name,
            resolved: HashMap::new(),
            visiting: Vec::new(),
        })
    }

    /// Field specs of a declaration whose underlying type is a struct.
    pub fn record_specs(&mut self, decl: &'a TypeDecl) -> Result<Option<Vec<FieldSpec>>, ExtractError> {
        if decl.generic {
            return Ok(None);
        }
        match self.resolve_named(&decl.name)? {
            Shape::Record { specs, .. } => Ok(Some(specs)),
            Shape::Scalar { .. } => Ok(None),
        }
    }

    pub fn resolve(&mut self, ty: &'a TypeExpr) -> Result<Shape, ExtractError> {
        match ty {
            TypeExpr::Named(name) => self.resolve_named(name),
            TypeExpr::Qualified(pkg, name) if pkg == "unsafe" && name == "Pointer" => Ok(self.sizes.word_sized()),
            TypeExpr::Qualified(pkg, name) => {
                Err(type_error(self.path, format!("cannot size imported type {}.{}", pkg, name)))
            }
            TypeExpr::Instance(text) => {
                Err(type_error(self.path, format!("generic instantiation {} is not supported", text)))
            }
            TypeExpr::Pointer(_) | TypeExpr::Map(..) | TypeExpr::Chan(..) | TypeExpr::Func(_) => {
                Ok(self.sizes.word_sized())
            }
            TypeExpr::Slice(_) => Ok(Shape::Scalar { size: 3 * self.sizes.word(), align: self.sizes.word() }),
            TypeExpr::Interface(_) => Ok(Shape::Scalar { size: 2 * self.sizes.word(), align: self.sizes.word() }),
            TypeExpr::Array(len, elem) => {
                let elem = self.resolve(elem)?;
                let size = len
                    .checked_mul(elem.size())
                    .filter(|s| i64::try_from(*s).is_ok())
                    .ok_or_else(|| type_error(self.path, format!("array {} is too large", ty)))?;
                Ok(Shape::Scalar { size, align: elem.align() })
            }
            TypeExpr::SymbolicArray(len, _) => {
                Err(type_error(self.path, format!("array length {} is not a literal", len)))
            }
            TypeExpr::Struct(fields) => {
                let mut specs = Vec::with_capacity(fields.len());
                for field in fields {
                    let shape = self.resolve(&field.ty)?;
                    specs.push(to_spec(&field.name, &field.ty.to_string(), shape));
                }

                let size = self
                    .calculator
                    .compute(&specs, Offset::zero())?
                    .iter()
                    .map(|f| f.size().as_u64())
                    .sum();
                let align = specs.iter().map(|s| s.align as u64).max().unwrap_or(1);
                Ok(Shape::Record { specs, size, align })
            }
        }
    }

    fn resolve_named(&mut self, name: &str) -> Result<Shape, ExtractError> {
        let Some((&key, &decl)) = self.decls.get_key_value(name) else {
            return self
                .sizes
                .builtin(name)
                .map(|(size, align)| Shape::Scalar { size, align })
                .ok_or_else(|| type_error(self.path, format!("undefined type {}", name)));
        };

        if let Some(shape) = self.resolved.get(key) {
            return Ok(shape.clone());
        }
        if decl.generic {
            return Err(type_error(self.path, format!("generic type {} used without instantiation", key)));
        }
        if self.visiting.contains(&key) {
            return Err(type_error(self.path, format!("invalid recursive type {}", key)));
        }

        self.visiting.push(key);
        let shape = self.resolve(&decl.ty);
        self.visiting.pop();

        let shape = shape?;
        self.resolved.insert(key, shape.clone());
        Ok(shape)
    }
}

fn to_spec(name: &str, type_name: &str, shape: Shape) -> FieldSpec {
    match shape {
        Shape::Record { specs, align, .. } if !specs.is_empty() => FieldSpec::composite(name, type_name, align as i64, specs),
        other => FieldSpec::leaf(name, type_name, other.size() as i64, other.align() as i64),
    }
}

fn type_error(path: &Path, message: String) -> ExtractError {
    ExtractError::TypeCheck { path: PathBuf::from(path), message }
}

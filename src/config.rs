// Tue Jan 13 2026 - Alex

use crate::structure::{Alignment, LayoutCalculator, StructAlignment};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pointer width of the target, in bytes.
    pub word_size: u64,
    pub struct_alignment: StructAlignment,
    pub report_regressions: bool,
    pub parallel: bool,
    pub exclude_vendored: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_size: 8,
            struct_alignment: StructAlignment::default(),
            report_regressions: true,
            parallel: true,
            exclude_vendored: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_word_size(mut self, word_size: u64) -> Self {
        self.word_size = word_size;
        self
    }

    pub fn with_struct_alignment(mut self, alignment: StructAlignment) -> Self {
        self.struct_alignment = alignment;
        self
    }

    pub fn with_regressions(mut self, report: bool) -> Self {
        self.report_regressions = report;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_vendored_excluded(mut self, exclude: bool) -> Self {
        self.exclude_vendored = exclude;
        self
    }

    pub fn calculator(&self) -> LayoutCalculator {
        LayoutCalculator::new(self.struct_alignment)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.word_size != 4 && self.word_size != 8 {
            return Err(ConfigError::Validation(format!("word_size must be 4 or 8, got {}", self.word_size)));
        }
        if let StructAlignment::Fixed(n) = self.struct_alignment {
            Alignment::new(n)
                .map_err(|_| ConfigError::Validation(format!("struct_alignment must be a power of two, got {}", n)))?;
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;

        let config: Config = match extension(path).as_str() {
            "json" => serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        let contents = match extension(path).as_str() {
            "json" => serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;
        Ok(())
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

fn extension(path: &Path) -> String {
    path.extension().and_then(|e| e.to_str()).unwrap_or("").to_lowercase()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

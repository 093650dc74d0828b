//! Editor tunables, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```toml
//! history_capacity = 20
//! resize_filter = "bilinear"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::debounce::DEFAULT_DEBOUNCE_MS;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::raster::FilterType;

/// Longest side of the on-screen copy of the image.
pub const DEFAULT_MAX_DISPLAY_DIMENSION: u32 = 1000;

/// Longest side of each image in the before/after comparison.
pub const DEFAULT_COMPARISON_MAX_DIMENSION: u32 = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("{field} must be greater than zero")]
    Invalid { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of snapshots kept for undo/redo.
    pub history_capacity: usize,
    pub max_display_dimension: u32,
    pub comparison_max_dimension: u32,
    /// Quiescence window before a slider resize is committed.
    pub resize_debounce_ms: u64,
    pub resize_filter: FilterType,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            max_display_dimension: DEFAULT_MAX_DISPLAY_DIMENSION,
            comparison_max_dimension: DEFAULT_COMPARISON_MAX_DIMENSION,
            resize_debounce_ms: DEFAULT_DEBOUNCE_MS,
            resize_filter: FilterType::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject zero values; the debounce window may be zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "history_capacity",
            });
        }
        if self.max_display_dimension == 0 {
            return Err(ConfigError::Invalid {
                field: "max_display_dimension",
            });
        }
        if self.comparison_max_dimension == 0 {
            return Err(ConfigError::Invalid {
                field: "comparison_max_dimension",
            });
        }
        Ok(())
    }
}

//! Configuration schema types for `gridslice.toml`
//!
//! Defines the structure and validation rules for slicing configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dividers::{DividerModel, MAX_CELLS};

/// Grid layout section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows (clamped to 1-20 when applied)
    #[serde(default = "default_cells")]
    pub rows: u32,
    /// Number of columns (clamped to 1-20 when applied)
    #[serde(default = "default_cells")]
    pub cols: u32,
    /// Explicit vertical divider positions in (0, 1); overrides `cols`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<Vec<f64>>,
    /// Explicit horizontal divider positions in (0, 1); overrides `rows`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<Vec<f64>>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_cells(),
            cols: default_cells(),
            vertical: None,
            horizontal: None,
        }
    }
}

fn default_cells() -> u32 {
    4
}

/// Preview playback section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Frames per second
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Start playing immediately
    #[serde(default = "default_true")]
    pub playing: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            playing: true,
        }
    }
}

fn default_fps() -> u32 {
    crate::preview::DEFAULT_FPS
}

fn default_true() -> bool {
    true
}

/// Pointer interaction section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Divider hit radius in canvas pixels
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: f64,
    /// Marquees shorter than this many pixels count as clicks
    #[serde(default = "default_click_threshold")]
    pub click_threshold: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: default_hit_tolerance(),
            click_threshold: default_click_threshold(),
        }
    }
}

fn default_hit_tolerance() -> f64 {
    crate::dividers::DEFAULT_HIT_TOLERANCE
}

fn default_click_threshold() -> f64 {
    crate::selection::DEFAULT_CLICK_THRESHOLD
}

/// Export section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory
    #[serde(default = "default_out")]
    pub out: PathBuf,
    /// Integer scale factor applied to exported frames
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Loop exported GIFs forever
    #[serde(default = "default_true")]
    pub loop_gif: bool,
    /// Columns in the exported sprite sheet (default: one row)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_columns: Option<u32>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out: default_out(),
            scale: default_scale(),
            loop_gif: true,
            sheet_columns: None,
        }
    }
}

fn default_out() -> PathBuf {
    PathBuf::from("build")
}

fn default_scale() -> u32 {
    1
}

/// Complete `gridslice.toml` configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GridsliceConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "preview.fps")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gridslice.toml: '{}' {}", self.field, self.message)
    }
}

impl GridsliceConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        // Out-of-range rows/cols are clamped rather than rejected
        if let Err(e) = self.divider_model() {
            errors.push(ConfigValidationError {
                field: "grid".to_string(),
                message: e.to_string(),
            });
        }

        if self.preview.fps == 0 {
            errors.push(ConfigValidationError {
                field: "preview.fps".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.interaction.hit_tolerance.is_nan() || self.interaction.hit_tolerance < 0.0 {
            errors.push(ConfigValidationError {
                field: "interaction.hit_tolerance".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }

        if self.interaction.click_threshold.is_nan() || self.interaction.click_threshold < 0.0 {
            errors.push(ConfigValidationError {
                field: "interaction.click_threshold".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }

        if self.export.scale == 0 {
            errors.push(ConfigValidationError {
                field: "export.scale".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.export.sheet_columns == Some(0) {
            errors.push(ConfigValidationError {
                field: "export.sheet_columns".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Build the divider model this configuration describes.
    ///
    /// Explicit positions win over the row/column counts on their axis.
    pub fn divider_model(&self) -> Result<DividerModel, crate::dividers::DividerError> {
        let even = DividerModel::new(self.grid.rows, self.grid.cols);
        if self.grid.vertical.is_none() && self.grid.horizontal.is_none() {
            return Ok(even);
        }
        let vertical = self.grid.vertical.clone().unwrap_or_else(|| even.vertical().to_vec());
        let horizontal = self
            .grid
            .horizontal
            .clone()
            .unwrap_or_else(|| even.horizontal().to_vec());
        DividerModel::from_positions(vertical, horizontal)
    }

    /// Effective (clamped) rows and columns.
    pub fn grid_size(&self) -> (u32, u32) {
        (self.grid.rows.clamp(1, MAX_CELLS), self.grid.cols.clamp(1, MAX_CELLS))
    }
}

//! Processing configuration.
//!
//! Handles loading, validating, and merging an `imgresize.toml` file. Stock
//! defaults reproduce the built-in behaviour; a user file overrides only the
//! keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! jpeg_quality = 75        # JPEG encoding quality (1-100)
//! filter = "triangle"      # nearest | triangle | catmull-rom | gaussian | lanczos3
//!
//! [watermark]
//! margin = 10              # Distance from the left and bottom edges, in pixels
//! width_divisor = 4        # Watermark width = base width / divisor (never upscaled)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Quality, ResampleFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings shared by every operation on an
/// [`ImageDocument`](crate::ImageDocument).
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub jpeg_quality: u32,
    /// Interpolation used for resizes and watermark scaling.
    pub filter: ResampleFilter,
    /// Watermark placement.
    pub watermark: WatermarkConfig,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 75,
            filter: ResampleFilter::default(),
            watermark: WatermarkConfig::default(),
        }
    }
}

impl ResizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Validation(
                "jpeg_quality must be 1-100".into(),
            ));
        }
        if self.watermark.width_divisor == 0 {
            return Err(ConfigError::Validation(
                "watermark.width_divisor must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.jpeg_quality)
    }
}

/// Watermark placement settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatermarkConfig {
    /// Distance from the left edge and from the bottom edge, in pixels.
    pub margin: u32,
    /// The mark is shown at `base width / width_divisor`, capped at its native width.
    pub width_divisor: u32,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            margin: 10,
            width_divisor: 4,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ResizeConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ResizeConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ResizeConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Parse config TOML text on top of the stock defaults.
pub fn parse_config(content: &str) -> Result<ResizeConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Load a config file.
///
/// A missing file yields the stock defaults. A present file is merged onto
/// the defaults, rejects unknown keys, and is validated.
pub fn load_config(path: &Path) -> Result<ResizeConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(stock_defaults_value(), None);
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

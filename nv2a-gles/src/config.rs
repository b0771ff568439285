//! Context configuration (TOML)
//!
//! Surface size, implementation limits and diagnostics switches. Every field
//! has a default, so an empty document yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading a [`ContextConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for a [`crate::Context`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ContextConfig {
    /// Render target dimensions
    #[serde(default)]
    pub surface: SurfaceConfig,
    /// Implementation limits reported through queries and enforced by mutators
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Render target size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Width (default: 640)
    #[serde(default = "default_width")]
    pub width: u32,
    /// Height (default: 480)
    #[serde(default = "default_height")]
    pub height: u32,
}

/// Implementation-defined limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default = "default_modelview_stack")]
    pub max_modelview_stack: usize,
    #[serde(default = "default_small_stack")]
    pub max_projection_stack: usize,
    #[serde(default = "default_small_stack")]
    pub max_texture_stack: usize,
    /// Largest accepted texture edge (default: 4096)
    #[serde(default = "default_max_dimension")]
    pub max_texture_size: u32,
    #[serde(default = "default_max_dimension")]
    pub max_viewport_width: u32,
    #[serde(default = "default_max_dimension")]
    pub max_viewport_height: u32,
    /// Largest depth buffer value, 24-bit Z (default: 0xFFFFFF)
    #[serde(default = "default_depth_buffer_max")]
    pub depth_buffer_max: u32,
    #[serde(default = "default_size_range")]
    pub aliased_point_size: [f32; 2],
    #[serde(default = "default_size_range")]
    pub smooth_point_size: [f32; 2],
    #[serde(default = "default_size_range")]
    pub aliased_line_width: [f32; 2],
    #[serde(default = "default_size_range")]
    pub smooth_line_width: [f32; 2],
    #[serde(default = "default_subpixel_bits")]
    pub subpixel_bits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Log every recorded GL error at debug level (default: true)
    #[serde(default = "default_true")]
    pub log_errors: bool,
}

fn default_width() -> u32 {
    640
}
fn default_height() -> u32 {
    480
}

fn default_modelview_stack() -> usize {
    16
}
fn default_small_stack() -> usize {
    2
}
fn default_max_dimension() -> u32 {
    4096
}
fn default_depth_buffer_max() -> u32 {
    0x00FF_FFFF
}
fn default_size_range() -> [f32; 2] {
    [1.0, 63.875]
}
fn default_subpixel_bits() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_modelview_stack: default_modelview_stack(),
            max_projection_stack: default_small_stack(),
            max_texture_stack: default_small_stack(),
            max_texture_size: default_max_dimension(),
            max_viewport_width: default_max_dimension(),
            max_viewport_height: default_max_dimension(),
            depth_buffer_max: default_depth_buffer_max(),
            aliased_point_size: default_size_range(),
            smooth_point_size: default_size_range(),
            aliased_line_width: default_size_range(),
            smooth_line_width: default_size_range(),
            subpixel_bits: default_subpixel_bits(),
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            log_errors: default_true(),
        }
    }
}

impl ContextConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Rejects limits the state machine cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        if limits.max_modelview_stack == 0
            || limits.max_projection_stack == 0
            || limits.max_texture_stack == 0
        {
            return Err(ConfigError::Invalid(
                "matrix stack depths must be at least 1".to_string(),
            ));
        }
        for (name, range) in [
            ("aliased_point_size", limits.aliased_point_size),
            ("smooth_point_size", limits.smooth_point_size),
            ("aliased_line_width", limits.aliased_line_width),
            ("smooth_line_width", limits.smooth_line_width),
        ] {
            if !(range[0] > 0.0 && range[0] <= range[1]) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-empty positive range, got {range:?}"
                )));
            }
        }
        if limits.depth_buffer_max == 0 {
            return Err(ConfigError::Invalid(
                "depth_buffer_max must be non-zero".to_string(),
            ));
        }
        if self.surface.width > limits.max_viewport_width
            || self.surface.height > limits.max_viewport_height
        {
            return Err(ConfigError::Invalid(format!(
                "surface {}x{} exceeds the maximum viewport",
                self.surface.width, self.surface.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ContextConfig::from_toml_str("").unwrap();
        assert_eq!(config, ContextConfig::default());
        assert_eq!(config.surface.width, 640);
        assert_eq!(config.limits.max_modelview_stack, 16);
        assert_eq!(config.limits.depth_buffer_max, 0xFF_FFFF);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = ContextConfig::from_toml_str(
            r#"
            [surface]
            width = 720

            [limits]
            max_projection_stack = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.surface.width, 720);
        assert_eq!(config.surface.height, 480);
        assert_eq!(config.limits.max_projection_stack, 4);
        assert_eq!(config.limits.max_texture_stack, 2);
        assert!(config.diagnostics.log_errors);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = ContextConfig::default();
        config.limits.max_texture_size = 2048;
        config.diagnostics.log_errors = false;
        let text = config.to_toml_string().unwrap();
        assert_eq!(ContextConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_zero_stack_depth_is_rejected() {
        let err = ContextConfig::from_toml_str("[limits]\nmax_texture_stack = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_range_is_rejected() {
        let err =
            ContextConfig::from_toml_str("[limits]\nsmooth_line_width = [4.0, 2.0]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = ContextConfig::from_toml_str("[surface\nwidth = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[surface]\nwidth = 320\nheight = 240").unwrap();
        let config = ContextConfig::load(file.path()).unwrap();
        assert_eq!(config.surface.width, 320);
        assert_eq!(config.surface.height, 240);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContextConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

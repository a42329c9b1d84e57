//! qrgen runtime configuration handling
//!
//! Settings are read-only for the lifetime of a run: they come from an
//! explicit TOML/YAML file (if any), fall back to built-in defaults, and the
//! logging section can be overridden from the environment. Nothing is ever
//! written back.

use crate::error::{Error, Result};
use crate::qr::{EncodingParams, ErrorCorrection, RenderStyle};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Symbol encoding and rendering defaults
    pub encoding: EncodingOptions,
    /// Main window layout
    pub window: WindowOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl AppConfig {
    /// Load configuration from an explicit path or fall back to defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Produce validated encoding parameters for the encoder and exporter.
    pub fn encoding_params(&self) -> Result<EncodingParams> {
        self.encoding.to_params()
    }
}

/// User-facing encoding settings, merged into [`EncodingParams`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingOptions {
    /// Error correction level (`l`, `m`, `q` or `h`)
    pub error_correction: ErrorCorrection,
    /// Edge length of one module in pixels
    pub module_size: u32,
    /// Quiet-zone width in modules
    pub border: u32,
    /// Colour of dark modules as `#rrggbb`
    pub dark_color: String,
    /// Colour of light modules and the quiet zone as `#rrggbb`
    pub light_color: String,
    /// Decode every saved file and warn if it does not read back
    pub verify_on_save: bool,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::L,
            module_size: 10,
            border: 4,
            dark_color: "#2c3e50".to_string(),
            light_color: "#ecf0f1".to_string(),
            verify_on_save: true,
        }
    }
}

impl EncodingOptions {
    /// Validate colours and clamp sizes into usable parameters.
    pub fn to_params(&self) -> Result<EncodingParams> {
        let style = RenderStyle {
            dark: parse_color(&self.dark_color)?,
            light: parse_color(&self.light_color)?,
        };

        Ok(EncodingParams {
            error_correction: self.error_correction,
            module_size: self.module_size.max(1),
            border: self.border,
            style,
        })
    }
}

/// Parse a `#rrggbb` (or bare `rrggbb`) colour string.
fn parse_color(value: &str) -> Result<[u8; 3]> {
    let digits = value.trim().trim_start_matches('#');
    let mut rgb = [0u8; 3];
    hex::decode_to_slice(digits, &mut rgb)
        .map_err(|e| Error::Config(format!("Invalid colour '{value}': {e}")))?;
    Ok(rgb)
}

/// Main window layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Window title
    pub title: String,
    /// Initial inner width in logical pixels
    pub width: f32,
    /// Initial inner height in logical pixels
    pub height: f32,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Edge length of the on-screen preview in logical pixels
    pub preview_size: f32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "QR Code Generator".to_string(),
            width: 600.0,
            height: 750.0,
            resizable: false,
            preview_size: 300.0,
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRGEN_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRGEN_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRGEN_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRGEN_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRGEN_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

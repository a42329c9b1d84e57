//! QR code encoding and decoding
//!
//! The heavy lifting (segmentation, Reed-Solomon, masking) happens inside the
//! `qrcode` crate; this module wraps it in owned, display-ready types and
//! rasterises the module grid with the configured colours and quiet zone.
//! Decoding with `rqrr` is used to check that exported files read back.

mod decoder;
mod encoder;
mod symbol;

pub use decoder::QrDecoder;
pub use encoder::QrEncoder;
pub use symbol::{RenderedSymbol, SymbolGrid};

use serde::{Deserialize, Serialize};
use std::fmt;

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% of codewords recoverable, largest capacity
    #[default]
    #[serde(alias = "L")]
    L,
    /// ~15% recoverable
    #[serde(alias = "M")]
    M,
    /// ~25% recoverable
    #[serde(alias = "Q")]
    Q,
    /// ~30% recoverable, smallest capacity
    #[serde(alias = "H")]
    H,
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        };
        f.write_str(name)
    }
}

/// Colours used when rasterising a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// RGB colour of dark modules
    pub dark: [u8; 3],
    /// RGB colour of light modules and the quiet zone
    pub light: [u8; 3],
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            dark: [0x2c, 0x3e, 0x50],
            light: [0xec, 0xf0, 0xf1],
        }
    }
}

/// Encoding parameters shared by every request of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingParams {
    /// Error correction level
    pub error_correction: ErrorCorrection,
    /// Edge length of one module in pixels
    pub module_size: u32,
    /// Quiet-zone width in modules
    pub border: u32,
    /// Module colours
    pub style: RenderStyle,
}

impl Default for EncodingParams {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::L,
            module_size: 10,
            border: 4,
            style: RenderStyle::default(),
        }
    }
}

impl EncodingParams {
    /// Bind these parameters to a concrete text.
    pub fn request(&self, text: &str) -> EncodingRequest {
        EncodingRequest {
            text: text.to_string(),
            error_correction: self.error_correction,
            module_size: self.module_size,
            border: self.border,
            style: self.style,
        }
    }
}

/// Everything needed to produce one [`RenderedSymbol`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingRequest {
    /// Payload text; never empty when handed to the encoder
    pub text: String,
    /// Error correction level
    pub error_correction: ErrorCorrection,
    /// Edge length of one module in pixels
    pub module_size: u32,
    /// Quiet-zone width in modules
    pub border: u32,
    /// Module colours
    pub style: RenderStyle,
}

/// A decoded QR code payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    /// The raw decoded data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

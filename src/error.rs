//! Error types for qrgen operations

use thiserror::Error;

/// Result type alias using qrgen's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrgen operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed (usually the text exceeds symbol capacity)
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Destination extension does not map to a supported lossless format
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Windowing toolkit failure
    #[error("UI error: {0}")]
    Ui(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}

/// Failures surfaced by the save/export path.
///
/// Every variant is recoverable: the caller shows it to the user and the
/// application keeps running with its state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// Nothing to save; the user has to type some text first
    #[error("Please enter a URL first")]
    EmptyInput,

    /// Text could not be turned into a symbol with the current parameters
    #[error("Could not generate QR code: {0}")]
    EncodingFailed(String),

    /// Destination could not be written
    #[error("Could not save QR code: {0}")]
    IoFailed(String),
}

impl From<Error> for SaveError {
    fn from(e: Error) -> Self {
        match e {
            Error::QrEncode(msg) => SaveError::EncodingFailed(msg),
            Error::Io(err) => SaveError::IoFailed(err.to_string()),
            other => SaveError::IoFailed(other.to_string()),
        }
    }
}

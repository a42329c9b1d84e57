//! qrgen - desktop QR code generator
//!
//! Type a URL (or any text), watch the QR code update with every keystroke,
//! and save it as a lossless image.
//!
//! # Features
//!
//! - **Live preview**: every edit re-encodes the text; an empty box shows a placeholder
//! - **Export**: PNG by default, plus BMP, TIFF, TGA and QOI by extension
//! - **Toolkit-agnostic core**: [`RenderController`] and [`SymbolExporter`] run without a display
//!
//! # Example
//!
//! ```no_run
//! use qrgen::{Notice, QrEncoder, RenderController, SymbolExporter, TextChangeOutcome};
//! use std::path::Path;
//!
//! let mut controller = RenderController::new(QrEncoder::new(), Vec::<Notice>::new());
//! assert_eq!(
//!     controller.on_text_changed("https://example.com"),
//!     TextChangeOutcome::Rendered
//! );
//!
//! let exporter = SymbolExporter::default();
//! exporter.save("https://example.com", Some(Path::new("example.png")))?;
//! # Ok::<(), qrgen::SaveError>(())
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod logging;
pub mod notify;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result, SaveError};

pub use config::{AppConfig, EncodingOptions, LogRotation, LoggingOptions, WindowOptions};
pub use controller::{DisplayState, RenderController, TextChangeOutcome};
pub use export::{PathPrompt, SaveOutcome, SymbolExporter};
pub use notify::{InlineNotifier, Notice, NoticeLevel, Notifier};
pub use qr::{
    EncodingParams, EncodingRequest, ErrorCorrection, QrDecoder, QrEncoder, QrPayload,
    RenderStyle, RenderedSymbol, SymbolGrid,
};

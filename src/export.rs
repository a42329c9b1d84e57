//! Saving symbols to disk
//!
//! The exporter re-encodes the text it is given instead of reusing whatever
//! the preview currently shows, so a save always reflects exactly the text
//! passed in. Files are written through a temporary file in the destination
//! directory and persisted in one step, so a failed save never leaves a
//! truncated image behind.

use crate::error::{Error, Result, SaveError};
use crate::notify::Notice;
use crate::qr::{EncodingParams, QrDecoder, QrEncoder, RenderedSymbol};
use image::ImageFormat;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Extension appended when the chosen path has none
pub const DEFAULT_EXTENSION: &str = "png";

/// Result of a save request that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Image written to this path
    Saved(PathBuf),
    /// User dismissed the path selection
    Cancelled,
}

/// Source of a destination path, usually a native save dialog
pub trait PathPrompt {
    /// Ask for a destination; `None` means the user cancelled.
    fn choose_destination(&mut self) -> Option<PathBuf>;
}

impl<F> PathPrompt for F
where
    F: FnMut() -> Option<PathBuf>,
{
    fn choose_destination(&mut self) -> Option<PathBuf> {
        self()
    }
}

/// Writes symbols to image files
#[derive(Debug)]
pub struct SymbolExporter {
    encoder: QrEncoder,
    decoder: QrDecoder,
    verify: bool,
}

impl SymbolExporter {
    /// Create an exporter; with `verify` set every written file is decoded again.
    pub fn new(params: EncodingParams, verify: bool) -> Self {
        Self {
            encoder: QrEncoder::with_params(params),
            decoder: QrDecoder::new(),
            verify,
        }
    }

    /// Encode `text` and write it to `destination`.
    ///
    /// Empty text is rejected before anything touches the filesystem, and a
    /// missing destination is a cancelled save rather than an error.
    pub fn save(
        &self,
        text: &str,
        destination: Option<&Path>,
    ) -> std::result::Result<SaveOutcome, SaveError> {
        if text.is_empty() {
            return Err(SaveError::EmptyInput);
        }

        let Some(destination) = destination else {
            tracing::debug!("Save cancelled");
            return Ok(SaveOutcome::Cancelled);
        };

        let (path, format) = resolve_output(destination)?;
        let symbol = self.encoder.encode_text(text)?;
        self.write(&symbol, &path, format).map_err(|e| {
            tracing::warn!(path = %path.display(), "Failed to save QR code: {e}");
            SaveError::from(e)
        })?;

        tracing::info!(
            path = %path.display(),
            format = ?format,
            side = symbol.side(),
            "Saved QR code"
        );

        if self.verify {
            self.verify_file(&path, text);
        }

        Ok(SaveOutcome::Saved(path))
    }

    /// Like [`SymbolExporter::save`], but only asks `prompt` for a destination
    /// once the text is known to be non-empty.
    pub fn save_with_prompt<P: PathPrompt + ?Sized>(
        &self,
        text: &str,
        prompt: &mut P,
    ) -> std::result::Result<SaveOutcome, SaveError> {
        if text.is_empty() {
            return Err(SaveError::EmptyInput);
        }

        let destination = prompt.choose_destination();
        self.save(text, destination.as_deref())
    }

    fn write(&self, symbol: &RenderedSymbol, path: &Path, format: ImageFormat) -> Result<()> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let existing = fs::metadata(path).ok().map(|meta| meta.permissions());

        let mut tmp = temp_file_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            symbol.to_dynamic().write_to(&mut writer, format)?;
            writer.flush()?;
        }
        // Overwrites keep the target's mode; new files get regular create permissions.
        if let Some(permissions) = existing {
            tmp.as_file().set_permissions(permissions)?;
        }
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    fn verify_file(&self, path: &Path, expected: &str) {
        match self.decoder.decode_file(path) {
            Ok(payload) if payload.as_str() == Some(expected) => {
                tracing::debug!(path = %path.display(), "Saved QR code reads back");
            }
            Ok(payload) => {
                tracing::warn!(
                    path = %path.display(),
                    decoded = ?payload.as_str(),
                    "Saved QR code decodes to different text"
                );
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Saved QR code does not read back: {e}");
            }
        }
    }
}

impl Default for SymbolExporter {
    fn default() -> Self {
        Self::new(EncodingParams::default(), true)
    }
}

/// Temporary file created with the mode a plain `File::create` would get
/// (0o666 minus the umask) rather than tempfile's private 0o600.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Ok(tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)?)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> Result<NamedTempFile> {
    Ok(NamedTempFile::new_in(dir)?)
}

/// Pick the final path and lossless raster format for a destination.
///
/// A path without an extension gets [`DEFAULT_EXTENSION`] appended.
pub fn resolve_output(destination: &Path) -> Result<(PathBuf, ImageFormat)> {
    let Some(ext) = destination.extension() else {
        return Ok((destination.with_extension(DEFAULT_EXTENSION), ImageFormat::Png));
    };

    let ext = ext.to_string_lossy().to_ascii_lowercase();
    match ImageFormat::from_extension(&ext) {
        Some(
            format @ (ImageFormat::Png
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::Tga
            | ImageFormat::Qoi),
        ) => Ok((destination.to_path_buf(), format)),
        Some(_) => Err(Error::UnsupportedFormat(format!(
            "'.{ext}' is not a lossless format, use .png, .bmp, .tiff, .tga or .qoi"
        ))),
        None => Err(Error::UnsupportedFormat(format!(
            "unknown extension '.{ext}'"
        ))),
    }
}

/// Notice to show for a finished save request; cancelled saves stay silent.
pub fn save_notice(result: &std::result::Result<SaveOutcome, SaveError>) -> Option<Notice> {
    match result {
        Ok(SaveOutcome::Saved(path)) => {
            Some(Notice::info(format!("QR Code saved to {}", path.display())))
        }
        Ok(SaveOutcome::Cancelled) => None,
        Err(SaveError::EmptyInput) => Some(Notice::warning(SaveError::EmptyInput.to_string())),
        Err(e) => Some(Notice::error(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeLevel;

    #[test]
    fn test_resolve_appends_png() {
        let (path, format) = resolve_output(Path::new("/tmp/qr")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/qr.png"));
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let (path, format) = resolve_output(Path::new("code.BMP")).unwrap();
        assert_eq!(path, PathBuf::from("code.BMP"));
        assert_eq!(format, ImageFormat::Bmp);

        let (_, format) = resolve_output(Path::new("code.tif")).unwrap();
        assert_eq!(format, ImageFormat::Tiff);
    }

    #[test]
    fn test_resolve_rejects_lossy_and_unknown() {
        assert!(matches!(
            resolve_output(Path::new("code.jpg")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            resolve_output(Path::new("code.docx")),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_empty_text_never_prompts() {
        let exporter = SymbolExporter::default();
        let mut prompted = false;
        let mut prompt = || {
            prompted = true;
            Some(PathBuf::from("unused.png"))
        };

        let result = exporter.save_with_prompt("", &mut prompt);
        assert_eq!(result, Err(SaveError::EmptyInput));
        assert!(!prompted);
    }

    #[test]
    fn test_cancelled_prompt() {
        let exporter = SymbolExporter::default();
        let mut prompt = || -> Option<PathBuf> { None };
        let result = exporter.save_with_prompt("https://example.com", &mut prompt);
        assert_eq!(result, Ok(SaveOutcome::Cancelled));
        assert_eq!(save_notice(&result), None);
    }

    #[test]
    fn test_notices() {
        let saved = save_notice(&Ok(SaveOutcome::Saved(PathBuf::from("/tmp/a.png")))).unwrap();
        assert_eq!(saved.level, NoticeLevel::Info);
        assert!(saved.message.contains("/tmp/a.png"));

        let empty = save_notice(&Err(SaveError::EmptyInput)).unwrap();
        assert_eq!(empty.level, NoticeLevel::Warning);
        assert_eq!(empty.message, "Please enter a URL first");

        let failed = save_notice(&Err(SaveError::IoFailed("disk full".into()))).unwrap();
        assert_eq!(failed.level, NoticeLevel::Error);
        assert!(failed.message.contains("disk full"));
    }
}

use std::fs;
use std::path::PathBuf;

use qrgen::{
    EncodingParams, ErrorCorrection, QrDecoder, SaveError, SaveOutcome, SymbolExporter,
};
use tempfile::TempDir;

fn scratch() -> TempDir {
    tempfile::tempdir().expect("create scratch dir")
}

fn entries(dir: &TempDir) -> Vec<PathBuf> {
    fs::read_dir(dir.path())
        .expect("read scratch dir")
        .map(|entry| entry.expect("dir entry").path())
        .collect()
}

#[test]
fn saved_png_decodes_to_original_text() {
    let dir = scratch();
    let path = dir.path().join("example.png");
    let exporter = SymbolExporter::default();

    let outcome = exporter
        .save("https://example.com", Some(&path))
        .expect("save succeeds");

    assert_eq!(outcome, SaveOutcome::Saved(path.clone()));
    let payload = QrDecoder::new().decode_file(&path).expect("decode saved file");
    assert_eq!(payload.as_str(), Some("https://example.com"));
    assert_eq!(entries(&dir), vec![path]);
}

#[test]
fn empty_text_creates_no_file() {
    let dir = scratch();
    let path = dir.path().join("empty.png");

    let result = SymbolExporter::default().save("", Some(&path));

    assert_eq!(result, Err(SaveError::EmptyInput));
    assert!(entries(&dir).is_empty());
}

#[test]
fn over_capacity_text_creates_no_file() {
    let dir = scratch();
    let path = dir.path().join("too_long.png");
    let text = "z".repeat(4000);

    let result = SymbolExporter::default().save(&text, Some(&path));

    assert!(matches!(result, Err(SaveError::EncodingFailed(_))));
    assert!(entries(&dir).is_empty());
}

#[test]
fn capacity_depends_on_error_correction() {
    let dir = scratch();
    let path = dir.path().join("h.png");
    // Fits version 40 at L (2953 bytes) but not at H (1273 bytes).
    let text = "q".repeat(2000);

    let low = SymbolExporter::new(EncodingParams::default(), false);
    assert!(low.save(&text, Some(&path)).is_ok());

    let high = SymbolExporter::new(
        EncodingParams {
            error_correction: ErrorCorrection::H,
            ..EncodingParams::default()
        },
        false,
    );
    let other = dir.path().join("h2.png");
    assert!(matches!(
        high.save(&text, Some(&other)),
        Err(SaveError::EncodingFailed(_))
    ));
    assert!(!other.exists());
}

#[test]
fn missing_extension_defaults_to_png() {
    let dir = scratch();
    let exporter = SymbolExporter::default();

    let outcome = exporter
        .save("hello", Some(&dir.path().join("qrcode")))
        .expect("save succeeds");

    let expected = dir.path().join("qrcode.png");
    assert_eq!(outcome, SaveOutcome::Saved(expected.clone()));
    assert_eq!(
        image::ImageFormat::from_path(&expected).ok(),
        Some(image::ImageFormat::Png)
    );
    let payload = QrDecoder::new().decode_file(&expected).expect("decode");
    assert_eq!(payload.as_str(), Some("hello"));
}

#[test]
fn bmp_extension_writes_bmp() {
    let dir = scratch();
    let path = dir.path().join("code.bmp");

    SymbolExporter::default()
        .save("https://example.com/bmp", Some(&path))
        .expect("save succeeds");

    let bytes = fs::read(&path).expect("read bmp");
    assert_eq!(&bytes[..2], b"BM");
}

#[test]
fn lossy_extension_is_rejected_without_writing() {
    let dir = scratch();
    let path = dir.path().join("code.jpg");

    let result = SymbolExporter::default().save("https://example.com", Some(&path));

    assert!(matches!(result, Err(SaveError::IoFailed(_))));
    assert!(entries(&dir).is_empty());
}

#[test]
fn unwritable_destination_reports_io_failure() {
    let dir = scratch();
    let path = dir.path().join("missing").join("nested").join("code.png");

    let result = SymbolExporter::default().save("https://example.com", Some(&path));

    assert!(matches!(result, Err(SaveError::IoFailed(_))));
    assert!(!path.exists());
}

#[test]
fn overwrite_replaces_previous_file() {
    let dir = scratch();
    let path = dir.path().join("code.png");
    let exporter = SymbolExporter::default();

    exporter.save("first", Some(&path)).expect("first save");
    exporter.save("second", Some(&path)).expect("second save");

    let payload = QrDecoder::new().decode_file(&path).expect("decode");
    assert_eq!(payload.as_str(), Some("second"));
    assert_eq!(entries(&dir), vec![path]);
}

#[test]
fn cancelled_destination_is_not_an_error() {
    let result = SymbolExporter::default().save("https://example.com", None);
    assert_eq!(result, Ok(SaveOutcome::Cancelled));
}

#[cfg(unix)]
mod permissions {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use qrgen::SymbolExporter;

    fn mode(path: &std::path::Path) -> u32 {
        fs::metadata(path).expect("stat").permissions().mode() & 0o777
    }

    #[test]
    fn new_file_gets_regular_create_mode() {
        let dir = super::scratch();
        let saved = dir.path().join("code.png");
        let plain = dir.path().join("plain.txt");

        SymbolExporter::default()
            .save("https://example.com", Some(&saved))
            .expect("save succeeds");
        fs::write(&plain, b"reference").expect("plain create");

        assert_eq!(mode(&saved), mode(&plain));
    }

    #[test]
    fn overwrite_keeps_existing_mode() {
        let dir = super::scratch();
        let path = dir.path().join("code.png");
        fs::write(&path, b"placeholder").expect("create target");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).expect("chmod");

        SymbolExporter::default()
            .save("https://example.com", Some(&path))
            .expect("save succeeds");

        assert_eq!(mode(&path), 0o640);
    }
}

//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::{EncodingParams, EncodingRequest, ErrorCorrection, RenderedSymbol, SymbolGrid};
use qrcode::{QrCode, Version};

/// QR code encoder bound to one set of [`EncodingParams`]
#[derive(Debug, Clone)]
pub struct QrEncoder {
    params: EncodingParams,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Low ECC, 10px modules, 4 module border)
    pub fn new() -> Self {
        Self::with_params(EncodingParams::default())
    }

    /// Create a new QR encoder with explicit parameters
    pub fn with_params(params: EncodingParams) -> Self {
        Self { params }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(error_correction: ErrorCorrection) -> Self {
        Self::with_params(EncodingParams {
            error_correction,
            ..EncodingParams::default()
        })
    }

    /// Parameters applied to every request built by [`QrEncoder::encode_text`]
    pub fn params(&self) -> &EncodingParams {
        &self.params
    }

    /// Encode a request into a rendered symbol.
    ///
    /// Fails with [`Error::QrEncode`] for empty text or when the text does not
    /// fit into the largest symbol at the requested error correction level.
    pub fn encode(&self, request: &EncodingRequest) -> Result<RenderedSymbol> {
        if request.text.is_empty() {
            return Err(Error::QrEncode("nothing to encode".to_string()));
        }

        let code = QrCode::with_error_correction_level(
            request.text.as_bytes(),
            request.error_correction.into(),
        )?;

        let version = match code.version() {
            Version::Normal(v) | Version::Micro(v) => v,
        };
        let grid = SymbolGrid::from_code(&code);
        let image = grid.rasterize(request.module_size, request.border, &request.style);

        tracing::debug!(
            version,
            ecc = %request.error_correction,
            modules = grid.width(),
            side = image.width(),
            bytes = request.text.len(),
            "Encoded QR symbol"
        );

        Ok(RenderedSymbol::new(
            request.text.clone(),
            request.error_correction,
            version,
            grid,
            image,
        ))
    }

    /// Encode a string using this encoder's parameters
    pub fn encode_text(&self, text: &str) -> Result<RenderedSymbol> {
        self.encode(&self.params.request(text))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

//! Owned symbol representations: the raw module grid and its raster

use super::{ErrorCorrection, RenderStyle};
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};
use qrcode::{Color, QrCode};
use std::fmt;

/// Square grid of modules, `true` meaning dark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolGrid {
    width: usize,
    modules: Vec<bool>,
}

impl SymbolGrid {
    pub(crate) fn from_code(code: &QrCode) -> Self {
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == Color::Dark)
            .collect();

        Self {
            width: code.width(),
            modules,
        }
    }

    /// Number of modules along one edge (quiet zone excluded)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at column `x`, row `y` is dark.
    ///
    /// Coordinates outside the grid read as light, which is what the quiet
    /// zone looks like.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules[y * self.width + x]
    }

    /// Rasterise the grid into an RGB image with `border` light modules on
    /// every side and each module drawn as a `module_size` pixel square.
    pub fn rasterize(&self, module_size: u32, border: u32, style: &RenderStyle) -> RgbImage {
        let module_size = module_size.max(1);
        let span = self.width as u32 + 2 * border;
        let side = span * module_size;
        let dark = Rgb(style.dark);
        let light = Rgb(style.light);

        ImageBuffer::from_fn(side, side, |px, py| {
            let mx = px / module_size;
            let my = py / module_size;
            if mx < border || my < border {
                return light;
            }
            if self.is_dark((mx - border) as usize, (my - border) as usize) {
                dark
            } else {
                light
            }
        })
    }
}

/// A fully rendered symbol, ready for display or export
#[derive(Clone, PartialEq)]
pub struct RenderedSymbol {
    text: String,
    error_correction: ErrorCorrection,
    version: i16,
    grid: SymbolGrid,
    image: RgbImage,
}

impl RenderedSymbol {
    pub(crate) fn new(
        text: String,
        error_correction: ErrorCorrection,
        version: i16,
        grid: SymbolGrid,
        image: RgbImage,
    ) -> Self {
        Self {
            text,
            error_correction,
            version,
            grid,
            image,
        }
    }

    /// Text this symbol encodes
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Error correction level used
    pub fn error_correction(&self) -> ErrorCorrection {
        self.error_correction
    }

    /// QR version picked by the encoder (1-40)
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Module grid
    pub fn grid(&self) -> &SymbolGrid {
        &self.grid
    }

    /// Rasterised image
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Image edge length in pixels
    pub fn side(&self) -> u32 {
        self.image.width()
    }

    /// Copy the raster into a [`DynamicImage`] for saving or decoding.
    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageRgb8(self.image.clone())
    }
}

impl fmt::Debug for RenderedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedSymbol")
            .field("text", &self.text)
            .field("error_correction", &self.error_correction)
            .field("version", &self.version)
            .field("modules", &self.grid.width())
            .field("side", &self.side())
            .finish()
    }
}

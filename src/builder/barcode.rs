use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::builder::Code128Builder;
use crate::common::charset::{bar_weights, CharSet, Symbol};
use crate::common::codec::{self, CharsetSpec};
use crate::common::error::Code128Result;
use crate::render::{ImageFormat, RasterImage};

// Barcode
//------------------------------------------------------------------------------

/// Width of the blank margin required on each side of a barcode, in modules.
pub const QUIET_ZONE: usize = 10;

/// An encoded Code128 barcode.
///
/// Immutable once built; every view below is derived from the symbol-value
/// sequence on demand.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Code128 {
    data: String,
    charsets: Vec<CharSet>,
    values: Vec<u8>,
}

impl Code128 {
    pub(crate) fn from_parts(data: String, charsets: Vec<CharSet>, values: Vec<u8>) -> Self {
        Self { data, charsets, values }
    }

    /// Encode `data` with the given charset specification. Shorthand for the
    /// builder with a preset charset.
    pub fn new(data: &str, charset: impl Into<CharsetSpec>) -> Code128Result<Self> {
        Code128Builder::new(data).charset(charset).build()
    }

    /// The raw input data.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The resolved per-symbol charset assignment, one entry per data unit.
    pub fn charsets(&self) -> &[CharSet] {
        &self.charsets
    }

    /// The full symbol-value sequence: start, control and data symbols,
    /// checksum, stop.
    pub fn symbol_values(&self) -> &[u8] {
        &self.values
    }

    /// Display tokens for the symbol-value sequence.
    pub fn symbols(&self) -> Vec<Symbol> {
        codec::symbols(&self.values)
    }

    /// Concatenated bar/space weight digits for the whole barcode.
    pub fn bars(&self) -> String {
        self.values.iter().map(|&value| bar_weights(value)).collect()
    }

    /// Per-module pixels: 0 is a bar, 1 is a space. Each weight digit yields
    /// that many pixels of the current polarity, starting with a bar and
    /// flipping after every digit.
    pub fn modules(&self) -> Vec<u8> {
        let bars = self.bars();
        let mut modules = Vec::new();
        let mut polarity = 0;
        for digit in bars.bytes() {
            let run = (digit - b'0') as usize;
            modules.extend(std::iter::repeat(polarity).take(run));
            polarity ^= 1;
        }
        modules
    }

    /// Total width in modules, optionally counting the quiet zone on both
    /// sides.
    pub fn width(&self, add_quiet_zone: bool) -> usize {
        let quiet = if add_quiet_zone { 2 * QUIET_ZONE } else { 0 };
        self.modules().len() + quiet
    }

    /// Render to a monochrome raster: one pixel per module, optionally padded
    /// by the quiet zone, expanded by pixel repetition to
    /// `(width * module_width, height)`. A plain scannable rendering is
    /// `image(1, 1, true)`.
    pub fn image(&self, height: usize, module_width: usize, add_quiet_zone: bool) -> RasterImage {
        let mut row = self.modules();
        if add_quiet_zone {
            let mut padded = vec![1; QUIET_ZONE];
            padded.append(&mut row);
            padded.resize(padded.len() + QUIET_ZONE, 1);
            row = padded;
        }
        RasterImage::expand(&row, height, module_width)
    }

    /// Render one module row and wrap it as a
    /// `data:image/<format>;base64,` URL.
    pub fn data_url(&self, format: ImageFormat, add_quiet_zone: bool) -> Code128Result<String> {
        let bytes = self.image(1, 1, add_quiet_zone).encode(format)?;
        Ok(format!("data:image/{};base64,{}", format.name(), STANDARD.encode(&bytes)))
    }

    /// One-line terminal preview, bars as full blocks.
    pub fn to_str(&self, add_quiet_zone: bool) -> String {
        self.image(1, 1, add_quiet_zone)
            .pixels()
            .iter()
            .map(|&pixel| if pixel == 0 { '█' } else { ' ' })
            .collect()
    }
}

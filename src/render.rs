use std::str::FromStr;

use crate::common::error::{Code128Error, Code128Result};

#[cfg(feature = "image")]
use std::io::Cursor;

#[cfg(feature = "image")]
use image::{GrayImage, Luma};

// Output format
//------------------------------------------------------------------------------

/// Serialization format for rendered barcodes.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ImageFormat {
    Png,
    Bmp,
}

impl ImageFormat {
    /// Lower-case format name as it appears in data URLs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = Code128Error;

    fn from_str(s: &str) -> Code128Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            _ => Err(Code128Error::UnknownImageFormat),
        }
    }
}

// Raster image
//------------------------------------------------------------------------------

/// A monochrome raster of barcode pixels, row-major, one byte per pixel:
/// 0 is a bar (black), 1 is a space (white).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Expand a single module row by pixel repetition into a raster of
    /// `row.len() * module_width` by `height` pixels.
    pub(crate) fn expand(row: &[u8], height: usize, module_width: usize) -> Self {
        let width = row.len() * module_width;
        let mut pixels = Vec::with_capacity(width * height);
        for _ in 0..height {
            for &pixel in row {
                for _ in 0..module_width {
                    pixels.push(pixel);
                }
            }
        }
        Self { width, height, pixels }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at (x, y); 0 is a bar, 1 is a space.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.width + x]
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Serialize to `format` bytes in memory. Without the `image` feature
    /// every call reports the missing backend.
    pub fn encode(&self, format: ImageFormat) -> Code128Result<Vec<u8>> {
        encode_raster(self, format)
    }

    /// Export as a grayscale `image` buffer, bars black and spaces white.
    #[cfg(feature = "image")]
    pub fn to_image(&self) -> GrayImage {
        let mut canvas = GrayImage::new(self.width as u32, self.height as u32);
        for y in 0..self.height {
            for x in 0..self.width {
                let luma = if self.get(x, y) == 0 { Luma([0]) } else { Luma([255]) };
                canvas.put_pixel(x as u32, y as u32, luma);
            }
        }
        canvas
    }
}

#[cfg(feature = "image")]
fn encode_raster(raster: &RasterImage, format: ImageFormat) -> Code128Result<Vec<u8>> {
    let target = match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Bmp => image::ImageFormat::Bmp,
    };
    let mut bytes = Vec::new();
    raster
        .to_image()
        .write_to(&mut Cursor::new(&mut bytes), target)
        .expect("in-memory png/bmp encoding of a luma buffer cannot fail");
    Ok(bytes)
}

#[cfg(not(feature = "image"))]
fn encode_raster(_raster: &RasterImage, _format: ImageFormat) -> Code128Result<Vec<u8>> {
    Err(Code128Error::MissingImageBackend)
}

#[cfg(test)]
mod render_tests {
    use super::{ImageFormat, RasterImage};
    use crate::common::error::Code128Error;

    #[test]
    fn test_format_parse() {
        assert_eq!("png".parse(), Ok(ImageFormat::Png));
        assert_eq!("BMP".parse(), Ok(ImageFormat::Bmp));
        assert_eq!("gif".parse::<ImageFormat>(), Err(Code128Error::UnknownImageFormat));
    }

    #[test]
    fn test_expand_repeats_pixels() {
        let raster = RasterImage::expand(&[0, 1, 0], 2, 3);
        assert_eq!(raster.width(), 9);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.pixels(), &[0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0]);
        assert_eq!(raster.get(3, 0), 1);
        assert_eq!(raster.get(8, 1), 0);
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_to_image_maps_polarity() {
        let img = RasterImage::expand(&[0, 1], 1, 1).to_image();
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [255]);
    }
}

//! # code128
//!
//! A Rust library for generating Code128 barcodes: charset resolution over
//! the A/B/C character sets, shift/latch optimized symbol encoding with the
//! mandatory checksum, and rendering to module widths, raster images or
//! base64 data URLs.
//!
//! ## Features
//!
//! - **Automatic charset selection**: minimal symbol count via a dynamic
//!   program over set switches, or force a single set / an explicit
//!   per-symbol sequence
//! - **Shift optimization**: isolated A/B excursions use one-symbol shifts
//!   instead of latch pairs
//! - **Rendering**: bar weight strings, module pixels, monochrome rasters
//!   and `data:image/...;base64` URLs (PNG or BMP, behind the default
//!   `image` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use code128::Code128Builder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = Code128Builder::new("Hello!").build()?;
//!
//! // 0 is a bar module, 1 is a space module.
//! let modules = code.modules();
//! assert_eq!(code.width(false), modules.len());
//! assert_eq!(code.width(true), modules.len() + 20);
//! # Ok(())
//! # }
//! ```
//!
//! ### Forcing a character set
//!
//! ```rust
//! use code128::{CharSet, Code128};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Set C packs digit pairs into single symbols.
//! let code = Code128::new("123456", CharSet::C)?;
//! // start + three digit pairs + checksum + stop
//! assert_eq!(code.symbol_values().len(), 6);
//! # Ok(())
//! # }
//! ```
//!
//! ### Data URLs
//!
//! ```rust
//! # #[cfg(feature = "image")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use code128::{Code128Builder, ImageFormat};
//!
//! let code = Code128Builder::new("Hello!").build()?;
//! let url = code.data_url(ImageFormat::Png, false)?;
//! assert!(url.starts_with("data:image/png;base64,"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "image"))]
//! # fn main() {}
//! ```

pub mod builder;
pub(crate) mod common;
pub mod render;

pub use builder::{Code128, Code128Builder, QUIET_ZONE};
pub use common::charset::{bar_weights, CharSet, Symbol};
pub use common::codec::CharsetSpec;
pub use common::error::{Code128Error, Code128Result};
pub use render::{ImageFormat, RasterImage};

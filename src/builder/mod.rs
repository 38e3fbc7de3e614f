mod barcode;

pub use barcode::{Code128, QUIET_ZONE};

use crate::common::codec::{self, CharsetSpec};
use crate::common::error::{Code128Error, Code128Result};

// Builder
//------------------------------------------------------------------------------

/// Builds [`Code128`] barcodes; [`CharsetSpec::Auto`] is the default charset
/// specification.
#[derive(Debug, Clone)]
pub struct Code128Builder<'a> {
    data: &'a str,
    charset: CharsetSpec,
}

impl<'a> Code128Builder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self { data, charset: CharsetSpec::Auto }
    }

    /// Charset specification: a whole [`CharsetSpec`], a single
    /// [`crate::CharSet`], or anything else convertible into one.
    pub fn charset(&mut self, charset: impl Into<CharsetSpec>) -> &mut Self {
        self.charset = charset.into();
        self
    }

    /// Resolve the charset assignment, encode the symbol stream and seal it
    /// with checksum and stop.
    pub fn build(&self) -> Code128Result<Code128> {
        if self.data.is_empty() {
            return Err(Code128Error::EmptyData);
        }
        let chars: Vec<char> = self.data.chars().collect();
        let charsets = codec::resolve(&chars, &self.charset)?;
        let values = codec::encode(&chars, &charsets)?;
        Ok(Code128::from_parts(self.data.to_owned(), charsets, values))
    }
}

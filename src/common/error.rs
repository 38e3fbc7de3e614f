use std::fmt::{Display, Error, Formatter};

use crate::common::charset::CharSet;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Code128Error {
    EmptyData,
    EmptyCharset,
    UnknownCharset(char),
    CharsetLengthMismatch { expected: usize, found: usize },
    InvalidChar(char),
    IncompatibleCharset(char, CharSet),
    MissingImageBackend,
    UnknownImageFormat,
}

impl Display for Code128Error {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::EmptyData => f.write_str("empty data"),
            Self::EmptyCharset => f.write_str("empty charset specification"),
            Self::UnknownCharset(letter) => write!(f, "unknown charset {letter:?}"),
            Self::CharsetLengthMismatch { expected, found } => {
                write!(f, "charset sequence covers {expected} characters, data has {found}")
            }
            Self::InvalidChar(ch) => write!(f, "character {ch:?} is not encodable in any charset"),
            Self::IncompatibleCharset(ch, set) => {
                write!(f, "character {ch:?} is not encodable in charset {}", set.letter())
            }
            Self::MissingImageBackend => {
                f.write_str("image serialization requires the `image` feature")
            }
            Self::UnknownImageFormat => f.write_str("unknown image format"),
        }
    }
}

impl std::error::Error for Code128Error {}

pub type Code128Result<T> = Result<T, Code128Error>;

pub mod charset;
pub mod codec;
pub mod error;

pub use charset::*;
pub use codec::*;
pub use error::*;

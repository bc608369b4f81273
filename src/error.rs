//! Error types for QR code generation.
//!
//! Field-level input problems never surface here: they are recovered by
//! falling back to a default (see [`crate::request::Field`]). This enum only
//! covers the failures that stop a run.

use thiserror::Error;

/// Main error type for QR code generation.
#[derive(Error, Debug)]
pub enum Error {
    /// No text was given to encode.
    #[error("Nothing to encode: the text is empty")]
    EmptyText,

    /// The text does not fit in any version from the requested one up to 40.
    ///
    /// Lower the error correction level or shorten the text.
    #[error("Text of {len} bytes does not fit in a QR code at level {ecc} (tried versions {from}-40)")]
    DataTooLong { len: usize, ecc: char, from: u8 },

    /// The encoder rejected the request for a reason other than capacity.
    #[error("QR encoding failed: {0}")]
    Encode(String),

    #[error("Image would be {side}px wide, more than the {max}px limit")]
    ImageTooLarge { side: u64, max: u32 },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

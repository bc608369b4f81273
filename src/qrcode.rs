#![forbid(unsafe_code)]
//! QR code encoding with capacity resolution.
//!
//! Symbol construction is delegated to the `qrcode` crate. This module picks
//! the version: it starts at the version the request asks for and walks up
//! to [`Version::MAX`] until the text fits, then copies the finished matrix
//! into a [`QrSymbol`].

use ::qrcode::types::QrError;
use log::debug;

use crate::error::{Error, Result};
use crate::request::{QrCodeEcc, QrRequest, Version};

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// Instances are immutable after creation.
///
/// # Example
///
/// ```rust
/// use qrgen::qrcode::QrSymbol;
/// use qrgen::request::{QrCodeEcc, Version};
///
/// let qr = QrSymbol::encode_text("Hello, World!", QrCodeEcc::Low, Version::MIN).unwrap();
/// assert_eq!(qr.version().value(), 1);
/// assert_eq!(qr.size(), 21);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    version: Version,
    ecc: QrCodeEcc,
    /// Width and height in modules, equal to `version * 4 + 17`.
    size: i32,
    /// Row-major, `true` = dark.
    modules: Vec<bool>,
}

impl QrSymbol {
    /// Encodes `text` at level `ecc` in the smallest version that is at
    /// least `min_version` and holds the data.
    pub fn encode_text(text: &str, ecc: QrCodeEcc, min_version: Version) -> Result<Self> {
        for ver in min_version.value()..=Version::MAX.value() {
            let qr_version = ::qrcode::Version::Normal(i16::from(ver));
            match ::qrcode::QrCode::with_version(text.as_bytes(), qr_version, ecc.to_ec_level()) {
                Ok(code) => {
                    let version = Version::new(ver).ok_or_else(|| {
                        Error::Encode(format!("version {ver} out of range"))
                    })?;
                    if version != min_version {
                        debug!("text does not fit version {min_version}, grew to {version}");
                    }
                    return Ok(Self::from_code(&code, version, ecc));
                }
                Err(QrError::DataTooLong) => continue,
                Err(e) => return Err(Error::Encode(e.to_string())),
            }
        }
        Err(Error::DataTooLong { len: text.len(), ecc: ecc.code(), from: min_version.value() })
    }

    fn from_code(code: &::qrcode::QrCode, version: Version, ecc: QrCodeEcc) -> Self {
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == ::qrcode::Color::Dark)
            .collect();
        Self { version, ecc, size: code.width() as i32, modules }
    }

    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns this QR Code's error correction level.
    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecc
    }

    /// Returns the color of the module (pixel) at the given coordinates,
    /// which is `false` for light or `true` for dark.
    ///
    /// The top left corner has the coordinates (x=0, y=0). If the given
    /// coordinates are out of bounds, then `false` (light) is returned.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x)
            && (0..self.size).contains(&y)
            && self.modules[(y * self.size + x) as usize]
    }
}

/// Encodes a request's text with its requested version as the lower bound.
pub fn encode(request: &QrRequest) -> Result<QrSymbol> {
    request.validate()?;
    debug!(
        "encoding {} bytes at level {} from version {}",
        request.text.len(),
        request.error_correction,
        request.version
    );
    QrSymbol::encode_text(&request.text, request.error_correction, request.version)
}

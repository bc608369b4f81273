//! The QR request and the validate-or-default rules for each of its fields.
//!
//! Every user-supplied field is parsed into a [`Field`], which records
//! whether the value was given or replaced by a default. A bad entry in one
//! field only ever affects that field.

use core::fmt;

use log::debug;

use crate::color::Color;
use crate::error::{Error, Result};

/// Compiled-in defaults for every request field.
pub mod defaults {
    use super::{QrCodeEcc, Version};
    use crate::color::Color;

    pub const VERSION: Version = Version::MIN;
    pub const BOX_SIZE: u32 = 10;
    pub const BORDER: u32 = 4;
    pub const FILL_COLOR: Color = Color::BLACK;
    pub const BACK_COLOR: Color = Color::WHITE;
    pub const ERROR_CORRECTION: QrCodeEcc = QrCodeEcc::Low;

    /// The file every run writes to, relative to the working directory.
    pub const OUTPUT_PATH: &str = "generated_qr_code.png";
}

/// Why a field ended up with its default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    /// Nothing was entered.
    Empty,
    /// Something was entered but could not be used. Holds the raw input.
    Invalid(String),
}

/// A collected field: either the value the user gave, or a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Given(T),
    Defaulted { value: T, reason: DefaultReason },
}

impl<T> Field<T> {
    /// Parses `input` with `parse`. Blank input (empty or whitespace only)
    /// is a silent default; parse failures fall back to `default` and keep
    /// the raw input.
    pub fn parse_with<F>(input: &str, default: T, parse: F) -> Self
    where
        F: FnOnce(&str) -> Option<T>,
    {
        if input.trim().is_empty() {
            return Field::Defaulted { value: default, reason: DefaultReason::Empty };
        }
        match parse(input) {
            Some(value) => Field::Given(value),
            None => Field::Defaulted {
                value: default,
                reason: DefaultReason::Invalid(input.to_string()),
            },
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Field::Given(v) | Field::Defaulted { value: v, .. } => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Field::Given(v) | Field::Defaulted { value: v, .. } => v,
        }
    }

    /// True when the user typed something that had to be replaced.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Field::Defaulted { reason: DefaultReason::Invalid(_), .. })
    }

    /// The rejected raw input, if any.
    pub fn invalid_input(&self) -> Option<&str> {
        match self {
            Field::Defaulted { reason: DefaultReason::Invalid(raw), .. } => Some(raw),
            _ => None,
        }
    }
}

/// The error correction level in a QR Code symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    #[default]
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    pub const ALL: [QrCodeEcc; 4] = [Self::Low, Self::Medium, Self::Quartile, Self::High];

    /// Maps one of the exact codes `L`, `M`, `Q`, `H` to a level.
    pub fn from_code(code: &str) -> Option<Self> {
        use QrCodeEcc::*;
        match code {
            "L" => Some(Low),
            "M" => Some(Medium),
            "Q" => Some(Quartile),
            "H" => Some(High),
            _ => None,
        }
    }

    /// Validate-or-default for the error correction prompt. Blank input is
    /// a silent default; unknown codes resolve to [`QrCodeEcc::Low`] and are
    /// reported as invalid.
    pub fn resolve(input: &str) -> Field<Self> {
        let field = Field::parse_with(input, defaults::ERROR_CORRECTION, Self::from_code);
        log_if_invalid("error correction level", &field);
        field
    }

    pub fn code(self) -> char {
        use QrCodeEcc::*;
        match self {
            Low => 'L',
            Medium => 'M',
            Quartile => 'Q',
            High => 'H',
        }
    }

    pub(crate) fn to_ec_level(self) -> ::qrcode::EcLevel {
        use QrCodeEcc::*;
        match self {
            Low => ::qrcode::EcLevel::L,
            Medium => ::qrcode::EcLevel::M,
            Quartile => ::qrcode::EcLevel::Q,
            High => ::qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for QrCodeEcc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A version number, which must be in the range [1, 40].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Returns `None` when `ver` is outside [1, 40].
    pub const fn new(ver: u8) -> Option<Self> {
        if Version::MIN.0 <= ver && ver <= Version::MAX.0 {
            Some(Self(ver))
        } else {
            None
        }
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Side length of the symbol in modules, not counting the border.
    pub const fn size(self) -> u32 {
        self.0 as u32 * 4 + 17
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn parse_version(input: &str) -> Field<Version> {
    let field = Field::parse_with(input, defaults::VERSION, |s| {
        s.trim().parse::<u8>().ok().and_then(Version::new)
    });
    log_if_invalid("version", &field);
    field
}

pub fn parse_box_size(input: &str) -> Field<u32> {
    let field = Field::parse_with(input, defaults::BOX_SIZE, |s| {
        s.trim().parse::<u32>().ok().filter(|&n| n > 0)
    });
    log_if_invalid("box size", &field);
    field
}

pub fn parse_border(input: &str) -> Field<u32> {
    let field = Field::parse_with(input, defaults::BORDER, |s| s.trim().parse::<u32>().ok());
    log_if_invalid("border", &field);
    field
}

pub fn parse_color(input: &str, default: Color) -> Field<Color> {
    let field = Field::parse_with(input, default, |s| s.parse::<Color>().ok());
    log_if_invalid("color", &field);
    field
}

fn log_if_invalid<T: fmt::Display>(name: &str, field: &Field<T>) {
    if let Some(raw) = field.invalid_input() {
        debug!("invalid {name} {raw:?}, defaulting to {}", field.value());
    }
}

/// Everything needed to encode and render one QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    pub text: String,
    /// Smallest version to try. The encoder grows past it when the text
    /// does not fit.
    pub version: Version,
    /// Pixels per module.
    pub box_size: u32,
    /// Quiet zone width in modules.
    pub border: u32,
    pub fill_color: Color,
    pub back_color: Color,
    pub error_correction: QrCodeEcc,
}

impl Default for QrRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            version: defaults::VERSION,
            box_size: defaults::BOX_SIZE,
            border: defaults::BORDER,
            fill_color: defaults::FILL_COLOR,
            back_color: defaults::BACK_COLOR,
            error_correction: defaults::ERROR_CORRECTION,
        }
    }
}

impl QrRequest {
    /// A request for `text` with every option at its default.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }

    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn box_size(mut self, box_size: u32) -> Self {
        self.box_size = box_size;
        self
    }

    pub fn border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn back_color(mut self, color: Color) -> Self {
        self.back_color = color;
        self
    }

    pub fn error_correction(mut self, ecc: QrCodeEcc) -> Self {
        self.error_correction = ecc;
        self
    }

    /// Rejects requests that cannot produce an image. A zero box size is
    /// treated as the default rather than an error.
    pub fn validate(&self) -> Result<()> {
        if self.text.is_empty() {
            return Err(Error::EmptyText);
        }
        Ok(())
    }

    /// Box size actually used for rendering.
    pub fn effective_box_size(&self) -> u32 {
        if self.box_size == 0 {
            defaults::BOX_SIZE
        } else {
            self.box_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_valid_ecc_codes_resolve_to_themselves() {
        for ecc in QrCodeEcc::ALL {
            let field = QrCodeEcc::resolve(&ecc.code().to_string());
            assert_eq!(field, Field::Given(ecc));
        }
    }

    #[test]
    fn test_invalid_ecc_codes_default_to_low() {
        for bad in ["X", "l", "m", "LL", " L", "Low", "1", "ä"] {
            let field = QrCodeEcc::resolve(bad);
            assert_eq!(*field.value(), QrCodeEcc::Low, "input {bad:?}");
            assert!(field.is_invalid(), "input {bad:?} should be flagged");
        }
    }

    #[test]
    fn test_empty_ecc_is_silent_default() {
        let field = QrCodeEcc::resolve("");
        assert_eq!(*field.value(), QrCodeEcc::Low);
        assert!(!field.is_invalid());
    }

    #[test]
    fn test_blank_input_is_empty_for_every_field() {
        fn reason<T>(field: &Field<T>) -> Option<&DefaultReason> {
            match field {
                Field::Defaulted { reason, .. } => Some(reason),
                Field::Given(_) => None,
            }
        }

        for blank in ["", " ", "\t", "   "] {
            let empty = Some(&DefaultReason::Empty);
            assert_eq!(reason(&QrCodeEcc::resolve(blank)), empty, "{blank:?}");
            assert_eq!(reason(&parse_version(blank)), empty, "{blank:?}");
            assert_eq!(reason(&parse_box_size(blank)), empty, "{blank:?}");
            assert_eq!(reason(&parse_border(blank)), empty, "{blank:?}");
            assert_eq!(reason(&parse_color(blank, Color::BLACK)), empty, "{blank:?}");
        }
    }

    struct WarnCounter(AtomicUsize);

    impl log::Log for WarnCounter {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if record.level() <= log::Level::Warn && record.target().starts_with("qrgen") {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn flush(&self) {}
    }

    static WARNINGS: WarnCounter = WarnCounter(AtomicUsize::new(0));

    #[test]
    fn test_invalid_fields_only_log_at_debug() {
        log::set_logger(&WARNINGS).expect("no other test installs a logger");
        log::set_max_level(log::LevelFilter::Trace);

        assert!(QrCodeEcc::resolve("Z").is_invalid());
        assert!(parse_version("99").is_invalid());
        assert!(parse_box_size("0").is_invalid());
        assert!(parse_border("-1").is_invalid());
        assert!(parse_color("blurple", Color::BLACK).is_invalid());

        // The prompt prints its own notice; the log must not repeat it.
        assert_eq!(WARNINGS.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("7").into_value().value(), 7);
        assert_eq!(parse_version(" 40 ").into_value().value(), 40);
        assert!(parse_version("0").is_invalid());
        assert!(parse_version("41").is_invalid());
        assert!(parse_version("abc").is_invalid());
        assert_eq!(parse_version(""), Field::Defaulted {
            value: Version::MIN,
            reason: DefaultReason::Empty,
        });
    }

    #[test]
    fn test_parse_box_size_and_border() {
        assert_eq!(parse_box_size("3").into_value(), 3);
        assert!(parse_box_size("0").is_invalid());
        assert!(parse_box_size("-2").is_invalid());
        assert_eq!(parse_border("0").into_value(), 0);
        assert_eq!(parse_border("x").invalid_input(), Some("x"));
        assert_eq!(parse_border("x").into_value(), defaults::BORDER);
    }

    #[test]
    fn test_parse_color_defaults_per_field() {
        assert_eq!(parse_color("red", Color::BLACK).into_value(), Color::new(255, 0, 0));
        let bad = parse_color("nope", Color::WHITE);
        assert!(bad.is_invalid());
        assert_eq!(bad.into_value(), Color::WHITE);
    }

    #[test]
    fn test_version_size() {
        assert_eq!(Version::MIN.size(), 21);
        assert_eq!(Version::MAX.size(), 177);
        assert!(Version::new(0).is_none());
    }

    #[test]
    fn test_request_validation() {
        assert!(matches!(QrRequest::default().validate(), Err(Error::EmptyText)));
        assert!(QrRequest::new("hi").validate().is_ok());
        assert_eq!(QrRequest::new("hi").box_size(0).effective_box_size(), 10);
    }
}

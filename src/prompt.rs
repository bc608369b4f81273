//! Interactive collection of a [`QrRequest`].
//!
//! Works over any `BufRead`/`Write` pair so the same flow drives the real
//! console and the tests. End of input reads as an empty answer.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Result;
use crate::helper::generate_qr;
use crate::request::{
    defaults, parse_border, parse_box_size, parse_color, parse_version, Field, QrCodeEcc,
    QrRequest, Version,
};
use crate::color::Color;

pub const TEXT_PROMPT: &str = "Enter the text or URL to generate the QR code: ";
pub const VERSION_PROMPT: &str = "Enter the version (1-40, default 1): ";
pub const BOX_SIZE_PROMPT: &str = "Enter the box size (default 10): ";
pub const BORDER_PROMPT: &str = "Enter the border size (default 4): ";
pub const FILL_COLOR_PROMPT: &str = "Enter the fill color (default 'black'): ";
pub const BACK_COLOR_PROMPT: &str = "Enter the background color (default 'white'): ";
pub const ECC_PROMPT: &str = "Enter the error correction level (L, M, Q, H, default 'L'): ";
pub const EXIT_PROMPT: &str = "Press Enter to exit...";

/// The answers to every prompt, each tagged as given or defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub text: String,
    pub version: Field<Version>,
    pub box_size: Field<u32>,
    pub border: Field<u32>,
    pub fill_color: Field<Color>,
    pub back_color: Field<Color>,
    pub error_correction: Field<QrCodeEcc>,
}

impl Answers {
    pub fn into_request(self) -> QrRequest {
        QrRequest {
            text: self.text,
            version: self.version.into_value(),
            box_size: self.box_size.into_value(),
            border: self.border.into_value(),
            fill_color: self.fill_color.into_value(),
            back_color: self.back_color.into_value(),
            error_correction: self.error_correction.into_value(),
        }
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim_end_matches(['\n', '\r']).to_string();
    debug!("{} -> {answer:?}", prompt.trim_end());
    Ok(answer)
}

fn notify<T, W: Write>(out: &mut W, field: &Field<T>, name: &str, shown: &str) -> Result<()> {
    if let Some(raw) = field.invalid_input() {
        writeln!(out, "Invalid {name} '{raw}'. Defaulting to {shown}.")?;
    }
    Ok(())
}

/// Asks every question in order. Invalid answers are replaced by their
/// default and reported on `out` right away.
pub fn collect_answers<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Answers> {
    let text = ask(input, out, TEXT_PROMPT)?;

    let version = parse_version(&ask(input, out, VERSION_PROMPT)?);
    notify(out, &version, "version", &defaults::VERSION.to_string())?;

    let box_size = parse_box_size(&ask(input, out, BOX_SIZE_PROMPT)?);
    notify(out, &box_size, "box size", &defaults::BOX_SIZE.to_string())?;

    let border = parse_border(&ask(input, out, BORDER_PROMPT)?);
    notify(out, &border, "border size", &defaults::BORDER.to_string())?;

    let fill_color = parse_color(&ask(input, out, FILL_COLOR_PROMPT)?, defaults::FILL_COLOR);
    notify(out, &fill_color, "fill color", "'black'")?;

    let back_color = parse_color(&ask(input, out, BACK_COLOR_PROMPT)?, defaults::BACK_COLOR);
    notify(out, &back_color, "background color", "'white'")?;

    let error_correction = QrCodeEcc::resolve(&ask(input, out, ECC_PROMPT)?);
    if error_correction.is_invalid() {
        writeln!(out, "Invalid error correction level. Defaulting to 'L'.")?;
    }

    Ok(Answers { text, version, box_size, border, fill_color, back_color, error_correction })
}

/// One interactive run: collect answers, then write the PNG to `path`.
pub fn run<R: BufRead, W: Write>(input: &mut R, out: &mut W, path: &Path) -> Result<PathBuf> {
    let request = collect_answers(input, out)?.into_request();
    let saved = generate_qr(&request, path)?;
    writeln!(out, "QR Code generated and saved as '{}'.", saved.display())?;
    Ok(saved)
}

/// Blocks until one line (or end of input) is read.
pub fn wait_for_enter<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
    ask(input, out, EXIT_PROMPT).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    fn answers(script: &str) -> (Answers, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let answers = collect_answers(&mut input, &mut out).unwrap();
        (answers, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_all_fields_given() {
        let (a, out) = answers("hello\n3\n5\n2\nnavy\n#ffff00\nH\n");
        let req = a.into_request();
        assert_eq!(req.text, "hello");
        assert_eq!(req.version.value(), 3);
        assert_eq!(req.box_size, 5);
        assert_eq!(req.border, 2);
        assert_eq!(req.fill_color, Color::new(0, 0, 128));
        assert_eq!(req.back_color, Color::new(255, 255, 0));
        assert_eq!(req.error_correction, QrCodeEcc::High);
        assert!(!out.contains("Invalid"));
        assert!(out.starts_with(TEXT_PROMPT));
    }

    #[test]
    fn test_empty_answers_use_defaults_silently() {
        let (a, out) = answers("hi\n\n\n\n\n\n\n");
        assert_eq!(a.into_request(), QrRequest::new("hi"));
        assert!(!out.contains("Invalid"));
    }

    #[test]
    fn test_end_of_input_reads_as_empty() {
        let (a, _) = answers("");
        assert_eq!(a.into_request(), QrRequest::default());
    }

    #[test]
    fn test_bad_numeric_field_keeps_other_answers() {
        let (a, out) = answers("hi\n7\nbig\n1\nred\n\nQ\n");
        assert!(a.box_size.is_invalid());
        let req = a.into_request();
        assert_eq!(req.version.value(), 7);
        assert_eq!(req.box_size, defaults::BOX_SIZE);
        assert_eq!(req.border, 1);
        assert_eq!(req.fill_color, Color::new(255, 0, 0));
        assert_eq!(req.error_correction, QrCodeEcc::Quartile);
        assert!(out.contains("Invalid box size 'big'. Defaulting to 10."));
    }

    #[test]
    fn test_invalid_ecc_warns_and_uses_low() {
        let (a, out) = answers("hi\n\n\n\n\n\nZ\n");
        assert_eq!(*a.error_correction.value(), QrCodeEcc::Low);
        assert!(out.contains("Invalid error correction level. Defaulting to 'L'."));
    }

    #[test]
    fn test_whitespace_answers_default_silently() {
        let (a, out) = answers("hi\n \n\t\n  \n \n \n  \n");
        assert_eq!(a.into_request(), QrRequest::new("hi"));
        assert!(!out.contains("Invalid"));
    }

    #[test]
    fn test_extended_color_names_are_accepted() {
        let (a, out) = answers("hi\n\n\n\ncrimson\nlightblue\n\n");
        let req = a.into_request();
        assert_eq!(req.fill_color, Color::new(220, 20, 60));
        assert_eq!(req.back_color, Color::new(173, 216, 230));
        assert!(!out.contains("Invalid"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let (a, _) = answers("hi\r\n2\r\n\r\n\r\n\r\n\r\nM\r\n");
        assert_eq!(a.text, "hi");
        assert_eq!(*a.error_correction.value(), QrCodeEcc::Medium);
    }

    #[test]
    fn test_run_writes_file_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(defaults::OUTPUT_PATH);
        let mut input = Cursor::new(b"hello qr\n\n4\n\n\n\n\n".to_vec());
        let mut out = Vec::new();

        run(&mut input, &mut out, &path).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.ends_with(&format!("QR Code generated and saved as '{}'.\n", path.display())));
        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), (21 + 2 * 4) * 4);
    }

    #[test]
    fn test_default_run_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(defaults::OUTPUT_PATH);
        let mut input = Cursor::new(b"\n\n\n\n\n\n\n".to_vec());
        let mut out = Vec::new();

        let err = run(&mut input, &mut out, &path).unwrap_err();
        assert!(matches!(err, Error::EmptyText));
        assert!(!path.exists());
    }

    #[test]
    fn test_wait_for_enter() {
        let mut input = Cursor::new(b"\n".to_vec());
        let mut out = Vec::new();
        wait_for_enter(&mut input, &mut out).unwrap();
        assert_eq!(out, EXIT_PROMPT.as_bytes());
    }
}

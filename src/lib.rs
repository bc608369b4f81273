//! # qrgen
//!
//! Turns a piece of text and a handful of rendering options into a QR code
//! PNG.
//!
//! Symbol encoding is done by the [`qrcode`](https://docs.rs/qrcode) crate
//! and PNG output by [`image`](https://docs.rs/image). This crate collects
//! and validates the options, picks the smallest version the text fits in,
//! and rasterizes the module grid with custom colors.
//!
//! ## Features
//!
//! - Versions 1 to 40, growing automatically when the text does not fit.
//! - Four error correction levels: Low, Medium, Quartile, High.
//! - Custom box size, quiet zone width and foreground/background colors.
//! - PNG, SVG and terminal renderings of the same symbol.
//! - Every invalid option falls back to its own default; nothing else is
//!   discarded.
//!
//! ## Example
//!
//! ```rust
//! use qrgen::{helper::generate_image_buffer, Color, QrCodeEcc, QrRequest};
//!
//! let request = QrRequest::new("https://example.com")
//!     .error_correction(QrCodeEcc::Medium)
//!     .box_size(8)
//!     .fill_color(Color::new(0, 0, 128));
//! let img = generate_image_buffer(&request).unwrap();
//! assert_eq!(img.width(), img.height());
//! ```
//!
//! ## Modules
//!
//! - [`request`]: the request model and per-field validation.
//! - [`qrcode`]: encoding with automatic version growth.
//! - [`helper`]: rendering to PNG, SVG and text.
//! - [`prompt`]: the interactive console flow.

pub mod color;
pub mod error;
pub mod helper;
pub mod prompt;
pub mod qrcode;
pub mod request;

pub use crate::{
    color::Color,
    error::{Error, Result},
    qrcode::QrSymbol,
    request::{Field, QrCodeEcc, QrRequest, Version},
};

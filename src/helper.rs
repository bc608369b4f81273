use crate::color::Color;
use crate::error::{Error, Result};
use crate::qrcode::{encode, QrSymbol};
use crate::request::QrRequest;

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Largest image side, in pixels, that [`render_image`] will allocate.
pub const MAX_IMAGE_SIDE: u32 = 1 << 15;

/*---- Utilities ----*/

// Returns a string of SVG code for an image depicting
// the given QR Code, with the given number of border modules.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(qr: &QrSymbol, border: u32, fill: Color, back: Color) -> String {
    let border = border as i32;
    let mut result = String::new();
    result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
    let dimension = qr.size() + border * 2;
    result += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
        dimension
    );
    result += &format!("\t<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n", back.to_hex());
    result += "\t<path d=\"";
    let mut first = true;
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.get_module(x, y) {
                if !first {
                    result += " ";
                }
                first = false;
                result += &format!("M{},{}h1v1h-1z", x + border, y + border);
            }
        }
    }
    result += &format!("\" fill=\"{}\"/>\n", fill.to_hex());
    result += "</svg>\n";
    result
}

/// Draws the symbol with block characters, two per module so it looks square
/// in a terminal. Dark modules are `█`.
pub fn to_terminal_string(qr: &QrSymbol, border: u32) -> String {
    let border = border as i32;
    let mut out = String::new();
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c = if qr.get_module(x, y) { '█' } else { ' ' };
            out.push(c);
            out.push(c);
        }
        out.push('\n');
    }
    out
}

/// Rasterizes a symbol using the request's box size, border and colors.
///
/// The image is `(qr.size() + 2 * border) * box_size` pixels on each side.
///
/// # Errors
///
/// Returns [`Error::ImageTooLarge`] if a side would exceed [`MAX_IMAGE_SIDE`].
pub fn render_image(qr: &QrSymbol, request: &QrRequest) -> Result<RgbImage> {
    let box_size = request.effective_box_size();
    let modules = qr.size() as u64 + 2 * u64::from(request.border);
    let side = modules * u64::from(box_size);
    if side > u64::from(MAX_IMAGE_SIDE) {
        return Err(Error::ImageTooLarge { side, max: MAX_IMAGE_SIDE });
    }
    let side = side as u32;
    let border = request.border as i32;
    let dark: Rgb<u8> = request.fill_color.into();
    let light: Rgb<u8> = request.back_color.into();

    let mut img = ImageBuffer::new(side, side);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = (x / box_size) as i32 - border;
        let qr_y = (y / box_size) as i32 - border;
        *pixel = if qr.get_module(qr_x, qr_y) { dark } else { light };
    }
    debug!("rendered version {} symbol to {side}x{side} px", qr.version());
    Ok(img)
}

/// Encodes and renders a request without touching the filesystem.
pub fn generate_image_buffer(request: &QrRequest) -> Result<RgbImage> {
    let qr = encode(request)?;
    render_image(&qr, request)
}

/// Generates a QR Code PNG from the request and writes it to `path`,
/// replacing any existing file.
///
/// # Example
///
/// ```no_run
/// use qrgen::helper::generate_qr;
/// use qrgen::request::QrRequest;
///
/// let path = generate_qr(&QrRequest::new("https://example.com"), "qr.png").unwrap();
/// println!("saved {}", path.display());
/// ```
pub fn generate_qr(request: &QrRequest, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let img = generate_image_buffer(request)?;
    img.save_with_format(path, ImageFormat::Png)?;
    info!("saved {}x{} QR code to {}", img.width(), img.height(), path.display());
    Ok(path.to_path_buf())
}

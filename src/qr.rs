//! Pairing QR rendering

use image::ImageFormat;
use qrcode::QrCode;
use scanlink_core::{Error, Result};
use std::io::Cursor;
use tracing::warn;

/// Display a QR code in the terminal
pub fn print_terminal(data: &str) {
    let code = match QrCode::new(data.as_bytes()) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to generate QR code: {}", e);
            return;
        }
    };

    // Render as Unicode block characters for terminal display
    let string = code
        .render::<char>()
        .quiet_zone(true)
        .module_dimensions(2, 1)
        .build();

    for line in string.lines() {
        println!("  {}", line);
    }
}

/// Render a QR code as PNG bytes
pub fn render_png(data: &str, size: u32) -> Result<Vec<u8>> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| Error::Qr(e.to_string()))?;
    let image = code.render::<image::Luma<u8>>().build();

    let resized = image::imageops::resize(
        &image,
        size,
        size,
        image::imageops::FilterType::Nearest,
    );

    let mut buffer = Cursor::new(Vec::new());
    resized
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| Error::Qr(e.to_string()))?;
    Ok(buffer.into_inner())
}

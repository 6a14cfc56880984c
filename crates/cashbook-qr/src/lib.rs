#[cfg(feature = "scanner")]
mod scanner;

#[cfg(feature = "scanner")]
pub use scanner::{QrScanner, ScanStatus};

use rqrr::PreparedImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrError {
   #[error("Frame has {found} pixels, expected {expected}")]
   InvalidFrame { expected: usize, found: usize },

   #[error("No QR code found (try adjusting size/position)")]
   NoGrid,

   #[error("Failed to decode QR code: {0}")]
   Decode(String),
}

/// Convert RGBA8 pixels to luma using the Rec. 601 weights
pub fn rgba_to_luma(rgba: &[u8]) -> Vec<u8> {
   rgba
      .chunks_exact(4)
      .map(|px| {
         let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
         ((r * 299 + g * 587 + b * 114) / 1000) as u8
      })
      .collect()
}

/// Decode the first QR code found in a greyscale frame
///
/// `pixels` is row-major, one byte per pixel.
pub fn decode_luma(width: usize, height: usize, pixels: &[u8]) -> Result<String, QrError> {
   let expected = width * height;
   if pixels.len() != expected {
      return Err(QrError::InvalidFrame {
         expected,
         found: pixels.len(),
      });
   }

   let mut prepared = PreparedImage::prepare_from_greyscale(width, height, |x, y| {
      pixels[y * width + x]
   });

   let grids = prepared.detect_grids();
   let grid = grids.first().ok_or(QrError::NoGrid)?;

   let (_meta, content) = grid.decode().map_err(|e| QrError::Decode(format!("{:?}", e)))?;
   tracing::debug!("Decoded QR code with {} chars", content.len());
   Ok(content)
}

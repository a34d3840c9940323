// The "light band": a 1-pixel-wide column whose brightness follows half a sine
// period. Stretched across the screen and scrolled, it reads as a scanning light.

use crate::error::Error;

/// Default band height in pixels (independent of window size).
pub const DEFAULT_HEIGHT: usize = 128;

/// Brightness of sample `i` in a band of `height` samples.
/// 0 at both ends, 255 around the middle.
#[inline]
pub fn brightness(i: usize, height: usize) -> u8 {
    let phase = i as f64 * std::f64::consts::PI / (height - 1) as f64;
    (255.0 * phase.sin()).round().clamp(0.0, 255.0) as u8
}

/// Opaque gray pixel: R = G = B = `value`, A = 255 (0xAARRGGBB).
#[inline]
pub fn gray_opaque(value: u8) -> u32 {
    (value as u32 * 0x01_01_01) | 0xFF_00_00_00
}

/// Immutable pixel column produced once and uploaded to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn height(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Little-endian 32-bit words, i.e. bytes in B, G, R, A order.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
    }
}

/// Build the light band for `height` samples.
pub fn generate(height: usize) -> Result<PixelBuffer, Error> {
    if height <= 1 {
        return Err(Error::OverlayHeight(height));
    }
    let pixels = (0..height).map(|i| gray_opaque(brightness(i, height))).collect();
    Ok(PixelBuffer { pixels })
}

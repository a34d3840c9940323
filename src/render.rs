// Software rendering backend.
// The compositor only talks to the `Backend` trait: create an image, upload
// bytes into it, pick a blend mode, draw an image stretched into a rect.
// `SoftwareBackend` does all of that directly on the minifb frame buffer.

use crate::error::Error;
use crate::types::{FrameBuffer, Image, Rect};

/// How a drawn pixel combines with what is already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// dst = src * a + dst * (1 - a)
    #[default]
    Alpha,
    /// dst = dst + src * a (saturating). Light stacks until white.
    Additive,
}

pub trait Backend {
    /// A fully transparent image ready to receive pixels.
    fn create_image(&mut self, width: usize, height: usize) -> Image {
        Image::blank(width, height)
    }

    /// Copy raw little-endian 32-bit words (B, G, R, A bytes) into `image`.
    fn upload(&mut self, image: &mut Image, bytes: &[u8]) -> Result<(), Error> {
        let expected = image.pixels.len() * 4;
        if bytes.len() != expected {
            return Err(Error::ImageUpload { expected, actual: bytes.len() });
        }
        for (px, chunk) in image.pixels.iter_mut().zip(bytes.chunks_exact(4)) {
            *px = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(())
    }

    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Draw `image` scaled to cover `target`, using the current blend mode.
    fn draw(&mut self, image: &Image, target: Rect);
}

/// Blend one 0xAARRGGBB source pixel onto a 0x00RRGGBB destination.
#[inline]
pub fn blend_pixel(dst: u32, src: u32, mode: BlendMode) -> u32 {
    let a = (src >> 24) & 0xFF;
    let mut out = 0u32;
    for shift in [16u32, 8, 0] {
        let s = (src >> shift) & 0xFF;
        let d = (dst >> shift) & 0xFF;
        let c = match mode {
            BlendMode::Alpha => (s * a + d * (255 - a) + 127) / 255,
            BlendMode::Additive => (d + (s * a + 127) / 255).min(255),
        };
        out |= c << shift;
    }
    out
}

pub struct SoftwareBackend<'a> {
    fb: &'a mut FrameBuffer,
    mode: BlendMode,
}

impl<'a> SoftwareBackend<'a> {
    /// Wrap this frame's screen buffer. Starts in standard alpha blending.
    pub fn new(fb: &'a mut FrameBuffer) -> Self {
        Self { fb, mode: BlendMode::Alpha }
    }

    /// Direct access for widgets that rasterize text themselves.
    pub fn frame(&mut self) -> &mut FrameBuffer {
        &mut *self.fb
    }
}

impl Backend for SoftwareBackend<'_> {
    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.mode = mode;
    }

    fn draw(&mut self, image: &Image, target: Rect) {
        if target.is_empty() || image.width == 0 || image.height == 0 {
            return;
        }

        // Clip the target against the screen; nearest-neighbour sample the source.
        let x0 = target.x.max(0);
        let y0 = target.y.max(0);
        let x1 = (target.x + target.width).min(self.fb.width as i32);
        let y1 = (target.y + target.height).min(self.fb.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let (tw, th) = (target.width as i64, target.height as i64);
        let (iw, ih) = (image.width as i64, image.height as i64);
        for y in y0..y1 {
            let sy = ((y - target.y) as i64 * ih / th) as usize;
            let row = y as usize * self.fb.width;
            for x in x0..x1 {
                let sx = ((x - target.x) as i64 * iw / tw) as usize;
                let idx = row + x as usize;
                self.fb.pixels[idx] = blend_pixel(self.fb.pixels[idx], image.pixel(sx, sy), self.mode);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_blend_mixes_by_source_alpha() {
        assert_eq!(blend_pixel(0x00_00_00_00, 0xFF_12_34_56, BlendMode::Alpha), 0x00_12_34_56);
        assert_eq!(blend_pixel(0x00_AB_CD_EF, 0x00_12_34_56, BlendMode::Alpha), 0x00_AB_CD_EF);
        // half-transparent white over black lands mid-gray
        assert_eq!(blend_pixel(0x00_00_00_00, 0x80_FF_FF_FF, BlendMode::Alpha), 0x00_80_80_80);
    }

    #[test]
    fn additive_blend_brightens_and_saturates() {
        assert_eq!(blend_pixel(0x00_10_20_30, 0xFF_10_10_10, BlendMode::Additive), 0x00_20_30_40);
        assert_eq!(blend_pixel(0x00_F0_F0_F0, 0xFF_80_80_80, BlendMode::Additive), 0x00_FF_FF_FF);
        // fully transparent light adds nothing
        assert_eq!(blend_pixel(0x00_10_20_30, 0x00_FF_FF_FF, BlendMode::Additive), 0x00_10_20_30);
    }

    #[test]
    fn draw_stretches_a_column_across_the_target() {
        let mut fb = FrameBuffer::new(4, 4);
        let img = Image { width: 1, height: 2, pixels: vec![0xFF_FF_00_00, 0xFF_00_00_FF] };
        let mut backend = SoftwareBackend::new(&mut fb);
        backend.draw(&img, Rect::new(0, 0, 4, 4));

        assert!(fb.pixels[..8].iter().all(|&p| p == 0x00_FF_00_00));
        assert!(fb.pixels[8..].iter().all(|&p| p == 0x00_00_00_FF));
    }

    #[test]
    fn draw_clips_to_the_screen() {
        let mut fb = FrameBuffer::new(3, 3);
        let img = Image { width: 1, height: 1, pixels: vec![0xFF_FF_FF_FF] };
        let mut backend = SoftwareBackend::new(&mut fb);
        backend.draw(&img, Rect::new(-2, 2, 4, 10));

        assert_eq!(fb.pixels, vec![0, 0, 0, 0, 0, 0, 0x00_FF_FF_FF, 0x00_FF_FF_FF, 0]);
    }

    #[test]
    fn draw_ignores_degenerate_targets() {
        let mut fb = FrameBuffer::new(2, 2);
        let img = Image { width: 1, height: 1, pixels: vec![0xFF_FF_FF_FF] };
        let mut backend = SoftwareBackend::new(&mut fb);
        backend.draw(&img, Rect::new(0, 0, -5, 2));
        backend.draw(&img, Rect::new(5, 5, 2, 2));
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn upload_reads_little_endian_words() {
        let mut fb = FrameBuffer::new(1, 1);
        let mut backend = SoftwareBackend::new(&mut fb);
        let mut img = backend.create_image(1, 2);
        backend.upload(&mut img, &[0x56, 0x34, 0x12, 0xFF, 0, 0, 0, 0x80]).unwrap();
        assert_eq!(img.pixels, vec![0xFF_12_34_56, 0x80_00_00_00]);

        let err = backend.upload(&mut img, &[0; 3]).unwrap_err();
        assert!(matches!(err, Error::ImageUpload { expected: 8, actual: 3 }));
    }
}

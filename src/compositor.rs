// Per-frame background: grid base, a scrolling light band added on top, then
// the grid mask drawn normally so the glow only shows through the grid lines.

use std::cell::OnceCell;

use tracing::debug;

use crate::error::Error;
use crate::overlay;
use crate::render::{Backend, BlendMode};
use crate::types::{Image, Rect};

/// One full sweep of the light band, top to bottom.
pub const DEFAULT_CYCLE_MS: u64 = 2000;

/// Vertical position of the band's top edge relative to the inner area.
///
/// Starts at `-overlay_height` (band just above the visible area) and moves
/// linearly to `inner_height` (just below it) over one cycle, then wraps.
pub fn scroll_offset(time_ms: u64, inner_height: i32, overlay_height: i32, cycle_ms: u64) -> i32 {
    let cycle = cycle_ms.max(1) as i64;
    let t = (time_ms % cycle as u64) as i64;
    let travel = inner_height as i64 + 2 * overlay_height as i64;
    (t * travel).div_euclid(cycle) as i32 - overlay_height
}

pub struct Compositor {
    overlay_height: usize,
    cycle_ms: u64,
    // Empty until the first paint; written once, then only read.
    light: OnceCell<Image>,
}

impl Compositor {
    pub fn new(overlay_height: usize, cycle_ms: u64) -> Self {
        Self { overlay_height, cycle_ms, light: OnceCell::new() }
    }

    pub fn is_initialized(&self) -> bool {
        self.light.get().is_some()
    }

    /// The uploaded light band, generating it on first use.
    pub fn light<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<&Image, Error> {
        if let Some(img) = self.light.get() {
            return Ok(img);
        }
        let column = overlay::generate(self.overlay_height)?;
        let mut img = backend.create_image(1, column.height());
        backend.upload(&mut img, &column.to_le_bytes())?;
        debug!(height = column.height(), "light band created");
        Ok(self.light.get_or_init(|| img))
    }

    /// Paint one frame of the background into `inner`.
    /// Draws nothing until both theme layers are available.
    pub fn paint_frame<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        time_ms: u64,
        inner: Rect,
        base: Option<&Image>,
        mask: Option<&Image>,
    ) -> Result<(), Error> {
        let light = self.light(backend)?;
        let (Some(base), Some(mask)) = (base, mask) else {
            return Ok(());
        };

        let band_h = light.height as i32;
        let offset = scroll_offset(time_ms, inner.height, band_h, self.cycle_ms);

        backend.draw(base, inner);

        backend.set_blend_mode(BlendMode::Additive);
        backend.draw(light, Rect::new(inner.x, inner.y + offset, inner.width, band_h));

        backend.set_blend_mode(BlendMode::Alpha);
        backend.draw(mask, inner);
        Ok(())
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(overlay::DEFAULT_HEIGHT, DEFAULT_CYCLE_MS)
    }
}

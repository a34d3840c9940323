//! Screen layout: where each element goes for a given inner area.
//!
//! Everything is recomputed from the inner bounds alone, so resizing back and
//! forth never accumulates drift.

use crate::types::Rect;

/// Space kept free around the text panel (split evenly on both sides).
pub const PANEL_MARGIN: i32 = 100;

/// Rects for every element on the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    /// FPS readout, bottom-right corner.
    pub corner: Rect,
    /// Mouse coordinate readout, bottom-left corner.
    pub secondary: Rect,
    /// Informational text, centred.
    pub panel: Rect,
}

/// Lay out the screen inside `inner`.
///
/// `corner_size` and `secondary_size` are the readouts' preferred sizes. The
/// secondary readout sits on the same baseline as the corner one, so its y
/// comes from the corner readout's height. Tiny windows give negative panel
/// sizes; callers draw those as empty.
pub fn compute(inner: Rect, corner_size: (i32, i32), secondary_size: (i32, i32)) -> ScreenLayout {
    let (cw, ch) = corner_size;
    let corner = Rect::new(inner.x + inner.width - cw, inner.y + inner.height - ch, cw, ch);

    let (sw, sh) = secondary_size;
    let secondary = Rect::new(inner.x, inner.y + inner.height - ch, sw, sh);

    let pw = inner.width - PANEL_MARGIN;
    let ph = inner.height - PANEL_MARGIN;
    let panel = Rect::new(
        inner.x + (inner.width - pw) / 2,
        inner.y + (inner.height - ph) / 2,
        pw,
        ph,
    );

    ScreenLayout { corner, secondary, panel }
}

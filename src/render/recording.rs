//! Record-once, replay-with-offset drawing.
//!
//! A [`RowRecording`] is an explicit display list for one row in one frame:
//! content is drawn into a private offscreen buffer (the measure phase,
//! which emits nothing to the screen), and later copied into the frame
//! buffer at a translated origin (the emit phase). Replaying consumes the
//! recording, so it cannot outlive the frame it was made for.

use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};

use super::Bounds;

#[derive(Debug, Clone)]
pub struct RowRecording {
    buffer: Buffer,
    size: Size,
}

impl RowRecording {
    /// Record content drawn at up to `max` size.
    ///
    /// `draw` receives an offscreen buffer and the area it may use, and
    /// returns the natural size of what it drew. The size is clamped to the
    /// recording area.
    pub fn record<F>(max: Size, draw: F) -> Self
    where
        F: FnOnce(&mut Buffer, Rect) -> Size,
    {
        let area = Rect::new(0, 0, max.width, max.height);
        let mut buffer = Buffer::empty(area);
        let drawn = draw(&mut buffer, area);
        let size = Size::new(drawn.width.min(max.width), drawn.height.min(max.height));
        Self { buffer, size }
    }

    /// Natural size of the recorded content.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Bounds of the content if its top-left corner is placed at `(x, y)`.
    pub fn bounds_at(&self, x: i32, y: i32) -> Bounds {
        Bounds::new(x, y, self.size)
    }

    /// Copy the recorded cells into `target` at `bounds`, skipping anything
    /// outside `clip`. Consumes the recording.
    pub fn replay(self, target: &mut Buffer, bounds: Bounds, clip: Rect) {
        let Some(visible) = bounds.visible_in(clip.intersection(target.area)) else {
            return;
        };
        for ty in visible.top()..visible.bottom() {
            for tx in visible.left()..visible.right() {
                let sx = (i32::from(tx) - bounds.x) as u16;
                let sy = (i32::from(ty) - bounds.y) as u16;
                let Some(source) = self.buffer.cell((sx, sy)) else {
                    continue;
                };
                if let Some(cell) = target.cell_mut((tx, ty)) {
                    *cell = source.clone();
                }
            }
        }
    }
}

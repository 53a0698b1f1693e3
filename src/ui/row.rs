//! Animated row rendering.
//!
//! Each frame a row is drawn in two phases. The measure phase records the
//! row's content offscreen at full width. The emit phase replays that
//! recording shifted right by the reveal inset plus the live drag offset.
//! The hit region is registered with the exact bounds used for the replay,
//! so the pointer always lands on what the user sees, even mid-drag.

use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};

use crate::render::{Bounds, HitRegistry, HitTarget, RowRecording};

use super::arena::RowSlot;

/// Where a row ended up this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// Bounds the content was replayed at and registered for hit testing.
    pub bounds: Bounds,
    pub progress: f32,
    pub inset: i32,
    pub drag: i32,
}

impl RowLayout {
    /// Vertical space the row occupies in the list.
    pub fn height(&self) -> u16 {
        self.bounds.height
    }
}

/// Horizontal reveal inset for `progress` across a row `width` cells wide.
///
/// Starts at `width` (content fully off-stage to the right) and falls
/// monotonically to 0 as progress reaches 1.
pub fn reveal_inset(progress: f32, width: u16) -> i32 {
    let progress = if progress.is_nan() {
        1.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    ((1.0 - progress) * f32::from(width)).round() as i32
}

/// Render one row into `area`, clipped to `clip`.
///
/// `draw` receives an offscreen buffer and the area it may fill, and returns
/// the natural size of what it drew. The offscreen buffer is `area` sized,
/// so callers should keep `area` to the row's own lines.
pub fn render_row<F>(
    buf: &mut Buffer,
    area: Rect,
    clip: Rect,
    slot: &mut RowSlot,
    hits: &mut HitRegistry,
    now: Instant,
    draw: F,
) -> RowLayout
where
    F: FnOnce(&mut Buffer, Rect) -> Size,
{
    let progress = slot.reveal.progress(now);
    let recording = RowRecording::record(area.as_size(), draw);
    let inset = reveal_inset(progress, area.width);
    let drag = slot.drag.sample(now).round() as i32;

    let bounds = recording.bounds_at(i32::from(area.x) + inset + drag, i32::from(area.y));
    hits.register_clipped(bounds, clip, HitTarget::Row(slot.id.clone()));
    recording.replay(buf, bounds, clip);

    RowLayout {
        bounds,
        progress,
        inset,
        drag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::arena::{RowArena, RowConfig};
    use crate::models::MessageId;
    use ratatui::style::Style;
    use std::time::Duration;

    fn draw_text(text: &'static str) -> impl FnOnce(&mut Buffer, Rect) -> Size {
        move |buf, area| {
            buf.set_string(area.x, area.y, text, Style::default());
            Size::new(text.len() as u16, 1)
        }
    }

    fn line(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_reveal_inset_is_monotonic() {
        let mut last = reveal_inset(0.0, 40);
        assert_eq!(last, 40);
        for step in 1..=20 {
            let inset = reveal_inset(step as f32 / 20.0, 40);
            assert!(inset <= last);
            last = inset;
        }
        assert_eq!(last, 0);
        assert_eq!(reveal_inset(f32::NAN, 40), 0);
        assert_eq!(reveal_inset(2.0, 40), 0);
    }

    #[test]
    fn test_settled_row_renders_at_rest() {
        let mut arena = RowArena::new(RowConfig::default());
        let now = Instant::now();
        let id = MessageId::from("a");
        let slot = arena.ensure(&id, false, now);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        let mut hits = HitRegistry::new();
        let area = buf.area;

        let layout = render_row(&mut buf, area, area, slot, &mut hits, now, draw_text("hi"));
        assert_eq!(layout.inset, 0);
        assert_eq!(layout.bounds, Bounds::new(0, 0, Size::new(2, 1)));
        assert_eq!(line(&buf, 0), "hi        ");
        assert_eq!(hits.hit_test(1, 0), Some(&HitTarget::Row(id)));
    }

    #[test]
    fn test_zero_duration_row_never_flashes_offstage() {
        let mut arena = RowArena::new(RowConfig {
            reveal_ms: 0,
            ..RowConfig::default()
        });
        let now = Instant::now();
        let slot = arena.ensure(&MessageId::from("a"), true, now);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        let mut hits = HitRegistry::new();
        let area = buf.area;

        let layout = render_row(&mut buf, area, area, slot, &mut hits, now, draw_text("new"));
        assert_eq!(layout.inset, 0);
        assert_eq!(line(&buf, 0), "new       ");
    }

    #[test]
    fn test_hit_region_follows_reveal() {
        let mut arena = RowArena::new(RowConfig {
            reveal_ms: 100,
            ..RowConfig::default()
        });
        let start = Instant::now();
        let id = MessageId::from("a");
        arena.ensure(&id, true, start);

        for ms in [0u64, 10, 30, 60, 100, 150] {
            let now = start + Duration::from_millis(ms);
            let slot = arena.get_mut(&id).unwrap();
            let mut buf = Buffer::empty(Rect::new(0, 0, 20, 1));
            let mut hits = HitRegistry::new();
            let area = buf.area;
            let layout = render_row(&mut buf, area, area, slot, &mut hits, now, draw_text("row"));

            assert_eq!(hits.bounds_of(&HitTarget::Row(id.clone())), Some(layout.bounds));
            assert_eq!(layout.bounds.x, layout.inset + layout.drag);
            if let Some(visible) = layout.bounds.visible_in(area) {
                let first = line(&buf, 0).find('r').map(|i| i as u16);
                assert_eq!(first, Some(visible.x));
            }
        }
    }

    #[test]
    fn test_hit_region_follows_drag() {
        let mut arena = RowArena::new(RowConfig::default());
        let now = Instant::now();
        let id = MessageId::from("a");
        let slot = arena.ensure(&id, false, now);
        slot.drag.pointer_down(2, now);
        slot.drag.pointer_move(7, now).unwrap();

        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 1));
        let mut hits = HitRegistry::new();
        let area = buf.area;
        let layout = render_row(&mut buf, area, area, slot, &mut hits, now, draw_text("row"));

        assert_eq!(layout.drag, 5);
        assert_eq!(layout.bounds, Bounds::new(5, 0, Size::new(3, 1)));
        assert_eq!(line(&buf, 0), "     row            ");
        assert_eq!(hits.hit_test(4, 0), None);
        assert_eq!(hits.hit_test(5, 0), Some(&HitTarget::Row(id)));
    }
}

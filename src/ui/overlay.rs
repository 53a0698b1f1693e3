//! Developer overlays drawn on top of everything else.
//!
//! Ratatui renders in call order, so overlays are drawn last. Each card
//! registers an occluding hit region so the pointer never reaches the rows
//! hidden underneath it.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Widget};

use crate::app::FrameStats;
use crate::render::{HitRegistry, HitTarget};

use super::theme::Theme;

const PROFILING_WIDTH: u16 = 24;
const PROFILING_HEIGHT: u16 = 5;
const THEME_WIDTH: u16 = 24;

/// Frame counters in the top-right corner.
pub fn render_profiling(
    buf: &mut Buffer,
    area: Rect,
    stats: &FrameStats,
    theme: &Theme,
    hits: &mut HitRegistry,
) {
    if area.width < PROFILING_WIDTH || area.height < PROFILING_HEIGHT {
        return;
    }
    let card = Rect::new(
        area.right() - PROFILING_WIDTH,
        area.y,
        PROFILING_WIDTH,
        PROFILING_HEIGHT,
    );
    let inner = draw_card(buf, card, " Frames ", theme, hits);

    let lines = [
        format!("count {:>10}", stats.frames()),
        format!("last  {:>8.2}ms", stats.last().as_secs_f64() * 1000.0),
        format!("avg   {:>8.2}ms", stats.average().as_secs_f64() * 1000.0),
    ];
    for (row, line) in lines.iter().enumerate() {
        buf.set_stringn(
            inner.x,
            inner.y + row as u16,
            line,
            usize::from(inner.width),
            theme.bar(),
        );
    }
}

/// Palette swatches in the bottom-right corner.
pub fn render_theme(buf: &mut Buffer, area: Rect, theme: &Theme, hits: &mut HitRegistry) {
    let swatches = theme.swatches();
    let height = swatches.len() as u16 + 2;
    if area.width < THEME_WIDTH || area.height < height {
        return;
    }
    let card = Rect::new(
        area.right() - THEME_WIDTH,
        area.bottom() - height,
        THEME_WIDTH,
        height,
    );
    let title = format!(" Theme: {} ", theme.name);
    let inner = draw_card(buf, card, &title, theme, hits);

    for (row, (name, color)) in swatches.iter().enumerate() {
        let y = inner.y + row as u16;
        buf.set_string(inner.x, y, "  ", Style::default().bg(*color));
        buf.set_stringn(
            inner.x + 3,
            y,
            name,
            usize::from(inner.width.saturating_sub(3)),
            theme.bar(),
        );
    }
}

fn draw_card(
    buf: &mut Buffer,
    card: Rect,
    title: &str,
    theme: &Theme,
    hits: &mut HitRegistry,
) -> Rect {
    Clear.render(card, buf);
    hits.register_rect(card, HitTarget::Overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .style(theme.bar())
        .title(title.to_string());
    let inner = block.inner(card);
    block.render(card, buf);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_profiling_overlay_shows_counters() {
        let mut stats = FrameStats::new();
        stats.record(Duration::from_millis(3));
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        render_profiling(&mut buf, area, &stats, &Theme::dark(), &mut HitRegistry::new());
        let out = text(&buf);
        assert!(out.contains("Frames"));
        assert!(out.contains("count          1"));
        assert!(out.contains("3.00ms"));
    }

    #[test]
    fn test_theme_overlay_lists_swatches() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        render_theme(&mut buf, area, &Theme::light(), &mut HitRegistry::new());
        let out = text(&buf);
        assert!(out.contains("Theme: light"));
        assert!(out.contains("accent"));
        assert!(out.contains("error"));
    }

    #[test]
    fn test_overlays_skip_tiny_areas() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        let mut hits = HitRegistry::new();
        render_profiling(&mut buf, area, &FrameStats::new(), &Theme::dark(), &mut hits);
        render_theme(&mut buf, area, &Theme::dark(), &mut hits);
        assert_eq!(buf, Buffer::empty(area));
        assert_eq!(hits.hit_test(0, 0), None);
    }

    #[test]
    fn test_cards_occlude_what_is_beneath() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        let mut hits = HitRegistry::new();
        hits.register_rect(area, HitTarget::Control(0));
        render_profiling(&mut buf, area, &FrameStats::new(), &Theme::dark(), &mut hits);
        render_theme(&mut buf, area, &Theme::dark(), &mut hits);

        // Corners of both cards.
        assert_eq!(hits.hit_test(16, 0), Some(&HitTarget::Overlay));
        assert_eq!(hits.hit_test(39, 11), Some(&HitTarget::Overlay));
        assert_eq!(hits.hit_test(15, 0), Some(&HitTarget::Control(0)));
    }
}

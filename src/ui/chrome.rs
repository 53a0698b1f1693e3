//! App chrome: the app bar and the nav entries.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ ‹ Back  Title               [Reply] [Reload] │  app bar (top or bottom)
//! │ Replies  Settings                            │  nav strip (undocked)
//! │ ...active view...                            │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! With the nav drawer docked the entries move into a left column instead
//! of the strip. Every affordance registers a hit target; the app maps those
//! to back navigation, switches, or bar actions.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

use crate::navigation::{BarAction, NavEntry, ViewId};
use crate::render::{HitRegistry, HitTarget};

use super::text::truncate;
use super::theme::Theme;

/// Width of the docked nav column.
pub const DOCKED_NAV_WIDTH: u16 = 16;

const BACK_LABEL: &str = "\u{2039} Back";

/// Where chrome and content go this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeLayout {
    pub bar: Rect,
    /// Nav strip or docked column. Empty when there are no entries.
    pub nav: Rect,
    pub content: Rect,
    pub docked: bool,
}

/// Everything the chrome shows, gathered from the manager and settings.
#[derive(Debug, Clone)]
pub struct ChromeModel {
    pub title: String,
    pub can_go_back: bool,
    pub actions: Vec<BarAction>,
    pub entries: Vec<(ViewId, NavEntry)>,
    pub active: ViewId,
    pub bottom_bar: bool,
    pub dock_nav: bool,
}

/// Split `area` into bar, nav and content.
pub fn layout(area: Rect, bottom_bar: bool, dock_nav: bool, has_nav: bool) -> ChromeLayout {
    let bar_constraints = if bottom_bar {
        [Constraint::Min(0), Constraint::Length(1)]
    } else {
        [Constraint::Length(1), Constraint::Min(0)]
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(bar_constraints)
        .split(area);
    let (bar, body) = if bottom_bar {
        (rows[1], rows[0])
    } else {
        (rows[0], rows[1])
    };

    if !has_nav {
        return ChromeLayout {
            bar,
            nav: Rect::new(body.x, body.y, 0, 0),
            content: body,
            docked: false,
        };
    }

    if dock_nav && body.width > DOCKED_NAV_WIDTH * 2 {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(DOCKED_NAV_WIDTH), Constraint::Min(0)])
            .split(body);
        return ChromeLayout {
            bar,
            nav: columns[0],
            content: columns[1],
            docked: true,
        };
    }

    // The strip sits between the bar and the content.
    let strip_constraints = if bottom_bar {
        [Constraint::Min(0), Constraint::Length(1)]
    } else {
        [Constraint::Length(1), Constraint::Min(0)]
    };
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints(strip_constraints)
        .split(body);
    let (nav, content) = if bottom_bar {
        (parts[1], parts[0])
    } else {
        (parts[0], parts[1])
    };
    ChromeLayout {
        bar,
        nav,
        content,
        docked: false,
    }
}

/// Draw the app bar and nav entries, registering their hit targets.
pub fn render(
    buf: &mut Buffer,
    chrome: &ChromeLayout,
    model: &ChromeModel,
    theme: &Theme,
    hits: &mut HitRegistry,
) {
    render_app_bar(buf, chrome.bar, model, theme, hits);
    if chrome.nav.area() > 0 {
        if chrome.docked {
            render_nav_column(buf, chrome.nav, model, theme, hits);
        } else {
            render_nav_strip(buf, chrome.nav, model, theme, hits);
        }
    }
}

fn render_app_bar(
    buf: &mut Buffer,
    area: Rect,
    model: &ChromeModel,
    theme: &Theme,
    hits: &mut HitRegistry,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    buf.set_style(area, theme.bar());

    // Actions are laid out right to left so the title gets what is left.
    let mut right = area.right();
    for (index, action) in model.actions.iter().enumerate().rev() {
        let label = format!("[{}]", action.label);
        let width = label.width() as u16;
        if right < area.x + width + 1 {
            break;
        }
        right -= width;
        buf.set_string(right, area.y, &label, theme.bar().fg(theme.accent));
        hits.register_rect(
            Rect::new(right, area.y, width, 1),
            HitTarget::BarAction(index as u16),
        );
        right -= 1;
    }

    let mut x = area.x + 1;
    if model.can_go_back {
        let width = BACK_LABEL.width() as u16;
        buf.set_string(x, area.y, BACK_LABEL, theme.bar().fg(theme.accent));
        hits.register_rect(Rect::new(x, area.y, width, 1), HitTarget::Back);
        x += width + 2;
    }

    let room = usize::from(right.saturating_sub(x).saturating_sub(1));
    buf.set_string(x, area.y, truncate(&model.title, room), theme.bar());
}

fn render_nav_strip(
    buf: &mut Buffer,
    area: Rect,
    model: &ChromeModel,
    theme: &Theme,
    hits: &mut HitRegistry,
) {
    buf.set_style(area, theme.base());
    let mut x = area.x + 1;
    for (id, entry) in &model.entries {
        let width = entry.label.width() as u16;
        if x + width > area.right() {
            break;
        }
        let style = if *id == model.active {
            theme.accented()
        } else {
            theme.dimmed()
        };
        buf.set_string(x, area.y, entry.label, style);
        hits.register_rect(Rect::new(x, area.y, width, 1), HitTarget::NavEntry(*id));
        x += width + 2;
    }
}

fn render_nav_column(
    buf: &mut Buffer,
    area: Rect,
    model: &ChromeModel,
    theme: &Theme,
    hits: &mut HitRegistry,
) {
    buf.set_style(area, theme.bar());
    let label_width = usize::from(area.width.saturating_sub(2));
    for (row, (id, entry)) in model.entries.iter().enumerate() {
        let y = area.y + row as u16;
        if y >= area.bottom() {
            break;
        }
        let line = Rect::new(area.x, y, area.width.saturating_sub(1), 1);
        let style = if *id == model.active {
            theme.selected()
        } else {
            theme.bar()
        };
        buf.set_style(line, style);
        buf.set_stringn(area.x + 1, y, entry.label, label_width, style);
        hits.register_rect(line, HitTarget::NavEntry(*id));
    }
    // Divider
    let divider_x = area.right().saturating_sub(1);
    for y in area.y..area.bottom() {
        if let Some(cell) = buf.cell_mut((divider_x, y)) {
            cell.set_symbol("\u{2502}").set_fg(theme.border);
        }
    }
}

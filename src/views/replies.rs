//! The message list.
//!
//! Rows are laid out as a thread tree and rendered through the animated row
//! renderer. Each row owns a reveal clock and a drag tracker in the
//! [`RowArena`]; dragging a row sideways past the threshold opens the
//! compose view replying to it.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

use crate::gesture::DragRelease;
use crate::input::{InputEvent, PointerEvent, PointerKind};
use crate::models::{thread_order, MessageId, MessageRecord, ThreadedRecord};
use crate::navigation::{
    BarAction, Intent, NavEntry, Navigator, Payload, View, ViewFrame, ViewId, ViewInput,
};
use crate::render::HitTarget;
use crate::services::MessageSource;
use crate::ui::text::{truncate, wrap_text};
use crate::ui::{render_row, RowArena, RowConfig, Theme};

/// Indent per reply level, in cells.
const INDENT: u16 = 2;
/// Deeper replies stop indenting.
const MAX_INDENT_DEPTH: usize = 8;

const ACTION_REPLY: u16 = 0;
const ACTION_NEW: u16 = 1;

const REPLY_GLYPH: &str = "\u{21a9}";

pub struct RepliesView {
    source: Arc<dyn MessageSource>,
    rows: Vec<ThreadedRecord>,
    arena: RowArena,
    /// Source revision the rows were built from.
    seen_revision: Option<u64>,
    selected: Option<MessageId>,
    /// Index of the first row drawn.
    scroll: usize,
    /// Rows that fit last frame.
    visible_rows: usize,
    pending_focus: Option<MessageId>,
    max_row_width: u16,
}

impl RepliesView {
    pub fn new(source: Arc<dyn MessageSource>, config: RowConfig, max_row_width: u16) -> Self {
        Self {
            source,
            rows: Vec::new(),
            arena: RowArena::new(config),
            seen_revision: None,
            selected: None,
            scroll: 0,
            visible_rows: 0,
            pending_focus: None,
            max_row_width,
        }
    }

    pub fn rows(&self) -> &[ThreadedRecord] {
        &self.rows
    }

    pub fn selected(&self) -> Option<&MessageId> {
        self.selected.as_ref()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn arena(&self) -> &RowArena {
        &self.arena
    }

    /// Re-subscribe if the source changed since the last sync.
    ///
    /// Rows present at the first load appear settled; rows that arrive later
    /// play the reveal animation. Rows that left the source drop their state.
    fn sync(&mut self, now: Instant) {
        let revision = self.source.revision();
        if self.seen_revision == Some(revision) {
            return;
        }
        let animate = self.seen_revision.is_some();
        self.seen_revision = Some(revision);

        let records: Vec<MessageRecord> = self.source.subscribe().collect();
        self.rows = thread_order(&records);

        let ids: HashSet<MessageId> = self.rows.iter().map(|row| row.record.id.clone()).collect();
        for row in &self.rows {
            self.arena.ensure(&row.record.id, animate, now);
        }
        let dropped = self.arena.retain_ids(&ids);
        if dropped > 0 {
            debug!("Dropped state for {} removed rows", dropped);
        }
        if self.selected.as_ref().is_some_and(|id| !ids.contains(id)) {
            self.selected = None;
        }
        self.scroll = self.scroll.min(self.rows.len().saturating_sub(1));
        debug!("Synced {} rows at revision {}", self.rows.len(), revision);
    }

    fn index_of(&self, id: &MessageId) -> Option<usize> {
        self.rows.iter().position(|row| &row.record.id == id)
    }

    fn record(&self, id: &MessageId) -> Option<&MessageRecord> {
        self.rows
            .iter()
            .map(|row| &row.record)
            .find(|record| &record.id == id)
    }

    fn reply_to(&self, id: &MessageId, nav: &mut Navigator) {
        if let Some(record) = self.record(id) {
            debug!("Replying to {}", id.short());
            nav.request_switch(ViewId::Compose, Some(Intent::reply_to(record.clone())));
        }
    }

    fn select_index(&mut self, index: usize) {
        if let Some(row) = self.rows.get(index) {
            self.selected = Some(row.record.id.clone());
            self.ensure_visible(index);
        }
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll {
            self.scroll = index;
        } else if self.visible_rows > 0 && index >= self.scroll + self.visible_rows {
            self.scroll = index + 1 - self.visible_rows;
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let current = self.selected.as_ref().and_then(|id| self.index_of(id));
        let next = match current {
            Some(index) => index
                .saturating_add_signed(delta)
                .min(self.rows.len() - 1),
            None if delta < 0 => self.rows.len() - 1,
            None => 0,
        };
        self.select_index(next);
    }

    fn scroll_by(&mut self, lines: i16) {
        let max = self.rows.len().saturating_sub(1);
        self.scroll = self
            .scroll
            .saturating_add_signed(isize::from(lines))
            .min(max);
    }

    fn handle_key(&mut self, code: KeyCode, nav: &mut Navigator) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.scroll_by(-(self.visible_rows.max(1) as i16)),
            KeyCode::PageDown => self.scroll_by(self.visible_rows.max(1) as i16),
            KeyCode::Home => self.select_index(0),
            KeyCode::End => self.select_index(self.rows.len().saturating_sub(1)),
            KeyCode::Char('r') | KeyCode::Enter => {
                if let Some(id) = self.selected.clone() {
                    self.reply_to(&id, nav);
                }
            }
            KeyCode::Char('n') => nav.request_switch(ViewId::Compose, None),
            _ => {}
        }
    }

    fn handle_pointer(&mut self, pointer: &PointerEvent, input: &ViewInput<'_>, nav: &mut Navigator) {
        let now = input.now;
        match pointer.kind {
            PointerKind::Down => {
                let Some(HitTarget::Row(id)) = input.hits.hit_test(pointer.x, pointer.y) else {
                    return;
                };
                let id = id.clone();
                self.selected = Some(id.clone());
                if let Some(slot) = self.arena.get_mut(&id) {
                    if slot.drag.pointer_down(pointer.x, now) {
                        debug!("Drag started on {}", id.short());
                    }
                }
            }
            PointerKind::Move => {
                if let Some(slot) = self.arena.dragging_mut() {
                    if let Err(e) = slot.drag.pointer_move(pointer.x, now) {
                        warn!("Ignoring drag sample for {}: {}", slot.id.short(), e);
                    }
                }
            }
            PointerKind::Up => {
                if let Some(slot) = self.arena.dragging_mut() {
                    let id = slot.id.clone();
                    match slot.drag.pointer_up(now) {
                        Ok(DragRelease::Reply) => self.reply_to(&id, nav),
                        Ok(DragRelease::Settling) => debug!("Drag on {} settling", id.short()),
                        Err(e) => warn!("Ignoring release on {}: {}", id.short(), e),
                    }
                    return;
                }
                // A release with no drag in flight, e.g. the press landed
                // before the row existed.
                if let Some(HitTarget::Row(id)) = input.hits.hit_test(pointer.x, pointer.y) {
                    if let Some(Err(e)) = self.arena.get_mut(id).map(|slot| slot.drag.pointer_up(now)) {
                        warn!("Ignoring release on {}: {}", id.short(), e);
                    }
                }
            }
            PointerKind::Cancel => {
                if let Some(slot) = self.arena.dragging_mut() {
                    if let Err(e) = slot.drag.pointer_cancel(now) {
                        warn!("Ignoring cancel on {}: {}", slot.id.short(), e);
                    }
                }
            }
            PointerKind::Hover => {}
        }
    }
}

impl View for RepliesView {
    fn title(&self) -> String {
        format!("Replies ({})", self.rows.len())
    }

    fn nav_entry(&self) -> Option<NavEntry> {
        Some(NavEntry { label: "Replies" })
    }

    fn bar_actions(&self) -> Vec<BarAction> {
        vec![BarAction::new("Reply"), BarAction::new("New")]
    }

    fn become_visible(&mut self, now: Instant) {
        self.sync(now);
    }

    fn become_hidden(&mut self, now: Instant) {
        // No gesture may fire after the list is gone.
        self.arena.cancel_drags(now);
    }

    fn handle_intent(&mut self, intent: Intent) {
        if let Intent::Navigate(Payload::FocusMessage(id)) = intent {
            self.selected = Some(id.clone());
            self.pending_focus = Some(id);
        }
    }

    fn is_animating(&self, now: Instant) -> bool {
        self.arena.is_animating(now)
    }

    fn update(&mut self, input: &ViewInput<'_>, nav: &mut Navigator) {
        self.sync(input.now);
        match input.event {
            InputEvent::Key(key) => self.handle_key(key.code, nav),
            InputEvent::Pointer(pointer) => self.handle_pointer(pointer, input, nav),
            InputEvent::Scroll(lines) => self.scroll_by(*lines),
            InputEvent::Action(ACTION_REPLY) => {
                if let Some(id) = self.selected.clone() {
                    self.reply_to(&id, nav);
                }
            }
            InputEvent::Action(ACTION_NEW) => nav.request_switch(ViewId::Compose, None),
            InputEvent::Action(_) | InputEvent::Paste(_) => {}
        }
    }

    fn render(&mut self, frame: &mut ViewFrame<'_>) -> Size {
        let now = frame.now;
        self.sync(now);
        let list = frame.area;
        let theme = *frame.theme;
        frame.buf.set_style(list, theme.base());

        if self.rows.is_empty() {
            let hint = "No messages yet. Press n to start a thread.";
            frame.buf.set_stringn(
                list.x + 1,
                list.y,
                hint,
                usize::from(list.width.saturating_sub(1)),
                theme.dimmed(),
            );
            self.visible_rows = 0;
            return list.as_size();
        }

        if let Some(id) = self.pending_focus.take() {
            if let Some(index) = self.index_of(&id) {
                self.ensure_visible(index);
            }
        }

        let width = list.width.min(self.max_row_width);
        let mut y = list.y;
        let mut drawn = 0;
        for row in self.rows.iter().skip(self.scroll) {
            if y >= list.bottom() {
                break;
            }
            let Some(slot) = self.arena.get_mut(&row.record.id) else {
                continue;
            };
            let height = message_height(&row.record, row.depth, width).min(list.bottom() - y);
            let area = Rect::new(list.x, y, width, height);
            let selected = self.selected.as_ref() == Some(&row.record.id);
            let layout = render_row(frame.buf, area, list, slot, frame.hits, now, |buf, area| {
                draw_message(buf, area, &row.record, row.depth, selected, &theme)
            });
            draw_reply_hint(frame.buf, list, y, layout.drag, layout.bounds.right(), slot.drag.config().threshold, &theme);
            y = y.saturating_add(layout.height().max(1));
            drawn += 1;
        }
        self.visible_rows = drawn;
        Size::new(list.width, y - list.y)
    }
}

/// Reply arrow in the gap a drag opens beside the row.
fn draw_reply_hint(
    buf: &mut Buffer,
    list: Rect,
    y: u16,
    drag: i32,
    right: i32,
    threshold: f32,
    theme: &Theme,
) {
    if drag.abs() < 2 {
        return;
    }
    let style = if drag.unsigned_abs() as f32 >= threshold {
        theme.accented()
    } else {
        theme.dimmed()
    };
    let x = if drag > 0 {
        i32::from(list.x)
    } else {
        right
    };
    if x >= i32::from(list.x) && x < i32::from(list.right()) && y < list.bottom() {
        buf.set_string(x as u16, y, REPLY_GLYPH, style);
    }
}

/// Draw one message: header line, then wrapped content. Returns the natural
/// size of what was drawn.
fn draw_message(
    buf: &mut Buffer,
    area: Rect,
    record: &MessageRecord,
    depth: usize,
    selected: bool,
    theme: &Theme,
) -> Size {
    let indent = message_indent(area.width, depth);
    let x = area.x + indent;
    let text_width = usize::from(area.width - indent);
    if text_width == 0 || area.height == 0 {
        return Size::default();
    }

    if depth > 0 && indent >= INDENT {
        buf.set_string(x - INDENT, area.y, "\u{21b3}", theme.dimmed());
    }

    let header = format!(
        "{} \u{00b7} {}",
        record.author,
        record.created_at.format("%H:%M")
    );
    let header = truncate(&header, text_width);
    let header_style = if selected {
        theme.selected()
    } else {
        theme.accented()
    };
    buf.set_string(x, area.y, &header, header_style);

    let mut width = header.width();
    let mut height: u16 = 1;
    for line in wrap_text(&record.content, text_width) {
        let y = area.y + height;
        if y >= area.bottom() {
            break;
        }
        buf.set_string(x, y, &line, theme.base());
        width = width.max(line.width());
        height += 1;
    }
    Size::new(indent + width as u16, height)
}

fn message_indent(width: u16, depth: usize) -> u16 {
    let indent = INDENT * depth.min(MAX_INDENT_DEPTH) as u16;
    if width < indent + 8 {
        0
    } else {
        indent
    }
}

/// Lines `draw_message` fills at `width`: the header plus wrapped content.
fn message_height(record: &MessageRecord, depth: usize, width: u16) -> u16 {
    let text_width = usize::from(width - message_indent(width, depth));
    if text_width == 0 {
        return 0;
    }
    let lines = wrap_text(&record.content, text_width).len();
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(1)
}

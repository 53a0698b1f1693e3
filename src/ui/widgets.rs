//! Reusable form widgets
//!
//! - [`TextField`] - single-line editable text with a cursor
//! - [`render_input_field`] - labelled input box
//! - [`render_switch`] / [`render_button`] - settings controls
//!
//! All render functions draw straight into a [`Buffer`] and return the
//! height they consumed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use super::text::truncate;
use super::theme::Theme;

/// Editable single-line text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position in chars.
    cursor: usize,
}

/// What a key did to a [`TextField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    Edited,
    Submit,
    Ignored,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            let at = self.byte_index(self.cursor);
            self.value.insert(at, c);
            self.cursor += 1;
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> FieldAction {
        match key.code {
            KeyCode::Enter => FieldAction::Submit,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                FieldAction::Edited
            }
            KeyCode::Char('u') => {
                self.clear();
                FieldAction::Edited
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                FieldAction::Edited
            }
            KeyCode::Delete if self.cursor < self.value.chars().count() => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                FieldAction::Edited
            }
            KeyCode::Left if self.cursor > 0 => {
                self.cursor -= 1;
                FieldAction::Edited
            }
            KeyCode::Right if self.cursor < self.value.chars().count() => {
                self.cursor += 1;
                FieldAction::Edited
            }
            KeyCode::Home => {
                self.cursor = 0;
                FieldAction::Edited
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                FieldAction::Edited
            }
            _ => FieldAction::Ignored,
        }
    }
}

/// Height of a labelled input: label (1) + input box (3).
pub const INPUT_FIELD_HEIGHT: u16 = 4;

/// Render a labelled input box. Returns the height consumed.
pub fn render_input_field(
    buf: &mut Buffer,
    area: Rect,
    label: &str,
    field: &TextField,
    focused: bool,
    placeholder: &str,
    theme: &Theme,
) -> u16 {
    if area.height < INPUT_FIELD_HEIGHT {
        return 0;
    }
    let label_style = if focused {
        theme.base()
    } else {
        theme.dimmed()
    };
    buf.set_stringn(area.x, area.y, label, usize::from(area.width), label_style);

    let box_area = Rect::new(area.x, area.y + 1, area.width, 3);
    let border = if focused { theme.accent } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(theme.bar());

    let inner_width = usize::from(box_area.width.saturating_sub(2));
    let line = if field.is_empty() && !focused {
        Line::from(Span::styled(truncate(placeholder, inner_width), theme.dimmed()))
    } else {
        let mut text = field.value().to_string();
        if focused {
            let at = field
                .value()
                .char_indices()
                .nth(field.cursor())
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            text.insert(at, '\u{2588}'); // Block cursor
        }
        // Keep the cursor end visible
        let skip = text.width().saturating_sub(inner_width);
        let shown: String = text.chars().skip(skip).collect();
        Line::from(Span::styled(shown, theme.bar()))
    };
    Paragraph::new(line).block(block).render(box_area, buf);
    INPUT_FIELD_HEIGHT
}

/// Render a labelled on/off switch on one line. Returns the height consumed.
pub fn render_switch(
    buf: &mut Buffer,
    area: Rect,
    label: &str,
    on: bool,
    focused: bool,
    theme: &Theme,
) -> u16 {
    if area.height == 0 {
        return 0;
    }
    let knob = if on { "[on ]" } else { "[off]" };
    let knob_style = if on {
        Style::default().fg(theme.success).bg(theme.background)
    } else {
        theme.dimmed()
    };
    let label_style = if focused { theme.selected() } else { theme.base() };
    let knob_x = area.right().saturating_sub(knob.len() as u16);
    let label_width = usize::from(knob_x.saturating_sub(area.x).saturating_sub(1));
    buf.set_stringn(area.x, area.y, label, label_width, label_style);
    buf.set_string(knob_x, area.y, knob, knob_style);
    1
}

/// Render a one-line button. Returns the rect it occupies.
pub fn render_button(buf: &mut Buffer, area: Rect, label: &str, focused: bool, theme: &Theme) -> Rect {
    let text = format!("[ {} ]", label);
    let width = (text.width() as u16).min(area.width);
    let style = if focused {
        theme.selected()
    } else {
        theme.accented()
    };
    buf.set_stringn(area.x, area.y, &text, usize::from(width), style);
    Rect::new(area.x, area.y, width, area.height.min(1))
}

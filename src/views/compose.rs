//! Compose a new message or a reply.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::layout::{Rect, Size};
use tracing::{info, warn};

use crate::error::TwigError;
use crate::input::InputEvent;
use crate::models::{Draft, MessageRecord};
use crate::navigation::{
    BarAction, Intent, Navigator, Payload, View, ViewFrame, ViewId, ViewInput,
};
use crate::services::{MessageSource, SettingsService};
use crate::ui::text::{truncate, wrap_text};
use crate::ui::widgets::{render_input_field, FieldAction, TextField, INPUT_FIELD_HEIGHT};

const ACTION_SEND: u16 = 0;

pub struct ComposeView {
    source: Arc<dyn MessageSource>,
    settings: Arc<dyn SettingsService>,
    reply_to: Option<MessageRecord>,
    draft: TextField,
    error: Option<String>,
}

impl ComposeView {
    pub fn new(source: Arc<dyn MessageSource>, settings: Arc<dyn SettingsService>) -> Self {
        Self {
            source,
            settings,
            reply_to: None,
            draft: TextField::default(),
            error: None,
        }
    }

    pub fn reply_to(&self) -> Option<&MessageRecord> {
        self.reply_to.as_ref()
    }

    pub fn draft(&self) -> &str {
        self.draft.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn author(&self) -> String {
        self.settings
            .identity()
            .map(|identity| identity.name)
            .unwrap_or_else(|| "anonymous".to_string())
    }

    fn submit(&mut self, nav: &mut Navigator) {
        let parent = self.reply_to.as_ref().map(|record| record.id.clone());
        let draft = Draft::new(self.author(), self.draft.value()).in_reply_to(parent);
        match self.source.submit(draft) {
            Ok(record) => {
                info!("Submitted message {}", record.id.short());
                self.draft.clear();
                self.error = None;
                self.reply_to = None;
                nav.request_switch(ViewId::Replies, Some(Intent::focus_message(record.id)));
            }
            Err(e) => {
                warn!("Submit failed: {}", e);
                self.error = Some(TwigError::from(e).user_message());
            }
        }
    }
}

impl View for ComposeView {
    fn title(&self) -> String {
        match &self.reply_to {
            Some(record) => format!("Reply to {}", record.author),
            None => "New message".to_string(),
        }
    }

    fn bar_actions(&self) -> Vec<BarAction> {
        vec![BarAction::new("Send")]
    }

    fn become_visible(&mut self, _now: Instant) {
        // A reply target only arrives with the intent that follows.
        self.reply_to = None;
        self.error = None;
    }

    fn handle_intent(&mut self, intent: Intent) {
        if let Intent::Navigate(Payload::ReplyTo(record)) = intent {
            self.reply_to = Some(record);
        }
    }

    fn update(&mut self, input: &ViewInput<'_>, nav: &mut Navigator) {
        match input.event {
            InputEvent::Key(key) => {
                if self.draft.handle_key(key) == FieldAction::Submit {
                    self.submit(nav);
                } else if key.code != KeyCode::Enter {
                    self.error = None;
                }
            }
            InputEvent::Paste(text) => self.draft.insert_str(text),
            InputEvent::Action(ACTION_SEND) => self.submit(nav),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut ViewFrame<'_>) -> Size {
        let area = frame.area;
        let theme = frame.theme;
        frame.buf.set_style(area, theme.base());
        let inner = Rect::new(
            area.x + 1,
            area.y,
            area.width.saturating_sub(2),
            area.height,
        );
        let width = usize::from(inner.width);
        let mut y = inner.y;

        if let Some(record) = &self.reply_to {
            let header = format!("Replying to {}:", record.author);
            frame
                .buf
                .set_stringn(inner.x, y, &header, width, theme.dimmed());
            y += 1;
            for line in wrap_text(record.content.as_str(), width.saturating_sub(2))
                .into_iter()
                .take(3)
            {
                if y >= inner.bottom() {
                    break;
                }
                frame
                    .buf
                    .set_stringn(inner.x, y, format!("\u{2502} {}", line), width, theme.dimmed());
                y += 1;
            }
            y += 1;
        }

        if y + INPUT_FIELD_HEIGHT <= inner.bottom() {
            let field_area = Rect::new(inner.x, y, inner.width, INPUT_FIELD_HEIGHT);
            y += render_input_field(
                frame.buf,
                field_area,
                "Message",
                &self.draft,
                true,
                "Say something",
                theme,
            );
        }

        if y < inner.bottom() {
            let (text, style) = match &self.error {
                Some(error) => (error.clone(), theme.base().fg(theme.error)),
                None => (
                    "Enter to send \u{00b7} Esc to go back".to_string(),
                    theme.dimmed(),
                ),
            };
            frame
                .buf
                .set_string(inner.x, y, truncate(&text, width), style);
            y += 1;
        }
        Size::new(area.width, y.saturating_sub(area.y))
    }
}

//! First-run notice the user has to accept before anything else.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::layout::{Rect, Size};
use tracing::info;

use crate::input::{InputEvent, PointerKind};
use crate::navigation::{Navigator, View, ViewFrame, ViewInput};
use crate::render::HitTarget;
use crate::services::{persist_in_background, SettingsService};
use crate::ui::text::wrap_text;
use crate::ui::widgets::render_button;

use super::{initial_view, NOTICE_VERSION};

const ACCEPT: u16 = 0;

const NOTICE: &str = "Messages you post are stored by the forum server you connect to \
and are visible to everyone on it. Your display name is attached to every message. \
Nothing is sent anywhere until you choose a server.";

pub struct ConsentView {
    settings: Arc<dyn SettingsService>,
}

impl ConsentView {
    pub fn new(settings: Arc<dyn SettingsService>) -> Self {
        Self { settings }
    }

    fn accept(&mut self, nav: &mut Navigator) {
        info!("Notice version {} acknowledged", NOTICE_VERSION);
        self.settings.acknowledge_notice(NOTICE_VERSION);
        persist_in_background(Arc::clone(&self.settings));
        nav.request_switch(initial_view(&self.settings.snapshot()), None);
    }
}

impl View for ConsentView {
    fn title(&self) -> String {
        "Welcome".to_string()
    }

    fn become_visible(&mut self, _now: Instant) {}

    fn update(&mut self, input: &ViewInput<'_>, nav: &mut Navigator) {
        let accepted = match input.event {
            InputEvent::Key(key) => matches!(key.code, KeyCode::Enter | KeyCode::Char('a')),
            InputEvent::Pointer(pointer) if pointer.kind == PointerKind::Down => {
                input.hits.hit_test(pointer.x, pointer.y) == Some(&HitTarget::Control(ACCEPT))
            }
            InputEvent::Action(ACCEPT) => true,
            _ => false,
        };
        if accepted {
            self.accept(nav);
        }
    }

    fn render(&mut self, frame: &mut ViewFrame<'_>) -> Size {
        let area = frame.area;
        let theme = frame.theme;
        frame.buf.set_style(area, theme.base());
        let inner = Rect::new(
            area.x + 2,
            area.y + 1,
            area.width.saturating_sub(4),
            area.height.saturating_sub(1),
        );
        let mut y = inner.y;
        for line in wrap_text(NOTICE, usize::from(inner.width)) {
            if y >= inner.bottom() {
                break;
            }
            frame.buf.set_string(inner.x, y, line, theme.base());
            y += 1;
        }
        y += 1;
        if y < inner.bottom() {
            let button = render_button(
                frame.buf,
                Rect::new(inner.x, y, inner.width, 1),
                "Accept",
                true,
                theme,
            );
            frame.hits.register_rect(button, HitTarget::Control(ACCEPT));
            y += 1;
        }
        Size::new(area.width, y.min(area.bottom()) - area.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerEvent;
    use crate::navigation::ViewId;
    use crate::render::HitRegistry;
    use crate::services::{FileSettings, Settings};
    use crate::ui::theme::Theme;
    use ratatui::buffer::Buffer;

    #[test]
    fn test_accept_records_notice_and_continues() {
        let store = Arc::new(FileSettings::in_memory(Settings::default()));
        let mut view = ConsentView::new(store.clone());
        let mut nav = Navigator::new(ViewId::Consent);
        let hits = HitRegistry::new();
        let event = InputEvent::key(KeyCode::Enter);
        view.update(
            &ViewInput {
                event: &event,
                hits: &hits,
                now: Instant::now(),
            },
            &mut nav,
        );
        assert_eq!(store.snapshot().acknowledged_notice_version, NOTICE_VERSION);
        assert_eq!(nav.pending().map(|p| p.target), Some(ViewId::ConnectForm));
    }

    #[test]
    fn test_accept_button_is_clickable() {
        let store = Arc::new(FileSettings::in_memory(Settings::default()));
        let mut view = ConsentView::new(store.clone());
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        let mut hits = HitRegistry::new();
        let theme = Theme::dark();
        let now = Instant::now();
        view.render(&mut ViewFrame {
            buf: &mut buf,
            area,
            hits: &mut hits,
            theme: &theme,
            now,
        });

        let button = hits
            .bounds_of(&HitTarget::Control(ACCEPT))
            .expect("accept button registered");
        let event = InputEvent::Pointer(PointerEvent::new(
            PointerKind::Down,
            button.x as u16,
            button.y as u16,
        ));
        let mut nav = Navigator::new(ViewId::Consent);
        view.update(
            &ViewInput {
                event: &event,
                hits: &hits,
                now,
            },
            &mut nav,
        );
        assert!(nav.pending().is_some());
    }
}

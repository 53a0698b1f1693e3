//! Recording doubles for views and notifications.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Instant;

use ratatui::layout::Size;
use twig::error::NotificationError;
use twig::navigation::{Intent, NavEntry, Navigator, View, ViewFrame, ViewId, ViewInput};
use twig::services::{Notifier, Settings};

/// Everything a [`RecordingView`] was told, in order.
#[derive(Debug, Default)]
pub struct ViewLog {
    pub events: Vec<(ViewId, &'static str)>,
    pub intents: Vec<(ViewId, Intent)>,
    pub refreshed: Vec<(ViewId, bool)>,
}

impl ViewLog {
    pub fn count(&self, id: ViewId, event: &str) -> usize {
        self.events
            .iter()
            .filter(|(view, name)| *view == id && *name == event)
            .count()
    }
}

pub type SharedLog = Rc<RefCell<ViewLog>>;

/// A view that logs its lifecycle calls and navigates on scripted keys.
pub struct RecordingView {
    id: ViewId,
    log: SharedLog,
    /// Switch requested on the next update, if any.
    next: Option<ViewId>,
}

impl RecordingView {
    pub fn new(id: ViewId, log: SharedLog) -> Self {
        Self { id, log, next: None }
    }

    pub fn switching_to(mut self, target: ViewId) -> Self {
        self.next = Some(target);
        self
    }
}

impl View for RecordingView {
    fn title(&self) -> String {
        self.id.to_string()
    }

    fn nav_entry(&self) -> Option<NavEntry> {
        Some(NavEntry {
            label: self.id.as_str(),
        })
    }

    fn become_visible(&mut self, _now: Instant) {
        self.log.borrow_mut().events.push((self.id, "visible"));
    }

    fn become_hidden(&mut self, _now: Instant) {
        self.log.borrow_mut().events.push((self.id, "hidden"));
    }

    fn refresh(&mut self, settings: &Settings) {
        self.log
            .borrow_mut()
            .refreshed
            .push((self.id, settings.dark_mode));
    }

    fn handle_intent(&mut self, intent: Intent) {
        self.log.borrow_mut().intents.push((self.id, intent));
    }

    fn update(&mut self, _input: &ViewInput<'_>, nav: &mut Navigator) {
        if let Some(target) = self.next {
            nav.request_switch(target, None);
        }
    }

    fn render(&mut self, frame: &mut ViewFrame<'_>) -> Size {
        frame
            .buf
            .set_string(frame.area.x, frame.area.y, self.id.as_str(), frame.theme.base());
        Size::new(frame.area.width, 1)
    }
}

/// Notifier that remembers what it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}

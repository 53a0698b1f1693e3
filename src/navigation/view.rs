//! The capability every screen implements.

use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};

use crate::input::InputEvent;
use crate::render::HitRegistry;
use crate::services::Settings;
use crate::ui::theme::Theme;

use super::{Intent, Navigator};

/// Entry a view contributes to the nav drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
}

/// An app bar action. Activating it delivers
/// [`InputEvent::Action`] with the action's index to the active view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarAction {
    pub label: String,
}

impl BarAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// One input event as seen by the active view.
pub struct ViewInput<'a> {
    pub event: &'a InputEvent,
    /// Hit regions of the frame currently on screen.
    pub hits: &'a HitRegistry,
    pub now: Instant,
}

/// Render target handed to the active view.
pub struct ViewFrame<'a> {
    pub buf: &'a mut Buffer,
    pub area: Rect,
    pub hits: &'a mut HitRegistry,
    pub theme: &'a Theme,
    pub now: Instant,
}

/// A full-screen, mutually exclusive UI mode.
///
/// The [`ViewManager`](super::ViewManager) only ever holds `Box<dyn View>`
/// and never inspects which screen it is talking to.
pub trait View {
    fn title(&self) -> String;

    fn nav_entry(&self) -> Option<NavEntry> {
        None
    }

    fn bar_actions(&self) -> Vec<BarAction> {
        Vec::new()
    }

    /// Called on every transition into this view.
    fn become_visible(&mut self, now: Instant);

    /// Called on every transition away from this view.
    fn become_hidden(&mut self, _now: Instant) {}

    /// Settings changed somewhere; re-read whatever the view depends on.
    fn refresh(&mut self, _settings: &Settings) {}

    /// Consume the intent that accompanied the transition into this view.
    fn handle_intent(&mut self, _intent: Intent) {}

    /// Whether the view has animations in flight and wants another frame.
    fn is_animating(&self, _now: Instant) -> bool {
        false
    }

    fn update(&mut self, input: &ViewInput<'_>, nav: &mut Navigator);

    /// Lay out and draw into `frame.area`, returning the size used.
    fn render(&mut self, frame: &mut ViewFrame<'_>) -> Size;
}

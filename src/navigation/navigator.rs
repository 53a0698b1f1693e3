//! Navigation state and the handle views use to request transitions.

use tracing::debug;

use super::{Intent, ViewId};

/// A switch requested during a frame, applied at the start of the next step.
#[derive(Debug)]
pub struct PendingSwitch {
    pub target: ViewId,
    pub intent: Option<Intent>,
}

/// Process-wide overlay toggles read by the render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlays {
    pub profiling: bool,
    pub theme: bool,
}

/// Active view, back history and the pending switch.
///
/// Views receive `&mut Navigator` in [`View::update`](super::View::update);
/// everything they can do to navigation goes through it.
#[derive(Debug)]
pub struct Navigator {
    pub(super) active: ViewId,
    pub(super) back_stack: Vec<ViewId>,
    pub(super) pending: Option<PendingSwitch>,
    pub(super) back_requested: bool,
    pub(super) overlays: Overlays,
}

impl Navigator {
    pub fn new(initial: ViewId) -> Self {
        Self {
            active: initial,
            back_stack: Vec::new(),
            pending: None,
            back_requested: false,
            overlays: Overlays::default(),
        }
    }

    pub fn active(&self) -> ViewId {
        self.active
    }

    pub fn back_stack(&self) -> &[ViewId] {
        &self.back_stack
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn pending(&self) -> Option<&PendingSwitch> {
        self.pending.as_ref()
    }

    /// Record a switch to apply on the next step.
    ///
    /// Requesting the active view without an intent does nothing. Otherwise
    /// the latest request replaces any earlier one that has not been applied.
    pub fn request_switch(&mut self, target: ViewId, intent: Option<Intent>) {
        let intent = intent.filter(|intent| !intent.is_none());
        if target == self.active && intent.is_none() {
            debug!("Ignoring switch to already active view {}", target);
            return;
        }
        if let Some(previous) = self.pending.replace(PendingSwitch { target, intent }) {
            debug!(
                "Switch to {} supersedes pending switch to {}",
                target, previous.target
            );
        }
    }

    /// Ask the host to perform back navigation after this step.
    pub fn request_back(&mut self) {
        self.back_requested = true;
    }

    pub(super) fn take_pending(&mut self) -> Option<PendingSwitch> {
        self.pending.take()
    }

    pub(super) fn take_back_request(&mut self) -> bool {
        std::mem::take(&mut self.back_requested)
    }

    pub fn overlays(&self) -> Overlays {
        self.overlays
    }

    pub fn set_profiling_overlay(&mut self, enabled: bool) {
        self.overlays.profiling = enabled;
    }

    pub fn set_theme_overlay(&mut self, enabled: bool) {
        self.overlays.theme = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageId;

    #[test]
    fn test_request_active_without_intent_is_ignored() {
        let mut nav = Navigator::new(ViewId::Replies);
        nav.request_switch(ViewId::Replies, None);
        assert!(nav.pending().is_none());

        nav.request_switch(ViewId::Replies, Some(Intent::None));
        assert!(nav.pending().is_none());
    }

    #[test]
    fn test_request_active_with_intent_is_kept() {
        let mut nav = Navigator::new(ViewId::Replies);
        nav.request_switch(
            ViewId::Replies,
            Some(Intent::focus_message(MessageId::from("m1"))),
        );
        let pending = nav.pending().unwrap();
        assert_eq!(pending.target, ViewId::Replies);
        assert!(pending.intent.is_some());
    }

    #[test]
    fn test_last_request_wins() {
        let mut nav = Navigator::new(ViewId::Replies);
        nav.request_switch(ViewId::Settings, None);
        nav.request_switch(ViewId::Compose, Some(Intent::SettingsChanged));
        let pending = nav.take_pending().unwrap();
        assert_eq!(pending.target, ViewId::Compose);
        assert_eq!(pending.intent, Some(Intent::SettingsChanged));
        assert!(nav.take_pending().is_none());
    }

    #[test]
    fn test_noop_request_does_not_cancel_pending() {
        let mut nav = Navigator::new(ViewId::Replies);
        nav.request_switch(ViewId::Settings, None);
        nav.request_switch(ViewId::Replies, None);
        assert_eq!(nav.pending().map(|p| p.target), Some(ViewId::Settings));
    }

    #[test]
    fn test_back_request_is_taken_once() {
        let mut nav = Navigator::new(ViewId::Replies);
        assert!(!nav.take_back_request());
        nav.request_back();
        assert!(nav.take_back_request());
        assert!(!nav.take_back_request());
    }

    #[test]
    fn test_overlay_setters() {
        let mut nav = Navigator::new(ViewId::Replies);
        nav.set_profiling_overlay(true);
        assert_eq!(
            nav.overlays(),
            Overlays {
                profiling: true,
                theme: false
            }
        );
        nav.set_theme_overlay(true);
        nav.set_profiling_overlay(false);
        assert!(nav.overlays().theme);
        assert!(!nav.overlays().profiling);
    }
}

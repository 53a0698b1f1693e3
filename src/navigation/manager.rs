//! The view navigation manager.
//!
//! Owns the view registry and the [`Navigator`], applies pending switches,
//! performs back navigation and fans settings changes out to every view.
//! Nothing here draws; rendering is forwarded to the active view.

use std::collections::BTreeMap;
use std::time::Instant;

use ratatui::layout::Size;
use tracing::{error, info};

use crate::error::NavigationError;
use crate::services::Settings;

use super::{Intent, NavEntry, Navigator, Overlays, View, ViewFrame, ViewId, ViewInput};

/// Result of a back navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackNavigation {
    /// Moved back to this view.
    Navigated(ViewId),
    /// History is empty; the host decides what happens (usually exit).
    Exhausted,
}

pub struct ViewManager {
    views: BTreeMap<ViewId, Box<dyn View>>,
    nav: Navigator,
    started: bool,
}

impl ViewManager {
    pub fn new(initial: ViewId) -> Self {
        Self {
            views: BTreeMap::new(),
            nav: Navigator::new(initial),
            started: false,
        }
    }

    /// Register a view. Only valid before [`start`](Self::start).
    pub fn register(&mut self, id: ViewId, view: Box<dyn View>) -> Result<(), NavigationError> {
        if self.started {
            return Err(NavigationError::RegistryFrozen(id));
        }
        if self.views.contains_key(&id) {
            return Err(NavigationError::DuplicateView(id));
        }
        self.views.insert(id, view);
        Ok(())
    }

    /// Freeze the registry and show the initial view.
    pub fn start(&mut self, now: Instant) -> Result<(), NavigationError> {
        let initial = self.nav.active;
        let view = self
            .views
            .get_mut(&initial)
            .ok_or(NavigationError::UnknownView(initial))?;
        self.started = true;
        view.become_visible(now);
        info!("Started navigation at {}", initial);
        Ok(())
    }

    pub fn is_registered(&self, id: ViewId) -> bool {
        self.views.contains_key(&id)
    }

    pub fn active(&self) -> ViewId {
        self.nav.active
    }

    pub fn active_view(&self) -> Option<&dyn View> {
        self.views.get(&self.nav.active).map(|view| view.as_ref())
    }

    pub fn back_stack(&self) -> &[ViewId] {
        &self.nav.back_stack
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn has_pending_switch(&self) -> bool {
        self.nav.pending.is_some()
    }

    pub fn request_switch(&mut self, id: ViewId, intent: Option<Intent>) {
        self.nav.request_switch(id, intent);
    }

    /// Apply the pending switch, if any. Returns the view that became active.
    ///
    /// Called once per step before the active view sees input or renders.
    pub fn apply_pending_switch(&mut self, now: Instant) -> Option<ViewId> {
        let pending = self.nav.take_pending()?;
        let target = pending.target;

        if !self.views.contains_key(&target) {
            error!("Dropping switch to unregistered view {}", target);
            return None;
        }

        if target == self.nav.active {
            // Only reachable with an intent: deliver it without a transition.
            if let (Some(intent), Some(view)) = (pending.intent, self.views.get_mut(&target)) {
                view.handle_intent(intent);
            }
            return Some(target);
        }

        let previous = self.nav.active;
        if self.nav.back_stack.last() != Some(&previous) {
            self.nav.back_stack.push(previous);
        }
        self.transition(target, pending.intent, now);
        Some(target)
    }

    /// Pop the back history and transition to the popped view.
    pub fn handle_back_navigation(&mut self, now: Instant) -> BackNavigation {
        while let Some(target) = self.nav.back_stack.pop() {
            if target == self.nav.active || !self.views.contains_key(&target) {
                continue;
            }
            self.transition(target, None, now);
            return BackNavigation::Navigated(target);
        }
        info!("Back navigation exhausted at {}", self.nav.active);
        BackNavigation::Exhausted
    }

    fn transition(&mut self, target: ViewId, intent: Option<Intent>, now: Instant) {
        let previous = self.nav.active;
        if let Some(view) = self.views.get_mut(&previous) {
            view.become_hidden(now);
        }
        self.nav.active = target;
        if let Some(view) = self.views.get_mut(&target) {
            view.become_visible(now);
            if let Some(intent) = intent {
                view.handle_intent(intent);
            }
        }
        info!("Navigated {} -> {}", previous, target);
    }

    /// Process a back request made by the active view during update.
    pub fn take_back_request(&mut self) -> bool {
        self.nav.take_back_request()
    }

    /// Let every registered view re-read settings.
    pub fn broadcast_settings_changed(&mut self, settings: &Settings) {
        for view in self.views.values_mut() {
            view.refresh(settings);
        }
    }

    pub fn overlays(&self) -> Overlays {
        self.nav.overlays()
    }

    pub fn set_profiling_overlay(&mut self, enabled: bool) {
        self.nav.set_profiling_overlay(enabled);
    }

    pub fn set_theme_overlay(&mut self, enabled: bool) {
        self.nav.set_theme_overlay(enabled);
    }

    pub fn update_active(&mut self, input: &ViewInput<'_>) {
        if let Some(view) = self.views.get_mut(&self.nav.active) {
            view.update(input, &mut self.nav);
        }
    }

    pub fn render_active(&mut self, frame: &mut ViewFrame<'_>) -> Size {
        self.views
            .get_mut(&self.nav.active)
            .map(|view| view.render(frame))
            .unwrap_or_default()
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.active_view()
            .map(|view| view.is_animating(now))
            .unwrap_or(false)
    }

    /// Nav drawer entries in registry order.
    pub fn nav_entries(&self) -> Vec<(ViewId, NavEntry)> {
        self.views
            .iter()
            .filter_map(|(id, view)| view.nav_entry().map(|entry| (*id, entry)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageId;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        visible: Vec<ViewId>,
        hidden: Vec<ViewId>,
        intents: Vec<(ViewId, Intent)>,
        refreshed: Vec<ViewId>,
    }

    struct Probe {
        id: ViewId,
        calls: Rc<RefCell<Calls>>,
    }

    impl View for Probe {
        fn title(&self) -> String {
            self.id.to_string()
        }

        fn become_visible(&mut self, _now: Instant) {
            self.calls.borrow_mut().visible.push(self.id);
        }

        fn become_hidden(&mut self, _now: Instant) {
            self.calls.borrow_mut().hidden.push(self.id);
        }

        fn refresh(&mut self, _settings: &Settings) {
            self.calls.borrow_mut().refreshed.push(self.id);
        }

        fn handle_intent(&mut self, intent: Intent) {
            self.calls.borrow_mut().intents.push((self.id, intent));
        }

        fn update(&mut self, _input: &ViewInput<'_>, _nav: &mut Navigator) {}

        fn render(&mut self, _frame: &mut ViewFrame<'_>) -> Size {
            Size::default()
        }
    }

    fn manager(ids: &[ViewId]) -> (ViewManager, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut manager = ViewManager::new(ids[0]);
        for id in ids {
            manager
                .register(
                    *id,
                    Box::new(Probe {
                        id: *id,
                        calls: Rc::clone(&calls),
                    }),
                )
                .unwrap();
        }
        manager.start(Instant::now()).unwrap();
        calls.borrow_mut().visible.clear();
        (manager, calls)
    }

    const ABC: [ViewId; 3] = [ViewId::Replies, ViewId::Settings, ViewId::Compose];

    #[test]
    fn test_duplicate_registration_fails() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let mut manager = ViewManager::new(ViewId::Replies);
        let probe = || {
            Box::new(Probe {
                id: ViewId::Replies,
                calls: Rc::clone(&calls),
            })
        };
        manager.register(ViewId::Replies, probe()).unwrap();
        assert_eq!(
            manager.register(ViewId::Replies, probe()),
            Err(NavigationError::DuplicateView(ViewId::Replies))
        );
    }

    #[test]
    fn test_registration_after_start_fails() {
        let (mut manager, calls) = manager(&ABC);
        let result = manager.register(
            ViewId::Consent,
            Box::new(Probe {
                id: ViewId::Consent,
                calls,
            }),
        );
        assert_eq!(result, Err(NavigationError::RegistryFrozen(ViewId::Consent)));
        assert!(!manager.is_registered(ViewId::Consent));
    }

    #[test]
    fn test_start_requires_registered_initial_view() {
        let mut manager = ViewManager::new(ViewId::Consent);
        assert_eq!(
            manager.start(Instant::now()),
            Err(NavigationError::UnknownView(ViewId::Consent))
        );
    }

    #[test]
    fn test_switch_is_deferred_until_applied() {
        let (mut manager, calls) = manager(&ABC);
        manager.request_switch(ViewId::Settings, None);
        assert_eq!(manager.active(), ViewId::Replies);
        assert!(calls.borrow().visible.is_empty());

        assert_eq!(
            manager.apply_pending_switch(Instant::now()),
            Some(ViewId::Settings)
        );
        assert_eq!(manager.active(), ViewId::Settings);
        assert_eq!(calls.borrow().visible, vec![ViewId::Settings]);
        assert_eq!(calls.borrow().hidden, vec![ViewId::Replies]);
        assert!(!manager.has_pending_switch());
        assert_eq!(manager.apply_pending_switch(Instant::now()), None);
        assert_eq!(calls.borrow().visible.len(), 1);
    }

    #[test]
    fn test_every_view_becomes_visible_exactly_once() {
        for id in ABC.iter().skip(1) {
            let (mut manager, calls) = manager(&ABC);
            manager.request_switch(*id, None);
            manager.apply_pending_switch(Instant::now());
            assert_eq!(manager.active(), *id);
            assert_eq!(calls.borrow().visible, vec![*id]);
        }
    }

    #[test]
    fn test_switch_to_active_is_noop() {
        let (mut manager, calls) = manager(&ABC);
        manager.request_switch(ViewId::Replies, None);
        assert_eq!(manager.apply_pending_switch(Instant::now()), None);
        assert!(manager.back_stack().is_empty());
        assert!(calls.borrow().visible.is_empty());
    }

    #[test]
    fn test_self_switch_with_intent_delivers_intent_only() {
        let (mut manager, calls) = manager(&ABC);
        manager.request_switch(
            ViewId::Replies,
            Some(Intent::focus_message(MessageId::from("m1"))),
        );
        manager.apply_pending_switch(Instant::now());
        assert!(manager.back_stack().is_empty());
        assert!(calls.borrow().visible.is_empty());
        assert_eq!(
            calls.borrow().intents,
            vec![(
                ViewId::Replies,
                Intent::focus_message(MessageId::from("m1"))
            )]
        );
    }

    #[test]
    fn test_intent_delivered_after_become_visible() {
        let (mut manager, calls) = manager(&ABC);
        manager.request_switch(ViewId::Compose, Some(Intent::SettingsChanged));
        manager.apply_pending_switch(Instant::now());
        let calls = calls.borrow();
        assert_eq!(calls.visible, vec![ViewId::Compose]);
        assert_eq!(calls.intents, vec![(ViewId::Compose, Intent::SettingsChanged)]);
    }

    #[test]
    fn test_back_navigation_scenario() {
        let (mut manager, _calls) = manager(&ABC);
        let now = Instant::now();
        manager.request_switch(ViewId::Settings, None);
        manager.apply_pending_switch(now);
        manager.request_switch(ViewId::Compose, None);
        manager.apply_pending_switch(now);
        assert_eq!(manager.back_stack(), &[ViewId::Replies, ViewId::Settings]);

        assert_eq!(
            manager.handle_back_navigation(now),
            BackNavigation::Navigated(ViewId::Settings)
        );
        assert_eq!(manager.active(), ViewId::Settings);
        assert_eq!(
            manager.handle_back_navigation(now),
            BackNavigation::Navigated(ViewId::Replies)
        );
        assert_eq!(manager.active(), ViewId::Replies);
        assert_eq!(manager.handle_back_navigation(now), BackNavigation::Exhausted);
        assert_eq!(manager.active(), ViewId::Replies);
    }

    #[test]
    fn test_back_navigation_does_not_push() {
        let (mut manager, calls) = manager(&ABC);
        let now = Instant::now();
        manager.request_switch(ViewId::Settings, None);
        manager.apply_pending_switch(now);
        manager.handle_back_navigation(now);
        assert!(manager.back_stack().is_empty());
        assert_eq!(calls.borrow().visible, vec![ViewId::Settings, ViewId::Replies]);
        assert!(calls.borrow().intents.is_empty());
    }

    #[test]
    fn test_unknown_target_is_dropped() {
        let (mut manager, calls) = manager(&ABC);
        manager.request_switch(ViewId::Consent, None);
        assert_eq!(manager.apply_pending_switch(Instant::now()), None);
        assert_eq!(manager.active(), ViewId::Replies);
        assert!(manager.back_stack().is_empty());
        assert!(!manager.has_pending_switch());
        assert!(calls.borrow().hidden.is_empty());
    }

    #[test]
    fn test_broadcast_reaches_every_view() {
        let (mut manager, calls) = manager(&ABC);
        manager.broadcast_settings_changed(&Settings::default());
        let mut refreshed = calls.borrow().refreshed.clone();
        refreshed.sort();
        let mut expected = ABC.to_vec();
        expected.sort();
        assert_eq!(refreshed, expected);
    }

    #[test]
    fn test_overlay_toggles_do_not_switch() {
        let (mut manager, calls) = manager(&ABC);
        manager.set_profiling_overlay(true);
        manager.set_theme_overlay(true);
        assert!(manager.overlays().profiling);
        assert!(manager.overlays().theme);
        assert_eq!(manager.active(), ViewId::Replies);
        assert!(calls.borrow().visible.is_empty());
    }
}

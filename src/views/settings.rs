//! The settings screen.
//!
//! Every change goes through the [`SettingsService`] and is persisted in the
//! background; the app notices the revision bump and broadcasts it to all
//! views, including this one.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::layout::{Rect, Size};
use tracing::{debug, info};

use crate::cli::VERSION;
use crate::input::{InputEvent, PointerKind};
use crate::navigation::{Intent, NavEntry, Navigator, Payload, View, ViewFrame, ViewId, ViewInput};
use crate::render::HitTarget;
use crate::services::{
    notify_in_background, persist_in_background, NotificationStatus, Notifier, Settings,
    SettingsService,
};
use crate::ui::text::truncate;
use crate::ui::widgets::{
    render_button, render_input_field, render_switch, FieldAction, TextField, INPUT_FIELD_HEIGHT,
};

/// Focusable controls, in screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsControl {
    NewIdentity,
    Address,
    Connect,
    Notifications,
    TestNotification,
    BottomAppBar,
    DockNavDrawer,
    DarkMode,
    ProfilingOverlay,
    ThemeOverlay,
}

impl SettingsControl {
    pub const ALL: [SettingsControl; 10] = [
        SettingsControl::NewIdentity,
        SettingsControl::Address,
        SettingsControl::Connect,
        SettingsControl::Notifications,
        SettingsControl::TestNotification,
        SettingsControl::BottomAppBar,
        SettingsControl::DockNavDrawer,
        SettingsControl::DarkMode,
        SettingsControl::ProfilingOverlay,
        SettingsControl::ThemeOverlay,
    ];

    pub fn index(self) -> u16 {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0) as u16
    }

    pub fn from_index(index: u16) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    fn label(self) -> &'static str {
        match self {
            SettingsControl::NewIdentity => "Create new identity",
            SettingsControl::Address => "Address",
            SettingsControl::Connect => "Connect",
            SettingsControl::Notifications => "Enable notifications",
            SettingsControl::TestNotification => "Test notification",
            SettingsControl::BottomAppBar => "App bar at the bottom",
            SettingsControl::DockNavDrawer => "Dock navigation",
            SettingsControl::DarkMode => "Dark mode",
            SettingsControl::ProfilingOverlay => "Profiling overlay",
            SettingsControl::ThemeOverlay => "Theme overlay",
        }
    }

    /// Section heading shown above this control, if it starts one.
    fn section(self) -> Option<&'static str> {
        match self {
            SettingsControl::NewIdentity => Some("Identity"),
            SettingsControl::Address => Some("Connection"),
            SettingsControl::Notifications => Some("Notifications"),
            SettingsControl::BottomAppBar => Some("User Interface"),
            SettingsControl::ProfilingOverlay => Some("Developer"),
            _ => None,
        }
    }
}

pub struct SettingsView {
    settings: Arc<dyn SettingsService>,
    notifier: Arc<dyn Notifier>,
    snapshot: Settings,
    focus: usize,
    address: TextField,
    status: NotificationStatus,
    connect_status: Option<String>,
}

impl SettingsView {
    pub fn new(settings: Arc<dyn SettingsService>, notifier: Arc<dyn Notifier>) -> Self {
        let snapshot = settings.snapshot();
        let address = TextField::new(snapshot.address.clone());
        Self {
            settings,
            notifier,
            snapshot,
            focus: 0,
            address,
            status: NotificationStatus::new(),
            connect_status: None,
        }
    }

    pub fn focused(&self) -> SettingsControl {
        SettingsControl::ALL[self.focus]
    }

    pub fn snapshot(&self) -> &Settings {
        &self.snapshot
    }

    /// Result of the last test notification.
    pub fn notification_status(&self) -> Option<String> {
        self.status.get()
    }

    fn move_focus(&mut self, delta: isize) {
        let len = SettingsControl::ALL.len() as isize;
        self.focus = (self.focus as isize + delta).rem_euclid(len) as usize;
    }

    fn focus_on(&mut self, control: SettingsControl) {
        self.focus = usize::from(control.index());
    }

    fn changed(&mut self) {
        self.snapshot = self.settings.snapshot();
        persist_in_background(Arc::clone(&self.settings));
    }

    fn activate(&mut self, control: SettingsControl, nav: &mut Navigator) {
        debug!("Settings control {:?} activated", control);
        let current = self.snapshot.clone();
        match control {
            SettingsControl::NewIdentity => {
                nav.request_switch(
                    ViewId::IdentityForm,
                    Some(Intent::Navigate(Payload::NewIdentity)),
                );
            }
            SettingsControl::Address => {}
            SettingsControl::Connect => {
                self.settings.set_address(self.address.value());
                self.changed();
                self.connect_status = Some(if self.snapshot.address.is_empty() {
                    "Disconnected".to_string()
                } else {
                    info!("Connecting to {}", self.snapshot.address);
                    format!("Connecting to {}", self.snapshot.address)
                });
            }
            SettingsControl::Notifications => {
                self.settings
                    .set_notifications_enabled(!current.notifications_enabled);
                self.changed();
            }
            SettingsControl::TestNotification => {
                if current.notifications_enabled {
                    notify_in_background(
                        Arc::clone(&self.notifier),
                        "twig".to_string(),
                        "Test notification".to_string(),
                        self.status.clone(),
                    );
                } else {
                    self.status.publish("Notifications are disabled");
                }
            }
            SettingsControl::BottomAppBar => {
                self.settings.set_bottom_app_bar(!current.bottom_app_bar);
                self.changed();
            }
            SettingsControl::DockNavDrawer => {
                self.settings.set_dock_nav_drawer(!current.dock_nav_drawer);
                self.changed();
            }
            SettingsControl::DarkMode => {
                self.settings.set_dark_mode(!current.dark_mode);
                self.changed();
            }
            SettingsControl::ProfilingOverlay => {
                let enabled = !current.profiling_overlay;
                self.settings.set_profiling_overlay(enabled);
                nav.set_profiling_overlay(enabled);
                self.changed();
            }
            SettingsControl::ThemeOverlay => {
                let enabled = !current.theme_overlay;
                self.settings.set_theme_overlay(enabled);
                nav.set_theme_overlay(enabled);
                self.changed();
            }
        }
    }

    fn switch_state(&self, control: SettingsControl) -> Option<bool> {
        let s = &self.snapshot;
        match control {
            SettingsControl::Notifications => Some(s.notifications_enabled),
            SettingsControl::BottomAppBar => Some(s.bottom_app_bar),
            SettingsControl::DockNavDrawer => Some(s.dock_nav_drawer),
            SettingsControl::DarkMode => Some(s.dark_mode),
            SettingsControl::ProfilingOverlay => Some(s.profiling_overlay),
            SettingsControl::ThemeOverlay => Some(s.theme_overlay),
            _ => None,
        }
    }

    fn handle_key(&mut self, code: KeyCode, input: &InputEvent, nav: &mut Navigator) {
        if self.focused() == SettingsControl::Address {
            if let InputEvent::Key(key) = input {
                match self.address.handle_key(key) {
                    FieldAction::Submit => self.activate(SettingsControl::Connect, nav),
                    FieldAction::Edited => {}
                    FieldAction::Ignored => self.handle_navigation_key(code, nav),
                }
            }
            return;
        }
        match code {
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.focused(), nav),
            _ => self.handle_navigation_key(code, nav),
        }
    }

    fn handle_navigation_key(&mut self, code: KeyCode, _nav: &mut Navigator) {
        match code {
            KeyCode::Up | KeyCode::BackTab => self.move_focus(-1),
            KeyCode::Down | KeyCode::Tab => self.move_focus(1),
            _ => {}
        }
    }
}

impl View for SettingsView {
    fn title(&self) -> String {
        "Settings".to_string()
    }

    fn nav_entry(&self) -> Option<NavEntry> {
        Some(NavEntry { label: "Settings" })
    }

    fn become_visible(&mut self, _now: Instant) {
        self.snapshot = self.settings.snapshot();
        self.address.set(self.snapshot.address.clone());
        self.status.clear();
        self.connect_status = None;
    }

    fn refresh(&mut self, settings: &Settings) {
        let address_changed = settings.address != self.snapshot.address;
        self.snapshot = settings.clone();
        // Keep a half-typed address unless the stored one moved under it.
        if address_changed && self.focused() != SettingsControl::Address {
            self.address.set(settings.address.clone());
        }
    }

    fn update(&mut self, input: &ViewInput<'_>, nav: &mut Navigator) {
        match input.event {
            InputEvent::Key(key) => self.handle_key(key.code, input.event, nav),
            InputEvent::Paste(text) if self.focused() == SettingsControl::Address => {
                self.address.insert_str(text)
            }
            InputEvent::Pointer(pointer) if pointer.kind == PointerKind::Down => {
                if let Some(HitTarget::Control(index)) = input.hits.hit_test(pointer.x, pointer.y) {
                    if let Some(control) = SettingsControl::from_index(*index) {
                        self.focus_on(control);
                        self.activate(control, nav);
                    }
                }
            }
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
        let notification_status = self.status.get();

        for control in SettingsControl::ALL {
            if let Some(section) = control.section() {
                if control != SettingsControl::NewIdentity {
                    y += 1;
                }
                if y >= inner.bottom() {
                    break;
                }
                frame
                    .buf
                    .set_stringn(inner.x, y, section, width, theme.accented());
                y += 1;
                if control == SettingsControl::NewIdentity && y < inner.bottom() {
                    let who = match &self.snapshot.identity {
                        Some(identity) => format!("Signed in as {}", identity.name),
                        None => "No identity".to_string(),
                    };
                    frame.buf.set_stringn(inner.x, y, who, width, theme.dimmed());
                    y += 1;
                }
            }
            if y >= inner.bottom() {
                break;
            }

            let focused = self.focused() == control;
            let target = HitTarget::Control(control.index());
            let row = Rect::new(inner.x, y, inner.width, inner.bottom() - y);

            if control == SettingsControl::Address {
                let used = render_input_field(
                    frame.buf,
                    row,
                    control.label(),
                    &self.address,
                    focused,
                    "host:port",
                    theme,
                );
                if used == 0 {
                    break;
                }
                frame
                    .hits
                    .register_rect(Rect::new(row.x, row.y, row.width, INPUT_FIELD_HEIGHT), target);
                y += used;
            } else if let Some(on) = self.switch_state(control) {
                render_switch(frame.buf, row, control.label(), on, focused, theme);
                frame.hits.register_rect(Rect::new(row.x, y, row.width, 1), target);
                y += 1;
            } else {
                let rect = render_button(frame.buf, row, control.label(), focused, theme);
                frame.hits.register_rect(rect, target);
                let status = match control {
                    SettingsControl::Connect => self.connect_status.as_deref(),
                    SettingsControl::TestNotification => notification_status.as_deref(),
                    _ => None,
                };
                if let Some(status) = status {
                    let x = rect.right() + 2;
                    let room = usize::from(inner.right().saturating_sub(x));
                    frame
                        .buf
                        .set_string(x, y, truncate(status, room), theme.dimmed());
                }
                y += 1;
            }
        }

        if y + 1 < inner.bottom() {
            y += 1;
            let version = format!("twig {}", VERSION);
            frame.buf.set_stringn(inner.x, y, version, width, theme.dimmed());
            y += 1;
        }
        Size::new(area.width, y.saturating_sub(area.y))
    }
}

//! Startup forms: server address and identity.
//!
//! Both write through the [`SettingsService`] and then hand over to whatever
//! view the startup chain says comes next.

use std::sync::Arc;
use std::time::Instant;

use ratatui::layout::{Rect, Size};
use tracing::info;

use crate::input::{InputEvent, PointerKind};
use crate::navigation::{Intent, Navigator, Payload, View, ViewFrame, ViewInput};
use crate::render::HitTarget;
use crate::services::{persist_in_background, Identity, SettingsService};
use crate::ui::text::{truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::widgets::{render_button, render_input_field, FieldAction, TextField, INPUT_FIELD_HEIGHT};

use super::initial_view;

const SUBMIT: u16 = 0;

/// Shared layout: intro text, one input, a submit button and an error line.
struct FormLayout<'a> {
    intro: &'a str,
    label: &'a str,
    placeholder: &'a str,
    button: &'a str,
}

fn render_form(
    frame: &mut ViewFrame<'_>,
    layout: &FormLayout<'_>,
    field: &TextField,
    error: Option<&str>,
) -> Size {
    let area = frame.area;
    let theme: &Theme = frame.theme;
    frame.buf.set_style(area, theme.base());
    let inner = Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(1),
    );
    let width = usize::from(inner.width);
    let mut y = inner.y;

    for line in wrap_text(layout.intro, width) {
        if y >= inner.bottom() {
            return area.as_size();
        }
        frame.buf.set_string(inner.x, y, line, theme.base());
        y += 1;
    }
    y += 1;

    if y + INPUT_FIELD_HEIGHT > inner.bottom() {
        return area.as_size();
    }
    let field_area = Rect::new(inner.x, y, inner.width, INPUT_FIELD_HEIGHT);
    y += render_input_field(
        frame.buf,
        field_area,
        layout.label,
        field,
        true,
        layout.placeholder,
        theme,
    );

    if y < inner.bottom() {
        let button = render_button(
            frame.buf,
            Rect::new(inner.x, y, inner.width, 1),
            layout.button,
            false,
            theme,
        );
        frame.hits.register_rect(button, HitTarget::Control(SUBMIT));
        y += 1;
    }
    if let Some(error) = error.filter(|_| y < inner.bottom()) {
        frame.buf.set_string(
            inner.x,
            y,
            truncate(error, width),
            theme.base().fg(theme.error),
        );
        y += 1;
    }
    Size::new(area.width, y - area.y)
}

/// Whether the input asks to submit the form: Enter in the field or a click
/// on the submit button.
fn wants_submit(input: &ViewInput<'_>, field: &mut TextField) -> bool {
    match input.event {
        InputEvent::Key(key) => field.handle_key(key) == FieldAction::Submit,
        InputEvent::Paste(text) => {
            field.insert_str(text);
            false
        }
        InputEvent::Pointer(pointer) if pointer.kind == PointerKind::Down => {
            input.hits.hit_test(pointer.x, pointer.y) == Some(&HitTarget::Control(SUBMIT))
        }
        InputEvent::Action(SUBMIT) => true,
        _ => false,
    }
}

/// Asks for the forum server address.
pub struct ConnectFormView {
    settings: Arc<dyn SettingsService>,
    address: TextField,
    error: Option<String>,
}

impl ConnectFormView {
    pub fn new(settings: Arc<dyn SettingsService>) -> Self {
        Self {
            settings,
            address: TextField::default(),
            error: None,
        }
    }

    fn submit(&mut self, nav: &mut Navigator) {
        let address = self.address.value().trim();
        if address.is_empty() {
            self.error = Some("Enter a server address".to_string());
            return;
        }
        info!("Connecting to {}", address);
        self.settings.set_address(address);
        persist_in_background(Arc::clone(&self.settings));
        self.error = None;
        nav.request_switch(initial_view(&self.settings.snapshot()), None);
    }
}

impl View for ConnectFormView {
    fn title(&self) -> String {
        "Connect".to_string()
    }

    fn become_visible(&mut self, _now: Instant) {
        self.address.set(self.settings.address());
        self.error = None;
    }

    fn update(&mut self, input: &ViewInput<'_>, nav: &mut Navigator) {
        if wants_submit(input, &mut self.address) {
            self.submit(nav);
        }
    }

    fn render(&mut self, frame: &mut ViewFrame<'_>) -> Size {
        let layout = FormLayout {
            intro: "Enter the address of the forum server to connect to.",
            label: "Server address",
            placeholder: "host:port",
            button: "Connect",
        };
        render_form(frame, &layout, &self.address, self.error.as_deref())
    }
}

/// Creates or renames the identity messages are posted under.
pub struct IdentityFormView {
    settings: Arc<dyn SettingsService>,
    name: TextField,
    /// Mint a fresh identity instead of renaming the current one.
    fresh: bool,
    error: Option<String>,
}

impl IdentityFormView {
    pub fn new(settings: Arc<dyn SettingsService>) -> Self {
        Self {
            settings,
            name: TextField::default(),
            fresh: false,
            error: None,
        }
    }

    fn submit(&mut self, nav: &mut Navigator) {
        let name = self.name.value().trim();
        if name.is_empty() {
            self.error = Some("Enter a display name".to_string());
            return;
        }
        let identity = match self.settings.identity() {
            Some(current) if !self.fresh => Identity {
                id: current.id,
                name: name.to_string(),
            },
            _ => Identity::generate(name),
        };
        info!("Using identity {} ({})", identity.name, identity.id);
        self.settings.set_identity(identity);
        persist_in_background(Arc::clone(&self.settings));
        self.error = None;

        if self.fresh {
            // Opened from settings; return there.
            nav.request_back();
        } else {
            nav.request_switch(initial_view(&self.settings.snapshot()), None);
        }
    }
}

impl View for IdentityFormView {
    fn title(&self) -> String {
        if self.fresh {
            "New identity".to_string()
        } else {
            "Identity".to_string()
        }
    }

    fn become_visible(&mut self, _now: Instant) {
        self.fresh = false;
        self.error = None;
        let name = self
            .settings
            .identity()
            .map(|identity| identity.name)
            .unwrap_or_default();
        self.name.set(name);
    }

    fn handle_intent(&mut self, intent: Intent) {
        if intent == Intent::Navigate(Payload::NewIdentity) {
            self.fresh = true;
            self.name.clear();
        }
    }

    fn update(&mut self, input: &ViewInput<'_>, nav: &mut Navigator) {
        if wants_submit(input, &mut self.name) {
            self.submit(nav);
        }
    }

    fn render(&mut self, frame: &mut ViewFrame<'_>) -> Size {
        let layout = FormLayout {
            intro: "Choose the name others will see next to your messages.",
            label: "Display name",
            placeholder: "your name",
            button: if self.fresh { "Create" } else { "Save" },
        };
        render_form(frame, &layout, &self.name, self.error.as_deref())
    }
}

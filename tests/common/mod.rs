//! Common test utilities for integration tests.
//!
//! Fixtures for settings and messages, an [`App`] builder and helpers for
//! driving and inspecting rendered frames.

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Instant;

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use twig::app::App;
use twig::config::UiConfig;
use twig::input::{HostEvent, InputEvent, PointerKind};
use twig::models::MessageRecord;
use twig::services::{FileSettings, Identity, MemorySource, Services, Settings};
use twig::views::NOTICE_VERSION;

/// Settings of a user who finished the startup forms.
pub fn ready_settings() -> Settings {
    Settings {
        acknowledged_notice_version: NOTICE_VERSION,
        address: "forum.example".to_string(),
        identity: Some(Identity::generate("ada")),
        ..Settings::default()
    }
}

/// A small thread: `root` with a reply, plus a second top-level message.
pub fn seeded_records() -> Vec<MessageRecord> {
    let root = MessageRecord::new("ada", "hello everyone").with_id("root");
    let reply = MessageRecord::new("bob", "hi ada")
        .with_id("reply")
        .replying_to(&root.id);
    let other = MessageRecord::new("cy", "another thread").with_id("other");
    vec![root, reply, other]
}

/// Builder for [`App`] instances backed by in-memory services.
pub struct TestAppBuilder {
    settings: Settings,
    records: Vec<MessageRecord>,
    notifier: Arc<RecordingNotifier>,
    ui: UiConfig,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            settings: ready_settings(),
            records: seeded_records(),
            notifier: Arc::new(RecordingNotifier::default()),
            ui: UiConfig::default(),
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_records(mut self, records: Vec<MessageRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<RecordingNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn build(self) -> App {
        let services = Services::new(
            Arc::new(FileSettings::in_memory(self.settings)),
            self.notifier,
            Arc::new(MemorySource::with_records(self.records)),
        );
        App::new(services, self.ui, Instant::now()).expect("app starts")
    }
}

pub fn test_app() -> App {
    TestAppBuilder::new().build()
}

/// Draw the app through a ratatui test terminal and return the buffer.
pub fn draw(app: &mut App, width: u16, height: u16, now: Instant) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    terminal
        .draw(|frame| app.draw(frame, now))
        .expect("draw");
    terminal.backend().buffer().clone()
}

pub fn line(buf: &Buffer, y: u16) -> String {
    (buf.area.x..buf.area.right())
        .map(|x| {
            buf.cell((x, y))
                .map(|cell| cell.symbol().to_string())
                .unwrap_or_default()
        })
        .collect()
}

pub fn screen_text(buf: &Buffer) -> String {
    (buf.area.y..buf.area.bottom())
        .map(|y| line(buf, y))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn pointer(kind: PointerKind, x: u16, y: u16) -> HostEvent {
    HostEvent::Input(InputEvent::pointer(kind, x, y))
}

pub fn key(code: crossterm::event::KeyCode) -> HostEvent {
    HostEvent::Input(InputEvent::key(code))
}

pub fn paste(text: &str) -> HostEvent {
    HostEvent::Input(InputEvent::Paste(text.to_string()))
}

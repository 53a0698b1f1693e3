//! The application shell.
//!
//! [`App`] owns the [`ViewManager`], the hit registry and the services. The
//! host feeds it [`HostEvent`]s through [`App::step`] and asks it to draw
//! through [`App::draw`]; nothing else reaches the views.
//!
//! Ordering within a step:
//! 1. apply the switch requested during the previous step
//! 2. route the event (chrome first, then the active view)
//! 3. process a back request the view made
//! 4. broadcast settings changes made along the way

mod profiling;

pub use profiling::FrameStats;

use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Frame;
use tracing::{debug, info};

use crate::config::UiConfig;
use crate::error::NavigationError;
use crate::input::{HostEvent, InputEvent, PointerKind};
use crate::navigation::{BackNavigation, ViewFrame, ViewId, ViewInput, ViewManager};
use crate::render::{HitRegistry, HitTarget};
use crate::services::{Services, Settings};
use crate::ui::chrome::{self, ChromeModel};
use crate::ui::overlay;
use crate::ui::theme::Theme;
use crate::views::{initial_view, register_views};

/// What the host should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Back was requested with nothing left in the history.
    BackExhausted,
    Exit,
}

pub struct App {
    manager: ViewManager,
    hits: HitRegistry,
    services: Services,
    settings: Settings,
    /// Settings revision last broadcast to the views.
    revision: u64,
    theme: Theme,
    stats: FrameStats,
    ui: UiConfig,
    needs_redraw: bool,
}

impl App {
    /// Build every view and show the one the startup chain points at.
    pub fn new(services: Services, ui: UiConfig, now: Instant) -> Result<Self, NavigationError> {
        let settings = services.settings.snapshot();
        let revision = services.settings.revision();
        let initial = initial_view(&settings);

        let mut manager = ViewManager::new(initial);
        register_views(&mut manager, &services, &ui)?;
        manager.set_profiling_overlay(settings.profiling_overlay);
        manager.set_theme_overlay(settings.theme_overlay);
        manager.start(now)?;
        info!("App started at {}", initial);

        Ok(Self {
            manager,
            hits: HitRegistry::new(),
            theme: Theme::for_settings(&settings),
            services,
            settings,
            revision,
            stats: FrameStats::new(),
            ui,
            needs_redraw: true,
        })
    }

    pub fn active(&self) -> ViewId {
        self.manager.active()
    }

    pub fn manager(&self) -> &ViewManager {
        &self.manager
    }

    pub fn hits(&self) -> &HitRegistry {
        &self.hits
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn ui_config(&self) -> &UiConfig {
        &self.ui
    }

    /// Whether the next tick has to draw.
    pub fn needs_frame(&self, now: Instant) -> bool {
        self.needs_redraw || self.manager.has_pending_switch() || self.manager.is_animating(now)
    }

    /// Force a redraw on the next tick.
    pub fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    /// Process one host event.
    pub fn step(&mut self, event: HostEvent, now: Instant) -> Flow {
        if self.manager.apply_pending_switch(now).is_some() {
            self.needs_redraw = true;
        }

        let flow = match event {
            HostEvent::Frame => Flow::Continue,
            HostEvent::Input(input) => self.route_input(input, now),
            HostEvent::Back => self.back(now),
            HostEvent::Resize(width, height) => {
                debug!("Resized to {}x{}", width, height);
                self.needs_redraw = true;
                Flow::Continue
            }
            HostEvent::Shutdown => {
                info!("Shutdown requested");
                return Flow::Exit;
            }
        };

        if flow == Flow::Continue && self.manager.take_back_request() {
            return self.back(now);
        }
        self.sync_settings();
        flow
    }

    fn route_input(&mut self, input: InputEvent, now: Instant) -> Flow {
        let input = match input {
            InputEvent::Pointer(pointer) => match pointer.kind {
                PointerKind::Hover => {
                    self.hits.update_hover(pointer.x, pointer.y);
                    return Flow::Continue;
                }
                PointerKind::Down => match self.hits.hit_test(pointer.x, pointer.y).cloned() {
                    Some(HitTarget::Back) => return self.back(now),
                    Some(HitTarget::NavEntry(id)) => {
                        self.manager.request_switch(id, None);
                        self.needs_redraw = true;
                        return Flow::Continue;
                    }
                    Some(HitTarget::BarAction(index)) => InputEvent::Action(index),
                    Some(HitTarget::Overlay) => return Flow::Continue,
                    _ => InputEvent::Pointer(pointer),
                },
                _ => InputEvent::Pointer(pointer),
            },
            other => other,
        };

        let view_input = ViewInput {
            event: &input,
            hits: &self.hits,
            now,
        };
        self.manager.update_active(&view_input);
        self.needs_redraw = true;
        Flow::Continue
    }

    fn back(&mut self, now: Instant) -> Flow {
        self.needs_redraw = true;
        match self.manager.handle_back_navigation(now) {
            BackNavigation::Navigated(_) => Flow::Continue,
            BackNavigation::Exhausted => Flow::BackExhausted,
        }
    }

    /// Broadcast a settings change to every view if the revision moved.
    fn sync_settings(&mut self) {
        let revision = self.services.settings.revision();
        if revision == self.revision {
            return;
        }
        self.revision = revision;
        self.settings = self.services.settings.snapshot();
        debug!("Settings revision {}, refreshing views", revision);
        self.manager.broadcast_settings_changed(&self.settings);
        self.manager
            .set_profiling_overlay(self.settings.profiling_overlay);
        self.manager.set_theme_overlay(self.settings.theme_overlay);
        self.theme = Theme::for_settings(&self.settings);
        self.needs_redraw = true;
    }

    /// Draw into a ratatui frame.
    pub fn draw(&mut self, frame: &mut Frame<'_>, now: Instant) {
        let area = frame.area();
        self.render(frame.buffer_mut(), area, now);
    }

    /// Draw chrome, the active view and overlays into `buf`.
    pub fn render(&mut self, buf: &mut Buffer, area: Rect, now: Instant) {
        let started = Instant::now();
        self.manager.apply_pending_switch(now);
        self.sync_settings();
        self.hits.clear();
        buf.set_style(area, self.theme.base());

        let entries = self.manager.nav_entries();
        let layout = chrome::layout(
            area,
            self.settings.bottom_app_bar,
            self.settings.dock_nav_drawer,
            !entries.is_empty(),
        );
        let (title, actions) = self
            .manager
            .active_view()
            .map(|view| (view.title(), view.bar_actions()))
            .unwrap_or_default();
        let model = ChromeModel {
            title,
            can_go_back: self.manager.navigator().can_go_back(),
            actions,
            entries,
            active: self.manager.active(),
            bottom_bar: self.settings.bottom_app_bar,
            dock_nav: self.settings.dock_nav_drawer,
        };
        chrome::render(buf, &layout, &model, &self.theme, &mut self.hits);

        self.manager.render_active(&mut ViewFrame {
            buf: &mut *buf,
            area: layout.content,
            hits: &mut self.hits,
            theme: &self.theme,
            now,
        });

        let overlays = self.manager.overlays();
        if overlays.profiling {
            overlay::render_profiling(
                buf,
                layout.content,
                &self.stats,
                &self.theme,
                &mut self.hits,
            );
        }
        if overlays.theme {
            overlay::render_theme(buf, layout.content, &self.theme, &mut self.hits);
        }

        self.stats.record(started.elapsed());
        self.needs_redraw = false;
    }
}

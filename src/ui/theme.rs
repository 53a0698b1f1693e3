//! Color themes for the twig UI
//!
//! Two palettes, selected by the `dark_mode` setting. Views receive the
//! active [`Theme`] through their render frame; nothing reads colors from
//! globals.

use ratatui::style::{Color, Modifier, Style};

use crate::services::Settings;

// ============================================================================
// Minimal Dark Palette
// ============================================================================

const DARK_BG: Color = Color::Rgb(16, 16, 22);
const DARK_SURFACE: Color = Color::Rgb(28, 28, 38);
const DARK_TEXT: Color = Color::White;
const DARK_DIM: Color = Color::DarkGray;
const DARK_ACCENT: Color = Color::Rgb(0, 122, 204); // blue #007ACC
const DARK_BORDER: Color = Color::DarkGray;

// ============================================================================
// Light Palette
// ============================================================================

const LIGHT_BG: Color = Color::Rgb(248, 248, 244);
const LIGHT_SURFACE: Color = Color::Rgb(232, 232, 226);
const LIGHT_TEXT: Color = Color::Rgb(24, 24, 28);
const LIGHT_DIM: Color = Color::Gray;
const LIGHT_ACCENT: Color = Color::Rgb(0, 92, 170);
const LIGHT_BORDER: Color = Color::Gray;

// ============================================================================
// Shared
// ============================================================================

/// Success text - green #04B575
const SUCCESS: Color = Color::Rgb(4, 181, 117);
const ERROR: Color = Color::Red;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub success: Color,
    pub error: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: DARK_BG,
            surface: DARK_SURFACE,
            text: DARK_TEXT,
            dim: DARK_DIM,
            accent: DARK_ACCENT,
            border: DARK_BORDER,
            success: SUCCESS,
            error: ERROR,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: LIGHT_BG,
            surface: LIGHT_SURFACE,
            text: LIGHT_TEXT,
            dim: LIGHT_DIM,
            accent: LIGHT_ACCENT,
            border: LIGHT_BORDER,
            success: SUCCESS,
            error: ERROR,
        }
    }

    pub fn for_settings(settings: &Settings) -> Self {
        if settings.dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim).bg(self.background)
    }

    pub fn accented(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlight for the selected row or focused control.
    pub fn selected(&self) -> Style {
        Style::default().fg(self.background).bg(self.accent)
    }

    /// Named colors, for the theme overlay.
    pub fn swatches(&self) -> [(&'static str, Color); 8] {
        [
            ("background", self.background),
            ("surface", self.surface),
            ("text", self.text),
            ("dim", self.dim),
            ("accent", self.accent),
            ("border", self.border),
            ("success", self.success),
            ("error", self.error),
        ]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

//! Theme tokens: dark/light palettes and the `NO_COLOR` accessibility hook.

#![allow(missing_docs)]

use std::env;
use std::fmt;

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// User-selectable color scheme. Persisted in preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Parse `dark` / `light`, case-insensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Color output mode for compatibility with `NO_COLOR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Enabled,
    Disabled,
}

/// Accessibility knobs consumed by the painter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessibilityProfile {
    pub color: ColorMode,
}

impl Default for AccessibilityProfile {
    fn default() -> Self {
        Self {
            color: ColorMode::Enabled,
        }
    }
}

impl AccessibilityProfile {
    #[must_use]
    pub const fn from_no_color_flag(no_color: bool) -> Self {
        Self {
            color: if no_color {
                ColorMode::Disabled
            } else {
                ColorMode::Enabled
            },
        }
    }

    #[must_use]
    pub fn from_environment() -> Self {
        Self::from_no_color_flag(env::var_os("NO_COLOR").is_some())
    }

    #[must_use]
    pub const fn no_color(self) -> bool {
        matches!(self.color, ColorMode::Disabled)
    }
}

/// Semantic token category independent of concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticToken {
    Accent,
    Success,
    Danger,
    Muted,
    Neutral,
    Surface,
}

/// Concrete colors per token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub accent: Color,
    pub success: Color,
    pub danger: Color,
    pub muted: Color,
    pub neutral: Color,
    pub surface: Color,
}

impl ThemePalette {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            accent: Color::Cyan,
            success: Color::Green,
            danger: Color::Red,
            muted: Color::DarkGrey,
            neutral: Color::White,
            surface: Color::Black,
        }
    }

    #[must_use]
    pub const fn light() -> Self {
        Self {
            accent: Color::DarkBlue,
            success: Color::DarkGreen,
            danger: Color::DarkRed,
            muted: Color::Grey,
            neutral: Color::Black,
            surface: Color::White,
        }
    }

    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    #[must_use]
    pub const fn get(self, token: SemanticToken) -> Color {
        match token {
            SemanticToken::Accent => self.accent,
            SemanticToken::Success => self.success,
            SemanticToken::Danger => self.danger,
            SemanticToken::Muted => self.muted,
            SemanticToken::Neutral => self.neutral,
            SemanticToken::Surface => self.surface,
        }
    }
}

/// Full render theme (mode + palette + accessibility profile).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub accessibility: AccessibilityProfile,
    pub palette: ThemePalette,
}

impl Theme {
    #[must_use]
    pub const fn new(mode: ThemeMode, accessibility: AccessibilityProfile) -> Self {
        Self {
            mode,
            accessibility,
            palette: ThemePalette::for_mode(mode),
        }
    }

    /// Color for `token`, or `None` when color output is disabled.
    #[must_use]
    pub const fn color(self, token: SemanticToken) -> Option<Color> {
        if self.accessibility.no_color() {
            None
        } else {
            Some(self.palette.get(token))
        }
    }
}

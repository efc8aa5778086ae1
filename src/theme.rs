//! Light/dark theme: the persisted flag and the colours each mode uses.

use ratatui::style::Color;

use crate::storage::KeyValueStore;

/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value written under [`THEME_KEY`].
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Read the persisted preference.  Only the exact marker `"dark"` selects
    /// the dark theme; a missing key or any other value means light.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(THEME_KEY).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::Rgb(243, 244, 246),
                text: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(75, 85, 99),
                accent: Color::Rgb(37, 99, 235),
                highlight_bg: Color::Rgb(209, 213, 219),
                error_fg: Color::Rgb(185, 28, 28),
                error_bg: Color::Rgb(254, 226, 226),
            },
            Theme::Dark => Palette {
                background: Color::Rgb(17, 24, 39),
                text: Color::Rgb(243, 244, 246),
                muted: Color::Rgb(156, 163, 175),
                accent: Color::Rgb(96, 165, 250),
                highlight_bg: Color::Rgb(55, 65, 81),
                error_fg: Color::Rgb(254, 202, 202),
                error_bg: Color::Rgb(127, 29, 29),
            },
        }
    }
}

/// Colours the renderer draws with for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight_bg: Color,
    pub error_fg: Color,
    pub error_bg: Color,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn missing_preference_is_light() {
        assert_eq!(Theme::load(&MemoryStore::default()), Theme::Light);
    }

    #[test]
    fn dark_marker_selects_dark() {
        assert_eq!(Theme::load(&MemoryStore::with(THEME_KEY, "dark")), Theme::Dark);
    }

    #[test]
    fn unknown_values_fall_back_to_light() {
        for v in ["light", "DARK", "", "solarized"] {
            assert_eq!(Theme::load(&MemoryStore::with(THEME_KEY, v)), Theme::Light, "{v:?}");
        }
    }

    #[test]
    fn toggled_flips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn palettes_differ() {
        assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
    }
}

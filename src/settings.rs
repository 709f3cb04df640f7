use std::str::FromStr;

use crate::domain::{DashError, Icon};

pub const ZOOM_MIN: u16 = 50;
pub const ZOOM_MAX: u16 = 150;
pub const ZOOM_DEFAULT: u16 = 100;
pub const ZOOM_SLIDER_STEP: u16 = 5;
pub const ZOOM_BUTTON_STEP: u16 = 10;

pub const FONT_MIN: u16 = 12;
pub const FONT_MAX: u16 = 24;
pub const FONT_DEFAULT: u16 = 16;
pub const FONT_SLIDER_STEP: u16 = 1;
pub const FONT_BUTTON_STEP: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    Ocean,
    Terminal,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::Ocean, Theme::Terminal];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Ocean => "ocean",
            Theme::Terminal => "terminal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light Mode",
            Theme::Dark => "Dark Mode",
            Theme::Ocean => "Ocean Deep Blue",
            Theme::Terminal => "Terminal Coding",
        }
    }

    pub fn icon(&self) -> Icon {
        match self {
            Theme::Light => Icon::Sun,
            Theme::Dark => Icon::Moon,
            Theme::Ocean => Icon::Waves,
            Theme::Terminal => Icon::Terminal,
        }
    }

    fn position(&self) -> usize {
        Theme::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Theme {
        Theme::ALL[(self.position() + 1) % Theme::ALL.len()]
    }

    pub fn previous(&self) -> Theme {
        Theme::ALL[(self.position() + Theme::ALL.len() - 1) % Theme::ALL.len()]
    }
}

impl FromStr for Theme {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| DashError::InvalidArgument(format!("unknown theme \"{s}\"")))
    }
}

/// Which control on the settings page has the focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsControl {
    Theme,
    Zoom,
    FontSize,
}

impl SettingsControl {
    pub fn next(&self) -> Self {
        match self {
            SettingsControl::Theme => SettingsControl::Zoom,
            SettingsControl::Zoom | SettingsControl::FontSize => SettingsControl::FontSize,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            SettingsControl::Theme | SettingsControl::Zoom => SettingsControl::Theme,
            SettingsControl::FontSize => SettingsControl::Zoom,
        }
    }
}

/// Appearance of the session. Owned by the model and handed to the ui on every draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub theme: Theme,
    pub zoom: u16,
    pub font_size: u16,
    pub sidebar_open: bool,
}

impl DisplaySettings {
    pub fn new(theme: Theme, sidebar_open: bool) -> Self {
        Self {
            theme,
            zoom: ZOOM_DEFAULT,
            font_size: FONT_DEFAULT,
            sidebar_open,
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn set_zoom(&mut self, zoom: i32) {
        self.zoom = zoom.clamp(ZOOM_MIN as i32, ZOOM_MAX as i32) as u16;
    }

    pub fn change_zoom(&mut self, delta: i32) {
        self.set_zoom(self.zoom as i32 + delta);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = ZOOM_DEFAULT;
    }

    pub fn set_font_size(&mut self, size: i32) {
        self.font_size = size.clamp(FONT_MIN as i32, FONT_MAX as i32) as u16;
    }

    pub fn change_font_size(&mut self, delta: i32) {
        self.set_font_size(self.font_size as i32 + delta);
    }

    pub fn reset_font_size(&mut self) {
        self.font_size = FONT_DEFAULT;
    }

    /// Blank columns around the page content. 100% zoom keeps two, zooming out adds space.
    pub fn content_margin(&self) -> u16 {
        (ZOOM_MAX - self.zoom) / 25
    }

    /// Large fonts get two-line table rows.
    pub fn row_height(&self) -> u16 {
        if self.font_size >= 20 { 2 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let mut display = DisplaySettings::new(Theme::Light, true);
        for _ in 0..10 {
            display.change_zoom(ZOOM_BUTTON_STEP as i32);
        }
        assert_eq!(display.zoom, ZOOM_MAX);
        display.set_zoom(10);
        assert_eq!(display.zoom, ZOOM_MIN);
        display.reset_zoom();
        assert_eq!(display.zoom, 100);
        assert_eq!(display.content_margin(), 2);
    }

    #[test]
    fn font_size_is_clamped() {
        let mut display = DisplaySettings::new(Theme::Dark, false);
        display.change_font_size(-(FONT_BUTTON_STEP as i32) * 5);
        assert_eq!(display.font_size, FONT_MIN);
        display.set_font_size(22);
        assert_eq!(display.row_height(), 2);
        display.reset_font_size();
        assert_eq!(display.font_size, 16);
        assert_eq!(display.row_height(), 1);
    }

    #[test]
    fn themes_cycle_and_parse() {
        assert_eq!(Theme::Terminal.next(), Theme::Light);
        assert_eq!(Theme::Light.previous(), Theme::Terminal);
        assert_eq!("Ocean".parse::<Theme>().unwrap(), Theme::Ocean);
        assert!("solarized".parse::<Theme>().is_err());
    }
}

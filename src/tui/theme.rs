//! Color themes for dark and light terminals.
//!
//! Selected by `display.theme` in the config file or `CDNMON_THEME`.

use ratatui::style::Color;

use crate::models::{DistributionStatus, PriorityTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    /// Unknown names fall back to dark
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeName::Light,
            _ => ThemeName::Dark,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: ThemeName,

    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,

    // Distribution status tags
    pub active: Color,
    pub provisioning: Color,
    pub suspended: Color,
    pub inactive: Color,

    // Priority arrows
    pub priority_high: Color,
    pub priority_medium: Color,
    pub priority_low: Color,

    pub selected_bg: Color,
    pub selected_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub chip_bg: Color,
    pub chip_fg: Color,
    pub skeleton: Color,
    pub error: Color,
    pub destructive: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,

            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            active: Color::Rgb(0, 200, 0),
            provisioning: Color::Rgb(80, 160, 255),
            suspended: Color::Rgb(255, 180, 0),
            inactive: Color::Gray,

            priority_high: Color::Rgb(255, 80, 80),
            priority_medium: Color::Rgb(255, 180, 0),
            priority_low: Color::Rgb(80, 160, 255),

            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,
            header_bg: Color::Rgb(40, 80, 120),
            header_fg: Color::White,
            chip_bg: Color::Rgb(50, 50, 60),
            chip_fg: Color::White,
            skeleton: Color::Rgb(70, 70, 80),
            error: Color::Rgb(255, 80, 80),
            destructive: Color::Rgb(255, 80, 80),
        }
    }

    /// Darker, more saturated colors for light backgrounds
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,

            fg: Color::Black,
            muted: Color::Rgb(120, 120, 120),
            border: Color::Rgb(120, 120, 120),
            border_focused: Color::Rgb(0, 100, 180),

            active: Color::Rgb(0, 140, 0),
            provisioning: Color::Rgb(0, 80, 180),
            suspended: Color::Rgb(200, 120, 0),
            inactive: Color::Rgb(100, 100, 100),

            priority_high: Color::Rgb(200, 0, 0),
            priority_medium: Color::Rgb(200, 120, 0),
            priority_low: Color::Rgb(0, 80, 180),

            selected_bg: Color::Rgb(200, 220, 255),
            selected_fg: Color::Black,
            header_bg: Color::Rgb(180, 200, 230),
            header_fg: Color::Black,
            chip_bg: Color::Rgb(225, 225, 235),
            chip_fg: Color::Black,
            skeleton: Color::Rgb(210, 210, 215),
            error: Color::Rgb(200, 0, 0),
            destructive: Color::Rgb(200, 0, 0),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match ThemeName::parse(name) {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Tag color for a status; unknown values share the inactive color
    pub fn status_color(&self, status: &DistributionStatus) -> Color {
        match status {
            DistributionStatus::Active => self.active,
            DistributionStatus::Provisioning => self.provisioning,
            DistributionStatus::Suspended => self.suspended,
            DistributionStatus::Disabled | DistributionStatus::Unknown(_) => self.inactive,
        }
    }

    pub fn priority_color(&self, priority: PriorityTag) -> Color {
        match priority {
            PriorityTag::High => self.priority_high,
            PriorityTag::Medium => self.priority_medium,
            PriorityTag::Low => self.priority_low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        assert_eq!(Theme::from_name("dark").name, ThemeName::Dark);
        assert_eq!(Theme::from_name("LIGHT").name, ThemeName::Light);
        assert_eq!(Theme::from_name("solarized").name, ThemeName::Dark);
    }

    #[test]
    fn test_unknown_status_uses_inactive_color() {
        let theme = Theme::dark();
        assert_eq!(
            theme.status_color(&DistributionStatus::Unknown("archived".into())),
            theme.inactive
        );
        assert_eq!(
            theme.status_color(&DistributionStatus::Disabled),
            theme.inactive
        );
        assert_eq!(theme.status_color(&DistributionStatus::Active), theme.active);
    }
}

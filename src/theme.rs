use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub active: Style,
    pub error: Style,
    pub status: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::new().fg(Color::DarkGray),
            border: Style::new().fg(Color::Gray),
            active: Style::new().fg(Color::Cyan),
            error: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
            status: Style::new().fg(Color::White).bg(Color::DarkGray),
        }
    }
}

impl Theme {
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::palette(
                Color::Rgb(248, 248, 242),
                Color::Rgb(98, 114, 164),
                Color::Rgb(68, 71, 90),
                Color::Rgb(139, 233, 253),
                Color::Rgb(255, 85, 85),
            ),
            "gruvbox" => Self::palette(
                Color::Rgb(235, 219, 178),
                Color::Rgb(146, 131, 116),
                Color::Rgb(80, 73, 69),
                Color::Rgb(131, 165, 152),
                Color::Rgb(251, 73, 52),
            ),
            "nord" => Self::palette(
                Color::Rgb(229, 233, 240),
                Color::Rgb(76, 86, 106),
                Color::Rgb(67, 76, 94),
                Color::Rgb(136, 192, 208),
                Color::Rgb(191, 97, 106),
            ),
            _ => Self::default(),
        }
    }

    fn palette(fg: Color, dim: Color, surface: Color, accent: Color, error: Color) -> Self {
        Self {
            header: Style::new().fg(fg).add_modifier(Modifier::BOLD),
            dim: Style::new().fg(dim),
            border: Style::new().fg(surface),
            active: Style::new().fg(accent),
            error: Style::new().fg(error).add_modifier(Modifier::BOLD),
            status: Style::new().fg(fg).bg(surface),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub accent: Option<String>,
    pub error: Option<String>,
    pub dim: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        if let Some(c) = parse_color(self.accent.as_deref()) {
            theme.active = theme.active.fg(c);
        }
        if let Some(c) = parse_color(self.error.as_deref()) {
            theme.error = theme.error.fg(c);
        }
        if let Some(c) = parse_color(self.dim.as_deref()) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = parse_color(self.status_fg.as_deref()) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = parse_color(self.status_bg.as_deref()) {
            theme.status = theme.status.bg(c);
        }

        theme
    }
}

/// Accepts ratatui colour names ("lightblue"), hex ("#88c0d0") and indices.
fn parse_color(value: Option<&str>) -> Option<Color> {
    let value = value?.trim();
    match value.parse() {
        Ok(color) => Some(color),
        Err(_) => {
            tracing::warn!(value, "ignoring unknown theme colour");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_preset_is_default() {
        assert_eq!(Theme::preset("solarized"), Theme::default());
        assert_ne!(Theme::preset("nord"), Theme::default());
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config = ThemeConfig {
            preset: Some("gruvbox".to_string()),
            accent: Some("#112233".to_string()),
            status_bg: Some("blue".to_string()),
            ..ThemeConfig::default()
        };

        let theme = config.into_theme();

        assert_eq!(theme.active.fg, Some(Color::Rgb(0x11, 0x22, 0x33)));
        assert_eq!(theme.status.bg, Some(Color::Blue));
        assert_eq!(theme.dim, Theme::preset("gruvbox").dim);
    }

    #[test]
    fn bad_colour_is_ignored() {
        let config = ThemeConfig {
            error: Some("not-a-colour".to_string()),
            ..ThemeConfig::default()
        };
        assert_eq!(config.into_theme().error, Theme::default().error);
    }
}

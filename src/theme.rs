use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme for this process. Only the first call wins.
pub fn init(theme: Theme) {
    if THEME.set(theme).is_err() {
        log::debug!("theme already initialised, keeping the first one");
    }
}

/// Get the active theme (the default one if `init` was never called).
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub conflict: Style,
    /// Used for events whose colour does not parse.
    pub event: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            today: Style::default().fg(Color::White).bg(Color::Indexed(62)),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            conflict: Style::default()
                .fg(Color::Rgb(244, 63, 94))
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            event: Style::default().fg(Color::White).bg(Color::Indexed(61)),
        }
    }
}

impl Theme {
    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)), // purple
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)), // cyan
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            conflict: Style::default()
                .fg(Color::Rgb(255, 85, 85)) // red
                .add_modifier(Modifier::BOLD),
            event: Style::default().fg(Color::Black).bg(Color::Rgb(80, 250, 123)),
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)), // yellow
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)), // aqua
            header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default()
                .fg(Color::Rgb(235, 219, 178))
                .bg(Color::Rgb(80, 73, 69)),
            conflict: Style::default()
                .fg(Color::Rgb(251, 73, 52)) // red
                .add_modifier(Modifier::BOLD),
            event: Style::default().fg(Color::Black).bg(Color::Rgb(184, 187, 38)),
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            today: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)), // yellow
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)), // frost
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            conflict: Style::default()
                .fg(Color::Rgb(191, 97, 106)) // aurora red
                .add_modifier(Modifier::BOLD),
            event: Style::default().fg(Color::Black).bg(Color::Rgb(163, 190, 140)),
        }
    }

    /// Cell style for an event chip: its own colour as background when it
    /// parses, the theme's event style otherwise.
    pub fn event_style(&self, color: &str) -> Style {
        match parse_color(color) {
            Some(bg) => Style::default().fg(contrast_fg(bg)).bg(bg),
            None => self.event,
        }
    }
}

// ── TOML config types ──

/// `[theme]` table of the config file.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    pub preset: Option<String>,
    pub today_fg: Option<String>,
    pub today_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_fg: Option<String>,
    pub status_bg: Option<String>,
    pub conflict_fg: Option<String>,
    pub event_fg: Option<String>,
    pub event_bg: Option<String>,
}

impl ThemeConfig {
    pub fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        // Override individual colors
        override_fg(&mut theme.today, self.today_fg.as_deref());
        override_bg(&mut theme.today, self.today_bg.as_deref());
        override_fg(&mut theme.selected, self.selected_fg.as_deref());
        override_bg(&mut theme.selected, self.selected_bg.as_deref());
        override_fg(&mut theme.header, self.header_fg.as_deref());
        override_fg(&mut theme.dim, self.dim_fg.as_deref());
        override_fg(&mut theme.border, self.border_fg.as_deref());
        override_fg(&mut theme.status, self.status_fg.as_deref());
        override_bg(&mut theme.status, self.status_bg.as_deref());
        override_fg(&mut theme.conflict, self.conflict_fg.as_deref());
        override_fg(&mut theme.event, self.event_fg.as_deref());
        override_bg(&mut theme.event, self.event_bg.as_deref());

        theme
    }
}

fn override_fg(style: &mut Style, value: Option<&str>) {
    if let Some(color) = value.and_then(config_color) {
        *style = style.fg(color);
    }
}

fn override_bg(style: &mut Style, value: Option<&str>) {
    if let Some(color) = value.and_then(config_color) {
        *style = style.bg(color);
    }
}

fn config_color(value: &str) -> Option<Color> {
    let color = parse_color(value);
    if color.is_none() {
        log::warn!("ignoring unknown theme color {value:?}");
    }
    color
}

/// Parse a color string: hex "#rrggbb" / "#rgb", or named colors.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        return match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::Rgb(r, g, b))
            }
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Color::Rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            _ => None,
        };
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

/// Black or white text, whichever reads better on `bg`.
fn contrast_fg(bg: Color) -> Color {
    match bg {
        Color::Rgb(r, g, b) => {
            let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
            if luma > 150_000 {
                Color::Black
            } else {
                Color::White
            }
        }
        Color::Black | Color::Blue | Color::Red | Color::Magenta | Color::DarkGray => Color::White,
        _ => Color::Black,
    }
}

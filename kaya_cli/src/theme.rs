//! Shared colours. Teal accent, white-on-black in high-contrast mode.
use kaya_core::report::{Level, ScoreBand};
use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(45, 212, 191);
pub const SUCCESS: Color = Color::Green;
pub const WARNING: Color = Color::Rgb(251, 146, 60);
pub const DESTRUCTIVE: Color = Color::Red;

pub fn accent(high_contrast: bool) -> Color {
    if high_contrast {
        Color::White
    } else {
        ACCENT
    }
}

pub fn border_style(high_contrast: bool) -> Style {
    if high_contrast {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn title_style(high_contrast: bool) -> Style {
    Style::default()
        .fg(accent(high_contrast))
        .add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn score_color(band: ScoreBand, high_contrast: bool) -> Color {
    if high_contrast {
        return Color::White;
    }
    match band {
        ScoreBand::Success => SUCCESS,
        ScoreBand::Warning => WARNING,
        ScoreBand::Destructive => DESTRUCTIVE,
    }
}

pub fn level_color(level: Level, high_contrast: bool) -> Color {
    if high_contrast {
        return Color::White;
    }
    match level {
        Level::High => DESTRUCTIVE,
        Level::Medium => ACCENT,
        Level::Low => Color::Gray,
    }
}

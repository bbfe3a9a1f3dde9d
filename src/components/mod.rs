//! UI Components
//!
//! Rendering for the dashboard and for each overlay. Overlay state lives in
//! the model layer; the functions here only read it.

pub mod chart;
pub mod help_bar;
pub mod layout;
pub mod modal;
pub mod progress;
pub mod toast;

pub use chart::{BufferSurface, ChartPanel};
pub use help_bar::{draw_help_bar, draw_status};
pub use layout::{calculate_main_layout, centered_popup, nudge};
pub use modal::ModalLayer;
pub use progress::draw_progress;
pub use toast::draw_toasts;

use ratatui::style::{Color, Modifier, Style};

/// Approximate `opacity` on a terminal: RGB colors are scaled toward
/// black, named colors fall back to dim gray while mostly transparent.
pub fn fade_style(style: Style, opacity: f64) -> Style {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity >= 1.0 {
        return style;
    }

    let fade = |color: Option<Color>| match color {
        Some(Color::Rgb(r, g, b)) => {
            let scale = |c: u8| (f64::from(c) * opacity).round() as u8;
            Some(Color::Rgb(scale(r), scale(g), scale(b)))
        }
        Some(Color::Reset) | None => color,
        Some(_) if opacity < 0.5 => Some(Color::DarkGray),
        other => other,
    };

    let mut faded = style;
    faded.fg = fade(style.fg);
    faded.bg = fade(style.bg);
    if opacity < 0.5 {
        faded = faded.add_modifier(Modifier::DIM);
    }
    faded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_style_scales_rgb() {
        let style = Style::default().fg(Color::Rgb(200, 100, 0));
        assert_eq!(fade_style(style, 0.5).fg, Some(Color::Rgb(100, 50, 0)));
        assert_eq!(fade_style(style, 1.0), style);
    }

    #[test]
    fn test_fade_style_dims_named_colors() {
        let faded = fade_style(Style::default().fg(Color::Yellow), 0.1);
        assert_eq!(faded.fg, Some(Color::DarkGray));
        assert!(faded.add_modifier.contains(Modifier::DIM));

        let mostly = fade_style(Style::default().fg(Color::Yellow), 0.8);
        assert_eq!(mostly.fg, Some(Color::Yellow));
    }
}

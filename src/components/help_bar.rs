//! Key help bar and overlay status line

use crate::model::Presenter;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const KEYS: &[(&str, &str)] = &[
    ("d", "download"),
    ("p", "progress"),
    ("+", "advance"),
    ("n", "notify"),
    ("y", "copy"),
    ("m", "about"),
    ("M", "help"),
    ("r", "rotate"),
    ("z", "zero"),
    ("Esc", "close all"),
    ("q", "quit"),
];

pub fn draw_help_bar(frame: &mut Frame, area: Rect) {
    let spans: Vec<Span> = KEYS
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(
                    format!(" {} ", key),
                    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {}  ", label), Style::default().fg(Color::Gray)),
            ]
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        area,
    );
}

/// One-line summary of what each overlay is doing
pub fn status_line(presenter: &Presenter) -> String {
    let progress = presenter.progress.state();
    let modals = presenter
        .modals
        .active_ids()
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" > ");

    format!(
        " progress: {:?} {:.0}% │ toasts: {} │ modals: {}",
        progress.phase(),
        progress.percent(),
        presenter.notifications.len(),
        if modals.is_empty() { "none" } else { modals.as_str() },
    )
}

pub fn draw_status(frame: &mut Frame, area: Rect, presenter: &Presenter) {
    frame.render_widget(
        Paragraph::new(status_line(presenter)).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_lists_open_modals() {
        let mut presenter = Presenter::default();
        assert!(status_line(&presenter).contains("modals: none"));

        presenter.modals.open("help", "").unwrap();
        presenter.modals.open("about", "").unwrap();
        presenter.show_info("hi");

        let line = status_line(&presenter);
        assert!(line.contains("modals: help > about"));
        assert!(line.contains("toasts: 1"));
        assert!(line.contains("progress: Hidden 0%"));
    }
}

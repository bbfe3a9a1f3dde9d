//! Progress overlay rendering

use super::{centered_popup, fade_style};
use crate::model::ProgressIndicator;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const POPUP_WIDTH: u16 = 52;
const POPUP_HEIGHT: u16 = 7;

/// Draw the progress overlay if it is on screen
pub fn draw_progress(frame: &mut Frame, area: Rect, progress: &ProgressIndicator) {
    if !progress.phase().is_rendered() {
        return;
    }
    let opacity = progress.opacity();
    let state = progress.state();
    let popup = centered_popup(area, POPUP_WIDTH, POPUP_HEIGHT);

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.title))
        .title_style(fade_style(
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            opacity,
        ))
        .border_style(fade_style(Style::default().fg(Color::Cyan), opacity));
    let inner = block.inner(popup);

    // Leave room for the " 100%" suffix
    let bar_width = inner.width.saturating_sub(6);
    let filled = progress.fill_cells(bar_width);
    let bar = Line::from(vec![
        Span::styled(
            "█".repeat(filled as usize),
            fade_style(Style::default().fg(Color::Rgb(0x66, 0x7e, 0xea)), opacity),
        ),
        Span::styled(
            "░".repeat(bar_width.saturating_sub(filled) as usize),
            fade_style(Style::default().fg(Color::DarkGray), opacity),
        ),
        Span::styled(
            format!(" {:>3.0}%", state.percent()),
            fade_style(Style::default().fg(Color::White), opacity),
        ),
    ]);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            state.message.clone(),
            fade_style(Style::default().fg(Color::Gray), opacity),
        )),
        Line::from(""),
        bar,
    ];

    frame.render_widget(Paragraph::new(content).block(block), popup);
}

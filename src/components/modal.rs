//! Modal rendering and hit-testing
//!
//! Each rendered modal dims everything beneath it and draws its content in a
//! centered panel, offset slightly per stack level. The panel rectangles
//! from the last draw are kept so mouse clicks can be told apart from
//! backdrop clicks.

use super::{centered_popup, fade_style, nudge};
use crate::model::{ClickTarget, ModalStack};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static BREAK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p>|<br\s*/?>|</li>|</h\d>").unwrap());

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Render modal markup as terminal text
pub fn plain_text(markup: &str) -> String {
    let with_breaks = BREAK_REGEX.replace_all(markup, "\n");
    let stripped = TAG_REGEX.replace_all(&with_breaks, "");
    stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Draws the modal stack and remembers where each panel ended up
#[derive(Debug, Default)]
pub struct ModalLayer {
    panels: Vec<(String, Rect)>,
}

impl ModalLayer {
    pub fn draw(&mut self, frame: &mut Frame, area: Rect, modals: &ModalStack) {
        self.panels.clear();

        for (level, modal) in modals.rendered().enumerate() {
            let opacity = modals.opacity(modal);
            if opacity > 0.2 {
                frame
                    .buffer_mut()
                    .set_style(area, Style::default().add_modifier(Modifier::DIM));
            }

            let text = plain_text(&modal.content);
            let panel = panel_area(area, &text, level);

            frame.render_widget(Clear, panel);
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", modal.id))
                .title_style(fade_style(
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    opacity,
                ))
                .border_style(fade_style(Style::default().fg(Color::Yellow), opacity));
            frame.render_widget(
                Paragraph::new(text)
                    .style(fade_style(Style::default().fg(Color::White), opacity))
                    .block(block)
                    .wrap(Wrap { trim: false }),
                panel,
            );

            self.panels.push((modal.id.clone(), panel));
        }
    }

    /// Resolve a click to the topmost open modal and the part that was hit
    pub fn hit_test(&self, modals: &ModalStack, column: u16, row: u16) -> Option<(String, ClickTarget)> {
        let top = modals.topmost_open()?;
        let target = match self.panels.iter().rev().find(|(id, _)| id == &top.id) {
            Some((_, panel)) if panel.contains(Position::new(column, row)) => ClickTarget::Content,
            _ => ClickTarget::Backdrop,
        };
        Some((top.id.clone(), target))
    }
}

/// Size the panel to its text, up to 90% of the screen
fn panel_area(area: Rect, text: &str, level: usize) -> Rect {
    let area_width = usize::from(area.width);
    let area_height = usize::from(area.height);
    let max_width = (area_width * 9 / 10).max(24);
    let max_height = (area_height * 9 / 10).max(3);

    let longest = text.lines().map(|l| l.width()).max().unwrap_or(0);
    let width = longest.saturating_add(4).clamp(24, max_width).min(area_width);
    let inner_width = width.saturating_sub(2).max(1);
    let rows = text
        .lines()
        .map(|l| l.width().div_ceil(inner_width).max(1))
        .fold(0usize, usize::saturating_add);
    let height = rows.saturating_add(2).min(max_height).min(area_height);

    let step = u16::try_from(level).unwrap_or(u16::MAX).saturating_mul(2);
    nudge(
        centered_popup(area, width as u16, height as u16),
        step,
        step / 2,
        area,
    )
}

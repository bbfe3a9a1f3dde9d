//! Notification rendering
//!
//! Every toast is anchored at the same top-right spot, so toasts that are
//! up at the same time overlap; the newest is drawn last and sits on top.
//! The slide offset pushes a toast to the right, past the screen edge.

use crate::model::{Notification, NotificationQueue, Severity};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const MAX_WIDTH: u16 = 40;
const MARGIN: u16 = 2;
const TOP: u16 = 1;

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

/// Full (unslid) size of a toast for `message`
pub fn toast_size(message: &str, area: Rect) -> (u16, u16) {
    let max_width = usize::from(MAX_WIDTH.min(area.width.saturating_sub(MARGIN)));
    // Icon, space and borders around the text
    let text_width = message.width().saturating_add(2);
    let width = text_width.saturating_add(2).min(max_width).max(4);
    let inner = width.saturating_sub(2).max(1);
    let lines = text_width.div_ceil(inner).max(1);
    let height = lines.saturating_add(2).min(usize::from(area.height));
    (width as u16, height as u16)
}

/// Position of a toast at slide `offset` (0 = resting, 1 = fully off-screen)
pub fn toast_area(area: Rect, width: u16, height: u16, offset: f64) -> Option<Rect> {
    let span = width.saturating_add(MARGIN);
    let resting_x = area.right().saturating_sub(span);
    let travel = f64::from(span) * offset.clamp(0.0, 1.0);
    let x = resting_x.saturating_add(travel.round() as u16);
    if x >= area.right() {
        return None;
    }
    let visible = width.min(area.right() - x);
    let y = area.y + TOP.min(area.height);
    Some(Rect::new(x, y, visible, height.min(area.bottom() - y)))
}

fn draw_toast(frame: &mut Frame, area: Rect, toast: &Notification, offset: f64) {
    let (width, height) = toast_size(&toast.message, area);
    let Some(rect) = toast_area(area, width, height, offset) else {
        return;
    };
    let color = severity_color(toast.severity);

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", toast.formatted_time()),
            Style::default().fg(Color::DarkGray),
        ));
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", toast.severity.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            toast.message.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
        rect,
    );
}

/// Draw every live notification, oldest first
pub fn draw_toasts(frame: &mut Frame, area: Rect, queue: &NotificationQueue) {
    for toast in queue.active() {
        draw_toast(frame, area, toast, queue.offset(toast));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_resting_toast_is_anchored_top_right() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = toast_area(area, 20, 3, 0.0).unwrap();
        assert_eq!(rect, Rect::new(58, 1, 20, 3));
    }

    #[test]
    fn test_slid_out_toast_is_not_drawn() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(toast_area(area, 20, 3, 1.0), None);

        let half = toast_area(area, 20, 3, 0.5).unwrap();
        assert_eq!(half.x, 69);
        assert_eq!(half.width, 11);
    }

    #[test]
    fn test_long_message_wraps() {
        let area = Rect::new(0, 0, 80, 24);
        let (width, height) = toast_size(&"x".repeat(100), area);
        assert_eq!(width, MAX_WIDTH);
        assert_eq!(height, 5);

        let (_, short) = toast_size("ok", area);
        assert_eq!(short, 3);
    }

    #[test]
    fn test_huge_message_is_clamped_to_screen() {
        let area = Rect::new(0, 0, 80, 24);
        let message = "x".repeat(65_534);
        assert_eq!(toast_size(&message, area), (MAX_WIDTH, 24));

        assert_eq!(toast_area(area, MAX_WIDTH, 24, 0.0).unwrap().bottom(), 24);

        let mut queue = NotificationQueue::default();
        queue.info(message);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| draw_toasts(frame, frame.area(), &queue))
            .unwrap();
    }
}

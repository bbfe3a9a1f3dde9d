//! Layout calculations for the dashboard and its overlays

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Dashboard screen areas
pub struct MainLayout {
    pub chart: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Shift `rect` by `(dx, dy)` while keeping it inside `bounds`
pub fn nudge(rect: Rect, dx: u16, dy: u16, bounds: Rect) -> Rect {
    let x = rect.x.saturating_add(dx).min(bounds.right().saturating_sub(rect.width));
    let y = rect.y.saturating_add(dy).min(bounds.bottom().saturating_sub(rect.height));
    Rect::new(x.max(bounds.x), y.max(bounds.y), rect.width, rect.height)
}

/// Chart on top, a one-line status row, then the key help bar
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    MainLayout {
        chart: chunks[0],
        status: chunks[1],
        help: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_popup(area, 40, 8), Rect::new(20, 8, 40, 8));
        assert_eq!(centered_popup(area, 200, 50), area);
    }

    #[test]
    fn test_centered_popup_respects_offset_area() {
        let area = Rect::new(10, 5, 20, 10);
        assert_eq!(centered_popup(area, 10, 4), Rect::new(15, 8, 10, 4));
    }

    #[test]
    fn test_nudge_stays_in_bounds() {
        let bounds = Rect::new(0, 0, 80, 24);
        let rect = Rect::new(60, 20, 20, 4);
        assert_eq!(nudge(rect, 4, 4, bounds), Rect::new(60, 20, 20, 4));
        assert_eq!(nudge(Rect::new(10, 5, 20, 4), 2, 1, bounds), Rect::new(12, 6, 20, 4));
    }
}

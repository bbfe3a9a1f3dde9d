//! Bar chart panel
//!
//! `BufferSurface` adapts a ratatui buffer region to the chart renderer's
//! drawing surface, one unit per terminal cell.

use crate::action::Action;
use crate::component::Component;
use crate::model::chart::{self, BarRect, ChartData, ChartError, ChartOptions, DrawingSurface};
use crate::model::Presenter;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// A region of a ratatui buffer used as a chart surface
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    fn column(&self, x: f64) -> Option<u16> {
        let col = x.floor();
        (col >= 0.0 && col < f64::from(self.area.width)).then(|| self.area.x + col as u16)
    }

    fn row(&self, y: f64) -> Option<u16> {
        let row = y.floor();
        (row >= 0.0 && row < f64::from(self.area.height)).then(|| self.area.y + row as u16)
    }
}

impl DrawingSurface for BufferSurface<'_> {
    fn width(&self) -> f64 {
        f64::from(self.area.width)
    }

    fn height(&self) -> f64 {
        f64::from(self.area.height)
    }

    fn clear(&mut self) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: BarRect, color: Color) {
        let left = rect.x.round();
        let width = rect.width.round().max(1.0);
        let bottom = (rect.y + rect.height).round();
        let rows = rect.height.round();
        let style = Style::default().fg(color);

        for dx in 0..width as u32 {
            let Some(x) = self.column(left + f64::from(dx)) else {
                continue;
            };
            if rows < 1.0 {
                // Shorter than half a cell: hint at it with a low block
                if let Some(y) = self.row(bottom - 1.0) {
                    self.buf.set_string(x, y, "▁", style);
                }
                continue;
            }
            for dy in 1..=rows as u32 {
                if let Some(y) = self.row(bottom - f64::from(dy)) {
                    self.buf.set_string(x, y, "█", style);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        let width = text.width() as f64;
        let Some(row) = self.row(y) else {
            return;
        };
        let start = (x - width / 2.0).round().max(0.0);
        let Some(col) = self.column(start) else {
            return;
        };
        let room = self.area.right().saturating_sub(col) as usize;
        self.buf
            .set_stringn(col, row, text, room, Style::default().fg(color));
    }
}

/// Dashboard panel plotting a labelled series
pub struct ChartPanel {
    pub title: String,
    pub data: ChartData,
    pub options: ChartOptions,
    last_error: Option<ChartError>,
}

impl ChartPanel {
    pub fn new(title: impl Into<String>, data: ChartData, options: ChartOptions) -> Self {
        Self {
            title: title.into(),
            data,
            options,
            last_error: None,
        }
    }

    /// Plain-text summary of the series, e.g. for the clipboard
    pub fn summary(&self) -> String {
        self.data
            .labels
            .iter()
            .zip(&self.data.values)
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn last_error(&self) -> Option<&ChartError> {
        self.last_error.as_ref()
    }
}

impl Component for ChartPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('r') => Some(Action::RotateSeries),
            KeyCode::Char('z') => Some(Action::ZeroSeries),
            _ => None,
        }
    }

    fn update(&mut self, action: &Action, presenter: &mut Presenter) -> Result<Option<Action>> {
        match action {
            Action::RotateSeries => self.data.values.rotate_left(1),
            Action::ZeroSeries => {
                self.data.values.iter_mut().for_each(|v| *v = 0.0);
                presenter.show_info("Series reset to zero");
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let result = {
            let mut surface = BufferSurface::new(frame.buffer_mut(), inner);
            chart::render(&mut surface, &self.data, &self.options)
        };

        match result {
            Ok(_) => self.last_error = None,
            Err(e) => {
                if self.last_error.as_ref() != Some(&e) {
                    tracing::warn!(error = %e, "chart not drawn");
                }
                frame.render_widget(
                    Paragraph::new(format!("Chart unavailable: {}", e))
                        .style(Style::default().fg(Color::Red))
                        .wrap(Wrap { trim: true }),
                    inner,
                );
                self.last_error = Some(e);
            }
        }
    }
}

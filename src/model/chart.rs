//! Minimal bar chart renderer
//!
//! `render` is a pure function over a [`DrawingSurface`]: it clears the
//! surface, lays out one bar per data point and draws each bar with its label
//! underneath and its value on top. Nothing is retained between calls.

use ratatui::style::Color;
use std::str::FromStr;
use thiserror::Error;

/// Default bar color (`#667eea`)
pub const DEFAULT_BAR_COLOR: Color = Color::Rgb(0x66, 0x7e, 0xea);

/// Color of labels and value text (`#4a5568`)
pub const LABEL_COLOR: Color = Color::Rgb(0x4a, 0x55, 0x68);

/// An axis-aligned rectangle in surface units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Something a chart can be drawn onto
///
/// Coordinates grow right and down from the top-left corner. Text is
/// horizontally centered on `x` with its baseline at `y`.
pub trait DrawingSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: BarRect, color: Color);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color);
}

/// Labelled series to plot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    pub fn new<L: Into<String>>(labels: impl IntoIterator<Item = L>, values: Vec<f64>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            values,
        }
    }
}

/// Chart type requested by the caller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Other(String),
}

impl FromStr for ChartKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "bar" => ChartKind::Bar,
            other => ChartKind::Other(other.to_string()),
        })
    }
}

/// Spacing of the plot inside the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    /// Gap between the plot area and every surface edge
    pub padding: f64,
    /// Distance of the label baseline above the bottom edge
    pub label_gap: f64,
    /// Distance of the value text above the bar top
    pub value_gap: f64,
    /// Fraction of each slot taken by its bar
    pub bar_ratio: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            padding: 40.0,
            label_gap: 15.0,
            value_gap: 5.0,
            bar_ratio: 0.6,
        }
    }
}

impl ChartLayout {
    /// Proportions for a terminal surface measured in cells
    pub fn cells() -> Self {
        Self {
            padding: 2.0,
            label_gap: 1.0,
            value_gap: 1.0,
            bar_ratio: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub kind: ChartKind,
    pub color: Color,
    pub layout: ChartLayout,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            color: DEFAULT_BAR_COLOR,
            layout: ChartLayout::default(),
        }
    }
}

impl ChartOptions {
    /// Build options from user-facing names such as `"bar"` and `"#667eea"`
    pub fn from_names(kind: &str, color: &str) -> Result<Self, ChartError> {
        let color =
            Color::from_str(color).map_err(|_| ChartError::InvalidColor(color.to_string()))?;
        let kind = match ChartKind::from_str(kind) {
            Ok(kind) => kind,
            Err(never) => match never {},
        };
        Ok(Self {
            kind,
            color,
            ..Self::default()
        })
    }

    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("unsupported chart type '{0}'")]
    UnsupportedKind(String),
    #[error("chart has {labels} labels but {values} values")]
    LengthMismatch { labels: usize, values: usize },
    #[error("value at index {index} is not a finite number")]
    NonFiniteValue { index: usize },
    #[error("invalid chart color '{0}'")]
    InvalidColor(String),
}

/// Geometry of one drawn bar
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub rect: BarRect,
}

/// What a successful render drew
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartReport {
    pub bars: Vec<Bar>,
}

impl ChartReport {
    /// Index of the tallest bar; the first one wins a tie
    pub fn tallest(&self) -> Option<usize> {
        self.bars
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, bar)| match best {
                Some((_, height)) if height >= bar.rect.height => best,
                _ => Some((i, bar.rect.height)),
            })
            .map(|(i, _)| i)
    }
}

/// Draw `data` onto `surface` as a bar chart
pub fn render(
    surface: &mut dyn DrawingSurface,
    data: &ChartData,
    options: &ChartOptions,
) -> Result<ChartReport, ChartError> {
    surface.clear();

    if let ChartKind::Other(kind) = &options.kind {
        return Err(ChartError::UnsupportedKind(kind.clone()));
    }
    if data.labels.len() != data.values.len() {
        return Err(ChartError::LengthMismatch {
            labels: data.labels.len(),
            values: data.values.len(),
        });
    }
    if let Some(index) = data.values.iter().position(|v| !v.is_finite()) {
        return Err(ChartError::NonFiniteValue { index });
    }
    if data.values.is_empty() {
        return Ok(ChartReport::default());
    }

    let layout = options.layout;
    let chart_width = (surface.width() - 2.0 * layout.padding).max(0.0);
    let chart_height = (surface.height() - 2.0 * layout.padding).max(0.0);
    let max_value = data.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let count = data.values.len() as f64;
    let spacing = chart_width / count;
    let bar_width = spacing * layout.bar_ratio;
    let label_y = surface.height() - layout.label_gap;

    let mut report = ChartReport::default();
    for (index, (label, &value)) in data.labels.iter().zip(&data.values).enumerate() {
        // All-zero or all-negative series draw flat bars instead of dividing by zero
        let bar_height = if max_value > 0.0 {
            (value / max_value).max(0.0) * chart_height
        } else {
            0.0
        };
        let rect = BarRect {
            x: layout.padding + index as f64 * spacing + (spacing - bar_width) / 2.0,
            y: layout.padding + chart_height - bar_height,
            width: bar_width,
            height: bar_height,
        };
        let center = rect.x + bar_width / 2.0;

        // A degenerate series has no scale, so it gets labels only
        if max_value > 0.0 {
            surface.fill_rect(rect, options.color);
        }
        surface.fill_text(label, center, label_y, LABEL_COLOR);
        surface.fill_text(&format_value(value), center, rect.y - layout.value_gap, LABEL_COLOR);

        report.bars.push(Bar {
            label: label.clone(),
            value,
            rect,
        });
    }

    tracing::trace!(bars = report.bars.len(), max_value, "chart rendered");
    Ok(report)
}

/// Integers print without a trailing `.0`
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Rect(BarRect, Color),
        Text(String, f64, f64),
    }

    /// Surface that records every draw call
    struct RecordingSurface {
        width: f64,
        height: f64,
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn new(width: f64, height: f64) -> Self {
            Self {
                width,
                height,
                ops: Vec::new(),
            }
        }

        fn rects(&self) -> Vec<BarRect> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Rect(rect, _) => Some(*rect),
                    _ => None,
                })
                .collect()
        }

        fn texts(&self) -> Vec<String> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(text, _, _) => Some(text.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl DrawingSurface for RecordingSurface {
        fn width(&self) -> f64 {
            self.width
        }

        fn height(&self) -> f64 {
            self.height
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn fill_rect(&mut self, rect: BarRect, color: Color) {
            self.ops.push(Op::Rect(rect, color));
        }

        fn fill_text(&mut self, text: &str, x: f64, y: f64, _color: Color) {
            self.ops.push(Op::Text(text.to_string(), x, y));
        }
    }

    #[test]
    fn test_bars_are_proportional() {
        let mut surface = RecordingSurface::new(400.0, 300.0);
        let data = ChartData::new(["a", "b", "c"], vec![10.0, 40.0, 20.0]);

        let report = render(&mut surface, &data, &ChartOptions::default()).unwrap();

        assert_eq!(surface.ops.first(), Some(&Op::Clear));
        let rects = surface.rects();
        assert_eq!(rects.len(), 3);
        assert_eq!(report.tallest(), Some(1));

        // Plot is 220 high; the maximum fills it
        assert_eq!(rects[1].height, 220.0);
        assert_eq!(rects[0].height, 55.0);
        assert_eq!(rects[1].y, 40.0);

        // Slots are 320/3 wide with 60% bars centered inside
        let spacing = 320.0 / 3.0;
        assert!((rects[0].width - spacing * 0.6).abs() < 1e-9);
        assert!((rects[0].x - (40.0 + spacing * 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_labels_and_values_are_drawn() {
        let mut surface = RecordingSurface::new(200.0, 200.0);
        let data = ChartData::new(["Mon", "Tue"], vec![3.0, 4.5]);

        render(&mut surface, &data, &ChartOptions::default()).unwrap();

        assert_eq!(surface.texts(), vec!["Mon", "3", "Tue", "4.5"]);
        let label_y = surface.ops.iter().find_map(|op| match op {
            Op::Text(text, _, y) if text == "Mon" => Some(*y),
            _ => None,
        });
        assert_eq!(label_y, Some(185.0));
    }

    #[test]
    fn test_all_zero_series_draws_no_nan() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let data = ChartData::new(["a", "b"], vec![0.0, 0.0]);

        let report = render(&mut surface, &data, &ChartOptions::default()).unwrap();

        assert!(surface.rects().is_empty());
        assert_eq!(report.bars.len(), 2);
        for bar in &report.bars {
            assert_eq!(bar.rect.height, 0.0);
            assert!(bar.rect.x.is_finite() && bar.rect.y.is_finite());
        }
        for op in &surface.ops {
            if let Op::Text(_, x, y) = op {
                assert!(x.is_finite() && y.is_finite());
            }
        }
    }

    #[test]
    fn test_empty_series_only_clears() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let report = render(&mut surface, &ChartData::default(), &ChartOptions::default()).unwrap();

        assert!(report.bars.is_empty());
        assert_eq!(surface.ops, vec![Op::Clear]);
    }

    #[test]
    fn test_negative_values_draw_flat() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let data = ChartData::new(["up", "down"], vec![5.0, -5.0]);

        let report = render(&mut surface, &data, &ChartOptions::default()).unwrap();
        assert_eq!(report.bars[1].rect.height, 0.0);
        assert_eq!(surface.rects().len(), 2);
        assert_eq!(surface.rects()[1].height, 0.0);
    }

    #[test]
    fn test_zero_in_positive_series_still_fills() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let data = ChartData::new(["a", "b"], vec![5.0, 0.0]);

        render(&mut surface, &data, &ChartOptions::default()).unwrap();
        let rects = surface.rects();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[1].height, 0.0);
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let data = ChartData::new(["a"], vec![1.0, 2.0]);

        let result = render(&mut surface, &data, &ChartOptions::default());
        assert_eq!(
            result,
            Err(ChartError::LengthMismatch {
                labels: 1,
                values: 2
            })
        );
        assert_eq!(surface.ops, vec![Op::Clear]);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let data = ChartData::new(["a", "b"], vec![1.0, f64::INFINITY]);

        let result = render(&mut surface, &data, &ChartOptions::default());
        assert_eq!(result, Err(ChartError::NonFiniteValue { index: 1 }));
    }

    #[test]
    fn test_unsupported_kind_clears_and_reports() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        let data = ChartData::new(["a"], vec![1.0]);
        let options = ChartOptions::from_names("pie", "#667eea").unwrap();

        let result = render(&mut surface, &data, &options);
        assert_eq!(result, Err(ChartError::UnsupportedKind("pie".to_string())));
        assert_eq!(surface.ops, vec![Op::Clear]);
    }

    #[test]
    fn test_options_from_names() {
        let options = ChartOptions::from_names("bar", "#667eea").unwrap();
        assert_eq!(options.kind, ChartKind::Bar);
        assert_eq!(options.color, DEFAULT_BAR_COLOR);

        assert_eq!(
            ChartOptions::from_names("bar", "not-a-color"),
            Err(ChartError::InvalidColor("not-a-color".to_string()))
        );
    }

    proptest! {
        #[test]
        fn test_bar_count_matches_series(
            raw in proptest::collection::vec(-5i32..=10, 1..12)
        ) {
            prop_assume!(raw.iter().any(|v| *v > 0));
            let values: Vec<f64> = raw.iter().map(|v| f64::from(*v)).collect();
            let labels: Vec<String> = (0..values.len()).map(|i| format!("l{i}")).collect();
            let data = ChartData::new(labels, values.clone());
            let mut surface = RecordingSurface::new(80.0, 24.0);

            let options = ChartOptions::default().with_layout(ChartLayout::cells());
            let report = render(&mut surface, &data, &options).unwrap();

            prop_assert_eq!(surface.rects().len(), values.len());
            let argmax = values
                .iter()
                .enumerate()
                .fold(0, |best, (i, v)| if *v > values[best] { i } else { best });
            prop_assert_eq!(report.tallest(), Some(argmax));
            for rect in surface.rects() {
                prop_assert!(rect.height.is_finite() && rect.height >= 0.0);
            }
        }
    }
}

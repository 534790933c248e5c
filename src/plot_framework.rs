// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::drawing::DrawingArea;
use plotters::element::{PathElement, Rectangle, Text};
use plotters::prelude::IntoFont;
use plotters::series::LineSeries;
use plotters::style::{Color, RGBColor};

use std::error::Error;
use std::ops::Range;

use crate::constants::{
    COLLISION_SCALE_THRESHOLD, FONT_SIZE_NOTE, MAX_CHARS_PER_LABEL_ROW, MAX_POINT_SCALE,
    MIN_LABEL_WIDTH, NOTE_MARGIN_PX,
};
use crate::data_analysis::descriptives::BoxStats;
use crate::measurement::MeasurementLevel;

/// Every chart in this crate draws on a plain f64-by-f64 cartesian plane.
pub type Chart2d<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Per-label character budget: a 55-character row split across the labels,
/// never below the minimum width.
pub fn label_budget(label_count: usize) -> usize {
    if label_count == 0 {
        return MAX_CHARS_PER_LABEL_ROW;
    }
    (MAX_CHARS_PER_LABEL_ROW / label_count).max(MIN_LABEL_WIDTH)
}

/// Clip a tick label to its budget; mesh tick labels are single-line.
pub fn clip_label(label: &str, budget: usize) -> String {
    if label.chars().count() <= budget {
        label.to_string()
    } else {
        let clipped: String = label.chars().take(budget.saturating_sub(1)).collect();
        format!("{}\u{2026}", clipped)
    }
}

/// Word-wrap a label into budget-wide lines, for hand-drawn multi-line text
/// (mosaic cell labels).
pub fn wrap_text(text: &str, budget: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= budget {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Rescale collision frequencies so the largest marker is at most
/// `MAX_POINT_SCALE` times the unit size. Returns the scale factors and, when
/// rescaling kicked in, the case count to report in the chart footnote.
pub fn scale_collision_sizes(freqs: &[f64]) -> (Vec<f64>, Option<usize>) {
    let max_freq = freqs.iter().cloned().fold(0.0f64, f64::max);
    if max_freq > COLLISION_SCALE_THRESHOLD {
        let scaled = freqs
            .iter()
            .map(|f| (f - 1.0) / ((max_freq - 1.0) / (MAX_POINT_SCALE - 1.0)) + 1.0)
            .collect();
        (scaled, Some(max_freq as usize))
    } else {
        (freqs.to_vec(), None)
    }
}

/// Dash pattern for an axis spine: (segment count, duty cycle), or None for
/// a solid line. Solid = interval, dashed = ordinal, dotted = nominal.
fn spine_pattern(level: MeasurementLevel) -> Option<(usize, f64)> {
    match level {
        MeasurementLevel::Interval | MeasurementLevel::Unknown => None,
        MeasurementLevel::Ordinal => Some((24, 0.6)),
        MeasurementLevel::Nominal => Some((60, 0.25)),
    }
}

fn draw_patterned_line(
    chart: &mut Chart2d,
    from: (f64, f64),
    to: (f64, f64),
    pattern: Option<(usize, f64)>,
    color: &RGBColor,
) -> Result<(), Box<dyn Error>> {
    match pattern {
        None => {
            chart.draw_series(LineSeries::new(vec![from, to], color))?;
        }
        Some((segments, duty)) => {
            let step_x = (to.0 - from.0) / segments as f64;
            let step_y = (to.1 - from.1) / segments as f64;
            for i in 0..segments {
                let start = (from.0 + step_x * i as f64, from.1 + step_y * i as f64);
                let end = (start.0 + step_x * duty, start.1 + step_y * duty);
                chart.draw_series(LineSeries::new(vec![start, end], color))?;
            }
        }
    }
    Ok(())
}

/// Draw the bottom and left axis spines styled by the measurement levels of
/// the two axes (solid/dashed/dotted for interval/ordinal/nominal).
pub fn draw_spines(
    chart: &mut Chart2d,
    x_range: &Range<f64>,
    y_range: &Range<f64>,
    x_level: MeasurementLevel,
    y_level: MeasurementLevel,
    color: &RGBColor,
) -> Result<(), Box<dyn Error>> {
    draw_patterned_line(
        chart,
        (x_range.start, y_range.start),
        (x_range.end, y_range.start),
        spine_pattern(x_level),
        color,
    )?;
    draw_patterned_line(
        chart,
        (x_range.start, y_range.start),
        (x_range.start, y_range.end),
        spine_pattern(y_level),
        color,
    )?;
    Ok(())
}

/// Vertical boxplot glyph with whiskers at the data range, drawn from plain
/// rectangles and paths.
pub fn draw_boxplot(
    chart: &mut Chart2d,
    x_center: f64,
    width: f64,
    stats: &BoxStats,
    color: &RGBColor,
) -> Result<(), Box<dyn Error>> {
    let half = width / 2.0;
    let cap = width / 4.0;
    chart.draw_series(std::iter::once(Rectangle::new(
        [
            (x_center - half, stats.lower_quartile),
            (x_center + half, stats.upper_quartile),
        ],
        color.stroke_width(1),
    )))?;
    // Median line.
    chart.draw_series(LineSeries::new(
        vec![
            (x_center - half, stats.median),
            (x_center + half, stats.median),
        ],
        color,
    ))?;
    // Whiskers and caps.
    for (from, to) in [
        (stats.upper_quartile, stats.maximum),
        (stats.lower_quartile, stats.minimum),
    ] {
        chart.draw_series(LineSeries::new(
            vec![(x_center, from), (x_center, to)],
            color,
        ))?;
        chart.draw_series(LineSeries::new(
            vec![(x_center - cap, to), (x_center + cap, to)],
            color,
        ))?;
    }
    Ok(())
}

/// Horizontal boxplot glyph, used under the histogram.
pub fn draw_boxplot_horizontal(
    chart: &mut Chart2d,
    y_center: f64,
    height: f64,
    stats: &BoxStats,
    color: &RGBColor,
) -> Result<(), Box<dyn Error>> {
    let half = height / 2.0;
    let cap = height / 4.0;
    chart.draw_series(std::iter::once(Rectangle::new(
        [
            (stats.lower_quartile, y_center - half),
            (stats.upper_quartile, y_center + half),
        ],
        color.stroke_width(1),
    )))?;
    chart.draw_series(LineSeries::new(
        vec![
            (stats.median, y_center - half),
            (stats.median, y_center + half),
        ],
        color,
    ))?;
    for (from, to) in [
        (stats.upper_quartile, stats.maximum),
        (stats.lower_quartile, stats.minimum),
    ] {
        chart.draw_series(LineSeries::new(
            vec![(from, y_center), (to, y_center)],
            color,
        ))?;
        chart.draw_series(LineSeries::new(
            vec![(to, y_center - cap), (to, y_center + cap)],
            color,
        ))?;
    }
    Ok(())
}

/// Vertical error bar with caps (confidence-interval whisker).
pub fn draw_error_bar(
    chart: &mut Chart2d,
    x: f64,
    low: f64,
    high: f64,
    cap_half_width: f64,
    color: &RGBColor,
) -> Result<(), Box<dyn Error>> {
    chart.draw_series(LineSeries::new(vec![(x, low), (x, high)], color))?;
    for y in [low, high] {
        chart.draw_series(LineSeries::new(
            vec![(x - cap_half_width, y), (x + cap_half_width, y)],
            color,
        ))?;
    }
    Ok(())
}

/// Horizontal error bar with caps.
pub fn draw_error_bar_horizontal(
    chart: &mut Chart2d,
    y: f64,
    low: f64,
    high: f64,
    cap_half_height: f64,
    color: &RGBColor,
) -> Result<(), Box<dyn Error>> {
    chart.draw_series(LineSeries::new(vec![(low, y), (high, y)], color))?;
    for x in [low, high] {
        chart.draw_series(LineSeries::new(
            vec![(x, y - cap_half_height), (x, y + cap_half_height)],
            color,
        ))?;
    }
    Ok(())
}

/// Draw a footnote in the bottom-right corner of the figure (collision-scale
/// notes such as "Largest sign on the graph displays 14 cases.").
pub fn draw_note(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    note: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    let (x_range, y_range) = area.get_pixel_range();
    let width = x_range.end - x_range.start;
    let height = y_range.end - y_range.start;
    let estimated_width = (note.len() as f32 * FONT_SIZE_NOTE as f32 * CHAR_WIDTH_RATIO) as i32;
    let position = (
        (width - estimated_width - NOTE_MARGIN_PX).max(0),
        height - FONT_SIZE_NOTE - NOTE_MARGIN_PX,
    );
    let style = ("sans-serif", FONT_SIZE_NOTE)
        .into_font()
        .color(&plotters::style::colors::BLACK);
    area.draw(&Text::new(note.to_string(), position, style))?;
    Ok(())
}

/// A straight reference line between two points (regression fits, QQ lines).
pub fn draw_reference_line(
    chart: &mut Chart2d,
    from: (f64, f64),
    to: (f64, f64),
    color: &RGBColor,
    stroke_width: u32,
) -> Result<(), Box<dyn Error>> {
    chart.draw_series(std::iter::once(PathElement::new(
        vec![from, to],
        color.stroke_width(stroke_width),
    )))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_range_padding() {
        let (min, max) = calculate_range(0.0, 10.0);
        assert!((min - (-1.5)).abs() < 1e-9);
        assert!((max - 11.5).abs() < 1e-9);
        // Degenerate range gets fixed padding.
        let (min, max) = calculate_range(5.0, 5.0);
        assert!((min - 4.5).abs() < 1e-9);
        assert!((max - 5.5).abs() < 1e-9);
    }

    #[test]
    fn test_label_budget() {
        assert_eq!(label_budget(1), 55);
        assert_eq!(label_budget(5), 11);
        assert_eq!(label_budget(20), 5);
    }

    #[test]
    fn test_clip_label() {
        assert_eq!(clip_label("short", 10), "short");
        assert_eq!(clip_label("a very long label", 6), "a ver\u{2026}");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("", 7), vec![""]);
    }

    #[test]
    fn test_scale_collision_sizes() {
        // Below the threshold nothing is rescaled.
        let (sizes, note) = scale_collision_sizes(&[1.0, 4.0, 10.0]);
        assert_eq!(sizes, vec![1.0, 4.0, 10.0]);
        assert!(note.is_none());
        // Above the threshold the largest maps to MAX_POINT_SCALE and the
        // smallest stays at unit size.
        let (sizes, note) = scale_collision_sizes(&[1.0, 19.0]);
        assert!((sizes[0] - 1.0).abs() < 1e-9);
        assert!((sizes[1] - 10.0).abs() < 1e-9);
        assert_eq!(note, Some(19));
    }
}

// src/plot_framework.rs

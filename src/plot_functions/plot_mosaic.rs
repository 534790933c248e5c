// src/plot_functions/plot_mosaic.rs

use ndarray::Array2;
use plotters::prelude::*;
use std::error::Error;

use crate::constants::{
    COLOR_SPINE, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_MOSAIC_LABEL,
    MOSAIC_CELL_GAP, PLOT_HEIGHT, PLOT_WIDTH, ZERO_CELL_NUDGE,
};
use crate::data_analysis::categorical::CrossTab;
use crate::measurement::MeasurementLevel;
use crate::plot_framework::{draw_spines, label_budget, wrap_text};

/// One tile of the mosaic, in unit-square coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MosaicCell {
    pub row: usize,
    pub col: usize,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

/// Lay the contingency table out as column strips split by cell share.
/// Zero-frequency cells are nudged by a negligible additive constant so
/// degenerate tables still produce a full tiling.
pub fn mosaic_layout(counts: &Array2<f64>, gap: f64) -> Result<Vec<MosaicCell>, Box<dyn Error>> {
    let (rows, cols) = counts.dim();
    if rows == 0 || cols == 0 {
        return Err("Mosaic plot needs a non-empty table".into());
    }
    let mut working = counts.clone();
    if working.iter().any(|&c| c == 0.0) {
        working.mapv_inplace(|c| c + ZERO_CELL_NUDGE);
    }
    let total: f64 = working.sum();
    if total <= 0.0 {
        return Err("Mosaic plot needs at least one observed case".into());
    }

    let x_span = 1.0 - gap * (cols.saturating_sub(1)) as f64;
    let y_span = 1.0 - gap * (rows.saturating_sub(1)) as f64;
    let mut cells = Vec::with_capacity(rows * cols);
    let mut x_cursor = 0.0;
    for col in 0..cols {
        let col_sum: f64 = working.column(col).sum();
        let width = col_sum / total * x_span;
        let mut y_cursor = 0.0;
        for row in 0..rows {
            let height = working[[row, col]] / col_sum * y_span;
            cells.push(MosaicCell {
                row,
                col,
                x0: x_cursor,
                x1: x_cursor + width,
                y0: y_cursor,
                y1: y_cursor + height,
            });
            y_cursor += height + gap;
        }
        x_cursor += width + gap;
    }
    Ok(cells)
}

/// Mosaic plot of a contingency table, row levels color-coded and both
/// category axes labeled from the table.
pub fn plot_mosaic(
    table: &CrossTab,
    x_name: &str,
    y_name: &str,
    title: &str,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    let cells = mosaic_layout(&table.counts, MOSAIC_CELL_GAP)?;

    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = -0.18f64..1.02f64;
    let y_range = -0.14f64..1.02f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;
    chart
        .configure_mesh()
        .x_desc(x_name)
        .y_desc(y_name)
        .x_labels(0)
        .y_labels(0)
        .disable_mesh()
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    for cell in &cells {
        let color = Palette99::pick(cell.row).mix(0.85);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(cell.x0, cell.y0), (cell.x1, cell.y1)],
            color.filled(),
        )))?;
    }

    // Column labels under the tiling, wrapped to their budget.
    let column_budget = label_budget(table.col_levels.len());
    for (col, level) in table.col_levels.iter().enumerate() {
        if let Some(cell) = cells.iter().find(|c| c.col == col && c.row == 0) {
            let center = (cell.x0 + cell.x1) / 2.0;
            for (line_index, line) in wrap_text(level, column_budget).into_iter().enumerate() {
                chart.draw_series(std::iter::once(Text::new(
                    line,
                    (center - 0.01, -0.03 - 0.04 * line_index as f64),
                    ("sans-serif", FONT_SIZE_MOSAIC_LABEL),
                )))?;
            }
        }
    }
    // Row labels on the left of the first column.
    let row_budget = label_budget(table.row_levels.len());
    for (row, level) in table.row_levels.iter().enumerate() {
        if let Some(cell) = cells.iter().find(|c| c.row == row && c.col == 0) {
            let center = (cell.y0 + cell.y1) / 2.0;
            for (line_index, line) in wrap_text(level, row_budget).into_iter().enumerate() {
                chart.draw_series(std::iter::once(Text::new(
                    line,
                    (-0.17, center - 0.04 * line_index as f64),
                    ("sans-serif", FONT_SIZE_MOSAIC_LABEL),
                )))?;
            }
        }
    }

    draw_spines(
        &mut chart,
        &x_range,
        &y_range,
        MeasurementLevel::Nominal,
        MeasurementLevel::Nominal,
        COLOR_SPINE,
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mosaic_layout_uniform_table() {
        let cells = mosaic_layout(&array![[1.0, 1.0], [1.0, 1.0]], 0.0).unwrap();
        assert_eq!(cells.len(), 4);
        for cell in &cells {
            assert!((cell.x1 - cell.x0 - 0.5).abs() < 1e-9);
            assert!((cell.y1 - cell.y0 - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mosaic_layout_column_widths_follow_totals() {
        let cells = mosaic_layout(&array![[3.0], [1.0]], 0.0).unwrap();
        // One column spanning the full width, rows split 3:1.
        assert!((cells[0].x1 - cells[0].x0 - 1.0).abs() < 1e-9);
        assert!((cells[0].y1 - cells[0].y0 - 0.75).abs() < 1e-9);
        assert!((cells[1].y1 - cells[1].y0 - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_mosaic_layout_zero_cells_nudged() {
        let cells = mosaic_layout(&array![[2.0, 0.0], [0.0, 2.0]], 0.0).unwrap();
        assert_eq!(cells.len(), 4);
        // The zero cells survive with negligible but nonnegative extent.
        let degenerate = cells
            .iter()
            .filter(|c| (c.y1 - c.y0) < 1e-6)
            .count();
        assert_eq!(degenerate, 2);
    }

    #[test]
    fn test_mosaic_layout_rejects_empty_table() {
        assert!(mosaic_layout(&Array2::<f64>::zeros((0, 0)), 0.0).is_err());
    }
}

// src/plot_functions/plot_mosaic.rs

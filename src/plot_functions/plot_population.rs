// src/plot_functions/plot_population.rs

use plotters::prelude::*;
use std::error::Error;

use crate::constants::{
    COLOR_PRIMARY, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, PLOT_HEIGHT, PLOT_WIDTH,
    POPULATION_CHART_HEIGHT_FRACTION,
};
use crate::plot_framework::{calculate_range, draw_error_bar_horizontal};

fn draw_horizontal_bar(
    value: f64,
    ci: Option<(f64, f64)>,
    var_name: &str,
    title: &str,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    let height = (PLOT_HEIGHT as f64 * POPULATION_CHART_HEIGHT_FRACTION) as u32;
    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut extent_min = 0.0f64.min(value);
    let mut extent_max = 0.0f64.max(value);
    if let Some((low, high)) = ci {
        extent_min = extent_min.min(low);
        extent_max = extent_max.max(high);
    }
    let (x_min, x_max) = calculate_range(extent_min, extent_max);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(20)
        .build_cartesian_2d(x_min..x_max, 0.0f64..2.0f64)?;
    chart
        .configure_mesh()
        .x_desc(var_name)
        .x_labels(10)
        .y_labels(0)
        .disable_y_mesh()
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.0, 0.7), (value, 1.3)],
        COLOR_PRIMARY.filled(),
    )))?;
    if let Some((low, high)) = ci {
        draw_error_bar_horizontal(&mut chart, 1.0, low, high, 0.1, &BLACK)?;
    }

    root.present()?;
    Ok(())
}

/// Horizontal bar of the sample mean with its confidence-interval whisker.
pub fn plot_mean_ci_bar(
    mean: f64,
    ci_low: f64,
    ci_high: f64,
    var_name: &str,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    draw_horizontal_bar(
        mean,
        Some((ci_low, ci_high)),
        var_name,
        "Mean value with 95% confidence interval",
        output_path,
    )
}

/// Horizontal bar of the sample median (ordinal population view).
pub fn plot_median_bar(
    median: f64,
    var_name: &str,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    draw_horizontal_bar(median, None, var_name, "Median value", output_path)
}

// src/plot_functions/plot_population.rs

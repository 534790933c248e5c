// src/plot_functions/plot_normality.rs

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use std::error::Error;

use crate::constants::{
    CASE_TICK_FRACTION, COLOR_PRIMARY, COLOR_SECONDARY, FONT_SIZE_AXIS_LABEL,
    FONT_SIZE_CHART_TITLE, LINE_WIDTH_OVERLAY, PLOT_HEIGHT, PLOT_WIDTH, POINT_RADIUS_UNIT,
};
use crate::data_analysis::descriptives::{
    histogram, mean, quantile_sorted, sorted_copy, std_pop, value_counts,
};
use crate::plot_framework::{calculate_range, draw_note, draw_reference_line};
use crate::plot_functions::plot_histogram::histogram_bin_count;

/// Density-normalized histogram with the fitted normal overlay and a
/// percent-formatted y axis.
pub fn plot_normality_histogram(
    values: &[f64],
    var_name: &str,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    if values.len() < 3 {
        return Err("Not enough data to plot".into());
    }
    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let n = values.len() as f64;
    let (freq, edges) = histogram(values, histogram_bin_count(values));
    let bin_width = edges[1] - edges[0];
    let densities: Vec<f64> = freq.iter().map(|&f| f as f64 / (n * bin_width)).collect();
    let max_density = densities.iter().cloned().fold(0.0f64, f64::max);

    let m = mean(values);
    let s = std_pop(values);
    if s <= 0.0 {
        return Err("Normal overlay is undefined for constant data".into());
    }
    let normal = Normal::new(m, s)?;

    let (x_min, x_max) = calculate_range(edges[0], edges[edges.len() - 1]);
    let peak_density = normal.pdf(m).max(max_density);
    let y_range = 0.0f64..peak_density * 1.15;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Histogram with individual data and normal distribution",
            ("sans-serif", FONT_SIZE_CHART_TITLE),
        )
        .margin(5)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_range)?;
    chart
        .configure_mesh()
        .x_desc(var_name)
        .y_desc("Normalized relative frequency")
        .x_labels(10)
        .y_labels(5)
        .y_label_formatter(&|y| format!("{:.0}%", y * 100.0))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    chart.draw_series(densities.iter().enumerate().map(|(i, &d)| {
        Rectangle::new([(edges[i], 0.0), (edges[i + 1], d)], COLOR_PRIMARY.filled())
    }))?;

    // Fitted normal overlay, dashed in the secondary color.
    let curve: Vec<(f64, f64)> = (0..=200)
        .map(|i| {
            let x = x_min + (x_max - x_min) * i as f64 / 200.0;
            (x, normal.pdf(x))
        })
        .collect();
    chart.draw_series(DashedLineSeries::new(
        curve,
        8,
        5,
        COLOR_SECONDARY.stroke_width(LINE_WIDTH_OVERLAY),
    ))?;

    // Individual data as per-value ticks scaled against the density peak.
    let counts = value_counts(values);
    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(1);
    for (value, count) in &counts {
        let tick_height = *count as f64 * (peak_density / max_count as f64) / CASE_TICK_FRACTION;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(*value, 0.0), (*value, tick_height)],
            BLACK.stroke_width(2),
        )))?;
    }
    if max_count > 1 {
        draw_note(
            &root,
            &format!("Largest tick on the x axes displays {} cases.", max_count),
        )?;
    }

    root.present()?;
    Ok(())
}

/// Quantile-quantile plot against the normal distribution, with a reference
/// line through the quartiles.
pub fn plot_qq(values: &[f64], var_name: &str, output_path: &str) -> Result<(), Box<dyn Error>> {
    let n = values.len();
    if n < 3 {
        return Err("Not enough data to plot".into());
    }
    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let sorted = sorted_copy(values);
    let standard_normal = Normal::new(0.0, 1.0)?;
    let theoretical: Vec<f64> = (0..n)
        .map(|i| standard_normal.inverse_cdf((i as f64 + 1.0 - 0.375) / (n as f64 + 0.25)))
        .collect();

    let (x_min, x_max) = calculate_range(theoretical[0], theoretical[n - 1]);
    let (y_min, y_max) = calculate_range(sorted[0], sorted[n - 1]);

    let mut chart = ChartBuilder::on(&root)
        .caption("Quantile-quantile plot", ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Theoretical quantiles")
        .y_desc(var_name)
        .x_labels(10)
        .y_labels(10)
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    chart.draw_series(
        theoretical
            .iter()
            .zip(sorted.iter())
            .map(|(&q, &v)| Circle::new((q, v), POINT_RADIUS_UNIT as i32, COLOR_PRIMARY.filled())),
    )?;

    // Reference line through the sample and theoretical quartiles.
    let q1_theoretical = standard_normal.inverse_cdf(0.25);
    let q3_theoretical = standard_normal.inverse_cdf(0.75);
    let q1_sample = quantile_sorted(&sorted, 0.25);
    let q3_sample = quantile_sorted(&sorted, 0.75);
    let slope = (q3_sample - q1_sample) / (q3_theoretical - q1_theoretical);
    let intercept = q1_sample - slope * q1_theoretical;
    draw_reference_line(
        &mut chart,
        (x_min, slope * x_min + intercept),
        (x_max, slope * x_max + intercept),
        COLOR_SECONDARY,
        2,
    )?;

    root.present()?;
    Ok(())
}

// src/plot_functions/plot_normality.rs

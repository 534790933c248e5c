// src/plot_functions/plot_histogram.rs

use plotters::prelude::*;
use std::error::Error;

use crate::constants::{
    CASE_TICK_FRACTION, COLOR_PRIMARY, COLOR_SPINE, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE,
    HISTOGRAM_DEFAULT_BINS, HISTOGRAM_DISTINCT_LIMIT, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::data_analysis::descriptives::{
    box_stats, distinct_count, histogram, sorted_copy, value_counts,
};
use crate::measurement::MeasurementLevel;
use crate::plot_framework::{
    calculate_range, draw_boxplot_horizontal, draw_note, draw_spines,
};
use crate::plot_functions::plot_raw_data::rank_tick_label;

/// Pick the bin count the histogram recipes share: one bin per distinct
/// value for sparse data, the default bin count otherwise.
pub fn histogram_bin_count(values: &[f64]) -> usize {
    let distinct = distinct_count(values);
    if distinct < HISTOGRAM_DISTINCT_LIMIT {
        distinct.max(1)
    } else {
        HISTOGRAM_DEFAULT_BINS
    }
}

/// Histogram with individual-case tick marks on top and a boxplot panel
/// underneath sharing the x axis. Ordinal variables arrive rank-transformed
/// with `original_values` supplying the tick relabeling.
pub fn plot_histogram(
    values: &[f64],
    original_values: Option<&[f64]>,
    var_name: &str,
    level: MeasurementLevel,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    if values.is_empty() {
        return Err("No data to plot".into());
    }
    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let (upper, lower) = root.split_vertically((PLOT_HEIGHT as f64 * 0.7) as u32);

    let ordinal = level == MeasurementLevel::Ordinal;
    let title = if ordinal {
        "Histogram of rank data with individual data and boxplot"
    } else {
        "Histogram with individual data and boxplot"
    };

    let (freq, edges) = histogram(values, histogram_bin_count(values));
    let max_freq = freq.iter().max().copied().unwrap_or(1) as f64;
    let (x_min, x_max) = calculate_range(edges[0], edges[edges.len() - 1]);
    let x_range = x_min..x_max;

    // Upper panel: bars plus per-value case ticks.
    {
        let y_range = 0.0f64..max_freq * 1.15;
        let mut chart = ChartBuilder::on(&upper)
            .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE))
            .margin(5)
            .x_label_area_size(10)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range.clone(), y_range)?;
        chart
            .configure_mesh()
            .y_desc("Frequency")
            .x_labels(0)
            .y_labels(5)
            .light_line_style(WHITE.mix(0.7))
            .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
            .draw()?;

        chart.draw_series(freq.iter().enumerate().map(|(i, &count)| {
            Rectangle::new(
                [(edges[i], 0.0), (edges[i + 1], count as f64)],
                COLOR_PRIMARY.filled(),
            )
        }))?;

        // Individual data: one tick per distinct value, its height scaled by
        // the case count relative to the tallest bin.
        let counts = value_counts(values);
        let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(1);
        for (value, count) in &counts {
            let tick_height = *count as f64 * (max_freq / max_count as f64) / CASE_TICK_FRACTION;
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
    }

    // Lower panel: boxplot sharing the x axis.
    {
        let stats = box_stats(values);
        let y_range = 0.0f64..2.0f64;
        let sorted_originals = original_values.map(sorted_copy);
        let mut chart = ChartBuilder::on(&lower)
            .margin(5)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range.clone(), y_range.clone())?;
        chart
            .configure_mesh()
            .x_desc(if ordinal {
                format!("Rank of {}", var_name)
            } else {
                var_name.to_string()
            })
            .x_labels(10)
            .y_labels(0)
            .disable_y_mesh()
            .x_label_formatter(&|x| {
                if ordinal {
                    rank_tick_label(*x, sorted_originals.as_deref())
                } else {
                    format!("{:.1}", x)
                }
            })
            .light_line_style(WHITE.mix(0.7))
            .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
            .draw()?;

        draw_boxplot_horizontal(&mut chart, 1.0, 0.8, &stats, COLOR_PRIMARY)?;

        if ordinal {
            draw_spines(
                &mut chart,
                &x_range,
                &y_range,
                MeasurementLevel::Ordinal,
                MeasurementLevel::Interval,
                COLOR_SPINE,
            )?;
        }
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bin_count() {
        // Few distinct values: one bin per value.
        assert_eq!(histogram_bin_count(&[1.0, 2.0, 2.0, 3.0]), 3);
        // Many distinct values: default bin count.
        let spread: Vec<f64> = (0..40).map(|i| i as f64).collect();
        assert_eq!(histogram_bin_count(&spread), HISTOGRAM_DEFAULT_BINS);
    }
}

// src/plot_functions/plot_histogram.rs

// src/plot_functions/plot_variable_pair.rs

use plotters::prelude::*;
use std::error::Error;

use crate::constants::{
    COLOR_PRIMARY, COLOR_SPINE, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, LINE_WIDTH_FIT,
    PLOT_HEIGHT, PLOT_WIDTH, POINT_RADIUS_UNIT,
};
use crate::data_analysis::descriptives::sorted_copy;
use crate::measurement::MeasurementLevel;
use crate::plot_framework::{
    calculate_range, draw_note, draw_reference_line, draw_spines, scale_collision_sizes,
};
use crate::plot_functions::plot_raw_data::rank_tick_label;

/// Collapse paired observations into distinct (x, y, frequency) triples.
pub fn pair_frequencies(x: &[f64], y: &[f64]) -> Vec<(f64, f64, f64)> {
    let mut triples: Vec<(f64, f64, f64)> = Vec::new();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        match triples.iter_mut().find(|(tx, ty, _)| *tx == xi && *ty == yi) {
            Some((_, _, freq)) => *freq += 1.0,
            None => triples.push((xi, yi, 1.0)),
        }
    }
    triples
}

/// Scatterplot of a variable pair with frequency-scaled markers.
/// Interval pairs get the fitted regression line; ordinal pairs arrive
/// rank-transformed and relabel their ticks with the original values.
#[allow(clippy::too_many_arguments)]
pub fn plot_variable_pair(
    x: &[f64],
    y: &[f64],
    x_name: &str,
    y_name: &str,
    level: MeasurementLevel,
    fit: Option<(f64, f64)>,
    x_originals: Option<&[f64]>,
    y_originals: Option<&[f64]>,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    if x.is_empty() || x.len() != y.len() {
        return Err("No paired data to plot".into());
    }
    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let triples = pair_frequencies(x, y);
    let freqs: Vec<f64> = triples.iter().map(|(_, _, f)| *f).collect();
    let (sizes, collision_note) = scale_collision_sizes(&freqs);

    let ordinal = level == MeasurementLevel::Ordinal;
    let (title, x_label, y_label) = if ordinal {
        (
            "Scatterplot of the rank of the variables",
            format!("Rank of {}", x_name),
            format!("Rank of {}", y_name),
        )
    } else {
        (
            "Scatterplot of the variables",
            x_name.to_string(),
            y_name.to_string(),
        )
    };

    let (x_range, y_range) = if ordinal {
        (0.0..x.len() as f64 + 1.0, 0.0..y.len() as f64 + 1.0)
    } else {
        let x_min = x.iter().cloned().fold(f64::INFINITY, f64::min);
        let x_max = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let y_min = y.iter().cloned().fold(f64::INFINITY, f64::min);
        let y_max = y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let (xa, xb) = calculate_range(x_min, x_max);
        let (ya, yb) = calculate_range(y_min, y_max);
        (xa..xb, ya..yb)
    };

    let sorted_x_originals = x_originals.map(sorted_copy);
    let sorted_y_originals = y_originals.map(sorted_copy);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_labels(10)
        .y_labels(10)
        .x_label_formatter(&|v| {
            if ordinal {
                rank_tick_label(*v, sorted_x_originals.as_deref())
            } else {
                format!("{:.1}", v)
            }
        })
        .y_label_formatter(&|v| {
            if ordinal {
                rank_tick_label(*v, sorted_y_originals.as_deref())
            } else {
                format!("{:.1}", v)
            }
        })
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    chart.draw_series(triples.iter().zip(sizes.iter()).map(|((xi, yi, _), size)| {
        let radius = (POINT_RADIUS_UNIT * size.sqrt()).round() as i32;
        Circle::new((*xi, *yi), radius, COLOR_PRIMARY.filled())
    }))?;

    if let (Some((slope, intercept)), false) = (fit, ordinal) {
        let fit_x0 = x.iter().cloned().fold(f64::INFINITY, f64::min);
        let fit_x1 = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        draw_reference_line(
            &mut chart,
            (fit_x0, slope * fit_x0 + intercept),
            (fit_x1, slope * fit_x1 + intercept),
            COLOR_PRIMARY,
            LINE_WIDTH_FIT,
        )?;
    }

    if ordinal {
        draw_spines(
            &mut chart,
            &x_range,
            &y_range,
            MeasurementLevel::Ordinal,
            MeasurementLevel::Ordinal,
            COLOR_SPINE,
        )?;
    }

    if let Some(max_cases) = collision_note {
        draw_note(
            &root,
            &format!("Largest sign on the graph displays {} cases.", max_cases),
        )?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_frequencies() {
        let x = [1.0, 1.0, 2.0, 1.0];
        let y = [5.0, 5.0, 6.0, 7.0];
        let triples = pair_frequencies(&x, &y);
        assert_eq!(triples.len(), 3);
        assert!(triples.contains(&(1.0, 5.0, 2.0)));
        assert!(triples.contains(&(2.0, 6.0, 1.0)));
        assert!(triples.contains(&(1.0, 7.0, 1.0)));
    }
}

// src/plot_functions/plot_variable_pair.rs

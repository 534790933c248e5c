// src/plot_functions/plot_raw_data.rs

use plotters::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::error::Error;

use crate::constants::{
    COLOR_PRIMARY, COLOR_SPINE, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, JITTER_SEED,
    PLOT_HEIGHT, PLOT_WIDTH, POINT_RADIUS_UNIT, RAW_CHART_HEIGHT_FRACTION,
};
use crate::data_analysis::descriptives::sorted_copy;
use crate::measurement::MeasurementLevel;
use crate::plot_framework::{calculate_range, clip_label, draw_spines, label_budget};

/// Strip chart of the raw values (or their ranks for ordinal variables) with
/// seeded vertical jitter so identical values stay visible.
pub fn plot_raw_data(
    values: &[f64],
    original_values: Option<&[f64]>,
    var_name: &str,
    level: MeasurementLevel,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    if values.is_empty() {
        return Err("No data to plot".into());
    }
    let height = (PLOT_HEIGHT as f64 * RAW_CHART_HEIGHT_FRACTION) as u32;
    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let ordinal = level == MeasurementLevel::Ordinal;
    let (title, x_label) = if ordinal {
        ("Rank of the raw data", format!("Rank of {}", var_name))
    } else {
        ("Raw data", var_name.to_string())
    };

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (x_min, x_max) = calculate_range(min, max);
    let x_range = x_min..x_max;
    let y_range = -1.5f64..2.5f64;

    let sorted_originals = original_values.map(sorted_copy);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(20)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;
    chart
        .configure_mesh()
        .x_desc(x_label)
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

    let mut rng = SmallRng::seed_from_u64(JITTER_SEED);
    chart.draw_series(values.iter().map(|&x| {
        let jitter: f64 = rng.random();
        Circle::new((x, jitter), POINT_RADIUS_UNIT as i32, COLOR_PRIMARY.filled())
    }))?;

    if ordinal {
        draw_spines(
            &mut chart,
            &x_range,
            &y_range,
            MeasurementLevel::Ordinal,
            MeasurementLevel::Nominal,
            COLOR_SPINE,
        )?;
    }

    root.present()?;
    Ok(())
}

/// Tick label for ranked axes: the rank with the value it stands for, as in
/// `3 (2.85)`. Falls back to the plain coordinate off the rank grid.
pub fn rank_tick_label(coordinate: f64, sorted_originals: Option<&[f64]>) -> String {
    if let Some(originals) = sorted_originals {
        let rank = coordinate.round();
        if (coordinate - rank).abs() < 1e-6 && rank >= 1.0 && (rank as usize) <= originals.len() {
            return format!("{} ({})", rank as usize, originals[rank as usize - 1]);
        }
    }
    format!("{:.0}", coordinate)
}

/// Frequency bar chart, the raw-data view of a nominal variable.
pub fn plot_frequency_bars(
    categories: &[(String, usize)],
    var_name: &str,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    if categories.is_empty() {
        return Err("No data to plot".into());
    }
    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_freq = categories.iter().map(|(_, f)| *f).max().unwrap_or(1) as f64;
    let x_range = -0.2f64..categories.len() as f64 + 0.2;
    let y_range = 0.0f64..max_freq * 1.15;

    let budget = label_budget(categories.len());
    let labels: Vec<String> = categories
        .iter()
        .map(|(name, _)| clip_label(name, budget))
        .collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Histogram", ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;
    chart
        .configure_mesh()
        .x_desc(var_name)
        .y_desc("Frequency")
        .x_labels(categories.len())
        .y_labels(5)
        .x_label_formatter(&|x| {
            let index = (x - 0.5).round();
            if (x - (index + 0.5)).abs() < 0.26 && index >= 0.0 && (index as usize) < labels.len() {
                labels[index as usize].clone()
            } else {
                String::new()
            }
        })
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    chart.draw_series(categories.iter().enumerate().map(|(i, (_, freq))| {
        Rectangle::new(
            [(i as f64 + 0.05, 0.0), (i as f64 + 0.95, *freq as f64)],
            COLOR_PRIMARY.filled(),
        )
    }))?;

    draw_spines(
        &mut chart,
        &x_range,
        &y_range,
        MeasurementLevel::Nominal,
        MeasurementLevel::Interval,
        COLOR_SPINE,
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_tick_label() {
        let originals = [2.8545, 3.11, 1.0];
        let sorted = crate::data_analysis::descriptives::sorted_copy(&originals);
        assert_eq!(rank_tick_label(1.0, Some(&sorted)), "1 (1)");
        assert_eq!(rank_tick_label(3.0, Some(&sorted)), "3 (3.11)");
        // Off the rank grid falls back to the plain coordinate.
        assert_eq!(rank_tick_label(4.0, Some(&sorted)), "4");
        assert_eq!(rank_tick_label(2.0, None), "2");
    }
}

// src/plot_functions/plot_raw_data.rs

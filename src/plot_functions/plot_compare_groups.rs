// src/plot_functions/plot_compare_groups.rs

use plotters::prelude::*;
use std::error::Error;

use crate::constants::{
    COLOR_INDIVIDUAL, COLOR_PRIMARY, COLOR_SPINE, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE,
    PLOT_HEIGHT, PLOT_WIDTH, POINT_RADIUS_UNIT,
};
use crate::data_analysis::descriptives::{box_stats, sorted_copy, value_counts};
use crate::measurement::MeasurementLevel;
use crate::plot_framework::{
    calculate_range, clip_label, draw_boxplot, draw_error_bar, draw_note, draw_spines,
    label_budget, scale_collision_sizes,
};
use crate::plot_functions::plot_raw_data::rank_tick_label;

/// Per-group boxplots with frequency-scaled individual data points.
/// In the ranked variant the values are pooled ranks and the y ticks are
/// relabeled with the original values.
#[allow(clippy::too_many_arguments)]
pub fn plot_group_boxplots(
    groups: &[Vec<f64>],
    group_labels: &[String],
    dep_label: &str,
    axis_label: &str,
    show_boxplots: bool,
    ranked: bool,
    pooled_originals: Option<&[f64]>,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    let k = groups.len();
    if k == 0 || groups.iter().any(|g| g.is_empty()) {
        return Err("No group data to plot".into());
    }
    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let title = match (show_boxplots, ranked) {
        (true, false) => "Boxplots and individual data of the groups",
        (true, true) => "Boxplots and individual data of the rank data of the groups",
        (false, false) => "Individual data of the groups",
        (false, true) => "Individual data of the rank data of the groups",
    };

    let all_min = groups
        .iter()
        .flatten()
        .cloned()
        .fold(f64::INFINITY, f64::min);
    let all_max = groups
        .iter()
        .flatten()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let (y_min, y_max) = calculate_range(all_min, all_max);
    let x_range = 0.5f64..k as f64 + 0.5;
    let y_range = y_min..y_max;

    let budget = label_budget(k);
    let labels: Vec<String> = group_labels.iter().map(|l| clip_label(l, budget)).collect();
    let sorted_originals = pooled_originals.map(sorted_copy);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;
    chart
        .configure_mesh()
        .x_desc(axis_label)
        .y_desc(dep_label)
        .x_labels(k)
        .y_labels(10)
        .x_label_formatter(&|x| {
            let index = x.round();
            if (x - index).abs() < 1e-6 && index >= 1.0 && (index as usize) <= labels.len() {
                labels[index as usize - 1].clone()
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|y| {
            if ranked {
                rank_tick_label(*y, sorted_originals.as_deref())
            } else {
                format!("{:.1}", y)
            }
        })
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    if show_boxplots {
        for (i, group) in groups.iter().enumerate() {
            draw_boxplot(
                &mut chart,
                i as f64 + 1.0,
                0.5,
                &box_stats(group),
                COLOR_PRIMARY,
            )?;
        }
    }

    // Individual data, sized by how many cases share a value.
    let mut largest: Option<usize> = None;
    for (i, group) in groups.iter().enumerate() {
        let counts = value_counts(group);
        let freqs: Vec<f64> = counts.iter().map(|(_, c)| *c as f64).collect();
        let (sizes, note) = scale_collision_sizes(&freqs);
        if let Some(cases) = note {
            largest = Some(largest.map_or(cases, |l: usize| l.max(cases)));
        }
        chart.draw_series(counts.iter().zip(sizes.iter()).map(|((value, _), size)| {
            let radius = (POINT_RADIUS_UNIT * size.sqrt()).round() as i32;
            Circle::new((i as f64 + 1.0, *value), radius, COLOR_INDIVIDUAL.filled())
        }))?;
    }

    draw_spines(
        &mut chart,
        &x_range,
        &y_range,
        MeasurementLevel::Nominal,
        if ranked {
            MeasurementLevel::Ordinal
        } else {
            MeasurementLevel::Interval
        },
        COLOR_SPINE,
    )?;

    if let Some(cases) = largest {
        draw_note(
            &root,
            &format!("Largest individual sign displays {} cases.", cases),
        )?;
    }

    root.present()?;
    Ok(())
}

/// Group means (or medians) as bars, with confidence-interval whiskers when
/// supplied. Used for both the compare-groups and the repeated-measures
/// population views.
pub fn plot_group_value_bars(
    values: &[f64],
    intervals: Option<&[(f64, f64)]>,
    labels: &[String],
    axis_label: &str,
    dep_name: &str,
    title: &str,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    let k = values.len();
    if k == 0 {
        return Err("No group data to plot".into());
    }
    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut extent_min = values.iter().cloned().fold(0.0f64, f64::min);
    let mut extent_max = values.iter().cloned().fold(0.0f64, f64::max);
    if let Some(intervals) = intervals {
        for &(low, high) in intervals {
            extent_min = extent_min.min(low);
            extent_max = extent_max.max(high);
        }
    }
    let (y_min, y_max) = calculate_range(extent_min, extent_max);
    let x_range = 0.5f64..k as f64 + 0.5;
    let y_range = y_min..y_max;

    let budget = label_budget(k);
    let clipped: Vec<String> = labels.iter().map(|l| clip_label(l, budget)).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;
    chart
        .configure_mesh()
        .x_desc(axis_label)
        .y_desc(dep_name)
        .x_labels(k)
        .y_labels(10)
        .x_label_formatter(&|x| {
            let index = x.round();
            if (x - index).abs() < 1e-6 && index >= 1.0 && (index as usize) <= clipped.len() {
                clipped[index as usize - 1].clone()
            } else {
                String::new()
            }
        })
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, &value)| {
        Rectangle::new(
            [(i as f64 + 0.75, 0.0), (i as f64 + 1.25, value)],
            COLOR_PRIMARY.filled(),
        )
    }))?;
    if let Some(intervals) = intervals {
        for (i, &(low, high)) in intervals.iter().enumerate() {
            draw_error_bar(&mut chart, i as f64 + 1.0, low, high, 0.08, &BLACK)?;
        }
    }

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

// src/plot_functions/plot_compare_groups.rs

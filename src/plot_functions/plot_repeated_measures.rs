// src/plot_functions/plot_repeated_measures.rs

use plotters::prelude::*;
use std::error::Error;

use crate::constants::{
    COLOR_INDIVIDUAL, COLOR_PRIMARY, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, PLOT_HEIGHT,
    PLOT_WIDTH,
};
use crate::data_analysis::descriptives::box_stats;
use crate::plot_framework::{
    calculate_range, clip_label, draw_boxplot, draw_note, label_budget, scale_collision_sizes,
};
use crate::plot_functions::plot_variable_pair::pair_frequencies;

/// Case lines between adjacent repeated-measures variables, with line widths
/// scaled by how many cases share a trajectory, plus per-variable boxplots.
pub fn plot_repeated_measures(
    variables: &[Vec<f64>],
    var_names: &[String],
    show_boxplots: bool,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    let k = variables.len();
    if k < 2 || variables.iter().any(|v| v.is_empty()) {
        return Err("No repeated-measures data to plot".into());
    }
    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let title = if show_boxplots {
        "Boxplots and individual data of the variables"
    } else {
        "Individual data of the variables"
    };

    let all_min = variables
        .iter()
        .flatten()
        .cloned()
        .fold(f64::INFINITY, f64::min);
    let all_max = variables
        .iter()
        .flatten()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let (y_min, y_max) = calculate_range(all_min, all_max);
    let x_range = 0.5f64..k as f64 + 0.5;

    let budget = label_budget(k);
    let labels: Vec<String> = var_names.iter().map(|n| clip_label(n, budget)).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_min..y_max)?;
    chart
        .configure_mesh()
        .y_desc("Value")
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
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    // Case trajectories between each adjacent variable pair.
    let mut thickest: Option<usize> = None;
    for i in 0..k - 1 {
        let triples = pair_frequencies(&variables[i], &variables[i + 1]);
        let freqs: Vec<f64> = triples.iter().map(|(_, _, f)| *f).collect();
        let (widths, note) = scale_collision_sizes(&freqs);
        if let Some(cases) = note {
            thickest = Some(thickest.map_or(cases, |t: usize| t.max(cases)));
        }
        for ((from, to, _), width) in triples.iter().zip(widths.iter()) {
            chart.draw_series(LineSeries::new(
                vec![(i as f64 + 1.0, *from), (i as f64 + 2.0, *to)],
                COLOR_INDIVIDUAL.stroke_width(width.round() as u32),
            ))?;
        }
    }

    if show_boxplots {
        for (i, values) in variables.iter().enumerate() {
            draw_boxplot(
                &mut chart,
                i as f64 + 1.0,
                0.5,
                &box_stats(values),
                COLOR_PRIMARY,
            )?;
        }
    }

    if let Some(cases) = thickest {
        draw_note(&root, &format!("Thickest line displays {} cases.", cases))?;
    }

    root.present()?;
    Ok(())
}

// src/plot_functions/plot_repeated_measures.rs

// src/analyses/explore_variable.rs

use std::error::Error;
use std::path::PathBuf;

use crate::analyses::chart_path;
use crate::constants::ALPHA_LEVEL;
use crate::data_analysis::descriptives::{
    box_stats, kurtosis, mean, median, rankdata, skewness, std_pop, std_sample, value_counts,
};
use crate::data_analysis::normality::shapiro_wilk;
use crate::data_analysis::nonparametric::wilcoxon_one_sample;
use crate::data_analysis::parametric::{mean_ci, one_sample_t};
use crate::data_input::table_data::Table;
use crate::measurement::MeasurementLevel;
use crate::plot_functions::plot_histogram::plot_histogram;
use crate::plot_functions::plot_normality::{plot_normality_histogram, plot_qq};
use crate::plot_functions::plot_population::{plot_mean_ci_bar, plot_median_bar};
use crate::plot_functions::plot_raw_data::{plot_frequency_bars, plot_raw_data};
use crate::report::{
    ci_bracket, fmt_cell, fmt_number, html_table, rank_line, t_line, w_line, Fragment,
};

/// Explore a single variable: descriptives, assumption checks, population
/// estimation, and the one-sample test picked by the decision tree.
pub fn explore_variable(
    table: &Table,
    var_name: &str,
    show_frequencies: bool,
    central_value: f64,
    chart_root: Option<&str>,
) -> Result<Vec<Fragment>, Box<dyn Error>> {
    let level = table.level(var_name)?;
    match level {
        MeasurementLevel::Interval | MeasurementLevel::Unknown => {
            explore_interval(table, var_name, level, show_frequencies, central_value, chart_root)
        }
        MeasurementLevel::Ordinal => explore_ordinal(table, var_name, central_value, chart_root),
        MeasurementLevel::Nominal => explore_nominal(table, var_name, chart_root),
    }
}

fn counts_fragment(table: &Table, var_name: &str) -> Result<Fragment, Box<dyn Error>> {
    let column = table.column(var_name)?;
    Ok(Fragment::Text(format!(
        "N of valid cases: {}<br>N of missing cases: {}",
        column.n_valid(),
        column.n_missing()
    )))
}

fn frequency_table(values: &[f64]) -> Fragment {
    let mut rows = vec![vec!["Value".to_string(), "Freq".to_string()]];
    for (value, count) in value_counts(values) {
        rows.push(vec![fmt_number(value), count.to_string()]);
    }
    Fragment::Table(html_table(&rows))
}

fn explore_interval(
    table: &Table,
    var_name: &str,
    level: MeasurementLevel,
    show_frequencies: bool,
    central_value: f64,
    chart_root: Option<&str>,
) -> Result<Vec<Fragment>, Box<dyn Error>> {
    let values = table.numeric_values(var_name)?;
    if values.len() < 3 {
        return Err(format!("Not enough valid cases in variable '{}'", var_name).into());
    }
    let mut fragments = vec![Fragment::Text(format!(
        "<h3>Explore variable: {} ({})</h3>",
        var_name, level
    ))];
    if level == MeasurementLevel::Unknown {
        fragments.push(Fragment::Text(format!(
            "Measurement level of {} is unknown; treating it as interval.",
            var_name
        )));
    }
    fragments.push(counts_fragment(table, var_name)?);

    if let Some(root) = chart_root {
        let path = chart_path(root, "raw_data");
        plot_raw_data(&values, None, var_name, level, &path)?;
        fragments.push(Fragment::Chart(PathBuf::from(path)));
    }

    if show_frequencies {
        fragments.push(frequency_table(&values));
    }

    let stats = box_stats(&values);
    fragments.push(Fragment::Table(html_table(&[
        vec!["Mean".to_string(), fmt_cell(mean(&values))],
        vec!["Standard deviation".to_string(), fmt_cell(std_pop(&values))],
        vec!["Skewness".to_string(), fmt_cell(skewness(&values))],
        vec!["Kurtosis".to_string(), fmt_cell(kurtosis(&values))],
        vec![
            "Range".to_string(),
            fmt_cell(stats.maximum - stats.minimum),
        ],
        vec!["Maximum".to_string(), fmt_cell(stats.maximum)],
        vec!["Upper quartile".to_string(), fmt_cell(stats.upper_quartile)],
        vec!["Median".to_string(), fmt_cell(stats.median)],
        vec!["Lower quartile".to_string(), fmt_cell(stats.lower_quartile)],
        vec!["Minimum".to_string(), fmt_cell(stats.minimum)],
    ])));

    if let Some(root) = chart_root {
        let path = chart_path(root, "histogram");
        plot_histogram(&values, None, var_name, level, &path)?;
        fragments.push(Fragment::Chart(PathBuf::from(path)));
    }

    let (w, w_p) = shapiro_wilk(&values)?;
    fragments.push(Fragment::Text(format!(
        "Normality test of {}: {}",
        var_name,
        w_line(w, w_p)
    )));
    if let Some(root) = chart_root {
        let hist_path = chart_path(root, "normality");
        let qq_path = chart_path(root, "qq");
        plot_normality_histogram(&values, var_name, &hist_path)?;
        plot_qq(&values, var_name, &qq_path)?;
        fragments.push(Fragment::Chart(PathBuf::from(hist_path)));
        fragments.push(Fragment::Chart(PathBuf::from(qq_path)));
    }

    let (_, ci_low, ci_high) = mean_ci(&values, crate::constants::CONFIDENCE_LEVEL)?;
    fragments.push(Fragment::Text(format!(
        "Mean: {}, 95% confidence interval {}, standard deviation: {}",
        fmt_cell(mean(&values)),
        ci_bracket(ci_low, ci_high, 4),
        fmt_cell(std_sample(&values))
    )));
    if let Some(root) = chart_root {
        let path = chart_path(root, "population");
        plot_mean_ci_bar(mean(&values), ci_low, ci_high, var_name, &path)?;
        fragments.push(Fragment::Chart(PathBuf::from(path)));
    }

    // Hypothesis test: one-sample t when the sample looks normal, Wilcoxon
    // signed-rank otherwise.
    if w_p >= ALPHA_LEVEL {
        let test = one_sample_t(&values, central_value)?;
        fragments.push(Fragment::Text(format!(
            "One-sample t-test against {}: {}",
            fmt_number(central_value),
            t_line(test.statistic, test.df, test.p)
        )));
    } else {
        let test = wilcoxon_one_sample(&values, central_value)?;
        fragments.push(Fragment::Text(format!(
            "Wilcoxon signed-rank test against {}: {}",
            fmt_number(central_value),
            rank_line("T", test.statistic, test.p)
        )));
    }
    Ok(fragments)
}

fn explore_ordinal(
    table: &Table,
    var_name: &str,
    central_value: f64,
    chart_root: Option<&str>,
) -> Result<Vec<Fragment>, Box<dyn Error>> {
    let values = table.numeric_values(var_name)?;
    if values.len() < 3 {
        return Err(format!("Not enough valid cases in variable '{}'", var_name).into());
    }
    let mut fragments = vec![Fragment::Text(format!(
        "<h3>Explore variable: {} (ordinal)</h3>",
        var_name
    ))];
    fragments.push(counts_fragment(table, var_name)?);

    let ranks = rankdata(&values);
    if let Some(root) = chart_root {
        let path = chart_path(root, "raw_data");
        plot_raw_data(&ranks, Some(&values), var_name, MeasurementLevel::Ordinal, &path)?;
        fragments.push(Fragment::Chart(PathBuf::from(path)));
    }

    // Ordinal variables only report the order statistics.
    let stats = box_stats(&values);
    fragments.push(Fragment::Table(html_table(&[
        vec!["Maximum".to_string(), fmt_cell(stats.maximum)],
        vec!["Upper quartile".to_string(), fmt_cell(stats.upper_quartile)],
        vec!["Median".to_string(), fmt_cell(stats.median)],
        vec!["Lower quartile".to_string(), fmt_cell(stats.lower_quartile)],
        vec!["Minimum".to_string(), fmt_cell(stats.minimum)],
    ])));

    if let Some(root) = chart_root {
        let path = chart_path(root, "histogram");
        plot_histogram(&ranks, Some(&values), var_name, MeasurementLevel::Ordinal, &path)?;
        fragments.push(Fragment::Chart(PathBuf::from(path)));
    }

    fragments.push(Fragment::Text(format!(
        "Median: {}",
        fmt_cell(median(&values))
    )));
    if let Some(root) = chart_root {
        let path = chart_path(root, "population");
        plot_median_bar(median(&values), var_name, &path)?;
        fragments.push(Fragment::Chart(PathBuf::from(path)));
    }

    let test = wilcoxon_one_sample(&values, central_value)?;
    fragments.push(Fragment::Text(format!(
        "Wilcoxon signed-rank test against {}: {}",
        fmt_number(central_value),
        rank_line("T", test.statistic, test.p)
    )));
    Ok(fragments)
}

fn explore_nominal(
    table: &Table,
    var_name: &str,
    chart_root: Option<&str>,
) -> Result<Vec<Fragment>, Box<dyn Error>> {
    let column = table.column(var_name)?;
    let mut fragments = vec![Fragment::Text(format!(
        "<h3>Explore variable: {} (nominal)</h3>",
        var_name
    ))];
    fragments.push(counts_fragment(table, var_name)?);

    // Frequency table over the category levels.
    let levels = table.category_levels(var_name)?;
    let mut rows = vec![vec!["Value".to_string(), "Freq".to_string()]];
    let mut categories = Vec::new();
    for level in &levels {
        let count = column
            .raw
            .iter()
            .flatten()
            .filter(|cell| *cell == level)
            .count();
        rows.push(vec![level.clone(), count.to_string()]);
        categories.push((level.clone(), count));
    }
    fragments.push(Fragment::Table(html_table(&rows)));

    if let Some(root) = chart_root {
        let path = chart_path(root, "raw_data");
        plot_frequency_bars(&categories, var_name, &path)?;
        fragments.push(Fragment::Chart(PathBuf::from(path)));
    }
    Ok(fragments)
}

// src/analyses/explore_variable.rs

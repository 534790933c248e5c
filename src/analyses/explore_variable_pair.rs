// src/analyses/explore_variable_pair.rs

use std::error::Error;
use std::path::PathBuf;

use crate::analyses::{chart_path, effective_level};
use crate::data_analysis::categorical::{chi_square_independence, crosstab};
use crate::data_analysis::correlation::{fisher_ci, linear_regression, pearson, spearman};
use crate::data_analysis::descriptives::rankdata;
use crate::data_input::table_data::Table;
use crate::measurement::MeasurementLevel;
use crate::plot_functions::plot_mosaic::plot_mosaic;
use crate::plot_functions::plot_variable_pair::plot_variable_pair;
use crate::report::{chi2_line, ci_bracket, fmt_effect, fmt_p, html_table, Fragment};

/// Explore the association of a variable pair: regression and correlations
/// for quantitative pairs, contingency analysis for nominal ones.
pub fn explore_variable_pair(
    table: &Table,
    x_name: &str,
    y_name: &str,
    chart_root: Option<&str>,
) -> Result<Vec<Fragment>, Box<dyn Error>> {
    let level = effective_level(&[table.level(x_name)?, table.level(y_name)?]);
    let mut fragments = vec![Fragment::Text(format!(
        "<h3>Explore variable pair: {}, {}</h3>",
        x_name, y_name
    ))];

    if level == MeasurementLevel::Nominal {
        let (labels, dropped) = table.complete_label_cases(&[x_name, y_name])?;
        fragments.push(Fragment::Text(format!(
            "N of valid pairs: {}<br>N of missing pairs: {}",
            labels[0].len(),
            dropped
        )));
        // Rows are the second variable, columns the first.
        let contingency = crosstab(&labels[1], &labels[0])?;
        let mut rows = Vec::with_capacity(contingency.row_levels.len() + 1);
        let mut header = vec![String::new()];
        header.extend(contingency.col_levels.iter().cloned());
        rows.push(header);
        for (i, row_level) in contingency.row_levels.iter().enumerate() {
            let mut row = vec![row_level.clone()];
            for j in 0..contingency.col_levels.len() {
                row.push(format!("{:.0}", contingency.counts[[i, j]]));
            }
            rows.push(row);
        }
        fragments.push(Fragment::Table(html_table(&rows)));

        if let Some(root) = chart_root {
            let path = chart_path(root, "mosaic");
            match plot_mosaic(
                &contingency,
                x_name,
                y_name,
                "Mosaic plot of the variables",
                &path,
            ) {
                Ok(()) => fragments.push(Fragment::Chart(PathBuf::from(path))),
                Err(e) => {
                    eprintln!("Warning: mosaic plot failed: {}", e);
                    fragments.push(Fragment::Text(
                        "Sorry, the mosaic plot cannot be drawn with these data.".to_string(),
                    ));
                }
            }
        }

        let chi2 = chi_square_independence(&contingency)?;
        fragments.push(Fragment::Text(format!(
            "Cramer's V measure of association: &phi;<i><sub>c</sub></i> = {}",
            fmt_effect(chi2.cramers_v)
        )));
        fragments.push(Fragment::Text(format!(
            "Chi-squared test of independence: {}",
            chi2_line(chi2.statistic, chi2.df, chi2.n, chi2.p)
        )));
        return Ok(fragments);
    }

    let (values, dropped) = table.complete_numeric_cases(&[x_name, y_name])?;
    let (xs, ys) = (&values[0], &values[1]);
    let n = xs.len();
    if n < 4 {
        return Err("Not enough complete pairs for the pair analysis".into());
    }
    fragments.push(Fragment::Text(format!(
        "N of valid pairs: {}<br>N of missing pairs: {}",
        n, dropped
    )));

    match level {
        MeasurementLevel::Interval | MeasurementLevel::Unknown => {
            let (slope, intercept) = linear_regression(xs, ys)?;
            let sign = if intercept < 0.0 { "-" } else { "+" };
            fragments.push(Fragment::Text(format!(
                "Linear regression: y = {:.3}x {} {:.3}",
                slope,
                sign,
                intercept.abs()
            )));
            if let Some(root) = chart_root {
                let path = chart_path(root, "scatter");
                plot_variable_pair(
                    xs,
                    ys,
                    x_name,
                    y_name,
                    level,
                    Some((slope, intercept)),
                    None,
                    None,
                    &path,
                )?;
                fragments.push(Fragment::Chart(PathBuf::from(path)));
            }

            let r = pearson(xs, ys)?;
            let (r_low, r_high) = fisher_ci(r.r, n, crate::constants::CONFIDENCE_LEVEL)?;
            fragments.push(Fragment::Text(format!(
                "Pearson's correlation: <i>r</i>({}) = {}, 95% confidence interval {}, <i>p</i> {}",
                r.df as usize,
                fmt_effect(r.r),
                ci_bracket(r_low, r_high, 3),
                fmt_p(r.p)
            )));

            let rs = spearman(xs, ys)?;
            let (rs_low, rs_high) = fisher_ci(rs.r, n, crate::constants::CONFIDENCE_LEVEL)?;
            fragments.push(Fragment::Text(format!(
                "Spearman's rank-order correlation: <i>r<sub>s</sub></i>({}) = {}, \
                 95% confidence interval {}, <i>p</i> {}",
                rs.df as usize,
                fmt_effect(rs.r),
                ci_bracket(rs_low, rs_high, 3),
                fmt_p(rs.p)
            )));
        }
        MeasurementLevel::Ordinal => {
            if let Some(root) = chart_root {
                let path = chart_path(root, "scatter");
                plot_variable_pair(
                    &rankdata(xs),
                    &rankdata(ys),
                    x_name,
                    y_name,
                    MeasurementLevel::Ordinal,
                    None,
                    Some(xs),
                    Some(ys),
                    &path,
                )?;
                fragments.push(Fragment::Chart(PathBuf::from(path)));
            }
            let rs = spearman(xs, ys)?;
            let (rs_low, rs_high) = fisher_ci(rs.r, n, crate::constants::CONFIDENCE_LEVEL)?;
            fragments.push(Fragment::Text(format!(
                "Spearman's rank-order correlation: <i>r<sub>s</sub></i>({}) = {}, \
                 95% confidence interval {}, <i>p</i> {}",
                rs.df as usize,
                fmt_effect(rs.r),
                ci_bracket(rs_low, rs_high, 3),
                fmt_p(rs.p)
            )));
        }
        MeasurementLevel::Nominal => unreachable!("handled above"),
    }
    Ok(fragments)
}

// src/analyses/explore_variable_pair.rs

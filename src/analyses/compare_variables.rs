// src/analyses/compare_variables.rs

use ndarray::Array2;
use std::error::Error;
use std::path::PathBuf;

use crate::analyses::{chart_path, effective_level};
use crate::constants::{ALPHA_LEVEL, CONFIDENCE_LEVEL};
use crate::data_analysis::categorical::{cochran_q, crosstab, mcnemar};
use crate::data_analysis::descriptives::{mean, median};
use crate::data_analysis::nonparametric::{friedman, wilcoxon_signed_rank};
use crate::data_analysis::normality::shapiro_wilk;
use crate::data_analysis::parametric::{
    mauchly_sphericity, mean_ci, paired_t, pairwise_paired_t, rm_anova,
};
use crate::data_input::table_data::Table;
use crate::measurement::MeasurementLevel;
use crate::plot_functions::plot_compare_groups::plot_group_value_bars;
use crate::plot_functions::plot_mosaic::plot_mosaic;
use crate::plot_functions::plot_repeated_measures::plot_repeated_measures;
use crate::report::{
    chi2_line, f_line, fmt_cell, html_table, q_line, rank_line, t_line, w_line, Fragment,
};

/// Compare repeated-measures variables: normality and sphericity checks
/// route to the paired t / repeated-measures ANOVA, or to the rank and
/// dichotomous alternatives.
pub fn compare_variables(
    table: &Table,
    var_names: &[&str],
    chart_root: Option<&str>,
) -> Result<Vec<Fragment>, Box<dyn Error>> {
    let k = var_names.len();
    if k < 2 {
        return Err("Comparing variables needs at least 2 variables".into());
    }
    let levels: Result<Vec<_>, _> = var_names.iter().map(|&v| table.level(v)).collect();
    let level = effective_level(&levels?);

    let mut fragments = vec![Fragment::Text(format!(
        "<h3>Compare repeated measures variables: {}</h3>",
        var_names.join(", ")
    ))];

    if level == MeasurementLevel::Nominal {
        return compare_nominal_variables(table, var_names, fragments, chart_root);
    }

    let (variables, dropped) = table.complete_numeric_cases(var_names)?;
    let n = variables[0].len();
    if n < 3 {
        return Err("Not enough complete cases to compare the variables".into());
    }
    fragments.push(Fragment::Text(format!(
        "N of valid cases: {}<br>N of missing cases: {}",
        n, dropped
    )));

    let quantitative = matches!(
        level,
        MeasurementLevel::Interval | MeasurementLevel::Unknown
    );

    // Descriptive row: means for interval data, medians for ordinal.
    let mut header = vec![String::new()];
    header.extend(var_names.iter().map(|v| v.to_string()));
    let stat_row = if quantitative {
        let mut row = vec!["Mean".to_string()];
        row.extend(variables.iter().map(|v| fmt_cell(mean(v))));
        row
    } else {
        let mut row = vec!["Median".to_string()];
        row.extend(variables.iter().map(|v| fmt_cell(median(v))));
        row
    };
    fragments.push(Fragment::Table(html_table(&[header, stat_row])));

    if let Some(root) = chart_root {
        let names: Vec<String> = var_names.iter().map(|v| v.to_string()).collect();
        let sample_path = chart_path(root, "sample");
        plot_repeated_measures(&variables, &names, true, &sample_path)?;
        fragments.push(Fragment::Chart(PathBuf::from(sample_path)));

        let population_path = chart_path(root, "population");
        if quantitative {
            let means: Vec<f64> = variables.iter().map(|v| mean(v)).collect();
            let mut intervals = Vec::with_capacity(variables.len());
            for v in &variables {
                let (_, low, high) = mean_ci(v, CONFIDENCE_LEVEL)?;
                intervals.push((low, high));
            }
            plot_group_value_bars(
                &means,
                Some(&intervals),
                &names,
                "",
                "Value",
                "Means and 95% confidence intervals for the variables",
                &population_path,
            )?;
        } else {
            let medians: Vec<f64> = variables.iter().map(|v| median(v)).collect();
            plot_group_value_bars(
                &medians,
                None,
                &names,
                "",
                "Value",
                "Medians for the variables",
                &population_path,
            )?;
        }
        fragments.push(Fragment::Chart(PathBuf::from(population_path)));
    }

    if quantitative {
        if k == 2 {
            // Normality is checked on the differences.
            let diffs: Vec<f64> = variables[0]
                .iter()
                .zip(variables[1].iter())
                .map(|(a, b)| a - b)
                .collect();
            let (w, w_p) = shapiro_wilk(&diffs)?;
            fragments.push(Fragment::Text(format!(
                "Normality test of the difference: {}",
                w_line(w, w_p)
            )));
            if w_p >= ALPHA_LEVEL {
                let test = paired_t(&variables[0], &variables[1])?;
                fragments.push(Fragment::Text(format!(
                    "Paired samples t-test: {}",
                    t_line(test.statistic, test.df, test.p)
                )));
            } else {
                let test = wilcoxon_signed_rank(&variables[0], &variables[1])?;
                fragments.push(Fragment::Text(format!(
                    "Wilcoxon signed-rank test: {}",
                    rank_line("T", test.statistic, test.p)
                )));
            }
        } else {
            // Per-variable normality decides between the ANOVA and Friedman.
            let mut normality_lines = Vec::with_capacity(k);
            let mut all_normal = true;
            for (name, values) in var_names.iter().zip(variables.iter()) {
                let (w, w_p) = shapiro_wilk(values)?;
                if w_p < ALPHA_LEVEL {
                    all_normal = false;
                }
                normality_lines.push(format!("{}: {}", name, w_line(w, w_p)));
            }
            fragments.push(Fragment::Text(normality_lines.join("<br>")));

            if all_normal {
                let data =
                    Array2::from_shape_fn((n, k), |(row, col)| variables[col][row]);
                let sphericity = mauchly_sphericity(&data)?;
                fragments.push(Fragment::Text(format!(
                    "Mauchly's test of sphericity: {}",
                    w_line(sphericity.w, sphericity.p)
                )));
                let anova = rm_anova(&data, sphericity.epsilon)?;
                if sphericity.p >= ALPHA_LEVEL {
                    let f = anova.uncorrected;
                    fragments.push(Fragment::Text(format!(
                        "Repeated measures ANOVA: {}",
                        f_line(f.statistic, f.df1, f.df2, f.p)
                    )));
                } else {
                    let f = anova.corrected;
                    fragments.push(Fragment::Text(format!(
                        "Sphericity is violated, Greenhouse-Geisser corrected \
                         repeated measures ANOVA: {}",
                        f_line(f.statistic, f.df1, f.df2, f.p)
                    )));
                }
                // Pairwise post-hoc comparisons.
                let posthoc_lines: Vec<String> = pairwise_paired_t(&variables)?
                    .into_iter()
                    .map(|(i, j, test)| {
                        format!(
                            "{} - {}: {}",
                            var_names[i],
                            var_names[j],
                            t_line(test.statistic, test.df, test.p)
                        )
                    })
                    .collect();
                fragments.push(Fragment::Text(posthoc_lines.join("<br>")));
            } else {
                let data =
                    Array2::from_shape_fn((n, k), |(row, col)| variables[col][row]);
                let test = friedman(&data)?;
                fragments.push(Fragment::Text(format!(
                    "Friedman test: {}",
                    chi2_line(test.statistic, test.df, test.n, test.p)
                )));
            }
        }
    } else {
        // Ordinal: rank tests only.
        if k == 2 {
            let test = wilcoxon_signed_rank(&variables[0], &variables[1])?;
            fragments.push(Fragment::Text(format!(
                "Wilcoxon signed-rank test: {}",
                rank_line("T", test.statistic, test.p)
            )));
        } else {
            let data = Array2::from_shape_fn((n, k), |(row, col)| variables[col][row]);
            let test = friedman(&data)?;
            fragments.push(Fragment::Text(format!(
                "Friedman test: {}",
                chi2_line(test.statistic, test.df, test.n, test.p)
            )));
        }
    }
    Ok(fragments)
}

fn compare_nominal_variables(
    table: &Table,
    var_names: &[&str],
    mut fragments: Vec<Fragment>,
    chart_root: Option<&str>,
) -> Result<Vec<Fragment>, Box<dyn Error>> {
    let (labels, dropped) = table.complete_label_cases(var_names)?;
    let n = labels[0].len();
    fragments.push(Fragment::Text(format!(
        "N of valid cases: {}<br>N of missing cases: {}",
        n, dropped
    )));

    if var_names.len() == 2 {
        let contingency = crosstab(&labels[0], &labels[1])?;
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
                var_names[1],
                var_names[0],
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

        let (chi2, total, p) = mcnemar(&contingency)?;
        fragments.push(Fragment::Text(format!(
            "McNemar test: {}",
            chi2_line(chi2, 1.0, total, p)
        )));
    } else {
        // Three or more dichotomous variables: Cochran's Q.
        let (variables, _) = table.complete_numeric_cases(var_names)?;
        let n = variables[0].len();
        let data = Array2::from_shape_fn((n, var_names.len()), |(row, col)| {
            variables[col][row]
        });
        if let Some(root) = chart_root {
            for i in 0..var_names.len() {
                for j in i + 1..var_names.len() {
                    let contingency = crosstab(&labels[i], &labels[j])?;
                    let path = chart_path(root, &format!("mosaic_{}_{}", i, j));
                    match plot_mosaic(
                        &contingency,
                        var_names[j],
                        var_names[i],
                        "Mosaic plot of the variables",
                        &path,
                    ) {
                        Ok(()) => fragments.push(Fragment::Chart(PathBuf::from(path))),
                        Err(e) => {
                            eprintln!("Warning: mosaic plot failed: {}", e);
                            fragments.push(Fragment::Text(
                                "Sorry, the mosaic plot cannot be drawn with these data."
                                    .to_string(),
                            ));
                        }
                    }
                }
            }
        }
        let (q, df, total, p) = cochran_q(&data)?;
        fragments.push(Fragment::Text(format!(
            "Cochran's Q test: {}",
            q_line(q, df, total, p)
        )));
    }
    Ok(fragments)
}

// src/analyses/compare_variables.rs

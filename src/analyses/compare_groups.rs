// src/analyses/compare_groups.rs

use std::error::Error;
use std::path::PathBuf;

use crate::analyses::chart_path;
use crate::constants::{ALPHA_LEVEL, CONFIDENCE_LEVEL};
use crate::data_analysis::categorical::{chi_square_independence, crosstab};
use crate::data_analysis::descriptives::{box_stats, mean, median, rankdata, std_pop};
use crate::data_analysis::nonparametric::{kruskal_wallis, mann_whitney_u};
use crate::data_analysis::normality::shapiro_wilk;
use crate::data_analysis::parametric::{
    independent_t, levene_median, mean_ci, mean_diff_ci, one_way_anova, single_case_t,
    two_way_anova, welch_t,
};
use crate::data_input::table_data::Table;
use crate::measurement::MeasurementLevel;
use crate::plot_functions::plot_compare_groups::{plot_group_boxplots, plot_group_value_bars};
use crate::plot_functions::plot_mosaic::plot_mosaic;
use crate::report::{
    chi2_line, ci_bracket, f_line, fmt_cell, fmt_effect, html_table, rank_line, t_line, w_line,
    Fragment,
};

/// One grouping cell: the per-factor levels, their joined display label, and
/// the dependent values that fall into the cell.
struct GroupCell {
    levels: Vec<String>,
    label: String,
    values: Vec<f64>,
}

fn numeric_aware_compare(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        _ => a.cmp(b),
    }
}

/// Split the dependent variable by the observed grouping-level combinations,
/// combination labels joined with " : ".
fn split_by_groups(
    table: &Table,
    dep_name: &str,
    group_names: &[&str],
) -> Result<(Vec<GroupCell>, usize), Box<dyn Error>> {
    let dep_column = table.column(dep_name)?;
    let dep_numeric = dep_column
        .numeric
        .as_ref()
        .ok_or_else(|| format!("Variable '{}' contains non-numeric values", dep_name))?;
    let mut group_columns = Vec::with_capacity(group_names.len());
    for &name in group_names {
        group_columns.push(&table.column(name)?.raw);
    }

    let mut cells: Vec<GroupCell> = Vec::new();
    let mut dropped = 0usize;
    for row in 0..table.row_count {
        let value = dep_numeric[row];
        let labels: Option<Vec<String>> = group_columns
            .iter()
            .map(|col| col[row].clone())
            .collect();
        match (value, labels) {
            (Some(value), Some(levels)) => {
                match cells.iter_mut().find(|c| c.levels == levels) {
                    Some(cell) => cell.values.push(value),
                    None => {
                        let label = levels.join(" : ");
                        cells.push(GroupCell {
                            levels,
                            label,
                            values: vec![value],
                        });
                    }
                }
            }
            _ => dropped += 1,
        }
    }
    if cells.is_empty() {
        return Err("No complete cases for the group comparison".into());
    }
    cells.sort_by(|a, b| {
        for (la, lb) in a.levels.iter().zip(b.levels.iter()) {
            let ordering = numeric_aware_compare(la, lb);
            if ordering != std::cmp::Ordering::Equal {
                return ordering;
            }
        }
        std::cmp::Ordering::Equal
    });
    Ok((cells, dropped))
}

/// Compare groups of a dependent variable: assumption checks route between
/// the t-test family, one-way/two-way ANOVA, their rank alternatives, and
/// the contingency analysis for nominal dependents.
pub fn compare_groups(
    table: &Table,
    dep_name: &str,
    group_names: &[&str],
    chart_root: Option<&str>,
) -> Result<Vec<Fragment>, Box<dyn Error>> {
    if group_names.is_empty() || group_names.len() > 2 {
        return Err("Group comparison supports 1 or 2 grouping variables".into());
    }
    let level = table.level(dep_name)?;
    let mut fragments = vec![Fragment::Text(format!(
        "<h3>Compare groups: {} by {}</h3>",
        dep_name,
        group_names.join(" : ")
    ))];

    if level == MeasurementLevel::Nominal {
        return compare_nominal_dep(table, dep_name, group_names, fragments, chart_root);
    }

    let (cells, dropped) = split_by_groups(table, dep_name, group_names)?;
    let case_count: usize = cells.iter().map(|c| c.values.len()).sum();
    fragments.push(Fragment::Text(format!(
        "N of valid cases: {}<br>N of missing cases: {}",
        case_count, dropped
    )));

    let quantitative = matches!(
        level,
        MeasurementLevel::Interval | MeasurementLevel::Unknown
    );
    let labels: Vec<String> = cells.iter().map(|c| c.label.clone()).collect();
    let axis_label = group_names.join(" : ");

    // Per-group descriptive table.
    let mut header = vec![String::new()];
    header.extend(labels.iter().cloned());
    let mut rows = vec![header];
    if quantitative {
        let mut mean_row = vec!["Mean".to_string()];
        let mut sd_row = vec!["Standard deviation".to_string()];
        for cell in &cells {
            mean_row.push(fmt_cell(mean(&cell.values)));
            sd_row.push(fmt_cell(std_pop(&cell.values)));
        }
        rows.push(mean_row);
        rows.push(sd_row);
    }
    for (name, pick) in [
        ("Maximum", 0usize),
        ("Upper quartile", 1),
        ("Median", 2),
        ("Lower quartile", 3),
        ("Minimum", 4),
    ] {
        let mut row = vec![name.to_string()];
        for cell in &cells {
            let stats = box_stats(&cell.values);
            let value = match pick {
                0 => stats.maximum,
                1 => stats.upper_quartile,
                2 => stats.median,
                3 => stats.lower_quartile,
                _ => stats.minimum,
            };
            row.push(fmt_cell(value));
        }
        rows.push(row);
    }
    fragments.push(Fragment::Table(html_table(&rows)));

    let group_values: Vec<Vec<f64>> = cells.iter().map(|c| c.values.clone()).collect();

    if let Some(root) = chart_root {
        let sample_path = chart_path(root, "sample");
        if quantitative {
            plot_group_boxplots(
                &group_values,
                &labels,
                dep_name,
                &axis_label,
                true,
                false,
                None,
                &sample_path,
            )?;
        } else {
            // Ordinal dependents are plotted as pooled ranks.
            let pooled: Vec<f64> = group_values.iter().flatten().copied().collect();
            let pooled_ranks = rankdata(&pooled);
            let mut ranked_groups = Vec::with_capacity(group_values.len());
            let mut offset = 0;
            for group in &group_values {
                ranked_groups.push(pooled_ranks[offset..offset + group.len()].to_vec());
                offset += group.len();
            }
            plot_group_boxplots(
                &ranked_groups,
                &labels,
                &format!("Rank of {}", dep_name),
                &axis_label,
                true,
                true,
                Some(&pooled),
                &sample_path,
            )?;
        }
        fragments.push(Fragment::Chart(PathBuf::from(sample_path)));

        let population_path = chart_path(root, "population");
        if quantitative {
            let means: Vec<f64> = group_values.iter().map(|g| mean(g)).collect();
            let mut intervals = Vec::with_capacity(group_values.len());
            for group in &group_values {
                if group.len() > 1 {
                    let (_, low, high) = mean_ci(group, CONFIDENCE_LEVEL)?;
                    intervals.push((low, high));
                } else {
                    intervals.push((group[0], group[0]));
                }
            }
            plot_group_value_bars(
                &means,
                Some(&intervals),
                &labels,
                &axis_label,
                dep_name,
                "Means and 95% confidence intervals for the groups",
                &population_path,
            )?;
        } else {
            let medians: Vec<f64> = group_values.iter().map(|g| median(g)).collect();
            plot_group_value_bars(
                &medians,
                None,
                &labels,
                &axis_label,
                dep_name,
                "Medians for the groups",
                &population_path,
            )?;
        }
        fragments.push(Fragment::Chart(PathBuf::from(population_path)));
    }

    if group_names.len() == 2 {
        if !quantitative {
            return Err(
                "Two grouping variables are only supported for interval dependents".into(),
            );
        }
        return compare_two_way(cells, group_names, fragments);
    }

    // Single-case design: a group of one against its control group.
    if group_values.len() == 2
        && (group_values[0].len() == 1 || group_values[1].len() == 1)
        && quantitative
    {
        let (case, controls) = if group_values[0].len() == 1 {
            (group_values[0][0], &group_values[1])
        } else {
            (group_values[1][0], &group_values[0])
        };
        let test = single_case_t(case, controls)?;
        fragments.push(Fragment::Text(format!(
            "Modified t-test: {}",
            t_line(test.statistic, test.df, test.p)
        )));
        return Ok(fragments);
    }

    if quantitative {
        // Assumption checks: per-group normality and homogeneity of variance.
        let mut normality_lines = Vec::with_capacity(cells.len());
        let mut all_normal = true;
        for cell in &cells {
            let (w, w_p) = shapiro_wilk(&cell.values)?;
            if w_p < ALPHA_LEVEL {
                all_normal = false;
            }
            normality_lines.push(format!(
                "({}: {}): {}",
                group_names[0],
                cell.label,
                w_line(w, w_p)
            ));
        }
        fragments.push(Fragment::Text(normality_lines.join("<br>")));

        let levene = levene_median(&group_values)?;
        fragments.push(Fragment::Text(format!(
            "Levene test for homogeneity of variance: {}",
            w_line(levene.statistic, levene.p)
        )));

        if group_values.len() == 2 {
            let (diff, low, high) =
                mean_diff_ci(&group_values[0], &group_values[1], CONFIDENCE_LEVEL)?;
            fragments.push(Fragment::Text(format!(
                "Difference between the two groups: {}, 95% confidence interval {}",
                fmt_cell(diff),
                ci_bracket(low, high, 4)
            )));
            if !all_normal {
                let test = mann_whitney_u(&group_values[0], &group_values[1])?;
                fragments.push(Fragment::Text(format!(
                    "Mann-Whitney U test: {}",
                    rank_line("U", test.statistic, test.p)
                )));
            } else if levene.p < ALPHA_LEVEL {
                let test = welch_t(&group_values[0], &group_values[1])?;
                fragments.push(Fragment::Text(format!(
                    "Welch's t-test: {}",
                    t_line(test.statistic, test.df, test.p)
                )));
            } else {
                let test = independent_t(&group_values[0], &group_values[1])?;
                fragments.push(Fragment::Text(format!(
                    "Independent samples t-test: {}",
                    t_line(test.statistic, test.df, test.p)
                )));
            }
        } else if all_normal && levene.p >= ALPHA_LEVEL {
            let anova = one_way_anova(&group_values)?;
            fragments.push(Fragment::Text(format!(
                "One-way ANOVA: {}",
                f_line(anova.f.statistic, anova.f.df1, anova.f.df2, anova.f.p)
            )));
            fragments.push(Fragment::Text(format!(
                "Effect size: &omega;<sup>2</sup> = {}",
                fmt_effect(anova.omega_squared)
            )));
        } else {
            let test = kruskal_wallis(&group_values)?;
            fragments.push(Fragment::Text(format!(
                "Kruskal-Wallis test: {}",
                chi2_line(test.statistic, test.df, test.n, test.p)
            )));
        }
    } else {
        // Ordinal dependent: rank tests only.
        if group_values.len() == 2 {
            let test = mann_whitney_u(&group_values[0], &group_values[1])?;
            fragments.push(Fragment::Text(format!(
                "Mann-Whitney U test: {}",
                rank_line("U", test.statistic, test.p)
            )));
        } else {
            let test = kruskal_wallis(&group_values)?;
            fragments.push(Fragment::Text(format!(
                "Kruskal-Wallis test: {}",
                chi2_line(test.statistic, test.df, test.n, test.p)
            )));
        }
    }
    Ok(fragments)
}

fn compare_two_way(
    cells: Vec<GroupCell>,
    group_names: &[&str],
    mut fragments: Vec<Fragment>,
) -> Result<Vec<Fragment>, Box<dyn Error>> {
    // Flatten the cells back to per-case factor codes.
    let mut a_levels: Vec<String> = Vec::new();
    let mut b_levels: Vec<String> = Vec::new();
    for cell in &cells {
        if !a_levels.contains(&cell.levels[0]) {
            a_levels.push(cell.levels[0].clone());
        }
        if !b_levels.contains(&cell.levels[1]) {
            b_levels.push(cell.levels[1].clone());
        }
    }
    a_levels.sort_by(|a, b| numeric_aware_compare(a, b));
    b_levels.sort_by(|a, b| numeric_aware_compare(a, b));

    let mut values = Vec::new();
    let mut a_codes = Vec::new();
    let mut b_codes = Vec::new();
    for cell in &cells {
        let a = a_levels
            .iter()
            .position(|l| *l == cell.levels[0])
            .unwrap_or_default();
        let b = b_levels
            .iter()
            .position(|l| *l == cell.levels[1])
            .unwrap_or_default();
        for &value in &cell.values {
            values.push(value);
            a_codes.push(a);
            b_codes.push(b);
        }
    }

    let anova = two_way_anova(&values, &a_codes, &b_codes, a_levels.len(), b_levels.len())?;
    let lines = [
        format!(
            "Two-way ANOVA, main effect of {}: {}",
            group_names[0],
            f_line(
                anova.main_a.statistic,
                anova.main_a.df1,
                anova.main_a.df2,
                anova.main_a.p
            )
        ),
        format!(
            "Main effect of {}: {}",
            group_names[1],
            f_line(
                anova.main_b.statistic,
                anova.main_b.df1,
                anova.main_b.df2,
                anova.main_b.p
            )
        ),
        format!(
            "{} x {} interaction: {}",
            group_names[0],
            group_names[1],
            f_line(
                anova.interaction.statistic,
                anova.interaction.df1,
                anova.interaction.df2,
                anova.interaction.p
            )
        ),
    ];
    fragments.push(Fragment::Text(lines.join("<br>")));
    Ok(fragments)
}

fn compare_nominal_dep(
    table: &Table,
    dep_name: &str,
    group_names: &[&str],
    mut fragments: Vec<Fragment>,
    chart_root: Option<&str>,
) -> Result<Vec<Fragment>, Box<dyn Error>> {
    // Complete label cases over the dependent and every grouping variable.
    let mut names = vec![dep_name];
    names.extend_from_slice(group_names);
    let (labels, dropped) = table.complete_label_cases(&names)?;
    let n = labels[0].len();
    fragments.push(Fragment::Text(format!(
        "N of valid cases: {}<br>N of missing cases: {}",
        n, dropped
    )));

    // Grouping-level combinations joined " : " become the table columns.
    let combo_labels: Vec<String> = (0..n)
        .map(|row| {
            group_names
                .iter()
                .enumerate()
                .map(|(g, _)| labels[g + 1][row].clone())
                .collect::<Vec<_>>()
                .join(" : ")
        })
        .collect();
    let contingency = crosstab(&labels[0], &combo_labels)?;

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
            &group_names.join(" : "),
            dep_name,
            "Mosaic plot of the groups",
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
    Ok(fragments)
}

// src/analyses/compare_groups.rs

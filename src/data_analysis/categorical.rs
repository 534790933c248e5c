// src/data_analysis/categorical.rs

use ndarray::Array2;
use std::error::Error;

use crate::data_analysis::parametric::chi2_p;

/// Contingency table with its ordered row/column category labels.
#[derive(Debug, Clone)]
pub struct CrossTab {
    pub row_levels: Vec<String>,
    pub col_levels: Vec<String>,
    pub counts: Array2<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct ChiSquareIndependence {
    pub statistic: f64,
    pub df: f64,
    pub n: usize,
    pub p: f64,
    pub cramers_v: f64,
}

fn sorted_levels(values: &[String]) -> Vec<String> {
    let mut levels: Vec<String> = Vec::new();
    for v in values {
        if !levels.iter().any(|l| l == v) {
            levels.push(v.clone());
        }
    }
    levels.sort_by(|a, b| match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        _ => a.cmp(b),
    });
    levels
}

/// Cross-tabulate two label vectors of equal length.
pub fn crosstab(rows: &[String], cols: &[String]) -> Result<CrossTab, Box<dyn Error>> {
    if rows.len() != cols.len() {
        return Err("Cross-tabulation needs equal-length label vectors".into());
    }
    if rows.is_empty() {
        return Err("Cross-tabulation needs at least one case".into());
    }
    let row_levels = sorted_levels(rows);
    let col_levels = sorted_levels(cols);
    let mut counts = Array2::zeros((row_levels.len(), col_levels.len()));
    for (r, c) in rows.iter().zip(cols.iter()) {
        let i = row_levels.iter().position(|l| l == r).unwrap_or_default();
        let j = col_levels.iter().position(|l| l == c).unwrap_or_default();
        counts[[i, j]] += 1.0;
    }
    Ok(CrossTab {
        row_levels,
        col_levels,
        counts,
    })
}

/// Chi-square test of independence with the Cramer's V association measure.
pub fn chi_square_independence(
    table: &CrossTab,
) -> Result<ChiSquareIndependence, Box<dyn Error>> {
    let (r, c) = table.counts.dim();
    if r < 2 || c < 2 {
        return Err("Chi-square test needs at least a 2x2 table".into());
    }
    let n: f64 = table.counts.sum();
    if n <= 0.0 {
        return Err("Chi-square test needs a non-empty table".into());
    }
    let row_sums: Vec<f64> = (0..r).map(|i| table.counts.row(i).sum()).collect();
    let col_sums: Vec<f64> = (0..c).map(|j| table.counts.column(j).sum()).collect();

    let mut chi2 = 0.0;
    for i in 0..r {
        for j in 0..c {
            let expected = row_sums[i] * col_sums[j] / n;
            if expected <= 0.0 {
                return Err("Chi-square test has an empty expected cell".into());
            }
            let diff = table.counts[[i, j]] - expected;
            chi2 += diff * diff / expected;
        }
    }

    let df = ((r - 1) * (c - 1)) as f64;
    let min_dim = (r.min(c) - 1) as f64;
    Ok(ChiSquareIndependence {
        statistic: chi2,
        df,
        n: n as usize,
        p: chi2_p(chi2, df)?,
        cramers_v: (chi2 / (n * min_dim)).sqrt(),
    })
}

/// McNemar test on a 2x2 table of paired dichotomous variables, with
/// continuity correction. Returns (chi2, n, p).
pub fn mcnemar(table: &CrossTab) -> Result<(f64, usize, f64), Box<dyn Error>> {
    let (r, c) = table.counts.dim();
    if r != 2 || c != 2 {
        return Err("McNemar test needs a 2x2 table".into());
    }
    let b = table.counts[[0, 1]];
    let c_cell = table.counts[[1, 0]];
    let discordant = b + c_cell;
    if discordant <= 0.0 {
        return Err("McNemar test has no discordant pairs".into());
    }
    let chi2 = ((b - c_cell).abs() - 1.0).max(0.0).powi(2) / discordant;
    let n = table.counts.sum() as usize;
    Ok((chi2, n, chi2_p(chi2, 1.0)?))
}

/// Cochran's Q test of k related dichotomous variables over n cases.
/// `data` is n cases by k variables, cells 0/1. Returns (Q, df, n, p).
pub fn cochran_q(data: &Array2<f64>) -> Result<(f64, f64, usize, f64), Box<dyn Error>> {
    let (n, k) = data.dim();
    if n < 2 || k < 3 {
        return Err("Cochran's Q test needs at least 2 cases and 3 variables".into());
    }
    if data.iter().any(|&v| v != 0.0 && v != 1.0) {
        return Err("Cochran's Q test needs dichotomous (0/1) data".into());
    }
    let kf = k as f64;
    let column_sums: Vec<f64> = (0..k).map(|j| data.column(j).sum()).collect();
    let row_sums: Vec<f64> = (0..n).map(|i| data.row(i).sum()).collect();
    let total: f64 = row_sums.iter().sum();
    let mean_column = total / kf;

    let numerator: f64 = kf * (kf - 1.0)
        * column_sums
            .iter()
            .map(|g| (g - mean_column).powi(2))
            .sum::<f64>();
    let denominator = kf * total - row_sums.iter().map(|l| l * l).sum::<f64>();
    if denominator <= 0.0 {
        return Err("Cochran's Q test is undefined when every case answers alike".into());
    }
    let q = numerator / denominator;
    let df = kf - 1.0;
    Ok((q, df, n, chi2_p(q, df)?))
}


// src/data_analysis/categorical.rs

// src/data_analysis/nonparametric.rs

use ndarray::Array2;
use std::error::Error;

use crate::data_analysis::descriptives::{rankdata, tie_term};
use crate::data_analysis::parametric::{chi2_p, normal_p_two_sided};

/// Result of a rank test whose headline statistic is not chi-square
/// distributed (Wilcoxon T, Mann-Whitney U).
#[derive(Debug, Clone, Copy)]
pub struct RankTest {
    pub statistic: f64,
    pub p: f64,
}

/// Result of a chi-square-approximated rank test (Kruskal-Wallis, Friedman).
#[derive(Debug, Clone, Copy)]
pub struct ChiSquareTest {
    pub statistic: f64,
    pub df: f64,
    pub n: usize,
    pub p: f64,
}

/// Wilcoxon signed-rank test of paired samples. Zero differences are
/// dropped; T is the smaller rank sum; p uses the tie-corrected normal
/// approximation.
pub fn wilcoxon_signed_rank(first: &[f64], second: &[f64]) -> Result<RankTest, Box<dyn Error>> {
    if first.len() != second.len() {
        return Err("Wilcoxon signed-rank test needs equal-length samples".into());
    }
    let diffs: Vec<f64> = first
        .iter()
        .zip(second.iter())
        .map(|(a, b)| a - b)
        .filter(|d| *d != 0.0)
        .collect();
    let n = diffs.len();
    if n < 2 {
        return Err("Wilcoxon signed-rank test has no nonzero differences".into());
    }
    let abs_diffs: Vec<f64> = diffs.iter().map(|d| d.abs()).collect();
    let ranks = rankdata(&abs_diffs);
    let t_plus: f64 = ranks
        .iter()
        .zip(diffs.iter())
        .filter(|(_, d)| **d > 0.0)
        .map(|(r, _)| r)
        .sum();
    let rank_sum = n as f64 * (n as f64 + 1.0) / 2.0;
    let t_minus = rank_sum - t_plus;
    let t = t_plus.min(t_minus);

    let nf = n as f64;
    let mean = rank_sum / 2.0;
    let variance = nf * (nf + 1.0) * (2.0 * nf + 1.0) / 24.0 - tie_term(&abs_diffs) / 48.0;
    if variance <= 0.0 {
        return Err("Wilcoxon signed-rank variance collapsed under ties".into());
    }
    let z = (t - mean) / variance.sqrt();
    Ok(RankTest {
        statistic: t,
        p: normal_p_two_sided(z)?,
    })
}

/// Wilcoxon signed-rank test of one sample against a test value.
pub fn wilcoxon_one_sample(data: &[f64], test_value: f64) -> Result<RankTest, Box<dyn Error>> {
    let reference = vec![test_value; data.len()];
    wilcoxon_signed_rank(data, &reference)
}

/// Mann-Whitney U test of two independent groups, tie-corrected normal
/// approximation; U is the smaller of the two U statistics.
pub fn mann_whitney_u(group1: &[f64], group2: &[f64]) -> Result<RankTest, Box<dyn Error>> {
    let (n1, n2) = (group1.len(), group2.len());
    if n1 < 2 || n2 < 2 {
        return Err("Mann-Whitney U test needs at least 2 values per group".into());
    }
    let pooled: Vec<f64> = group1.iter().chain(group2.iter()).copied().collect();
    let ranks = rankdata(&pooled);
    let r1: f64 = ranks[..n1].iter().sum();
    let (n1f, n2f) = (n1 as f64, n2 as f64);
    let u1 = n1f * n2f + n1f * (n1f + 1.0) / 2.0 - r1;
    let u2 = n1f * n2f - u1;
    let u = u1.min(u2);

    let n = n1f + n2f;
    let tie_correction = tie_term(&pooled) / (n * (n - 1.0));
    let variance = n1f * n2f / 12.0 * ((n + 1.0) - tie_correction);
    if variance <= 0.0 {
        return Err("Mann-Whitney variance collapsed under ties".into());
    }
    let z = (u - n1f * n2f / 2.0) / variance.sqrt();
    Ok(RankTest {
        statistic: u,
        p: normal_p_two_sided(z)?,
    })
}

/// Kruskal-Wallis test of k independent groups, tie-corrected.
pub fn kruskal_wallis(groups: &[Vec<f64>]) -> Result<ChiSquareTest, Box<dyn Error>> {
    let k = groups.len();
    if k < 2 || groups.iter().any(|g| g.is_empty()) {
        return Err("Kruskal-Wallis test needs at least 2 non-empty groups".into());
    }
    let pooled: Vec<f64> = groups.iter().flatten().copied().collect();
    let n = pooled.len();
    let nf = n as f64;
    let ranks = rankdata(&pooled);

    let mut h = 0.0;
    let mut offset = 0;
    for group in groups {
        let size = group.len();
        let rank_sum: f64 = ranks[offset..offset + size].iter().sum();
        h += rank_sum * rank_sum / size as f64;
        offset += size;
    }
    h = 12.0 / (nf * (nf + 1.0)) * h - 3.0 * (nf + 1.0);

    let correction = 1.0 - tie_term(&pooled) / (nf * nf * nf - nf);
    if correction <= 0.0 {
        return Err("Kruskal-Wallis correction collapsed under ties".into());
    }
    h /= correction;

    let df = (k - 1) as f64;
    Ok(ChiSquareTest {
        statistic: h,
        df,
        n,
        p: chi2_p(h, df)?,
    })
}

/// Friedman test of k repeated measures over n subjects, tie-corrected.
/// `data` is n subjects by k conditions.
pub fn friedman(data: &Array2<f64>) -> Result<ChiSquareTest, Box<dyn Error>> {
    let (n, k) = data.dim();
    if n < 2 || k < 3 {
        return Err("Friedman test needs at least 2 subjects and 3 conditions".into());
    }
    let (nf, kf) = (n as f64, k as f64);

    let mut column_rank_sums = vec![0.0; k];
    let mut tie_sum = 0.0;
    for row in 0..n {
        let row_values: Vec<f64> = (0..k).map(|c| data[[row, c]]).collect();
        let ranks = rankdata(&row_values);
        for (c, r) in ranks.iter().enumerate() {
            column_rank_sums[c] += r;
        }
        tie_sum += tie_term(&row_values);
    }

    let sum_sq: f64 = column_rank_sums.iter().map(|r| r * r).sum();
    let mut chi2 = 12.0 / (nf * kf * (kf + 1.0)) * sum_sq - 3.0 * nf * (kf + 1.0);

    let correction = 1.0 - tie_sum / (nf * kf * (kf * kf - 1.0));
    if correction <= 0.0 {
        return Err("Friedman correction collapsed under ties".into());
    }
    chi2 /= correction;

    let df = (k - 1) as f64;
    Ok(ChiSquareTest {
        statistic: chi2,
        df,
        n,
        p: chi2_p(chi2, df)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_wilcoxon_constant_shift() {
        let first = [1.0, 2.0, 3.0, 4.0, 5.0];
        let second = [2.0, 3.0, 4.0, 5.0, 6.0];
        let result = wilcoxon_signed_rank(&first, &second).unwrap();
        assert!(result.statistic.abs() < 1e-12);
        assert!((result.p - 0.025).abs() < 0.01);
    }

    #[test]
    fn test_wilcoxon_drops_zero_differences() {
        assert!(wilcoxon_signed_rank(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_mann_whitney_separated_groups() {
        let result = mann_whitney_u(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert!(result.statistic.abs() < 1e-12);
        assert!((result.p - 0.0495).abs() < 0.01);
    }

    #[test]
    fn test_kruskal_wallis_ordered_groups() {
        let groups = vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ];
        let result = kruskal_wallis(&groups).unwrap();
        assert!((result.statistic - 7.2).abs() < 1e-9);
        assert!((result.df - 2.0).abs() < 1e-12);
        assert_eq!(result.n, 9);
        assert!((result.p - 0.0273).abs() < 0.005);
    }

    #[test]
    fn test_friedman_consistent_ordering() {
        let data = array![
            [1.0, 2.0, 3.0],
            [1.5, 2.5, 3.5],
            [1.2, 2.2, 3.2],
            [1.8, 2.8, 3.8]
        ];
        let result = friedman(&data).unwrap();
        assert!((result.statistic - 8.0).abs() < 1e-9);
        assert!((result.df - 2.0).abs() < 1e-12);
        assert_eq!(result.n, 4);
        assert!((result.p - 0.0183).abs() < 0.005);
    }
}

// src/data_analysis/nonparametric.rs

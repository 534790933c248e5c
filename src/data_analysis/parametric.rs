// src/data_analysis/parametric.rs

use ndarray::Array2;
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};
use std::error::Error;

use crate::data_analysis::descriptives::{mean, median, std_sample, variance_sample};

/// Result of a t-family test. `df` is fractional for the Welch variant.
#[derive(Debug, Clone, Copy)]
pub struct TTest {
    pub statistic: f64,
    pub df: f64,
    pub p: f64,
}

/// Result of an F test.
#[derive(Debug, Clone, Copy)]
pub struct FTest {
    pub statistic: f64,
    pub df1: f64,
    pub df2: f64,
    pub p: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct OneWayAnova {
    pub f: FTest,
    pub omega_squared: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct TwoWayAnova {
    pub main_a: FTest,
    pub main_b: FTest,
    pub interaction: FTest,
}

/// Mauchly's sphericity test plus the Greenhouse-Geisser epsilon computed
/// from the same contrast-space covariance.
#[derive(Debug, Clone, Copy)]
pub struct Sphericity {
    pub w: f64,
    pub chi2: f64,
    pub df: f64,
    pub p: f64,
    pub epsilon: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RmAnova {
    pub uncorrected: FTest,
    pub corrected: FTest,
}

pub fn t_p_two_sided(t: f64, df: f64) -> Result<f64, Box<dyn Error>> {
    let dist = StudentsT::new(0.0, 1.0, df)?;
    Ok(2.0 * (1.0 - dist.cdf(t.abs())))
}

pub fn f_p(f_value: f64, df1: f64, df2: f64) -> Result<f64, Box<dyn Error>> {
    if f_value <= 0.0 {
        return Ok(1.0);
    }
    let dist = FisherSnedecor::new(df1, df2)?;
    Ok(1.0 - dist.cdf(f_value))
}

pub fn chi2_p(chi2: f64, df: f64) -> Result<f64, Box<dyn Error>> {
    if chi2 <= 0.0 {
        return Ok(1.0);
    }
    let dist = ChiSquared::new(df)?;
    Ok(1.0 - dist.cdf(chi2))
}

pub fn normal_p_two_sided(z: f64) -> Result<f64, Box<dyn Error>> {
    let dist = Normal::new(0.0, 1.0)?;
    Ok((2.0 * dist.cdf(-z.abs())).min(1.0))
}

/// One-sample t-test against `test_value`.
pub fn one_sample_t(data: &[f64], test_value: f64) -> Result<TTest, Box<dyn Error>> {
    let n = data.len();
    if n < 2 {
        return Err("One-sample t-test needs at least 2 values".into());
    }
    let se = std_sample(data) / (n as f64).sqrt();
    if se <= 0.0 {
        return Err("One-sample t-test is undefined for constant data".into());
    }
    let t = (mean(data) - test_value) / se;
    let df = (n - 1) as f64;
    Ok(TTest {
        statistic: t,
        df,
        p: t_p_two_sided(t, df)?,
    })
}

/// 95% (or other level) confidence interval of the mean, via the
/// t distribution. Returns (half width, low, high).
pub fn mean_ci(data: &[f64], level: f64) -> Result<(f64, f64, f64), Box<dyn Error>> {
    let n = data.len();
    if n < 2 {
        return Err("Confidence interval needs at least 2 values".into());
    }
    let df = (n - 1) as f64;
    let dist = StudentsT::new(0.0, 1.0, df)?;
    let t_crit = dist.inverse_cdf(1.0 - (1.0 - level) / 2.0);
    let half = t_crit * std_sample(data) / (n as f64).sqrt();
    let m = mean(data);
    Ok((half, m - half, m + half))
}

/// Paired-samples t-test (one-sample t on the differences).
pub fn paired_t(first: &[f64], second: &[f64]) -> Result<TTest, Box<dyn Error>> {
    if first.len() != second.len() {
        return Err("Paired t-test needs equal-length samples".into());
    }
    let diffs: Vec<f64> = first.iter().zip(second.iter()).map(|(a, b)| a - b).collect();
    one_sample_t(&diffs, 0.0)
}

/// Independent-samples t-test with pooled variance.
pub fn independent_t(group1: &[f64], group2: &[f64]) -> Result<TTest, Box<dyn Error>> {
    let (n1, n2) = (group1.len() as f64, group2.len() as f64);
    if n1 < 2.0 || n2 < 2.0 {
        return Err("Independent t-test needs at least 2 values per group".into());
    }
    let df = n1 + n2 - 2.0;
    let pooled_var =
        ((n1 - 1.0) * variance_sample(group1) + (n2 - 1.0) * variance_sample(group2)) / df;
    let se = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();
    if se <= 0.0 {
        return Err("Independent t-test is undefined for constant data".into());
    }
    let t = (mean(group1) - mean(group2)) / se;
    Ok(TTest {
        statistic: t,
        df,
        p: t_p_two_sided(t, df)?,
    })
}

/// Welch's t-test with Satterthwaite degrees of freedom, for
/// heteroscedastic groups.
pub fn welch_t(group1: &[f64], group2: &[f64]) -> Result<TTest, Box<dyn Error>> {
    let (n1, n2) = (group1.len() as f64, group2.len() as f64);
    if n1 < 2.0 || n2 < 2.0 {
        return Err("Welch's t-test needs at least 2 values per group".into());
    }
    let (v1, v2) = (variance_sample(group1) / n1, variance_sample(group2) / n2);
    let se = (v1 + v2).sqrt();
    if se <= 0.0 {
        return Err("Welch's t-test is undefined for constant data".into());
    }
    let t = (mean(group1) - mean(group2)) / se;
    let df = (v1 + v2).powi(2) / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0));
    Ok(TTest {
        statistic: t,
        df,
        p: t_p_two_sided(t, df)?,
    })
}

/// Difference of the two group means with its confidence interval
/// (pooled-variance form). Returns (difference, low, high).
pub fn mean_diff_ci(
    group1: &[f64],
    group2: &[f64],
    level: f64,
) -> Result<(f64, f64, f64), Box<dyn Error>> {
    let (n1, n2) = (group1.len() as f64, group2.len() as f64);
    let df = n1 + n2 - 2.0;
    let pooled_var =
        ((n1 - 1.0) * variance_sample(group1) + (n2 - 1.0) * variance_sample(group2)) / df;
    let se = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df)?;
    let t_crit = dist.inverse_cdf(1.0 - (1.0 - level) / 2.0);
    let diff = mean(group1) - mean(group2);
    Ok((diff, diff - t_crit * se, diff + t_crit * se))
}

/// Modified t-test comparing a single case against a control group
/// (Crawford & Howell), df = n_controls - 1.
pub fn single_case_t(case: f64, controls: &[f64]) -> Result<TTest, Box<dyn Error>> {
    let n = controls.len() as f64;
    if controls.len() < 2 {
        return Err("Single-case test needs at least 2 control values".into());
    }
    let s = std_sample(controls);
    if s <= 0.0 {
        return Err("Single-case test is undefined for constant controls".into());
    }
    let t = (case - mean(controls)) / (s * (1.0 + 1.0 / n).sqrt());
    let df = n - 1.0;
    Ok(TTest {
        statistic: t,
        df,
        p: t_p_two_sided(t, df)?,
    })
}

/// Levene's test for homogeneity of variance, median-centered
/// (Brown-Forsythe form).
pub fn levene_median(groups: &[Vec<f64>]) -> Result<FTest, Box<dyn Error>> {
    let k = groups.len();
    if k < 2 || groups.iter().any(|g| g.len() < 2) {
        return Err("Levene's test needs at least 2 groups of at least 2 values".into());
    }
    let n_total: usize = groups.iter().map(|g| g.len()).sum();

    let deviations: Vec<Vec<f64>> = groups
        .iter()
        .map(|g| {
            let center = median(g);
            g.iter().map(|x| (x - center).abs()).collect()
        })
        .collect();
    let group_means: Vec<f64> = deviations.iter().map(|z| mean(z)).collect();
    let grand_mean = deviations.iter().flatten().sum::<f64>() / n_total as f64;

    let ss_between: f64 = deviations
        .iter()
        .zip(group_means.iter())
        .map(|(z, zm)| z.len() as f64 * (zm - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = deviations
        .iter()
        .zip(group_means.iter())
        .map(|(z, zm)| z.iter().map(|v| (v - zm).powi(2)).sum::<f64>())
        .sum();

    let df1 = (k - 1) as f64;
    let df2 = (n_total - k) as f64;
    if ss_within <= 0.0 {
        return Err("Levene's test is undefined for zero within-group spread".into());
    }
    let w = (df2 / df1) * ss_between / ss_within;
    Ok(FTest {
        statistic: w,
        df1,
        df2,
        p: f_p(w, df1, df2)?,
    })
}

/// One-way ANOVA with the omega-squared effect size.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Result<OneWayAnova, Box<dyn Error>> {
    let k = groups.len();
    if k < 2 || groups.iter().any(|g| g.len() < 2) {
        return Err("One-way ANOVA needs at least 2 groups of at least 2 values".into());
    }
    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    let grand_mean = groups.iter().flatten().sum::<f64>() / n_total as f64;

    let ss_between: f64 = groups
        .iter()
        .map(|g| g.len() as f64 * (mean(g) - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = groups
        .iter()
        .map(|g| {
            let gm = mean(g);
            g.iter().map(|x| (x - gm).powi(2)).sum::<f64>()
        })
        .sum();

    let df1 = (k - 1) as f64;
    let df2 = (n_total - k) as f64;
    if ss_within <= 0.0 {
        return Err("One-way ANOVA is undefined for zero within-group spread".into());
    }
    let ms_within = ss_within / df2;
    let f_value = (ss_between / df1) / ms_within;
    let omega_squared =
        (ss_between - df1 * ms_within) / (ss_between + ss_within + ms_within);
    Ok(OneWayAnova {
        f: FTest {
            statistic: f_value,
            df1,
            df2,
            p: f_p(f_value, df1, df2)?,
        },
        omega_squared,
    })
}

/// Two-way factorial ANOVA with classical weighted-means sums of squares.
/// `a_codes` and `b_codes` give each value's factor-level index.
pub fn two_way_anova(
    values: &[f64],
    a_codes: &[usize],
    b_codes: &[usize],
    a_levels: usize,
    b_levels: usize,
) -> Result<TwoWayAnova, Box<dyn Error>> {
    let n = values.len();
    if n != a_codes.len() || n != b_codes.len() {
        return Err("Two-way ANOVA input lengths do not match".into());
    }
    if a_levels < 2 || b_levels < 2 {
        return Err("Two-way ANOVA needs at least 2 levels per factor".into());
    }

    let grand_mean = mean(values);
    let mut a_sums = vec![(0.0, 0usize); a_levels];
    let mut b_sums = vec![(0.0, 0usize); b_levels];
    let mut cell_sums = vec![vec![(0.0, 0usize); b_levels]; a_levels];
    for ((&x, &a), &b) in values.iter().zip(a_codes).zip(b_codes) {
        a_sums[a].0 += x;
        a_sums[a].1 += 1;
        b_sums[b].0 += x;
        b_sums[b].1 += 1;
        cell_sums[a][b].0 += x;
        cell_sums[a][b].1 += 1;
    }
    if cell_sums
        .iter()
        .flatten()
        .any(|&(_, count)| count == 0)
    {
        return Err("Two-way ANOVA needs every factor-level combination to be observed".into());
    }

    let ss_a: f64 = a_sums
        .iter()
        .map(|&(sum, count)| count as f64 * (sum / count as f64 - grand_mean).powi(2))
        .sum();
    let ss_b: f64 = b_sums
        .iter()
        .map(|&(sum, count)| count as f64 * (sum / count as f64 - grand_mean).powi(2))
        .sum();
    let ss_cells: f64 = cell_sums
        .iter()
        .flatten()
        .map(|&(sum, count)| count as f64 * (sum / count as f64 - grand_mean).powi(2))
        .sum();
    let ss_total: f64 = values.iter().map(|x| (x - grand_mean).powi(2)).sum();
    let ss_ab = ss_cells - ss_a - ss_b;
    let ss_error = ss_total - ss_cells;

    let df_a = (a_levels - 1) as f64;
    let df_b = (b_levels - 1) as f64;
    let df_ab = df_a * df_b;
    let df_error = n as f64 - (a_levels * b_levels) as f64;
    if df_error <= 0.0 || ss_error <= 0.0 {
        return Err("Two-way ANOVA has no error degrees of freedom left".into());
    }
    let ms_error = ss_error / df_error;

    let build = |ss: f64, df: f64| -> Result<FTest, Box<dyn Error>> {
        let f_value = (ss / df) / ms_error;
        Ok(FTest {
            statistic: f_value,
            df1: df,
            df2: df_error,
            p: f_p(f_value, df, df_error)?,
        })
    };
    Ok(TwoWayAnova {
        main_a: build(ss_a, df_a)?,
        main_b: build(ss_b, df_b)?,
        interaction: build(ss_ab.max(0.0), df_ab)?,
    })
}

/// Covariance matrix (divisor n - 1) of an n-by-k data matrix.
fn covariance_matrix(data: &Array2<f64>) -> Array2<f64> {
    let (n, k) = data.dim();
    let means: Vec<f64> = (0..k).map(|j| data.column(j).sum() / n as f64).collect();
    let mut cov = Array2::zeros((k, k));
    for i in 0..k {
        for j in 0..k {
            let mut sum = 0.0;
            for r in 0..n {
                sum += (data[[r, i]] - means[i]) * (data[[r, j]] - means[j]);
            }
            cov[[i, j]] = sum / (n as f64 - 1.0);
        }
    }
    cov
}

/// Orthonormal Helmert contrasts, (k-1)-by-k.
fn helmert_contrasts(k: usize) -> Array2<f64> {
    let mut c = Array2::zeros((k - 1, k));
    for row in 0..k - 1 {
        let j = row + 1;
        let norm = (j as f64 * (j as f64 + 1.0)).sqrt();
        for col in 0..j {
            c[[row, col]] = 1.0 / norm;
        }
        c[[row, j]] = -(j as f64) / norm;
    }
    c
}

/// Determinant by LU decomposition with partial pivoting; the contrast-space
/// matrices here are small (k - 1 square), so no LAPACK is needed.
fn determinant(matrix: &Array2<f64>) -> f64 {
    let n = matrix.nrows();
    let mut m = matrix.clone();
    let mut det = 1.0;
    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if m[[row, col]].abs() > m[[pivot, col]].abs() {
                pivot = row;
            }
        }
        if m[[pivot, col]].abs() < 1e-300 {
            return 0.0;
        }
        if pivot != col {
            for j in 0..n {
                let tmp = m[[col, j]];
                m[[col, j]] = m[[pivot, j]];
                m[[pivot, j]] = tmp;
            }
            det = -det;
        }
        det *= m[[col, col]];
        for row in col + 1..n {
            let factor = m[[row, col]] / m[[col, col]];
            for j in col..n {
                m[[row, j]] -= factor * m[[col, j]];
            }
        }
    }
    det
}

/// Mauchly's test of sphericity with the chi-square approximation, plus the
/// Greenhouse-Geisser epsilon. `data` is n subjects by k conditions, k >= 3.
pub fn mauchly_sphericity(data: &Array2<f64>) -> Result<Sphericity, Box<dyn Error>> {
    let (n, k) = data.dim();
    if k < 3 {
        return Err("Sphericity is only defined for 3 or more conditions".into());
    }
    if n <= k {
        return Err("Sphericity test needs more subjects than conditions".into());
    }
    let cov = covariance_matrix(data);
    let contrasts = helmert_contrasts(k);
    let t = contrasts.dot(&cov).dot(&contrasts.t());

    let k1 = (k - 1) as f64;
    let trace: f64 = (0..k - 1).map(|i| t[[i, i]]).sum();
    let det = determinant(&t);
    if trace <= 0.0 {
        return Err("Sphericity test is undefined for zero contrast variance".into());
    }
    let w = (det / (trace / k1).powf(k1)).clamp(0.0, 1.0);

    let nf = n as f64;
    let d = 1.0 - (2.0 * k1 * k1 + k1 + 2.0) / (6.0 * k1 * (nf - 1.0));
    let chi2 = if w > 0.0 { -(nf - 1.0) * d * w.ln() } else { f64::INFINITY };
    let df = (k * (k - 1)) as f64 / 2.0 - 1.0;
    let p = if chi2.is_finite() { chi2_p(chi2, df)? } else { 0.0 };

    let trace_sq: f64 = {
        let mut sum = 0.0;
        for i in 0..k - 1 {
            for j in 0..k - 1 {
                sum += t[[i, j]] * t[[i, j]];
            }
        }
        sum
    };
    let epsilon = ((trace * trace) / (k1 * trace_sq)).clamp(1.0 / k1, 1.0);

    Ok(Sphericity {
        w,
        chi2,
        df,
        p,
        epsilon,
    })
}

/// Repeated-measures one-way ANOVA. The corrected entry carries
/// Greenhouse-Geisser adjusted degrees of freedom using `epsilon`.
pub fn rm_anova(data: &Array2<f64>, epsilon: f64) -> Result<RmAnova, Box<dyn Error>> {
    let (n, k) = data.dim();
    if n < 2 || k < 2 {
        return Err("Repeated-measures ANOVA needs at least 2 subjects and 2 conditions".into());
    }
    let nf = n as f64;
    let kf = k as f64;
    let grand_mean = data.sum() / (nf * kf);

    let ss_total: f64 = data.iter().map(|x| (x - grand_mean).powi(2)).sum();
    let ss_subjects: f64 = (0..n)
        .map(|r| {
            let row_mean = data.row(r).sum() / kf;
            kf * (row_mean - grand_mean).powi(2)
        })
        .sum();
    let ss_conditions: f64 = (0..k)
        .map(|c| {
            let col_mean = data.column(c).sum() / nf;
            nf * (col_mean - grand_mean).powi(2)
        })
        .sum();
    let ss_error = ss_total - ss_subjects - ss_conditions;

    let df1 = kf - 1.0;
    let df2 = (kf - 1.0) * (nf - 1.0);
    if ss_error <= 0.0 {
        return Err("Repeated-measures ANOVA is undefined for zero residual spread".into());
    }
    let f_value = (ss_conditions / df1) / (ss_error / df2);

    let eps = epsilon.clamp(1.0 / df1.max(1.0), 1.0);
    let (cdf1, cdf2) = (df1 * eps, df2 * eps);
    Ok(RmAnova {
        uncorrected: FTest {
            statistic: f_value,
            df1,
            df2,
            p: f_p(f_value, df1, df2)?,
        },
        corrected: FTest {
            statistic: f_value,
            df1: cdf1,
            df2: cdf2,
            p: f_p(f_value, cdf1, cdf2)?,
        },
    })
}

/// All pairwise paired t-tests, in variable order. Returned as
/// (first index, second index, test).
pub fn pairwise_paired_t(
    variables: &[Vec<f64>],
) -> Result<Vec<(usize, usize, TTest)>, Box<dyn Error>> {
    let mut results = Vec::new();
    for i in 0..variables.len() {
        for j in i + 1..variables.len() {
            results.push((i, j, paired_t(&variables[i], &variables[j])?));
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_one_sample_t() {
        let flat = one_sample_t(&[1.0, 2.0, 3.0, 4.0, 5.0], 3.0).unwrap();
        assert!(flat.statistic.abs() < 1e-12);
        assert!((flat.p - 1.0).abs() < 1e-9);

        let shifted = one_sample_t(&[2.0, 4.0, 6.0, 8.0], 3.0).unwrap();
        assert!((shifted.statistic - 1.5492).abs() < 1e-3);
        assert!((shifted.df - 3.0).abs() < 1e-12);
        assert!((shifted.p - 0.219).abs() < 0.01);
    }

    #[test]
    fn test_mean_ci() {
        let (_, low, high) = mean_ci(&[2.0, 4.0, 6.0, 8.0], 0.95).unwrap();
        assert!((low - 0.8915).abs() < 0.01);
        assert!((high - 9.1085).abs() < 0.01);
    }

    #[test]
    fn test_independent_and_welch_agree_on_equal_variances() {
        let g1 = vec![1.0, 2.0, 3.0];
        let g2 = vec![4.0, 5.0, 6.0];
        let pooled = independent_t(&g1, &g2).unwrap();
        let welch = welch_t(&g1, &g2).unwrap();
        assert!((pooled.statistic - (-3.6742)).abs() < 1e-3);
        assert!((pooled.df - 4.0).abs() < 1e-12);
        assert!((pooled.p - 0.0213).abs() < 0.005);
        assert!((welch.statistic - pooled.statistic).abs() < 1e-9);
        assert!((welch.df - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_levene_median() {
        let groups = vec![vec![1.0, 2.0, 3.0, 4.0], vec![2.0, 4.0, 6.0, 8.0]];
        let levene = levene_median(&groups).unwrap();
        assert!((levene.statistic - 2.4).abs() < 1e-9);
        assert!((levene.df1 - 1.0).abs() < 1e-12);
        assert!((levene.df2 - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_way_anova() {
        let groups = vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 4.0],
            vec![3.0, 4.0, 5.0],
        ];
        let anova = one_way_anova(&groups).unwrap();
        assert!((anova.f.statistic - 3.0).abs() < 1e-9);
        assert!((anova.f.df1 - 2.0).abs() < 1e-12);
        assert!((anova.f.df2 - 6.0).abs() < 1e-12);
        assert!((anova.omega_squared - 4.0 / 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_way_anova_balanced() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let a_codes = [0, 0, 0, 0, 1, 1, 1, 1];
        let b_codes = [0, 0, 1, 1, 0, 0, 1, 1];
        let anova = two_way_anova(&values, &a_codes, &b_codes, 2, 2).unwrap();
        assert!((anova.main_a.statistic - 64.0).abs() < 1e-9);
        assert!((anova.main_b.statistic - 16.0).abs() < 1e-9);
        assert!(anova.interaction.statistic.abs() < 1e-9);
        assert!((anova.main_a.df2 - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_case_t() {
        let result = single_case_t(10.0, &[1.0, 2.0, 3.0]).unwrap();
        assert!((result.statistic - 6.9282).abs() < 1e-3);
        assert!((result.df - 2.0).abs() < 1e-12);
        assert!(result.p < 0.05);
    }

    #[test]
    fn test_rm_anova_no_condition_effect() {
        // Condition means are identical, so the condition effect vanishes.
        let data = array![[1.0, 2.0, 3.0], [3.0, 1.0, 2.0], [2.0, 3.0, 1.0], [2.0, 2.0, 2.0]];
        let anova = rm_anova(&data, 1.0).unwrap();
        assert!(anova.uncorrected.statistic.abs() < 1e-9);
        assert!((anova.uncorrected.p - 1.0).abs() < 1e-9);
        assert!((anova.uncorrected.df1 - 2.0).abs() < 1e-12);
        assert!((anova.uncorrected.df2 - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_mauchly_bounds() {
        let data = array![
            [1.0, 2.0, 3.5],
            [2.0, 3.1, 4.0],
            [3.0, 5.2, 6.1],
            [4.0, 4.3, 7.2],
            [2.5, 3.9, 5.0],
            [1.5, 2.2, 4.4]
        ];
        let sphericity = mauchly_sphericity(&data).unwrap();
        assert!(sphericity.w > 0.0 && sphericity.w <= 1.0);
        assert!((0.0..=1.0).contains(&sphericity.p));
        assert!(sphericity.epsilon >= 0.5 && sphericity.epsilon <= 1.0);
        assert!((sphericity.df - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_helmert_contrasts_orthonormal() {
        let c = helmert_contrasts(4);
        let gram = c.dot(&c.t());
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((gram[[i, j]] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_determinant() {
        let m = array![[2.0, 1.0], [1.0, 2.0]];
        assert!((determinant(&m) - 3.0).abs() < 1e-12);
    }
}

// src/data_analysis/parametric.rs

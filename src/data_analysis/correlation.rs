// src/data_analysis/correlation.rs

use statrs::distribution::{ContinuousCDF, Normal};
use std::error::Error;

use crate::data_analysis::descriptives::{mean, rankdata};
use crate::data_analysis::parametric::t_p_two_sided;

/// Correlation coefficient with its t-based two-sided p, df = n - 2.
#[derive(Debug, Clone, Copy)]
pub struct Correlation {
    pub r: f64,
    pub df: f64,
    pub p: f64,
}

/// Pearson product-moment correlation.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation, Box<dyn Error>> {
    let n = x.len();
    if n != y.len() {
        return Err("Correlation needs equal-length samples".into());
    }
    if n < 3 {
        return Err("Correlation needs at least 3 pairs".into());
    }
    let (mx, my) = (mean(x), mean(y));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        sxy += (xi - mx) * (yi - my);
        sxx += (xi - mx).powi(2);
        syy += (yi - my).powi(2);
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return Err("Correlation is undefined for constant data".into());
    }
    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let df = (n - 2) as f64;
    let p = if 1.0 - r * r < 1e-12 {
        0.0
    } else {
        let t = r * (df / (1.0 - r * r)).sqrt();
        t_p_two_sided(t, df)?
    };
    Ok(Correlation { r, df, p })
}

/// Spearman rank-order correlation: Pearson machinery applied to the
/// average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<Correlation, Box<dyn Error>> {
    pearson(&rankdata(x), &rankdata(y))
}

/// Confidence interval of a correlation coefficient via the Fisher
/// z transformation.
pub fn fisher_ci(r: f64, n: usize, level: f64) -> Result<(f64, f64), Box<dyn Error>> {
    if n < 4 {
        return Err("Fisher confidence interval needs at least 4 pairs".into());
    }
    let z = r.atanh();
    let se = 1.0 / ((n - 3) as f64).sqrt();
    let normal = Normal::new(0.0, 1.0)?;
    let z_crit = normal.inverse_cdf(1.0 - (1.0 - level) / 2.0);
    Ok(((z - z_crit * se).tanh(), (z + z_crit * se).tanh()))
}

/// Least-squares line fit. Returns (slope, intercept).
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<(f64, f64), Box<dyn Error>> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return Err("Linear regression needs at least 2 pairs".into());
    }
    let (mx, my) = (mean(x), mean(y));
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        sxy += (xi - mx) * (yi - my);
        sxx += (xi - mx).powi(2);
    }
    if sxx <= 0.0 {
        return Err("Linear regression is undefined for a constant predictor".into());
    }
    let slope = sxy / sxx;
    Ok((slope, my - slope * mx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_perfect_line() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let result = pearson(&x, &y).unwrap();
        assert!((result.r - 1.0).abs() < 1e-12);
        assert!(result.p < 1e-9);
    }

    #[test]
    fn test_pearson_hand_computed() {
        let result = pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0, 2.0]).unwrap();
        assert!((result.r - 0.8660).abs() < 1e-3);
        assert!((result.df - 1.0).abs() < 1e-12);
        assert!((result.p - 0.333).abs() < 0.01);
    }

    #[test]
    fn test_spearman_monotone_nonlinear() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 8.0, 27.0, 64.0];
        let result = spearman(&x, &y).unwrap();
        assert!((result.r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fisher_ci_symmetric_around_zero() {
        let (low, high) = fisher_ci(0.0, 28, 0.95).unwrap();
        assert!((low + 0.3734).abs() < 1e-3);
        assert!((high - 0.3734).abs() < 1e-3);
    }

    #[test]
    fn test_linear_regression() {
        let (slope, intercept) = linear_regression(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((slope - 2.0).abs() < 1e-12);
        assert!(intercept.abs() < 1e-12);
    }
}

// src/data_analysis/correlation.rs

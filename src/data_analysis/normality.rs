// src/data_analysis/normality.rs

use statrs::distribution::{ContinuousCDF, Normal};
use std::error::Error;

/// Shapiro-Wilk normality test with Royston's (1995) p-value approximation,
/// valid for 3 <= n <= 5000. Returns (W, p).
///
/// The composite test is built here on top of the statrs normal quantile and
/// CDF; no crate in the ecosystem ships it ready-made.
pub fn shapiro_wilk(data: &[f64]) -> Result<(f64, f64), Box<dyn Error>> {
    let n = data.len();
    if n < 3 {
        return Err("Shapiro-Wilk test needs at least 3 values".into());
    }
    if n > 5000 {
        return Err("Shapiro-Wilk approximation is not valid above 5000 values".into());
    }

    let mut x = data.to_vec();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let range = x[n - 1] - x[0];
    if range <= 0.0 {
        return Err("Shapiro-Wilk test is undefined for constant data".into());
    }

    let standard_normal = Normal::new(0.0, 1.0)?;

    // Expected normal order statistics (Blom scores).
    let mut m = vec![0.0; n];
    for (i, mi) in m.iter_mut().enumerate() {
        let p = (i as f64 + 1.0 - 0.375) / (n as f64 + 0.25);
        *mi = standard_normal.inverse_cdf(p);
    }
    let ssq_m: f64 = m.iter().map(|v| v * v).sum();

    // Weight vector: normalized scores with Royston's polynomial adjustment
    // of the one (n <= 5) or two (n > 5) extreme coefficients.
    let u = 1.0 / (n as f64).sqrt();
    let norm = ssq_m.sqrt();
    let mut a = vec![0.0; n];

    if n == 3 {
        a[0] = -(0.5f64.sqrt());
        a[2] = 0.5f64.sqrt();
    } else {
        let c_n = m[n - 1] / norm;
        let a_n = c_n - 2.706056 * u.powi(5) + 4.434685 * u.powi(4) - 2.071190 * u.powi(3)
            - 0.147981 * u.powi(2)
            + 0.221157 * u;
        if n <= 5 {
            let phi = (ssq_m - 2.0 * m[n - 1] * m[n - 1]) / (1.0 - 2.0 * a_n * a_n);
            let phi_sqrt = phi.sqrt();
            for i in 1..n - 1 {
                a[i] = m[i] / phi_sqrt;
            }
            a[n - 1] = a_n;
            a[0] = -a_n;
        } else {
            let c_n1 = m[n - 2] / norm;
            let a_n1 = c_n1 - 3.582633 * u.powi(5) + 5.682633 * u.powi(4)
                - 1.752461 * u.powi(3)
                - 0.293762 * u.powi(2)
                + 0.042981 * u;
            let phi = (ssq_m - 2.0 * m[n - 1] * m[n - 1] - 2.0 * m[n - 2] * m[n - 2])
                / (1.0 - 2.0 * a_n * a_n - 2.0 * a_n1 * a_n1);
            let phi_sqrt = phi.sqrt();
            for i in 2..n - 2 {
                a[i] = m[i] / phi_sqrt;
            }
            a[n - 1] = a_n;
            a[n - 2] = a_n1;
            a[0] = -a_n;
            a[1] = -a_n1;
        }
    }

    let mean = x.iter().sum::<f64>() / n as f64;
    let sse: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let b: f64 = a.iter().zip(x.iter()).map(|(ai, xi)| ai * xi).sum();
    let w = ((b * b) / sse).min(1.0);

    // p-value.
    let p = if n == 3 {
        // Exact distribution for n = 3.
        let p = 6.0 / std::f64::consts::PI * ((w.sqrt()).asin() - (0.75f64.sqrt()).asin());
        p.clamp(0.0, 1.0)
    } else {
        let one_minus_w = 1.0 - w;
        if one_minus_w <= 0.0 {
            1.0
        } else {
            let nf = n as f64;
            let (g, mu, sigma) = if n <= 11 {
                let gamma = -2.273 + 0.459 * nf;
                if gamma - one_minus_w.ln() <= 0.0 {
                    // W below the approximation's working range.
                    return Ok((w, 0.0));
                }
                let g = -(gamma - one_minus_w.ln()).ln();
                let mu = 0.5440 - 0.39978 * nf + 0.025054 * nf * nf - 0.0006714 * nf.powi(3);
                let sigma =
                    (1.3822 - 0.77857 * nf + 0.062767 * nf * nf - 0.0020322 * nf.powi(3)).exp();
                (g, mu, sigma)
            } else {
                let ln_n = nf.ln();
                let g = one_minus_w.ln();
                let mu = -1.5861 - 0.31082 * ln_n - 0.083751 * ln_n * ln_n
                    + 0.0038915 * ln_n.powi(3);
                let sigma = (-0.4803 - 0.082676 * ln_n + 0.0030302 * ln_n * ln_n).exp();
                (g, mu, sigma)
            };
            let z = (g - mu) / sigma;
            (1.0 - standard_normal.cdf(z)).clamp(0.0, 1.0)
        }
    };

    Ok((w, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{ContinuousCDF, Normal};

    #[test]
    fn test_rejects_degenerate_input() {
        assert!(shapiro_wilk(&[1.0, 2.0]).is_err());
        assert!(shapiro_wilk(&[5.0; 10]).is_err());
    }

    #[test]
    fn test_near_perfect_normal_scores() {
        // Data placed exactly at the expected normal order statistics should
        // look as normal as a sample can.
        let normal = Normal::new(0.0, 1.0).unwrap();
        let n = 30;
        let data: Vec<f64> = (0..n)
            .map(|i| normal.inverse_cdf((i as f64 + 1.0 - 0.375) / (n as f64 + 0.25)))
            .collect();
        let (w, p) = shapiro_wilk(&data).unwrap();
        assert!(w > 0.98, "W = {}", w);
        assert!(p > 0.5, "p = {}", p);
    }

    #[test]
    fn test_bimodal_data_rejected() {
        let mut data = vec![0.0; 15];
        data.extend(vec![1.0; 15]);
        let (w, p) = shapiro_wilk(&data).unwrap();
        assert!(w < 0.9, "W = {}", w);
        assert!(p < 0.01, "p = {}", p);
    }

    #[test]
    fn test_w_bounded() {
        let data = [1.2, 3.4, 2.2, 5.6, 4.4, 3.1, 2.8];
        let (w, p) = shapiro_wilk(&data).unwrap();
        assert!(w > 0.0 && w <= 1.0);
        assert!((0.0..=1.0).contains(&p));
    }
}

// src/data_analysis/normality.rs

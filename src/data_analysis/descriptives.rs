// src/data_analysis/descriptives.rs

/// Descriptive-statistics kernels shared by every analysis branch.
/// All functions take plain slices and validate their input instead of
/// panicking on degenerate data.

pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population-form standard deviation (divisor n). Used in the descriptive
/// table; estimation blocks use `std_sample`.
pub fn std_pop(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let m = mean(data);
    (data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64).sqrt()
}

/// Sample standard deviation (divisor n - 1).
pub fn std_sample(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    (data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64).sqrt()
}

pub fn variance_sample(data: &[f64]) -> f64 {
    let s = std_sample(data);
    s * s
}

fn central_moment(data: &[f64], order: i32) -> f64 {
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(order)).sum::<f64>() / data.len() as f64
}

/// Moment-based skewness (g1).
pub fn skewness(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return f64::NAN;
    }
    let m2 = central_moment(data, 2);
    if m2 <= 0.0 {
        return f64::NAN;
    }
    central_moment(data, 3) / m2.powf(1.5)
}

/// Moment-based excess kurtosis (g2).
pub fn kurtosis(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return f64::NAN;
    }
    let m2 = central_moment(data, 2);
    if m2 <= 0.0 {
        return f64::NAN;
    }
    central_moment(data, 4) / (m2 * m2) - 3.0
}

pub fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Quantile by linear interpolation between order statistics.
/// `q` is in [0, 1]; `sorted` must be ascending.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + weight * (sorted[upper] - sorted[lower])
}

pub fn median(data: &[f64]) -> f64 {
    quantile_sorted(&sorted_copy(data), 0.5)
}

/// Five-number summary used by the boxplot recipes (whiskers at the range).
#[derive(Debug, Clone, Copy)]
pub struct BoxStats {
    pub minimum: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub maximum: f64,
}

pub fn box_stats(data: &[f64]) -> BoxStats {
    let sorted = sorted_copy(data);
    BoxStats {
        minimum: sorted.first().copied().unwrap_or(f64::NAN),
        lower_quartile: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        upper_quartile: quantile_sorted(&sorted, 0.75),
        maximum: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Average ranks with tie handling, 1-based.
pub fn rankdata(data: &[f64]) -> Vec<f64> {
    let n = data.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        data[a]
            .partial_cmp(&data[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && data[order[j + 1]] == data[order[i]] {
            j += 1;
        }
        // Average rank over the tied run [i, j].
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        for &index in &order[i..=j] {
            ranks[index] = avg_rank;
        }
        i = j + 1;
    }
    ranks
}

/// Sizes of tied groups (including groups of size 1), for tie corrections.
pub fn tie_group_sizes(data: &[f64]) -> Vec<usize> {
    let sorted = sorted_copy(data);
    let mut sizes = Vec::new();
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j + 1 < sorted.len() && sorted[j + 1] == sorted[i] {
            j += 1;
        }
        sizes.push(j - i + 1);
        i = j + 1;
    }
    sizes
}

/// The sum of (t^3 - t) over tied groups, the term shared by the rank-test
/// tie corrections.
pub fn tie_term(data: &[f64]) -> f64 {
    tie_group_sizes(data)
        .into_iter()
        .map(|t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum()
}

/// Equal-width histogram over the data range; the last bin is closed on the
/// right so the maximum lands in it.
pub fn histogram(data: &[f64], bin_count: usize) -> (Vec<usize>, Vec<f64>) {
    if data.is_empty() || bin_count == 0 {
        return (Vec::new(), Vec::new());
    }
    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut edges = Vec::with_capacity(bin_count + 1);
    let width = if max > min {
        (max - min) / bin_count as f64
    } else {
        1.0
    };
    for i in 0..=bin_count {
        edges.push(min + width * i as f64);
    }
    let mut freq = vec![0usize; bin_count];
    for &x in data {
        let mut bin = ((x - min) / width).floor() as usize;
        if bin >= bin_count {
            bin = bin_count - 1;
        }
        freq[bin] += 1;
    }
    (freq, edges)
}

/// Distinct values with their frequencies, ascending by value.
pub fn value_counts(data: &[f64]) -> Vec<(f64, usize)> {
    let sorted = sorted_copy(data);
    let mut counts: Vec<(f64, usize)> = Vec::new();
    for &x in &sorted {
        match counts.last_mut() {
            Some((value, count)) if *value == x => *count += 1,
            _ => counts.push((x, 1)),
        }
    }
    counts
}

pub fn distinct_count(data: &[f64]) -> usize {
    value_counts(data).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!((mean(&data) - 2.5).abs() < 1e-12);
        assert!((std_pop(&data) - 1.25f64.sqrt()).abs() < 1e-12);
        assert!((std_sample(&data) - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_quantiles_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile_sorted(&sorted, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.5) - 2.5).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.75) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_moments() {
        let data = [1.0, 2.0, 3.0];
        assert!(skewness(&data).abs() < 1e-12);
        assert!((kurtosis(&data) - (-1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_rankdata_ties() {
        assert_eq!(rankdata(&[10.0, 20.0, 20.0, 30.0]), vec![1.0, 2.5, 2.5, 4.0]);
        assert_eq!(tie_group_sizes(&[10.0, 20.0, 20.0, 30.0]), vec![1, 2, 1]);
        assert!((tie_term(&[10.0, 20.0, 20.0, 30.0]) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_closed_last_bin() {
        let (freq, edges) = histogram(&[1.0, 2.0, 2.0, 3.0], 2);
        assert_eq!(edges, vec![1.0, 2.0, 3.0]);
        assert_eq!(freq, vec![1, 3]);
    }

    #[test]
    fn test_value_counts() {
        let counts = value_counts(&[2.0, 1.0, 2.0, 3.0]);
        assert_eq!(counts, vec![(1.0, 1), (2.0, 2), (3.0, 1)]);
    }
}

// src/data_analysis/descriptives.rs

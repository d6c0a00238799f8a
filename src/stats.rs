//! Descriptive statistics shared by the engine and the significance tests
//!
//! One definition of every moment used anywhere in the crate:
//! - mean: unweighted arithmetic mean
//! - variance: Bessel-corrected (divisor n−1)
//! - SEM: sample standard deviation / √n
//!
//! Callers guarantee `data.len() >= 2` where a spread is involved; the
//! functions themselves return 0.0 on degenerate input rather than NaN so
//! downstream payloads stay finite.

/// Unweighted arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Bessel-corrected sample variance (divisor n−1).
///
/// Returns 0.0 when fewer than two observations are present.
pub fn sample_variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64
}

/// Sample standard deviation (square root of the Bessel-corrected variance).
pub fn sample_stddev(data: &[f64]) -> f64 {
    sample_variance(data).sqrt()
}

/// Standard error of the mean: sample stddev / √n.
pub fn sem(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    sample_stddev(data) / (data.len() as f64).sqrt()
}

/// Assign 1-based ranks to `data`, giving tied values their midrank.
///
/// `[1.0, 2.0, 2.0, 3.0]` ranks as `[1.0, 2.5, 2.5, 4.0]`. Returned in the
/// original order of `data`.
pub fn assign_ranks(data: &[f64]) -> Vec<f64> {
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
        // Find the run of tied values starting at sorted position i
        let mut j = i;
        while j + 1 < n && data[order[j + 1]] == data[order[i]] {
            j += 1;
        }
        // Midrank for the whole run (1-based positions i+1 ..= j+1)
        let midrank = (i + j + 2) as f64 / 2.0;
        for &idx in &order[i..=j] {
            ranks[idx] = midrank;
        }
        i = j + 1;
    }
    ranks
}

/// Tie-run sizes in `data` (runs of length ≥ 2 only).
///
/// Used by the Mann-Whitney variance correction.
pub fn tie_counts(data: &[f64]) -> Vec<usize> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut counts = Vec::new();
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i;
        while j + 1 < sorted.len() && sorted[j + 1] == sorted[i] {
            j += 1;
        }
        if j > i {
            counts.push(j - i + 1);
        }
        i = j + 1;
    }
    counts
}

//! Two-sample significance tests against the reference group
//!
//! Three two-sided tests, each reduced to a p-value and a boolean flag:
//!
//! - **Student's t-test**, pooled (equal-variance) variant, df = n1+n2−2,
//!   p-value via the regularized incomplete beta function
//! - **Mann-Whitney U**, normal approximation with tie correction and
//!   continuity correction
//! - **Wilcoxon rank-sum**, plain normal approximation (no tie or
//!   continuity correction)
//!
//! Degenerate input (zero pooled variance, all observations tied) falls
//! back to `p = 1.0` / not significant instead of NaN or a panic.

use serde::{Deserialize, Serialize};

use crate::constants::{MIN_SAMPLE_SIZE, SIGNIFICANCE_LEVEL};
use crate::errors::{EngineError, Result};
use crate::stats;

/// Outcome of one statistical test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Two-sided p-value in [0, 1]
    pub p_value: f64,
    /// `p_value < 0.05`, strict
    pub significant: bool,
}

impl TestOutcome {
    fn from_p(p_value: f64) -> Self {
        let p_value = p_value.clamp(0.0, 1.0);
        Self {
            p_value,
            significant: p_value < SIGNIFICANCE_LEVEL,
        }
    }
}

/// All three test outcomes for one comparison group vs the reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceResult {
    /// Pooled-variance Student's t-test, two-sided
    pub t_test: TestOutcome,
    /// Mann-Whitney U, two-sided
    pub mann_whitney: TestOutcome,
    /// Wilcoxon rank-sum, two-sided
    pub rank_sum: TestOutcome,
}

/// Run all three tests of `comparison` against `reference`.
///
/// Both samples need at least [`MIN_SAMPLE_SIZE`] observations; the tests
/// are undefined below that.
pub fn compute_significance(comparison: &[f64], reference: &[f64]) -> Result<SignificanceResult> {
    for sample in [comparison, reference] {
        if sample.len() < MIN_SAMPLE_SIZE {
            return Err(EngineError::SampleTooSmall {
                len: sample.len(),
                min: MIN_SAMPLE_SIZE,
            });
        }
    }

    Ok(SignificanceResult {
        t_test: TestOutcome::from_p(t_test_p(comparison, reference)),
        mann_whitney: TestOutcome::from_p(mann_whitney_p(comparison, reference)),
        rank_sum: TestOutcome::from_p(rank_sum_p(comparison, reference)),
    })
}

/// Two-sided p-value of the pooled-variance Student's t-test.
///
/// Zero pooled variance: identical means report p = 1.0, different means
/// report p = 0.0 (the samples are constant and distinct).
fn t_test_p(a: &[f64], b: &[f64]) -> f64 {
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let diff = stats::mean(a) - stats::mean(b);

    let df = n1 + n2 - 2.0;
    let pooled_var =
        ((n1 - 1.0) * stats::sample_variance(a) + (n2 - 1.0) * stats::sample_variance(b)) / df;
    let se = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();

    if se == 0.0 {
        return if diff == 0.0 { 1.0 } else { 0.0 };
    }

    let t = diff / se;
    2.0 * student_t_cdf(-t.abs(), df)
}

/// Two-sided p-value of the Mann-Whitney U test (normal approximation,
/// tie-corrected variance, continuity correction).
fn mann_whitney_p(a: &[f64], b: &[f64]) -> f64 {
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let n_total = a.len() + b.len();

    let mut combined = Vec::with_capacity(n_total);
    combined.extend_from_slice(a);
    combined.extend_from_slice(b);
    let ranks = stats::assign_ranks(&combined);

    let r1: f64 = ranks[..a.len()].iter().sum();
    let u1 = r1 - n1 * (n1 + 1.0) / 2.0;
    let u2 = n1 * n2 - u1;
    let u = u1.min(u2);

    let mean_u = n1 * n2 / 2.0;

    // Tie correction: subtract sum(t^3 - t) / (N (N-1)) from (N + 1)
    let n = n_total as f64;
    let tie_term: f64 = stats::tie_counts(&combined)
        .iter()
        .map(|&t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum();
    let var_u = n1 * n2 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));

    if var_u <= 0.0 {
        // Every observation tied: no ordering information at all
        return 1.0;
    }

    // Continuity correction pulls the statistic half a step toward the mean
    let z = (u + 0.5 - mean_u) / var_u.sqrt();
    2.0 * (1.0 - normal_cdf(z.abs()))
}

/// Two-sided p-value of the Wilcoxon rank-sum test (plain normal
/// approximation on the rank sum of the first sample).
fn rank_sum_p(a: &[f64], b: &[f64]) -> f64 {
    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let n = n1 + n2;

    let mut combined = Vec::with_capacity(a.len() + b.len());
    combined.extend_from_slice(a);
    combined.extend_from_slice(b);
    let ranks = stats::assign_ranks(&combined);

    let r1: f64 = ranks[..a.len()].iter().sum();
    let expected = n1 * (n + 1.0) / 2.0;
    let sd = (n1 * n2 * (n + 1.0) / 12.0).sqrt();

    if sd == 0.0 {
        return 1.0;
    }

    let z = (r1 - expected) / sd;
    // The erf polynomial is ~1e-9 off at zero; a balanced rank sum is exactly 1
    if z == 0.0 {
        return 1.0;
    }
    2.0 * (1.0 - normal_cdf(z.abs()))
}

// =============================================================================
// DISTRIBUTION HELPERS
// =============================================================================

/// Standard normal CDF via the error function.
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / 2.0_f64.sqrt()))
}

/// Error function approximation (Abramowitz & Stegun 7.1.26, |err| < 1.5e-7)
fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

/// CDF of Student's t-distribution, P(T <= t) for t <= 0, via the
/// regularized incomplete beta function.
fn student_t_cdf(t: f64, df: f64) -> f64 {
    let x = df / (df + t * t);
    let tail = 0.5 * regularized_beta(x, df / 2.0, 0.5);
    if t <= 0.0 {
        tail
    } else {
        1.0 - tail
    }
}

/// Regularized incomplete beta function I_x(a, b).
fn regularized_beta(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_beta = ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b);

    // Symmetry relation for numerical stability: I_x(a,b) = 1 - I_{1-x}(b,a)
    if x < (a + 1.0) / (a + b + 2.0) {
        let prefix = (a * x.ln() + b * (1.0 - x).ln() - ln_beta).exp();
        prefix / a * beta_cf(x, a, b)
    } else {
        let prefix = (b * (1.0 - x).ln() + a * x.ln() - ln_beta).exp();
        1.0 - prefix / b * beta_cf(1.0 - x, b, a)
    }
}

/// Continued fraction for the incomplete beta function (Lentz's algorithm).
fn beta_cf(x: f64, a: f64, b: f64) -> f64 {
    const MAX_ITER: usize = 200;
    const EPS: f64 = 1e-15;
    const TINY: f64 = 1e-30;

    let mut c = 1.0_f64;
    let mut d = 1.0 - (a + b) * x / (a + 1.0);
    if d.abs() < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut f = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;

        // Even step
        let num_even = m * (b - m) * x / ((a + 2.0 * m - 1.0) * (a + 2.0 * m));
        d = 1.0 + num_even * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + num_even / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        f *= c * d;

        // Odd step
        let num_odd = -(a + m) * (a + b + m) * x / ((a + 2.0 * m) * (a + 2.0 * m + 1.0));
        d = 1.0 + num_odd * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + num_odd / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = c * d;
        f *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }

    f
}

/// Lanczos approximation for ln(Gamma(x)).
fn ln_gamma(x: f64) -> f64 {
    const COEFFS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];

    if x < 0.5 {
        // Reflection formula
        let s = std::f64::consts::PI / (std::f64::consts::PI * x).sin();
        return s.ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut a = COEFFS[0];
    for (i, &c) in COEFFS[1..].iter().enumerate() {
        a += c / (x + 1.0 + i as f64);
    }

    let t = x + 7.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + a.ln()
}

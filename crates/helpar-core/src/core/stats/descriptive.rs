//! Plain (non-circular) sample statistics.

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample covariance (divides by `n - 1`). NaN for fewer than two samples
/// or mismatched lengths.
pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 || n != y.len() {
        return f64::NAN;
    }
    let mx = mean(x);
    let my = mean(y);
    let sum: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    sum / (n - 1) as f64
}

/// Unbiased sample variance.
pub fn variance(values: &[f64]) -> f64 {
    covariance(values, values)
}

pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// True when every sample equals the first one exactly.
pub fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

/// Pearson product-moment correlation. NaN when either series has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 || is_constant(x) || is_constant(y) {
        return f64::NAN;
    }
    let mx = mean(x);
    let my = mean(y);

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let den = (sxx * syy).sqrt();
    if den == 0.0 {
        return f64::NAN;
    }
    (sxy / den).clamp(-1.0, 1.0)
}

/// Linear-interpolated quantile of an ascending-sorted slice, `q` in `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn mean_of_simple_series() {
        assert!(f64_approx_equal(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0));
    }

    #[test]
    fn variance_uses_n_minus_one_denominator() {
        assert!(f64_approx_equal(variance(&[1.0, 2.0, 3.0, 4.0]), 5.0 / 3.0));
        assert!(f64_approx_equal(std_dev(&[2.0, 4.0]), 2.0f64.sqrt()));
    }

    #[test]
    fn covariance_of_single_sample_is_nan() {
        assert!(covariance(&[1.0], &[2.0]).is_nan());
    }

    #[test]
    fn covariance_of_mismatched_lengths_is_nan() {
        assert!(covariance(&[1.0, 2.0], &[2.0]).is_nan());
    }

    #[test]
    fn pearson_of_perfectly_linear_series_is_one() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [3.0, 5.0, 7.0, 9.0];
        assert!(f64_approx_equal(pearson(&x, &y), 1.0));
        let neg: Vec<f64> = y.iter().map(|v| -v).collect();
        assert!(f64_approx_equal(pearson(&x, &neg), -1.0));
    }

    #[test]
    fn pearson_with_constant_series_is_nan() {
        assert!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).is_nan());
    }

    #[test]
    fn is_constant_detects_exact_repeats_only() {
        assert!(is_constant(&[0.1, 0.1, 0.1]));
        assert!(!is_constant(&[0.1, 0.1, 0.1 + 1e-15]));
        assert!(is_constant(&[]));
    }

    #[test]
    fn quantile_interpolates_between_samples() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(f64_approx_equal(quantile_sorted(&sorted, 0.5), 3.0));
        assert!(f64_approx_equal(quantile_sorted(&sorted, 0.25), 2.0));
        assert!(f64_approx_equal(quantile_sorted(&sorted, 0.1), 1.4));
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }
}

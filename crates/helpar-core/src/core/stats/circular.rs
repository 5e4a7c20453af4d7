//! Statistics for angular quantities that wrap at 360°.
//!
//! These functions are the only place the engine treats angles trigonometrically;
//! every other component reaches circular data through them.

use super::descriptive::pearson;
use serde::{Deserialize, Serialize};

/// Below this, `1 - rcs²` is treated as zero and the circular-linear correlation is undefined.
const DEGENERATE_DENOMINATOR: f64 = 1e-12;

/// A sample whose mean resultant length is within this of 1 has no angular spread.
const ZERO_SPREAD: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    #[inline]
    fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Degrees => value.to_radians(),
            AngleUnit::Radians => value,
        }
    }
}

/// Mean direction of a sample of angles, in degrees within (−180, 180].
///
/// The input is interpreted in `unit`; the result is always reported in degrees.
/// An empty sample yields NaN.
pub fn circular_mean(values: &[f64], unit: AngleUnit) -> f64 {
    let (sin_mean, cos_mean) = mean_resultant(values, unit);
    let mean = sin_mean.atan2(cos_mean).to_degrees();
    if mean <= -180.0 { mean + 360.0 } else { mean }
}

/// Length of the mean unit vector of a sample of angles in degrees, in [0, 1].
///
/// 1 means every angle points the same way, whatever multiple of 360° it is written
/// with. An empty sample yields NaN.
pub fn mean_resultant_length(values: &[f64]) -> f64 {
    let (sin_mean, cos_mean) = mean_resultant(values, AngleUnit::Degrees);
    sin_mean.hypot(cos_mean)
}

fn mean_resultant(values: &[f64], unit: AngleUnit) -> (f64, f64) {
    let n = values.len() as f64;
    let (sin_sum, cos_sum) = values.iter().fold((0.0, 0.0), |(s, c), &v| {
        let theta = unit.to_radians(v);
        (s + theta.sin(), c + theta.cos())
    });
    (sin_sum / n, cos_sum / n)
}

fn has_no_spread(values: &[f64]) -> bool {
    1.0 - mean_resultant_length(values) <= ZERO_SPREAD
}

/// Circular-circular correlation of two angle series in degrees.
///
/// Each series is centred on its circular mean and the sines of the deviations are
/// correlated Pearson-style. NaN when either series has no angular spread.
pub fn circular_circular_correlation(x1: &[f64], x2: &[f64]) -> f64 {
    if x1.len() != x2.len() || x1.is_empty() || has_no_spread(x1) || has_no_spread(x2) {
        return f64::NAN;
    }
    let mean1 = circular_mean(x1, AngleUnit::Degrees).to_radians();
    let mean2 = circular_mean(x2, AngleUnit::Degrees).to_radians();

    let (mut num, mut ss1, mut ss2) = (0.0, 0.0, 0.0);
    for (a, b) in x1.iter().zip(x2) {
        let d1 = (a.to_radians() - mean1).sin();
        let d2 = (b.to_radians() - mean2).sin();
        num += d1 * d2;
        ss1 += d1 * d1;
        ss2 += d2 * d2;
    }

    let den = (ss1 * ss2).sqrt();
    if den == 0.0 {
        return f64::NAN;
    }
    (num / den).clamp(-1.0, 1.0)
}

/// Circular-linear correlation between a linear series and an angle series in degrees.
///
/// The magnitude is the multiple correlation of the linear series on (cos θ, sin θ);
/// the sign is that of the ordinary correlation between the linear series and the raw
/// angles. NaN when the angles have no spread, when sine and cosine are collinear, or
/// when a component correlation is undefined.
pub fn circular_linear_correlation(x_linear: &[f64], x_circular: &[f64]) -> f64 {
    if x_linear.len() != x_circular.len() || x_linear.len() < 2 || has_no_spread(x_circular) {
        return f64::NAN;
    }
    let radians: Vec<f64> = x_circular.iter().map(|v| v.to_radians()).collect();
    let cos: Vec<f64> = radians.iter().map(|t| t.cos()).collect();
    let sin: Vec<f64> = radians.iter().map(|t| t.sin()).collect();

    let rc = pearson(x_linear, &cos);
    let rs = pearson(x_linear, &sin);
    let rcs = pearson(&sin, &cos);

    let den = 1.0 - rcs * rcs;
    if !den.is_finite() || den.abs() < DEGENERATE_DENOMINATOR {
        return f64::NAN;
    }
    let num = rc * rc + rs * rs - 2.0 * rc * rs * rcs;
    let magnitude = (num / den).max(0.0).sqrt().min(1.0);

    if pearson(x_linear, &radians) < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::normal_samples;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn same_angle(a: f64, b: f64) -> bool {
        let diff = (a - b).rem_euclid(360.0);
        diff < TOLERANCE || (360.0 - diff) < TOLERANCE
    }

    #[test]
    fn circular_mean_of_constant_sample_returns_that_angle_for_any_representation() {
        for theta in [0.0, 45.0, 179.0, 180.0, 270.0, -90.0, -179.5, 400.0, -720.0 + 30.0] {
            let mean = circular_mean(&[theta; 5], AngleUnit::Degrees);
            assert!(same_angle(mean, theta), "theta={theta}, mean={mean}");
            assert!(mean > -180.0 && mean <= 180.0);
        }
    }

    #[test]
    fn circular_mean_wraps_across_the_branch_cut() {
        let mean = circular_mean(&[170.0, -170.0], AngleUnit::Degrees);
        assert!(same_angle(mean, 180.0));
        assert!(f64_approx_equal(mean, 180.0));
    }

    #[test]
    fn circular_mean_accepts_radians_but_reports_degrees() {
        let mean = circular_mean(&[std::f64::consts::FRAC_PI_2; 3], AngleUnit::Radians);
        assert!(f64_approx_equal(mean, 90.0));
    }

    #[test]
    fn circular_mean_of_empty_sample_is_nan() {
        assert!(circular_mean(&[], AngleUnit::Degrees).is_nan());
    }

    #[test]
    fn circular_circular_self_correlation_is_one() {
        let x = normal_samples(30.0, 10.0, 200, 7);
        assert!(f64_approx_equal(circular_circular_correlation(&x, &x), 1.0));
    }

    #[test]
    fn circular_circular_correlation_with_negated_series_is_strongly_negative() {
        let x = normal_samples(30.0, 10.0, 200, 8);
        let neg: Vec<f64> = x.iter().map(|v| -v).collect();
        assert!(circular_circular_correlation(&x, &neg) < -0.99);
    }

    #[test]
    fn circular_circular_correlation_ignores_wrapping() {
        let x = normal_samples(175.0, 8.0, 200, 9);
        let wrapped: Vec<f64> = x.iter().map(|v| if *v > 180.0 { v - 360.0 } else { *v }).collect();
        let y = normal_samples(-20.0, 8.0, 200, 10);
        let r1 = circular_circular_correlation(&x, &y);
        let r2 = circular_circular_correlation(&wrapped, &y);
        assert!(f64_approx_equal(r1, r2));
    }

    #[test]
    fn circular_circular_correlation_of_constant_series_is_nan() {
        let x = [10.0, 20.0, 30.0];
        assert!(circular_circular_correlation(&x, &[5.0, 5.0, 5.0]).is_nan());
    }

    #[test]
    fn circular_linear_correlation_is_location_invariant() {
        let angles = normal_samples(30.0, 15.0, 300, 11);
        let noise = normal_samples(0.0, 0.2, 300, 12);
        let linear: Vec<f64> = angles
            .iter()
            .zip(&noise)
            .map(|(a, n)| a.to_radians().sin() + n)
            .collect();
        let shifted: Vec<f64> = linear.iter().map(|v| v + 123.4).collect();

        let r1 = circular_linear_correlation(&linear, &angles);
        let r2 = circular_linear_correlation(&shifted, &angles);
        assert!(f64_approx_equal(r1, r2));
        assert!(r1 > 0.3);
    }

    #[test]
    fn circular_linear_correlation_magnitude_never_exceeds_one() {
        for seed in 0..20 {
            let angles = normal_samples(0.0, 90.0, 50, 100 + seed);
            let linear = normal_samples(3.0, 1.0, 50, 200 + seed);
            let r = circular_linear_correlation(&linear, &angles);
            assert!(r.abs() <= 1.0, "seed={seed}, r={r}");
        }
        let angles = normal_samples(10.0, 20.0, 100, 300);
        let exact: Vec<f64> = angles.iter().map(|a| a.to_radians().cos()).collect();
        assert!(circular_linear_correlation(&exact, &angles).abs() <= 1.0);
    }

    #[test]
    fn circular_linear_correlation_takes_sign_of_linear_trend() {
        let angles: Vec<f64> = (0..50).map(|i| -40.0 + 1.5 * i as f64).collect();
        let increasing: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
        let decreasing: Vec<f64> = increasing.iter().map(|v| -v).collect();
        assert!(circular_linear_correlation(&increasing, &angles) > 0.9);
        assert!(circular_linear_correlation(&decreasing, &angles) < -0.9);
    }

    #[test]
    fn circular_linear_correlation_with_constant_angles_is_nan() {
        let r = circular_linear_correlation(&[1.0, 2.0, 3.0], &[45.0, 45.0, 45.0]);
        assert!(r.is_nan());
    }

    #[test]
    fn mean_resultant_length_spans_zero_to_one() {
        assert!(f64_approx_equal(mean_resultant_length(&[20.0, 20.0, 20.0]), 1.0));
        assert!(f64_approx_equal(mean_resultant_length(&[10.0, 370.0, 730.0, -350.0]), 1.0));
        assert!(mean_resultant_length(&[0.0, 180.0]) < TOLERANCE);
        assert!(mean_resultant_length(&[]).is_nan());
    }

    #[test]
    fn correlations_of_one_angle_written_several_ways_are_nan() {
        let wrapped = [10.0, 370.0, 730.0, -350.0];
        let other = [1.0, 2.0, 3.0, 4.0];
        assert!(circular_circular_correlation(&wrapped, &other).is_nan());
        assert!(circular_circular_correlation(&other, &wrapped).is_nan());
        assert!(circular_linear_correlation(&other, &wrapped).is_nan());
    }
}

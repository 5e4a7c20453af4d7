use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reproducible normal samples drawn with the Box-Muller transform.
pub fn normal_samples(mean: f64, sd: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
            let u2: f64 = rng.gen_range(0.0..1.0);
            let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
            mean + sd * z
        })
        .collect()
}

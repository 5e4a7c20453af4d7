use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;
use tracing::{instrument, trace};

/// Added to every component variance so collapsed components stay well defined.
pub const DEFAULT_REG_COVAR: f64 = 1e-6;

/// Keeps empty components from dividing by zero in the M-step.
const MIN_COMPONENT_MASS: f64 = 10.0 * f64::EPSILON;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MixtureError {
    #[error("A {components}-component fit needs at least {required} samples, found {found}")]
    InsufficientSamples {
        components: usize,
        required: usize,
        found: usize,
    },
    #[error("A mixture needs at least one component")]
    NoComponents,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixtureComponent {
    pub mean: f64,
    pub variance: f64,
    pub weight: f64,
}

/// Non-fatal: EM stopped at its iteration limit before the log-likelihood settled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceWarning {
    pub components: usize,
    pub iterations: usize,
    pub last_change: f64,
}

impl std::fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-component EM fit did not converge within {} iterations (last change {:.3e})",
            self.components, self.iterations, self.last_change
        )
    }
}

/// Result of fitting a fixed number of Gaussian components to a univariate sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureFit {
    pub components: Vec<MixtureComponent>,
    pub bic: f64,
    pub log_likelihood: f64,
    pub iterations: usize,
    pub converged: bool,
    last_change: f64,
}

impl MixtureFit {
    pub fn n_components(&self) -> usize {
        self.components.len()
    }

    pub fn convergence_warning(&self) -> Option<ConvergenceWarning> {
        (!self.converged).then_some(ConvergenceWarning {
            components: self.components.len(),
            iterations: self.iterations,
            last_change: self.last_change,
        })
    }
}

/// Expectation-Maximization fit of a 1-D Gaussian mixture.
///
/// Initialization is deterministic: the sorted sample is cut into `k` contiguous
/// blocks of (nearly) equal size, and each block seeds one component with its mean,
/// variance and relative size. Iteration stops once the mean per-sample
/// log-likelihood changes by less than `tolerance`, or after `max_iterations`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianMixture {
    n_components: usize,
    max_iterations: usize,
    tolerance: f64,
    reg_covar: f64,
}

impl GaussianMixture {
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            max_iterations: 400,
            tolerance: 1e-5,
            reg_covar: DEFAULT_REG_COVAR,
        }
    }

    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations.max(1);
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn reg_covar(mut self, reg_covar: f64) -> Self {
        self.reg_covar = reg_covar;
        self
    }

    #[instrument(level = "trace", skip_all, fields(k = self.n_components, n = data.len()))]
    pub fn fit(&self, data: &[f64]) -> Result<MixtureFit, MixtureError> {
        let k = self.n_components;
        if k == 0 {
            return Err(MixtureError::NoComponents);
        }
        let required = 2 * k;
        if data.len() < required {
            return Err(MixtureError::InsufficientSamples {
                components: k,
                required,
                found: data.len(),
            });
        }

        let mut components = self.initial_components(data);
        let mut resp = vec![0.0; data.len() * k];
        let mut previous = f64::NEG_INFINITY;
        let mut last_change = f64::INFINITY;
        let mut converged = false;
        let mut iterations = 0;

        for iteration in 1..=self.max_iterations {
            iterations = iteration;
            let mean_log_likelihood = e_step(data, &components, &mut resp);
            self.m_step(data, &resp, &mut components);

            last_change = mean_log_likelihood - previous;
            previous = mean_log_likelihood;
            if last_change.abs() < self.tolerance {
                converged = true;
                break;
            }
        }

        let log_likelihood = total_log_likelihood(data, &components);
        let n = data.len() as f64;
        let n_parameters = (3 * k - 1) as f64;
        let bic = -2.0 * log_likelihood + n_parameters * n.ln();

        trace!(iterations, converged, log_likelihood, bic, "EM fit finished.");

        Ok(MixtureFit {
            components,
            bic,
            log_likelihood,
            iterations,
            converged,
            last_change,
        })
    }

    fn initial_components(&self, data: &[f64]) -> Vec<MixtureComponent> {
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let k = self.n_components;
        (0..k)
            .map(|j| {
                let block = &sorted[j * n / k..(j + 1) * n / k];
                let size = block.len() as f64;
                let mean = block.iter().sum::<f64>() / size;
                let variance =
                    block.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / size + self.reg_covar;
                MixtureComponent {
                    mean,
                    variance,
                    weight: size / n as f64,
                }
            })
            .collect()
    }

    fn m_step(&self, data: &[f64], resp: &[f64], components: &mut [MixtureComponent]) {
        let k = components.len();
        let n = data.len() as f64;
        for (j, component) in components.iter_mut().enumerate() {
            let mass = data
                .iter()
                .enumerate()
                .map(|(i, _)| resp[i * k + j])
                .sum::<f64>()
                + MIN_COMPONENT_MASS;
            let mean = data
                .iter()
                .enumerate()
                .map(|(i, x)| resp[i * k + j] * x)
                .sum::<f64>()
                / mass;
            let variance = data
                .iter()
                .enumerate()
                .map(|(i, x)| resp[i * k + j] * (x - mean).powi(2))
                .sum::<f64>()
                / mass
                + self.reg_covar;
            *component = MixtureComponent {
                mean,
                variance,
                weight: mass / n,
            };
        }
    }
}

#[inline]
fn log_weighted_density(x: f64, c: &MixtureComponent) -> f64 {
    c.weight.ln() - 0.5 * ((2.0 * PI * c.variance).ln() + (x - c.mean).powi(2) / c.variance)
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

/// Fills `resp` (row-major, `n × k`) with posterior memberships; returns mean log-likelihood.
fn e_step(data: &[f64], components: &[MixtureComponent], resp: &mut [f64]) -> f64 {
    let k = components.len();
    let mut log_probs = vec![0.0; k];
    let mut total = 0.0;
    for (i, &x) in data.iter().enumerate() {
        for (lp, c) in log_probs.iter_mut().zip(components) {
            *lp = log_weighted_density(x, c);
        }
        let norm = log_sum_exp(&log_probs);
        total += norm;
        for (j, lp) in log_probs.iter().enumerate() {
            resp[i * k + j] = (lp - norm).exp();
        }
    }
    total / data.len() as f64
}

fn total_log_likelihood(data: &[f64], components: &[MixtureComponent]) -> f64 {
    let mut log_probs = vec![0.0; components.len()];
    data.iter()
        .map(|&x| {
            for (lp, c) in log_probs.iter_mut().zip(components) {
                *lp = log_weighted_density(x, c);
            }
            log_sum_exp(&log_probs)
        })
        .sum()
}

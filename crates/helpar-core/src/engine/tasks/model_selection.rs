use crate::core::stats::mixture::{ConvergenceWarning, GaussianMixture, MixtureError, MixtureFit};
use crate::engine::config::BimodalityConfig;
use crate::engine::error::{InputError, NumericalError};
use tracing::{trace, warn};

/// Largest number of components compared; also fixes the minimum sample size.
pub const MAX_COMPONENTS: usize = 2;

/// The one- and two-component fits of a single series.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSelection {
    pub single: MixtureFit,
    pub double: MixtureFit,
}

impl ModelSelection {
    pub fn warnings(&self) -> Vec<ConvergenceWarning> {
        [&self.single, &self.double]
            .into_iter()
            .filter_map(MixtureFit::convergence_warning)
            .collect()
    }

    /// Posterior probability of the two-component model.
    pub fn probability_two_component(&self) -> Result<f64, NumericalError> {
        probability_two_component(self.single.bic, self.double.bic)
    }
}

/// Fits one- and two-component Gaussian mixtures to `values`.
///
/// Unconverged fits are kept and logged; they are still usable for classification.
pub fn fit_models(
    name: &str,
    values: &[f64],
    config: &BimodalityConfig,
) -> Result<ModelSelection, InputError> {
    let required = 2 * MAX_COMPONENTS;
    if values.len() < required {
        return Err(InputError::InsufficientSamples {
            name: name.to_string(),
            required,
            found: values.len(),
        });
    }

    let fit = |k: usize| {
        GaussianMixture::new(k)
            .max_iterations(config.max_iterations)
            .tolerance(config.tolerance)
            .fit(values)
            .map_err(|e| match e {
                MixtureError::InsufficientSamples {
                    required, found, ..
                } => InputError::InsufficientSamples {
                    name: name.to_string(),
                    required,
                    found,
                },
                MixtureError::NoComponents => InputError::InsufficientSamples {
                    name: name.to_string(),
                    required,
                    found: values.len(),
                },
            })
    };

    let selection = ModelSelection {
        single: fit(1)?,
        double: fit(MAX_COMPONENTS)?,
    };
    for warning in selection.warnings() {
        warn!(series = name, "{}", warning);
    }
    trace!(
        series = name,
        bic_k1 = selection.single.bic,
        bic_k2 = selection.double.bic,
        "Mixture models fitted."
    );
    Ok(selection)
}

/// Approximate posterior probability of the two-component model from the BIC pair,
/// `1 / (1 + exp((bic_k2 - bic_k1) / 2))`.
///
/// When exactly one BIC is non-finite the model with the finite BIC is taken as
/// certain; when both are, there is nothing to compare.
pub fn probability_two_component(bic_k1: f64, bic_k2: f64) -> Result<f64, NumericalError> {
    match (bic_k1.is_finite(), bic_k2.is_finite()) {
        (true, true) => Ok(1.0 / (1.0 + (0.5 * (bic_k2 - bic_k1)).exp())),
        (true, false) => Ok(0.0),
        (false, true) => Ok(1.0),
        (false, false) => Err(NumericalError::UndefinedBic { bic_k1, bic_k2 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::normal_samples;

    #[test]
    fn equal_bics_give_even_odds() {
        assert_eq!(probability_two_component(100.0, 100.0).unwrap(), 0.5);
    }

    #[test]
    fn lower_two_component_bic_favours_two_components() {
        assert!(probability_two_component(100.0, 80.0).unwrap() > 0.99);
        assert!(probability_two_component(80.0, 100.0).unwrap() < 0.01);
    }

    #[test]
    fn extreme_bic_gaps_saturate_without_nan() {
        assert_eq!(probability_two_component(0.0, 1e6).unwrap(), 0.0);
        assert_eq!(probability_two_component(1e6, 0.0).unwrap(), 1.0);
    }

    #[test]
    fn single_non_finite_bic_favours_the_finite_model() {
        assert_eq!(probability_two_component(10.0, f64::NAN).unwrap(), 0.0);
        assert_eq!(probability_two_component(10.0, f64::INFINITY).unwrap(), 0.0);
        assert_eq!(probability_two_component(f64::NAN, 10.0).unwrap(), 1.0);
    }

    #[test]
    fn two_non_finite_bics_are_an_error() {
        assert!(matches!(
            probability_two_component(f64::NAN, f64::INFINITY),
            Err(NumericalError::UndefinedBic { .. })
        ));
    }

    #[test]
    fn fit_models_rejects_short_series() {
        let result = fit_models("CG", &[1.0, 2.0, 3.0], &BimodalityConfig::default());
        assert_eq!(
            result,
            Err(InputError::InsufficientSamples {
                name: "CG".to_string(),
                required: 4,
                found: 3
            })
        );
    }

    #[test]
    fn fit_models_returns_one_and_two_component_fits() {
        let data = normal_samples(0.0, 1.0, 200, 21);
        let selection = fit_models("AT", &data, &BimodalityConfig::default()).unwrap();
        assert_eq!(selection.single.n_components(), 1);
        assert_eq!(selection.double.n_components(), 2);
        assert!(selection.single.converged);
    }

    #[test]
    fn fit_models_reports_unconverged_fits_as_warnings() {
        let mut data = normal_samples(0.0, 1.0, 100, 22);
        data.extend(normal_samples(3.0, 1.0, 100, 23));
        let config = BimodalityConfig {
            max_iterations: 1,
            ..BimodalityConfig::default()
        };
        let selection = fit_models("AT", &data, &config).unwrap();
        let warnings = selection.warnings();
        assert!(!warnings.is_empty());
        assert!(warnings.iter().all(|w| w.iterations == 1));
    }
}

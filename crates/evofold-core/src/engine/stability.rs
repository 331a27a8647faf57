use super::config::{validate_log_num_conformations, validate_temperature};
use super::error::FoldError;
use tracing::{instrument, warn};

/// Boltzmann reduction of one sequence's energies over a conformation set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltzmannSummary {
    pub native_index: usize,
    pub native_energy: f64,
    /// Equilibrium probability of the native conformation, in (0, 1].
    pub stability: f64,
    /// `T ln Σ_{c != native} exp(-(E_c - E_native) / T)`; `-inf` when nothing
    /// competes with the native conformation.
    pub delta_g: f64,
}

/// Picks the native conformation and its Boltzmann probability.
///
/// Weights are shifted by the minimum energy, so the native weight is exactly 1
/// and the sum cannot overflow. The first minimum wins ties. A temperature
/// that is not positive and finite is a configuration error.
#[instrument(level = "trace", skip_all, fields(temperature, count = energies.len()))]
pub fn summarize(energies: &[f64], temperature: f64) -> Result<BoltzmannSummary, FoldError> {
    validate_temperature(temperature)?;
    if energies.is_empty() {
        return Err(FoldError::Invariant(
            "cannot summarize an empty conformation set".to_string(),
        ));
    }
    if let Some(position) = energies.iter().position(|e| !e.is_finite()) {
        return Err(FoldError::Invariant(format!(
            "conformation {position} has non-finite energy {}",
            energies[position]
        )));
    }

    let mut native_index = 0;
    for (index, &energy) in energies.iter().enumerate().skip(1) {
        if energy < energies[native_index] {
            native_index = index;
        }
    }
    let native_energy = energies[native_index];

    let competing: f64 = energies
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != native_index)
        .map(|(_, &energy)| (-(energy - native_energy) / temperature).exp())
        .sum();

    if competing == 0.0 && energies.len() > 1 {
        warn!(
            temperature,
            count = energies.len(),
            "All competing Boltzmann weights underflowed; the native state is treated as certain."
        );
    }

    Ok(BoltzmannSummary {
        native_index,
        native_energy,
        stability: 1.0 / (1.0 + competing),
        delta_g: temperature * competing.ln(),
    })
}

/// Random-energy-model folding free energy.
///
/// Treats `energies` as a sample of a Gaussian density of states over
/// `exp(log_num_conformations)` conformations and compares the native energy
/// with the estimated free energy of that ensemble:
/// `E_native - (mu - sigma^2 / (2T) - T ln N)`.
pub fn random_energy_delta_g(
    energies: &[f64],
    native_energy: f64,
    temperature: f64,
    log_num_conformations: f64,
) -> Result<f64, FoldError> {
    validate_temperature(temperature)?;
    validate_log_num_conformations(Some(log_num_conformations))?;
    if energies.is_empty() {
        return Err(FoldError::Invariant(
            "cannot estimate a free energy from an empty decoy set".to_string(),
        ));
    }
    let count = energies.len() as f64;
    let mean = energies.iter().sum::<f64>() / count;
    let variance = energies.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / count;

    let ensemble = mean - variance / (2.0 * temperature) - temperature * log_num_conformations;
    Ok(native_energy - ensemble)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ConfigError;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn single_conformation_is_certain() {
        let summary = summarize(&[-3.0], 0.6).unwrap();
        assert_eq!(summary.native_index, 0);
        assert_eq!(summary.stability, 1.0);
        assert_eq!(summary.delta_g, f64::NEG_INFINITY);
    }

    #[test]
    fn hand_computed_four_state_values() {
        let summary = summarize(&[-2.0, -1.0, -1.0, -1.0], 1.0).unwrap();
        let e = std::f64::consts::E;
        assert_eq!(summary.native_index, 0);
        assert_eq!(summary.native_energy, -2.0);
        assert!((summary.stability - 1.0 / (1.0 + 3.0 / e)).abs() < TOLERANCE);
        assert!((summary.delta_g - (3.0f64.ln() - 1.0)).abs() < TOLERANCE);
    }

    #[test]
    fn delta_g_matches_log_odds_of_stability() {
        let energies = [0.5, -1.25, 0.0, -0.75, 2.0];
        let temperature = 0.8;
        let summary = summarize(&energies, temperature).unwrap();
        let p = summary.stability;
        let expected = -temperature * (p / (1.0 - p)).ln();
        assert!((summary.delta_g - expected).abs() < 1e-9);
    }

    #[test]
    fn ties_go_to_the_first_minimum() {
        let summary = summarize(&[0.0, -1.0, -1.0], 1.0).unwrap();
        assert_eq!(summary.native_index, 1);

        let degenerate = summarize(&[0.0; 4], 1.0).unwrap();
        assert_eq!(degenerate.native_index, 0);
        assert!((degenerate.stability - 0.25).abs() < TOLERANCE);
    }

    #[test]
    fn shifting_all_energies_changes_nothing_but_the_native_energy() {
        let base = summarize(&[-1.0, 0.5, 2.0], 0.6).unwrap();
        let shifted = summarize(&[999.0, 1000.5, 1002.0], 0.6).unwrap();
        assert_eq!(base.native_index, shifted.native_index);
        assert!((base.stability - shifted.stability).abs() < TOLERANCE);
        assert!((base.delta_g - shifted.delta_g).abs() < 1e-9);
    }

    #[test]
    fn underflowed_competitors_give_full_stability() {
        let summary = summarize(&[-1000.0, 0.0], 0.01).unwrap();
        assert_eq!(summary.stability, 1.0);
        assert_eq!(summary.delta_g, f64::NEG_INFINITY);
    }

    #[test]
    fn empty_and_non_finite_inputs_are_invariant_violations() {
        assert!(matches!(summarize(&[], 1.0), Err(FoldError::Invariant(_))));
        assert!(matches!(
            summarize(&[0.0, f64::NAN], 1.0),
            Err(FoldError::Invariant(_))
        ));
    }

    #[test]
    fn non_positive_temperatures_are_configuration_errors() {
        for temperature in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = summarize(&[-2.0, -1.0, 0.0], temperature);
            assert!(matches!(
                result,
                Err(FoldError::Configuration(ConfigError::NonPositiveTemperature(_)))
            ));
        }
        assert!(matches!(
            random_energy_delta_g(&[-1.0, 0.0], -1.0, 0.0, 2.0),
            Err(FoldError::Configuration(ConfigError::NonPositiveTemperature(_)))
        ));
        assert!(matches!(
            random_energy_delta_g(&[-1.0, 0.0], -1.0, 1.0, f64::NAN),
            Err(FoldError::Configuration(ConfigError::InvalidLogConformations(_)))
        ));
    }

    #[test]
    fn random_energy_estimate_uses_mean_and_variance() {
        // mean -1, variance 1
        let energies = [-2.0, 0.0, -2.0, 0.0];
        let delta_g = random_energy_delta_g(&energies, -2.0, 0.5, 10.0f64.ln()).unwrap();
        let expected = -2.0 - (-1.0 - 1.0 / (2.0 * 0.5) - 0.5 * 10.0f64.ln());
        assert!((delta_g - expected).abs() < TOLERANCE);
        assert!(random_energy_delta_g(&[], 0.0, 1.0, 1.0).is_err());
    }
}

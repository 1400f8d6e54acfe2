//! Linear (AWGN) and nonlinear (phase noise and rotation) channel impairments
//!
//! Both impairments return a new signal and leave their input untouched. Randomness is drawn from a
//! caller-supplied random number generator, so that a seeded generator gives reproducible output.

use std::f64::consts::PI;

use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::{
    common::{check_finite, check_finite_signal},
    utils, Error, Signal,
};

/// Returns signal at the output of an additive white Gaussian noise (AWGN) channel.
///
/// # Parameters
///
/// - `syms_tx`: Signal to be distorted.
///
/// - `snr_db`: Ratio (dB) of signal power to noise power. The signal power is taken to be the
///   variance of `syms_tx`, and the noise power `N0` is split evenly between the in-phase and
///   quadrature components, each of which gets Gaussian noise of standard deviation
///   `sqrt(N0 / 2)`.
///
/// - `rng`: Random number generator to be used.
///
/// # Returns
///
/// - `syms_rx`: Distorted signal, of the same length as `syms_tx`.
///
/// # Errors
///
/// Returns an error if `snr_db` or any sample of `syms_tx` is not finite, if `syms_tx` is nonempty
/// with zero variance (which is the case for any constant signal) or with a variance that
/// overflows, or if the noise standard deviation implied by `snr_db` overflows.
pub fn awgn<R: Rng>(syms_tx: &[Complex64], snr_db: f64, rng: &mut R) -> Result<Signal, Error> {
    check_finite("snr_db", snr_db)?;
    check_finite_signal(syms_tx)?;
    if syms_tx.is_empty() {
        return Ok(Vec::new());
    }
    let signal_power = utils::variance(syms_tx);
    if signal_power == 0.0 {
        return Err(Error::DegenerateSignal(
            "Signal variance is zero, so noise power cannot be set from SNR".to_string(),
        ));
    }
    if !signal_power.is_finite() {
        return Err(Error::DegenerateSignal(
            "Signal variance overflows, so noise power cannot be set from SNR".to_string(),
        ));
    }
    let es_over_n0 = 10f64.powf(0.1 * snr_db);
    let n0 = signal_power / es_over_n0;
    let sigma = (0.5 * n0).sqrt();
    if !sigma.is_finite() {
        return Err(Error::InvalidInput(format!(
            "Noise standard deviation overflows for snr_db = {snr_db}"
        )));
    }
    debug!(signal_power, n0, sigma, "Adding AWGN");
    Ok(syms_tx
        .iter()
        .map(|&x| {
            let n_i: f64 = rng.sample(StandardNormal);
            let n_q: f64 = rng.sample(StandardNormal);
            x + sigma * Complex64::new(n_i, n_q)
        })
        .collect())
}

/// Returns signal at the output of a channel with random phase noise and constant rotation.
///
/// # Parameters
///
/// - `syms_tx`: Signal to be distorted.
///
/// - `phase_noise`: Phase noise parameter. Each symbol is rotated by an independent Gaussian phase
///   offset whose standard deviation in radians is `phase_noise * PI / 180`.
///
/// - `rotation_deg`: Rotation (degrees) applied uniformly to all symbols after the phase noise.
///
/// - `rng`: Random number generator to be used.
///
/// # Returns
///
/// - `syms_rx`: Distorted signal, of the same length as `syms_tx`.
///
/// # Errors
///
/// Returns an error if `phase_noise` or `rotation_deg` is not finite.
pub fn phase_noise_and_rotation<R: Rng>(
    syms_tx: &[Complex64],
    phase_noise: f64,
    rotation_deg: f64,
    rng: &mut R,
) -> Result<Signal, Error> {
    check_finite("phase_noise", phase_noise)?;
    check_finite("rotation_deg", rotation_deg)?;
    let phase_sigma = phase_noise * (PI / 180.0);
    let rotation = Complex64::cis(rotation_deg * PI / 180.0);
    debug!(phase_sigma, rotation_deg, "Adding phase noise and rotation");
    Ok(syms_tx
        .iter()
        .map(|&x| {
            let phase_offset = phase_sigma * rng.sample::<f64, _>(StandardNormal);
            x * Complex64::cis(phase_offset)
        })
        .map(|x| x * rotation)
        .collect())
}

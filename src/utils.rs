//! # Some useful functions for simulating link performance
//!
//! The [`random_indices`] function returns a given number of random symbol indices; the
//! [`bit_error_count`] and [`symbol_error_count`] functions return the numbers of bit errors and
//! symbol errors between two index sequences; and
//! the [`modnorm`] and [`scale`] functions normalize the average power of a signal.
//!
//! # Examples
//!
//! The code below illustrates the usage of the functions in this module.
//! ```
//! use qam16::{utils, Modem};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let modem = Modem::new();
//! let indices = utils::random_indices(40, &mut rng);
//! let syms = modem.modulate(&indices)?;
//! let indices_hat = modem.demodulate(&syms);
//! assert_eq!(utils::bit_error_count(&indices_hat, &indices)?, 0);
//! assert_eq!(utils::symbol_error_count(&indices_hat, &indices), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use num_complex::Complex64;
use rand::Rng;

use crate::{
    common::{check_finite_signal, check_indices, NUM_POINTS, REFERENCE_POWER},
    Error, Signal,
};

/// Returns given number of random symbol indices, uniformly distributed over `[0, 16)`.
///
/// # Parameters
///
/// - `num_indices`: Number of random indices to be generated.
///
/// - `rng`: Random number generator to be used.
///
/// # Returns
///
/// - `indices`: Random indices.
pub fn random_indices<R: Rng>(num_indices: usize, rng: &mut R) -> Vec<usize> {
    (0 .. num_indices)
        .map(|_| rng.random_range(0 .. NUM_POINTS))
        .collect()
}

/// Returns number of bit errors in a received index sequence with respect to a transmitted one.
///
/// Each index is taken as its 4-bit binary representation, and the bits of all indices are
/// concatenated in sequence order. The result is the number of bit positions in which the two
/// concatenations differ; it is an absolute count, not normalized by the number of bits.
///
/// # Parameters
///
/// - `rx`: Received (recovered) indices.
///
/// - `tx`: Transmitted indices.
///
/// # Returns
///
/// - `bit_err_count`: Number of differing bits.
///
/// # Errors
///
/// Returns an error if `rx` and `tx` differ in length, or if any index is not in `[0, 16)`.
pub fn bit_error_count(rx: &[usize], tx: &[usize]) -> Result<usize, Error> {
    if rx.len() != tx.len() {
        return Err(Error::LengthMismatch {
            rx_len: rx.len(),
            tx_len: tx.len(),
        });
    }
    check_indices(rx)?;
    check_indices(tx)?;
    Ok(rx
        .iter()
        .zip(tx)
        .map(|(&r, &t)| (r ^ t).count_ones() as usize)
        .sum())
}

/// Returns number of symbol errors in a received index sequence with respect to a transmitted one.
///
/// A symbol error is a position at which the received index differs from the transmitted one,
/// however many of its 4 bits are wrong. Only the first `min(rx.len(), tx.len())` positions are
/// compared.
pub fn symbol_error_count(rx: &[usize], tx: &[usize]) -> usize {
    rx.iter().zip(tx).filter(|(r, t)| r != t).count()
}

/// Returns mean squared magnitude of a signal (`NaN` for an empty signal).
#[allow(clippy::cast_precision_loss)]
pub(crate) fn average_power(signal: &[Complex64]) -> f64 {
    signal.iter().map(Complex64::norm_sqr).sum::<f64>() / signal.len() as f64
}

/// Returns variance of a signal, i.e., mean squared magnitude of its deviation from its mean
/// (`NaN` for an empty signal).
#[allow(clippy::cast_precision_loss)]
pub(crate) fn variance(signal: &[Complex64]) -> f64 {
    let mean = signal.iter().sum::<Complex64>() / signal.len() as f64;
    signal.iter().map(|&x| (x - mean).norm_sqr()).sum::<f64>() / signal.len() as f64
}

/// Returns factor by which a signal must be scaled for its average power to equal that of the
/// unscaled constellation.
///
/// # Parameters
///
/// - `signal`: Signal whose average power is measured. It is not modified.
///
/// # Returns
///
/// - `scale`: `sqrt(10 / P)`, where `P` is the mean squared magnitude of `signal`.
///
/// # Errors
///
/// Returns an error if `signal` is empty or contains a non-finite sample, or if its average power
/// is zero or too small or too large for the scale factor to be a finite nonzero number.
///
/// # Examples
///
/// ```
/// use num_complex::Complex64;
/// use qam16::utils;
///
/// let signal = vec![Complex64::new(0.0, 2.0); 4];
/// let scale = utils::modnorm(&signal)?;
/// assert!((scale - 10f64.sqrt() / 2.0).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn modnorm(signal: &[Complex64]) -> Result<f64, Error> {
    if signal.is_empty() {
        return Err(Error::DegenerateSignal(
            "Cannot measure power of an empty signal".to_string(),
        ));
    }
    check_finite_signal(signal)?;
    let measured_power = average_power(signal);
    if measured_power == 0.0 {
        return Err(Error::DegenerateSignal(
            "Average power of signal is zero".to_string(),
        ));
    }
    if !measured_power.is_finite() {
        return Err(Error::DegenerateSignal(
            "Average power of signal overflows".to_string(),
        ));
    }
    let scale = (REFERENCE_POWER / measured_power).sqrt();
    if !scale.is_finite() || scale == 0.0 {
        return Err(Error::DegenerateSignal(format!(
            "Average power of signal ({measured_power:e}) gives unrepresentable scale factor"
        )));
    }
    Ok(scale)
}

/// Returns copy of a signal with every sample multiplied by a given factor.
#[must_use]
pub fn scale(signal: &[Complex64], factor: f64) -> Signal {
    signal.iter().map(|&x| x * factor).collect()
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_random_indices() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_indices(0, &mut rng).is_empty());
        let num_indices = 16000;
        let indices = random_indices(num_indices, &mut rng);
        assert_eq!(indices.len(), num_indices);
        assert!(indices.iter().all(|&k| k < NUM_POINTS));
        for k in 0 .. NUM_POINTS {
            let count = indices.iter().filter(|&&x| x == k).count();
            assert!(count > 800 && count < 1200, "index {k} drawn {count} times");
        }
        // Same seed, same indices
        assert_eq!(
            random_indices(32, &mut StdRng::seed_from_u64(5)),
            random_indices(32, &mut StdRng::seed_from_u64(5))
        );
    }

    #[test]
    fn test_bit_error_count() {
        // Invalid input
        assert!(matches!(
            bit_error_count(&[1, 2], &[1, 2, 3]),
            Err(Error::LengthMismatch {
                rx_len: 2,
                tx_len: 3
            })
        ));
        assert!(matches!(
            bit_error_count(&[1, 16], &[1, 2]),
            Err(Error::InvalidIndex {
                index: 16,
                position: 1
            })
        ));
        assert!(matches!(
            bit_error_count(&[1, 2], &[17, 2]),
            Err(Error::InvalidIndex {
                index: 17,
                position: 0
            })
        ));
        // Valid input
        assert_eq!(bit_error_count(&[], &[]).unwrap(), 0);
        assert_eq!(bit_error_count(&[0], &[15]).unwrap(), 4);
        assert_eq!(bit_error_count(&[5, 3, 12], &[4, 3, 15]).unwrap(), 3);
        let a = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
        let b = [15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0];
        assert_eq!(bit_error_count(&a, &a).unwrap(), 0);
        assert_eq!(bit_error_count(&a, &b).unwrap(), 64);
        assert_eq!(
            bit_error_count(&a, &b).unwrap(),
            bit_error_count(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_bit_error_count_matches_bit_strings() {
        let mut rng = StdRng::seed_from_u64(11);
        let rx = random_indices(200, &mut rng);
        let tx = random_indices(200, &mut rng);
        let to_bits = |indices: &[usize]| -> String {
            indices.iter().map(|k| format!("{k:04b}")).collect()
        };
        let expected = to_bits(&rx)
            .chars()
            .zip(to_bits(&tx).chars())
            .filter(|(r, t)| r != t)
            .count();
        assert_eq!(bit_error_count(&rx, &tx).unwrap(), expected);
    }

    #[test]
    fn test_symbol_error_count() {
        assert_eq!(symbol_error_count(&[], &[3, 4]), 0);
        assert_eq!(symbol_error_count(&[3, 4], &[]), 0);
        // One wrong bit and four wrong bits each count as a single symbol error.
        assert_eq!(symbol_error_count(&[5, 0, 9], &[4, 15, 9]), 2);
        assert_eq!(bit_error_count(&[5, 0, 9], &[4, 15, 9]).unwrap(), 5);
        // Longer `rx`
        let tx = [1, 0, 0, 15, 7, 7, 0, 0];
        let rx = [1, 9, 0, 14, 7, 7, 0, 0, 0, 1];
        assert_eq!(symbol_error_count(&rx, &tx), 2);
        // Shorter `rx`
        let tx = [1, 0, 0, 15, 7, 7, 0, 0, 0, 1];
        let rx = [1, 9, 0, 14, 7, 7, 0, 0];
        assert_eq!(symbol_error_count(&rx, &tx), 2);
    }

    #[test]
    fn test_average_power() {
        assert!(average_power(&[]).is_nan());
        let signal = [Complex64::new(3.0, 4.0), Complex64::new(1.0, 0.0)];
        assert_float_eq!(average_power(&signal), 13.0, abs <= 1e-12);
    }

    #[test]
    fn test_variance() {
        assert!(variance(&[]).is_nan());
        assert_float_eq!(variance(&[Complex64::new(3.0, -1.0); 5]), 0.0, abs <= 1e-12);
        let signal = [Complex64::new(1.0, 1.0), Complex64::new(-1.0, -1.0)];
        assert_float_eq!(variance(&signal), 2.0, abs <= 1e-12);
        let signal = [Complex64::new(2.0, 0.0), Complex64::new(4.0, 0.0)];
        assert_float_eq!(variance(&signal), 1.0, abs <= 1e-12);
    }

    #[test]
    fn test_modnorm() {
        // Invalid input
        assert!(matches!(modnorm(&[]), Err(Error::DegenerateSignal(_))));
        assert!(matches!(
            modnorm(&[Complex64::new(0.0, 0.0); 8]),
            Err(Error::DegenerateSignal(_))
        ));
        // Power so small that the scale factor overflows
        assert!(matches!(
            modnorm(&[Complex64::new(1e-160, 0.0); 4]),
            Err(Error::DegenerateSignal(_))
        ));
        // Power that overflows
        assert!(matches!(
            modnorm(&[Complex64::new(1e160, 0.0); 4]),
            Err(Error::DegenerateSignal(_))
        ));
        assert!(matches!(
            modnorm(&[Complex64::new(1.0, 0.0), Complex64::new(f64::NAN, 0.0)]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            modnorm(&[Complex64::new(0.0, f64::INFINITY); 2]),
            Err(Error::InvalidInput(_))
        ));
        // Valid input
        assert_float_eq!(
            modnorm(&[Complex64::new(1e-100, 0.0); 4]).unwrap(),
            10f64.sqrt() * 1e100,
            rmax <= 1e-12
        );
        for m in [0.5, 1.0, 3.0, 42.0] {
            let signal: Vec<Complex64> = (0 .. 10)
                .map(|k| Complex64::from_polar(m, 0.3 * f64::from(k)))
                .collect();
            assert_float_eq!(modnorm(&signal).unwrap(), 10f64.sqrt() / m, rmax <= 1e-12);
        }
    }

    #[test]
    fn test_scale() {
        assert!(scale(&[], 2.0).is_empty());
        let signal = [Complex64::new(1.0, -2.0), Complex64::new(0.5, 0.0)];
        let scaled = scale(&signal, 2.0);
        assert_eq!(
            scaled,
            [Complex64::new(2.0, -4.0), Complex64::new(1.0, 0.0)]
        );
        let scaled = scale(&signal, modnorm(&signal).unwrap());
        assert_float_eq!(average_power(&scaled), REFERENCE_POWER, rmax <= 1e-12);
    }
}

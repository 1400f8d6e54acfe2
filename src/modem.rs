//! 16-QAM modem: modulation, demodulation and channel impairments

use itertools::Itertools;
use num_complex::Complex64;
use rand::Rng;

use crate::{channel, common::check_indices, utils, ConstellationMap, Error, Signal};

/// 16-QAM modem built around a fixed constellation map
#[derive(Clone, PartialEq, Debug, Copy, Default)]
pub struct Modem {
    /// Constellation map shared by the modulator and demodulator
    map: ConstellationMap,
}

impl Modem {
    /// Returns 16-QAM modem.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: ConstellationMap::new(),
        }
    }

    /// Returns constellation map used by the modem.
    #[must_use]
    pub fn constellation(&self) -> &ConstellationMap {
        &self.map
    }

    /// Returns symbols corresponding to given indices.
    ///
    /// # Parameters
    ///
    /// - `indices`: Symbol indices to be modulated, each in `[0, 16)`.
    ///
    /// # Returns
    ///
    /// - `syms`: Constellation points for the indices, in the same order.
    ///
    /// # Errors
    ///
    /// Returns an error if any index is not in `[0, 16)`.
    ///
    /// # Examples
    /// ```
    /// use num_complex::Complex64;
    /// use qam16::Modem;
    ///
    /// let modem = Modem::new();
    /// let syms = modem.modulate(&[0, 5, 15])?;
    /// assert_eq!(
    ///     syms,
    ///     [
    ///         Complex64::new(-3.0, -3.0),
    ///         Complex64::new(-1.0, -1.0),
    ///         Complex64::new(1.0, 1.0)
    ///     ]
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn modulate(&self, indices: &[usize]) -> Result<Signal, Error> {
        check_indices(indices)?;
        indices
            .iter()
            .map(|&index| self.map.forward(index))
            .collect()
    }

    /// Returns indices of the constellation points nearest to given received symbols.
    ///
    /// # Parameters
    ///
    /// - `syms_rx`: Received symbols.
    ///
    /// # Returns
    ///
    /// - `indices_hat`: For each received symbol, the index of the constellation point at minimum
    ///   Euclidean distance from it. Ties go to the lowest index.
    ///
    /// # Examples
    /// ```
    /// use num_complex::Complex64;
    /// use qam16::Modem;
    ///
    /// let modem = Modem::new();
    /// let syms_rx = [Complex64::new(-2.9, -3.2), Complex64::new(0.8, 1.3)];
    /// assert_eq!(modem.demodulate(&syms_rx), [0, 15]);
    /// ```
    #[must_use]
    pub fn demodulate(&self, syms_rx: &[Complex64]) -> Vec<usize> {
        syms_rx.iter().map(|&sym| self.nearest_index(sym)).collect()
    }

    /// Returns signal with additive white Gaussian noise at a given SNR.
    ///
    /// See [`channel::awgn`] for details.
    ///
    /// # Errors
    ///
    /// Returns an error if `snr_db` or any sample of `syms_tx` is not finite, or if `syms_tx` is
    /// nonempty with zero or overflowing variance.
    ///
    /// # Examples
    /// ```
    /// use qam16::Modem;
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let modem = Modem::new();
    /// let indices = [3, 14, 7, 0, 9];
    /// let syms_rx = modem.linear_noise(&modem.modulate(&indices)?, 60.0, &mut rng)?;
    /// assert_eq!(modem.demodulate(&syms_rx), indices);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[allow(clippy::unused_self)]
    pub fn linear_noise<R: Rng>(
        &self,
        syms_tx: &[Complex64],
        snr_db: f64,
        rng: &mut R,
    ) -> Result<Signal, Error> {
        channel::awgn(syms_tx, snr_db, rng)
    }

    /// Returns signal with random phase noise followed by a constant rotation.
    ///
    /// See [`channel::phase_noise_and_rotation`] for details.
    ///
    /// # Errors
    ///
    /// Returns an error if `phase_noise` or `rotation_deg` is not finite.
    #[allow(clippy::unused_self)]
    pub fn non_linear_noise<R: Rng>(
        &self,
        syms_tx: &[Complex64],
        phase_noise: f64,
        rotation_deg: f64,
        rng: &mut R,
    ) -> Result<Signal, Error> {
        channel::phase_noise_and_rotation(syms_tx, phase_noise, rotation_deg, rng)
    }

    /// Returns number of bit errors in received indices with respect to transmitted indices.
    ///
    /// Despite its name, this is an absolute count of differing bits, not a rate; see
    /// [`utils::bit_error_count`].
    ///
    /// # Errors
    ///
    /// Returns an error if `rx` and `tx` differ in length, or if any index is not in `[0, 16)`.
    #[allow(clippy::unused_self)]
    pub fn bit_error_rate(&self, rx: &[usize], tx: &[usize]) -> Result<usize, Error> {
        utils::bit_error_count(rx, tx)
    }

    /// Returns factor that scales a signal to the average power of the unscaled constellation.
    ///
    /// See [`utils::modnorm`] for details.
    ///
    /// # Errors
    ///
    /// Returns an error if `signal` is empty or has a non-finite sample, or if its average power is
    /// zero or gives no finite nonzero scale factor.
    #[allow(clippy::unused_self)]
    pub fn modnorm(&self, signal: &[Complex64]) -> Result<f64, Error> {
        utils::modnorm(signal)
    }

    /// Returns index of the constellation point nearest to a given symbol.
    fn nearest_index(&self, sym: Complex64) -> usize {
        self.map
            .points()
            .iter()
            .map(|&point| (sym - point).norm_sqr())
            .position_min_by(f64::total_cmp)
            .unwrap_or_default()
    }
}

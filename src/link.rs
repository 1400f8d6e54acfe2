//! Single pass of index data over an impaired 16-QAM link

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    common::{check_finite, BITS_PER_SYMBOL},
    utils, Error, Modem,
};

/// Parameters for one pass over a 16-QAM link
#[derive(Clone, PartialEq, Debug, Copy, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkParams {
    /// Ratio (dB) of signal power to noise power for the AWGN stage (`None` skips the stage)
    pub snr_db: Option<f64>,
    /// Phase noise parameter (standard deviation of per-symbol phase offset, in degrees)
    pub phase_noise: f64,
    /// Constant rotation (degrees) of the received constellation
    pub rotation_deg: f64,
    /// Whether received symbols are rescaled to the constellation power before demodulation
    pub normalize_rx: bool,
}

impl LinkParams {
    /// Returns link parameters parsed from a JSON string. Missing fields take default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid JSON for link parameters, or if any parameter
    /// is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use qam16::LinkParams;
    ///
    /// let params = LinkParams::from_json(r#"{"snr_db": 12.0, "rotation_deg": 5.0}"#)?;
    /// assert_eq!(params.snr_db, Some(12.0));
    /// assert_eq!(params.phase_noise, 0.0);
    /// assert!(!params.normalize_rx);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let params: Self = serde_json::from_str(json)?;
        check_link_params(&params)?;
        Ok(params)
    }

    /// Returns link parameters read from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or if its contents are not valid link
    /// parameters.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// Outcome of one pass over a 16-QAM link
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct LinkOutcome {
    /// Number of symbols transmitted
    pub num_symbols: usize,
    /// Number of bits transmitted
    pub num_bits: usize,
    /// Number of bit errors
    pub num_bit_errors: usize,
    /// Number of symbol errors
    pub num_symbol_errors: usize,
    /// Recovered indices
    pub rx_indices: Vec<usize>,
}

impl LinkOutcome {
    /// Returns bit error rate, i.e., fraction of transmitted bits in error (`0.0` if no bits were
    /// transmitted).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ber(&self) -> f64 {
        if self.num_bits == 0 {
            0.0
        } else {
            self.num_bit_errors as f64 / self.num_bits as f64
        }
    }

    /// Returns symbol error rate (`0.0` if no symbols were transmitted).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ser(&self) -> f64 {
        if self.num_symbols == 0 {
            0.0
        } else {
            self.num_symbol_errors as f64 / self.num_symbols as f64
        }
    }
}

impl Modem {
    /// Sends given indices once over an impaired link and returns the outcome.
    ///
    /// The indices are modulated, passed through the AWGN stage (if `params.snr_db` is set) and
    /// then the phase noise and rotation stage, optionally rescaled to the constellation power,
    /// and demodulated.
    ///
    /// # Parameters
    ///
    /// - `indices`: Symbol indices to be transmitted, each in `[0, 16)`.
    ///
    /// - `params`: Link parameters.
    ///
    /// - `rng`: Random number generator to be used.
    ///
    /// # Errors
    ///
    /// Returns an error if any index is invalid, if any parameter is not finite, or if a stage
    /// meets a signal whose power is zero or not representable.
    ///
    /// # Examples
    ///
    /// ```
    /// use qam16::{utils, LinkParams, Modem};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(17);
    /// let modem = Modem::new();
    /// let indices = utils::random_indices(1000, &mut rng);
    /// let params = LinkParams {
    ///     snr_db: Some(40.0),
    ///     phase_noise: 0.5,
    ///     ..Default::default()
    /// };
    /// let outcome = modem.run_link(&indices, &params, &mut rng)?;
    /// assert_eq!(outcome.num_bits, 4000);
    /// assert_eq!(outcome.num_bit_errors, 0);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn run_link<R: Rng>(
        &self,
        indices: &[usize],
        params: &LinkParams,
        rng: &mut R,
    ) -> Result<LinkOutcome, Error> {
        check_link_params(params)?;
        let mut syms = self.modulate(indices)?;
        if let Some(snr_db) = params.snr_db {
            syms = self.linear_noise(&syms, snr_db, rng)?;
        }
        syms = self.non_linear_noise(&syms, params.phase_noise, params.rotation_deg, rng)?;
        if params.normalize_rx {
            syms = utils::scale(&syms, self.modnorm(&syms)?);
        }
        let rx_indices = self.demodulate(&syms);
        let num_bit_errors = self.bit_error_rate(&rx_indices, indices)?;
        let num_symbol_errors = utils::symbol_error_count(&rx_indices, indices);
        trace!(
            num_symbols = indices.len(),
            num_bit_errors,
            num_symbol_errors,
            "Link pass complete"
        );
        Ok(LinkOutcome {
            num_symbols: indices.len(),
            num_bits: BITS_PER_SYMBOL * indices.len(),
            num_bit_errors,
            num_symbol_errors,
            rx_indices,
        })
    }
}

/// Checks validity of link parameters.
fn check_link_params(params: &LinkParams) -> Result<(), Error> {
    if let Some(snr_db) = params.snr_db {
        check_finite("snr_db", snr_db)?;
    }
    check_finite("phase_noise", params.phase_noise)?;
    check_finite("rotation_deg", params.rotation_deg)?;
    Ok(())
}

//! Types needed in multiple modules

use num_complex::Complex64;

/// Number of points in the constellation
pub const NUM_POINTS: usize = 16;

/// Number of bits carried by each symbol
pub const BITS_PER_SYMBOL: usize = 4;

/// Mean squared magnitude of the unscaled constellation
pub const REFERENCE_POWER: f64 = 10.0;

/// Sequence of complex baseband symbols
pub type Signal = Vec<Complex64>;

/// Custom error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Symbol index outside `[0, 16)`
    #[error("Invalid symbol index {index} at position {position} (expected a value in [0, 16))")]
    InvalidIndex {
        /// Offending index value
        index: usize,
        /// Position of the offending value in its sequence
        position: usize,
    },
    /// Received and transmitted index sequences of different lengths
    #[error("Length mismatch between received ({rx_len}) and transmitted ({tx_len}) indices")]
    LengthMismatch {
        /// Length of received sequence
        rx_len: usize,
        /// Length of transmitted sequence
        tx_len: usize,
    },
    /// Signal whose measured power is zero or not representable where a division by that power is
    /// needed
    #[error("Degenerate signal: {0}")]
    DegenerateSignal(String),
    /// Invalid input error
    #[error("{0}")]
    InvalidInput(String),
    /// File read/write error
    #[error("{0}")]
    FileReadWriteError(#[from] std::io::Error),
    /// Serde read/write error
    #[error("{0}")]
    SerdeReadWriteError(#[from] serde_json::Error),
}

/// Checks that every index in a sequence lies in `[0, 16)`.
pub(crate) fn check_indices(indices: &[usize]) -> Result<(), Error> {
    match indices
        .iter()
        .enumerate()
        .find(|&(_, &index)| index >= NUM_POINTS)
    {
        Some((position, &index)) => Err(Error::InvalidIndex { index, position }),
        None => Ok(()),
    }
}

/// Checks that a simulation parameter is a finite number.
pub(crate) fn check_finite(name: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "Parameter {name} must be finite (found {value})"
        )))
    }
}

/// Checks that every sample of a signal has finite in-phase and quadrature components.
pub(crate) fn check_finite_signal(signal: &[Complex64]) -> Result<(), Error> {
    match signal.iter().position(|x| !x.is_finite()) {
        Some(position) => Err(Error::InvalidInput(format!(
            "Signal sample {} at position {position} is not finite",
            signal[position]
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests_of_functions {
    use super::*;

    #[test]
    fn test_check_indices() {
        // Invalid input
        assert!(matches!(
            check_indices(&[0, 15, 16, 3]),
            Err(Error::InvalidIndex {
                index: 16,
                position: 2
            })
        ));
        assert!(matches!(
            check_indices(&[99]),
            Err(Error::InvalidIndex {
                index: 99,
                position: 0
            })
        ));
        // Valid input
        assert!(check_indices(&[]).is_ok());
        assert!(check_indices(&(0 .. NUM_POINTS).collect::<Vec<usize>>()).is_ok());
    }

    #[test]
    fn test_check_finite() {
        // Invalid input
        assert!(check_finite("snr_db", f64::NAN).is_err());
        assert!(check_finite("snr_db", f64::INFINITY).is_err());
        assert!(check_finite("snr_db", f64::NEG_INFINITY).is_err());
        // Valid input
        assert!(check_finite("snr_db", -12.5).is_ok());
        assert!(check_finite("snr_db", 0.0).is_ok());
    }

    #[test]
    fn test_check_finite_signal() {
        // Invalid input
        let signal = [
            Complex64::new(1.0, -1.0),
            Complex64::new(3.0, f64::NAN),
            Complex64::new(f64::INFINITY, 0.0),
        ];
        match check_finite_signal(&signal) {
            Err(Error::InvalidInput(msg)) => assert!(msg.contains("position 1"), "{msg}"),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(check_finite_signal(&[Complex64::new(f64::NEG_INFINITY, 0.0)]).is_err());
        // Valid input
        assert!(check_finite_signal(&[]).is_ok());
        assert!(check_finite_signal(&[Complex64::new(1e300, -1e-300)]).is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidIndex {
            index: 20,
            position: 1,
        };
        assert_eq!(
            err.to_string(),
            "Invalid symbol index 20 at position 1 (expected a value in [0, 16))"
        );
        let err = Error::LengthMismatch {
            rx_len: 3,
            tx_len: 4,
        };
        assert_eq!(
            err.to_string(),
            "Length mismatch between received (3) and transmitted (4) indices"
        );
    }
}

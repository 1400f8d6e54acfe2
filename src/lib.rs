//! This crate simulates a 16-QAM digital link. Symbol indices in `[0, 16)` are mapped to points of
//! a fixed square constellation with in-phase and quadrature levels in `{-3, -1, 1, 3}`, passed
//! through linear (additive white Gaussian noise) and nonlinear (random phase noise followed by a
//! constant rotation) channel impairments, and demodulated by a minimum-distance decision. Bit
//! errors between transmitted and recovered indices can then be counted, and a scale factor
//! normalizing the average power of any signal can be computed.
//!
//! All randomness is drawn from a caller-supplied [`rand::Rng`], so that runs with a seeded
//! generator are reproducible.
//!
//! # Examples
//!
//! ```
//! use qam16::Modem;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let modem = Modem::new();
//! let indices = [1, 4, 9, 15, 0, 7];
//! let syms_tx = modem.modulate(&indices)?;
//! let syms_rx = modem.linear_noise(&syms_tx, 30.0, &mut rng)?;
//! let syms_rx = modem.non_linear_noise(&syms_rx, 0.5, 2.0, &mut rng)?;
//! let indices_hat = modem.demodulate(&syms_rx);
//! let bit_err_count = modem.bit_error_rate(&indices_hat, &indices)?;
//! assert_eq!(bit_err_count, 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(
    clippy::complexity,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_import_braces,
    unused_qualifications
)]

pub mod channel;
mod common;
mod constellation;
pub mod link;
mod modem;
pub mod utils;

pub use common::{Error, Signal, BITS_PER_SYMBOL, NUM_POINTS, REFERENCE_POWER};
pub use constellation::ConstellationMap;
pub use link::{LinkOutcome, LinkParams};
pub use modem::Modem;

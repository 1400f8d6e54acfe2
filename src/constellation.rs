//! Bijection between symbol indices and 16-QAM constellation points

use num_complex::Complex64;

use crate::{common::NUM_POINTS, Error};

/// Amplitude levels taken by the in-phase and quadrature components, in ascending order
const LEVELS: [f64; 4] = [-3.0, -1.0, 1.0, 3.0];

/// Constellation points in index order.
///
/// The upper two bits of an index select the in-phase level and the lower two bits the quadrature
/// level, each Gray-coded as `00 -> -3`, `01 -> -1`, `11 -> +1`, `10 -> +3`.
const POINTS: [Complex64; NUM_POINTS] = [
    Complex64::new(-3.0, -3.0),
    Complex64::new(-3.0, -1.0),
    Complex64::new(-3.0, 3.0),
    Complex64::new(-3.0, 1.0),
    Complex64::new(-1.0, -3.0),
    Complex64::new(-1.0, -1.0),
    Complex64::new(-1.0, 3.0),
    Complex64::new(-1.0, 1.0),
    Complex64::new(3.0, -3.0),
    Complex64::new(3.0, -1.0),
    Complex64::new(3.0, 3.0),
    Complex64::new(3.0, 1.0),
    Complex64::new(1.0, -3.0),
    Complex64::new(1.0, -1.0),
    Complex64::new(1.0, 3.0),
    Complex64::new(1.0, 1.0),
];

/// Fixed mapping between the 16 symbol indices and the 16 constellation points
#[derive(Clone, PartialEq, Debug, Copy)]
pub struct ConstellationMap {
    /// Constellation point for each index
    point_given_index: [Complex64; NUM_POINTS],
    /// Index for each (in-phase level, quadrature level) position
    index_given_levels: [[usize; 4]; 4],
}

impl ConstellationMap {
    /// Returns the 16-QAM constellation map.
    ///
    /// # Examples
    ///
    /// ```
    /// use num_complex::Complex64;
    /// use qam16::ConstellationMap;
    ///
    /// let map = ConstellationMap::new();
    /// assert_eq!(map.forward(5)?, Complex64::new(-1.0, -1.0));
    /// assert_eq!(map.inverse(Complex64::new(-1.0, -1.0)), Some(5));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let mut index_given_levels = [[0; 4]; 4];
        for (index, point) in POINTS.iter().enumerate() {
            // Every component of `POINTS` is one of `LEVELS`.
            if let (Some(i_level), Some(q_level)) =
                (level_position(point.re), level_position(point.im))
            {
                index_given_levels[i_level][q_level] = index;
            }
        }
        Self {
            point_given_index: POINTS,
            index_given_levels,
        }
    }

    /// Returns constellation point for a given index.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not in `[0, 16)`. A single lookup has no sequence position,
    /// so this is reported as invalid input rather than as an invalid index at some position.
    pub fn forward(&self, index: usize) -> Result<Complex64, Error> {
        self.point_given_index.get(index).copied().ok_or_else(|| {
            Error::InvalidInput(format!(
                "Invalid symbol index {index} (expected a value in [0, 16))"
            ))
        })
    }

    /// Returns index of a given constellation point, or `None` if `symbol` is not exactly one of
    /// the 16 constellation points.
    #[must_use]
    pub fn inverse(&self, symbol: Complex64) -> Option<usize> {
        let i_level = level_position(symbol.re)?;
        let q_level = level_position(symbol.im)?;
        Some(self.index_given_levels[i_level][q_level])
    }

    /// Returns all constellation points in index order.
    #[must_use]
    pub fn points(&self) -> &[Complex64; NUM_POINTS] {
        &self.point_given_index
    }
}

impl Default for ConstellationMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns position of an exact amplitude level in `LEVELS`.
#[allow(clippy::float_cmp)]
fn level_position(value: f64) -> Option<usize> {
    LEVELS.iter().position(|&level| level == value)
}

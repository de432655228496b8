use crate::error::ConfigurationError;

/// A static diagonal band.
///
/// `lower` is the number of diagonals the band reaches south of the main diagonal, `upper` the
/// number it reaches east. Cell `(i, j)` lies inside the band iff `i - j <= lower` and
/// `j - i <= upper`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Band {
    pub lower: usize,
    pub upper: usize
}

impl Band {
    pub const fn new(lower: usize, upper: usize) -> Self {
        Self { lower, upper }
    }

    /// Build a band from signed diagonal offsets. Negative offsets are replaced by their absolute
    /// value.
    pub fn from_signed(lower: i64, upper: i64) -> Self {
        if lower < 0 || upper < 0 {
            log::warn!("negative band bounds ({}, {}) are normalized to their absolute values", lower, upper);
        }
        Self {
            lower: lower.unsigned_abs() as usize,
            upper: upper.unsigned_abs() as usize
        }
    }

    #[inline]
    pub fn in_band(&self, i: usize, j: usize) -> bool {
        if i >= j { i - j <= self.lower } else { j - i <= self.upper }
    }

    /// Inclusive column range of row `i` inside the band, clipped to `0..=cols`. Empty if the band
    /// passes beyond the last column.
    #[inline]
    pub fn columns(&self, i: usize, cols: usize) -> Option<(usize, usize)> {
        let lo = i.saturating_sub(self.lower);
        let hi = i.saturating_add(self.upper).min(cols);
        if lo > hi { None } else { Some((lo, hi)) }
    }

    /// Number of band cells a row can hold in a matrix with `cols + 1` columns.
    #[inline]
    pub fn width(&self, cols: usize) -> usize {
        self.lower.saturating_add(self.upper).saturating_add(1).min(cols + 1)
    }

    /// Check that a global alignment of a `rows` by `cols` sequence pair can run inside the band.
    pub fn check(&self, rows: usize, cols: usize) -> Result<(), ConfigurationError> {
        if !self.in_band(0, 0) {
            return Err(ConfigurationError::BandExcludesOrigin);
        }
        if !self.in_band(rows, cols) {
            return Err(ConfigurationError::BandExcludesEnd { rows, cols, lower: self.lower, upper: self.upper });
        }
        Ok(())
    }
}

/// Column range of row `i` for an optional band.
#[inline]
pub(crate) fn row_columns(band: Option<&Band>, i: usize, cols: usize) -> Option<(usize, usize)> {
    match band {
        Some(b) => b.columns(i, cols),
        None => Some((0, cols))
    }
}

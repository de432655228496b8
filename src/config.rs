//! Composable alignment configuration.
//!
//! Each fragment ([`Mode`], [`Scoring`], [`Gaps`], [`Band`], [`Output`], [`Strategy`]) converts
//! into a [`ConfigBuilder`]. Fragments and builders combine with `|`; the combination is
//! field-wise, so neither grouping nor order matters. Giving a fragment twice is an error that
//! [`ConfigBuilder::build`] reports.
//!
//! ```
//! use pairwise_aligner::config::*;
//! use pairwise_aligner::scores::*;
//!
//! let config = (Mode::Local | Scoring::simple(2, -1) | Gaps::new(-3, -1)).build().unwrap();
//! assert_eq!(config.mode(), Mode::Local);
//! ```

use std::ops::BitOr;

use bitflags::bitflags;

use crate::band::Band;
use crate::error::ConfigurationError;
use crate::scores::{Gaps, Matrix, Scoring};

bitflags! {
    /// Sequence ends that may stay unaligned at no cost in semi-global alignment.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct FreeEnds: u8 {
        const SEQ1_LEADING = 0b0001;
        const SEQ1_TRAILING = 0b0010;
        const SEQ2_LEADING = 0b0100;
        const SEQ2_TRAILING = 0b1000;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Global,
    Local,
    SemiGlobal(FreeEnds)
}

impl Mode {
    /// Whether row 0 starts at zero instead of accumulating gap costs.
    #[inline]
    pub(crate) fn free_first_row(&self) -> bool {
        match self {
            Mode::Global => false,
            Mode::Local => true,
            Mode::SemiGlobal(f) => f.contains(FreeEnds::SEQ2_LEADING)
        }
    }

    /// Whether column 0 starts at zero instead of accumulating gap costs.
    #[inline]
    pub(crate) fn free_first_col(&self) -> bool {
        match self {
            Mode::Global => false,
            Mode::Local => true,
            Mode::SemiGlobal(f) => f.contains(FreeEnds::SEQ1_LEADING)
        }
    }

    /// Whether cell `(i, j)` of a `rows` by `cols` matrix may end the alignment.
    #[inline]
    pub(crate) fn is_end(&self, i: usize, j: usize, rows: usize, cols: usize) -> bool {
        match self {
            Mode::Global => i == rows && j == cols,
            Mode::Local => true,
            Mode::SemiGlobal(f) => {
                (i == rows && j == cols)
                    || (j == cols && f.contains(FreeEnds::SEQ1_TRAILING))
                    || (i == rows && f.contains(FreeEnds::SEQ2_TRAILING))
            }
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Global
    }
}

/// What the driver reports for each pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Output {
    /// Score and end coordinates.
    Score,
    /// Score, begin and end coordinates, and the explicit alignment.
    Alignment
}

impl Default for Output {
    fn default() -> Self {
        Output::Score
    }
}

/// Execution strategy of the driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// SIMD lanes for batches of several pairs whose scores fit 16-bit lanes, scalar otherwise.
    Auto,
    Scalar,
    /// Always SIMD lanes; fails if scores do not fit.
    Simd
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Auto
    }
}

/// An immutable, validated alignment plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    mode: Mode,
    scoring: Scoring,
    gaps: Gaps,
    band: Option<Band>,
    output: Output,
    strategy: Strategy
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    #[inline]
    pub fn gaps(&self) -> Gaps {
        self.gaps
    }

    #[inline]
    pub fn band(&self) -> Option<&Band> {
        self.band.as_ref()
    }

    #[inline]
    pub fn output(&self) -> Output {
        self.output
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn traceback(&self) -> bool {
        self.output == Output::Alignment
    }

    /// Check that a pair of rank sequences can be aligned under this plan.
    pub fn check_pair(&self, seq1: &[u8], seq2: &[u8]) -> Result<(), ConfigurationError> {
        if let Some(size) = self.scoring.alphabet_size() {
            for (sequence, seq) in [seq1, seq2].iter().enumerate() {
                if let Some(position) = seq.iter().position(|&r| (r as usize) >= size) {
                    return Err(ConfigurationError::RankOutOfRange {
                        sequence: sequence + 1,
                        position,
                        rank: seq[position],
                        alphabet_size: size
                    });
                }
            }
        }

        if let Some(band) = &self.band {
            let (rows, cols) = (seq1.len(), seq2.len());
            match self.mode {
                Mode::Global => band.check(rows, cols)?,
                Mode::Local => (),
                Mode::SemiGlobal(f) => {
                    let last_row = f.contains(FreeEnds::SEQ2_TRAILING) && band.columns(rows, cols).is_some();
                    let last_col = f.contains(FreeEnds::SEQ1_TRAILING) && cols.saturating_sub(band.upper) <= rows;
                    if !last_row && !last_col {
                        band.check(rows, cols)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Accumulates configuration fragments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigBuilder {
    mode: Option<Mode>,
    scoring: Option<Scoring>,
    gaps: Option<Gaps>,
    band: Option<Band>,
    output: Option<Output>,
    strategy: Option<Strategy>,
    error: Option<ConfigurationError>
}

fn merge<T>(a: Option<T>, b: Option<T>, name: &'static str, error: &mut Option<ConfigurationError>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(_)) => {
            error.get_or_insert(ConfigurationError::DuplicateFragment(name));
            Some(a)
        },
        (a, b) => a.or(b)
    }
}

impl ConfigBuilder {
    /// Combine two builders, failing immediately on a repeated fragment.
    pub fn combine(self, other: impl Into<ConfigBuilder>) -> Result<Self, ConfigurationError> {
        let combined = self | other;
        match combined.error {
            Some(e) => Err(e),
            None => Ok(combined)
        }
    }

    pub fn mode(self, mode: Mode) -> Self {
        self | mode
    }

    pub fn scoring(self, scoring: Scoring) -> Self {
        self | scoring
    }

    pub fn gaps(self, gaps: Gaps) -> Self {
        self | gaps
    }

    pub fn band(self, band: Band) -> Self {
        self | band
    }

    pub fn output(self, output: Output) -> Self {
        self | output
    }

    pub fn strategy(self, strategy: Strategy) -> Self {
        self | strategy
    }

    pub fn build(self) -> Result<Config, ConfigurationError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let scoring = self.scoring.ok_or(ConfigurationError::MissingScoring)?;
        let gaps = self.gaps.ok_or(ConfigurationError::MissingGaps)?;
        gaps.validate()?;
        if let Some(band) = &self.band {
            if !band.in_band(0, 0) {
                return Err(ConfigurationError::BandExcludesOrigin);
            }
        }

        Ok(Config {
            mode: self.mode.unwrap_or_default(),
            scoring,
            gaps,
            band: self.band,
            output: self.output.unwrap_or_default(),
            strategy: self.strategy.unwrap_or_default()
        })
    }
}

impl<T: Into<ConfigBuilder>> BitOr<T> for ConfigBuilder {
    type Output = ConfigBuilder;

    fn bitor(self, rhs: T) -> ConfigBuilder {
        let rhs = rhs.into();
        let mut error = self.error.or(rhs.error);
        ConfigBuilder {
            mode: merge(self.mode, rhs.mode, "mode", &mut error),
            scoring: merge(self.scoring, rhs.scoring, "scoring", &mut error),
            gaps: merge(self.gaps, rhs.gaps, "gaps", &mut error),
            band: merge(self.band, rhs.band, "band", &mut error),
            output: merge(self.output, rhs.output, "output", &mut error),
            strategy: merge(self.strategy, rhs.strategy, "strategy", &mut error),
            error
        }
    }
}

macro_rules! fragment {
    ($t:ty, $field:ident) => {
        impl From<$t> for ConfigBuilder {
            fn from(v: $t) -> Self {
                ConfigBuilder { $field: Some(v), ..Default::default() }
            }
        }

        impl<T: Into<ConfigBuilder>> BitOr<T> for $t {
            type Output = ConfigBuilder;

            fn bitor(self, rhs: T) -> ConfigBuilder {
                ConfigBuilder::from(self) | rhs
            }
        }
    };
}

fragment!(Mode, mode);
fragment!(Scoring, scoring);
fragment!(Gaps, gaps);
fragment!(Band, band);
fragment!(Output, output);
fragment!(Strategy, strategy);

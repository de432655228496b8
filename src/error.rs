//! Error types for configuring and running alignments.

use thiserror::Error;

/// Result type alias for alignment operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Problems detected while building a [`Config`](crate::config::Config) or while validating
/// the inputs of an alignment, always before any DP cell is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("configuration fragment `{0}` was given more than once")]
    DuplicateFragment(&'static str),

    #[error("no scoring scheme was configured")]
    MissingScoring,

    #[error("no gap scheme was configured")]
    MissingGaps,

    #[error("gap scores must not be positive (open {open}, extend {extend})")]
    PositiveGapScore { open: i32, extend: i32 },

    #[error("substitution matrix with {len} entries is not square for {rows} rows")]
    NonSquareMatrix { rows: usize, len: usize },

    #[error("substitution matrix of size {size} cannot score any alphabet")]
    UndersizedMatrix { size: usize },

    #[error("rank {rank} at position {position} of sequence {sequence} is outside the alphabet of size {alphabet_size}")]
    RankOutOfRange {
        sequence: usize,
        position: usize,
        rank: u8,
        alphabet_size: usize,
    },

    #[error("band does not contain the matrix origin")]
    BandExcludesOrigin,

    #[error("band (lower {lower}, upper {upper}) does not contain the final cell of a {rows}x{cols} matrix")]
    BandExcludesEnd {
        rows: usize,
        cols: usize,
        lower: usize,
        upper: usize,
    },
}

/// Invariant violations detected while executing an alignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    #[error("scores up to {bound} do not fit into 16-bit SIMD lanes")]
    ScoreOverflow { bound: i64 },

    #[error("batch of {pairs} pairs exceeds the {lanes} available SIMD lanes")]
    LaneCount { pairs: usize, lanes: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Alignment(#[from] AlignmentError),
}

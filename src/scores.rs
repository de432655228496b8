use crate::error::ConfigurationError;

/// Substitution scores between two symbol ranks.
///
/// Implementations must be pure and answer in constant time.
pub trait Matrix {
    fn score(&self, a: u8, b: u8) -> i32;

    /// Number of ranks the model can score, or `None` if every rank is accepted.
    fn alphabet_size(&self) -> Option<usize>;

    /// Largest absolute value `score` can return.
    fn max_abs(&self) -> i32;
}

/// Fixed score for identical ranks and another for differing ranks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchMismatch {
    pub match_score: i32,
    pub mismatch_score: i32
}

impl MatchMismatch {
    pub const fn new(match_score: i32, mismatch_score: i32) -> Self {
        Self { match_score, mismatch_score }
    }
}

impl Matrix for MatchMismatch {
    #[inline]
    fn score(&self, a: u8, b: u8) -> i32 {
        if a == b { self.match_score } else { self.mismatch_score }
    }

    #[inline]
    fn alphabet_size(&self) -> Option<usize> {
        None
    }

    #[inline]
    fn max_abs(&self) -> i32 {
        self.match_score.saturating_abs().max(self.mismatch_score.saturating_abs())
    }
}

/// Square substitution table indexed by `[rank_a][rank_b]`, stored row major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubMatrix {
    size: usize,
    scores: Vec<i32>
}

impl SubMatrix {
    pub fn new(size: usize, scores: Vec<i32>) -> Result<Self, ConfigurationError> {
        if size == 0 {
            return Err(ConfigurationError::UndersizedMatrix { size });
        }
        if scores.len() != size * size {
            return Err(ConfigurationError::NonSquareMatrix { rows: size, len: scores.len() });
        }
        Ok(Self { size, scores })
    }

    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, ConfigurationError> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);
        for row in rows {
            scores.extend_from_slice(row.as_ref());
        }
        Self::new(size, scores)
    }

    /// BLOSUM62 over the ranks of [`BLOSUM62_ORDER`].
    pub fn blosum62() -> Self {
        Self {
            size: BLOSUM62_ORDER.len(),
            scores: BLOSUM62.iter().map(|&s| s as i32).collect()
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|a| (0..a).all(|b| self.scores[a * self.size + b] == self.scores[b * self.size + a]))
    }
}

impl Matrix for SubMatrix {
    #[inline]
    fn score(&self, a: u8, b: u8) -> i32 {
        debug_assert!((a as usize) < self.size && (b as usize) < self.size);
        self.scores[(a as usize) * self.size + (b as usize)]
    }

    #[inline]
    fn alphabet_size(&self) -> Option<usize> {
        Some(self.size)
    }

    fn max_abs(&self) -> i32 {
        self.scores.iter().map(|s| s.saturating_abs()).max().unwrap_or(0)
    }
}

/// The scoring model of a configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scoring {
    Simple(MatchMismatch),
    Matrix(SubMatrix)
}

impl Scoring {
    pub fn simple(match_score: i32, mismatch_score: i32) -> Self {
        Scoring::Simple(MatchMismatch::new(match_score, mismatch_score))
    }

    pub fn blosum62() -> Self {
        Scoring::Matrix(SubMatrix::blosum62())
    }
}

impl Matrix for Scoring {
    #[inline]
    fn score(&self, a: u8, b: u8) -> i32 {
        match self {
            Scoring::Simple(m) => m.score(a, b),
            Scoring::Matrix(m) => m.score(a, b)
        }
    }

    #[inline]
    fn alphabet_size(&self) -> Option<usize> {
        match self {
            Scoring::Simple(m) => m.alphabet_size(),
            Scoring::Matrix(m) => m.alphabet_size()
        }
    }

    fn max_abs(&self) -> i32 {
        match self {
            Scoring::Simple(m) => m.max_abs(),
            Scoring::Matrix(m) => m.max_abs()
        }
    }
}

/// Affine gap costs.
///
/// A run of `L` consecutive gap symbols scores `open + L * extend`. A zero `open` score gives
/// linear gap costs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Gaps {
    pub open: i32,
    pub extend: i32
}

impl Gaps {
    pub const fn new(open: i32, extend: i32) -> Self {
        Self { open, extend }
    }

    pub const fn linear(extend: i32) -> Self {
        Self { open: 0, extend }
    }

    #[inline]
    pub fn open_cost(&self) -> i32 {
        self.open
    }

    #[inline]
    pub fn extend_cost(&self) -> i32 {
        self.extend
    }

    /// Score of a gap run of length one.
    #[inline]
    pub fn open_extend_cost(&self) -> i32 {
        self.open.saturating_add(self.extend)
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        self.open == 0
    }

    /// Score of a gap run of `len` symbols, saturating at `i32::MIN`.
    #[inline]
    pub fn cost(&self, len: usize) -> i32 {
        if len == 0 {
            return 0;
        }
        let len = i32::try_from(len).unwrap_or(i32::MAX);
        self.open.saturating_add(len.saturating_mul(self.extend))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        if self.open > 0 || self.extend > 0 {
            return Err(ConfigurationError::PositiveGapScore { open: self.open, extend: self.extend });
        }
        Ok(())
    }
}

/// Symbol order of the ranks used by [`SubMatrix::blosum62`].
pub const BLOSUM62_ORDER: &[u8; 24] = b"ARNDCQEGHILKMFPSTWYVBZX*";

#[rustfmt::skip]
static BLOSUM62: [i8; 24 * 24] = [
//   A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   B   Z   X   *
     4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -2, -1,  0, -4, // A
    -1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1,  0, -1, -4, // R
    -2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3,  3,  0, -1, -4, // N
    -2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3,  4,  1, -1, -4, // D
     0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -3, -3, -2, -4, // C
    -1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2,  0,  3, -1, -4, // Q
    -1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // E
     0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1, -2, -1, -4, // G
    -2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3,  0,  0, -1, -4, // H
    -1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -3, -3, -1, -4, // I
    -1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -4, -3, -1, -4, // L
    -1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2,  0,  1, -1, -4, // K
    -1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -3, -1, -1, -4, // M
    -2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -3, -3, -1, -4, // F
    -1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -2, -1, -2, -4, // P
     1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2,  0,  0,  0, -4, // S
     0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1, -1,  0, -4, // T
    -3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -4, -3, -2, -4, // W
    -2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -3, -2, -1, -4, // Y
     0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -3, -2, -1, -4, // V
    -2, -1,  3,  4, -3,  0,  1, -1,  0, -3, -4,  0, -3, -3, -2,  0, -1, -4, -3, -3,  4,  1, -1, -4, // B
    -1,  0,  0,  1, -3,  3,  4, -2,  0, -3, -3,  1, -1, -3, -1,  0, -1, -3, -2, -2,  1,  4, -1, -4, // Z
     0, -1, -1, -1, -2, -1, -1, -1, -1, -1, -1, -1, -1, -1, -2,  0,  0, -2, -1, -1, -1, -1, -1, -4, // X
    -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4, -4,  1  // *
];

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(c: u8) -> u8 {
        BLOSUM62_ORDER.iter().position(|&o| o == c).unwrap() as u8
    }

    #[test]
    fn test_blosum62() {
        let m = SubMatrix::blosum62();
        assert!(m.is_symmetric());
        assert_eq!(m.score(rank(b'A'), rank(b'A')), 4);
        assert_eq!(m.score(rank(b'W'), rank(b'W')), 11);
        assert_eq!(m.score(rank(b'A'), rank(b'R')), -1);
        assert_eq!(m.score(rank(b'*'), rank(b'*')), 1);
        assert_eq!(m.max_abs(), 11);
        assert_eq!(m.alphabet_size(), Some(24));
    }

    #[test]
    fn test_blosum62_matches_bio() {
        let m = SubMatrix::blosum62();
        let standard = b"ARNDCQEGHILKMFPSTWYV";
        for &a in standard {
            for &b in standard {
                assert_eq!(m.score(rank(a), rank(b)), bio::scores::blosum62(a, b), "{} {}", a as char, b as char);
            }
        }
    }

    #[test]
    fn test_sub_matrix_shape() {
        assert_eq!(SubMatrix::new(0, vec![]), Err(ConfigurationError::UndersizedMatrix { size: 0 }));
        assert_eq!(SubMatrix::new(2, vec![1, -1, -1]), Err(ConfigurationError::NonSquareMatrix { rows: 2, len: 3 }));
        assert_eq!(
            SubMatrix::from_rows(&[vec![1, -1], vec![-1]]),
            Err(ConfigurationError::NonSquareMatrix { rows: 2, len: 3 })
        );

        let m = SubMatrix::from_rows(&[[2, -1], [-3, 2]]).unwrap();
        assert!(!m.is_symmetric());
        assert_eq!(m.score(1, 0), -3);
    }

    #[test]
    fn test_match_mismatch() {
        let m = MatchMismatch::new(2, -3);
        assert_eq!(m.score(7, 7), 2);
        assert_eq!(m.score(7, 1), -3);
        assert_eq!(m.alphabet_size(), None);
        assert_eq!(m.max_abs(), 3);
    }

    #[test]
    fn test_gaps() {
        let g = Gaps::new(-2, -1);
        assert_eq!(g.cost(0), 0);
        assert_eq!(g.cost(1), -3);
        assert_eq!(g.cost(4), -6);
        assert!(!g.is_linear());
        assert!(Gaps::linear(-1).is_linear());
        assert_eq!(Gaps::linear(-2).cost(3), -6);
        assert!(Gaps::new(1, -1).validate().is_err());
        assert!(g.validate().is_ok());
        assert_eq!(g.open_extend_cost(), -3);
    }

    #[test]
    fn test_gaps_saturate() {
        let g = Gaps::new(0, -1_000_000);
        assert_eq!(g.cost(2000), -2_000_000_000);
        assert_eq!(g.cost(3000), i32::MIN);
        assert_eq!(g.cost(usize::MAX), i32::MIN);
        assert_eq!(Gaps::new(i32::MIN, -1).open_extend_cost(), i32::MIN);
        assert_eq!(Gaps::new(-1, -1).cost(usize::MAX), i32::MIN);

        assert_eq!(MatchMismatch::new(1, i32::MIN).max_abs(), i32::MAX);
        let m = SubMatrix::new(1, vec![i32::MIN]).unwrap();
        assert_eq!(m.max_abs(), i32::MAX);
    }
}

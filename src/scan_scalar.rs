//! Scalar DP engine.
//!
//! Affine gaps use three layers per cell (indexing: rows follow sequence 1, columns sequence 2):
//!
//! ```text
//! F[i][j] = max(H[i - 1][j] + gap_open + gap_extend, F[i - 1][j] + gap_extend)
//! E[i][j] = max(H[i][j - 1] + gap_open + gap_extend, E[i][j - 1] + gap_extend)
//! H[i][j] = max(H[i - 1][j - 1] + matrix[seq1[i - 1]][seq2[j - 1]], F[i][j], E[i][j])
//! ```
//!
//! Local alignment additionally floors `H` at zero. Only the previous row of `H` and `F` is
//! kept, so memory is linear in the length of sequence 2 unless a trace is requested.

use crate::band::{row_columns, Band};
use crate::config::{Config, Mode};
use crate::error::ConfigurationError;
use crate::scores::{Gaps, Matrix, Scoring};
use crate::trace::{TraceDirections, TraceMatrix};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const NEG_INF: i32 = i32::MIN;

/// Best score and the end cell it was found in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanResult {
    pub score: i32,
    /// One past the last aligned position of each sequence.
    pub end: (usize, usize)
}

/// Full (or banded) dynamic programming for one pair of rank sequences.
pub struct Scan<const TRACE: bool> {
    res: ScanResult,
    trace: TraceMatrix
}

impl<const TRACE: bool> Scan<TRACE> {
    /// Align `seq1` against `seq2` under `config`.
    ///
    /// The mode, scoring scheme, gap scheme and band are taken from `config`; its output and
    /// strategy are ignored. Trace directions are recorded if `TRACE` is true.
    pub fn align(seq1: &[u8], seq2: &[u8], config: &Config) -> Result<Self, ConfigurationError> {
        config.check_pair(seq1, seq2)?;
        Ok(Self::align_checked(seq1, seq2, config))
    }

    /// [`align`](Self::align) for a pair that already passed [`Config::check_pair`].
    pub(crate) fn align_checked(seq1: &[u8], seq2: &[u8], config: &Config) -> Self {
        let gaps = config.gaps();
        let res = match (config.scoring(), gaps.is_linear()) {
            (Scoring::Simple(m), true) => scan_core::<_, true, TRACE>(seq1, seq2, m, gaps, config.mode(), config.band()),
            (Scoring::Simple(m), false) => scan_core::<_, false, TRACE>(seq1, seq2, m, gaps, config.mode(), config.band()),
            (Scoring::Matrix(m), true) => scan_core::<_, true, TRACE>(seq1, seq2, m, gaps, config.mode(), config.band()),
            (Scoring::Matrix(m), false) => scan_core::<_, false, TRACE>(seq1, seq2, m, gaps, config.mode(), config.band())
        };

        Self { res: res.0, trace: res.1 }
    }

    #[inline(always)]
    pub fn res(&self) -> ScanResult {
        self.res
    }

    #[inline(always)]
    pub fn trace(&self) -> &TraceMatrix {
        assert!(TRACE);
        &self.trace
    }
}

/// Trace of a forced boundary cell `k` gaps away from the origin.
#[inline(always)]
pub(crate) fn boundary_trace<const LINEAR: bool>(vertical: bool, k: usize) -> TraceDirections {
    let open = LINEAR || k == 1;
    match (vertical, open) {
        (true, true) => TraceDirections::VERTICAL | TraceDirections::UP_OPEN,
        (true, false) => TraceDirections::VERTICAL | TraceDirections::UP,
        (false, true) => TraceDirections::HORIZONTAL | TraceDirections::LEFT_OPEN,
        (false, false) => TraceDirections::HORIZONTAL | TraceDirections::LEFT
    }
}

fn scan_core<M: Matrix, const LINEAR: bool, const TRACE: bool>(
    seq1: &[u8],
    seq2: &[u8],
    matrix: &M,
    gaps: Gaps,
    mode: Mode,
    band: Option<&Band>
) -> (ScanResult, TraceMatrix) {
    let m = seq1.len();
    let n = seq2.len();
    let local = mode == Mode::Local;
    let open_extend = gaps.open_extend_cost();
    let extend = gaps.extend_cost();

    let mut trace = if TRACE { TraceMatrix::new(m, n, band) } else { TraceMatrix::new(0, 0, None) };
    let mut best: Option<ScanResult> = None;

    // previous row of H and F, overwritten in place
    let mut h = vec![NEG_INF; n + 1];
    let mut f = vec![NEG_INF; n + 1];

    // a saturated score may equal NEG_INF, so the first candidate is always taken
    let update_best = |score: i32, i: usize, j: usize, best: &mut Option<ScanResult>| {
        if mode.is_end(i, j, m, n) && best.map_or(true, |b| score > b.score) {
            *best = Some(ScanResult { score, end: (i, j) });
        }
    };

    // row 0
    let (_, hi) = row_columns(band, 0, n).unwrap_or((0, 0));
    h[0] = 0;
    update_best(0, 0, 0, &mut best);
    for j in 1..=hi {
        if mode.free_first_row() {
            h[j] = 0;
        } else {
            h[j] = gaps.cost(j);
            if TRACE {
                trace.set(0, j, boundary_trace::<LINEAR>(false, j));
            }
        }
        update_best(h[j], 0, j, &mut best);
    }

    for i in 1..=m {
        let (lo, hi) = match row_columns(band, i, n) {
            Some(c) => c,
            None => break
        };
        let a = seq1[i - 1];

        let mut diag;
        let mut left_h;
        let mut e = NEG_INF;
        let start;

        if lo == 0 {
            diag = h[0];
            left_h = if mode.free_first_col() {
                0
            } else {
                if TRACE {
                    trace.set(i, 0, boundary_trace::<LINEAR>(true, i));
                }
                gaps.cost(i)
            };
            h[0] = left_h;
            f[0] = NEG_INF;
            update_best(left_h, i, 0, &mut best);
            start = 1;
        } else {
            diag = h[lo - 1];
            left_h = NEG_INF;
            start = lo;
        }

        for j in start..=hi {
            let up_h = h[j];
            let d = diag.saturating_add(matrix.score(a, seq2[j - 1]));
            let mut t = TraceDirections::NONE;

            let (fv, ev) = if LINEAR {
                (up_h.saturating_add(extend), left_h.saturating_add(extend))
            } else {
                let f_open = up_h.saturating_add(open_extend);
                let f_ext = f[j].saturating_add(extend);
                let e_open = left_h.saturating_add(open_extend);
                let e_ext = e.saturating_add(extend);
                let fv = f_open.max(f_ext);
                let ev = e_open.max(e_ext);
                if TRACE {
                    t.set(TraceDirections::UP_OPEN, f_open == fv);
                    t.set(TraceDirections::UP, f_ext == fv);
                    t.set(TraceDirections::LEFT_OPEN, e_open == ev);
                    t.set(TraceDirections::LEFT, e_ext == ev);
                }
                (fv, ev)
            };

            let mut hv = d.max(fv).max(ev);
            if local {
                hv = hv.max(0);
            }

            if TRACE {
                t.set(TraceDirections::DIAGONAL, d == hv);
                if fv == hv {
                    t |= if LINEAR { TraceDirections::VERTICAL | TraceDirections::UP_OPEN } else { TraceDirections::VERTICAL };
                }
                if ev == hv {
                    t |= if LINEAR { TraceDirections::HORIZONTAL | TraceDirections::LEFT_OPEN } else { TraceDirections::HORIZONTAL };
                }
                if local && hv == 0 {
                    t.remove(TraceDirections::BEST);
                }
                trace.set(i, j, t);
            }

            diag = up_h;
            h[j] = hv;
            f[j] = fv;
            left_h = hv;
            e = ev;
            update_best(hv, i, j, &mut best);
        }
    }

    (best.unwrap_or(ScanResult { score: NEG_INF, end: (m, n) }), trace)
}

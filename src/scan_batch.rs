//! Inter-sequence SIMD DP engine.
//!
//! Up to `L` independent pairs are aligned in lockstep, one pair per 16-bit lane. All lanes walk
//! the same cells in row-major order over the largest pair of the batch. A lane whose sequences
//! end before the current cell is inactive there, and its vectors are left untouched through
//! `simd_blend_i16` instead of branching. The recurrence, boundaries, trace bits and best-cell
//! rule are the ones of [`scan_scalar`](crate::scan_scalar), so both engines report identical
//! results for pairs whose scores fit.

use crate::band::{row_columns, Band};
use crate::config::{Config, FreeEnds, Mode};
use crate::error::{AlignmentError, Result};
use crate::scan_scalar::{boundary_trace, ScanResult};
use crate::scores::{Gaps, Matrix, Scoring, SubMatrix};
use crate::simd::*;
use crate::trace::{TraceDirections, TraceMatrix};

const NEG_INF: i16 = i16::MIN;
/// Scores and coordinates must stay below this magnitude, leaving headroom to the sentinel.
const LIMIT: i64 = 1 << 14;

/// Largest score magnitude any cell of the batch can reach.
pub fn score_bound<S1: AsRef<[u8]>, S2: AsRef<[u8]>>(pairs: &[(S1, S2)], config: &Config) -> i64 {
    let m = pairs.iter().map(|p| p.0.as_ref().len()).max().unwrap_or(0) as i64;
    let n = pairs.iter().map(|p| p.1.as_ref().len()).max().unwrap_or(0) as i64;
    let gaps = config.gaps();
    let per_cell = config.scoring().max_abs() as i64 + (gaps.open as i64).abs() + (gaps.extend as i64).abs();
    (m + n) * per_cell
}

/// Whether a batch can run in 16-bit lanes.
pub fn fits<S1: AsRef<[u8]>, S2: AsRef<[u8]>>(pairs: &[(S1, S2)], config: &Config) -> bool {
    let longest = pairs
        .iter()
        .map(|p| p.0.as_ref().len().max(p.1.as_ref().len()))
        .max()
        .unwrap_or(0) as i64;
    longest < LIMIT && score_bound(pairs, config) < LIMIT
}

/// Lockstep alignment of up to `L` pairs.
pub struct ScanBatch<const TRACE: bool> {
    res: Vec<ScanResult>,
    traces: Vec<TraceMatrix>
}

impl<const TRACE: bool> ScanBatch<TRACE> {
    /// Align every pair of `pairs` under `config`, one pair per lane.
    ///
    /// Fails if there are more pairs than lanes, if a pair does not pass
    /// [`Config::check_pair`], or if the scores might not fit into 16 bits.
    pub fn align<S1: AsRef<[u8]>, S2: AsRef<[u8]>>(pairs: &[(S1, S2)], config: &Config) -> Result<Self> {
        if pairs.len() > L {
            return Err(AlignmentError::LaneCount { pairs: pairs.len(), lanes: L }.into());
        }
        for (seq1, seq2) in pairs {
            config.check_pair(seq1.as_ref(), seq2.as_ref())?;
        }
        Self::align_checked(pairs, config)
    }

    /// [`align`](Self::align) for at most `L` pairs that already passed [`Config::check_pair`].
    pub(crate) fn align_checked<S1: AsRef<[u8]>, S2: AsRef<[u8]>>(pairs: &[(S1, S2)], config: &Config) -> Result<Self> {
        debug_assert!(pairs.len() <= L);
        if !fits(pairs, config) {
            return Err(AlignmentError::ScoreOverflow { bound: score_bound(pairs, config) }.into());
        }

        let batch = Lanes::new(pairs);
        let gaps = config.gaps();
        let (res, traces) = unsafe {
            match (config.scoring(), gaps.is_linear()) {
                (Scoring::Simple(s), true) => {
                    let sub = MatchMismatchLanes::new(s.match_score, s.mismatch_score);
                    scan_core::<_, true, TRACE>(&batch, &sub, gaps, config.mode(), config.band())
                },
                (Scoring::Simple(s), false) => {
                    let sub = MatchMismatchLanes::new(s.match_score, s.mismatch_score);
                    scan_core::<_, false, TRACE>(&batch, &sub, gaps, config.mode(), config.band())
                },
                (Scoring::Matrix(m), true) => scan_core::<_, true, TRACE>(&batch, m, gaps, config.mode(), config.band()),
                (Scoring::Matrix(m), false) => scan_core::<_, false, TRACE>(&batch, m, gaps, config.mode(), config.band())
            }
        };

        Ok(Self { res, traces })
    }

    /// Result of the pair in `lane`.
    #[inline(always)]
    pub fn res(&self, lane: usize) -> ScanResult {
        self.res[lane]
    }

    /// Results of all pairs, in lane order.
    #[inline(always)]
    pub fn results(&self) -> &[ScanResult] {
        &self.res
    }

    #[inline(always)]
    pub fn trace(&self, lane: usize) -> &TraceMatrix {
        assert!(TRACE);
        &self.traces[lane]
    }

    /// Number of pairs in the batch.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.res.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.res.is_empty()
    }
}

/// Rank sequences of a batch transposed into `[position * L + lane]` order and padded with rank
/// 0, together with the per-lane lengths.
struct Lanes {
    pairs: usize,
    m: Vec<usize>,
    n: Vec<usize>,
    max_m: usize,
    max_n: usize,
    seq1: Vec<i16>,
    seq2: Vec<i16>
}

impl Lanes {
    fn new<S1: AsRef<[u8]>, S2: AsRef<[u8]>>(pairs: &[(S1, S2)]) -> Self {
        let mut m = vec![0usize; L];
        let mut n = vec![0usize; L];
        for (lane, (seq1, seq2)) in pairs.iter().enumerate() {
            m[lane] = seq1.as_ref().len();
            n[lane] = seq2.as_ref().len();
        }
        let max_m = m.iter().copied().max().unwrap_or(0);
        let max_n = n.iter().copied().max().unwrap_or(0);

        let mut seq1 = vec![0i16; max_m * L];
        let mut seq2 = vec![0i16; max_n * L];
        for (lane, (a, b)) in pairs.iter().enumerate() {
            for (i, &c) in a.as_ref().iter().enumerate() {
                seq1[i * L + lane] = c as i16;
            }
            for (j, &c) in b.as_ref().iter().enumerate() {
                seq2[j * L + lane] = c as i16;
            }
        }

        Self { pairs: pairs.len(), m, n, max_m, max_n, seq1, seq2 }
    }

    /// Ranks of sequence 1 at position `i` (0-based) across lanes.
    #[inline(always)]
    unsafe fn seq1(&self, i: usize) -> Simd {
        simd_loadu(self.seq1.as_ptr().add(i * L))
    }

    #[inline(always)]
    unsafe fn seq2(&self, j: usize) -> Simd {
        simd_loadu(self.seq2.as_ptr().add(j * L))
    }

    unsafe fn lengths(v: &[usize], offset: usize) -> Simd {
        let mut a = Aligned::new(0);
        for (lane, &len) in v.iter().enumerate() {
            a.0[lane] = (len + offset) as i16;
        }
        a.load()
    }
}

/// Substitution scores for a vector of rank pairs.
trait LaneMatrix {
    unsafe fn scores(&self, a: Simd, b: Simd) -> Simd;
}

struct MatchMismatchLanes {
    match_score: i16,
    mismatch_score: i16
}

impl MatchMismatchLanes {
    fn new(match_score: i32, mismatch_score: i32) -> Self {
        Self { match_score: match_score as i16, mismatch_score: mismatch_score as i16 }
    }
}

impl LaneMatrix for MatchMismatchLanes {
    #[inline(always)]
    unsafe fn scores(&self, a: Simd, b: Simd) -> Simd {
        simd_blend_i16(simd_set1_i16(self.mismatch_score), simd_set1_i16(self.match_score), simd_cmpeq_i16(a, b))
    }
}

impl LaneMatrix for SubMatrix {
    // gathered lane by lane; there is no 16-bit gather
    #[inline(always)]
    unsafe fn scores(&self, a: Simd, b: Simd) -> Simd {
        let mut ra = Aligned::new(0);
        let mut rb = Aligned::new(0);
        ra.store(a);
        rb.store(b);
        let mut res = Aligned::new(0);
        for lane in 0..L {
            res.0[lane] = self.score(ra.0[lane] as u8, rb.0[lane] as u8) as i16;
        }
        res.load()
    }
}

/// Trace bits as lane masks.
#[inline(always)]
unsafe fn bits(mask: Simd, t: TraceDirections) -> Simd {
    simd_and(mask, simd_set1_i16(t.bits() as i16))
}

unsafe fn scan_core<M: LaneMatrix, const LINEAR: bool, const TRACE: bool>(
    lanes: &Lanes,
    matrix: &M,
    gaps: Gaps,
    mode: Mode,
    band: Option<&Band>
) -> (Vec<ScanResult>, Vec<TraceMatrix>) {
    let (max_m, max_n) = (lanes.max_m, lanes.max_n);
    let local = mode == Mode::Local;

    let mut traces: Vec<TraceMatrix> = if TRACE {
        (0..lanes.pairs).map(|k| TraceMatrix::new(lanes.m[k], lanes.n[k], band)).collect()
    } else {
        Vec::new()
    };

    let neg_inf = simd_set1_i16(NEG_INF);
    let zero = simd_set1_i16(0);
    let open_extend = simd_set1_i16(gaps.open_extend_cost() as i16);
    let extend = simd_set1_i16(gaps.extend_cost() as i16);
    let gap_bits = simd_set1_i16(
        (TraceDirections::UP_OPEN | TraceDirections::UP | TraceDirections::LEFT_OPEN | TraceDirections::LEFT).bits() as i16
    );

    // lane k is active at (i, j) iff m[k] + 1 > i and n[k] + 1 > j
    let m_end = Lanes::lengths(&lanes.m, 0);
    let n_end = Lanes::lengths(&lanes.n, 0);
    let m_limit = Lanes::lengths(&lanes.m, 1);
    let n_limit = Lanes::lengths(&lanes.n, 1);

    let end_mask = |i: usize, j: usize, active: Simd| -> Simd {
        let ieq = simd_cmpeq_i16(simd_set1_i16(i as i16), m_end);
        let jeq = simd_cmpeq_i16(simd_set1_i16(j as i16), n_end);
        match mode {
            Mode::Global => simd_and(ieq, jeq),
            Mode::Local => active,
            Mode::SemiGlobal(f) => {
                let mut mask = simd_and(ieq, jeq);
                if f.contains(FreeEnds::SEQ1_TRAILING) {
                    mask = simd_or(mask, jeq);
                }
                if f.contains(FreeEnds::SEQ2_TRAILING) {
                    mask = simd_or(mask, ieq);
                }
                simd_and(mask, active)
            }
        }
    };

    let mut best = neg_inf;
    let mut best_i = zero;
    let mut best_j = zero;

    let mut update_best = |hv: Simd, i: usize, j: usize, active: Simd| {
        let upd = simd_and(end_mask(i, j, active), simd_cmpgt_i16(hv, best));
        best = simd_blend_i16(best, hv, upd);
        best_i = simd_blend_i16(best_i, simd_set1_i16(i as i16), upd);
        best_j = simd_blend_i16(best_j, simd_set1_i16(j as i16), upd);
    };

    let set_trace = |traces: &mut Vec<TraceMatrix>, i: usize, j: usize, t: Simd, active: Simd| {
        let mut ta = Aligned::new(0);
        let mut aa = Aligned::new(0);
        ta.store(t);
        aa.store(active);
        for (lane, trace) in traces.iter_mut().enumerate() {
            if aa.0[lane] != 0 {
                trace.set(i, j, TraceDirections::from_bits_truncate(ta.0[lane] as u8));
            }
        }
    };

    let active_at = |i: usize, j: usize| -> Simd {
        simd_and(
            simd_cmpgt_i16(m_limit, simd_set1_i16(i as i16)),
            simd_cmpgt_i16(n_limit, simd_set1_i16(j as i16))
        )
    };

    let mut h = vec![neg_inf; max_n + 1];
    let mut f = vec![neg_inf; max_n + 1];

    // row 0
    let (_, hi) = row_columns(band, 0, max_n).unwrap_or((0, 0));
    h[0] = zero;
    update_best(zero, 0, 0, active_at(0, 0));
    for j in 1..=hi {
        let active = active_at(0, j);
        if !simd_any(active) {
            break;
        }
        let hv = if mode.free_first_row() { zero } else { simd_set1_i16(gaps.cost(j) as i16) };
        h[j] = simd_blend_i16(h[j], hv, active);
        if TRACE && !mode.free_first_row() {
            let t = simd_set1_i16(boundary_trace::<LINEAR>(false, j).bits() as i16);
            set_trace(&mut traces, 0, j, t, active);
        }
        update_best(hv, 0, j, active);
    }

    for i in 1..=max_m {
        let (lo, hi) = match row_columns(band, i, max_n) {
            Some(c) => c,
            None => break
        };
        let a = lanes.seq1(i - 1);

        let mut diag;
        let mut left_h;
        let mut e = neg_inf;
        let start;

        if lo == 0 {
            let active = active_at(i, 0);
            diag = h[0];
            let hv = if mode.free_first_col() { zero } else { simd_set1_i16(gaps.cost(i) as i16) };
            if TRACE && !mode.free_first_col() {
                let t = simd_set1_i16(boundary_trace::<LINEAR>(true, i).bits() as i16);
                set_trace(&mut traces, i, 0, t, active);
            }
            h[0] = simd_blend_i16(h[0], hv, active);
            left_h = h[0];
            update_best(hv, i, 0, active);
            start = 1;
        } else {
            diag = h[lo - 1];
            left_h = neg_inf;
            start = lo;
        }

        for j in start..=hi {
            let active = active_at(i, j);
            // the rest of the row is inactive in every lane
            if !simd_any(active) {
                break;
            }

            let up_h = h[j];
            let d = simd_adds_i16(diag, matrix.scores(a, lanes.seq2(j - 1)));
            let mut t = zero;

            let (fv, ev) = if LINEAR {
                (simd_adds_i16(up_h, extend), simd_adds_i16(left_h, extend))
            } else {
                let f_open = simd_adds_i16(up_h, open_extend);
                let f_ext = simd_adds_i16(f[j], extend);
                let e_open = simd_adds_i16(left_h, open_extend);
                let e_ext = simd_adds_i16(e, extend);
                let fv = simd_max_i16(f_open, f_ext);
                let ev = simd_max_i16(e_open, e_ext);
                if TRACE {
                    t = simd_or(t, bits(simd_cmpeq_i16(f_open, fv), TraceDirections::UP_OPEN));
                    t = simd_or(t, bits(simd_cmpeq_i16(f_ext, fv), TraceDirections::UP));
                    t = simd_or(t, bits(simd_cmpeq_i16(e_open, ev), TraceDirections::LEFT_OPEN));
                    t = simd_or(t, bits(simd_cmpeq_i16(e_ext, ev), TraceDirections::LEFT));
                }
                (fv, ev)
            };

            let mut hv = simd_max_i16(d, simd_max_i16(fv, ev));
            if local {
                hv = simd_max_i16(hv, zero);
            }

            if TRACE {
                let (vertical, horizontal) = if LINEAR {
                    (TraceDirections::VERTICAL | TraceDirections::UP_OPEN, TraceDirections::HORIZONTAL | TraceDirections::LEFT_OPEN)
                } else {
                    (TraceDirections::VERTICAL, TraceDirections::HORIZONTAL)
                };
                t = simd_or(t, bits(simd_cmpeq_i16(d, hv), TraceDirections::DIAGONAL));
                t = simd_or(t, bits(simd_cmpeq_i16(fv, hv), vertical));
                t = simd_or(t, bits(simd_cmpeq_i16(ev, hv), horizontal));
                if local {
                    t = simd_blend_i16(t, simd_and(t, gap_bits), simd_cmpeq_i16(hv, zero));
                }
                set_trace(&mut traces, i, j, t, active);
            }

            diag = up_h;
            h[j] = simd_blend_i16(up_h, hv, active);
            f[j] = simd_blend_i16(f[j], fv, active);
            left_h = hv;
            e = ev;
            update_best(hv, i, j, active);
        }
    }

    let mut score = Aligned::new(0);
    let mut end_i = Aligned::new(0);
    let mut end_j = Aligned::new(0);
    score.store(best);
    end_i.store(best_i);
    end_j.store(best_j);

    let res = (0..lanes.pairs)
        .map(|k| ScanResult { score: score.0[k] as i32, end: (end_i.0[k] as usize, end_j.0[k] as usize) })
        .collect();

    (res, traces)
}

use pairwise_aligner::prelude::{align, align_pairwise, Band, Config, FreeEnds, Gaps, Mode, Output, Scoring, Strategy};
use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};
use proptest::option;
use proptest::strategy::Strategy as ValueStrategy;

fn seq(max_len: usize) -> impl ValueStrategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..4, 0..max_len)
}

fn config(mode: Mode, output: Output) -> Config {
    (mode | Scoring::simple(2, -1) | Gaps::new(-3, -1) | output).build().unwrap()
}

fn score(q: &[u8], r: &[u8], config: &Config) -> i32 {
    align(q, r, config).unwrap().score
}

const NEG: i64 = i64::MIN / 4;

/// Plain Gotoh over the whole matrix, with out-of-band cells at `NEG`. Returns the best end cell
/// in row-major order, or `None` if no end cell lies inside the band.
fn reference(q: &[u8], r: &[u8], mode: Mode, band: Option<Band>, scores: (i64, i64), gaps: (i64, i64)) -> Option<(i64, (usize, usize))> {
    let (m, n) = (q.len(), r.len());
    let (open, extend) = gaps;
    let local = mode == Mode::Local;
    let (free_row, free_col) = match mode {
        Mode::Global => (false, false),
        Mode::Local => (true, true),
        Mode::SemiGlobal(f) => (f.contains(FreeEnds::SEQ2_LEADING), f.contains(FreeEnds::SEQ1_LEADING))
    };
    let is_end = |i: usize, j: usize| match mode {
        Mode::Global => i == m && j == n,
        Mode::Local => true,
        Mode::SemiGlobal(f) => {
            (i == m && j == n) || (j == n && f.contains(FreeEnds::SEQ1_TRAILING)) || (i == m && f.contains(FreeEnds::SEQ2_TRAILING))
        }
    };
    let inside = |i: usize, j: usize| band.map_or(true, |b| b.in_band(i, j));

    let mut h = vec![vec![NEG; n + 1]; m + 1];
    let mut e = vec![vec![NEG; n + 1]; m + 1];
    let mut f = vec![vec![NEG; n + 1]; m + 1];
    let mut best: Option<(i64, (usize, usize))> = None;

    for i in 0..=m {
        for j in 0..=n {
            if !inside(i, j) {
                continue;
            }
            if i == 0 && j == 0 {
                h[i][j] = 0;
            } else if i == 0 {
                h[i][j] = if free_row { 0 } else { open + j as i64 * extend };
            } else if j == 0 {
                h[i][j] = if free_col { 0 } else { open + i as i64 * extend };
            } else {
                f[i][j] = (h[i - 1][j] + open + extend).max(f[i - 1][j] + extend);
                e[i][j] = (h[i][j - 1] + open + extend).max(e[i][j - 1] + extend);
                let s = if q[i - 1] == r[j - 1] { scores.0 } else { scores.1 };
                h[i][j] = (h[i - 1][j - 1] + s).max(f[i][j]).max(e[i][j]);
                if local {
                    h[i][j] = h[i][j].max(0);
                }
            }
            if is_end(i, j) && best.map_or(true, |(b, _)| h[i][j] > b) {
                best = Some((h[i][j], (i, j)));
            }
        }
    }

    best
}

fn mode_of(kind: u8) -> Mode {
    match kind {
        16 => Mode::Local,
        17 => Mode::Global,
        bits => Mode::SemiGlobal(FreeEnds::from_bits_truncate(bits))
    }
}

proptest! {
    #[test]
    fn prop_matches_reference(
        pairs in proptest::collection::vec((seq(20), seq(20)), 1..12),
        kind in 0u8..18,
        band in option::of((0usize..6, 0usize..6)),
        m in 1i32..5,
        mm in -5i32..1,
        open in -5i32..1,
        extend in -3i32..1
    ) {
        let mode = mode_of(kind);
        let band = band.map(|(lower, upper)| Band::new(lower, upper));
        let mut base = mode | Scoring::simple(m, mm) | Gaps::new(open, extend) | Output::Alignment;
        if let Some(b) = band {
            base = base | b;
        }

        for strategy in [Strategy::Scalar, Strategy::Simd] {
            let c = (base.clone() | strategy).build().unwrap();
            let results = align_pairwise(pairs.iter().map(|(q, r)| (q, r)), &c).collect::<Vec<_>>();
            prop_assert_eq!(results.len(), pairs.len());

            for ((q, r), res) in pairs.iter().zip(results) {
                match reference(q, r, mode, band, (m as i64, mm as i64), (open as i64, extend as i64)) {
                    Some((score, end)) => {
                        prop_assert!(res.is_ok(), "{:?} {:?}", strategy, res);
                        let res = res.unwrap();
                        prop_assert_eq!(res.score as i64, score);
                        prop_assert_eq!(res.end, end);
                        let alignment = res.alignment.unwrap();
                        prop_assert_eq!(alignment.rescore(c.scoring(), &c.gaps()), res.score);
                        if let Some(b) = band {
                            let (mut i, mut j) = alignment.begin;
                            prop_assert!(b.in_band(i, j));
                            for (x, y) in alignment.seq1.iter().zip(alignment.seq2.iter()) {
                                i += x.is_some() as usize;
                                j += y.is_some() as usize;
                                prop_assert!(b.in_band(i, j));
                            }
                        }
                    },
                    None => prop_assert!(res.is_err())
                }
            }
        }
    }

    #[test]
    fn prop_commutative(q in seq(40), r in seq(40)) {
        for mode in [Mode::Global, Mode::Local].iter() {
            let c = config(*mode, Output::Score);
            prop_assert_eq!(score(&q, &r, &c), score(&r, &q, &c));
        }
    }

    #[test]
    fn prop_identity(s in seq(60), m in 1i32..6, mm in -6i32..1, open in -5i32..1, extend in -3i32..1) {
        let c = (Scoring::simple(m, mm) | Gaps::new(open, extend)).build().unwrap();
        prop_assert_eq!(score(&s, &s, &c), m * s.len() as i32);
    }

    #[test]
    fn prop_round_trip(q in seq(40), r in seq(40)) {
        for mode in [Mode::Global, Mode::Local, Mode::SemiGlobal(FreeEnds::SEQ2_LEADING | FreeEnds::SEQ2_TRAILING)].iter() {
            let c = config(*mode, Output::Alignment);
            let res = align(&q, &r, &c).unwrap();
            let alignment = res.alignment.unwrap();
            let (begin, end) = (alignment.begin, alignment.end);
            prop_assert_eq!(res.begin, Some(begin));
            prop_assert_eq!(res.end, end);
            prop_assert_eq!(alignment.seq1.len(), alignment.seq2.len());
            prop_assert_eq!(alignment.ungapped1(), q[begin.0..end.0].to_vec());
            prop_assert_eq!(alignment.ungapped2(), r[begin.1..end.1].to_vec());
            prop_assert_eq!(alignment.rescore(c.scoring(), &c.gaps()), res.score);
        }
    }

    #[test]
    fn prop_band_monotone(q in seq(30), r in seq(30), k in 0usize..6) {
        let base = Scoring::simple(2, -1) | Gaps::new(-3, -1);
        let diff = if q.len() > r.len() { q.len() - r.len() } else { r.len() - q.len() };
        let narrow = (base.clone() | Band::new(diff + k, diff + k)).build().unwrap();
        let wide = (base.clone() | Band::new(diff + k + 1, diff + k + 1)).build().unwrap();
        let full = base.build().unwrap();
        let (s_narrow, s_wide, s_full) = (score(&q, &r, &narrow), score(&q, &r, &wide), score(&q, &r, &full));
        prop_assert!(s_narrow <= s_wide);
        prop_assert!(s_wide <= s_full);

        let huge = (Scoring::simple(2, -1) | Gaps::new(-3, -1) | Band::new(64, 64)).build().unwrap();
        prop_assert_eq!(score(&q, &r, &huge), s_full);
    }

    #[test]
    fn prop_local_floor(q in seq(40), r in seq(40)) {
        prop_assert!(score(&q, &r, &config(Mode::Local, Output::Score)) >= 0);
    }

    #[test]
    fn prop_simd_matches_scalar(pairs in proptest::collection::vec((seq(30), seq(30)), 1..40), local in any::<bool>()) {
        let mode = if local { Mode::Local } else { Mode::SemiGlobal(FreeEnds::SEQ1_LEADING | FreeEnds::SEQ2_TRAILING) };
        let base = mode | Scoring::simple(2, -1) | Gaps::new(-3, -1) | Output::Alignment;
        let scalar = (base.clone() | Strategy::Scalar).build().unwrap();
        let simd = (base | Strategy::Simd).build().unwrap();
        let a = align_pairwise(pairs.iter().map(|(q, r)| (q, r)), &scalar).collect::<Vec<_>>();
        let b = align_pairwise(pairs.iter().map(|(q, r)| (q, r)), &simd).collect::<Vec<_>>();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn scenario_identical() {
    let c = (Scoring::simple(1, -1) | Gaps::new(-2, -1) | Output::Alignment).build().unwrap();
    let res = align(&[0; 4], &[0; 4], &c).unwrap();
    assert_eq!(res.score, 4);
    assert_eq!(res.alignment.unwrap().cigar.to_string(), "4M");
}

#[test]
fn scenario_affine_arithmetic() {
    let gaps = Gaps::new(-2, -1);
    let c = (Scoring::simple(1, -1) | gaps).build().unwrap();
    assert_eq!(score(&[0; 4], &[0; 2], &c), 2 + gaps.cost(2));
    assert_eq!(score(&[0; 4], &[0; 2], &c), -2);
}

#[test]
fn scenario_empty() {
    let gaps = Gaps::new(-2, -1);
    let c = (Scoring::simple(1, -1) | gaps).build().unwrap();
    for k in 0..10 {
        assert_eq!(score(&vec![1; k], &[], &c), gaps.cost(k));
        assert_eq!(score(&[], &vec![1; k], &c), gaps.cost(k));
    }
}

#[test]
fn scenario_banded_semi_global_first() {
    // ACGT sits on diagonal 3 of sequence 1; free ends of sequence 1 allow skipping TTT and AAA
    let q = [3, 3, 3, 0, 1, 2, 3, 0, 0, 0];
    let r = [0, 1, 2, 3];
    let base = Mode::SemiGlobal(FreeEnds::SEQ1_LEADING | FreeEnds::SEQ1_TRAILING)
        | Scoring::simple(1, -1)
        | Gaps::new(-2, -1)
        | Output::Alignment;

    for strategy in [Strategy::Scalar, Strategy::Simd] {
        let c = (base.clone() | Band::new(3, 0) | strategy).build().unwrap();
        let res = align(&q, &r, &c).unwrap();
        assert_eq!(res.score, 4);
        assert_eq!(res.begin, Some((3, 0)));
        assert_eq!(res.end, (7, 4));
        assert_eq!(res.alignment.unwrap().cigar.to_string(), "4M");

        // the band no longer reaches diagonal 3
        let c = (base.clone() | Band::new(2, 0) | strategy).build().unwrap();
        let res = align(&q, &r, &c).unwrap();
        assert!(res.score < 4);
        assert!(res.end.0 - res.end.1 <= 2);
        assert_eq!(res.alignment.unwrap().rescore(c.scoring(), &c.gaps()), res.score);
    }
}

#[test]
fn scenario_single_free_end() {
    let base = Scoring::simple(1, -1) | Gaps::new(-2, -1);
    let semi = |f: FreeEnds| (Mode::SemiGlobal(f) | base.clone()).build().unwrap();

    // trailing AAA of sequence 1 is free only with SEQ1_TRAILING
    let (q, r) = ([0, 1, 2, 3, 0, 0, 0], [0, 1, 2, 3]);
    assert_eq!(score(&q, &r, &semi(FreeEnds::SEQ1_TRAILING)), 4);
    assert_eq!(score(&q, &r, &semi(FreeEnds::SEQ1_LEADING)), -1);

    // leading TT of sequence 2 is free only with SEQ2_LEADING
    let (q, r) = ([0, 1, 2], [3, 3, 0, 1, 2]);
    assert_eq!(score(&q, &r, &semi(FreeEnds::SEQ2_LEADING)), 3);
    assert_eq!(score(&q, &r, &semi(FreeEnds::SEQ2_TRAILING)), -1);

    // trailing TT of sequence 2 is free only with SEQ2_TRAILING
    let (q, r) = ([0, 1, 2], [0, 1, 2, 3, 3]);
    assert_eq!(score(&q, &r, &semi(FreeEnds::SEQ2_TRAILING)), 3);
    assert_eq!(score(&q, &r, &semi(FreeEnds::SEQ2_LEADING)), -1);

    // both leading ends free: either sequence may start with skipped symbols
    let leading = (Mode::SemiGlobal(FreeEnds::SEQ1_LEADING | FreeEnds::SEQ2_LEADING) | base.clone() | Output::Alignment)
        .build()
        .unwrap();
    let res = align(&[3, 3, 0, 1, 2], &[0, 1, 2], &leading).unwrap();
    assert_eq!((res.score, res.begin), (3, Some((2, 0))));
    let res = align(&[0, 1, 2], &[2, 2, 0, 1, 2], &leading).unwrap();
    assert_eq!((res.score, res.begin), (3, Some((0, 2))));
}

#[test]
fn scenario_saturated_gaps() {
    let c = (Scoring::simple(1, -1) | Gaps::new(0, -1_000_000) | Output::Alignment).build().unwrap();
    let res = align(&[0; 3000], &[], &c).unwrap();
    assert_eq!(res.score, i32::MIN);
    assert_eq!(res.end, (3000, 0));
    assert_eq!(res.alignment.unwrap().cigar.to_string(), "3000I");
}

//! Pairwise alignment driver.
//!
//! [`align`] handles a single pair. [`align_pairwise`] lazily aligns a stream of pairs, pulling up
//! to [`L`](crate::simd::L) pairs at a time so that batches can run in SIMD lanes, and yields one
//! result per pair in input order.

use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cigar::Alignment;
use crate::config::{Config, Strategy};
use crate::error::{Error, Result};
use crate::scan_batch::{fits, ScanBatch};
use crate::scan_scalar::{Scan, ScanResult};
use crate::simd::L;
use crate::trace::TraceMatrix;

/// Outcome of aligning one pair.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignResult {
    pub score: i32,
    /// One past the last aligned position of sequence 1 and sequence 2.
    pub end: (usize, usize),
    /// First aligned position of each sequence; only known after traceback.
    pub begin: Option<(usize, usize)>,
    pub alignment: Option<Alignment>
}

impl AlignResult {
    fn new(res: ScanResult, trace: Option<&TraceMatrix>, seq1: &[u8], seq2: &[u8]) -> Self {
        let alignment = trace.map(|t| t.traceback(seq1, seq2, res.end));
        Self {
            score: res.score,
            end: res.end,
            begin: alignment.as_ref().map(|a| a.begin),
            alignment
        }
    }
}

/// Align one pair of rank sequences.
pub fn align(seq1: &[u8], seq2: &[u8], config: &Config) -> Result<AlignResult> {
    match config.strategy() {
        Strategy::Simd => {
            let pair = [(seq1, seq2)];
            if config.traceback() {
                let a = ScanBatch::<true>::align(&pair, config)?;
                Ok(AlignResult::new(a.res(0), Some(a.trace(0)), seq1, seq2))
            } else {
                let a = ScanBatch::<false>::align(&pair, config)?;
                Ok(AlignResult::new(a.res(0), None, seq1, seq2))
            }
        },
        Strategy::Auto | Strategy::Scalar => {
            config.check_pair(seq1, seq2)?;
            Ok(align_scalar(seq1, seq2, config))
        }
    }
}

/// Lazily align every pair of `pairs`.
///
/// Pairs that fail validation yield their own error without affecting the rest of the stream.
///
/// ```
/// use pairwise_aligner::prelude::*;
///
/// let config = (Scoring::simple(1, -1) | Gaps::new(-2, -1)).build().unwrap();
/// let pairs = vec![(vec![0u8, 1, 2], vec![0u8, 1, 2]), (vec![0, 0], vec![])];
/// let scores = align_pairwise(pairs, &config).map(|r| r.unwrap().score).collect::<Vec<_>>();
/// assert_eq!(scores, vec![3, -4]);
/// ```
pub fn align_pairwise<I, S1, S2>(pairs: I, config: &Config) -> AlignPairwise<'_, I::IntoIter>
where
    I: IntoIterator<Item = (S1, S2)>,
    S1: AsRef<[u8]>,
    S2: AsRef<[u8]>
{
    AlignPairwise { pairs: pairs.into_iter(), config, buf: VecDeque::with_capacity(L) }
}

/// Iterator returned by [`align_pairwise`].
pub struct AlignPairwise<'a, I> {
    pairs: I,
    config: &'a Config,
    buf: VecDeque<Result<AlignResult>>
}

impl<'a, I, S1, S2> AlignPairwise<'a, I>
where
    I: Iterator<Item = (S1, S2)>,
    S1: AsRef<[u8]>,
    S2: AsRef<[u8]>
{
    fn fill(&mut self) {
        let batch = self.pairs.by_ref().take(L).collect::<Vec<_>>();
        if batch.is_empty() {
            return;
        }
        log::trace!("aligning a batch of {} pairs", batch.len());

        let checked = batch
            .iter()
            .map(|(a, b)| self.config.check_pair(a.as_ref(), b.as_ref()))
            .collect::<Vec<_>>();
        let valid = batch
            .iter()
            .zip(checked.iter())
            .filter(|(_, c)| c.is_ok())
            .map(|(p, _)| (p.0.as_ref(), p.1.as_ref()))
            .collect::<Vec<_>>();

        let simd = match self.config.strategy() {
            Strategy::Scalar => false,
            Strategy::Simd => true,
            Strategy::Auto => {
                let use_simd = valid.len() >= 2 && fits(&valid, self.config);
                log::debug!(
                    "{} strategy for {} valid pairs",
                    if use_simd { "SIMD" } else { "scalar" },
                    valid.len()
                );
                use_simd
            }
        };

        let mut results: VecDeque<Result<AlignResult>> = if simd {
            match align_simd(&valid, self.config) {
                Ok(res) => res.into_iter().map(Ok).collect(),
                Err(e) => valid.iter().map(|_| Err(e.clone())).collect()
            }
        } else {
            valid.iter().map(|(a, b)| Ok(align_scalar(a, b, self.config))).collect()
        };

        for c in checked {
            match c {
                Ok(()) => {
                    if let Some(r) = results.pop_front() {
                        self.buf.push_back(r);
                    }
                },
                Err(e) => self.buf.push_back(Err(Error::from(e)))
            }
        }
    }
}

impl<'a, I, S1, S2> Iterator for AlignPairwise<'a, I>
where
    I: Iterator<Item = (S1, S2)>,
    S1: AsRef<[u8]>,
    S2: AsRef<[u8]>
{
    type Item = Result<AlignResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.is_empty() {
            self.fill();
        }
        self.buf.pop_front()
    }
}

// Pairs reaching the engines below have passed `Config::check_pair` already.
fn align_scalar(seq1: &[u8], seq2: &[u8], config: &Config) -> AlignResult {
    if config.traceback() {
        let a = Scan::<true>::align_checked(seq1, seq2, config);
        AlignResult::new(a.res(), Some(a.trace()), seq1, seq2)
    } else {
        let a = Scan::<false>::align_checked(seq1, seq2, config);
        AlignResult::new(a.res(), None, seq1, seq2)
    }
}

fn align_simd(pairs: &[(&[u8], &[u8])], config: &Config) -> Result<Vec<AlignResult>> {
    if config.traceback() {
        let a = ScanBatch::<true>::align_checked(pairs, config)?;
        Ok(pairs
            .iter()
            .enumerate()
            .map(|(k, (q, r))| AlignResult::new(a.res(k), Some(a.trace(k)), q, r))
            .collect())
    } else {
        let a = ScanBatch::<false>::align_checked(pairs, config)?;
        Ok(pairs
            .iter()
            .enumerate()
            .map(|(k, (q, r))| AlignResult::new(a.res(k), None, q, r))
            .collect())
    }
}

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Alignment operation. `I` consumes a symbol of sequence 1 only, `D` a symbol of sequence 2 only.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operation {
    M,
    I,
    D
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OpLen {
    pub op: Operation,
    pub len: usize
}

/// Run-length encoded operations.
///
/// Operations are added back to front during traceback; `get(0)` is the first operation of the
/// alignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cigar {
    s: Vec<OpLen>
}

impl Cigar {
    pub fn new(max_len: usize) -> Self {
        Cigar { s: Vec::with_capacity(max_len) }
    }

    /// Prepend one operation.
    pub fn add(&mut self, op: Operation) {
        match self.s.last_mut() {
            Some(last) if last.op == op => last.len += 1,
            _ => self.s.push(OpLen { op, len: 1 })
        }
    }

    pub fn len(&self) -> usize {
        self.s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.s.is_empty()
    }

    pub fn get(&self, i: usize) -> OpLen {
        self.s[self.s.len() - 1 - i]
    }

    pub fn iter(&self) -> impl Iterator<Item = OpLen> + '_ {
        self.s.iter().rev().copied()
    }

    /// Number of symbols consumed from sequence 1 and sequence 2.
    pub fn consumed(&self) -> (usize, usize) {
        self.iter().fold((0, 0), |(i, j), op_len| match op_len.op {
            Operation::M => (i + op_len.len, j + op_len.len),
            Operation::I => (i + op_len.len, j),
            Operation::D => (i, j + op_len.len)
        })
    }

    /// Spell out the gapped pair for the aligned parts `q` and `r` of the two sequences.
    pub fn gapped(&self, q: &[u8], r: &[u8]) -> (Vec<Option<u8>>, Vec<Option<u8>>) {
        let total = self.iter().map(|op_len| op_len.len).sum();
        let mut a = Vec::with_capacity(total);
        let mut b = Vec::with_capacity(total);
        let mut i = 0;
        let mut j = 0;

        for op_len in self.iter() {
            for _k in 0..op_len.len {
                match op_len.op {
                    Operation::M => {
                        a.push(Some(q[i]));
                        b.push(Some(r[j]));
                        i += 1;
                        j += 1;
                    },
                    Operation::I => {
                        a.push(Some(q[i]));
                        b.push(None);
                        i += 1;
                    },
                    Operation::D => {
                        a.push(None);
                        b.push(Some(r[j]));
                        j += 1;
                    }
                }
            }
        }

        (a, b)
    }

    /// Render the gapped pair as text, decoding ranks with `decode` and gaps as `-`.
    pub fn format_with<F: Fn(u8) -> char>(&self, q: &[u8], r: &[u8], decode: F) -> (String, String) {
        let (a, b) = self.gapped(q, r);
        let render = |v: Vec<Option<u8>>| v.into_iter().map(|c| c.map_or('-', &decode)).collect::<String>();
        (render(a), render(b))
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op_len in self.iter() {
            let c = match op_len.op {
                Operation::M => 'M',
                Operation::I => 'I',
                Operation::D => 'D'
            };
            write!(f, "{}{}", op_len.len, c)?;
        }
        Ok(())
    }
}

/// An explicit alignment of `seq1[begin.0..end.0]` with `seq2[begin.1..end.1]`.
///
/// `None` entries of the gapped sequences are gaps. Both gapped sequences have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alignment {
    pub begin: (usize, usize),
    pub end: (usize, usize),
    pub seq1: Vec<Option<u8>>,
    pub seq2: Vec<Option<u8>>,
    pub cigar: Cigar
}

impl Alignment {
    pub fn new(begin: (usize, usize), end: (usize, usize), cigar: Cigar, q: &[u8], r: &[u8]) -> Self {
        debug_assert_eq!(cigar.consumed(), (q.len(), r.len()));
        let (seq1, seq2) = cigar.gapped(q, r);
        Self { begin, end, seq1, seq2, cigar }
    }

    pub fn len(&self) -> usize {
        self.seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq1.is_empty()
    }

    /// Sequence 1 symbols consumed by the alignment.
    pub fn ungapped1(&self) -> Vec<u8> {
        self.seq1.iter().flatten().copied().collect()
    }

    /// Sequence 2 symbols consumed by the alignment.
    pub fn ungapped2(&self) -> Vec<u8> {
        self.seq2.iter().flatten().copied().collect()
    }

    /// Score the alignment under `matrix` and `gaps`.
    pub fn rescore<M: crate::scores::Matrix>(&self, matrix: &M, gaps: &crate::scores::Gaps) -> i32 {
        let mut score: i32 = 0;
        let mut i = 0;
        let mut j = 0;
        let q = self.ungapped1();
        let r = self.ungapped2();

        for op_len in self.cigar.iter() {
            match op_len.op {
                Operation::M => {
                    for _k in 0..op_len.len {
                        score = score.saturating_add(matrix.score(q[i], r[j]));
                        i += 1;
                        j += 1;
                    }
                },
                Operation::I => {
                    score = score.saturating_add(gaps.cost(op_len.len));
                    i += op_len.len;
                },
                Operation::D => {
                    score = score.saturating_add(gaps.cost(op_len.len));
                    j += op_len.len;
                }
            }
        }

        score
    }
}

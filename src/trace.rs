//! Trace directions, the (banded) trace matrix, and traceback.

use std::fmt;

use bitflags::bitflags;

use crate::band::Band;
use crate::cigar::{Alignment, Cigar, Operation};

bitflags! {
    /// Predecessor moves recorded for one DP cell.
    ///
    /// `DIAGONAL`, `VERTICAL` and `HORIZONTAL` describe the best layer: the cell's score came from
    /// the diagonal predecessor, from the vertical gap layer, or from the horizontal gap layer.
    /// `UP_OPEN`/`UP` tell whether the vertical gap layer of the cell opened a gap from the cell
    /// above or extended one; `LEFT_OPEN`/`LEFT` do the same for the horizontal layer. Ties set
    /// several bits. A cell without best-layer bits starts an alignment.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct TraceDirections: u8 {
        const DIAGONAL = 1 << 0;
        const UP_OPEN = 1 << 1;
        const UP = 1 << 2;
        const LEFT_OPEN = 1 << 3;
        const LEFT = 1 << 4;
        const VERTICAL = 1 << 5;
        const HORIZONTAL = 1 << 6;
    }
}

impl TraceDirections {
    pub const NONE: Self = Self::empty();

    pub(crate) const BEST: Self = Self::DIAGONAL.union(Self::VERTICAL).union(Self::HORIZONTAL);

    /// Whether the best layer has no predecessor.
    #[inline]
    pub fn is_start(&self) -> bool {
        !self.intersects(Self::BEST)
    }
}

/// Letters by default, arrows with `{:#}`.
impl fmt::Display for TraceDirections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrows = f.alternate();
        if self.is_empty() {
            return write!(f, "{}", if arrows { '↺' } else { 'N' });
        }
        let symbols = [
            (Self::DIAGONAL, 'D', '↖'),
            (Self::VERTICAL, 'V', '⇑'),
            (Self::UP_OPEN, 'U', '⇡'),
            (Self::UP, 'u', '↑'),
            (Self::HORIZONTAL, 'H', '⇐'),
            (Self::LEFT_OPEN, 'L', '⇠'),
            (Self::LEFT, 'l', '←')
        ];
        for (flag, letter, arrow) in symbols.iter() {
            if self.contains(*flag) {
                write!(f, "{}", if arrows { arrow } else { letter })?;
            }
        }
        Ok(())
    }
}

/// Trace directions of a `(rows + 1) x (cols + 1)` matrix. With a band only the cells of each
/// row inside the band are stored.
#[derive(Clone, Debug)]
pub struct TraceMatrix {
    rows: usize,
    cols: usize,
    band: Option<Band>,
    width: usize,
    data: Vec<TraceDirections>
}

impl TraceMatrix {
    pub fn new(rows: usize, cols: usize, band: Option<&Band>) -> Self {
        let width = band.map_or(cols + 1, |b| b.width(cols));
        Self {
            rows,
            cols,
            band: band.copied(),
            width,
            data: vec![TraceDirections::NONE; (rows + 1) * width]
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn in_band(&self, i: usize, j: usize) -> bool {
        i <= self.rows && j <= self.cols && self.band.map_or(true, |b| b.in_band(i, j))
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(self.in_band(i, j));
        let offset = self.band.map_or(0, |b| i.saturating_sub(b.lower));
        i * self.width + (j - offset)
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, t: TraceDirections) {
        let idx = self.idx(i, j);
        self.data[idx] = t;
    }

    /// Directions of cell `(i, j)`; cells outside the band have none.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> TraceDirections {
        if self.in_band(i, j) { self.data[self.idx(i, j)] } else { TraceDirections::NONE }
    }

    /// Walk back from `end` and return the cell where the alignment starts together with the
    /// operations on the way.
    ///
    /// In the best layer the diagonal move wins over the vertical gap layer, which wins over
    /// the horizontal gap layer. Inside a gap layer opening wins over extending.
    pub fn cigar(&self, end: (usize, usize)) -> ((usize, usize), Cigar) {
        let (mut i, mut j) = end;
        let mut cigar = Cigar::new(i + j);
        let mut layer = Layer::Best;

        while i > 0 || j > 0 {
            let t = self.get(i, j);
            match layer {
                Layer::Best => {
                    if t.contains(TraceDirections::DIAGONAL) && i > 0 && j > 0 {
                        cigar.add(Operation::M);
                        i -= 1;
                        j -= 1;
                    } else if t.contains(TraceDirections::VERTICAL) && i > 0 {
                        layer = Layer::Vertical;
                    } else if t.contains(TraceDirections::HORIZONTAL) && j > 0 {
                        layer = Layer::Horizontal;
                    } else {
                        break;
                    }
                },
                Layer::Vertical => {
                    if i == 0 {
                        break;
                    }
                    cigar.add(Operation::I);
                    if t.contains(TraceDirections::UP_OPEN) || !t.contains(TraceDirections::UP) {
                        layer = Layer::Best;
                    }
                    i -= 1;
                },
                Layer::Horizontal => {
                    if j == 0 {
                        break;
                    }
                    cigar.add(Operation::D);
                    if t.contains(TraceDirections::LEFT_OPEN) || !t.contains(TraceDirections::LEFT) {
                        layer = Layer::Best;
                    }
                    j -= 1;
                }
            }
        }

        ((i, j), cigar)
    }

    /// Reconstruct the explicit alignment ending at `end`.
    pub fn traceback(&self, seq1: &[u8], seq2: &[u8], end: (usize, usize)) -> Alignment {
        let (begin, cigar) = self.cigar(end);
        Alignment::new(begin, end, cigar, &seq1[begin.0..end.0], &seq2[begin.1..end.1])
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
enum Layer {
    Best,
    Vertical,
    Horizontal
}

impl fmt::Display for TraceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..=self.rows {
            for j in 0..=self.cols {
                if j > 0 {
                    write!(f, " ")?;
                }
                if self.in_band(i, j) {
                    let t = self.get(i, j);
                    let cell = if f.alternate() { format!("{:#}", t) } else { t.to_string() };
                    write!(f, "{:>4}", cell)?;
                } else {
                    write!(f, "{:>4}", ".")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

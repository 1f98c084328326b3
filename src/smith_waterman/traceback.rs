use super::{Score, ScoreTables};
use crate::{
    Scoring,
    alignment::{Alignment, AlignmentBuilder, Step},
    sequence::encode_base,
};

/// Order in which the moves out of an H cell are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Diagonal when `H == H[i-1][j-1] + sub`, then E, then F
    DiagonalFirst,
    /// E when `H == E`, then F when `H == F`, otherwise diagonal
    GapFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    H,
    /// Inside a run of gaps in sequence 2 (moving up)
    E,
    /// Inside a run of gaps in sequence 1 (moving left)
    F,
}

/// Walks the filled tables backwards from the best cell, yielding one [`Step`] per alignment
/// column, last column first.
///
/// Gap runs are followed as a three state machine so that a run is only left through the cell
/// that actually opened it, keeping the reconstructed path consistent with its affine cost.
pub struct AlignmentPathIter<'a, M: ScoreTables> {
    tables: &'a M,
    seq1: &'a [u8],
    seq2: &'a [u8],
    scoring: &'a Scoring,
    gap_open: M::Score,
    gap_extend: M::Score,
    priority: Priority,
    row_idx: usize,
    col_idx: usize,
    state: State,
    finished: bool,
}

impl<'a, M: ScoreTables> AlignmentPathIter<'a, M> {
    /// `end` is the 1-based `(i, j)` cell holding the best score
    pub fn new(
        tables: &'a M,
        seq1: &'a [u8],
        seq2: &'a [u8],
        scoring: &'a Scoring,
        end: (usize, usize),
        priority: Priority,
    ) -> Self {
        assert!(
            end.0 <= seq1.len() && end.1 <= seq2.len(),
            "traceback start {end:?} lies outside the {}x{} matrix",
            seq1.len(),
            seq2.len()
        );

        Self {
            tables,
            seq1,
            seq2,
            scoring,
            gap_open: M::Score::from_i32(scoring.gap_open_penalty as i32),
            gap_extend: M::Score::from_i32(scoring.gap_extend_penalty as i32),
            priority,
            row_idx: end.0,
            col_idx: end.1,
            state: State::H,
            finished: false,
        }
    }

    /// 1-based coordinates of the first aligned cell. Only meaningful once the iterator is
    /// exhausted.
    pub fn start(&self) -> (usize, usize) {
        (self.row_idx + 1, self.col_idx + 1)
    }

    #[inline(always)]
    fn substitution(&self, i: usize, j: usize) -> i32 {
        self.scoring.substitution(
            encode_base(self.seq1[i - 1]),
            encode_base(self.seq2[j - 1]),
        )
    }

    #[inline(always)]
    fn diagonal(&mut self) -> Step {
        let (i, j) = (self.row_idx, self.col_idx);
        let pos = (i - 1, j - 1);
        self.row_idx -= 1;
        self.col_idx -= 1;
        if self.substitution(i, j) > 0 {
            Step::Match(pos)
        } else {
            Step::Mismatch(pos)
        }
    }

    #[inline(always)]
    fn is_diagonal(&self, h: M::Score) -> bool {
        let (i, j) = (self.row_idx, self.col_idx);
        let sub = M::Score::from_i32(self.substitution(i, j));
        self.tables.h(i - 1, j - 1).sat_add(sub) == h
    }
}

impl<M: ScoreTables> Iterator for AlignmentPathIter<'_, M> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let (i, j) = (self.row_idx, self.col_idx);
        match self.state {
            State::H => {
                if i == 0 || j == 0 {
                    self.finished = true;
                    return None;
                }
                let h = self.tables.h(i, j);
                if h <= M::Score::ZERO {
                    self.finished = true;
                    return None;
                }

                let diagonal_first = self.priority == Priority::DiagonalFirst;
                if diagonal_first && self.is_diagonal(h) {
                    return Some(self.diagonal());
                }
                if h == self.tables.e(i, j) {
                    self.state = State::E;
                    return self.next();
                }
                if h == self.tables.f(i, j) {
                    self.state = State::F;
                    return self.next();
                }
                if diagonal_first {
                    // Tables that satisfy the recurrence always offer one of the moves above
                    self.finished = true;
                    return None;
                }
                Some(self.diagonal())
            }
            State::E => {
                let e = self.tables.e(i, j);
                let extends = i > 1 && e == self.tables.e(i - 1, j).sat_sub(self.gap_extend);
                debug_assert!(
                    extends || e == self.tables.h(i - 1, j).sat_sub(self.gap_open)
                );
                self.row_idx -= 1;
                if !extends {
                    self.state = State::H;
                }
                Some(Step::Up((i - 1, j - 1)))
            }
            State::F => {
                let f = self.tables.f(i, j);
                let extends = j > 1 && f == self.tables.f(i, j - 1).sat_sub(self.gap_extend);
                debug_assert!(
                    extends || f == self.tables.h(i, j - 1).sat_sub(self.gap_open)
                );
                self.col_idx -= 1;
                if !extends {
                    self.state = State::H;
                }
                Some(Step::Left((i - 1, j - 1)))
            }
        }
    }
}

/// Reconstructs the alignment ending at `end`, or [`Alignment::empty`] when `score` is not
/// positive.
pub fn traceback<M: ScoreTables>(
    tables: &M,
    seq1: &[u8],
    seq2: &[u8],
    scoring: &Scoring,
    score: i32,
    end: (usize, usize),
    priority: Priority,
) -> Alignment {
    if score <= 0 {
        return Alignment::empty();
    }

    let mut builder = AlignmentBuilder::new(seq1, seq2);
    let mut iter = AlignmentPathIter::new(tables, seq1, seq2, scoring, end, priority);
    for step in iter.by_ref() {
        builder.push(step);
    }
    builder.finish(score, iter.start(), end)
}

use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Scoring,
    sequence::{UNKNOWN, encode_base},
};

pub const GAP: char = '-';
/// Written in place of every input byte outside the alphabet, so that the aligned strings stay
/// ASCII and never contain a symbol that reads back as [`GAP`]
pub const UNKNOWN_SYMBOL: u8 = b'N';

/// One column of an alignment path, carrying the 0-based positions in
/// (sequence 1, sequence 2) of the cell it was emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Match((usize, usize)),
    Mismatch((usize, usize)),
    /// Gap in sequence 2, consumes a symbol of sequence 1
    Up((usize, usize)),
    /// Gap in sequence 1, consumes a symbol of sequence 2
    Left((usize, usize)),
}

impl Step {
    pub fn pos(&self) -> (usize, usize) {
        match self {
            Step::Up(pos) | Step::Left(pos) => *pos,
            Step::Match(pos) | Step::Mismatch(pos) => *pos,
        }
    }

    pub fn row(&self) -> usize {
        self.pos().0
    }

    pub fn col(&self) -> usize {
        self.pos().1
    }
}

/// A local alignment of sequence 1 against sequence 2.
///
/// Coordinates are 1-based and inclusive into the original sequences. The empty alignment
/// (nothing scored above zero) has empty strings and all coordinates set to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alignment {
    pub score: i32,
    pub aligned_seq1: String,
    pub aligned_seq2: String,
    /// `|` for identical symbols, `*` for mismatches, space for gap columns
    pub match_line: String,
    pub start1: usize,
    pub end1: usize,
    pub start2: usize,
    pub end2: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Pair(u8, u8),
    GapInSeq1,
    GapInSeq2,
}

impl Column {
    fn is_gap(&self) -> bool {
        !matches!(self, Column::Pair(..))
    }
}

impl Alignment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.match_line.is_empty()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.match_line.len()
    }

    pub fn matches(&self) -> usize {
        self.match_line.bytes().filter(|&c| c == b'|').count()
    }

    pub fn mismatches(&self) -> usize {
        self.match_line.bytes().filter(|&c| c == b'*').count()
    }

    /// Number of gap columns, in either sequence
    pub fn gaps(&self) -> usize {
        self.match_line.bytes().filter(|&c| c == b' ').count()
    }

    /// Number of gap runs, each of which paid the gap open penalty once
    pub fn gap_opens(&self) -> usize {
        self.columns().dedup().filter(Column::is_gap).count()
    }

    /// Fraction of columns that are matches
    pub fn identity(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.matches() as f64 / self.len() as f64
    }

    /// Recomputes the score from the aligned strings alone, with a gap run of length `n`
    /// costing `gap_open + (n - 1) * gap_extend`.
    ///
    /// When opening is cheaper than extending, the recurrence closes and reopens the gap at
    /// every position, so each column after the first costs `gap_open` instead.
    pub fn rescore(&self, scoring: &Scoring) -> i32 {
        let gap_open = scoring.gap_open_penalty as i32;
        let gap_extend = (scoring.gap_extend_penalty as i32).min(gap_open);

        self.columns()
            .dedup_with_count()
            .map(|(run, column)| {
                let run = run as i32;
                match column {
                    Column::Pair(a, b) => run * scoring.substitution(a, b),
                    Column::GapInSeq1 | Column::GapInSeq2 => {
                        -(gap_open + (run - 1) * gap_extend)
                    }
                }
            })
            .sum()
    }

    fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        let code = |c: char| u8::try_from(c).map_or(UNKNOWN, encode_base);
        self.aligned_seq1
            .chars()
            .zip(self.aligned_seq2.chars())
            .map(move |pair| match pair {
                (GAP, _) => Column::GapInSeq1,
                (_, GAP) => Column::GapInSeq2,
                (a, b) => Column::Pair(code(a), code(b)),
            })
    }
}

/// Collects traceback steps, which arrive from the alignment end backwards.
pub(crate) struct AlignmentBuilder<'a> {
    seq1: &'a [u8],
    seq2: &'a [u8],
    aligned_seq1: Vec<u8>,
    aligned_seq2: Vec<u8>,
    match_line: Vec<u8>,
}

impl<'a> AlignmentBuilder<'a> {
    pub fn new(seq1: &'a [u8], seq2: &'a [u8]) -> Self {
        Self {
            seq1,
            seq2,
            aligned_seq1: vec![],
            aligned_seq2: vec![],
            match_line: vec![],
        }
    }

    pub fn push(&mut self, step: Step) {
        let (row, col) = step.pos();
        let symbol = |base: u8| {
            if encode_base(base) == UNKNOWN {
                UNKNOWN_SYMBOL
            } else {
                base
            }
        };
        let (a, b, marker) = match step {
            Step::Match(_) => (symbol(self.seq1[row]), symbol(self.seq2[col]), b'|'),
            Step::Mismatch(_) => (symbol(self.seq1[row]), symbol(self.seq2[col]), b'*'),
            Step::Up(_) => (symbol(self.seq1[row]), GAP as u8, b' '),
            Step::Left(_) => (GAP as u8, symbol(self.seq2[col]), b' '),
        };
        self.aligned_seq1.push(a);
        self.aligned_seq2.push(b);
        self.match_line.push(marker);
    }

    /// `start` and `end` are 1-based inclusive (row, col) coordinates
    pub fn finish(self, score: i32, start: (usize, usize), end: (usize, usize)) -> Alignment {
        let reversed =
            |bytes: Vec<u8>| -> String { bytes.into_iter().rev().map(char::from).collect() };
        Alignment {
            score,
            aligned_seq1: reversed(self.aligned_seq1),
            aligned_seq2: reversed(self.aligned_seq2),
            match_line: reversed(self.match_line),
            start1: start.0,
            end1: end.0,
            start2: start.1,
            end2: end.1,
        }
    }
}

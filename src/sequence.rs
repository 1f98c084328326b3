//! Nucleotide encoding and the query profile shared by every solver.
//!
//! Sequences are plain bytes. `A`, `C`, `G` and `T` (either case) map to the codes `0..=3`, every
//! other byte maps to [`UNKNOWN`], which scores as a mismatch against everything, itself
//! included. Ambiguous bases therefore never fail an alignment, they simply never match.

use crate::{Scoring, smith_waterman::Score};

pub const ALPHABET_SIZE: usize = 5;
pub const UNKNOWN: u8 = 4;

#[inline(always)]
pub fn encode_base(base: u8) -> u8 {
    match base {
        b'A' | b'a' => 0,
        b'C' | b'c' => 1,
        b'G' | b'g' => 2,
        b'T' | b't' => 3,
        _ => UNKNOWN,
    }
}

pub fn encode(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&base| encode_base(base)).collect()
}

/// Empty, or made up entirely of symbols outside the alphabet. No local alignment can score
/// above zero against such a sequence.
pub fn is_degenerate(seq: &[u8]) -> bool {
    seq.iter().all(|&base| encode_base(base) == UNKNOWN)
}

/// Precomputed `sub(code, query[j])` for every alphabet code and query position, stored
/// code-major so the inner loop of a solver reads one contiguous row per reference symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryProfile<T> {
    scores: Vec<T>,
    len: usize,
}

impl<T: Score> QueryProfile<T> {
    pub fn new(query: &[u8], scoring: &Scoring) -> Self {
        let codes = encode(query);
        let mut scores = Vec::with_capacity(ALPHABET_SIZE * codes.len());
        for code in 0..ALPHABET_SIZE as u8 {
            scores.extend(
                codes
                    .iter()
                    .map(|&query_code| T::from_i32(scoring.substitution(code, query_code))),
            );
        }

        Self {
            scores,
            len: codes.len(),
        }
    }

    /// Length of the query this profile was built from
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Substitution scores of `code` against every query position
    #[inline(always)]
    pub fn row(&self, code: u8) -> &[T] {
        let start = code as usize * self.len;
        &self.scores[start..start + self.len]
    }

    #[inline(always)]
    pub fn score(&self, code: u8, query_idx: usize) -> T {
        self.scores[code as usize * self.len + query_idx]
    }
}

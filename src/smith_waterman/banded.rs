//! Smith Waterman restricted to a diagonal band of half-width `band` around the main diagonal.
//!
//! Row `i` only computes the columns `max(1, i - band) ..= min(n, i + band)`. Columns that fall
//! outside `[1, n]` are clamped away rather than wrapped, and every read outside the band sees
//! zero. The result is exact whenever the optimal path stays inside the band and a lower bound
//! otherwise, so callers who need the optimum should pick `band >= |m - n|` plus the longest
//! expected indel run, or use the reference solver.

use log::{trace, warn};

use super::{
    Score, ScoreTables,
    traceback::{Priority, traceback},
};
use crate::{
    Scoring,
    alignment::Alignment,
    sequence::{QueryProfile, encode, is_degenerate},
};

/// H/E/F tables holding `2 * band + 1` cells per row, cell `k` of row `i` being column
/// `i + k - band`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandedMatrix<T> {
    band: usize,
    width: usize,
    cols: usize,
    h: Vec<T>,
    e: Vec<T>,
    f: Vec<T>,
}

impl<T: Score> BandedMatrix<T> {
    pub fn new(rows: usize, cols: usize, band: usize) -> Self {
        let width = 2 * band + 1;
        let size = (rows + 1) * width;
        Self {
            band,
            width,
            cols,
            h: vec![T::ZERO; size],
            e: vec![T::ZERO; size],
            f: vec![T::ZERO; size],
        }
    }

    /// Columns computed for row `i`, empty once the band has moved past the last column
    pub fn columns(&self, i: usize) -> std::ops::RangeInclusive<usize> {
        i.saturating_sub(self.band).max(1)..=(i + self.band).min(self.cols)
    }

    #[inline(always)]
    fn idx(&self, i: usize, j: usize) -> Option<usize> {
        if i == 0 || j == 0 || j > self.cols {
            return None;
        }
        let k = (j + self.band).checked_sub(i)?;
        (k < self.width).then_some(i * self.width + k)
    }

    #[inline(always)]
    fn set(&mut self, i: usize, j: usize, h: T, e: T, f: T) {
        let idx = self
            .idx(i, j)
            .unwrap_or_else(|| panic!("cell ({i}, {j}) lies outside the band"));
        self.h[idx] = h;
        self.e[idx] = e;
        self.f[idx] = f;
    }
}

impl<T: Score> ScoreTables for BandedMatrix<T> {
    type Score = T;

    #[inline(always)]
    fn h(&self, i: usize, j: usize) -> T {
        self.idx(i, j).map_or(T::ZERO, |idx| self.h[idx])
    }

    #[inline(always)]
    fn e(&self, i: usize, j: usize) -> T {
        self.idx(i, j).map_or(T::ZERO, |idx| self.e[idx])
    }

    #[inline(always)]
    fn f(&self, i: usize, j: usize) -> T {
        self.idx(i, j).map_or(T::ZERO, |idx| self.f[idx])
    }
}

pub fn banded<T: Score>(seq1: &[u8], seq2: &[u8], scoring: &Scoring, band: usize) -> Alignment {
    let profile = QueryProfile::<T>::new(seq2, scoring);
    banded_with_profile(seq1, seq2, &profile, scoring, band)
}

/// # Panics
///
/// When `profile` was not built from a sequence of the same length as `seq2`
pub fn banded_with_profile<T: Score>(
    seq1: &[u8],
    seq2: &[u8],
    profile: &QueryProfile<T>,
    scoring: &Scoring,
    band: usize,
) -> Alignment {
    assert_eq!(
        profile.len(),
        seq2.len(),
        "query profile length does not match the query"
    );
    if is_degenerate(seq1) || is_degenerate(seq2) {
        return Alignment::empty();
    }

    let (matrix, best, end) = fill(seq1, profile, scoring, band);
    traceback(
        &matrix,
        seq1,
        seq2,
        scoring,
        best.to_i32(),
        end,
        Priority::DiagonalFirst,
    )
}

pub fn fill<T: Score>(
    seq1: &[u8],
    profile: &QueryProfile<T>,
    scoring: &Scoring,
    band: usize,
) -> (BandedMatrix<T>, T, (usize, usize)) {
    let codes = encode(seq1);
    let (m, n) = (codes.len(), profile.len());
    if band < m.abs_diff(n) {
        trace!("band {band} is narrower than the length difference of {m}x{n}");
    }

    let gap_open = T::from_i32(scoring.gap_open_penalty as i32);
    let gap_extend = T::from_i32(scoring.gap_extend_penalty as i32);

    let mut matrix: BandedMatrix<T> = BandedMatrix::new(m, n, band);
    let mut best = T::ZERO;
    let mut best_pos = (0, 0);

    for i in 1..=m {
        let scores = profile.row(codes[i - 1]);
        for j in matrix.columns(i) {
            let e = matrix
                .h(i - 1, j)
                .sat_sub(gap_open)
                .max(matrix.e(i - 1, j).sat_sub(gap_extend));
            let f = matrix
                .h(i, j - 1)
                .sat_sub(gap_open)
                .max(matrix.f(i, j - 1).sat_sub(gap_extend));
            let h = matrix
                .h(i - 1, j - 1)
                .sat_add(scores[j - 1])
                .max(e)
                .max(f)
                .max(T::ZERO);
            matrix.set(i, j, h, e, f);

            if h > best {
                best = h;
                best_pos = (i, j);
            }
        }
    }

    if best == T::MAX {
        warn!("banded alignment score clamped at the score domain ceiling of {best}");
    }
    (matrix, best, best_pos)
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::smith_waterman::reference;

    fn get_score(seq1: &str, seq2: &str, band: usize) -> i32 {
        let scoring = Scoring::default();
        let aln = banded::<i32>(seq1.as_bytes(), seq2.as_bytes(), &scoring, band);
        let expected = reference::score::<i32>(seq1.as_bytes(), seq2.as_bytes(), &scoring);

        assert!(
            aln.score <= expected,
            "Banded score {} exceeds the reference score {expected}",
            aln.score
        );
        assert_eq!(aln.rescore(&scoring), aln.score);

        aln.score
    }

    #[test]
    fn test_band_covers_offset() {
        // The optimal diagonal is 4 below the main diagonal
        assert_eq!(get_score("TTTTACGTACGT", "ACGTACGT", 3), 10);
        assert_eq!(get_score("TTTTACGTACGT", "ACGTACGT", 4), 16);
        assert_eq!(get_score("TTTTACGTACGT", "ACGTACGT", 20), 16);
    }

    #[test]
    fn test_band_is_lower_bound() {
        assert_eq!(get_score("ACGTTTTT", "TTTTTACG", 0), 4);
        assert_eq!(get_score("ACGTTTTT", "TTTTTACG", 2), 8);
        assert_eq!(get_score("ACGTTTTT", "TTTTTACG", 4), 10);
    }

    #[test]
    fn test_band_clamps_at_edges() {
        let scoring = Scoring::default();
        let profile = QueryProfile::<i32>::new(b"ACGT", &scoring);
        let (matrix, best, end) = fill(b"ACGT", &profile, &scoring, 1);

        assert_eq!((best, end), (8, (4, 4)));
        assert_eq!(matrix.columns(1), 1..=2);
        assert_eq!(matrix.columns(4), 3..=4);
        // Outside the band, or outside the matrix, reads see zero
        assert_eq!(matrix.h(1, 3), 0);
        assert_eq!(matrix.h(4, 2), 0);
        assert_eq!(matrix.h(4, 5), 0);
        assert_eq!(matrix.h(2, 2), 4);

        // Band entirely past the last column computes nothing
        let (matrix, best, _) = fill(b"TTTTTTACGT", &profile, &scoring, 2);
        assert!(matrix.columns(7).is_empty());
        assert_eq!(best, 2);
    }

    #[test]
    fn test_band_wide_enough_is_exact() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            let len1 = rng.random_range(1..40);
            let len2 = rng.random_range(1..40);
            let seq1: Vec<u8> = (0..len1).map(|_| b"ACGT"[rng.random_range(0..4)]).collect();
            let seq2: Vec<u8> = (0..len2).map(|_| b"ACGT"[rng.random_range(0..4)]).collect();
            let seq1 = String::from_utf8(seq1).unwrap();
            let seq2 = String::from_utf8(seq2).unwrap();

            let expected =
                reference::score::<i32>(seq1.as_bytes(), seq2.as_bytes(), &Scoring::default());
            assert_eq!(get_score(&seq1, &seq2, len1.max(len2)), expected);
            // Narrow bands never beat the reference
            get_score(&seq1, &seq2, 1);
        }
    }
}

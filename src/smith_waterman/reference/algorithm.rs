use log::{trace, warn};

use crate::{
    Scoring,
    alignment::Alignment,
    sequence::{QueryProfile, encode, is_degenerate},
    smith_waterman::{
        DenseMatrix, Score, ScoreTables,
        traceback::{Priority, traceback},
    },
};

/// Local alignment of `seq1` (rows) against `seq2` (columns) over the full H/E/F matrices.
pub fn smith_waterman<T: Score>(seq1: &[u8], seq2: &[u8], scoring: &Scoring) -> Alignment {
    let profile = QueryProfile::<T>::new(seq2, scoring);
    align_with_profile(seq1, seq2, &profile, scoring)
}

/// Same as [`smith_waterman`] with a profile prepared once for `seq2`.
///
/// # Panics
///
/// When `profile` was not built from a sequence of the same length as `seq2`
pub fn align_with_profile<T: Score>(
    seq1: &[u8],
    seq2: &[u8],
    profile: &QueryProfile<T>,
    scoring: &Scoring,
) -> Alignment {
    assert_eq!(
        profile.len(),
        seq2.len(),
        "query profile length does not match the query"
    );
    if is_degenerate(seq1) || is_degenerate(seq2) {
        return Alignment::empty();
    }

    let (matrix, best, end) = fill(seq1, profile, scoring);
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

/// Fills the tables, returning them with the best score and its 1-based cell. The first cell
/// reaching the best score in row-major order wins ties.
pub fn fill<T: Score>(
    seq1: &[u8],
    profile: &QueryProfile<T>,
    scoring: &Scoring,
) -> (DenseMatrix<T>, T, (usize, usize)) {
    let codes = encode(seq1);
    let (m, n) = (codes.len(), profile.len());
    trace!("filling {m}x{n} reference matrix");

    let gap_open = T::from_i32(scoring.gap_open_penalty as i32);
    let gap_extend = T::from_i32(scoring.gap_extend_penalty as i32);

    let mut matrix: DenseMatrix<T> = DenseMatrix::new(m, n);
    let mut best = T::ZERO;
    let mut best_pos = (0, 0);

    for i in 1..=m {
        let scores = profile.row(codes[i - 1]);
        let mut f = T::ZERO;
        for j in 1..=n {
            let e = matrix
                .h(i - 1, j)
                .sat_sub(gap_open)
                .max(matrix.e(i - 1, j).sat_sub(gap_extend));
            f = matrix.h(i, j - 1).sat_sub(gap_open).max(f.sat_sub(gap_extend));
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
        warn!("alignment score clamped at the score domain ceiling of {best}");
    }
    (matrix, best, best_pos)
}

/// Best local score in O(n) space, without the tables needed for traceback
pub fn score<T: Score>(seq1: &[u8], seq2: &[u8], scoring: &Scoring) -> i32 {
    let profile = QueryProfile::<T>::new(seq2, scoring);
    let n = profile.len();
    let gap_open = T::from_i32(scoring.gap_open_penalty as i32);
    let gap_extend = T::from_i32(scoring.gap_extend_penalty as i32);

    let mut prev_h = vec![T::ZERO; n + 1];
    let mut curr_h = vec![T::ZERO; n + 1];
    let mut e = vec![T::ZERO; n + 1];
    let mut best = T::ZERO;

    for code in encode(seq1) {
        let scores = profile.row(code);
        let mut f = T::ZERO;
        for j in 1..=n {
            e[j] = prev_h[j].sat_sub(gap_open).max(e[j].sat_sub(gap_extend));
            f = curr_h[j - 1].sat_sub(gap_open).max(f.sat_sub(gap_extend));
            curr_h[j] = prev_h[j - 1]
                .sat_add(scores[j - 1])
                .max(e[j])
                .max(f)
                .max(T::ZERO);
            best = best.max(curr_h[j]);
        }
        std::mem::swap(&mut prev_h, &mut curr_h);
    }

    best.to_i32()
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        r#const::*,
        simd::PortableVector,
        smith_waterman::{banded::banded, striped::StripedAligner, striped::StripedSolver},
    };

    /// Aligns through every solver, checking they agree with the reference, and returns the
    /// reference alignment
    fn get_alignment(seq1: &str, seq2: &str, scoring: &Scoring) -> Alignment {
        let (seq1, seq2) = (seq1.as_bytes(), seq2.as_bytes());
        let reference = smith_waterman::<i32>(seq1, seq2, scoring);

        assert_eq!(
            reference.rescore(scoring),
            reference.score,
            "Reference alignment does not rescore to its score"
        );
        assert_eq!(
            score::<i32>(seq1, seq2, scoring),
            reference.score,
            "Linear space and full matrix scores don't match"
        );

        let band = seq1.len().max(seq2.len());
        let banded = banded::<i32>(seq1, seq2, scoring, band);
        assert_eq!(
            banded.score, reference.score,
            "Reference and banded scores don't match"
        );
        assert_eq!(banded.rescore(scoring), banded.score);

        let striped = [
            StripedSolver::<PortableVector<1>>::new(seq2, scoring).align(seq1).unwrap(),
            StripedSolver::<PortableVector<4>>::new(seq2, scoring).align(seq1).unwrap(),
            StripedSolver::<PortableVector<8>>::new(seq2, scoring).align(seq1).unwrap(),
        ];
        for striped in striped {
            assert_eq!(
                striped.score, reference.score,
                "Reference and striped scores don't match"
            );
            assert_eq!(striped.rescore(scoring), striped.score);
            assert_eq!((striped.end1, striped.end2), (reference.end1, reference.end2));
        }

        let dispatched = StripedAligner::new(seq2, scoring)
            .and_then(|aligner| aligner.align(seq1))
            .unwrap();
        assert_eq!(
            dispatched.score, reference.score,
            "Reference and dispatched striped scores don't match"
        );

        reference
    }

    fn get_score(seq1: &str, seq2: &str) -> i32 {
        get_alignment(seq1, seq2, &Scoring::default()).score
    }

    fn random_seq(rng: &mut StdRng, len: usize, alphabet: &[u8]) -> String {
        (0..len)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
            .collect()
    }

    #[test]
    fn test_score_basic() {
        assert_eq!(get_score("A", "A"), MATCH_SCORE as i32);
        assert_eq!(get_score("ACGT", "TTACGTT"), 4 * MATCH_SCORE as i32);
        assert_eq!(get_score("acgt", "ACGT"), 4 * MATCH_SCORE as i32);
    }

    #[test]
    fn test_score_affine_gap() {
        let scoring = Scoring {
            match_score: 3,
            mismatch_penalty: 3,
            gap_open_penalty: 2,
            gap_extend_penalty: 2,
        };
        let aln = get_alignment("TGTTACGG", "GGTTGACTA", &scoring);
        assert_eq!(aln.score, 13);
        assert_eq!(aln.aligned_seq1, "GTT-AC");
        assert_eq!(aln.aligned_seq2, "GTTGAC");
        assert_eq!(aln.match_line, "||| ||");
        assert_eq!((aln.start1, aln.end1), (2, 6));
        assert_eq!((aln.start2, aln.end2), (2, 7));
    }

    #[test]
    fn test_score_long_gap_is_affine() {
        let scoring = Scoring {
            match_score: 2,
            mismatch_penalty: 4,
            gap_open_penalty: 5,
            gap_extend_penalty: 1,
        };
        // 16 matches, one gap run of 4: 32 - (5 + 3)
        let aln = get_alignment("ACGTACGTTGCATGCA", "ACGTACGTGGGGTGCATGCA", &scoring);
        assert_eq!(aln.score, 24);
        assert_eq!(aln.gap_opens(), 1);
        assert_eq!(aln.gaps(), 4);
    }

    #[test]
    fn test_score_no_alignment() {
        let aln = get_alignment("AAAA", "TTTT", &Scoring::default());
        assert_eq!(aln, Alignment::empty());

        let scoring = Scoring {
            match_score: 5,
            mismatch_penalty: 0,
            ..Scoring::default()
        };
        assert_eq!(get_alignment("AAAA", "TTTT", &scoring).score, 0);
    }

    #[test]
    fn test_score_identical() {
        let scoring = Scoring {
            match_score: 2,
            mismatch_penalty: 1,
            gap_open_penalty: 2,
            gap_extend_penalty: 1,
        };
        let aln = get_alignment("ACGT", "ACGT", &scoring);
        assert_eq!(aln.score, 8);
        assert_eq!(aln.aligned_seq1, "ACGT");
        assert_eq!(aln.aligned_seq2, "ACGT");
        assert_eq!(aln.match_line, "||||");
        assert_eq!((aln.start1, aln.end1, aln.start2, aln.end2), (1, 4, 1, 4));

        let mut rng = StdRng::seed_from_u64(7);
        for len in [1, 15, 16, 17, 64, 200] {
            let seq = random_seq(&mut rng, len, b"ACGT");
            assert_eq!(
                get_alignment(&seq, &seq, &scoring).score,
                2 * len as i32,
                "identical sequences of length {len}"
            );
        }
    }

    #[test]
    fn test_score_degenerate() {
        assert_eq!(get_alignment("", "ACGT", &Scoring::default()), Alignment::empty());
        assert_eq!(get_alignment("ACGT", "", &Scoring::default()), Alignment::empty());
        assert_eq!(get_alignment("NNNN", "NNNN", &Scoring::default()), Alignment::empty());
        assert_eq!(get_alignment("NNNN", "ACGT", &Scoring::default()), Alignment::empty());
    }

    #[test]
    fn test_score_unknown_bases_mismatch() {
        // Both unknown symbols score as mismatches, even against each other
        let aln = get_alignment("ACGNACG", "ACGNACG", &Scoring::default());
        assert_eq!(aln.score, 6 * MATCH_SCORE as i32 - MISMATCH_PENALTY as i32);
        assert_eq!(aln.match_line, "|||*|||");
    }

    #[test]
    fn test_gap_symbol_in_input_is_unknown() {
        let aln = get_alignment("ACGT-ACGT", "ACGTAACGT", &Scoring::default());
        assert_eq!(aln.score, 8 * MATCH_SCORE as i32 - MISMATCH_PENALTY as i32);
        assert_eq!(aln.aligned_seq1, "ACGTNACGT");
        assert_eq!(aln.aligned_seq2, "ACGTAACGT");
        assert_eq!(aln.match_line, "||||*||||");
        assert_eq!(aln.gaps(), 0);
    }

    #[test]
    fn test_ties_pick_first_cell() {
        // "AC" occurs twice in seq1, the first occurrence is reported
        let aln = get_alignment("ACTTTTAC", "AC", &Scoring::default());
        assert_eq!(aln.score, 4);
        assert_eq!((aln.start1, aln.end1, aln.start2, aln.end2), (1, 2, 1, 2));
    }

    #[test]
    fn test_h_is_never_negative() {
        let mut rng = StdRng::seed_from_u64(11);
        let scoring = Scoring {
            match_score: 1,
            mismatch_penalty: 9,
            gap_open_penalty: 9,
            gap_extend_penalty: 9,
        };
        let seq1 = random_seq(&mut rng, 60, b"ACGTN");
        let seq2 = random_seq(&mut rng, 45, b"ACGTN");
        let profile = QueryProfile::<i32>::new(seq2.as_bytes(), &scoring);
        let (matrix, _, _) = fill(seq1.as_bytes(), &profile, &scoring);
        for i in 0..=seq1.len() {
            assert!(matrix.h_row(i).iter().all(|&h| h >= 0), "negative H in row {i}");
        }
    }

    #[test]
    fn test_narrow_domain_clamps() {
        let scoring = Scoring {
            match_score: 20_000,
            ..Scoring::default()
        };
        // Three matches would be 60000, which saturates instead of wrapping
        assert_eq!(score::<i16>(b"ACG", b"ACG", &scoring), i16::MAX as i32);
        assert_eq!(smith_waterman::<i16>(b"ACG", b"ACG", &scoring).score, i16::MAX as i32);
        assert_eq!(smith_waterman::<i32>(b"ACG", b"ACG", &scoring).score, 60_000);
    }

    #[test]
    fn test_idempotent() {
        let mut rng = StdRng::seed_from_u64(3);
        let seq1 = random_seq(&mut rng, 80, b"ACGT");
        let seq2 = random_seq(&mut rng, 70, b"ACGT");
        let scoring = Scoring::default();
        let first = smith_waterman::<i32>(seq1.as_bytes(), seq2.as_bytes(), &scoring);
        let second = smith_waterman::<i32>(seq1.as_bytes(), seq2.as_bytes(), &scoring);
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_cross_solver() {
        let mut rng = StdRng::seed_from_u64(42);
        let alphabets: [&[u8]; 4] = [b"ACGT", b"AC", b"ACGTN", b"A"];
        for _ in 0..300 {
            let alphabet = alphabets[rng.random_range(0..alphabets.len())];
            let len1 = rng.random_range(0..48);
            let len2 = rng.random_range(0..48);
            let seq1 = random_seq(&mut rng, len1, alphabet);
            let seq2 = random_seq(&mut rng, len2, alphabet);
            let scoring = Scoring {
                match_score: rng.random_range(1..6),
                mismatch_penalty: rng.random_range(0..6),
                gap_open_penalty: rng.random_range(0..7),
                gap_extend_penalty: rng.random_range(0..4),
            };
            get_alignment(&seq1, &seq2, &scoring);
        }
    }
}

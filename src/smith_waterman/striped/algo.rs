use std::marker::PhantomData;

use log::trace;

use super::{layout::StripedLayout, profile::StripedProfile, tables::StripedTables};
use crate::{
    Error, Result, Scoring,
    alignment::Alignment,
    sequence::{encode, is_degenerate},
    simd::Vector,
    smith_waterman::{
        Score, ScoreTables,
        traceback::{Priority, traceback},
    },
};

/// Farrar's striped Smith Waterman over `V::LANES` signed 16-bit lanes, holding one query and
/// aligning any number of references against it.
///
/// Every function is `#[inline(always)]` so that the backend wrappers, which enable the target
/// features of `V`, compile the whole sweep with those features.
#[derive(Debug, Clone)]
pub struct StripedSolver<V: Vector> {
    query: Vec<u8>,
    scoring: Scoring,
    profile: StripedProfile,
    phantom: PhantomData<V>,
}

impl<V: Vector> StripedSolver<V> {
    /// # Panics
    ///
    /// When the instructions backing `V` are not available on this CPU
    #[inline(always)]
    pub fn new(query: &[u8], scoring: &Scoring) -> Self {
        assert!(
            V::is_available(),
            "vector backend with {} lanes is not supported by this CPU",
            V::LANES
        );

        Self {
            query: query.to_vec(),
            scoring: *scoring,
            profile: StripedProfile::new(query, scoring, V::LANES),
            phantom: PhantomData,
        }
    }

    pub fn query(&self) -> &[u8] {
        &self.query
    }

    pub fn layout(&self) -> StripedLayout {
        self.profile.layout()
    }

    /// Largest score any alignment against `reference_len` symbols could reach
    pub fn score_bound(&self, reference_len: usize) -> i64 {
        self.scoring.match_score as i64 * reference_len.min(self.query.len()) as i64
    }

    /// Aligns `reference` (sequence 1) against the query (sequence 2).
    ///
    /// Fails with [`Error::ScoreOverflow`] when the best possible score does not fit in 16-bit
    /// lanes, in which case the result could have been clamped.
    #[inline(always)]
    pub fn align(&self, reference: &[u8]) -> Result<Alignment> {
        let bound = self.score_bound(reference.len());
        if bound > i16::MAX as i64 {
            return Err(Error::ScoreOverflow {
                bound,
                limit: i16::MAX as i64,
            });
        }
        if is_degenerate(reference) || is_degenerate(&self.query) {
            return Ok(Alignment::empty());
        }

        let (tables, best, end) = self.fill(reference);
        Ok(traceback(
            &tables,
            reference,
            &self.query,
            &self.scoring,
            best as i32,
            end,
            Priority::GapFirst,
        ))
    }

    /// Runs the sweep, returning the tables with the best score and its 1-based `(i, j)` cell.
    /// Ties resolve to the earliest row, then the smallest query position.
    #[inline(always)]
    pub fn fill(&self, reference: &[u8]) -> (StripedTables, i16, (usize, usize)) {
        let layout = self.profile.layout();
        let (lanes, seg_len, stride) = (layout.lanes(), layout.seg_len(), layout.padded_len());
        debug_assert_eq!(lanes, V::LANES);

        let codes = encode(reference);
        trace!(
            "striped sweep: {} rows, {} query positions, {lanes} lanes x {seg_len} stripes",
            codes.len(),
            layout.len()
        );

        let mut tables = StripedTables::new(layout, codes.len());
        let mut best = 0i16;
        let mut best_row = 0;
        let mut lazy_wraps = 0;

        unsafe {
            let zero = V::zero();
            let neg = V::splat_i16(i16::MIN);
            let gap_open = <i16 as Score>::from_i32(self.scoring.gap_open_penalty as i32);
            let gap_open = V::splat_i16(gap_open);
            let gap_extend = <i16 as Score>::from_i32(self.scoring.gap_extend_penalty as i32);
            let gap_extend = V::splat_i16(gap_extend);

            let h = tables.h.as_mut_ptr();
            let e = tables.e.as_mut_ptr();
            let f = tables.f.as_mut_ptr();

            for (row, &code) in codes.iter().enumerate().map(|(i, c)| (i + 1, c)) {
                let prev = (row - 1) * stride;
                let curr = row * stride;
                let profile = self.profile.row(code).as_ptr();

                // H[i-1][j-1] for stripe 0: the last stripe of the previous row, moved up a lane
                let mut v_diag = V::load_unaligned(h.add(prev + (seg_len - 1) * lanes))
                    .shift_right_padded_i16(zero);
                let mut v_f = neg;
                let mut v_max = zero;

                for offset in (0..seg_len).map(|stripe| stripe * lanes) {
                    let v_h_prev = V::load_unaligned(h.add(prev + offset));
                    let v_e = V::load_unaligned(e.add(prev + offset))
                        .subs_i16(gap_extend)
                        .max_i16(v_h_prev.subs_i16(gap_open));

                    let v_h = v_diag
                        .adds_i16(V::load_unaligned(profile.add(offset)))
                        .max_i16(v_e)
                        .max_i16(v_f)
                        .max_i16(zero);
                    v_max = v_max.max_i16(v_h);

                    v_h.store_unaligned(h.add(curr + offset));
                    v_e.store_unaligned(e.add(curr + offset));
                    v_f.store_unaligned(f.add(curr + offset));

                    v_f = v_f.subs_i16(gap_extend).max_i16(v_h.subs_i16(gap_open));
                    v_diag = v_h_prev;
                }

                lazy_wraps += Self::lazy_f(
                    h.add(curr),
                    f.add(curr),
                    layout,
                    v_f,
                    gap_open,
                    gap_extend,
                );

                // Lazy F never raises a cell above another cell of the same row, so the main pass
                // already saw the row maximum
                let row_max = v_max.smax_i16();
                if row_max > best {
                    best = row_max;
                    best_row = row;
                }
            }
        }

        trace!("lazy F loop wrapped {lazy_wraps} times");

        if best <= 0 {
            return (tables, 0, (0, 0));
        }
        let end = (1..=layout.len())
            .find(|&j| tables.h(best_row, j) == best)
            .map_or((0, 0), |j| (best_row, j));
        debug_assert_ne!(end, (0, 0), "best score missing from its row");
        (tables, best, end)
    }

    /// Carries the F values leaving the last stripe into the next lane up, and keeps carrying
    /// for as long as they improve some stripe. Each full pass settles at least one more lane,
    /// so at most `lanes` wraps are ever needed.
    ///
    /// Returns the number of wraps.
    ///
    /// # Safety
    ///
    /// `h` and `f` must point at a full row of `layout.padded_len()` cells.
    #[inline(always)]
    unsafe fn lazy_f(
        h: *mut i16,
        f: *mut i16,
        layout: StripedLayout,
        v_f: V,
        gap_open: V,
        gap_extend: V,
    ) -> usize {
        unsafe {
            let (lanes, seg_len) = (layout.lanes(), layout.seg_len());
            let neg = V::splat_i16(i16::MIN);

            let mut carry = v_f.shift_right_padded_i16(neg);
            let mut stripe = 0;
            let mut wraps = 0;
            loop {
                let offset = stripe * lanes;
                let v_f = V::load_unaligned(f.add(offset));
                if !carry.any_gt_i16(v_f) {
                    break;
                }

                let v_f = v_f.max_i16(carry);
                let v_h = V::load_unaligned(h.add(offset)).max_i16(carry);
                v_f.store_unaligned(f.add(offset));
                v_h.store_unaligned(h.add(offset));
                carry = v_f.subs_i16(gap_extend).max_i16(v_h.subs_i16(gap_open));

                stripe += 1;
                if stripe == seg_len {
                    stripe = 0;
                    wraps += 1;
                    if wraps == lanes {
                        break;
                    }
                    carry = carry.shift_right_padded_i16(neg);
                }
            }
            wraps
        }
    }
}

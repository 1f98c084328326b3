use super::layout::StripedLayout;
use crate::smith_waterman::ScoreTables;

/// H/E/F for every reference row, each row stored as `seg_len` striped vectors. Row 0 is the
/// zero boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripedTables {
    layout: StripedLayout,
    pub(super) h: Vec<i16>,
    pub(super) e: Vec<i16>,
    pub(super) f: Vec<i16>,
}

impl StripedTables {
    pub fn new(layout: StripedLayout, rows: usize) -> Self {
        let size = (rows + 1) * layout.padded_len();
        Self {
            layout,
            h: vec![0; size],
            e: vec![0; size],
            f: vec![0; size],
        }
    }

    #[inline(always)]
    pub fn layout(&self) -> StripedLayout {
        self.layout
    }

    /// Offset of row `i` in each of the flat tables
    #[inline(always)]
    pub fn row_offset(&self, i: usize) -> usize {
        i * self.layout.padded_len()
    }

    #[inline(always)]
    fn idx(&self, i: usize, j: usize) -> usize {
        self.row_offset(i) + self.layout.offset(j - 1)
    }
}

impl ScoreTables for StripedTables {
    type Score = i16;

    #[inline(always)]
    fn h(&self, i: usize, j: usize) -> i16 {
        if j == 0 { 0 } else { self.h[self.idx(i, j)] }
    }

    #[inline(always)]
    fn e(&self, i: usize, j: usize) -> i16 {
        if j == 0 { 0 } else { self.e[self.idx(i, j)] }
    }

    #[inline(always)]
    fn f(&self, i: usize, j: usize) -> i16 {
        if j == 0 { 0 } else { self.f[self.idx(i, j)] }
    }
}

use super::Score;

/// Read access to filled H/E/F tables, indexed by 1-based `(i, j)` where `i` walks sequence 1
/// and `j` walks sequence 2. Row and column 0 are the zero boundary.
pub trait ScoreTables {
    type Score: Score;

    fn h(&self, i: usize, j: usize) -> Self::Score;
    fn e(&self, i: usize, j: usize) -> Self::Score;
    fn f(&self, i: usize, j: usize) -> Self::Score;
}

/// Full `(m + 1) x (n + 1)` tables, one flat row-major `Vec` per score kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix<T> {
    cols: usize,
    h: Vec<T>,
    e: Vec<T>,
    f: Vec<T>,
}

impl<T: Score> DenseMatrix<T> {
    /// Tables for sequences of length `rows` and `cols`, zero filled including the boundary
    pub fn new(rows: usize, cols: usize) -> Self {
        let size = (rows + 1) * (cols + 1);
        Self {
            cols: cols + 1,
            h: vec![T::ZERO; size],
            e: vec![T::ZERO; size],
            f: vec![T::ZERO; size],
        }
    }

    #[inline(always)]
    fn idx(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, h: T, e: T, f: T) {
        let idx = self.idx(i, j);
        self.h[idx] = h;
        self.e[idx] = e;
        self.f[idx] = f;
    }

    pub fn h_row(&self, i: usize) -> &[T] {
        let start = self.idx(i, 0);
        &self.h[start..start + self.cols]
    }
}

impl<T: Score> ScoreTables for DenseMatrix<T> {
    type Score = T;

    #[inline(always)]
    fn h(&self, i: usize, j: usize) -> T {
        self.h[self.idx(i, j)]
    }

    #[inline(always)]
    fn e(&self, i: usize, j: usize) -> T {
        self.e[self.idx(i, j)]
    }

    #[inline(always)]
    fn f(&self, i: usize, j: usize) -> T {
        self.f[self.idx(i, j)]
    }
}

use std::fmt::{Debug, Display};

/// Numeric cell type of the DP tables.
///
/// All arithmetic saturates, so a score that runs past the domain clamps to `MAX` (or `MIN` for
/// decaying gap scores) instead of wrapping. Pick the width from the expected
/// `match_score * min(m, n)`: `i16` holds up to 32767, `i32` is safe for any sequence that fits
/// in memory.
pub trait Score: Copy + Ord + Default + Debug + Display + Send + Sync + 'static {
    const ZERO: Self;
    const MIN: Self;
    const MAX: Self;

    /// Converts, clamping to `[MIN, MAX]`
    fn from_i32(value: i32) -> Self;
    fn to_i32(self) -> i32;
    fn sat_add(self, other: Self) -> Self;
    fn sat_sub(self, other: Self) -> Self;
}

macro_rules! impl_score {
    ($ty:ty) => {
        impl Score for $ty {
            const ZERO: Self = 0;
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;

            #[inline(always)]
            fn from_i32(value: i32) -> Self {
                value.clamp(<$ty>::MIN as i32, <$ty>::MAX as i32) as $ty
            }

            #[inline(always)]
            fn to_i32(self) -> i32 {
                self as i32
            }

            #[inline(always)]
            fn sat_add(self, other: Self) -> Self {
                self.saturating_add(other)
            }

            #[inline(always)]
            fn sat_sub(self, other: Self) -> Self {
                self.saturating_sub(other)
            }
        }
    };
}

impl_score!(i16);
impl_score!(i32);

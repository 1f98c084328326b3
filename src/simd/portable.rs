/// Array-backed vector for targets without a dedicated backend. The loops are written so that
/// the compiler can autovectorize them when the sweep is built for a wider target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortableVector<const N: usize>(pub [i16; N]);

impl<const N: usize> PortableVector<N> {
    #[inline(always)]
    fn zip_map(self, other: Self, f: impl Fn(i16, i16) -> i16) -> Self {
        let mut out = [0; N];
        for ((out, a), b) in out.iter_mut().zip(self.0).zip(other.0) {
            *out = f(a, b);
        }
        Self(out)
    }
}

impl<const N: usize> super::Vector for PortableVector<N> {
    const LANES: usize = N;

    #[inline]
    fn is_available() -> bool {
        true
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self([0; N])
    }

    #[inline(always)]
    unsafe fn splat_i16(value: i16) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    unsafe fn load_unaligned(data: *const i16) -> Self {
        unsafe { Self((data as *const [i16; N]).read_unaligned()) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, data: *mut i16) {
        unsafe { (data as *mut [i16; N]).write_unaligned(self.0) }
    }

    #[inline(always)]
    unsafe fn adds_i16(self, other: Self) -> Self {
        self.zip_map(other, i16::saturating_add)
    }

    #[inline(always)]
    unsafe fn subs_i16(self, other: Self) -> Self {
        self.zip_map(other, i16::saturating_sub)
    }

    #[inline(always)]
    unsafe fn max_i16(self, other: Self) -> Self {
        self.zip_map(other, i16::max)
    }

    #[inline(always)]
    unsafe fn smax_i16(self) -> i16 {
        self.0.into_iter().fold(i16::MIN, i16::max)
    }

    #[inline(always)]
    unsafe fn any_gt_i16(self, other: Self) -> bool {
        self.0.iter().zip(other.0).any(|(&a, b)| a > b)
    }

    #[inline(always)]
    unsafe fn shift_right_padded_i16(self, other: Self) -> Self {
        let mut out = [0; N];
        out[0] = other.0[N - 1];
        out[1..].copy_from_slice(&self.0[..N - 1]);
        Self(out)
    }
}

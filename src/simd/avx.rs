use std::arch::x86_64::*;

use super::sse::hmax_epi16;

#[derive(Debug, Clone, Copy)]
pub struct AVXVector(pub(crate) __m256i);

impl super::Vector for AVXVector {
    const LANES: usize = 16;

    #[inline]
    fn is_available() -> bool {
        raw_cpuid::CpuId::new()
            .get_extended_feature_info()
            .is_some_and(|info| info.has_avx2())
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        unsafe { Self(_mm256_setzero_si256()) }
    }

    #[inline(always)]
    unsafe fn splat_i16(value: i16) -> Self {
        unsafe { Self(_mm256_set1_epi16(value)) }
    }

    #[inline(always)]
    unsafe fn load_unaligned(data: *const i16) -> Self {
        unsafe { Self(_mm256_loadu_si256(data as *const __m256i)) }
    }

    #[inline(always)]
    unsafe fn store_unaligned(self, data: *mut i16) {
        unsafe { _mm256_storeu_si256(data as *mut __m256i, self.0) }
    }

    #[inline(always)]
    unsafe fn adds_i16(self, other: Self) -> Self {
        unsafe { Self(_mm256_adds_epi16(self.0, other.0)) }
    }

    #[inline(always)]
    unsafe fn subs_i16(self, other: Self) -> Self {
        unsafe { Self(_mm256_subs_epi16(self.0, other.0)) }
    }

    #[inline(always)]
    unsafe fn max_i16(self, other: Self) -> Self {
        unsafe { Self(_mm256_max_epi16(self.0, other.0)) }
    }

    #[inline(always)]
    unsafe fn smax_i16(self) -> i16 {
        unsafe {
            let high = _mm256_extracti128_si256::<1>(self.0);
            let low = _mm256_castsi256_si128(self.0);
            hmax_epi16(_mm_max_epi16(low, high))
        }
    }

    #[inline(always)]
    unsafe fn any_gt_i16(self, other: Self) -> bool {
        unsafe { _mm256_movemask_epi8(_mm256_cmpgt_epi16(self.0, other.0)) != 0 }
    }

    #[inline(always)]
    unsafe fn shift_right_padded_i16(self, other: Self) -> Self {
        unsafe {
            // [other_high, self_low], so the low lane of the result picks up the top of `other`
            // and the high lane picks up the top of `self`'s low half
            let shifted_lanes = _mm256_permute2x128_si256::<0x21>(other.0, self.0);
            Self(_mm256_alignr_epi8::<14>(self.0, shifted_lanes))
        }
    }
}

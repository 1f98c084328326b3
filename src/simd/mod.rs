//! Signed 16-bit lane vectors used by the striped solver.
//!
//! Every backend exposes the same small set of saturating operations. Lane 0 is the lowest
//! address in memory, and "shifting right" moves lanes towards higher indices, matching the
//! layout of the striped query profile where lane `L` of stripe `s` holds query position
//! `L * seg_len + s`.

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
mod avx;
#[cfg(all(target_arch = "aarch64", feature = "simd"))]
mod neon;
mod portable;
#[cfg(all(target_arch = "x86_64", feature = "simd"))]
mod sse;

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
pub use avx::AVXVector;
#[cfg(all(target_arch = "aarch64", feature = "simd"))]
pub use neon::NEONVector;
pub use portable::PortableVector;
#[cfg(all(target_arch = "x86_64", feature = "simd"))]
pub use sse::SSEVector;

pub trait Vector: Copy + core::fmt::Debug {
    /// Number of `i16` lanes
    const LANES: usize;

    /// Whether the instructions backing this vector can be used on the current CPU
    fn is_available() -> bool;

    /// Create a vector with zeros in all lanes.
    unsafe fn zero() -> Self;
    /// Create a vector with the given value repeated into each lane.
    unsafe fn splat_i16(value: i16) -> Self;

    /// Read `LANES` values from the given pointer. The pointer does not need to be aligned.
    ///
    /// # Safety
    ///
    /// Callers must guarantee that at least `LANES` values are readable from `data`.
    unsafe fn load_unaligned(data: *const i16) -> Self;

    /// Write `LANES` values to the given pointer. The pointer does not need to be aligned.
    ///
    /// # Safety
    ///
    /// Callers must guarantee that at least `LANES` values are writable at `data`.
    unsafe fn store_unaligned(self, data: *mut i16);

    unsafe fn adds_i16(self, other: Self) -> Self;
    unsafe fn subs_i16(self, other: Self) -> Self;
    unsafe fn max_i16(self, other: Self) -> Self;
    /// Get the maximum value in the vector as a scalar
    unsafe fn smax_i16(self) -> i16;
    /// True when any lane of `self` is strictly greater than the same lane of `other`
    unsafe fn any_gt_i16(self, other: Self) -> bool;

    /// Shift `self` right by one lane, filling lane 0 with the highest lane of `other`
    unsafe fn shift_right_padded_i16(self, other: Self) -> Self;
}

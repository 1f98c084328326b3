//! Striped SIMD solver with runtime backend selection.
//!
//! The query is split across the lanes of a vector so each instruction advances `LANES` cells
//! of the same reference row (see [`StripedLayout`]). Scores live in signed 16-bit lanes, which
//! bounds them to `i16::MAX`: [`StripedAligner::align`] refuses pairs whose best possible score
//! `match_score * min(m, n)` exceeds that, so a striped score is always exact. The top-level
//! [`crate::align`] falls back to the reference solver for such pairs instead.

use log::debug;

use crate::{Alignment, Result, Scoring, simd::PortableVector};

mod algo;
mod layout;
mod profile;
mod tables;

pub use algo::StripedSolver;
pub use layout::StripedLayout;
pub use profile::{PADDING_SCORE, StripedProfile};
pub use tables::StripedTables;

#[cfg(any(
    all(target_arch = "x86_64", feature = "simd"),
    all(target_arch = "aarch64", feature = "simd")
))]
use crate::simd::Vector;
#[cfg(all(target_arch = "aarch64", feature = "simd"))]
use crate::simd::NEONVector;
#[cfg(all(target_arch = "x86_64", feature = "simd"))]
use crate::simd::{AVXVector, SSEVector};

/// Lane count of the fallback backend
pub const PORTABLE_LANES: usize = 8;

#[derive(Debug, Clone)]
pub enum StripedAligner {
    #[cfg(all(target_arch = "x86_64", feature = "simd"))]
    AVX2(StripedAlignerAVX2),
    #[cfg(all(target_arch = "x86_64", feature = "simd"))]
    SSE(StripedAlignerSSE),
    #[cfg(all(target_arch = "aarch64", feature = "simd"))]
    NEON(StripedAlignerNEON),
    Portable(StripedAlignerPortable),
}

impl StripedAligner {
    /// Prepares `query` (sequence 2) with the widest backend this CPU supports
    pub fn new(query: &[u8], scoring: &Scoring) -> Result<Self> {
        scoring.validate()?;

        #[cfg(all(target_arch = "x86_64", feature = "simd"))]
        {
            if StripedAlignerAVX2::is_available() {
                debug!("striped solver using AVX2 with 16 lanes");
                return Ok(Self::AVX2(unsafe { StripedAlignerAVX2::new(query, scoring) }));
            }
            if StripedAlignerSSE::is_available() {
                debug!("striped solver using SSE4.1 with 8 lanes");
                return Ok(Self::SSE(unsafe { StripedAlignerSSE::new(query, scoring) }));
            }
        }

        #[cfg(all(target_arch = "aarch64", feature = "simd"))]
        if StripedAlignerNEON::is_available() {
            debug!("striped solver using NEON with 8 lanes");
            return Ok(Self::NEON(unsafe { StripedAlignerNEON::new(query, scoring) }));
        }

        debug!("no vector extension available, striped solver using {PORTABLE_LANES} portable lanes");
        Ok(Self::Portable(StripedAlignerPortable::new(query, scoring)))
    }

    /// Aligns `reference` (sequence 1) against the prepared query. See [`StripedSolver::align`].
    pub fn align(&self, reference: &[u8]) -> Result<Alignment> {
        match self {
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            Self::AVX2(aligner) => unsafe { aligner.align(reference) },
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            Self::SSE(aligner) => unsafe { aligner.align(reference) },
            #[cfg(all(target_arch = "aarch64", feature = "simd"))]
            Self::NEON(aligner) => unsafe { aligner.align(reference) },
            Self::Portable(aligner) => aligner.align(reference),
        }
    }

    /// Largest score any alignment of the query against `reference_len` symbols could reach
    pub fn score_bound(&self, reference_len: usize) -> i64 {
        match self {
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            Self::AVX2(aligner) => aligner.0.score_bound(reference_len),
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            Self::SSE(aligner) => aligner.0.score_bound(reference_len),
            #[cfg(all(target_arch = "aarch64", feature = "simd"))]
            Self::NEON(aligner) => aligner.0.score_bound(reference_len),
            Self::Portable(aligner) => aligner.0.score_bound(reference_len),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            Self::AVX2(_) => "avx2",
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            Self::SSE(_) => "sse4.1",
            #[cfg(all(target_arch = "aarch64", feature = "simd"))]
            Self::NEON(_) => "neon",
            Self::Portable(_) => "portable",
        }
    }
}

#[cfg(any(
    all(target_arch = "x86_64", feature = "simd"),
    all(target_arch = "aarch64", feature = "simd")
))]
macro_rules! define_aligner {
    (
        $name:ident,
        vector = $vector:ty,
        target_feature = $feature:literal
    ) => {
        #[derive(Debug, Clone)]
        pub struct $name(StripedSolver<$vector>);

        impl $name {
            #[doc = concat!("# Safety\n\nCaller must ensure that the target feature `", $feature, "` is available")]
            #[target_feature(enable = $feature)]
            pub unsafe fn new(query: &[u8], scoring: &Scoring) -> Self {
                Self(StripedSolver::new(query, scoring))
            }

            pub fn is_available() -> bool {
                <$vector as Vector>::is_available()
            }

            #[doc = concat!(
                "Align the reference against the query\n\n",
                "# Safety\n\n",
                "Caller must ensure that the target feature `", $feature, "` is available"
            )]
            #[target_feature(enable = $feature)]
            pub unsafe fn align(&self, reference: &[u8]) -> Result<Alignment> {
                self.0.align(reference)
            }
        }
    };
}

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
define_aligner!(
    StripedAlignerAVX2,
    vector = AVXVector,
    target_feature = "avx2"
);

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
define_aligner!(
    StripedAlignerSSE,
    vector = SSEVector,
    target_feature = "ssse3,sse4.1"
);

#[cfg(all(target_arch = "aarch64", feature = "simd"))]
define_aligner!(
    StripedAlignerNEON,
    vector = NEONVector,
    target_feature = "neon"
);

/// Array lanes, compiled once per instruction set by `multiversion` and picked at runtime
#[derive(Debug, Clone)]
pub struct StripedAlignerPortable(StripedSolver<PortableVector<PORTABLE_LANES>>);

impl StripedAlignerPortable {
    pub fn new(query: &[u8], scoring: &Scoring) -> Self {
        Self(StripedSolver::new(query, scoring))
    }

    pub fn align(&self, reference: &[u8]) -> Result<Alignment> {
        align_portable(&self.0, reference)
    }
}

#[multiversion::multiversion(targets = "simd")]
fn align_portable(
    solver: &StripedSolver<PortableVector<PORTABLE_LANES>>,
    reference: &[u8],
) -> Result<Alignment> {
    solver.align(reference)
}

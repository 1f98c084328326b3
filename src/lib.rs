//! Strider is a local pairwise aligner for DNA sequences: Smith-Waterman with affine gaps,
//! computed by a full-matrix reference solver, a banded solver and a striped SIMD solver
//! (SSE4.1, AVX2, NEON, or portable lanes picked at runtime). All three report the same optimal
//! score and end cell, and a single traceback turns the winning cell into aligned strings.
//!
//! Sequences are bytes. `A`, `C`, `G`, `T` match case-insensitively, anything else is an unknown
//! base which never matches, not even itself.
//!
//! # Example: using `align`
//!
//! ```rust
//! use strider::{Config, Scoring, align};
//!
//! let config = Config {
//!     scoring: Scoring {
//!         match_score: 3,
//!         mismatch_penalty: 3,
//!         gap_open_penalty: 2,
//!         gap_extend_penalty: 2,
//!     },
//!     ..Config::default()
//! };
//!
//! let aln = align(b"TGTTACGG", b"GGTTGACTA", &config).unwrap();
//! assert_eq!(aln.score, 13);
//! assert_eq!(aln.rescore(&config.scoring), aln.score);
//! println!("{}\n{}\n{}", aln.aligned_seq1, aln.match_line, aln.aligned_seq2);
//! ```
//!
//! # Example: using `Aligner`
//!
//! Useful for when you want to align one query against more than one reference, since the query
//! profile is only built once.
//!
//! ```rust
//! use strider::{Aligner, Config, Method};
//!
//! let config = Config {
//!     method: "banded".parse::<Method>().unwrap(),
//!     band_width: 8,
//!     ..Config::default()
//! };
//! let aligner = Aligner::new(b"ACGTACGT", &config).unwrap();
//!
//! for reference in [&b"TTACGTACGTTT"[..], b"ACGAACGT", b"NNNN"] {
//!     let aln = aligner.align(reference).unwrap();
//!     println!("{} {}..{} {:.2}", aln.score, aln.start1, aln.end1, aln.identity());
//! }
//! ```
//!
//! # Example: walking the alignment path
//!
//! The tables of any solver can be traced step by step, e.g. to score matches differently.
//!
//! ```rust
//! use strider::{
//!     Scoring,
//!     alignment::Step,
//!     sequence::QueryProfile,
//!     smith_waterman::{AlignmentPathIter, Priority, reference},
//! };
//!
//! let scoring = Scoring::default();
//! let (seq1, seq2) = (b"GATTACA", b"GATCA");
//! let profile = QueryProfile::<i32>::new(seq2, &scoring);
//! let (matrix, best, end) = reference::fill(seq1, &profile, &scoring);
//! assert!(best > 0);
//!
//! let matches = AlignmentPathIter::new(&matrix, seq1, seq2, &scoring, end, Priority::DiagonalFirst)
//!     .filter(|step| matches!(step, Step::Match(_)))
//!     .count();
//! assert!(matches > 0);
//! ```

use std::{fmt, str::FromStr};

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod alignment;
mod r#const;
mod error;
pub mod sequence;
pub mod simd;
pub mod smith_waterman;

pub use alignment::Alignment;
pub use error::{Error, Result};

use r#const::*;
use sequence::{QueryProfile, UNKNOWN};
use smith_waterman::{StripedAligner, banded, reference};

/// Aligns `seq1` (the reference, rows) against `seq2` (the query, columns) with `config.method`.
///
/// Empty input, or input without a single recognisable base, yields [`Alignment::empty`].
pub fn align(seq1: &[u8], seq2: &[u8], config: &Config) -> Result<Alignment> {
    Aligner::new(seq2, config)?.align(seq1)
}

/// Holds a query (sequence 2) with its prepared profiles, for aligning against many references
#[derive(Debug, Clone)]
pub struct Aligner {
    query: Vec<u8>,
    config: Config,
    profile: QueryProfile<i32>,
    striped: Option<StripedAligner>,
}

impl Aligner {
    pub fn new(query: &[u8], config: &Config) -> Result<Self> {
        config.scoring.validate()?;

        let striped = match config.method {
            Method::Striped => Some(StripedAligner::new(query, &config.scoring)?),
            Method::Naive | Method::Banded => None,
        };

        Ok(Self {
            query: query.to_vec(),
            config: config.clone(),
            profile: QueryProfile::new(query, &config.scoring),
            striped,
        })
    }

    pub fn query(&self) -> &[u8] {
        &self.query
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Aligns `reference` (sequence 1) against the query
    pub fn align(&self, reference: &[u8]) -> Result<Alignment> {
        let scoring = &self.config.scoring;
        match (self.config.method, &self.striped) {
            (Method::Banded, _) => Ok(banded::banded_with_profile(
                reference,
                &self.query,
                &self.profile,
                scoring,
                self.config.band_width,
            )),
            (Method::Striped, Some(striped)) => {
                let bound = striped.score_bound(reference.len());
                if bound > i16::MAX as i64 {
                    debug!(
                        "score bound {bound} does not fit in 16-bit lanes, using the reference solver"
                    );
                    return Ok(self.align_reference(reference));
                }
                striped.align(reference)
            }
            (Method::Naive, _) | (Method::Striped, None) => Ok(self.align_reference(reference)),
        }
    }

    fn align_reference(&self, reference: &[u8]) -> Alignment {
        reference::align_with_profile(reference, &self.query, &self.profile, &self.config.scoring)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub scoring: Scoring,
    /// Half-width of the diagonal band computed by [`Method::Banded`]. Alignments whose path
    /// leaves the band score lower than the optimum.
    pub band_width: usize,
    pub method: Method,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scoring: Scoring::default(),
            band_width: BAND_WIDTH,
            method: Method::Striped,
        }
    }
}

/// Solver used by [`align`] and [`Aligner`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Method {
    /// Full matrix, always exact
    Naive,
    /// Diagonal band of [`Config::band_width`], exact when the optimal path stays inside it
    Banded,
    /// SIMD striped, always exact. Falls back to [`Method::Naive`] when scores could exceed
    /// 16 bits.
    #[default]
    Striped,
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(Method::Naive),
            "banded" => Ok(Method::Banded),
            "striped" => Ok(Method::Striped),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Naive => "naive",
            Method::Banded => "banded",
            Method::Striped => "striped",
        })
    }
}

/// Penalties are magnitudes and get subtracted, so only the match score needs validating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scoring {
    /// Score for a pair of identical known bases
    pub match_score: u16,
    /// Penalty for a pair of different bases, or any pair involving an unknown base
    pub mismatch_penalty: u16,
    /// Penalty for the first position of a gap
    pub gap_open_penalty: u16,
    /// Penalty for every following position of the same gap
    pub gap_extend_penalty: u16,
}

impl Scoring {
    pub fn validate(&self) -> Result<()> {
        if self.match_score == 0 {
            return Err(Error::ZeroMatchScore);
        }
        Ok(())
    }

    /// Signed score of aligning two base codes (see [`sequence::encode_base`])
    #[inline(always)]
    pub fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b && a != UNKNOWN {
            self.match_score as i32
        } else {
            -(self.mismatch_penalty as i32)
        }
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Scoring {
            match_score: MATCH_SCORE,
            mismatch_penalty: MISMATCH_PENALTY,
            gap_open_penalty: GAP_OPEN_PENALTY,
            gap_extend_penalty: GAP_EXTEND_PENALTY,
        }
    }
}

//! The [Smith Waterman algorithm](https://en.wikipedia.org/wiki/Smith%E2%80%93Waterman_algorithm) finds the best scoring local alignment between two DNA sequences, with [affine gaps](https://en.wikipedia.org/wiki/Smith%E2%80%93Waterman_algorithm#Affine) so that opening a gap costs more than extending one.
//!
//! Three solvers fill the same `H`/`E`/`F` tables, with rows indexed by sequence 1 and columns
//! by sequence 2:
//! - [`reference`]: the full matrix, generic over the score domain. Every other solver is checked
//!   against it.
//! - [`banded`]: only cells with `|i - j| <= band`. A lower bound on the reference score, exact
//!   whenever the optimal path stays inside the band.
//! - [`striped`]: Farrar's striped layout over 16-bit SIMD lanes, exact for every pair whose best
//!   possible score fits in `i16`.
//!
//! Each cell depends on its left, upper and upper-left neighbours. Striping spreads the query
//! over the lanes so that a whole vector of one reference row can be computed at once: lane `l`
//! holds query positions `l * seg_len ..`, and consecutive vectors (stripes) hold consecutive
//! positions. Up and diagonal dependencies then come from the previous row for free. The left
//! dependency (F) does not, so it is first carried stripe to stripe assuming no lane receives
//! anything from the lane below, then fixed up by the lazy F loop.
//!
//! ```text
//! query: "ACGTACGTTG" (m = 10), 4 lanes, seg_len = 3
//!
//!             lane 0  lane 1  lane 2  lane 3
//! stripe 0:   A       T       G       G
//! stripe 1:   C       A       T       _
//! stripe 2:   G       C       T       _
//!
//! // main pass for one reference row, F flows down the stripes
//!
//! stripe 0 -> stripe 1 -> stripe 2
//!
//! // but lane 1, stripe 0 (query position 3) really follows lane 0, stripe 2 (position 2),
//! // so the F leaving stripe 2 is shifted up one lane and carried into stripe 0 again
//!
//! F out of stripe 2:  [9   4   ..  ..]
//! shifted:            [-∞  9   4   ..]
//!
//! // the carry keeps flowing while it still raises some stored F, wrapping (and shifting)
//! // at the last stripe, at most once per lane
//! ```
//!
//! A single traceback ([`traceback()`]) walks back from the best cell of any of the tables.

pub mod banded;
mod matrix;
pub mod reference;
mod score;
pub mod striped;
mod traceback;

pub use matrix::{DenseMatrix, ScoreTables};
pub use score::Score;
pub use striped::{StripedAligner, StripedSolver};
pub use traceback::{AlignmentPathIter, Priority, traceback};

//! Full matrix solver, the oracle every other solver is checked against.

mod algorithm;

pub use algorithm::{align_with_profile, fill, score, smith_waterman};

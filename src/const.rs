// Scoring
pub const MATCH_SCORE: u16 = 2;
pub const MISMATCH_PENALTY: u16 = 1;
pub const GAP_OPEN_PENALTY: u16 = 3;
pub const GAP_EXTEND_PENALTY: u16 = 1;

// Banded solver
pub const BAND_WIDTH: usize = 20;

use super::layout::StripedLayout;
use crate::{
    Scoring,
    sequence::{ALPHABET_SIZE, QueryProfile},
};

/// Score of padding cells. Saturating adds keep anything built on it at the bottom of the
/// domain, so padding never seeds a positive H.
pub const PADDING_SCORE: i16 = i16::MIN;

/// The query profile re-laid out in striped order: for each alphabet code, `seg_len` vectors of
/// `lanes` scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripedProfile {
    layout: StripedLayout,
    scores: Vec<i16>,
}

impl StripedProfile {
    pub fn new(query: &[u8], scoring: &Scoring, lanes: usize) -> Self {
        Self::from_profile(&QueryProfile::new(query, scoring), lanes)
    }

    pub fn from_profile(profile: &QueryProfile<i16>, lanes: usize) -> Self {
        let layout = StripedLayout::new(profile.len(), lanes);
        let mut scores = Vec::with_capacity(ALPHABET_SIZE * layout.padded_len());
        for code in 0..ALPHABET_SIZE as u8 {
            for stripe in 0..layout.seg_len() {
                scores.extend((0..lanes).map(|lane| {
                    if layout.is_padding(stripe, lane) {
                        PADDING_SCORE
                    } else {
                        profile.score(code, layout.to_linear(stripe, lane))
                    }
                }));
            }
        }

        Self { layout, scores }
    }

    #[inline(always)]
    pub fn layout(&self) -> StripedLayout {
        self.layout
    }

    /// All stripes for one alphabet code, `padded_len` scores
    #[inline(always)]
    pub fn row(&self, code: u8) -> &[i16] {
        let len = self.layout.padded_len();
        let start = code as usize * len;
        &self.scores[start..start + len]
    }
}

/// Mapping between linear query positions and the `(stripe, lane)` cells of a striped vector
/// array.
///
/// Query position `j` lives in lane `j / seg_len` of stripe `j % seg_len`, so one vector holds
/// positions `seg_len` apart and the predecessor of every lane in stripe 0 sits one lane lower
/// in the last stripe.
///
/// ```text
/// m = 10, lanes = 4, seg_len = 3
///
///             lane 0  lane 1  lane 2  lane 3
/// stripe 0:   j=0     j=3     j=6     j=9
/// stripe 1:   j=1     j=4     j=7     pad
/// stripe 2:   j=2     j=5     j=8     pad
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripedLayout {
    len: usize,
    lanes: usize,
    seg_len: usize,
}

impl StripedLayout {
    pub fn new(len: usize, lanes: usize) -> Self {
        assert!(lanes > 0, "striped layout needs at least one lane");
        Self {
            len,
            lanes,
            seg_len: len.div_ceil(lanes).max(1),
        }
    }

    /// Number of real query positions
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Number of stripes
    #[inline(always)]
    pub fn seg_len(&self) -> usize {
        self.seg_len
    }

    /// Number of cells including the padding after the last query position
    #[inline(always)]
    pub fn padded_len(&self) -> usize {
        self.seg_len * self.lanes
    }

    #[inline(always)]
    pub fn to_striped(&self, j: usize) -> (usize, usize) {
        (j % self.seg_len, j / self.seg_len)
    }

    #[inline(always)]
    pub fn to_linear(&self, stripe: usize, lane: usize) -> usize {
        lane * self.seg_len + stripe
    }

    /// Index of position `j` in a flat array of `seg_len` vectors
    #[inline(always)]
    pub fn offset(&self, j: usize) -> usize {
        let (stripe, lane) = self.to_striped(j);
        stripe * self.lanes + lane
    }

    #[inline(always)]
    pub fn is_padding(&self, stripe: usize, lane: usize) -> bool {
        self.to_linear(stripe, lane) >= self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seg_len() {
        assert_eq!(StripedLayout::new(0, 8).seg_len(), 1);
        assert_eq!(StripedLayout::new(1, 8).seg_len(), 1);
        assert_eq!(StripedLayout::new(8, 8).seg_len(), 1);
        assert_eq!(StripedLayout::new(9, 8).seg_len(), 2);
        assert_eq!(StripedLayout::new(10, 4).padded_len(), 12);
        assert_eq!(StripedLayout::new(5, 1).seg_len(), 5);
    }

    #[test]
    fn test_mapping() {
        let layout = StripedLayout::new(10, 4);
        assert_eq!(layout.to_striped(0), (0, 0));
        assert_eq!(layout.to_striped(4), (1, 1));
        assert_eq!(layout.to_striped(9), (0, 3));
        assert_eq!(layout.to_linear(2, 2), 8);
        assert!(layout.is_padding(1, 3));
        assert!(!layout.is_padding(0, 3));
    }

    #[test]
    fn test_round_trip_covers_every_cell_once() {
        for (len, lanes) in [(1, 1), (7, 2), (10, 4), (16, 8), (33, 16)] {
            let layout = StripedLayout::new(len, lanes);
            let mut seen = vec![false; layout.padded_len()];
            for j in 0..layout.padded_len() {
                let (stripe, lane) = layout.to_striped(j);
                assert!(stripe < layout.seg_len() && lane < lanes);
                assert_eq!(layout.to_linear(stripe, lane), j);

                let offset = layout.offset(j);
                assert!(!seen[offset], "offset {offset} mapped twice");
                seen[offset] = true;
            }
        }
    }

    #[test]
    fn test_predecessor_of_first_stripe() {
        // The diagonal shift relies on j - 1 of stripe 0, lane L being the last stripe, lane L - 1
        let layout = StripedLayout::new(10, 4);
        for lane in 1..layout.lanes() {
            let j = layout.to_linear(0, lane);
            assert_eq!(layout.to_striped(j - 1), (layout.seg_len() - 1, lane - 1));
        }
    }
}

/// One 8-pixel row of a tile: two bit planes, leftmost pixel in bit 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRow {
    pub low: u8,
    pub high: u8,
}

impl TileRow {
    pub fn new(low: u8, high: u8) -> TileRow {
        TileRow { low, high }
    }

    /// 2-bit color number of pixel `x` (0 = leftmost).
    #[inline]
    pub fn color(&self, x: usize) -> u8 {
        let bit = 7 - (x & 7);
        (((self.high >> bit) & 1) << 1) | ((self.low >> bit) & 1)
    }
}

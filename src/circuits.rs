/// One-bit memory that reports a high to low transition of its input.
#[derive(Debug, Clone, Default)]
pub struct FallingEdgeDetector {
    previous: bool,
}

impl FallingEdgeDetector {
    pub fn new() -> FallingEdgeDetector {
        FallingEdgeDetector::default()
    }

    #[inline]
    pub fn check(&mut self, current: bool) -> bool {
        let edge = self.previous && !current;
        self.previous = current;
        edge
    }
}

/// One-bit memory that reports a low to high transition of its input.
#[derive(Debug, Clone, Default)]
pub struct RisingEdgeDetector {
    previous: bool,
}

impl RisingEdgeDetector {
    pub fn new() -> RisingEdgeDetector {
        RisingEdgeDetector::default()
    }

    #[inline]
    pub fn check(&mut self, current: bool) -> bool {
        let edge = current && !self.previous;
        self.previous = current;
        edge
    }

    /// Forget the last sample, e.g. when the source is powered down.
    pub fn reset(&mut self) {
        self.previous = false;
    }
}

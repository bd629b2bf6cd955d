/// PPU mode as reported in STAT bits 0-1.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    HBlank,  // H-Blank
    VBlank,  // V-Blank
    OamScan, // OAM Scan
    Drawing, // Drawing
}

impl State {
    pub fn as_u8(self) -> u8 {
        match self {
            State::HBlank => 0,
            State::VBlank => 1,
            State::OamScan => 2,
            State::Drawing => 3,
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            State::HBlank => write!(f, "HBLANK"),
            State::VBlank => write!(f, "VBLANK"),
            State::OamScan => write!(f, "OAM"),
            State::Drawing => write!(f, "VRAM"),
        }
    }
}

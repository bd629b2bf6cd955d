use crate::circuits::FallingEdgeDetector;
use crate::memory::component::{Addressable, Clocked};
use crate::memory::ram::Ram;
use crate::memory::registers::InterruptFlags;
use crate::memory::{DIV_REGISTER, TAC_REGISTER, TIMA_REGISTER, TMA_REGISTER};

const TIMER_ENABLE: u8 = 0b100;

/// DIV/TIMA/TMA/TAC.
///
/// DIV is the upper byte of a free-running 16-bit counter. TIMA is clocked by
/// the falling edge of `counter bit AND timer enable`, where the bit is picked
/// by TAC. That makes DIV resets and TAC writes able to clock TIMA too.
#[derive(Clone)]
pub struct Divider {
    div: u16,
    tima: u8,
    tma: u8,
    tac: u8,
    mask: u16,
    /// TIMA wrapped during the last update and still reads $00.
    overflowing: bool,
    /// TIMA was just reloaded from TMA; writes to TIMA are ignored for this cycle.
    release_overflow: bool,
    edge: FallingEdgeDetector,
}

impl Divider {
    pub fn new() -> Divider {
        Divider {
            div: 0xabcc,
            tima: 0,
            tma: 0,
            tac: 0,
            mask: 0,
            overflowing: false,
            release_overflow: false,
            edge: FallingEdgeDetector::new(),
        }
    }

    /// Counter bit feeding the edge detector for a TAC clock select.
    pub fn mask_for(tac: u8) -> u16 {
        match tac & 0b11 {
            0b00 => 0x200,
            0b01 => 0x008,
            0b10 => 0x020,
            _ => 0x080,
        }
    }

    #[inline]
    pub fn counter(&self) -> u16 {
        self.div
    }

    #[inline]
    pub fn tima(&self) -> u8 {
        self.tima
    }

    #[inline]
    pub fn is_overflowing(&self) -> bool {
        self.overflowing
    }

    fn step(&mut self, clocks: u32, ram: &mut Ram) {
        self.div = self.div.wrapping_add(clocks as u16);
        let signal = (self.div & self.mask) == self.mask && self.tac & TIMER_ENABLE != 0;

        if self.release_overflow {
            self.overflowing = false;
            self.release_overflow = false;
        }

        // One cycle after the wrap: reload and interrupt
        if self.overflowing {
            self.tima = self.tma;
            ram.request_interrupt(InterruptFlags::TIMER);
            self.release_overflow = true;
        }

        if self.edge.check(signal) {
            let (tima, wrapped) = self.tima.overflowing_add(1);
            self.tima = tima;
            if wrapped {
                self.overflowing = true;
            }
        }
    }
}

impl Default for Divider {
    fn default() -> Divider {
        Divider::new()
    }
}

impl Addressable for Divider {
    fn mapped_ranges(&self) -> &'static [(u16, u16)] {
        &[(DIV_REGISTER, TAC_REGISTER)]
    }

    fn mmio_read(&self, addr: u16, _ram: &Ram) -> Option<u8> {
        match addr {
            DIV_REGISTER => Some((self.div >> 8) as u8),
            TIMA_REGISTER => Some(self.tima),
            TMA_REGISTER => Some(self.tma),
            TAC_REGISTER => Some(self.tac | 0xf8),
            _ => None,
        }
    }

    fn mmio_write(&mut self, addr: u16, value: u8, ram: &mut Ram) -> bool {
        match addr {
            DIV_REGISTER => {
                self.div = 0;
                self.step(0, ram);
            }
            TIMA_REGISTER => {
                if !self.release_overflow {
                    self.tima = value;
                    self.overflowing = false;
                }
            }
            TMA_REGISTER => {
                if self.release_overflow {
                    self.tima = value;
                }
                self.tma = value;
            }
            TAC_REGISTER => {
                self.mask = Divider::mask_for(value);
                self.tac = value & 0b111;
                self.step(0, ram);
                self.step(0, ram);
            }
            _ => return false,
        }
        true
    }
}

impl Clocked for Divider {
    #[inline]
    fn update(&mut self, clocks: u32, ram: &mut Ram) {
        self.step(clocks, ram);
    }
}

impl std::fmt::Display for Divider {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "DIV: ${:04x}  TIMA: ${:02x}  TMA: ${:02x}  TAC: ${:02x}  MASK: ${:04x}  OVF: {}  REL: {}",
            self.div, self.tima, self.tma, self.tac, self.mask, self.overflowing, self.release_overflow
        )
    }
}

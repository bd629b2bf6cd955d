use crate::memory::component::{Addressable, Clocked};
use crate::memory::ram::Ram;
use crate::memory::registers::InterruptFlags;
use crate::memory::{SERIAL_CONTROL_REGISTER, SERIAL_DATA_REGISTER};
use log::{debug, warn};

/// Clocks for one 8-bit transfer at 8192 Hz.
const TRANSFER_CLOCKS: i32 = 4096;
const START_INTERNAL_TRANSFER: u8 = 0x81;
/// Undrained bytes kept before the oldest half is discarded.
pub const OUTPUT_CAPACITY: usize = 0x10000;

/// Link port with nothing plugged in: transfers complete and shift in $FF.
/// Outgoing bytes are buffered (up to `OUTPUT_CAPACITY`) so test ROMs printing
/// over serial can be read back.
#[derive(Clone)]
pub struct Serial {
    data: u8,
    control: u8,
    transferring: bool,
    clock: i32,
    output: Vec<u8>,
}

impl Serial {
    pub fn new() -> Serial {
        Serial {
            data: 0,
            control: 0,
            transferring: false,
            clock: TRANSFER_CLOCKS,
            output: Vec::new(),
        }
    }

    /// Bytes the CPU has sent since the last `take_output`.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Hands over the buffered bytes and starts a fresh buffer.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Default for Serial {
    fn default() -> Serial {
        Serial::new()
    }
}

impl Addressable for Serial {
    fn mapped_ranges(&self) -> &'static [(u16, u16)] {
        &[(SERIAL_DATA_REGISTER, SERIAL_CONTROL_REGISTER)]
    }

    fn mmio_read(&self, addr: u16, _ram: &Ram) -> Option<u8> {
        match addr {
            SERIAL_DATA_REGISTER => Some(self.data),
            _ => Some(self.control | 0x7c),
        }
    }

    fn mmio_write(&mut self, addr: u16, value: u8, _ram: &mut Ram) -> bool {
        match addr {
            SERIAL_DATA_REGISTER => self.data = value,
            _ => {
                self.control = value;
                self.transferring = value & START_INTERNAL_TRANSFER == START_INTERNAL_TRANSFER;
                if self.transferring {
                    debug!("Serial: Sending ${:02x}", self.data);
                    if self.output.len() >= OUTPUT_CAPACITY {
                        warn!("Serial: Output buffer full, dropping {} bytes", OUTPUT_CAPACITY / 2);
                        self.output.drain(..OUTPUT_CAPACITY / 2);
                    }
                    self.output.push(self.data);
                    self.clock = TRANSFER_CLOCKS;
                }
            }
        }
        true
    }
}

impl Clocked for Serial {
    fn update(&mut self, clocks: u32, ram: &mut Ram) {
        if !self.transferring {
            return;
        }

        self.clock -= clocks as i32;
        if self.clock <= 0 {
            self.control &= 0x7f;
            self.data = 0xff;
            self.transferring = false;
            self.clock = TRANSFER_CLOCKS;
            ram.request_interrupt(InterruptFlags::SERIAL);
        }
    }
}

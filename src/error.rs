use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DmgError {
    #[snafu(display("Unknown opcode ({:02x}) at address: ${:04x}", opcode, address))]
    UnknownOpcode { opcode: u8, address: u16 },
    #[snafu(display("Cartridge type {:02x} ({}) is not supported", code, name))]
    UnsupportedCartridgeType { code: u8, name: &'static str },
    #[snafu(display("Invalid mapped range ${:04x}-${:04x}: low address must not exceed high address", low, high))]
    InvalidMappedRange { low: u16, high: u16 },
    #[snafu(display("Cartridge header needs at least 0x150 bytes, got {:#x}", length))]
    HeaderTooShort { length: usize },
    #[snafu(display("Unknown ROM size code: {:02x}", code))]
    UnknownRomSize { code: u8 },
    #[snafu(display("Unknown RAM size code: {:02x}", code))]
    UnknownRamSize { code: u8 },
    #[snafu(display("Failed to read ROM: {}", source))]
    RomRead { source: std::io::Error },
}

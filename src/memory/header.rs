use crate::error::{DmgError, HeaderTooShortSnafu, UnknownRamSizeSnafu, UnknownRomSizeSnafu};
use snafu::ensure;

pub const HEADER_END: usize = 0x150;

const TITLE_START: usize = 0x134;
const TITLE_LENGTH: usize = 16;
const CGB_FLAG: usize = 0x143;
const NEW_LICENSEE_CODE: usize = 0x144;
const SGB_FLAG: usize = 0x146;
const CARTRIDGE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;
const DESTINATION_CODE: usize = 0x14a;
const OLD_LICENSEE_CODE: usize = 0x14b;
const ROM_VERSION: usize = 0x14c;
const HEADER_CHECKSUM: usize = 0x14d;
const GLOBAL_CHECKSUM: usize = 0x14e;

/// How external RAM is laid out for a given RAM size code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamLayout {
    pub size: usize,
    pub bank_size: usize,
    pub banks: usize,
}

impl RamLayout {
    pub const NONE: RamLayout = RamLayout {
        size: 0,
        bank_size: 0,
        banks: 0,
    };
}

/// The cartridge header at $0100-$014F, parsed once at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub cgb_flag: u8,
    pub new_licensee_code: [u8; 2],
    pub sgb_flag: u8,
    pub cartridge_type: u8,
    pub rom_size: u8,
    pub ram_size: u8,
    pub destination_code: u8,
    pub old_licensee_code: u8,
    pub rom_version: u8,
    pub header_checksum: u8,
    pub global_checksum: u16,
}

impl Header {
    pub fn parse(rom: &[u8]) -> Result<Header, DmgError> {
        ensure!(rom.len() >= HEADER_END, HeaderTooShortSnafu { length: rom.len() });

        let title = rom[TITLE_START..TITLE_START + TITLE_LENGTH]
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as char)
            .collect();

        Ok(Header {
            title,
            cgb_flag: rom[CGB_FLAG],
            new_licensee_code: [rom[NEW_LICENSEE_CODE], rom[NEW_LICENSEE_CODE + 1]],
            sgb_flag: rom[SGB_FLAG],
            cartridge_type: rom[CARTRIDGE_TYPE],
            rom_size: rom[ROM_SIZE],
            ram_size: rom[RAM_SIZE],
            destination_code: rom[DESTINATION_CODE],
            old_licensee_code: rom[OLD_LICENSEE_CODE],
            rom_version: rom[ROM_VERSION],
            header_checksum: rom[HEADER_CHECKSUM],
            global_checksum: u16::from_be_bytes([rom[GLOBAL_CHECKSUM], rom[GLOBAL_CHECKSUM + 1]]),
        })
    }

    /// Number of 16 KiB ROM banks declared by the size code.
    pub fn rom_banks(&self) -> Result<usize, DmgError> {
        match self.rom_size {
            0x00..=0x08 => Ok(2 << self.rom_size),
            0x52 => Ok(72),
            0x53 => Ok(80),
            0x54 => Ok(96),
            code => UnknownRomSizeSnafu { code }.fail(),
        }
    }

    pub fn ram_layout(&self) -> Result<RamLayout, DmgError> {
        let (size, bank_size, banks) = match self.ram_size {
            0x00 => return Ok(RamLayout::NONE),
            0x01 => (0x800, 0x800, 1),
            0x02 => (0x2000, 0x2000, 1),
            0x03 => (0x8000, 0x2000, 4),
            0x04 => (0x20000, 0x2000, 16),
            0x05 => (0x10000, 0x2000, 8),
            code => return UnknownRamSizeSnafu { code }.fail(),
        };

        Ok(RamLayout { size, bank_size, banks })
    }

    /// Checksum over $0134-$014C as the boot ROM computes it.
    pub fn compute_checksum(rom: &[u8]) -> u8 {
        rom[TITLE_START..=ROM_VERSION]
            .iter()
            .fold(0u8, |acc, &byte| acc.wrapping_sub(byte).wrapping_sub(1))
    }

    pub fn cartridge_type_name(&self) -> &'static str {
        cartridge_type_name(self.cartridge_type)
    }
}

pub fn cartridge_type_name(code: u8) -> &'static str {
    match code {
        0x00 => "ROM ONLY",
        0x01 => "MBC1",
        0x02 => "MBC1+RAM",
        0x03 => "MBC1+RAM+BATTERY",
        0x05 => "MBC2",
        0x06 => "MBC2+BATTERY",
        0x08 => "ROM+RAM",
        0x09 => "ROM+RAM+BATTERY",
        0x0b => "MMM01",
        0x0c => "MMM01+RAM",
        0x0d => "MMM01+RAM+BATTERY",
        0x0f => "MBC3+TIMER+BATTERY",
        0x10 => "MBC3+TIMER+RAM+BATTERY",
        0x11 => "MBC3",
        0x12 => "MBC3+RAM",
        0x13 => "MBC3+RAM+BATTERY",
        0x15 => "MBC4",
        0x16 => "MBC4+RAM",
        0x17 => "MBC4+RAM+BATTERY",
        0x19 => "MBC5",
        0x1a => "MBC5+RAM",
        0x1b => "MBC5+RAM+BATTERY",
        0x1c => "MBC5+RUMBLE",
        0x1d => "MBC5+RUMBLE+RAM",
        0x1e => "MBC5+RUMBLE+RAM+BATTERY",
        0xfc => "POCKET CAMERA",
        0xfd => "BANDAI TAMA5",
        0xfe => "HuC3",
        0xff => "HuC1+RAM+BATTERY",
        _ => "Unknown",
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Title:          {}", self.title)?;
        writeln!(f, "Type:           ${:02x} ({})", self.cartridge_type, self.cartridge_type_name())?;
        writeln!(f, "ROM size:       ${:02x}", self.rom_size)?;
        writeln!(f, "RAM size:       ${:02x}", self.ram_size)?;
        writeln!(f, "CGB flag:       ${:02x}", self.cgb_flag)?;
        writeln!(f, "SGB flag:       ${:02x}", self.sgb_flag)?;
        writeln!(
            f,
            "Licensee:       ${:02x} / {}{}",
            self.old_licensee_code, self.new_licensee_code[0] as char, self.new_licensee_code[1] as char
        )?;
        writeln!(f, "Destination:    ${:02x}", self.destination_code)?;
        writeln!(f, "Version:        ${:02x}", self.rom_version)?;
        writeln!(f, "Checksum:       ${:02x}", self.header_checksum)?;
        write!(f, "Global:         ${:04x}", self.global_checksum)
    }
}

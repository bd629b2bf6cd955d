use crate::memory::mapper::{Mapper, Storage};
use crate::memory::{EXTERNAL_RAM_END, EXTERNAL_RAM_START, ROM_BANK_SIZE};
use log::debug;

const RAM_ENABLE_RANGE: std::ops::RangeInclusive<u16> = 0x0000..=0x1fff;
const ROM_BANK_RANGE: std::ops::RangeInclusive<u16> = 0x2000..=0x3fff;
const SECONDARY_BANK_REGISTER: std::ops::RangeInclusive<u16> = 0x4000..=0x5fff;
const BANKING_MODE_REGISTER: std::ops::RangeInclusive<u16> = 0x6000..=0x7fff;
const ROM_SLOT_0_RANGE: std::ops::RangeInclusive<u16> = 0x0000..=0x3fff;
const ROM_SLOT_1_RANGE: std::ops::RangeInclusive<u16> = 0x4000..=0x7fff;

#[derive(Clone)]
pub struct Mbc1 {
    storage: Storage,
    /// BANK1: 5 bits, never zero.
    rom_bank: u8,
    /// BANK2: 2 bits, upper ROM bank bits or RAM bank depending on mode.
    secondary_bank: u8,
    ram_enabled: bool,
    banking_mode: bool,
}

impl Mbc1 {
    pub fn new(storage: Storage) -> Mbc1 {
        Mbc1 {
            storage,
            rom_bank: 1,
            secondary_bank: 0,
            ram_enabled: false,
            banking_mode: false,
        }
    }

    #[inline]
    fn rom_bank_mask(&self) -> usize {
        self.storage.rom_banks.max(1) - 1
    }

    /// Bank visible at $0000-$3FFF. Only mode 1 moves it.
    fn fixed_bank(&self) -> usize {
        if self.banking_mode {
            ((self.secondary_bank as usize) << 5) & self.rom_bank_mask()
        } else {
            0
        }
    }

    /// Bank visible at $4000-$7FFF.
    fn switchable_bank(&self) -> usize {
        (((self.secondary_bank as usize) << 5) | self.rom_bank as usize) & self.rom_bank_mask()
    }

    fn ram_bank(&self) -> usize {
        if self.banking_mode {
            self.secondary_bank as usize & (self.storage.ram_layout.banks.max(1) - 1)
        } else {
            0
        }
    }

    /// Index into RAM for an address in $A000-$BFFF, if RAM is reachable.
    fn ram_index(&self, addr: u16) -> Option<usize> {
        if !self.ram_enabled || self.storage.ram.is_empty() {
            return None;
        }

        let layout = self.storage.ram_layout;
        let offset = (addr - EXTERNAL_RAM_START) as usize & (layout.bank_size - 1);
        Some((self.ram_bank() * layout.bank_size + offset) % self.storage.ram.len())
    }
}

impl Mapper for Mbc1 {
    #[inline]
    fn read(&self, addr: u16) -> u8 {
        match addr {
            addr if ROM_SLOT_0_RANGE.contains(&addr) => {
                self.storage.rom_at(self.fixed_bank() * ROM_BANK_SIZE + addr as usize)
            }
            addr if ROM_SLOT_1_RANGE.contains(&addr) => {
                let offset = addr as usize - ROM_BANK_SIZE;
                self.storage.rom_at(self.switchable_bank() * ROM_BANK_SIZE + offset)
            }
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => match self.ram_index(addr) {
                Some(index) => self.storage.ram[index],
                None => 0xff,
            },
            _ => 0xff,
        }
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            addr if RAM_ENABLE_RANGE.contains(&addr) => {
                self.ram_enabled = (data & 0x0f) == 0x0a;
                debug!("MBC1: RAM enabled: {}", self.ram_enabled);
            }
            addr if ROM_BANK_RANGE.contains(&addr) => {
                // Zero is checked on the 5-bit value, before masking to the ROM size
                self.rom_bank = data & 0b0001_1111;
                if self.rom_bank == 0 {
                    self.rom_bank = 1;
                }
                debug!("MBC1: Switched to ROM bank {}", self.switchable_bank());
            }
            addr if SECONDARY_BANK_REGISTER.contains(&addr) => {
                self.secondary_bank = data & 0b11;
                debug!(
                    "MBC1: Secondary bank register set to {} (ROM bank {}, RAM bank {})",
                    self.secondary_bank,
                    self.switchable_bank(),
                    self.ram_bank()
                );
            }
            addr if BANKING_MODE_REGISTER.contains(&addr) => {
                self.banking_mode = data & 0b0000_0001 == 1;
                debug!("MBC1: Switched to banking mode: {}", self.banking_mode as u8);
            }
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => {
                if let Some(index) = self.ram_index(addr) {
                    self.storage.ram[index] = data;
                }
            }
            _ => {}
        }
    }

    fn dump_ram(&self) -> Vec<u8> {
        self.storage.ram.clone()
    }

    fn load_ram(&mut self, ram: Vec<u8>) {
        self.storage.load_ram(ram);
    }

    #[inline]
    fn current_rom_bank(&self) -> u16 {
        self.switchable_bank() as u16
    }

    #[inline]
    fn current_ram_bank(&self) -> u8 {
        self.ram_bank() as u8
    }

    #[inline]
    fn name(&self) -> String {
        String::from("MBC1")
    }
}

use crate::memory::mapper::{Mapper, Storage};
use crate::memory::{EXTERNAL_RAM_START, ROM_BANK_SIZE};
use log::debug;

const RAM_ENABLE_RANGE: std::ops::RangeInclusive<u16> = 0x0000..=0x1fff;
const ROM_BANK_LOW_RANGE: std::ops::RangeInclusive<u16> = 0x2000..=0x2fff;
const ROM_BANK_HIGH_RANGE: std::ops::RangeInclusive<u16> = 0x3000..=0x3fff;
const RAM_BANK_RANGE: std::ops::RangeInclusive<u16> = 0x4000..=0x5fff;
const MODE_RANGE: std::ops::RangeInclusive<u16> = 0x6000..=0x7fff;

/// Bank registers are flattened into byte offsets on every write, so reads are
/// a single index.
#[derive(Clone)]
pub struct Mbc5 {
    storage: Storage,
    ram_enabled: bool,
    rom_bank_low: u8,
    rom_bank_high: u8,
    ram_bank: u8,
    mode: bool,
    rom_offset: usize,
    ram_offset: usize,
}

impl Mbc5 {
    pub fn new(storage: Storage) -> Mbc5 {
        let mut mbc5 = Mbc5 {
            storage,
            ram_enabled: false,
            rom_bank_low: 1,
            rom_bank_high: 0,
            ram_bank: 0,
            mode: false,
            rom_offset: 0,
            ram_offset: 0,
        };
        mbc5.remap();
        mbc5
    }

    #[inline]
    fn rom_bank(&self) -> usize {
        ((self.rom_bank_high as usize & 0x01) << 8) | self.rom_bank_low as usize
    }

    /// Bank 0 is never selectable for the switchable window; it reads bank 1.
    fn remap(&mut self) {
        let total_banks = self.storage.rom_banks.max(1);
        let bank = (self.rom_bank() & (total_banks - 1)).max(1);
        self.rom_offset = (bank - 1) * ROM_BANK_SIZE;

        let layout = self.storage.ram_layout;
        self.ram_offset = if self.ram_enabled && layout.banks > 0 {
            (self.ram_bank as usize & (layout.banks - 1)) * layout.bank_size
        } else {
            0
        };

        debug!(
            "MBC5: Remapped ROM bank {} (offset ${:x}), RAM bank {} (offset ${:x})",
            bank, self.rom_offset, self.ram_bank, self.ram_offset
        );
    }

    /// Offset applied to $0000-$3FFF. Only mode 1 moves the fixed window.
    fn fixed_offset(&self) -> usize {
        if !self.mode {
            return 0;
        }

        let mut bank = (self.ram_bank as usize) << 5;
        if bank % 0x20 != 0 {
            bank += 1;
        }
        bank &= self.storage.rom_banks.max(1) - 1;
        bank * ROM_BANK_SIZE
    }

    #[inline]
    fn ram_window_end(&self) -> u32 {
        EXTERNAL_RAM_START as u32 + self.storage.ram_layout.bank_size as u32
    }
}

impl Mapper for Mbc5 {
    #[inline]
    fn read(&self, addr: u16) -> u8 {
        if addr as u32 >= self.ram_window_end() {
            return 0xff;
        }

        match addr {
            EXTERNAL_RAM_START.. => {
                if !self.ram_enabled {
                    return 0xff;
                }
                let index = (addr as usize & 0x1fff) | self.ram_offset;
                self.storage.ram.get(index).copied().unwrap_or(0xff)
            }
            0x4000.. => self.storage.rom_at(addr as usize + self.rom_offset),
            _ => self.storage.rom_at(addr as usize + self.fixed_offset()),
        }
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        if addr as u32 >= self.ram_window_end() {
            return;
        }

        match addr {
            EXTERNAL_RAM_START.. => {
                if self.ram_enabled {
                    let index = (addr as usize & 0x1fff) | self.ram_offset;
                    if let Some(byte) = self.storage.ram.get_mut(index) {
                        *byte = data;
                    }
                }
            }
            addr if MODE_RANGE.contains(&addr) => {
                self.mode = data & 0x01 == 1;
                debug!("MBC5: Mode {}", self.mode as u8);
            }
            addr if RAM_BANK_RANGE.contains(&addr) => {
                self.ram_bank = data;
                self.remap();
            }
            addr if ROM_BANK_HIGH_RANGE.contains(&addr) => {
                self.rom_bank_high = data;
                self.remap();
            }
            addr if ROM_BANK_LOW_RANGE.contains(&addr) => {
                self.rom_bank_low = data;
                self.remap();
            }
            addr if RAM_ENABLE_RANGE.contains(&addr) => {
                self.ram_enabled = (data & 0x0f) == 0x0a;
                debug!("MBC5: RAM enabled: {}", self.ram_enabled);
                self.remap();
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
        (self.rom_offset / ROM_BANK_SIZE + 1) as u16
    }

    #[inline]
    fn current_ram_bank(&self) -> u8 {
        self.ram_bank
    }

    #[inline]
    fn name(&self) -> String {
        String::from("MBC5")
    }
}

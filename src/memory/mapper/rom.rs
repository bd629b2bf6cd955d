use crate::memory::mapper::{Mapper, Storage};
use crate::memory::EXTERNAL_RAM_START;
use log::warn;

/// 32 KiB of ROM and nothing else.
#[derive(Clone)]
pub struct Rom {
    storage: Storage,
}

impl Rom {
    pub fn new(storage: Storage) -> Rom {
        Rom { storage }
    }
}

impl Mapper for Rom {
    #[inline]
    fn read(&self, addr: u16) -> u8 {
        if addr >= EXTERNAL_RAM_START {
            return 0xff;
        }
        self.storage.rom_at(addr as usize)
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        if addr >= EXTERNAL_RAM_START {
            warn!("ROM: Dropped write of ${:02x} to ${:04x}, cartridge has no RAM", data, addr);
        }
    }

    fn dump_ram(&self) -> Vec<u8> {
        Vec::new()
    }

    fn load_ram(&mut self, _ram: Vec<u8>) {}

    #[inline]
    fn current_rom_bank(&self) -> u16 {
        1
    }

    #[inline]
    fn current_ram_bank(&self) -> u8 {
        0
    }

    #[inline]
    fn name(&self) -> String {
        String::from("ROM")
    }
}

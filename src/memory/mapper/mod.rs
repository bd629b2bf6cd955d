use crate::error::DmgError;
use crate::memory::header::{Header, RamLayout};
use crate::memory::ROM_BANK_SIZE;
use dyn_clone::DynClone;

pub mod mbc1;
pub mod mbc3;
pub mod mbc5;
pub mod rom;

/// A memory bank controller. Sees $0000-$7FFF and $A000-$BFFF; every access in
/// those windows is handled (reads of absent memory yield $FF, writes to it are dropped).
pub trait Mapper: DynClone {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
    fn current_rom_bank(&self) -> u16;
    fn current_ram_bank(&self) -> u8;
    fn name(&self) -> String;
    fn dump_ram(&self) -> Vec<u8>;
    fn load_ram(&mut self, ram: Vec<u8>);

    /// Controllers with a clock of their own (MBC3 RTC) advance here.
    fn update(&mut self, _clocks: u32) {}

    /// One line of bank state for diagnostics.
    fn describe(&self) -> String {
        format!(
            "{}: ROM bank {}, RAM bank {}",
            self.name(),
            self.current_rom_bank(),
            self.current_ram_bank()
        )
    }
}

dyn_clone::clone_trait_object!(Mapper);

/// ROM and RAM backing storage shared by every controller.
#[derive(Clone)]
pub struct Storage {
    pub rom: Vec<u8>,
    pub rom_banks: usize,
    pub ram: Vec<u8>,
    pub ram_layout: RamLayout,
}

impl Storage {
    /// Pads the ROM with $FF up to the size the header declares (never truncates)
    /// and allocates zeroed RAM.
    pub fn new(mut rom: Vec<u8>, header: &Header) -> Result<Storage, DmgError> {
        let rom_banks = header.rom_banks()?;
        let ram_layout = header.ram_layout()?;

        let size = (rom_banks * ROM_BANK_SIZE).max(rom.len());
        rom.resize(size, 0xff);

        Ok(Storage {
            rom,
            rom_banks,
            ram: vec![0; ram_layout.size],
            ram_layout,
        })
    }

    #[inline]
    pub fn rom_at(&self, offset: usize) -> u8 {
        self.rom.get(offset).copied().unwrap_or(0xff)
    }

    /// Replaces RAM contents, keeping the allocated size.
    pub fn load_ram(&mut self, ram: Vec<u8>) {
        let len = self.ram.len().min(ram.len());
        self.ram[..len].copy_from_slice(&ram[..len]);
    }
}

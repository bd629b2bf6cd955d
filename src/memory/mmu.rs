use crate::error::DmgError;
use crate::memory::component::{Components, MmioRange};
use crate::memory::ram::Ram;
use crate::memory::{
    INTERRUPT_ENABLE_REGISTER, INTERRUPT_FLAGS_REGISTER, OAM_DMA_REGISTER, OAM_SIZE, OAM_START, VRAM_START,
};

/// The CPU's view of the address space: mapped components first, flat RAM as
/// the fallback.
#[derive(Clone)]
pub struct Mmu {
    ram: Ram,
    components: Components,
    ranges: Vec<MmioRange>,
}

impl Mmu {
    pub fn new(ram: Ram, components: Components) -> Result<Mmu, DmgError> {
        let ranges = components.mapped_ranges()?;
        Ok(Mmu {
            ram,
            components,
            ranges,
        })
    }

    /// First matching range wins; a component that declines falls back to RAM.
    pub fn read(&self, addr: u16) -> u8 {
        if let Some(range) = self.ranges.iter().find(|range| range.contains(addr)) {
            if let Some(value) = self.components.get(range.owner()).mmio_read(addr, &self.ram) {
                return value;
            }
        }

        match addr {
            INTERRUPT_FLAGS_REGISTER | INTERRUPT_ENABLE_REGISTER => self.ram.direct_read(addr) | 0xe0,
            _ => self.ram.direct_read(addr),
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        if let Some(range) = self.ranges.iter().find(|range| range.contains(addr)) {
            if self.components.get_mut(range.owner()).mmio_write(addr, value, &mut self.ram) {
                return;
            }
        }

        // Unclaimed writes into the ROM area go nowhere
        if addr >= VRAM_START {
            self.ram.direct_write(addr, value);
        }

        if addr == OAM_DMA_REGISTER {
            self.oam_dma(value);
        }
    }

    pub fn read16(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Advances every clocked component by `clocks`.
    #[inline]
    pub fn update(&mut self, clocks: u32) {
        self.components.update(clocks, &mut self.ram);
    }

    /// Copies 160 bytes from `page << 8` into OAM in one go.
    fn oam_dma(&mut self, page: u8) {
        let source = (page as u16) << 8;
        for offset in 0..OAM_SIZE {
            let value = self.read(source.wrapping_add(offset));
            self.ram.direct_write(OAM_START + offset, value);
        }
    }

    #[inline]
    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    #[inline]
    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }

    #[inline]
    pub fn components(&self) -> &Components {
        &self.components
    }

    #[inline]
    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    #[inline]
    pub fn mapped_ranges(&self) -> &[MmioRange] {
        &self.ranges
    }
}

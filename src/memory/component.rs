use crate::error::{DmgError, InvalidMappedRangeSnafu};
use crate::joypad::Joypad;
use crate::memory::cartridge::Cartridge;
use crate::memory::echo::EchoRam;
use crate::memory::ram::Ram;
use crate::serial::Serial;
use crate::lr35902::timer::Divider;
use crate::video::ppu::Ppu;
use snafu::ensure;

/// A device that answers for some part of the address space.
pub trait Addressable {
    /// Inclusive address ranges this device claims.
    fn mapped_ranges(&self) -> &'static [(u16, u16)];

    /// `None` lets the access fall through to flat RAM.
    fn mmio_read(&self, addr: u16, ram: &Ram) -> Option<u8>;

    /// `false` lets the access fall through to flat RAM.
    fn mmio_write(&mut self, addr: u16, value: u8, ram: &mut Ram) -> bool;
}

/// A device that advances with system time.
pub trait Clocked {
    fn update(&mut self, clocks: u32, ram: &mut Ram);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Cartridge,
    Ppu,
    Divider,
    Serial,
    Joypad,
    EchoRam,
}

impl ComponentId {
    /// Registration order. Range lookup and clocking both follow it.
    pub const ALL: [ComponentId; 6] = [
        ComponentId::Cartridge,
        ComponentId::Ppu,
        ComponentId::Divider,
        ComponentId::Serial,
        ComponentId::Joypad,
        ComponentId::EchoRam,
    ];
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ComponentId::Cartridge => write!(f, "CARTRIDGE"),
            ComponentId::Ppu => write!(f, "PPU"),
            ComponentId::Divider => write!(f, "DIVIDER"),
            ComponentId::Serial => write!(f, "SERIAL"),
            ComponentId::Joypad => write!(f, "JOYPAD"),
            ComponentId::EchoRam => write!(f, "ECHO RAM"),
        }
    }
}

/// An inclusive address range and the component that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmioRange {
    low: u16,
    high: u16,
    owner: ComponentId,
}

impl MmioRange {
    pub fn new(low: u16, high: u16, owner: ComponentId) -> Result<MmioRange, DmgError> {
        ensure!(low <= high, InvalidMappedRangeSnafu { low, high });
        Ok(MmioRange { low, high, owner })
    }

    #[inline]
    pub fn contains(&self, addr: u16) -> bool {
        addr >= self.low && addr <= self.high
    }

    #[inline]
    pub fn low(&self) -> u16 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> u16 {
        self.high
    }

    #[inline]
    pub fn owner(&self) -> ComponentId {
        self.owner
    }
}

impl std::fmt::Display for MmioRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:04X}-{:04X}", self.low, self.high)
    }
}

/// Every device on the board, addressed by `ComponentId`.
#[derive(Clone)]
pub struct Components {
    pub cartridge: Cartridge,
    pub ppu: Ppu,
    pub divider: Divider,
    pub serial: Serial,
    pub joypad: Joypad,
    pub echo_ram: EchoRam,
}

impl Components {
    pub fn new(cartridge: Cartridge) -> Components {
        Components {
            cartridge,
            ppu: Ppu::new(),
            divider: Divider::new(),
            serial: Serial::new(),
            joypad: Joypad::new(),
            echo_ram: EchoRam,
        }
    }

    pub fn get(&self, id: ComponentId) -> &dyn Addressable {
        match id {
            ComponentId::Cartridge => &self.cartridge,
            ComponentId::Ppu => &self.ppu,
            ComponentId::Divider => &self.divider,
            ComponentId::Serial => &self.serial,
            ComponentId::Joypad => &self.joypad,
            ComponentId::EchoRam => &self.echo_ram,
        }
    }

    pub fn get_mut(&mut self, id: ComponentId) -> &mut dyn Addressable {
        match id {
            ComponentId::Cartridge => &mut self.cartridge,
            ComponentId::Ppu => &mut self.ppu,
            ComponentId::Divider => &mut self.divider,
            ComponentId::Serial => &mut self.serial,
            ComponentId::Joypad => &mut self.joypad,
            ComponentId::EchoRam => &mut self.echo_ram,
        }
    }

    /// Builds the range table in registration order.
    pub fn mapped_ranges(&self) -> Result<Vec<MmioRange>, DmgError> {
        let mut ranges = Vec::new();
        for id in ComponentId::ALL {
            for &(low, high) in self.get(id).mapped_ranges() {
                ranges.push(MmioRange::new(low, high, id)?);
            }
        }
        Ok(ranges)
    }

    /// Advances every clocked device, in registration order.
    pub fn update(&mut self, clocks: u32, ram: &mut Ram) {
        self.cartridge.update(clocks, ram);
        self.ppu.update(clocks, ram);
        self.divider.update(clocks, ram);
        self.serial.update(clocks, ram);
        self.joypad.update(clocks, ram);
    }
}

use crate::config::BoardConfig;
use crate::error::DmgError;
use crate::joypad::Joypad;
use crate::lr35902::cpu::Cpu;
use crate::lr35902::irq::InterruptService;
use crate::memory::cartridge::Cartridge;
use crate::memory::component::{Components, MmioRange};
use crate::memory::mmu::Mmu;
use crate::memory::ram::Ram;
use crate::serial::Serial;
use crate::video::ppu::Ppu;
use log::info;

/// A DMG: the CPU plus everything reachable through its bus.
#[derive(Clone)]
pub struct Board {
    cpu: Cpu,
    mmu: Mmu,
}

impl Board {
    pub fn new(cartridge: Cartridge) -> Result<Board, DmgError> {
        Board::with_config(cartridge, BoardConfig::default())
    }

    pub fn with_config(cartridge: Cartridge, config: BoardConfig) -> Result<Board, DmgError> {
        info!("Board: Powering on with {}", cartridge);

        let ram = Ram::new(config.power_on);
        let mmu = Mmu::new(ram, Components::new(cartridge))?;
        let mut board = Board { cpu: Cpu::new(), mmu };

        InterruptService::service(&mut board.cpu, &mut board.mmu);
        Ok(board)
    }

    /// One machine cycle for every clocked component.
    pub fn advance_system_time(&mut self) {
        self.cpu.tick(&mut self.mmu);
    }

    /// One CPU step: an instruction (or a halted cycle) plus interrupt servicing.
    pub fn run(&mut self) -> Result<(), DmgError> {
        self.cpu.step(&mut self.mmu)
    }

    /// Steps until the PPU reports end of frame and returns the 160x144 shade buffer.
    pub fn run_one_frame(&mut self) -> Result<Vec<u8>, DmgError> {
        while !self.mmu.components().ppu.check_end_of_frame() {
            self.run()?;
        }
        Ok(self.mmu.components_mut().ppu.draw())
    }

    #[inline]
    pub fn components(&self) -> &Components {
        self.mmu.components()
    }

    #[inline]
    pub fn components_mut(&mut self) -> &mut Components {
        self.mmu.components_mut()
    }

    #[inline]
    pub fn mapped_ranges(&self) -> &[MmioRange] {
        self.mmu.mapped_ranges()
    }

    #[inline]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    #[inline]
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    #[inline]
    pub fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    #[inline]
    pub fn mmu_mut(&mut self) -> &mut Mmu {
        &mut self.mmu
    }

    #[inline]
    pub fn ppu(&self) -> &Ppu {
        &self.mmu.components().ppu
    }

    #[inline]
    pub fn joypad_mut(&mut self) -> &mut Joypad {
        &mut self.mmu.components_mut().joypad
    }

    #[inline]
    pub fn serial(&self) -> &Serial {
        &self.mmu.components().serial
    }

    #[inline]
    pub fn serial_mut(&mut self) -> &mut Serial {
        &mut self.mmu.components_mut().serial
    }

    #[inline]
    pub fn cartridge(&self) -> &Cartridge {
        &self.mmu.components().cartridge
    }
}

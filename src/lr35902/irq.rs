use crate::lr35902::cpu::Cpu;
use crate::memory::mmu::Mmu;
use crate::memory::registers::InterruptFlags;
use crate::memory::{INTERRUPT_ENABLE_REGISTER, INTERRUPT_FLAGS_REGISTER};
use log::trace;

#[derive(Debug, Clone, Default)]
pub struct Ime {
    pub enabled: bool,
    /// Set by EI, applied at the end of the next service routine call.
    pub enable_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vector {
    VBlank,
    Stat,
    Timer,
    Serial,
    Joypad,
}

impl Vector {
    const fn from_bit(bit: u32) -> Vector {
        match bit {
            0 => Vector::VBlank,
            1 => Vector::Stat,
            2 => Vector::Timer,
            3 => Vector::Serial,
            _ => Vector::Joypad,
        }
    }

    pub fn to_address(&self) -> u16 {
        match self {
            Vector::VBlank => 0x0040,
            Vector::Stat => 0x0048,
            Vector::Timer => 0x0050,
            Vector::Serial => 0x0058,
            Vector::Joypad => 0x0060,
        }
    }

    pub fn mask(&self) -> InterruptFlags {
        match self {
            Vector::VBlank => InterruptFlags::VBLANK,
            Vector::Stat => InterruptFlags::LCD_STAT,
            Vector::Timer => InterruptFlags::TIMER,
            Vector::Serial => InterruptFlags::SERIAL,
            Vector::Joypad => InterruptFlags::JOYPAD,
        }
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Vector::VBlank => write!(f, "VBLANK"),
            Vector::Stat => write!(f, "STAT"),
            Vector::Timer => write!(f, "TIMER"),
            Vector::Serial => write!(f, "SERIAL"),
            Vector::Joypad => write!(f, "JOYPAD"),
        }
    }
}

/// Highest priority (lowest bit) interrupt for every 5-bit `IF & IE` value.
const PRIORITY: [Option<Vector>; 32] = {
    let mut table = [None; 32];
    let mut pending = 1;
    while pending < 32 {
        table[pending] = Some(Vector::from_bit((pending as u32).trailing_zeros()));
        pending += 1;
    }
    table
};

pub struct InterruptService;

impl InterruptService {
    /// The interrupt that would be serviced right now, regardless of IME.
    pub fn pending(mmu: &Mmu) -> Option<Vector> {
        let requested = mmu.ram().direct_read(INTERRUPT_FLAGS_REGISTER);
        let enabled = mmu.ram().direct_read(INTERRUPT_ENABLE_REGISTER);
        PRIORITY[(requested & enabled & 0x1f) as usize]
    }

    /// Runs once after every instruction (and once at power on).
    pub fn service(cpu: &mut Cpu, mmu: &mut Mmu) {
        match InterruptService::pending(mmu) {
            Some(vector) if cpu.ime.enabled => {
                cpu.tick(mmu);
                cpu.tick(mmu);
                let pc = cpu.registers.pc;
                cpu.push(mmu, pc);
                cpu.jump(vector.to_address());

                cpu.tick(mmu);
                // Peripherals may have raised more flags during the push
                let requested = mmu.ram().direct_read(INTERRUPT_FLAGS_REGISTER);
                mmu.ram_mut()
                    .direct_write(INTERRUPT_FLAGS_REGISTER, requested & !vector.mask().bits());

                if cpu.halted {
                    cpu.tick(mmu);
                    cpu.halted = false;
                }
                cpu.ime.enabled = false;

                trace!("IRQ: Serviced {} -> ${:04x}", vector, vector.to_address());
            }
            Some(_) if cpu.halted => {
                // Waking from HALT with IME clear re-reads the next opcode
                cpu.tick(mmu);
                cpu.halted = false;
                cpu.double_fetch_bug = cpu.double_instruction_enable;
                cpu.double_instruction_enable = true;
            }
            None if !cpu.ime.enabled => cpu.double_instruction_enable = false,
            _ => {}
        }

        if cpu.ime.enable_pending {
            cpu.ime.enabled = true;
            cpu.ime.enable_pending = false;
        }
    }
}

use crate::error::DmgError;
use crate::lr35902::handlers::ControlUnit;
use crate::lr35902::irq::{Ime, InterruptService};
use crate::lr35902::registers::{Flags, Registers};
use crate::lr35902::sm83::{Condition, Operand8, Register, Register16, Sm83};
use crate::lr35902::CLOCKS_PER_TICK;
use crate::memory::mmu::Mmu;
use log::trace;

#[derive(Clone)]
pub struct Cpu {
    pub(crate) registers: Registers,
    pub(crate) ime: Ime,
    pub(crate) halted: bool,
    /// Armed when HALT is left with IME clear while an interrupt was already pending.
    pub(crate) double_fetch_bug: bool,
    pub(crate) double_instruction_enable: bool,
    bug_count: u8,
    cycles: u64,
}

impl Default for Cpu {
    fn default() -> Cpu {
        Cpu::new()
    }
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu {
            registers: Registers::default(),
            ime: Ime::default(),
            halted: false,
            double_fetch_bug: false,
            double_instruction_enable: true,
            bug_count: 2,
            cycles: 0,
        }
    }

    /// One machine cycle: every peripheral sees 4 clocks before the access that follows.
    pub fn tick(&mut self, mmu: &mut Mmu) {
        mmu.update(CLOCKS_PER_TICK);
        self.quirk();
        self.cycles += 1;
    }

    /// Fetches and executes one instruction (or idles one cycle while halted),
    /// then runs the interrupt service routine.
    pub fn step(&mut self, mmu: &mut Mmu) -> Result<(), DmgError> {
        self.tick(mmu);

        if !self.halted {
            let opcode = mmu.read(self.registers.pc);
            trace!("[{:#06x}] {:<12} {}", self.registers.pc, Sm83::disassemble(opcode), self);
            ControlUnit::execute(self, mmu, opcode)?;
        }

        InterruptService::service(self, mmu);
        Ok(())
    }

    /// Rewinds PC once the re-fetch of the HALT bug comes due.
    fn quirk(&mut self) {
        if !self.double_fetch_bug {
            return;
        }

        self.bug_count -= 1;
        if self.bug_count == 0 {
            self.registers.pc = self.registers.pc.wrapping_sub(1);
            self.double_fetch_bug = false;
            self.bug_count = 2;
        }
    }

    #[inline]
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    #[inline]
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    #[inline]
    pub fn ime(&self) -> bool {
        self.ime.enabled
    }

    pub fn set_ime(&mut self, enabled: bool) {
        self.ime.enabled = enabled;
        self.ime.enable_pending = false;
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    #[inline]
    pub fn is_double_fetch_armed(&self) -> bool {
        self.double_fetch_bug
    }

    /// Machine cycles elapsed since power on.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn read_register(&self, register: Register) -> u8 {
        match register {
            Register::A => self.registers.a(),
            Register::B => self.registers.b(),
            Register::C => self.registers.c(),
            Register::D => self.registers.d(),
            Register::E => self.registers.e(),
            Register::H => self.registers.h(),
            Register::L => self.registers.l(),
            Register::F => self.registers.f(),
        }
    }

    pub fn write_register(&mut self, register: Register, data: u8) {
        match register {
            Register::A => self.registers.set_a(data),
            Register::B => self.registers.set_b(data),
            Register::C => self.registers.set_c(data),
            Register::D => self.registers.set_d(data),
            Register::E => self.registers.set_e(data),
            Register::H => self.registers.set_h(data),
            Register::L => self.registers.set_l(data),
            Register::F => self.registers.set_f(data),
        }
    }

    pub fn read_register16(&self, register: Register16) -> u16 {
        match register {
            Register16::AF => self.registers.af(),
            Register16::BC => self.registers.bc(),
            Register16::DE => self.registers.de(),
            Register16::HL => self.registers.hl(),
            Register16::SP => self.registers.sp,
            Register16::PC => self.registers.pc,
        }
    }

    pub fn write_register16(&mut self, register: Register16, value: u16) {
        match register {
            Register16::AF => self.registers.set_af(value),
            Register16::BC => self.registers.set_bc(value),
            Register16::DE => self.registers.set_de(value),
            Register16::HL => self.registers.set_hl(value),
            Register16::SP => self.registers.sp = value,
            Register16::PC => self.registers.pc = value,
        }
    }

    pub(crate) fn check_condition(&self, condition: Condition) -> bool {
        match condition {
            Condition::None => true,
            Condition::NZ => !self.registers.flag(Flags::ZERO),
            Condition::Z => self.registers.flag(Flags::ZERO),
            Condition::NC => !self.registers.flag(Flags::CARRY),
            Condition::C => self.registers.flag(Flags::CARRY),
        }
    }

    /// Runs `f` against a copy of F and stores the result back.
    pub(crate) fn with_flags<T>(&mut self, f: impl FnOnce(&mut Flags) -> T) -> T {
        let mut flags = self.registers.flags();
        let result = f(&mut flags);
        self.registers.set_flags(flags);
        result
    }

    #[inline]
    pub(crate) fn advance_pc(&mut self) {
        self.registers.pc = self.registers.pc.wrapping_add(1);
    }

    #[inline]
    pub(crate) fn jump(&mut self, address: u16) {
        self.registers.pc = address;
    }

    /// Reads the byte after PC, leaving PC on it.
    pub(crate) fn fetch_operand(&mut self, mmu: &mut Mmu) -> u8 {
        self.tick(mmu);
        self.advance_pc();
        mmu.read(self.registers.pc)
    }

    pub(crate) fn fetch_operand16(&mut self, mmu: &mut Mmu) -> u16 {
        let low = self.fetch_operand(mmu) as u16;
        let high = self.fetch_operand(mmu) as u16;
        (high << 8) | low
    }

    pub(crate) fn read_cycle(&mut self, mmu: &mut Mmu, address: u16) -> u8 {
        self.tick(mmu);
        mmu.read(address)
    }

    pub(crate) fn write_cycle(&mut self, mmu: &mut Mmu, address: u16, value: u8) {
        self.tick(mmu);
        mmu.write(address, value);
    }

    /// High byte first, pre-decrementing SP.
    pub(crate) fn push(&mut self, mmu: &mut Mmu, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.registers.sp = self.registers.sp.wrapping_sub(1);
        self.write_cycle(mmu, self.registers.sp, high);
        self.registers.sp = self.registers.sp.wrapping_sub(1);
        self.write_cycle(mmu, self.registers.sp, low);
    }

    /// Low byte first, post-incrementing SP.
    pub(crate) fn pop(&mut self, mmu: &mut Mmu) -> u16 {
        let low = self.read_cycle(mmu, self.registers.sp);
        self.registers.sp = self.registers.sp.wrapping_add(1);
        let high = self.read_cycle(mmu, self.registers.sp);
        self.registers.sp = self.registers.sp.wrapping_add(1);
        u16::from_le_bytes([low, high])
    }

    pub(crate) fn read_operand8(&mut self, mmu: &mut Mmu, operand: Operand8) -> u8 {
        match operand {
            Operand8::Reg(register) => self.read_register(register),
            Operand8::IndirectHl => self.read_cycle(mmu, self.registers.hl()),
        }
    }

    pub(crate) fn write_operand8(&mut self, mmu: &mut Mmu, operand: Operand8, value: u8) {
        match operand {
            Operand8::Reg(register) => self.write_register(register, value),
            Operand8::IndirectHl => self.write_cycle(mmu, self.registers.hl(), value),
        }
    }
}

impl std::fmt::Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "A: ${:02x}  F: ${:02x}  B: ${:02x}  C: ${:02x}  D: ${:02x}  E: ${:02x}  H: ${:02x}  L: ${:02x}  SP: ${:04x}  PC: ${:04x}  IME: {}  HALT: {}",
            self.registers.a(),
            self.registers.f(),
            self.registers.b(),
            self.registers.c(),
            self.registers.d(),
            self.registers.e(),
            self.registers.h(),
            self.registers.l(),
            self.registers.sp,
            self.registers.pc,
            self.ime.enabled as u8,
            self.halted as u8
        )
    }
}

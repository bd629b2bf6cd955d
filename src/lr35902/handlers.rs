use crate::error::{DmgError, UnknownOpcodeSnafu};
use crate::lr35902::alu;
use crate::lr35902::cpu::Cpu;
use crate::lr35902::sm83::{Condition, Sm83};
use crate::memory::mmu::Mmu;
use log::trace;

/// Executes decoded opcodes against the CPU. Every memory access inside an
/// instruction is preceded by one `Cpu::tick`.
pub struct ControlUnit;

impl ControlUnit {
    /// Runs the instruction at PC whose first byte is `opcode`. On return PC
    /// points at the next instruction.
    pub fn execute(cpu: &mut Cpu, mmu: &mut Mmu, opcode: u8) -> Result<(), DmgError> {
        let y = (opcode >> 3) & 7;
        let z = opcode & 7;
        let p = y >> 1;

        match opcode {
            0x00 => {}
            0x08 => {
                let address = cpu.fetch_operand16(mmu);
                let [low, high] = cpu.registers.sp.to_le_bytes();
                cpu.write_cycle(mmu, address, low);
                cpu.write_cycle(mmu, address.wrapping_add(1), high);
            }
            0x10 => {
                // STOP is not modeled beyond skipping its padding byte
                cpu.advance_pc();
            }
            0x18 | 0x20 | 0x28 | 0x30 | 0x38 => {
                let condition = if opcode == 0x18 {
                    Condition::None
                } else {
                    Sm83::lookup_condition(y)
                };
                let offset = cpu.fetch_operand(mmu) as i8;
                if cpu.check_condition(condition) {
                    cpu.tick(mmu);
                    cpu.jump(cpu.registers.pc.wrapping_add_signed(offset as i16));
                }
            }
            0x01 | 0x11 | 0x21 | 0x31 => {
                let value = cpu.fetch_operand16(mmu);
                cpu.write_register16(Sm83::lookup_register16(p), value);
            }
            0x09 | 0x19 | 0x29 | 0x39 => {
                cpu.tick(mmu);
                let hl = cpu.registers.hl();
                let value = cpu.read_register16(Sm83::lookup_register16(p));
                let result = cpu.with_flags(|flags| alu::add16(flags, hl, value));
                cpu.registers.set_hl(result);
            }
            0x02 | 0x12 | 0x22 | 0x32 => {
                let address = ControlUnit::indirect_address(cpu, p);
                cpu.write_cycle(mmu, address, cpu.registers.a());
            }
            0x0a | 0x1a | 0x2a | 0x3a => {
                let address = ControlUnit::indirect_address(cpu, p);
                let value = cpu.read_cycle(mmu, address);
                cpu.registers.set_a(value);
            }
            0x03 | 0x13 | 0x23 | 0x33 => {
                cpu.tick(mmu);
                let register = Sm83::lookup_register16(p);
                cpu.write_register16(register, alu::inc16(cpu.read_register16(register)));
            }
            0x0b | 0x1b | 0x2b | 0x3b => {
                cpu.tick(mmu);
                let register = Sm83::lookup_register16(p);
                cpu.write_register16(register, alu::dec16(cpu.read_register16(register)));
            }
            0x04 | 0x0c | 0x14 | 0x1c | 0x24 | 0x2c | 0x34 | 0x3c => {
                let operand = Sm83::lookup_operand(y);
                let value = cpu.read_operand8(mmu, operand);
                let result = cpu.with_flags(|flags| alu::inc8(flags, value));
                cpu.write_operand8(mmu, operand, result);
            }
            0x05 | 0x0d | 0x15 | 0x1d | 0x25 | 0x2d | 0x35 | 0x3d => {
                let operand = Sm83::lookup_operand(y);
                let value = cpu.read_operand8(mmu, operand);
                let result = cpu.with_flags(|flags| alu::dec8(flags, value));
                cpu.write_operand8(mmu, operand, result);
            }
            0x06 | 0x0e | 0x16 | 0x1e | 0x26 | 0x2e | 0x36 | 0x3e => {
                let value = cpu.fetch_operand(mmu);
                cpu.write_operand8(mmu, Sm83::lookup_operand(y), value);
            }
            0x07 | 0x0f | 0x17 | 0x1f | 0x27 | 0x2f | 0x37 | 0x3f => {
                let a = cpu.registers.a();
                let result = cpu.with_flags(|flags| match y {
                    0 => alu::rlca(flags, a),
                    1 => alu::rrca(flags, a),
                    2 => alu::rla(flags, a),
                    3 => alu::rra(flags, a),
                    4 => alu::daa(flags, a),
                    5 => alu::cpl(flags, a),
                    6 => {
                        alu::scf(flags);
                        a
                    }
                    _ => {
                        alu::ccf(flags);
                        a
                    }
                });
                cpu.registers.set_a(result);
            }
            0x76 => cpu.halted = true,
            0x40..=0x7f => {
                let value = cpu.read_operand8(mmu, Sm83::lookup_operand(z));
                cpu.write_operand8(mmu, Sm83::lookup_operand(y), value);
            }
            0x80..=0xbf => {
                let value = cpu.read_operand8(mmu, Sm83::lookup_operand(z));
                ControlUnit::accumulate(cpu, y, value);
            }
            0xc0 | 0xc8 | 0xd0 | 0xd8 => {
                cpu.tick(mmu);
                if cpu.check_condition(Sm83::lookup_condition(y)) {
                    let address = cpu.pop(mmu);
                    cpu.tick(mmu);
                    cpu.jump(address);
                    return Ok(());
                }
            }
            0xc9 | 0xd9 => {
                let address = cpu.pop(mmu);
                cpu.tick(mmu);
                cpu.jump(address);
                if opcode == 0xd9 {
                    cpu.ime.enabled = true;
                }
                return Ok(());
            }
            0xc1 | 0xd1 | 0xe1 | 0xf1 => {
                let value = cpu.pop(mmu);
                cpu.write_register16(Sm83::lookup_register16_stack(p), value);
            }
            0xc5 | 0xd5 | 0xe5 | 0xf5 => {
                cpu.tick(mmu);
                let value = cpu.read_register16(Sm83::lookup_register16_stack(p));
                cpu.push(mmu, value);
            }
            0xc2 | 0xca | 0xd2 | 0xda | 0xc3 => {
                let condition = if opcode == 0xc3 {
                    Condition::None
                } else {
                    Sm83::lookup_condition(y)
                };
                let address = cpu.fetch_operand16(mmu);
                if cpu.check_condition(condition) {
                    cpu.tick(mmu);
                    cpu.jump(address);
                    return Ok(());
                }
            }
            0xc4 | 0xcc | 0xd4 | 0xdc | 0xcd => {
                let condition = if opcode == 0xcd {
                    Condition::None
                } else {
                    Sm83::lookup_condition(y)
                };
                let address = cpu.fetch_operand16(mmu);
                if cpu.check_condition(condition) {
                    cpu.tick(mmu);
                    cpu.advance_pc();
                    let pc = cpu.registers.pc;
                    cpu.push(mmu, pc);
                    cpu.jump(address);
                    return Ok(());
                }
            }
            0xc6 | 0xce | 0xd6 | 0xde | 0xe6 | 0xee | 0xf6 | 0xfe => {
                let value = cpu.fetch_operand(mmu);
                ControlUnit::accumulate(cpu, y, value);
            }
            0xc7 | 0xcf | 0xd7 | 0xdf | 0xe7 | 0xef | 0xf7 | 0xff => {
                cpu.tick(mmu);
                cpu.advance_pc();
                let pc = cpu.registers.pc;
                cpu.push(mmu, pc);
                cpu.jump((y as u16) << 3);
                return Ok(());
            }
            0xcb => {
                cpu.tick(mmu);
                cpu.advance_pc();
                let prefixed = mmu.read(cpu.registers.pc);
                trace!("CB: {}", Sm83::disassemble_prefixed(prefixed));
                ControlUnit::execute_prefixed(cpu, mmu, prefixed);
            }
            0xe0 => {
                let offset = cpu.fetch_operand(mmu);
                cpu.write_cycle(mmu, 0xff00 | offset as u16, cpu.registers.a());
            }
            0xf0 => {
                let offset = cpu.fetch_operand(mmu);
                let value = cpu.read_cycle(mmu, 0xff00 | offset as u16);
                cpu.registers.set_a(value);
            }
            0xe2 => cpu.write_cycle(mmu, 0xff00 | cpu.registers.c() as u16, cpu.registers.a()),
            0xf2 => {
                let value = cpu.read_cycle(mmu, 0xff00 | cpu.registers.c() as u16);
                cpu.registers.set_a(value);
            }
            0xea => {
                let address = cpu.fetch_operand16(mmu);
                cpu.write_cycle(mmu, address, cpu.registers.a());
            }
            0xfa => {
                let address = cpu.fetch_operand16(mmu);
                let value = cpu.read_cycle(mmu, address);
                cpu.registers.set_a(value);
            }
            0xe8 => {
                let offset = cpu.fetch_operand(mmu) as i8;
                let sp = cpu.registers.sp;
                let result = cpu.with_flags(|flags| alu::add_sp_offset(flags, sp, offset));
                cpu.tick(mmu);
                cpu.tick(mmu);
                cpu.registers.sp = result;
            }
            0xf8 => {
                let offset = cpu.fetch_operand(mmu) as i8;
                let sp = cpu.registers.sp;
                let result = cpu.with_flags(|flags| alu::add_sp_offset(flags, sp, offset));
                cpu.tick(mmu);
                cpu.registers.set_hl(result);
            }
            0xe9 => {
                cpu.jump(cpu.registers.hl());
                return Ok(());
            }
            0xf9 => {
                cpu.tick(mmu);
                cpu.registers.sp = cpu.registers.hl();
            }
            0xf3 => cpu.set_ime(false),
            0xfb => cpu.ime.enable_pending = true,
            // 0xd3, 0xdb, 0xdd, 0xe3, 0xe4, 0xeb, 0xec, 0xed, 0xf4, 0xfc, 0xfd
            _ => {
                return UnknownOpcodeSnafu {
                    opcode,
                    address: cpu.registers.pc,
                }
                .fail();
            }
        }

        cpu.advance_pc();
        Ok(())
    }

    fn execute_prefixed(cpu: &mut Cpu, mmu: &mut Mmu, opcode: u8) {
        let y = (opcode >> 3) & 7;
        let operand = Sm83::lookup_operand(opcode);
        let value = cpu.read_operand8(mmu, operand);

        let result = match opcode >> 6 {
            0 => cpu.with_flags(|flags| match y {
                0 => alu::rlc(flags, value),
                1 => alu::rrc(flags, value),
                2 => alu::rl(flags, value),
                3 => alu::rr(flags, value),
                4 => alu::sla(flags, value),
                5 => alu::sra(flags, value),
                6 => alu::swap(flags, value),
                _ => alu::srl(flags, value),
            }),
            1 => {
                cpu.with_flags(|flags| alu::bit(flags, y, value));
                return;
            }
            2 => alu::res(y, value),
            _ => alu::set(y, value),
        };

        cpu.write_operand8(mmu, operand, result);
    }

    /// The eight accumulator operations selected by bits 3-5 of the opcode.
    fn accumulate(cpu: &mut Cpu, operation: u8, value: u8) {
        let a = cpu.registers.a();
        let result = cpu.with_flags(|flags| match operation {
            0 => alu::add8(flags, a, value),
            1 => alu::adc8(flags, a, value),
            2 => alu::sub8(flags, a, value),
            3 => alu::sbc8(flags, a, value),
            4 => alu::and8(flags, a, value),
            5 => alu::xor8(flags, a, value),
            6 => alu::or8(flags, a, value),
            _ => {
                alu::cp8(flags, a, value);
                a
            }
        });
        cpu.registers.set_a(result);
    }

    /// (BC), (DE), (HL+), (HL-): returns the address, post-adjusting HL.
    fn indirect_address(cpu: &mut Cpu, index: u8) -> u16 {
        match index {
            0 => cpu.registers.bc(),
            1 => cpu.registers.de(),
            2 => {
                let hl = cpu.registers.hl();
                cpu.registers.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = cpu.registers.hl();
                cpu.registers.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }
}

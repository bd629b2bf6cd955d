mod alu;
mod board;
mod joypad;
mod mapper;
mod serial;
mod sm83;

use crate::board::Board;
use crate::config::{BoardConfig, PowerOnState};
use crate::lr35902::cpu::Cpu;
use crate::memory::cartridge::Cartridge;
use crate::memory::component::Components;
use crate::memory::header::Header;
use crate::memory::mmu::Mmu;
use crate::memory::ram::Ram;
use crate::memory::ROM_BANK_SIZE;

/// Offset inside every bank that holds the bank number.
pub const BANK_MARKER: usize = 0x1000;
/// Work RAM address test programs are loaded at.
pub const PROGRAM_START: u16 = 0xc000;

/// A ROM image with a valid header, one marker byte per bank and `JR -2` at
/// the entry point.
pub fn build_rom(cartridge_type: u8, rom_size: u8, ram_size: u8) -> Vec<u8> {
    let banks = 2usize << rom_size;
    let mut rom = vec![0u8; banks * ROM_BANK_SIZE];
    for bank in 0..banks {
        rom[bank * ROM_BANK_SIZE + BANK_MARKER] = bank as u8;
    }

    rom[0x100] = 0x18;
    rom[0x101] = 0xfe;
    rom[0x134..0x134 + 7].copy_from_slice(b"TESTROM");
    rom[0x147] = cartridge_type;
    rom[0x148] = rom_size;
    rom[0x149] = ram_size;
    rom[0x14d] = Header::compute_checksum(&rom);
    rom
}

pub fn rom_only() -> Cartridge {
    Cartridge::from_bytes(build_rom(0x00, 0x00, 0x00)).unwrap()
}

/// A bare CPU and bus with zeroed memory.
pub fn machine() -> (Cpu, Mmu) {
    let mmu = Mmu::new(Ram::new(PowerOnState::Zeroed), Components::new(rom_only())).unwrap();
    (Cpu::new(), mmu)
}

/// Copies `program` to work RAM and points PC at it.
pub fn load_program(cpu: &mut Cpu, mmu: &mut Mmu, program: &[u8]) {
    for (offset, &byte) in program.iter().enumerate() {
        mmu.write(PROGRAM_START + offset as u16, byte);
    }
    cpu.registers_mut().pc = PROGRAM_START;
    cpu.registers_mut().sp = 0xd000;
}

pub fn test_board() -> Board {
    Board::with_config(rom_only(), BoardConfig::zeroed()).unwrap()
}

pub fn board_with_program(program: &[u8]) -> Board {
    let mut board = test_board();
    for (offset, &byte) in program.iter().enumerate() {
        board.mmu_mut().write(PROGRAM_START + offset as u16, byte);
    }
    board.cpu_mut().registers_mut().pc = PROGRAM_START;
    board.cpu_mut().registers_mut().sp = 0xd000;
    board
}

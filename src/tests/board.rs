use crate::error::DmgError;
use crate::joypad::Button;
use crate::memory::registers::InterruptFlags;
use crate::memory::{INTERRUPT_FLAGS_REGISTER, JOYPAD_REGISTER};
use crate::tests::{board_with_program, test_board};
use crate::video::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[test]
fn test_run_one_frame() {
    let mut board = test_board();

    let frame = board.run_one_frame().unwrap();
    assert_eq!(frame.len(), SCREEN_WIDTH * SCREEN_HEIGHT);
    assert!(!board.ppu().check_end_of_frame());

    let start = board.cpu().cycles();
    let frame = board.run_one_frame().unwrap();
    let elapsed = board.cpu().cycles() - start;
    assert_eq!(frame.len(), SCREEN_WIDTH * SCREEN_HEIGHT);
    assert!((17_553..=17_559).contains(&elapsed), "Frame took {} machine cycles", elapsed);
}

#[test]
fn test_frame_with_display_off() {
    // LD A,$00 ; LDH ($40),A ; JR -2
    let mut board = board_with_program(&[0x3e, 0x00, 0xe0, 0x40, 0x18, 0xfe]);

    let frame = board.run_one_frame().unwrap();
    assert!(!board.ppu().is_display_enabled());
    assert!(frame.iter().all(|&shade| shade == 0));

    let start = board.cpu().cycles();
    board.run_one_frame().unwrap();
    let elapsed = board.cpu().cycles() - start;
    assert!((17_553..=17_559).contains(&elapsed), "Frame took {} machine cycles", elapsed);
}

#[test]
fn test_advance_system_time() {
    let mut board = test_board();
    let start = board.cpu().cycles();
    let pc = board.cpu().registers().pc;

    board.advance_system_time();
    assert_eq!(board.cpu().cycles(), start + 1);
    assert_eq!(board.cpu().registers().pc, pc);
}

#[test]
fn test_unknown_opcode_stops_emulation() {
    let mut board = board_with_program(&[0xd3]);

    let error = board.run().unwrap_err();
    assert!(matches!(error, DmgError::UnknownOpcode { opcode: 0xd3, address: 0xc000 }));
    assert_eq!(format!("{}", error), "Unknown opcode (d3) at address: $c000");

    let mut board = board_with_program(&[0x00, 0xdd]);
    assert!(board.run_one_frame().is_err());
}

#[test]
fn test_serial_output() {
    // LD A,'H' ; LDH ($01),A ; LD A,$81 ; LDH ($02),A ; JR -2
    let mut board = board_with_program(&[0x3e, 0x48, 0xe0, 0x01, 0x3e, 0x81, 0xe0, 0x02, 0x18, 0xfe]);
    board.run_one_frame().unwrap();

    assert_eq!(board.serial().output_string(), "H");
    assert!(board.mmu().ram().interrupt_flags().contains(InterruptFlags::SERIAL));
}

#[test]
fn test_joypad_through_bus() {
    let mut board = test_board();
    board.mmu_mut().write(INTERRUPT_FLAGS_REGISTER, 0x00);
    board.mmu_mut().write(JOYPAD_REGISTER, 0x10);
    board.joypad_mut().press_button(Button::Start);

    assert_eq!(board.mmu().read(JOYPAD_REGISTER), 0xd7);

    board.run().unwrap();
    assert!(board.mmu().ram().interrupt_flags().contains(InterruptFlags::JOYPAD));
}

#[test]
fn test_board_keeps_cartridge() {
    let board = test_board();
    assert_eq!(board.cartridge().header().title, "TESTROM");
    assert_eq!(board.mapped_ranges().len(), board.components().mapped_ranges().unwrap().len());
}

use crate::config::PowerOnState;
use crate::joypad::{Button, Cross, Joypad};
use crate::memory::component::{Addressable, Clocked};
use crate::memory::ram::Ram;
use crate::memory::registers::InterruptFlags;
use crate::memory::{INTERRUPT_FLAGS_REGISTER, JOYPAD_REGISTER};

fn setup() -> (Joypad, Ram) {
    let mut ram = Ram::new(PowerOnState::Zeroed);
    ram.direct_write(INTERRUPT_FLAGS_REGISTER, 0x00);
    (Joypad::new(), ram)
}

#[test]
fn test_nothing_selected_reads_high() {
    let (mut joypad, ram) = setup();
    joypad.press_button(Button::A);
    joypad.press_cross(Cross::Down);
    assert_eq!(joypad.mmio_read(JOYPAD_REGISTER, &ram), Some(0xff));
}

#[test]
fn test_button_press_and_release() {
    let (mut joypad, mut ram) = setup();
    joypad.mmio_write(JOYPAD_REGISTER, 0x10, &mut ram);
    assert_eq!(joypad.mmio_read(JOYPAD_REGISTER, &ram), Some(0xdf));

    joypad.press_button(Button::A);
    assert_eq!(joypad.mmio_read(JOYPAD_REGISTER, &ram), Some(0xde));

    joypad.update(4, &mut ram);
    assert!(ram.interrupt_flags().contains(InterruptFlags::JOYPAD));

    ram.direct_write(INTERRUPT_FLAGS_REGISTER, 0x00);
    joypad.release_button(Button::A);
    joypad.update(4, &mut ram);
    assert_eq!(joypad.mmio_read(JOYPAD_REGISTER, &ram), Some(0xdf));
    assert!(!ram.interrupt_flags().contains(InterruptFlags::JOYPAD), "Releases do not interrupt");
}

#[test]
fn test_directions_are_separate_from_buttons() {
    let (mut joypad, mut ram) = setup();
    joypad.mmio_write(JOYPAD_REGISTER, 0x20, &mut ram);
    joypad.press_button(Button::Start);
    joypad.press_cross(Cross::Left);
    joypad.press_cross(Cross::Up);

    assert_eq!(joypad.mmio_read(JOYPAD_REGISTER, &ram), Some(0xe9));

    joypad.mmio_write(JOYPAD_REGISTER, 0x10, &mut ram);
    assert_eq!(joypad.mmio_read(JOYPAD_REGISTER, &ram), Some(0xd7));
}

#[test]
fn test_selecting_a_held_key_interrupts() {
    let (mut joypad, mut ram) = setup();
    joypad.press_cross(Cross::Right);
    joypad.update(4, &mut ram);
    assert!(!ram.interrupt_flags().contains(InterruptFlags::JOYPAD));

    joypad.mmio_write(JOYPAD_REGISTER, 0x20, &mut ram);
    joypad.update(4, &mut ram);
    assert!(ram.interrupt_flags().contains(InterruptFlags::JOYPAD));
}

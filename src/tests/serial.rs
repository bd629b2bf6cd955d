use crate::config::PowerOnState;
use crate::memory::component::{Addressable, Clocked};
use crate::memory::ram::Ram;
use crate::memory::registers::InterruptFlags;
use crate::memory::{INTERRUPT_FLAGS_REGISTER, SERIAL_CONTROL_REGISTER, SERIAL_DATA_REGISTER};
use crate::serial::{Serial, OUTPUT_CAPACITY};

fn setup() -> (Serial, Ram) {
    let mut ram = Ram::new(PowerOnState::Zeroed);
    ram.direct_write(INTERRUPT_FLAGS_REGISTER, 0x00);
    (Serial::new(), ram)
}

#[test]
fn test_transfer_completes_with_no_partner() {
    let (mut serial, mut ram) = setup();
    serial.mmio_write(SERIAL_DATA_REGISTER, b'H', &mut ram);
    serial.mmio_write(SERIAL_CONTROL_REGISTER, 0x81, &mut ram);
    assert_eq!(serial.output(), b"H");
    assert_eq!(serial.mmio_read(SERIAL_CONTROL_REGISTER, &ram), Some(0xfd));

    for _ in 0..1023 {
        serial.update(4, &mut ram);
    }
    assert!(!ram.interrupt_flags().contains(InterruptFlags::SERIAL));

    serial.update(4, &mut ram);
    assert!(ram.interrupt_flags().contains(InterruptFlags::SERIAL));
    assert_eq!(serial.mmio_read(SERIAL_CONTROL_REGISTER, &ram), Some(0x7d));
    assert_eq!(serial.mmio_read(SERIAL_DATA_REGISTER, &ram), Some(0xff));
}

#[test]
fn test_external_clock_does_not_send() {
    let (mut serial, mut ram) = setup();
    serial.mmio_write(SERIAL_DATA_REGISTER, b'X', &mut ram);
    serial.mmio_write(SERIAL_CONTROL_REGISTER, 0x80, &mut ram);

    for _ in 0..2048 {
        serial.update(4, &mut ram);
    }
    assert!(serial.output().is_empty());
    assert!(!ram.interrupt_flags().contains(InterruptFlags::SERIAL));
}

#[test]
fn test_output_accumulates() {
    let (mut serial, mut ram) = setup();
    for &byte in b"ok" {
        serial.mmio_write(SERIAL_DATA_REGISTER, byte, &mut ram);
        serial.mmio_write(SERIAL_CONTROL_REGISTER, 0x81, &mut ram);
        serial.update(4096, &mut ram);
    }
    assert_eq!(serial.output_string(), "ok");
}

#[test]
fn test_take_output_drains() {
    let (mut serial, mut ram) = setup();
    serial.mmio_write(SERIAL_DATA_REGISTER, b'a', &mut ram);
    serial.mmio_write(SERIAL_CONTROL_REGISTER, 0x81, &mut ram);

    assert_eq!(serial.take_output(), b"a");
    assert!(serial.output().is_empty());

    serial.update(4096, &mut ram);
    serial.mmio_write(SERIAL_DATA_REGISTER, b'b', &mut ram);
    serial.mmio_write(SERIAL_CONTROL_REGISTER, 0x81, &mut ram);
    assert_eq!(serial.take_output(), b"b");
}

#[test]
fn test_output_is_bounded() {
    let (mut serial, mut ram) = setup();
    let byte = |index: usize| (index % 251) as u8;
    for index in 0..=OUTPUT_CAPACITY {
        serial.mmio_write(SERIAL_DATA_REGISTER, byte(index), &mut ram);
        serial.mmio_write(SERIAL_CONTROL_REGISTER, 0x81, &mut ram);
    }

    let output = serial.output();
    assert_eq!(output.len(), OUTPUT_CAPACITY / 2 + 1);
    assert_eq!(output[0], byte(OUTPUT_CAPACITY / 2), "Oldest half is dropped");
    assert_eq!(output.last(), Some(&byte(OUTPUT_CAPACITY)));
}

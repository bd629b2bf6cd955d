use crate::lr35902::alu::*;
use crate::lr35902::registers::Flags;

#[test]
fn test_add8_half_carry() {
    let mut flags = Flags::empty();
    let result = add8(&mut flags, 0x0f, 0x01);
    assert_eq!(result, 0x10);
    assert_eq!(flags, Flags::HALF_CARRY, "Only H should be set after 0x0f + 0x01");
}

#[test]
fn test_add8_overflow() {
    let mut flags = Flags::empty();
    let result = add8(&mut flags, 0xff, 0x01);
    assert_eq!(result, 0x00);
    assert_eq!(flags, Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY);
}

#[test]
fn test_sub8_borrow() {
    let mut flags = Flags::empty();
    let result = sub8(&mut flags, 0x00, 0x01);
    assert_eq!(result, 0xff);
    assert_eq!(flags, Flags::SUBTRACT | Flags::HALF_CARRY | Flags::CARRY);
}

#[test]
fn test_adc8_and_sbc8_use_carry() {
    let mut flags = Flags::CARRY;
    assert_eq!(adc8(&mut flags, 0x0e, 0x01), 0x10);
    assert!(flags.contains(Flags::HALF_CARRY));
    assert!(!flags.contains(Flags::CARRY));

    let mut flags = Flags::CARRY;
    assert_eq!(sbc8(&mut flags, 0x10, 0x0f), 0x00);
    assert_eq!(flags, Flags::ZERO | Flags::SUBTRACT | Flags::HALF_CARRY);
}

#[test]
fn test_cp8_keeps_operand() {
    let mut flags = Flags::empty();
    cp8(&mut flags, 0x3c, 0x40);
    assert_eq!(flags, Flags::SUBTRACT | Flags::CARRY);
}

#[test]
fn test_logic_flags() {
    let mut flags = Flags::CARRY;
    assert_eq!(and8(&mut flags, 0xf0, 0x0f), 0x00);
    assert_eq!(flags, Flags::ZERO | Flags::HALF_CARRY);

    let mut flags = Flags::all();
    assert_eq!(or8(&mut flags, 0xf0, 0x0f), 0xff);
    assert_eq!(flags, Flags::empty());

    let mut flags = Flags::all();
    assert_eq!(xor8(&mut flags, 0x5a, 0x5a), 0x00);
    assert_eq!(flags, Flags::ZERO);
}

#[test]
fn test_inc8_dec8_preserve_carry() {
    let mut flags = Flags::CARRY;
    assert_eq!(inc8(&mut flags, 0xff), 0x00);
    assert_eq!(flags, Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY);

    let mut flags = Flags::CARRY;
    assert_eq!(dec8(&mut flags, 0x10), 0x0f);
    assert_eq!(flags, Flags::SUBTRACT | Flags::HALF_CARRY | Flags::CARRY);
}

#[test]
fn test_add16_keeps_zero() {
    let mut flags = Flags::ZERO | Flags::SUBTRACT;
    assert_eq!(add16(&mut flags, 0x0fff, 0x0001), 0x1000);
    assert_eq!(flags, Flags::ZERO | Flags::HALF_CARRY);

    let mut flags = Flags::empty();
    assert_eq!(add16(&mut flags, 0xffff, 0x0001), 0x0000);
    assert_eq!(flags, Flags::HALF_CARRY | Flags::CARRY, "ADD HL never sets Z");
}

#[test]
fn test_add_sp_offset_negative() {
    let mut flags = Flags::ZERO;
    assert_eq!(add_sp_offset(&mut flags, 0xd000, -1), 0xcfff);
    assert_eq!(flags, Flags::empty());

    let mut flags = Flags::empty();
    assert_eq!(add_sp_offset(&mut flags, 0x00ff, -1), 0x00fe);
    assert_eq!(flags, Flags::HALF_CARRY | Flags::CARRY);
}

#[test]
fn test_inc16_dec16_wrap() {
    assert_eq!(inc16(0xffff), 0x0000);
    assert_eq!(dec16(0x0000), 0xffff);
}

#[test]
fn test_daa_after_add() {
    let mut flags = Flags::empty();
    let sum = add8(&mut flags, 0x09, 0x01);
    assert_eq!(sum, 0x0a);
    assert_eq!(daa(&mut flags, sum), 0x10);
    assert!(!flags.contains(Flags::CARRY));
    assert!(!flags.contains(Flags::HALF_CARRY));

    let mut flags = Flags::empty();
    let sum = add8(&mut flags, 0x99, 0x01);
    assert_eq!(daa(&mut flags, sum), 0x00);
    assert_eq!(flags, Flags::ZERO | Flags::CARRY);
}

#[test]
fn test_daa_after_sub() {
    let mut flags = Flags::empty();
    let difference = sub8(&mut flags, 0x10, 0x01);
    assert_eq!(difference, 0x0f);
    assert_eq!(daa(&mut flags, difference), 0x09);
    assert_eq!(flags, Flags::SUBTRACT);
}

#[test]
fn test_cpl_scf_ccf() {
    let mut flags = Flags::ZERO;
    assert_eq!(cpl(&mut flags, 0x35), 0xca);
    assert_eq!(flags, Flags::ZERO | Flags::SUBTRACT | Flags::HALF_CARRY);

    scf(&mut flags);
    assert_eq!(flags, Flags::ZERO | Flags::CARRY);

    ccf(&mut flags);
    assert_eq!(flags, Flags::ZERO);
}

#[test]
fn test_accumulator_rotates_clear_zero() {
    let mut flags = Flags::ZERO;
    assert_eq!(rlca(&mut flags, 0x00), 0x00);
    assert_eq!(flags, Flags::empty(), "RLCA never sets Z");

    let mut flags = Flags::empty();
    assert_eq!(rla(&mut flags, 0x80), 0x00);
    assert_eq!(flags, Flags::CARRY);

    let mut flags = Flags::CARRY;
    assert_eq!(rra(&mut flags, 0x01), 0x80);
    assert_eq!(flags, Flags::CARRY);

    let mut flags = Flags::empty();
    assert_eq!(rrca(&mut flags, 0x01), 0x80);
    assert_eq!(flags, Flags::CARRY);
}

#[test]
fn test_prefixed_rotates_set_zero() {
    let mut flags = Flags::empty();
    assert_eq!(rlc(&mut flags, 0x00), 0x00);
    assert_eq!(flags, Flags::ZERO);

    let mut flags = Flags::empty();
    assert_eq!(rl(&mut flags, 0x80), 0x00);
    assert_eq!(flags, Flags::ZERO | Flags::CARRY);

    let mut flags = Flags::CARRY;
    assert_eq!(rr(&mut flags, 0x00), 0x80);
    assert_eq!(flags, Flags::empty());

    let mut flags = Flags::empty();
    assert_eq!(rrc(&mut flags, 0x01), 0x80);
    assert_eq!(flags, Flags::CARRY);
}

#[test]
fn test_shifts_and_swap() {
    let mut flags = Flags::empty();
    assert_eq!(sla(&mut flags, 0x81), 0x02);
    assert_eq!(flags, Flags::CARRY);

    assert_eq!(sra(&mut flags, 0x81), 0xc0);
    assert_eq!(flags, Flags::CARRY);

    assert_eq!(srl(&mut flags, 0x01), 0x00);
    assert_eq!(flags, Flags::ZERO | Flags::CARRY);

    let mut flags = Flags::CARRY;
    assert_eq!(swap(&mut flags, 0xf1), 0x1f);
    assert_eq!(flags, Flags::empty());
}

#[test]
fn test_bit_res_set() {
    let mut flags = Flags::CARRY | Flags::SUBTRACT;
    bit(&mut flags, 7, 0x7f);
    assert_eq!(flags, Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY);

    bit(&mut flags, 0, 0x01);
    assert_eq!(flags, Flags::HALF_CARRY | Flags::CARRY);

    assert_eq!(res(3, 0xff), 0xf7);
    assert_eq!(set(3, 0x00), 0x08);
}

//! 8/16-bit arithmetic and logic. Every operation takes its operands plus the
//! current flag register, returns the result and leaves the flags as the
//! LR35902 does.

use crate::lr35902::registers::Flags;

pub fn add8(flags: &mut Flags, x: u8, y: u8) -> u8 {
    let result = x.wrapping_add(y);
    *flags = Flags::empty();
    flags.set(Flags::ZERO, result == 0);
    flags.set(Flags::HALF_CARRY, (x & 0x0f) + (y & 0x0f) > 0x0f);
    flags.set(Flags::CARRY, x as u16 + y as u16 > 0xff);
    result
}

pub fn adc8(flags: &mut Flags, x: u8, y: u8) -> u8 {
    let carry = flags.carry_bit();
    let result = x.wrapping_add(y).wrapping_add(carry);
    *flags = Flags::empty();
    flags.set(Flags::ZERO, result == 0);
    flags.set(Flags::HALF_CARRY, (x & 0x0f) + (y & 0x0f) + carry > 0x0f);
    flags.set(Flags::CARRY, x as u16 + y as u16 + carry as u16 > 0xff);
    result
}

pub fn sub8(flags: &mut Flags, x: u8, y: u8) -> u8 {
    let result = x.wrapping_sub(y);
    *flags = Flags::SUBTRACT;
    flags.set(Flags::ZERO, result == 0);
    flags.set(Flags::HALF_CARRY, (x & 0x0f) < (y & 0x0f));
    flags.set(Flags::CARRY, x < y);
    result
}

pub fn sbc8(flags: &mut Flags, x: u8, y: u8) -> u8 {
    let carry = flags.carry_bit();
    let result = x.wrapping_sub(y).wrapping_sub(carry);
    *flags = Flags::SUBTRACT;
    flags.set(Flags::ZERO, result == 0);
    flags.set(Flags::HALF_CARRY, (x & 0x0f) < (y & 0x0f) + carry);
    flags.set(Flags::CARRY, (x as u16) < y as u16 + carry as u16);
    result
}

/// CP: a subtraction that only keeps the flags.
pub fn cp8(flags: &mut Flags, x: u8, y: u8) {
    sub8(flags, x, y);
}

pub fn and8(flags: &mut Flags, x: u8, y: u8) -> u8 {
    let result = x & y;
    *flags = Flags::HALF_CARRY;
    flags.set(Flags::ZERO, result == 0);
    result
}

pub fn or8(flags: &mut Flags, x: u8, y: u8) -> u8 {
    let result = x | y;
    *flags = Flags::empty();
    flags.set(Flags::ZERO, result == 0);
    result
}

pub fn xor8(flags: &mut Flags, x: u8, y: u8) -> u8 {
    let result = x ^ y;
    *flags = Flags::empty();
    flags.set(Flags::ZERO, result == 0);
    result
}

/// INC r: carry is left untouched.
pub fn inc8(flags: &mut Flags, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    flags.remove(Flags::SUBTRACT);
    flags.set(Flags::HALF_CARRY, value & 0x0f == 0x0f);
    flags.set(Flags::ZERO, result == 0);
    result
}

/// DEC r: carry is left untouched.
pub fn dec8(flags: &mut Flags, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    flags.insert(Flags::SUBTRACT);
    flags.set(Flags::HALF_CARRY, value & 0x0f == 0x00);
    flags.set(Flags::ZERO, result == 0);
    result
}

/// ADD HL,rr: zero is left untouched, half carry comes out of bit 11.
pub fn add16(flags: &mut Flags, x: u16, y: u16) -> u16 {
    let result = x.wrapping_add(y);
    flags.remove(Flags::SUBTRACT);
    flags.set(Flags::HALF_CARRY, (x & 0x0fff) + (y & 0x0fff) > 0x0fff);
    flags.set(Flags::CARRY, x as u32 + y as u32 > 0xffff);
    result
}

/// ADD SP,e and LD HL,SP+e. Flags come from the unsigned low-byte addition.
pub fn add_sp_offset(flags: &mut Flags, sp: u16, offset: i8) -> u16 {
    let unsigned = offset as u8 as u16;
    *flags = Flags::empty();
    flags.set(Flags::HALF_CARRY, (sp & 0x0f) + (unsigned & 0x0f) > 0x0f);
    flags.set(Flags::CARRY, (sp & 0xff) + unsigned > 0xff);
    sp.wrapping_add_signed(offset as i16)
}

/// 16-bit INC/DEC wrap silently and never touch the flags.
#[inline]
pub fn inc16(value: u16) -> u16 {
    value.wrapping_add(1)
}

#[inline]
pub fn dec16(value: u16) -> u16 {
    value.wrapping_sub(1)
}

/// Decimal adjust after an addition or subtraction. The branch structure
/// follows the well known CrystalBoy implementation bit for bit.
pub fn daa(flags: &mut Flags, a: u8) -> u8 {
    let mut a = a;

    if flags.contains(Flags::SUBTRACT) {
        if flags.contains(Flags::HALF_CARRY) {
            a = a.wrapping_sub(0x06);
        }
        if flags.contains(Flags::CARRY) {
            a = a.wrapping_sub(0x60);
        }
    } else if flags.contains(Flags::CARRY) || a > 0x99 {
        let adjust = if flags.contains(Flags::HALF_CARRY) || (a & 0x0f) > 0x09 { 0x66 } else { 0x60 };
        a = a.wrapping_add(adjust);
        flags.insert(Flags::CARRY);
    } else if flags.contains(Flags::HALF_CARRY) || (a & 0x0f) > 0x09 {
        a = a.wrapping_add(0x06);
    }

    flags.set(Flags::ZERO, a == 0);
    flags.remove(Flags::HALF_CARRY);
    a
}

pub fn cpl(flags: &mut Flags, a: u8) -> u8 {
    flags.insert(Flags::SUBTRACT | Flags::HALF_CARRY);
    !a
}

pub fn scf(flags: &mut Flags) {
    flags.remove(Flags::SUBTRACT | Flags::HALF_CARRY);
    flags.insert(Flags::CARRY);
}

pub fn ccf(flags: &mut Flags) {
    flags.remove(Flags::SUBTRACT | Flags::HALF_CARRY);
    flags.toggle(Flags::CARRY);
}

// Accumulator rotates (RLCA/RRCA/RLA/RRA): the whole flag register is reset
// first, so Z is always clear regardless of the result.

pub fn rlca(flags: &mut Flags, a: u8) -> u8 {
    *flags = Flags::empty();
    flags.set(Flags::CARRY, a & 0x80 != 0);
    a.rotate_left(1)
}

pub fn rrca(flags: &mut Flags, a: u8) -> u8 {
    *flags = Flags::empty();
    flags.set(Flags::CARRY, a & 0x01 != 0);
    a.rotate_right(1)
}

pub fn rla(flags: &mut Flags, a: u8) -> u8 {
    let carry = flags.carry_bit();
    *flags = Flags::empty();
    flags.set(Flags::CARRY, a & 0x80 != 0);
    (a << 1) | carry
}

pub fn rra(flags: &mut Flags, a: u8) -> u8 {
    let carry = flags.carry_bit();
    *flags = Flags::empty();
    flags.set(Flags::CARRY, a & 0x01 != 0);
    (a >> 1) | (carry << 7)
}

// CB-prefixed rotates and shifts: Z follows the result.

fn shifted(flags: &mut Flags, result: u8, carry: bool) -> u8 {
    *flags = Flags::empty();
    flags.set(Flags::ZERO, result == 0);
    flags.set(Flags::CARRY, carry);
    result
}

pub fn rlc(flags: &mut Flags, value: u8) -> u8 {
    shifted(flags, value.rotate_left(1), value & 0x80 != 0)
}

pub fn rrc(flags: &mut Flags, value: u8) -> u8 {
    shifted(flags, value.rotate_right(1), value & 0x01 != 0)
}

pub fn rl(flags: &mut Flags, value: u8) -> u8 {
    let carry = flags.carry_bit();
    shifted(flags, (value << 1) | carry, value & 0x80 != 0)
}

pub fn rr(flags: &mut Flags, value: u8) -> u8 {
    let carry = flags.carry_bit();
    shifted(flags, (value >> 1) | (carry << 7), value & 0x01 != 0)
}

pub fn sla(flags: &mut Flags, value: u8) -> u8 {
    shifted(flags, value << 1, value & 0x80 != 0)
}

pub fn sra(flags: &mut Flags, value: u8) -> u8 {
    shifted(flags, (value >> 1) | (value & 0x80), value & 0x01 != 0)
}

pub fn srl(flags: &mut Flags, value: u8) -> u8 {
    shifted(flags, value >> 1, value & 0x01 != 0)
}

pub fn swap(flags: &mut Flags, value: u8) -> u8 {
    shifted(flags, value.rotate_left(4), false)
}

/// BIT b,r: carry is preserved.
pub fn bit(flags: &mut Flags, position: u8, value: u8) {
    flags.set(Flags::ZERO, value & (1 << position) == 0);
    flags.remove(Flags::SUBTRACT);
    flags.insert(Flags::HALF_CARRY);
}

#[inline]
pub fn res(position: u8, value: u8) -> u8 {
    value & !(1 << position)
}

#[inline]
pub fn set(position: u8, value: u8) -> u8 {
    value | (1 << position)
}

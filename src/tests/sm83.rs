use crate::lr35902::sm83::*;

#[test]
fn test_operand_table_order() {
    assert_eq!(Sm83::lookup_operand(0), Operand8::Reg(Register::B));
    assert_eq!(Sm83::lookup_operand(5), Operand8::Reg(Register::L));
    assert_eq!(Sm83::lookup_operand(6), Operand8::IndirectHl);
    assert_eq!(Sm83::lookup_operand(7), Operand8::Reg(Register::A));
    assert_eq!(Sm83::lookup_operand(0x7e), Operand8::IndirectHl, "Only the low 3 bits select");
}

#[test]
fn test_register_pair_tables() {
    assert_eq!(Sm83::lookup_register16(3), Register16::SP);
    assert_eq!(Sm83::lookup_register16_stack(3), Register16::AF);
    assert_eq!(Sm83::lookup_register16_stack(1), Register16::DE);
    assert_eq!(Sm83::lookup_condition(0), Condition::NZ);
    assert_eq!(Sm83::lookup_condition(3), Condition::C);
}

#[test]
fn test_invalid_opcodes() {
    for opcode in 0..=0xffu8 {
        let expected = matches!(
            opcode,
            0xd3 | 0xdb | 0xdd | 0xe3 | 0xe4 | 0xeb | 0xec | 0xed | 0xf4 | 0xfc | 0xfd
        );
        assert_eq!(Sm83::is_invalid(opcode), expected, "Opcode {:02x}", opcode);
    }
}

#[test]
fn test_disassemble() {
    let cases = [
        (0x00, "NOP"),
        (0x3e, "LD A,n"),
        (0x46, "LD B,(HL)"),
        (0x22, "LD (HL+),A"),
        (0x3a, "LD A,(HL-)"),
        (0x86, "ADD A,(HL)"),
        (0xb8, "CP B"),
        (0x20, "JR NZ,e"),
        (0xc5, "PUSH BC"),
        (0xf1, "POP AF"),
        (0xd9, "RETI"),
        (0xef, "RST $28"),
        (0xfe, "CP n"),
        (0x76, "HALT"),
        (0xd3, "ILLEGAL $d3"),
    ];

    for (opcode, mnemonic) in cases {
        assert_eq!(Sm83::disassemble(opcode), mnemonic, "Opcode {:02x}", opcode);
    }
}

#[test]
fn test_disassemble_prefixed() {
    assert_eq!(Sm83::disassemble_prefixed(0x11), "RL C");
    assert_eq!(Sm83::disassemble_prefixed(0x37), "SWAP A");
    assert_eq!(Sm83::disassemble_prefixed(0x7e), "BIT 7,(HL)");
    assert_eq!(Sm83::disassemble_prefixed(0x80), "RES 0,B");
    assert_eq!(Sm83::disassemble_prefixed(0xff), "SET 7,A");
}

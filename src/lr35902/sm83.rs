use std::fmt::{Display, Formatter};

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Register {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
    F,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Register16 {
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

/// An 8-bit source or destination as encoded in the low 3 bits of an opcode.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Operand8 {
    Reg(Register),
    IndirectHl,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Condition {
    None,
    NZ,
    Z,
    NC,
    C,
}

/// Operand tables of the SM83 instruction encoding.
pub struct Sm83;

impl Sm83 {
    pub const INVALID_OPCODES: [u8; 11] = [0xd3, 0xdb, 0xdd, 0xe3, 0xe4, 0xeb, 0xec, 0xed, 0xf4, 0xfc, 0xfd];

    const OPERANDS: [Operand8; 8] = [
        Operand8::Reg(Register::B),
        Operand8::Reg(Register::C),
        Operand8::Reg(Register::D),
        Operand8::Reg(Register::E),
        Operand8::Reg(Register::H),
        Operand8::Reg(Register::L),
        Operand8::IndirectHl,
        Operand8::Reg(Register::A),
    ];

    const ALU_MNEMONICS: [&'static str; 8] = ["ADD A,", "ADC A,", "SUB ", "SBC A,", "AND ", "XOR ", "OR ", "CP "];
    const ROT_MNEMONICS: [&'static str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"];

    #[inline]
    pub fn is_invalid(opcode: u8) -> bool {
        Sm83::INVALID_OPCODES.contains(&opcode)
    }

    /// B, C, D, E, H, L, (HL), A by the low 3 bits of `index`.
    #[inline]
    pub fn lookup_operand(index: u8) -> Operand8 {
        Sm83::OPERANDS[(index & 7) as usize]
    }

    /// BC, DE, HL, SP by the low 2 bits of `index`.
    #[inline]
    pub fn lookup_register16(index: u8) -> Register16 {
        match index & 3 {
            0 => Register16::BC,
            1 => Register16::DE,
            2 => Register16::HL,
            _ => Register16::SP,
        }
    }

    /// PUSH/POP flavour of the register pair table, AF in place of SP.
    #[inline]
    pub fn lookup_register16_stack(index: u8) -> Register16 {
        match index & 3 {
            0 => Register16::BC,
            1 => Register16::DE,
            2 => Register16::HL,
            _ => Register16::AF,
        }
    }

    #[inline]
    pub fn lookup_condition(index: u8) -> Condition {
        match index & 3 {
            0 => Condition::NZ,
            1 => Condition::Z,
            2 => Condition::NC,
            _ => Condition::C,
        }
    }

    /// Mnemonic of an unprefixed opcode, with immediates left symbolic.
    pub fn disassemble(opcode: u8) -> String {
        let y = (opcode >> 3) & 7;
        let z = opcode & 7;
        let p = y >> 1;
        let q = y & 1;

        match opcode {
            0x00 => "NOP".to_string(),
            0x08 => "LD (nn),SP".to_string(),
            0x10 => "STOP".to_string(),
            0x18 => "JR e".to_string(),
            0x20 | 0x28 | 0x30 | 0x38 => format!("JR {},e", Sm83::lookup_condition(y)),
            0x76 => "HALT".to_string(),
            0xcb => "PREFIX CB".to_string(),
            _ if Sm83::is_invalid(opcode) => format!("ILLEGAL ${:02x}", opcode),
            0x00..=0x3f => match z {
                1 if q == 0 => format!("LD {},nn", Sm83::lookup_register16(p)),
                1 => format!("ADD HL,{}", Sm83::lookup_register16(p)),
                2 => {
                    let target = ["(BC)", "(DE)", "(HL+)", "(HL-)"][p as usize];
                    if q == 0 {
                        format!("LD {},A", target)
                    } else {
                        format!("LD A,{}", target)
                    }
                }
                3 if q == 0 => format!("INC {}", Sm83::lookup_register16(p)),
                3 => format!("DEC {}", Sm83::lookup_register16(p)),
                4 => format!("INC {}", Sm83::lookup_operand(y)),
                5 => format!("DEC {}", Sm83::lookup_operand(y)),
                6 => format!("LD {},n", Sm83::lookup_operand(y)),
                _ => ["RLCA", "RRCA", "RLA", "RRA", "DAA", "CPL", "SCF", "CCF"][y as usize].to_string(),
            },
            0x40..=0x7f => format!("LD {},{}", Sm83::lookup_operand(y), Sm83::lookup_operand(z)),
            0x80..=0xbf => format!("{}{}", Sm83::ALU_MNEMONICS[y as usize], Sm83::lookup_operand(z)),
            _ => match z {
                0 => match y {
                    0..=3 => format!("RET {}", Sm83::lookup_condition(y)),
                    4 => "LDH (n),A".to_string(),
                    5 => "ADD SP,e".to_string(),
                    6 => "LDH A,(n)".to_string(),
                    _ => "LD HL,SP+e".to_string(),
                },
                1 if q == 0 => format!("POP {}", Sm83::lookup_register16_stack(p)),
                1 => ["RET", "RETI", "JP HL", "LD SP,HL"][p as usize].to_string(),
                2 => match y {
                    0..=3 => format!("JP {},nn", Sm83::lookup_condition(y)),
                    4 => "LD (C),A".to_string(),
                    5 => "LD (nn),A".to_string(),
                    6 => "LD A,(C)".to_string(),
                    _ => "LD A,(nn)".to_string(),
                },
                3 => match y {
                    0 => "JP nn".to_string(),
                    6 => "DI".to_string(),
                    _ => "EI".to_string(),
                },
                4 => format!("CALL {},nn", Sm83::lookup_condition(y)),
                5 if q == 0 => format!("PUSH {}", Sm83::lookup_register16_stack(p)),
                5 => "CALL nn".to_string(),
                6 => format!("{}n", Sm83::ALU_MNEMONICS[y as usize]),
                _ => format!("RST ${:02x}", y * 8),
            },
        }
    }

    /// Mnemonic of the opcode following a 0xCB prefix.
    pub fn disassemble_prefixed(opcode: u8) -> String {
        let y = (opcode >> 3) & 7;
        let operand = Sm83::lookup_operand(opcode);

        match opcode >> 6 {
            0 => format!("{} {}", Sm83::ROT_MNEMONICS[y as usize], operand),
            1 => format!("BIT {},{}", y, operand),
            2 => format!("RES {},{}", y, operand),
            _ => format!("SET {},{}", y, operand),
        }
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Register::A => write!(f, "A"),
            Register::B => write!(f, "B"),
            Register::C => write!(f, "C"),
            Register::D => write!(f, "D"),
            Register::E => write!(f, "E"),
            Register::H => write!(f, "H"),
            Register::L => write!(f, "L"),
            Register::F => write!(f, "F"),
        }
    }
}

impl Display for Register16 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Register16::AF => write!(f, "AF"),
            Register16::BC => write!(f, "BC"),
            Register16::DE => write!(f, "DE"),
            Register16::HL => write!(f, "HL"),
            Register16::SP => write!(f, "SP"),
            Register16::PC => write!(f, "PC"),
        }
    }
}

impl Display for Operand8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand8::Reg(register) => write!(f, "{}", register),
            Operand8::IndirectHl => write!(f, "(HL)"),
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::None => Ok(()),
            Condition::NZ => write!(f, "NZ"),
            Condition::Z => write!(f, "Z"),
            Condition::NC => write!(f, "NC"),
            Condition::C => write!(f, "C"),
        }
    }
}

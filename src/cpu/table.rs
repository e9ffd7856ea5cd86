/*!
table.rs - Static 256-entry opcode table and a small disassembler.

Design
------
- `INSTRUCTIONS[opcode]` gives the canonical operation, the addressing mode
  and the base cycle count for every opcode byte.
- Base counts follow the NMOS 6502 reference. Read-indexed modes add +1 on a
  page cross at decode time; branches add their penalty at execute time. The
  write/RMW indexed forms (`abs,X`/`abs,Y`/`(zp),Y` stores, `abs,X` RMW) use
  the `*Write` addressing modes and carry their fixed extra cycle in the base.
- Opcodes outside the 151 documented ones hold `Op::DoesNotExist`; decoding
  one is a fault, never a NOP.
*/

use std::fmt::Write as _;

use crate::cpu::addressing::AddressingMode::{self, *};

/// Canonical 6502 operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Unassigned opcode byte.
    DoesNotExist,
}

impl Op {
    pub const fn mnemonic(self) -> &'static str {
        use Op::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
            DoesNotExist => "???",
        }
    }

    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Op::Bcc | Op::Bcs | Op::Beq | Op::Bmi | Op::Bne | Op::Bpl | Op::Bvc | Op::Bvs
        )
    }
}

/// One opcode table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub mode: AddressingMode,
    pub cycles: u8,
}

const fn ins(op: Op, mode: AddressingMode, cycles: u8) -> Instruction {
    Instruction { op, mode, cycles }
}

const MISSING: Instruction = ins(Op::DoesNotExist, Implied, 0);

pub static INSTRUCTIONS: [Instruction; 256] = build();

const fn build() -> [Instruction; 256] {
    use Op::*;
    let mut t = [MISSING; 256];

    // ADC
    t[0x69] = ins(Adc, Immediate, 2);
    t[0x65] = ins(Adc, ZeroPage, 3);
    t[0x75] = ins(Adc, ZeroPageX, 4);
    t[0x6D] = ins(Adc, Absolute, 4);
    t[0x7D] = ins(Adc, AbsoluteX, 4);
    t[0x79] = ins(Adc, AbsoluteY, 4);
    t[0x61] = ins(Adc, IndirectX, 6);
    t[0x71] = ins(Adc, IndirectY, 5);
    // AND
    t[0x29] = ins(And, Immediate, 2);
    t[0x25] = ins(And, ZeroPage, 3);
    t[0x35] = ins(And, ZeroPageX, 4);
    t[0x2D] = ins(And, Absolute, 4);
    t[0x3D] = ins(And, AbsoluteX, 4);
    t[0x39] = ins(And, AbsoluteY, 4);
    t[0x21] = ins(And, IndirectX, 6);
    t[0x31] = ins(And, IndirectY, 5);
    // ASL
    t[0x0A] = ins(Asl, Accumulator, 2);
    t[0x06] = ins(Asl, ZeroPage, 5);
    t[0x16] = ins(Asl, ZeroPageX, 6);
    t[0x0E] = ins(Asl, Absolute, 6);
    t[0x1E] = ins(Asl, AbsoluteXWrite, 7);
    // Branches
    t[0x90] = ins(Bcc, Relative, 2);
    t[0xB0] = ins(Bcs, Relative, 2);
    t[0xF0] = ins(Beq, Relative, 2);
    t[0x30] = ins(Bmi, Relative, 2);
    t[0xD0] = ins(Bne, Relative, 2);
    t[0x10] = ins(Bpl, Relative, 2);
    t[0x50] = ins(Bvc, Relative, 2);
    t[0x70] = ins(Bvs, Relative, 2);
    // BIT
    t[0x24] = ins(Bit, ZeroPage, 3);
    t[0x2C] = ins(Bit, Absolute, 4);
    // BRK
    t[0x00] = ins(Brk, Implied, 7);
    // Flags
    t[0x18] = ins(Clc, Implied, 2);
    t[0xD8] = ins(Cld, Implied, 2);
    t[0x58] = ins(Cli, Implied, 2);
    t[0xB8] = ins(Clv, Implied, 2);
    t[0x38] = ins(Sec, Implied, 2);
    t[0xF8] = ins(Sed, Implied, 2);
    t[0x78] = ins(Sei, Implied, 2);
    // CMP
    t[0xC9] = ins(Cmp, Immediate, 2);
    t[0xC5] = ins(Cmp, ZeroPage, 3);
    t[0xD5] = ins(Cmp, ZeroPageX, 4);
    t[0xCD] = ins(Cmp, Absolute, 4);
    t[0xDD] = ins(Cmp, AbsoluteX, 4);
    t[0xD9] = ins(Cmp, AbsoluteY, 4);
    t[0xC1] = ins(Cmp, IndirectX, 6);
    t[0xD1] = ins(Cmp, IndirectY, 5);
    // CPX / CPY
    t[0xE0] = ins(Cpx, Immediate, 2);
    t[0xE4] = ins(Cpx, ZeroPage, 3);
    t[0xEC] = ins(Cpx, Absolute, 4);
    t[0xC0] = ins(Cpy, Immediate, 2);
    t[0xC4] = ins(Cpy, ZeroPage, 3);
    t[0xCC] = ins(Cpy, Absolute, 4);
    // DEC
    t[0xC6] = ins(Dec, ZeroPage, 5);
    t[0xD6] = ins(Dec, ZeroPageX, 6);
    t[0xCE] = ins(Dec, Absolute, 6);
    t[0xDE] = ins(Dec, AbsoluteXWrite, 7);
    // Register inc/dec
    t[0xCA] = ins(Dex, Implied, 2);
    t[0x88] = ins(Dey, Implied, 2);
    t[0xE8] = ins(Inx, Implied, 2);
    t[0xC8] = ins(Iny, Implied, 2);
    // EOR
    t[0x49] = ins(Eor, Immediate, 2);
    t[0x45] = ins(Eor, ZeroPage, 3);
    t[0x55] = ins(Eor, ZeroPageX, 4);
    t[0x4D] = ins(Eor, Absolute, 4);
    t[0x5D] = ins(Eor, AbsoluteX, 4);
    t[0x59] = ins(Eor, AbsoluteY, 4);
    t[0x41] = ins(Eor, IndirectX, 6);
    t[0x51] = ins(Eor, IndirectY, 5);
    // INC
    t[0xE6] = ins(Inc, ZeroPage, 5);
    t[0xF6] = ins(Inc, ZeroPageX, 6);
    t[0xEE] = ins(Inc, Absolute, 6);
    t[0xFE] = ins(Inc, AbsoluteXWrite, 7);
    // Jumps / subroutines
    t[0x4C] = ins(Jmp, Absolute, 3);
    t[0x6C] = ins(Jmp, Indirect, 5);
    t[0x20] = ins(Jsr, Absolute, 6);
    t[0x60] = ins(Rts, Implied, 6);
    t[0x40] = ins(Rti, Implied, 6);
    // LDA
    t[0xA9] = ins(Lda, Immediate, 2);
    t[0xA5] = ins(Lda, ZeroPage, 3);
    t[0xB5] = ins(Lda, ZeroPageX, 4);
    t[0xAD] = ins(Lda, Absolute, 4);
    t[0xBD] = ins(Lda, AbsoluteX, 4);
    t[0xB9] = ins(Lda, AbsoluteY, 4);
    t[0xA1] = ins(Lda, IndirectX, 6);
    t[0xB1] = ins(Lda, IndirectY, 5);
    // LDX
    t[0xA2] = ins(Ldx, Immediate, 2);
    t[0xA6] = ins(Ldx, ZeroPage, 3);
    t[0xB6] = ins(Ldx, ZeroPageY, 4);
    t[0xAE] = ins(Ldx, Absolute, 4);
    t[0xBE] = ins(Ldx, AbsoluteY, 4);
    // LDY
    t[0xA0] = ins(Ldy, Immediate, 2);
    t[0xA4] = ins(Ldy, ZeroPage, 3);
    t[0xB4] = ins(Ldy, ZeroPageX, 4);
    t[0xAC] = ins(Ldy, Absolute, 4);
    t[0xBC] = ins(Ldy, AbsoluteX, 4);
    // LSR
    t[0x4A] = ins(Lsr, Accumulator, 2);
    t[0x46] = ins(Lsr, ZeroPage, 5);
    t[0x56] = ins(Lsr, ZeroPageX, 6);
    t[0x4E] = ins(Lsr, Absolute, 6);
    t[0x5E] = ins(Lsr, AbsoluteXWrite, 7);
    // NOP
    t[0xEA] = ins(Nop, Implied, 2);
    // ORA
    t[0x09] = ins(Ora, Immediate, 2);
    t[0x05] = ins(Ora, ZeroPage, 3);
    t[0x15] = ins(Ora, ZeroPageX, 4);
    t[0x0D] = ins(Ora, Absolute, 4);
    t[0x1D] = ins(Ora, AbsoluteX, 4);
    t[0x19] = ins(Ora, AbsoluteY, 4);
    t[0x01] = ins(Ora, IndirectX, 6);
    t[0x11] = ins(Ora, IndirectY, 5);
    // Stack
    t[0x48] = ins(Pha, Implied, 3);
    t[0x08] = ins(Php, Implied, 3);
    t[0x68] = ins(Pla, Implied, 4);
    t[0x28] = ins(Plp, Implied, 4);
    // ROL
    t[0x2A] = ins(Rol, Accumulator, 2);
    t[0x26] = ins(Rol, ZeroPage, 5);
    t[0x36] = ins(Rol, ZeroPageX, 6);
    t[0x2E] = ins(Rol, Absolute, 6);
    t[0x3E] = ins(Rol, AbsoluteXWrite, 7);
    // ROR
    t[0x6A] = ins(Ror, Accumulator, 2);
    t[0x66] = ins(Ror, ZeroPage, 5);
    t[0x76] = ins(Ror, ZeroPageX, 6);
    t[0x6E] = ins(Ror, Absolute, 6);
    t[0x7E] = ins(Ror, AbsoluteXWrite, 7);
    // SBC
    t[0xE9] = ins(Sbc, Immediate, 2);
    t[0xE5] = ins(Sbc, ZeroPage, 3);
    t[0xF5] = ins(Sbc, ZeroPageX, 4);
    t[0xED] = ins(Sbc, Absolute, 4);
    t[0xFD] = ins(Sbc, AbsoluteX, 4);
    t[0xF9] = ins(Sbc, AbsoluteY, 4);
    t[0xE1] = ins(Sbc, IndirectX, 6);
    t[0xF1] = ins(Sbc, IndirectY, 5);
    // STA
    t[0x85] = ins(Sta, ZeroPage, 3);
    t[0x95] = ins(Sta, ZeroPageX, 4);
    t[0x8D] = ins(Sta, Absolute, 4);
    t[0x9D] = ins(Sta, AbsoluteXWrite, 5);
    t[0x99] = ins(Sta, AbsoluteYWrite, 5);
    t[0x81] = ins(Sta, IndirectX, 6);
    t[0x91] = ins(Sta, IndirectYWrite, 6);
    // STX / STY
    t[0x86] = ins(Stx, ZeroPage, 3);
    t[0x96] = ins(Stx, ZeroPageY, 4);
    t[0x8E] = ins(Stx, Absolute, 4);
    t[0x84] = ins(Sty, ZeroPage, 3);
    t[0x94] = ins(Sty, ZeroPageX, 4);
    t[0x8C] = ins(Sty, Absolute, 4);
    // Transfers
    t[0xAA] = ins(Tax, Implied, 2);
    t[0xA8] = ins(Tay, Implied, 2);
    t[0xBA] = ins(Tsx, Implied, 2);
    t[0x8A] = ins(Txa, Implied, 2);
    t[0x9A] = ins(Txs, Implied, 2);
    t[0x98] = ins(Tya, Implied, 2);

    t
}

/// Table entry for `opcode`.
#[inline]
pub fn lookup(opcode: u8) -> Instruction {
    INSTRUCTIONS[opcode as usize]
}

/// Render the instruction starting at `bytes[0]` (located at `pc`) in
/// assembler syntax. Missing operand bytes read as zero.
pub fn disassemble(bytes: &[u8], pc: u16) -> String {
    let opcode = bytes.first().copied().unwrap_or(0);
    let Instruction { op, mode, .. } = lookup(opcode);
    if op == Op::DoesNotExist {
        return format!(".byte ${opcode:02X}");
    }

    let b1 = bytes.get(1).copied().unwrap_or(0);
    let word = u16::from_le_bytes([b1, bytes.get(2).copied().unwrap_or(0)]);

    let mut out = String::from(op.mnemonic());
    let _ = match mode {
        Implied => Ok(()),
        Accumulator => write!(out, " A"),
        Immediate => write!(out, " #${b1:02X}"),
        ZeroPage => write!(out, " ${b1:02X}"),
        ZeroPageX => write!(out, " ${b1:02X},X"),
        ZeroPageY => write!(out, " ${b1:02X},Y"),
        Relative => {
            let target = pc.wrapping_add(2).wrapping_add(b1 as i8 as u16);
            write!(out, " ${target:04X}")
        }
        Absolute => write!(out, " ${word:04X}"),
        AbsoluteX | AbsoluteXWrite => write!(out, " ${word:04X},X"),
        AbsoluteY | AbsoluteYWrite => write!(out, " ${word:04X},Y"),
        Indirect => write!(out, " (${word:04X})"),
        IndirectX => write!(out, " (${b1:02X},X)"),
        IndirectY | IndirectYWrite => write!(out, " (${b1:02X}),Y"),
    };
    out
}

/*!
addressing.rs - 6502 addressing modes and operand resolution.

Overview
========
`resolve` turns an addressing mode plus the address of an opcode into a
`Resolved` descriptor:
- `operand`: where the instruction's data lives. Immediate and relative
  operands resolve to the *address* of the byte after the opcode (`pc + 1`);
  nothing is dereferenced until the execute cycle.
- `len`: operand bytes following the opcode (0, 1 or 2).
- `extra_cycles`: +1 when a read-indexed mode crosses a page.

Indexed modes come in read and write flavors. The write/RMW variants
(`AbsoluteXWrite`, `AbsoluteYWrite`, `IndirectYWrite`) always pay the
indexing cycle; that cycle is folded into their table base count, so they
never report extra cycles here.

Resolution reads operand bytes and pointers through the bus as the CPU
device, but never the effective address itself.
*/

use crate::bus::{Device, SystemBus};
use crate::cpu::regs::CpuRegs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// `abs,X` for stores and read-modify-write: no page-cross penalty.
    AbsoluteXWrite,
    /// `abs,Y` for stores: no page-cross penalty.
    AbsoluteYWrite,
    Indirect,
    IndirectX,
    IndirectY,
    /// `(zp),Y` for stores: no page-cross penalty.
    IndirectYWrite,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        use AddressingMode::*;
        match self {
            Implied | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY
            | IndirectYWrite => 1,
            Absolute | AbsoluteX | AbsoluteY | AbsoluteXWrite | AbsoluteYWrite | Indirect => 2,
        }
    }
}

/// Location of an instruction's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Accumulator,
    Implied,
    Address(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,
    pub len: u8,
    pub extra_cycles: u8,
}

/// Resolve `mode` for the opcode at `pc` with the current index registers.
pub fn resolve<C: CpuRegs, B: SystemBus>(
    mode: AddressingMode,
    pc: u16,
    cpu: &C,
    bus: &mut B,
) -> Resolved {
    use AddressingMode::*;

    let arg = pc.wrapping_add(1);
    let (operand, extra_cycles) = match mode {
        Implied => (Operand::Implied, 0),
        Accumulator => (Operand::Accumulator, 0),
        Immediate | Relative => (Operand::Address(arg), 0),
        ZeroPage => (Operand::Address(bus.read(Device::Cpu, arg) as u16), 0),
        ZeroPageX => {
            let zp = bus.read(Device::Cpu, arg).wrapping_add(cpu.x());
            (Operand::Address(zp as u16), 0)
        }
        ZeroPageY => {
            let zp = bus.read(Device::Cpu, arg).wrapping_add(cpu.y());
            (Operand::Address(zp as u16), 0)
        }
        Absolute => (Operand::Address(bus.read_word(Device::Cpu, arg)), 0),
        AbsoluteX | AbsoluteY => {
            let base = bus.read_word(Device::Cpu, arg);
            let index = if mode == AbsoluteX { cpu.x() } else { cpu.y() };
            let (addr, crossed) = index_with_cross(base, index);
            (Operand::Address(addr), crossed as u8)
        }
        AbsoluteXWrite | AbsoluteYWrite => {
            let base = bus.read_word(Device::Cpu, arg);
            let index = if mode == AbsoluteXWrite { cpu.x() } else { cpu.y() };
            (Operand::Address(base.wrapping_add(index as u16)), 0)
        }
        Indirect => {
            let ptr = bus.read_word(Device::Cpu, arg);
            (Operand::Address(read_word_indirect_bug(bus, ptr)), 0)
        }
        IndirectX => {
            let zp = bus.read(Device::Cpu, arg).wrapping_add(cpu.x());
            (Operand::Address(read_word_zp(bus, zp)), 0)
        }
        IndirectY => {
            let zp = bus.read(Device::Cpu, arg);
            let base = read_word_zp(bus, zp);
            let (addr, crossed) = index_with_cross(base, cpu.y());
            (Operand::Address(addr), crossed as u8)
        }
        IndirectYWrite => {
            let zp = bus.read(Device::Cpu, arg);
            let base = read_word_zp(bus, zp);
            (Operand::Address(base.wrapping_add(cpu.y() as u16)), 0)
        }
    };

    Resolved {
        operand,
        len: mode.operand_len(),
        extra_cycles,
    }
}

#[inline]
fn index_with_cross(base: u16, index: u8) -> (u16, bool) {
    let addr = base.wrapping_add(index as u16);
    (addr, (base & 0x00FF) + index as u16 > 0x00FF)
}

/// Read a little-endian pointer from zero page; the high byte wraps within
/// page 0.
#[inline]
pub fn read_word_zp<B: SystemBus>(bus: &mut B, base: u8) -> u16 {
    let lo = bus.read(Device::Cpu, base as u16) as u16;
    let hi = bus.read(Device::Cpu, base.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

/// JMP (indirect) vector fetch: the high byte comes from the same page as
/// the low byte, so `($xxFF)` reads its high byte from `$xx00`.
#[inline]
pub fn read_word_indirect_bug<B: SystemBus>(bus: &mut B, addr: u16) -> u16 {
    let lo = bus.read(Device::Cpu, addr) as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(Device::Cpu, hi_addr) as u16;
    (hi << 8) | lo
}

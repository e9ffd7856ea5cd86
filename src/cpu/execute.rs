/*!
execute.rs - 6502 instruction semantic helpers (ALU, flags, stack, RMW).

Purpose
=======
Side-effect logic shared by every dispatch family. Helpers are generic over
`CpuRegs` for the register file and `SystemBus` for memory.

Inventory
---------
Flags:       set_flag, get_flag, update_zn
Operands:    read_operand
Stack:       push, pop (fallible), push_byte, pull_byte, push_word, pull_word
Loads etc.:  lda/ldx/ldy, tax/tay/txa/tya/tsx/txs, inx/iny/dex/dey
ALU:         and/ora/eor/bit, adc/sbc, compare
Shifts:      asl/lsr/rol/ror value transforms, applied via `modify`

Stack faults
============
`push` / `pop` perform the wrapped transfer and then report a wrap as
`Err(StackFault)`. Instruction-level helpers record the fault in the
`Outcome` for the instruction and carry on with the transferred value.
*/

use crate::bus::{Device, SystemBus};
use crate::cpu::addressing::Operand;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{BREAK, CARRY, NEGATIVE, OVERFLOW, UNUSED, ZERO};
use crate::error::StackFault;

/// Side results of one executed instruction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// First stack fault raised while executing.
    pub stack_fault: Option<StackFault>,
    /// Number of stack faults raised.
    pub fault_count: u8,
    /// The instruction was BRK.
    pub brk: bool,
}

impl Outcome {
    pub(crate) fn record(&mut self, fault: StackFault) {
        self.fault_count = self.fault_count.saturating_add(1);
        self.stack_fault.get_or_insert(fault);
    }
}

// ---------------------------------------------------------------------------
// Flag helpers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn set_flag<C: CpuRegs>(cpu: &mut C, mask: u8, on: bool) {
    cpu.assign_flag(mask, on);
}

#[inline]
pub(crate) fn get_flag<C: CpuRegs>(cpu: &C, mask: u8) -> bool {
    cpu.is_flag_set(mask)
}

#[inline]
pub(crate) fn update_zn<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.update_zn(v);
}

// ---------------------------------------------------------------------------
// Operand access
// ---------------------------------------------------------------------------

/// Value of an operand: the accumulator or the byte at the resolved address.
#[inline]
pub(crate) fn read_operand<C: CpuRegs, B: SystemBus>(cpu: &C, bus: &mut B, operand: Operand) -> u8 {
    match operand {
        Operand::Accumulator => cpu.a(),
        Operand::Address(addr) => bus.read(Device::Cpu, addr),
        Operand::Implied => 0,
    }
}

// ---------------------------------------------------------------------------
// Stack helpers
// ---------------------------------------------------------------------------
//
//   Push: write at 0x0100 | SP, then SP = SP - 1
//   Pull: SP = SP + 1, then read at 0x0100 | SP

/// Push a byte. A push at SP = $00 stores at $0100, wraps SP to $FF and
/// reports `StackFault::Overflow`.
#[inline]
pub(crate) fn push<C: CpuRegs, B: SystemBus>(
    cpu: &mut C,
    bus: &mut B,
    v: u8,
) -> Result<(), StackFault> {
    let sp = cpu.sp();
    let addr = cpu.stack_addr();
    bus.write(Device::Cpu, addr, v);
    let next = sp.wrapping_sub(1);
    cpu.set_sp(next);
    if sp == 0x00 {
        return Err(StackFault::Overflow { sp: next, addr });
    }
    Ok(())
}

/// Pull a byte. A pull at SP = $FF wraps SP to $00, loads from $0100 and
/// reports `StackFault::Underflow` carrying the loaded byte.
#[inline]
pub(crate) fn pop<C: CpuRegs, B: SystemBus>(cpu: &mut C, bus: &mut B) -> Result<u8, StackFault> {
    let wrapped = cpu.sp() == 0xFF;
    let sp = cpu.sp().wrapping_add(1);
    cpu.set_sp(sp);
    let addr = cpu.stack_addr();
    let value = bus.read(Device::Cpu, addr);
    if wrapped {
        return Err(StackFault::Underflow { sp, addr, value });
    }
    Ok(value)
}

/// `push`, recording a fault in `out`.
#[inline]
pub(crate) fn push_byte<C: CpuRegs, B: SystemBus>(
    cpu: &mut C,
    bus: &mut B,
    out: &mut Outcome,
    v: u8,
) {
    if let Err(fault) = push(cpu, bus, v) {
        out.record(fault);
    }
}

/// `pop`, recording a fault in `out` and yielding the pulled byte either way.
#[inline]
pub(crate) fn pull_byte<C: CpuRegs, B: SystemBus>(
    cpu: &mut C,
    bus: &mut B,
    out: &mut Outcome,
) -> u8 {
    match pop(cpu, bus) {
        Ok(v) => v,
        Err(fault) => {
            out.record(fault);
            match fault {
                StackFault::Underflow { value, .. } => value,
                StackFault::Overflow { .. } => 0,
            }
        }
    }
}

/// Push high byte, then low byte.
#[inline]
pub(crate) fn push_word<C: CpuRegs, B: SystemBus>(
    cpu: &mut C,
    bus: &mut B,
    out: &mut Outcome,
    v: u16,
) {
    push_byte(cpu, bus, out, (v >> 8) as u8);
    push_byte(cpu, bus, out, (v & 0xFF) as u8);
}

/// Pull low byte, then high byte.
#[inline]
pub(crate) fn pull_word<C: CpuRegs, B: SystemBus>(
    cpu: &mut C,
    bus: &mut B,
    out: &mut Outcome,
) -> u16 {
    let lo = pull_byte(cpu, bus, out) as u16;
    let hi = pull_byte(cpu, bus, out) as u16;
    (hi << 8) | lo
}

/// Push P with B set (PHP/BRK) or clear (IRQ/NMI).
#[inline]
pub(crate) fn push_status<C: CpuRegs, B: SystemBus>(
    cpu: &mut C,
    bus: &mut B,
    out: &mut Outcome,
    set_break: bool,
) {
    let v = cpu.compose_status_for_push(set_break);
    push_byte(cpu, bus, out, v);
}

/// Pull P (PLP/RTI). The pulled B bit is discarded; the current B and bit 5
/// are kept.
#[inline]
pub(crate) fn pull_status<C: CpuRegs, B: SystemBus>(cpu: &mut C, bus: &mut B, out: &mut Outcome) {
    let pulled = pull_byte(cpu, bus, out);
    let keep = cpu.status() & BREAK;
    cpu.set_status((pulled & !BREAK) | keep | UNUSED);
}

// ---------------------------------------------------------------------------
// Loads / transfers / register inc-dec
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_a(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn ldx<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_x(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn ldy<C: CpuRegs>(cpu: &mut C, v: u8) {
    cpu.set_y(v);
    update_zn(cpu, v);
}

#[inline]
pub(crate) fn tax<C: CpuRegs>(cpu: &mut C) {
    let v = cpu.a();
    ldx(cpu, v);
}

#[inline]
pub(crate) fn tay<C: CpuRegs>(cpu: &mut C) {
    let v = cpu.a();
    ldy(cpu, v);
}

#[inline]
pub(crate) fn txa<C: CpuRegs>(cpu: &mut C) {
    let v = cpu.x();
    lda(cpu, v);
}

#[inline]
pub(crate) fn tya<C: CpuRegs>(cpu: &mut C) {
    let v = cpu.y();
    lda(cpu, v);
}

#[inline]
pub(crate) fn tsx<C: CpuRegs>(cpu: &mut C) {
    let v = cpu.sp();
    ldx(cpu, v);
}

/// TXS affects no flags.
#[inline]
pub(crate) fn txs<C: CpuRegs>(cpu: &mut C) {
    let x = cpu.x();
    cpu.set_sp(x);
}

#[inline]
pub(crate) fn inx<C: CpuRegs>(cpu: &mut C) {
    let v = cpu.x().wrapping_add(1);
    ldx(cpu, v);
}

#[inline]
pub(crate) fn iny<C: CpuRegs>(cpu: &mut C) {
    let v = cpu.y().wrapping_add(1);
    ldy(cpu, v);
}

#[inline]
pub(crate) fn dex<C: CpuRegs>(cpu: &mut C) {
    let v = cpu.x().wrapping_sub(1);
    ldx(cpu, v);
}

#[inline]
pub(crate) fn dey<C: CpuRegs>(cpu: &mut C) {
    let v = cpu.y().wrapping_sub(1);
    ldy(cpu, v);
}

// ---------------------------------------------------------------------------
// Logical / BIT
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn and<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() & v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn ora<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() | v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn eor<C: CpuRegs>(cpu: &mut C, v: u8) {
    let r = cpu.a() ^ v;
    lda(cpu, r);
}

#[inline]
pub(crate) fn bit<C: CpuRegs>(cpu: &mut C, v: u8) {
    let masked = cpu.a() & v;
    set_flag(cpu, ZERO, masked == 0);
    set_flag(cpu, NEGATIVE, (v & 0x80) != 0);
    set_flag(cpu, OVERFLOW, (v & 0x40) != 0);
}

// ---------------------------------------------------------------------------
// ADC / SBC (binary only)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn adc<C: CpuRegs>(cpu: &mut C, v: u8) {
    let a = cpu.a();
    let carry_in = get_flag(cpu, CARRY) as u16;
    let sum = a as u16 + v as u16 + carry_in;
    let result = sum as u8;

    set_flag(cpu, CARRY, sum > 0xFF);
    set_flag(cpu, OVERFLOW, (!(a ^ v) & (a ^ result) & 0x80) != 0);
    lda(cpu, result);
}

#[inline]
pub(crate) fn sbc<C: CpuRegs>(cpu: &mut C, v: u8) {
    adc(cpu, v ^ 0xFF);
}

/// CMP/CPX/CPY: C = reg >= v, Z/N from reg - v.
#[inline]
pub(crate) fn compare<C: CpuRegs>(cpu: &mut C, reg: u8, v: u8) {
    set_flag(cpu, CARRY, reg >= v);
    update_zn(cpu, reg.wrapping_sub(v));
}

// ---------------------------------------------------------------------------
// Shifts / rotates (value transforms; flags set here)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    set_flag(cpu, CARRY, (v & 0x80) != 0);
    let r = v << 1;
    update_zn(cpu, r);
    r
}

#[inline]
pub(crate) fn lsr<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    set_flag(cpu, CARRY, (v & 0x01) != 0);
    let r = v >> 1;
    update_zn(cpu, r);
    r
}

#[inline]
pub(crate) fn rol<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = get_flag(cpu, CARRY) as u8;
    set_flag(cpu, CARRY, (v & 0x80) != 0);
    let r = (v << 1) | carry_in;
    update_zn(cpu, r);
    r
}

#[inline]
pub(crate) fn ror<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let carry_in = if get_flag(cpu, CARRY) { 0x80 } else { 0 };
    set_flag(cpu, CARRY, (v & 0x01) != 0);
    let r = (v >> 1) | carry_in;
    update_zn(cpu, r);
    r
}

#[inline]
pub(crate) fn inc<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let r = v.wrapping_add(1);
    update_zn(cpu, r);
    r
}

#[inline]
pub(crate) fn dec<C: CpuRegs>(cpu: &mut C, v: u8) -> u8 {
    let r = v.wrapping_sub(1);
    update_zn(cpu, r);
    r
}

/// Apply `f` to an operand in place. Memory operands follow the RMW bus
/// sequence: read, dummy write of the old value, write of the new value.
pub(crate) fn modify<C, B, F>(cpu: &mut C, bus: &mut B, operand: Operand, f: F)
where
    C: CpuRegs,
    B: SystemBus,
    F: FnOnce(&mut C, u8) -> u8,
{
    match operand {
        Operand::Address(addr) => {
            let old = bus.read(Device::Cpu, addr);
            bus.write(Device::Cpu, addr, old);
            let new = f(cpu, old);
            bus.write(Device::Cpu, addr, new);
        }
        Operand::Accumulator => {
            let old = cpu.a();
            let new = f(cpu, old);
            cpu.set_a(new);
        }
        Operand::Implied => {}
    }
}

/*!
logical.rs - AND / ORA / EOR / BIT.

AND, ORA and EOR combine the operand into A and update Z/N. BIT sets Z
from `A & M` and copies bits 7 and 6 of M into N and V; A is unchanged.
*/

use crate::bus::SystemBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{and, bit, eor, ora, read_operand};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Op;

pub(super) fn handle<C: CpuRegs, B: SystemBus>(
    op: Op,
    operand: Operand,
    cpu: &mut C,
    bus: &mut B,
) -> bool {
    let f: fn(&mut C, u8) = match op {
        Op::And => and,
        Op::Ora => ora,
        Op::Eor => eor,
        Op::Bit => bit,
        _ => return false,
    };
    let v = read_operand(cpu, bus, operand);
    f(cpu, v);
    true
}

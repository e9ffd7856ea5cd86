/*!
rmw.rs - ASL / LSR / ROL / ROR / INC / DEC.

Accumulator forms update A. Memory forms follow the read-modify-write bus
sequence (`execute::modify`): read, dummy write of the unmodified value,
write of the result. The carry takes the bit shifted out; ROL/ROR fold the
old carry in.
*/

use crate::bus::SystemBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{asl, dec, inc, lsr, modify, rol, ror};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Op;

pub(super) fn handle<C: CpuRegs, B: SystemBus>(
    op: Op,
    operand: Operand,
    cpu: &mut C,
    bus: &mut B,
) -> bool {
    let f: fn(&mut C, u8) -> u8 = match op {
        Op::Asl => asl,
        Op::Lsr => lsr,
        Op::Rol => rol,
        Op::Ror => ror,
        Op::Inc => inc,
        Op::Dec => dec,
        _ => return false,
    };
    modify(cpu, bus, operand, f);
    true
}

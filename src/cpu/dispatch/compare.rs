/*!
compare.rs - CMP / CPX / CPY.

C = register >= M (unsigned), Z/N from `register - M`. The register is not
modified.
*/

use crate::bus::SystemBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{compare, read_operand};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Op;

pub(super) fn handle<C: CpuRegs, B: SystemBus>(
    op: Op,
    operand: Operand,
    cpu: &mut C,
    bus: &mut B,
) -> bool {
    let reg = match op {
        Op::Cmp => cpu.a(),
        Op::Cpx => cpu.x(),
        Op::Cpy => cpu.y(),
        _ => return false,
    };
    let v = read_operand(cpu, bus, operand);
    compare(cpu, reg, v);
    true
}

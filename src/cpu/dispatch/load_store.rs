/*!
load_store.rs - LDA / LDX / LDY / STA / STX / STY.

Loads read the resolved operand and update Z/N. Stores write the register
to the resolved address and touch no flags.
*/

use crate::bus::{Device, SystemBus};
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{lda, ldx, ldy, read_operand};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Op;

pub(super) fn handle<C: CpuRegs, B: SystemBus>(
    op: Op,
    operand: Operand,
    cpu: &mut C,
    bus: &mut B,
) -> bool {
    match op {
        Op::Lda => {
            let v = read_operand(cpu, bus, operand);
            lda(cpu, v);
        }
        Op::Ldx => {
            let v = read_operand(cpu, bus, operand);
            ldx(cpu, v);
        }
        Op::Ldy => {
            let v = read_operand(cpu, bus, operand);
            ldy(cpu, v);
        }
        Op::Sta => store(bus, operand, cpu.a()),
        Op::Stx => store(bus, operand, cpu.x()),
        Op::Sty => store(bus, operand, cpu.y()),
        _ => return false,
    }
    true
}

#[inline]
fn store<B: SystemBus>(bus: &mut B, operand: Operand, v: u8) {
    if let Operand::Address(addr) = operand {
        bus.write(Device::Cpu, addr, v);
    }
}

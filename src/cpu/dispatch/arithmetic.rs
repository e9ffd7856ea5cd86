/*!
arithmetic.rs - ADC / SBC.

Binary arithmetic only: the D flag is stored but ignored, as on the NES.
C is the 9-bit carry; V is `~(A ^ M) & (A ^ R) & 0x80`. SBC is ADC of
`M ^ 0xFF`.
*/

use crate::bus::SystemBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{adc, read_operand, sbc};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Op;

pub(super) fn handle<C: CpuRegs, B: SystemBus>(
    op: Op,
    operand: Operand,
    cpu: &mut C,
    bus: &mut B,
) -> bool {
    match op {
        Op::Adc => {
            let v = read_operand(cpu, bus, operand);
            adc(cpu, v);
        }
        Op::Sbc => {
            let v = read_operand(cpu, bus, operand);
            sbc(cpu, v);
        }
        _ => return false,
    }
    true
}

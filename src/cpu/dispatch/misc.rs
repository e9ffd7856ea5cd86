/*!
misc.rs - Transfers, stack pushes/pulls, flag operations, register
increments and NOP.

- TAX TAY TXA TYA TSX update Z/N; TXS touches no flags.
- PHA / PLA (Z/N on pull), PHP (B = 1 in the pushed copy), PLP (pulled B
  discarded).
- CLC SEC CLI SEI CLD SED CLV each touch exactly one bit.
*/

use crate::bus::SystemBus;
use crate::cpu::execute::{
    Outcome, dex, dey, inx, iny, lda, pull_byte, pull_status, push_byte, push_status, set_flag,
    tax, tay, tsx, txa, txs, tya,
};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, DECIMAL, IRQ_DISABLE, OVERFLOW};
use crate::cpu::table::Op;

pub(super) fn handle<C: CpuRegs, B: SystemBus>(
    op: Op,
    cpu: &mut C,
    bus: &mut B,
    out: &mut Outcome,
) -> bool {
    match op {
        Op::Tax => tax(cpu),
        Op::Tay => tay(cpu),
        Op::Txa => txa(cpu),
        Op::Tya => tya(cpu),
        Op::Tsx => tsx(cpu),
        Op::Txs => txs(cpu),

        Op::Inx => inx(cpu),
        Op::Iny => iny(cpu),
        Op::Dex => dex(cpu),
        Op::Dey => dey(cpu),

        Op::Pha => {
            let a = cpu.a();
            push_byte(cpu, bus, out, a);
        }
        Op::Pla => {
            let v = pull_byte(cpu, bus, out);
            lda(cpu, v);
        }
        Op::Php => push_status(cpu, bus, out, true),
        Op::Plp => pull_status(cpu, bus, out),

        Op::Clc => set_flag(cpu, CARRY, false),
        Op::Sec => set_flag(cpu, CARRY, true),
        Op::Cli => set_flag(cpu, IRQ_DISABLE, false),
        Op::Sei => set_flag(cpu, IRQ_DISABLE, true),
        Op::Cld => set_flag(cpu, DECIMAL, false),
        Op::Sed => set_flag(cpu, DECIMAL, true),
        Op::Clv => set_flag(cpu, OVERFLOW, false),

        Op::Nop => {}
        _ => return false,
    }
    true
}

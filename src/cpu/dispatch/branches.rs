/*!
branches.rs - Relative branch conditions (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ).

Cycle Rules
===========
Base cost: 2 cycles.
Taken: +1.
Taken and the target is on a different page than the next instruction: +2.

The step machine owns the timing: on a branch's terminal cycle it asks
`taken`, and a taken branch is deferred by its penalty before PC moves.
*/

use crate::cpu::execute::get_flag;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
use crate::cpu::table::Op;

/// Branch condition for `op`, or `None` when `op` is not a branch.
pub(crate) fn taken<C: CpuRegs>(op: Op, cpu: &C) -> Option<bool> {
    let cond = match op {
        Op::Bpl => !get_flag(cpu, NEGATIVE),
        Op::Bmi => get_flag(cpu, NEGATIVE),
        Op::Bvc => !get_flag(cpu, OVERFLOW),
        Op::Bvs => get_flag(cpu, OVERFLOW),
        Op::Bcc => !get_flag(cpu, CARRY),
        Op::Bcs => get_flag(cpu, CARRY),
        Op::Bne => !get_flag(cpu, ZERO),
        Op::Beq => get_flag(cpu, ZERO),
        _ => return None,
    };
    Some(cond)
}

/// Branch target: `next_pc` plus the signed displacement.
#[inline]
pub(crate) fn target(next_pc: u16, displacement: u8) -> u16 {
    next_pc.wrapping_add(displacement as i8 as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::core::Cycle;
    use crate::cpu::state::CpuState;
    use crate::test_utils::{run_instruction, setup, setup_flat};

    #[test]
    fn conditions_follow_single_flags() {
        let mut s = CpuState::new();
        assert_eq!(taken(Op::Bcc, &s), Some(true));
        assert_eq!(taken(Op::Bcs, &s), Some(false));
        s.assign_flag(CARRY, true);
        assert_eq!(taken(Op::Bcs, &s), Some(true));
        assert_eq!(taken(Op::Lda, &s), None);
    }

    #[test]
    fn target_is_signed() {
        assert_eq!(target(0x8002, 0x02), 0x8004);
        assert_eq!(target(0x8002, 0xFE), 0x8000);
        assert_eq!(target(0x0001, 0x80), 0xFF81);
    }

    #[test]
    fn branch_not_taken_base_cycles() {
        // BCS +2 with carry clear
        let (mut cpu, mut bus) = setup(&[0xB0, 0x02, 0xEA, 0x00]);
        let (c, _) = run_instruction(&mut cpu, &mut bus);
        assert_eq!(c, 2);
        assert_eq!(cpu.pc(), 0x8002);
    }

    #[test]
    fn branch_taken_no_page_cross() {
        // BCC +2 with carry clear
        let (mut cpu, mut bus) = setup(&[0x90, 0x02, 0xEA, 0x00]);
        let (c, r) = run_instruction(&mut cpu, &mut bus);
        assert_eq!(c, 3);
        assert_eq!(r.cycles, 3);
        assert_eq!(cpu.pc(), 0x8004);
    }

    #[test]
    fn branch_taken_page_cross() {
        // BNE +1 at $80FD: next PC $80FF, target $8100
        let (mut cpu, mut bus) = setup_flat(0x80FD, &[0xD0, 0x01]);
        let (c, _) = run_instruction(&mut cpu, &mut bus);
        assert_eq!(c, 4);
        assert_eq!(cpu.pc(), 0x8100);
    }

    #[test]
    fn backward_branch_page_cross() {
        // BNE -6 at $8100: next PC $8102, target $80FC
        let (mut cpu, mut bus) = setup_flat(0x8100, &[0xD0, 0xFA]);
        let (c, _) = run_instruction(&mut cpu, &mut bus);
        assert_eq!(c, 4);
        assert_eq!(cpu.pc(), 0x80FC);
    }

    #[test]
    fn taken_branch_defers_pc_until_commit() {
        let (mut cpu, mut bus) = setup(&[0xD0, 0x10]);
        assert_eq!(cpu.step(&mut bus), Ok(Cycle::Decode));
        assert!(!cpu.branch_deferred());
        // Terminal cycle of the base count: branch armed, PC not moved yet.
        assert_eq!(cpu.step(&mut bus), Ok(Cycle::Busy));
        assert!(cpu.branch_deferred());
        assert_eq!(cpu.cycles_remaining(), 1);
        assert_eq!(cpu.pc(), 0x8002);
        let c = cpu.step(&mut bus);
        assert!(matches!(c, Ok(Cycle::Retired(_))));
        assert!(!cpu.branch_deferred());
        assert_eq!(cpu.pc(), 0x8012);
    }
}

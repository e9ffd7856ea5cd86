/*!
control_flow.rs - JMP / JSR / RTS / RTI / BRK.

PC at execute time already points past the instruction.

- JMP: PC = resolved address (the indirect form already applied the
  page-wrap quirk during resolution).
- JSR: push (PC - 1) high then low; PC = target.
- RTS: pull low, high; PC = value + 1.
- RTI: pull status (B discarded), then PC.
- BRK: push PC + 1 (the BRK address + 2), push status with B = 1, set I,
  PC = vector at $FFFE/$FFFF. Flags the outcome as BRK for halting hosts.
*/

use crate::bus::{Device, SystemBus};
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{Outcome, pull_status, pull_word, push_status, push_word, set_flag};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::IRQ_DISABLE;
use crate::cpu::table::Op;

/// IRQ / BRK vector.
pub(crate) const IRQ_VECTOR: u16 = 0xFFFE;

pub(super) fn handle<C: CpuRegs, B: SystemBus>(
    op: Op,
    operand: Operand,
    cpu: &mut C,
    bus: &mut B,
    out: &mut Outcome,
) -> bool {
    match op {
        Op::Jmp => {
            if let Operand::Address(target) = operand {
                cpu.set_pc(target);
            }
        }
        Op::Jsr => {
            let ret = cpu.pc().wrapping_sub(1);
            push_word(cpu, bus, out, ret);
            if let Operand::Address(target) = operand {
                cpu.set_pc(target);
            }
        }
        Op::Rts => {
            let ret = pull_word(cpu, bus, out);
            cpu.set_pc(ret.wrapping_add(1));
        }
        Op::Rti => {
            pull_status(cpu, bus, out);
            let pc = pull_word(cpu, bus, out);
            cpu.set_pc(pc);
        }
        Op::Brk => {
            let ret = cpu.pc().wrapping_add(1);
            push_word(cpu, bus, out, ret);
            push_status(cpu, bus, out, true);
            set_flag(cpu, IRQ_DISABLE, true);
            let vector = bus.read_word(Device::Cpu, IRQ_VECTOR);
            cpu.set_pc(vector);
            out.brk = true;
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::bus::{Device, SystemBus};
    use crate::cpu::state::{BREAK, IRQ_DISABLE, UNUSED};
    use crate::cpu::table::Op;
    use crate::test_utils::{IRQ_TARGET, ORIGIN, run_instruction, setup, setup_flat};

    #[test]
    fn jmp_absolute() {
        let (mut cpu, mut bus) = setup(&[0x4C, 0x34, 0x12]);
        let (c, _) = run_instruction(&mut cpu, &mut bus);
        assert_eq!(c, 3);
        assert_eq!(cpu.pc(), 0x1234);
    }

    #[test]
    fn jmp_indirect_page_wrap_every_page() {
        for page in 0x00u16..=0xFF {
            let ptr = (page << 8) | 0x00FF;
            let [lo, hi] = ptr.to_le_bytes();
            let origin = ((page ^ 0x80) << 8) | 0x0010;
            let (mut cpu, mut bus) = setup_flat(origin, &[0x6C, lo, hi]);
            bus.poke(ptr, 0x34);
            bus.poke(page << 8, 0x12);
            bus.poke(ptr.wrapping_add(1), 0x56);
            let (c, _) = run_instruction(&mut cpu, &mut bus);
            assert_eq!(c, 5);
            assert_eq!(cpu.pc(), 0x1234, "page {page:02X}");
        }
    }

    #[test]
    fn jsr_rts_round_trip() {
        // $8000: JSR $8010 ; $8003: NOP ... $8010: RTS
        let mut prg = vec![0xEA; 0x20];
        prg[0..3].copy_from_slice(&[0x20, 0x10, 0x80]);
        prg[0x10] = 0x60;
        let (mut cpu, mut bus) = setup(&prg);
        let sp = cpu.sp();
        let (c, _) = run_instruction(&mut cpu, &mut bus);
        assert_eq!(c, 6);
        assert_eq!(cpu.pc(), 0x8010);
        assert_eq!(cpu.sp(), sp.wrapping_sub(2));
        // Return address pushed is JSR + 2, high byte first.
        assert_eq!(bus.read(Device::Cpu, 0x0100 | sp as u16), 0x80);
        assert_eq!(bus.read(Device::Cpu, 0x0100 | sp.wrapping_sub(1) as u16), 0x02);
        let (c, _) = run_instruction(&mut cpu, &mut bus);
        assert_eq!(c, 6);
        assert_eq!(cpu.pc(), 0x8003);
        assert_eq!(cpu.sp(), sp);
    }

    #[test]
    fn brk_pushes_pc_plus_two_and_status_with_b() {
        let (mut cpu, mut bus) = setup(&[0x00, 0xFF]);
        let sp = cpu.sp();
        let status = cpu.status();
        let (c, r) = run_instruction(&mut cpu, &mut bus);
        assert_eq!(c, 7);
        assert_eq!(r.op, Op::Brk);
        assert_eq!(cpu.pc(), IRQ_TARGET);
        assert!(cpu.state().is_flag_set(IRQ_DISABLE));
        let ret = ORIGIN + 2;
        assert_eq!(bus.read(Device::Cpu, 0x0100 | sp as u16), (ret >> 8) as u8);
        assert_eq!(bus.read(Device::Cpu, 0x0100 | sp.wrapping_sub(1) as u16), ret as u8);
        assert_eq!(
            bus.read(Device::Cpu, 0x0100 | sp.wrapping_sub(2) as u16),
            status | BREAK | UNUSED
        );
        // The live status never shows B.
        assert_eq!(cpu.status() & BREAK, 0);
    }

    #[test]
    fn rti_restores_status_and_pc() {
        // LDX #$FA ; TXS ; RTI with stack: status $D3, PC $1234
        let (mut cpu, mut bus) = setup(&[0xA2, 0xFA, 0x9A, 0x40]);
        bus.write(Device::Cpu, 0x01FB, 0xD3); // N V B Z C
        bus.write(Device::Cpu, 0x01FC, 0x34);
        bus.write(Device::Cpu, 0x01FD, 0x12);
        run_instruction(&mut cpu, &mut bus);
        run_instruction(&mut cpu, &mut bus);
        let (c, _) = run_instruction(&mut cpu, &mut bus);
        assert_eq!(c, 6);
        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cpu.status(), 0xC3 | UNUSED);
        assert_eq!(cpu.sp(), 0xFD);
    }
}

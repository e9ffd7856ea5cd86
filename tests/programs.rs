//! Whole programs driven through the public API on the NES bus.

use nes6502::cpu::disassemble;
use nes6502::{
    Bus, Cpu, CpuConfig, CpuError, Cycle, Device, Interrupt, LinearRom, Op, SystemBus,
};

const NMI_HANDLER: u16 = 0x9000;
const IRQ_HANDLER: u16 = 0xA000;

/// Lay out `chunks` of (address, bytes) in a cartridge image, reset to $8000.
fn machine(chunks: &[(u16, &[u8])], config: CpuConfig) -> (Cpu, Bus) {
    let mut rom = LinearRom::with_program(0x8000, &[], NMI_HANDLER, 0x8000, IRQ_HANDLER);
    let mut image = rom.as_slice().to_vec();
    for &(addr, bytes) in chunks {
        let base = (addr - 0x8000) as usize;
        image[base..base + bytes.len()].copy_from_slice(bytes);
    }
    rom = LinearRom::new(image);

    let mut bus = Bus::new();
    bus.attach_cartridge(rom);
    let mut cpu = Cpu::with_config(config);
    cpu.reset(&mut bus);
    (cpu, bus)
}

fn halting() -> CpuConfig {
    CpuConfig {
        halt_on_brk: true,
        ..CpuConfig::default()
    }
}

/// Step until halted; returns the retired operations in order.
fn run_to_halt(cpu: &mut Cpu, bus: &mut Bus) -> Vec<Op> {
    let mut ops = Vec::new();
    for _ in 0..10_000 {
        match cpu.step(bus).expect("decode fault") {
            Cycle::Retired(r) => ops.push(r.op),
            Cycle::Halted => return ops,
            _ => {}
        }
    }
    panic!("program never halted");
}

#[test]
fn countdown_loop_accumulates_and_stores() {
    let program: &[u8] = &[
        0xA9, 0x00, // $8000 LDA #$00
        0xA2, 0x05, // $8002 LDX #$05
        0x18, // $8004 CLC
        0x69, 0x03, // $8005 ADC #$03
        0xCA, // $8007 DEX
        0xD0, 0xFA, // $8008 BNE $8004
        0x8D, 0x00, 0x02, // $800A STA $0200
        0x00, // $800D BRK
    ];
    let (mut cpu, mut bus) = machine(&[(0x8000, program)], halting());
    let ops = run_to_halt(&mut cpu, &mut bus);

    assert_eq!(cpu.a(), 15);
    assert_eq!(cpu.x(), 0);
    assert_eq!(bus.read(Device::Cpu, 0x0200), 15);
    assert_eq!(ops.iter().filter(|&&op| op == Op::Adc).count(), 5);
    assert_eq!(ops.last(), Some(&Op::Brk));
    // 2 + 2 + 4 * (2 + 2 + 2 + 3) + (2 + 2 + 2 + 2) + 4 + 7
    assert_eq!(cpu.total_cycles(), 59);
    assert_eq!(cpu.pc(), IRQ_HANDLER);
}

#[test]
fn subroutine_call_and_return() {
    let main: &[u8] = &[
        0x20, 0x10, 0x80, // $8000 JSR $8010
        0x8D, 0x01, 0x02, // $8003 STA $0201
        0x00, // $8006 BRK
    ];
    let sub: &[u8] = &[
        0xA9, 0x2A, // $8010 LDA #$2A
        0x60, // $8012 RTS
    ];
    let (mut cpu, mut bus) = machine(&[(0x8000, main), (0x8010, sub)], halting());
    let ops = run_to_halt(&mut cpu, &mut bus);

    assert_eq!(ops, vec![Op::Jsr, Op::Lda, Op::Rts, Op::Sta, Op::Brk]);
    assert_eq!(bus.read(Device::Cpu, 0x0201), 0x2A);
    // Only BRK's three bytes remain on the stack.
    assert_eq!(cpu.sp(), 0xFD - 3);
    assert_eq!(cpu.stack_fault_count(), 0);
}

#[test]
fn nmi_handler_runs_and_returns_to_the_loop() {
    let main: &[u8] = &[0x4C, 0x00, 0x80]; // $8000 JMP $8000
    let handler: &[u8] = &[
        0xEE, 0x00, 0x02, // $9000 INC $0200
        0x40, // $9003 RTI
    ];
    let (mut cpu, mut bus) = machine(
        &[(0x8000, main), (NMI_HANDLER, handler)],
        CpuConfig::default(),
    );
    let status = cpu.status();

    // Spin in the loop for a while, then raise NMI mid-instruction.
    for _ in 0..10 {
        cpu.step(&mut bus).expect("step");
    }
    cpu.trigger_nmi();

    let mut entered = false;
    let mut returned = false;
    for _ in 0..100 {
        match cpu.step(&mut bus).expect("step") {
            Cycle::Interrupted(kind) => {
                assert_eq!(kind, Interrupt::Nmi);
                assert_eq!(cpu.pc(), NMI_HANDLER);
                entered = true;
            }
            Cycle::Retired(r) if r.op == Op::Rti => {
                returned = true;
                break;
            }
            _ => {}
        }
    }
    assert!(entered && returned);
    assert_eq!(bus.read(Device::Cpu, 0x0200), 1);
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.status(), status);
    assert!(!cpu.nmi_pending());
}

#[test]
fn irq_waits_for_cli() {
    let main: &[u8] = &[
        0x58, // $8000 CLI
        0x4C, 0x01, 0x80, // $8001 JMP $8001
    ];
    let (mut cpu, mut bus) = machine(&[(0x8000, main)], CpuConfig::default());
    cpu.set_irq_line(true);

    // I is set out of reset, so CLI runs first.
    assert_eq!(cpu.step(&mut bus), Ok(Cycle::Decode));
    match cpu.step(&mut bus) {
        Ok(Cycle::Retired(r)) => assert_eq!(r.op, Op::Cli),
        other => panic!("expected CLI to retire, got {other:?}"),
    }

    let mut clocks = 0;
    loop {
        clocks += 1;
        if let Cycle::Interrupted(kind) = cpu.step(&mut bus).expect("step") {
            assert_eq!(kind, Interrupt::Irq);
            break;
        }
        assert!(clocks < 7);
    }
    assert_eq!(clocks, 7);
    assert_eq!(cpu.pc(), IRQ_HANDLER);
    assert_ne!(cpu.status() & 0x04, 0);
    // Return address is the JMP that had not started yet.
    assert_eq!(bus.read(Device::Cpu, 0x01FD), 0x80);
    assert_eq!(bus.read(Device::Cpu, 0x01FC), 0x01);
}

#[test]
fn unknown_opcode_reports_a_decode_fault() {
    let main: &[u8] = &[0xEA, 0x02]; // NOP, then an unassigned opcode
    let (mut cpu, mut bus) = machine(&[(0x8000, main)], CpuConfig::default());

    assert_eq!(cpu.step(&mut bus), Ok(Cycle::Decode));
    assert!(matches!(cpu.step(&mut bus), Ok(Cycle::Retired(_))));
    let err = cpu.step(&mut bus).unwrap_err();
    assert_eq!(err, CpuError::DecodeFault { opcode: 0x02, pc: 0x8001 });
    assert_eq!(
        err.to_string(),
        "decode fault: opcode $02 at $8001 has no canonical operation"
    );
    // Nothing moved; the host can inspect the fault site.
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.step(&mut bus), Err(err));
}

#[test]
fn listing_a_program() {
    let program: &[u8] = &[
        0xA9, 0xC0, 0xAA, 0xE8, 0x6C, 0xFF, 0x10, 0x91, 0x40, 0xD0, 0xF5, 0x00,
    ];
    let mut pc = 0x8000u16;
    let mut off = 0usize;
    let mut lines = Vec::new();
    while off < program.len() {
        let len = 1 + nes6502::cpu::table::lookup(program[off]).mode.operand_len() as usize;
        lines.push(format!("{pc:04X}  {}", disassemble(&program[off..], pc)));
        off += len;
        pc = pc.wrapping_add(len as u16);
    }
    assert_eq!(
        lines,
        vec![
            "8000  LDA #$C0",
            "8002  TAX",
            "8003  INX",
            "8004  JMP ($10FF)",
            "8007  STA ($40),Y",
            "8009  BNE $8000",
            "800B  BRK",
        ]
    );
}

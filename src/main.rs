use nes6502::cpu::disassemble;
use nes6502::{Bus, Cpu, CpuConfig, Cycle, Device, ResetVector, SystemBus};

/// Disassemble the instruction at `pc` from what the bus holds there.
fn line_at(bus: &mut Bus, pc: u16) -> String {
    let bytes = [0, 1, 2].map(|i| bus.read(Device::Cpu, pc.wrapping_add(i)));
    disassemble(&bytes, pc)
}

fn main() {
    // LDA #$C0 / TAX / INX / BRK
    let program: &[u8] = &[0xA9, 0xC0, 0xAA, 0xE8, 0x00];

    let mut bus = Bus::new();
    bus.load(0x0000, program);

    let mut cpu = Cpu::with_config(CpuConfig {
        reset: ResetVector::Fixed(0x0000),
        halt_on_brk: true,
    });
    cpu.reset(&mut bus);

    println!("Initial: {}", cpu.snapshot());

    loop {
        match cpu.step(&mut bus) {
            Ok(Cycle::Retired(r)) => {
                println!(
                    "{:04X}  {:<12} ({} cycles)",
                    r.pc,
                    line_at(&mut bus, r.pc),
                    r.cycles
                );
                if let Some(fault) = r.stack_fault {
                    println!("      {fault}");
                }
            }
            Ok(Cycle::Interrupted(kind)) => println!("      entered {kind:?} handler"),
            Ok(Cycle::Halted) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("CPU error: {e}");
                break;
            }
        }
    }

    println!("Final:   {}", cpu.snapshot());
}

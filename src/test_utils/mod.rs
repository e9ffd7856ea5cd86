//! Shared test utilities for building small programs and running them.
//!
//! Two harnesses:
//! - `setup(program)`: NES `Bus` with a 32 KiB `LinearRom` holding `program`
//!   at `ORIGIN` ($8000) and the NMI / RESET / IRQ vectors pointing at
//!   `NMI_TARGET`, `ORIGIN` and `IRQ_TARGET`. The CPU is reset from the vector.
//! - `setup_flat(origin, program)`: 64 KiB `FlatBus` with the CPU reset to a
//!   fixed `origin`. Every address is plain RAM, so page-boundary cases can
//!   be placed anywhere.

#![allow(dead_code)]

use crate::bus::{Bus, FlatBus, SystemBus};
use crate::cartridge::LinearRom;
use crate::config::{CpuConfig, ResetVector};
use crate::cpu::core::{Cpu, Cycle, Retired};

pub const ORIGIN: u16 = 0x8000;
pub const NMI_TARGET: u16 = 0x9000;
pub const IRQ_TARGET: u16 = 0xA000;

/// NES bus with `program` in ROM at $8000 and the standard test vectors.
pub fn bus_with_program(program: &[u8]) -> Bus {
    let mut bus = Bus::new();
    bus.attach_cartridge(LinearRom::with_program(
        ORIGIN, program, NMI_TARGET, ORIGIN, IRQ_TARGET,
    ));
    bus
}

pub fn setup(program: &[u8]) -> (Cpu, Bus) {
    setup_with_config(program, CpuConfig::default())
}

pub fn setup_with_config(program: &[u8], config: CpuConfig) -> (Cpu, Bus) {
    let mut bus = bus_with_program(program);
    let mut cpu = Cpu::with_config(config);
    cpu.reset(&mut bus);
    (cpu, bus)
}

pub fn setup_flat(origin: u16, program: &[u8]) -> (Cpu, FlatBus) {
    let mut bus = FlatBus::new();
    bus.load(origin, program);
    let mut cpu = Cpu::with_config(CpuConfig {
        reset: ResetVector::Fixed(origin),
        ..CpuConfig::default()
    });
    cpu.reset(&mut bus);
    (cpu, bus)
}

/// Step until an instruction retires. Returns the number of `step` calls
/// (interrupt entries and DMA stalls on the way included) and the report.
pub fn run_instruction<B: SystemBus>(cpu: &mut Cpu, bus: &mut B) -> (u32, Retired) {
    let mut steps = 0;
    loop {
        steps += 1;
        assert!(steps < 2048, "instruction never retired");
        match cpu.step(bus).expect("decode fault") {
            Cycle::Retired(r) => return (steps, r),
            Cycle::Halted => panic!("cpu halted"),
            _ => {}
        }
    }
}

/// Clocks the first instruction of `program` takes on a fresh CPU.
pub fn cycles_of(program: &[u8]) -> u32 {
    let (mut cpu, mut bus) = setup(program);
    run_instruction(&mut cpu, &mut bus).0
}

#![doc = r#"
nes6502 library crate.

A cycle-stepped MOS 6502 core as wired into the NES: every call to
`Cpu::step` advances exactly one CPU clock.

Modules:
- bus: device-tagged CPU address space (RAM mirroring, PPU register surface, cartridge window)
- cartridge: fixed-size ROM block with linear mapping into $8000-$FFFF
- config: CPU / bus configuration (reset vector policy, BRK halting, RAM fill)
- cpu: 6502 core (state + addressing + table + execute + dispatch + step machine)
- error: decode faults and stack wrap faults

In tests, shared program builders are available under `crate::test_utils`.
"#]

// Core emulator modules
pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod error;

// Re-export commonly used types at the crate root for convenience.
pub use bus::{Bus, Device, FlatBus, SystemBus};
pub use cartridge::{Cartridge, LinearRom};
pub use config::{BusConfig, CpuConfig, ResetVector};
pub use cpu::core::{Cpu, CpuSnapshot, Cycle, Interrupt, Retired};
pub use cpu::table::Op;
pub use error::{CpuError, StackFault};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;

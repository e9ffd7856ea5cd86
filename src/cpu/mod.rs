/*!
cpu::mod - Public façade for the 6502 CPU core.

Layout:

```text
    state.rs      - Register file, flag masks, bit-5 invariant.
    regs.rs       - `CpuRegs` trait the semantics are generic over.
    addressing.rs - Addressing modes and operand resolution.
    table.rs      - 256-entry opcode table, canonical `Op`, disassembler.
    cycles.rs     - Base cycles, page-cross and branch penalties, stall lengths.
    execute.rs    - Semantic helpers (ALU, stack, RMW) and the per-instruction `Outcome`.
    dispatch/     - Execute-cycle handlers grouped by opcode family.
    core/         - `Cpu`: the clock-stepped decode / execute state machine.
```

Usage:
```rust
use nes6502::{Bus, Cpu, Cycle, CpuConfig, ResetVector};

let mut bus = Bus::new();
bus.load(0x0000, &[0xA9, 0x01]); // LDA #$01
let mut cpu = Cpu::with_config(CpuConfig {
    reset: ResetVector::Fixed(0x0000),
    ..CpuConfig::default()
});
cpu.reset(&mut bus);
assert_eq!(cpu.step(&mut bus), Ok(Cycle::Decode));
assert!(matches!(cpu.step(&mut bus), Ok(Cycle::Retired(_))));
assert_eq!(cpu.a(), 0x01);
```
*/

pub mod addressing;
pub mod core;
pub mod cycles;
pub(crate) mod dispatch;
pub(crate) mod execute;
pub mod regs;
pub mod state;
pub mod table;

pub use crate::cpu::core::{Cpu, CpuSnapshot, Cycle, Decoded, Interrupt, Phase, Retired};
pub use crate::cpu::regs::CpuRegs;
pub use crate::cpu::state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
pub use crate::cpu::table::{Instruction, Op, disassemble};

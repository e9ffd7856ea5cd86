/*!
cycles.rs - Cycle timing helpers for the 6502 core.

Base counts live in the opcode table (`table::INSTRUCTIONS`). This module
provides the dynamic parts:
  - `page_crossed(a, b)`: high bytes differ.
  - `branch_penalty(next_pc, target)`: extra cycles of a taken branch.
  - `dma_stall(cycle)`: OAM DMA stall length by cycle parity.

Dynamic adjustments are applied by the step machine in `core`; nothing here
touches the bus.
*/

/// Cycles an interrupt entry (NMI / IRQ) takes.
pub const INTERRUPT_CYCLES: u8 = 7;

/// Base stall of an OAM DMA transfer; one more when it starts on an odd cycle.
pub const DMA_STALL_CYCLES: u16 = 513;

#[inline]
pub fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// Extra cycles of a taken branch: 1, or 2 when the target lies on a
/// different page than the instruction following the branch.
#[inline]
pub fn branch_penalty(next_pc: u16, target: u16) -> u8 {
    if page_crossed(next_pc, target) { 2 } else { 1 }
}

/// Stall length for a DMA requested while the CPU clock stands at `cycle`.
#[inline]
pub fn dma_stall(cycle: u64) -> u16 {
    DMA_STALL_CYCLES + (cycle & 1) as u16
}

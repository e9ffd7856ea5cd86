/*!
error.rs - Fault types surfaced by the CPU core.

Two families:
- `CpuError`: fatal conditions returned from `Cpu::step`. The driving loop is
  expected to stop on them.
- `StackFault`: the stack pointer wrapped past either end of page 1. Real
  hardware wraps silently; the core performs the wrapped transfer anyway and
  hands the fault back so debug tooling can observe it.

Neither family is ever printed or logged by the core.
*/

use thiserror::Error;

/// Fatal CPU conditions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The byte at `pc` has no canonical operation in the instruction table.
    #[error("decode fault: opcode ${opcode:02X} at ${pc:04X} has no canonical operation")]
    DecodeFault { opcode: u8, pc: u16 },
}

/// Stack pointer wrap events. The transfer itself has already happened.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackFault {
    /// A push stored at `addr` ($0100) and wrapped SP from $00 to $FF.
    #[error("stack overflow: push at ${addr:04X} wrapped SP to ${sp:02X}")]
    Overflow { sp: u8, addr: u16 },
    /// A pull wrapped SP from $FF to $00 and loaded `value` from `addr` ($0100).
    #[error("stack underflow: pull from ${addr:04X} wrapped SP to ${sp:02X}")]
    Underflow { sp: u8, addr: u16, value: u8 },
}

impl StackFault {
    /// Stack pointer value after the wrapping transfer.
    pub fn sp(&self) -> u8 {
        match *self {
            StackFault::Overflow { sp, .. } | StackFault::Underflow { sp, .. } => sp,
        }
    }
}

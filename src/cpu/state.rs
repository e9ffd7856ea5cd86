/*!
state.rs - Canonical 6502 architectural state (registers + flags).

Overview
========
`CpuState` owns every architecturally visible register. It excludes:
  - Bus / memory logic
  - Decode and step sequencing
  - Cycle accounting
Those live in `addressing`, `core` and `cycles`.

Invariants
==========
- Status bit 5 (UNUSED) is set at all times. Every mutator that can touch
  the status byte forces it back on.
- `sp` is an 8-bit offset into page 1; the stack byte lives at `0x0100 | sp`.

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
  N = NEGATIVE
  V = OVERFLOW
  1 = UNUSED (always reads as 1)
  B = BREAK (only meaningful in pushed copies: PHP/BRK push 1, IRQ/NMI push 0)
  D = DECIMAL (settable, but the NES ALU ignores it)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY
*/

/// Processor status flag bit masks.
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000; // No BCD on the NES 2A03.
pub const BREAK: u8 = 0b0001_0000;
pub const UNUSED: u8 = 0b0010_0000; // Always set.
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

/// Power-on status: I and bit 5.
pub const POWER_ON_STATUS: u8 = IRQ_DISABLE | UNUSED;
/// Power-on stack pointer.
pub const POWER_ON_SP: u8 = 0xFD;
/// Base address of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Register file of the 6502.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub(crate) a: u8,
    pub(crate) x: u8,
    pub(crate) y: u8,
    pub(crate) sp: u8,
    pub(crate) pc: u16,
    pub(crate) status: u8,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: POWER_ON_SP,
            pc: 0x0000,
            status: POWER_ON_STATUS,
        }
    }
}

impl CpuState {
    /// Power-on register values with PC = 0.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    pub fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    pub fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    pub fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    pub fn status(&self) -> u8 {
        self.status
    }

    #[inline]
    pub fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    pub fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    pub fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    pub fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    pub fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }

    /// Replace the status byte. Bit 5 is forced on.
    #[inline]
    pub fn set_status(&mut self, v: u8) {
        self.status = v | UNUSED;
    }

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    /// Return true if every bit of `mask` is set.
    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        (self.status & mask) == mask
    }

    /// Set or clear the bits of `mask`. Bit 5 stays on.
    #[inline]
    pub fn assign_flag(&mut self, mask: u8, value: bool) {
        let s = if value {
            self.status | mask
        } else {
            self.status & !mask
        };
        self.status = s | UNUSED;
    }
}

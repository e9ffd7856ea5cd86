/*!
regs.rs - `CpuRegs`: the register + flag interface instruction semantics are
written against.

The trait excludes bus access, stack transfers and operand fetch; those stay
explicit at call sites (`execute`, `addressing`) so borrows of the bus and the
register file never overlap. Handlers are generic over `C: CpuRegs`, giving
static dispatch in the hot path.
*/

use crate::cpu::state::{BREAK, CpuState, NEGATIVE, STACK_PAGE, UNUSED, ZERO};

pub trait CpuRegs {
    fn a(&self) -> u8;
    fn x(&self) -> u8;
    fn y(&self) -> u8;
    fn sp(&self) -> u8;
    fn pc(&self) -> u16;
    fn status(&self) -> u8;

    fn set_a(&mut self, v: u8);
    fn set_x(&mut self, v: u8);
    fn set_y(&mut self, v: u8);
    fn set_sp(&mut self, v: u8);
    fn set_pc(&mut self, v: u16);
    /// Implementations must keep bit 5 set.
    fn set_status(&mut self, v: u8);

    /// Advance PC by `delta` (wrapping at 16 bits).
    fn advance_pc(&mut self, delta: u16);

    fn is_flag_set(&self, mask: u8) -> bool;

    /// Set or clear the bits of `mask`.
    fn assign_flag(&mut self, mask: u8, value: bool);

    /// ZERO and NEGATIVE from a result byte.
    #[inline]
    fn update_zn(&mut self, result: u8) {
        self.assign_flag(ZERO, result == 0);
        self.assign_flag(NEGATIVE, (result & 0x80) != 0);
    }

    /// Page-1 address SP currently points at: where the next push stores.
    #[inline]
    fn stack_addr(&self) -> u16 {
        STACK_PAGE | self.sp() as u16
    }

    /// Status byte as pushed to the stack. Bit 5 is always 1; B is 1 for
    /// PHP/BRK and 0 for IRQ/NMI.
    #[inline]
    fn compose_status_for_push(&self, set_break: bool) -> u8 {
        let v = self.status() | UNUSED;
        if set_break { v | BREAK } else { v & !BREAK }
    }
}

impl CpuRegs for CpuState {
    #[inline]
    fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    fn status(&self) -> u8 {
        self.status
    }
    #[inline]
    fn set_a(&mut self, v: u8) {
        self.a = v;
    }
    #[inline]
    fn set_x(&mut self, v: u8) {
        self.x = v;
    }
    #[inline]
    fn set_y(&mut self, v: u8) {
        self.y = v;
    }
    #[inline]
    fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    fn set_status(&mut self, v: u8) {
        CpuState::set_status(self, v);
    }
    #[inline]
    fn advance_pc(&mut self, delta: u16) {
        CpuState::advance_pc(self, delta);
    }
    #[inline]
    fn is_flag_set(&self, mask: u8) -> bool {
        CpuState::is_flag_set(self, mask)
    }
    #[inline]
    fn assign_flag(&mut self, mask: u8, value: bool) {
        CpuState::assign_flag(self, mask, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::{CARRY, IRQ_DISABLE};

    fn generic_update<C: CpuRegs>(c: &mut C, v: u8) {
        c.update_zn(v);
    }

    #[test]
    fn update_zn_behavior() {
        let mut s = CpuState::new();
        generic_update(&mut s, 0x00);
        assert!(s.is_flag_set(ZERO));
        assert!(!s.is_flag_set(NEGATIVE));
        generic_update(&mut s, 0x80);
        assert!(!s.is_flag_set(ZERO));
        assert!(s.is_flag_set(NEGATIVE));
        generic_update(&mut s, 0x7F);
        assert!(!s.is_flag_set(ZERO));
        assert!(!s.is_flag_set(NEGATIVE));
    }

    #[test]
    fn compose_status_break_flag_behavior() {
        let mut s = CpuState::new();
        CpuRegs::assign_flag(&mut s, CARRY, true);
        let with_break = s.compose_status_for_push(true);
        let without_break = s.compose_status_for_push(false);
        assert_eq!(with_break, UNUSED | BREAK | IRQ_DISABLE | CARRY);
        assert_eq!(without_break, UNUSED | IRQ_DISABLE | CARRY);
    }

    #[test]
    fn stack_addr_is_page_one() {
        let mut s = CpuState::new();
        assert_eq!(CpuRegs::stack_addr(&s), 0x01FD);
        CpuRegs::set_sp(&mut s, 0x00);
        assert_eq!(CpuRegs::stack_addr(&s), 0x0100);
    }

    #[test]
    fn trait_status_setter_forces_bit_five() {
        let mut s = CpuState::new();
        CpuRegs::set_status(&mut s, 0x00);
        assert_eq!(CpuRegs::status(&s), UNUSED);
    }
}

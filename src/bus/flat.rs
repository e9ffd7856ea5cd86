/*!
flat.rs - 64 KiB flat RAM bus.

Every address is plain RAM: no mirroring, no registers, no ROM. Single-step
CPU test vectors describe memory as (address, byte) pairs over the whole
16-bit space and expect exactly this behavior. The device tag is ignored.
*/

use super::{Device, SystemBus};

/// Flat 64 KiB read/write memory.
#[derive(Clone)]
pub struct FlatBus {
    mem: Box<[u8; 0x10000]>,
}

impl std::fmt::Debug for FlatBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatBus").finish_non_exhaustive()
    }
}

impl Default for FlatBus {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatBus {
    pub fn new() -> Self {
        Self {
            mem: Box::new([0; 0x10000]),
        }
    }

    /// Copy `bytes` starting at `addr`, wrapping at $FFFF.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let mut a = addr;
        for &b in bytes {
            self.mem[a as usize] = b;
            a = a.wrapping_add(1);
        }
    }

    /// Side-effect-free read.
    #[inline]
    pub fn peek(&self, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    #[inline]
    pub fn poke(&mut self, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }
}

impl SystemBus for FlatBus {
    #[inline]
    fn read(&mut self, _device: Device, addr: u16) -> u8 {
        self.mem[addr as usize]
    }

    #[inline]
    fn write(&mut self, _device: Device, addr: u16, value: u8) {
        self.mem[addr as usize] = value;
    }
}

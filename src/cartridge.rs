/*!
Cartridge: the block of program ROM visible at $8000-$FFFF.

Purpose:
- Give the bus a narrow interface for the cartridge window so the CPU map does
  not depend on how ROM contents are stored.
- Provide `LinearRom`, a single fixed-size block mapped linearly. Blocks
  smaller than 32 KiB are mirrored by the bus (offset modulo block size), so a
  16 KiB image appears at both $8000 and $C000.

Only the `Rom` device may write through this interface; CPU writes into the
window are dropped by the bus.
*/

/// Storage behind the cartridge window.
///
/// Offsets are already reduced into `0..len()` by the bus.
pub trait Cartridge {
    /// Byte at `offset` within the block.
    fn byte_at(&self, offset: usize) -> u8;

    /// Store `value` at `offset` (loader path only).
    fn write_byte(&mut self, offset: usize, value: u8);

    /// Block size in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed-size ROM block mapped linearly into the cartridge window.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearRom {
    data: Vec<u8>,
}

impl LinearRom {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Zero-filled block of `size` bytes.
    pub fn zeroed(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Build a 32 KiB image with `program` at `origin` and the three vectors
    /// (NMI, RESET, IRQ/BRK) filled in at $FFFA-$FFFF.
    pub fn with_program(origin: u16, program: &[u8], nmi: u16, reset: u16, irq: u16) -> Self {
        let mut rom = Self::zeroed(0x8000);
        let base = origin.wrapping_sub(0x8000) as usize;
        for (i, &b) in program.iter().enumerate() {
            let off = (base + i) % rom.data.len();
            rom.data[off] = b;
        }
        for (slot, vector) in [(0x7FFAusize, nmi), (0x7FFC, reset), (0x7FFE, irq)] {
            let [lo, hi] = vector.to_le_bytes();
            rom.data[slot] = lo;
            rom.data[slot + 1] = hi;
        }
        rom
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Cartridge for LinearRom {
    #[inline]
    fn byte_at(&self, offset: usize) -> u8 {
        self.data.get(offset).copied().unwrap_or(0)
    }

    #[inline]
    fn write_byte(&mut self, offset: usize, value: u8) {
        if let Some(slot) = self.data.get_mut(offset) {
            *slot = value;
        }
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_offsets_are_inert() {
        let mut rom = LinearRom::new(vec![1, 2, 3]);
        assert_eq!(rom.byte_at(2), 3);
        assert_eq!(rom.byte_at(3), 0);
        rom.write_byte(7, 9);
        assert_eq!(rom.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn with_program_places_code_and_vectors() {
        let rom = LinearRom::with_program(0x8000, &[0xA9, 0x01], 0x9000, 0x8000, 0xA000);
        assert_eq!(rom.len(), 0x8000);
        assert_eq!(&rom.as_slice()[..2], &[0xA9, 0x01]);
        assert_eq!(&rom.as_slice()[0x7FFA..], &[0x00, 0x90, 0x00, 0x80, 0x00, 0xA0]);
    }

    #[test]
    fn empty_rom_reports_empty() {
        assert!(LinearRom::default().is_empty());
        assert!(!LinearRom::zeroed(16).is_empty());
    }
}

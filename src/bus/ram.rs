/*!
RAM module: fixed-size RAM blocks with mirrored access.

CPU address map for RAM:
- $0000-$07FF: 2 KiB internal RAM
- $0800-$1FFF: mirrors of $0000-$07FF (mask with & 0x07FF)
- $6000-$7FFF: 8 KiB work RAM (mask with & 0x1FFF)

`Ram<N>` masks any CPU address down to its physical index, so callers pass
unmodified addresses. `N` must be a power of two.
*/

/// Size of CPU internal RAM (in bytes).
pub const INTERNAL_RAM_SIZE: usize = 0x0800;

/// Size of cartridge work RAM at $6000-$7FFF (in bytes).
pub const WORK_RAM_SIZE: usize = 0x2000;

/// RAM block of `N` bytes, mirrored across any address range by masking.
#[derive(Clone)]
pub struct Ram<const N: usize> {
    data: Box<[u8; N]>,
}

impl<const N: usize> std::fmt::Debug for Ram<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ram").field("size", &N).finish()
    }
}

impl<const N: usize> Default for Ram<N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Ram<N> {
    const MASK: usize = {
        assert!(N.is_power_of_two());
        N - 1
    };

    /// Create a new RAM block initialized to 0.
    #[inline]
    pub fn new() -> Self {
        Self::filled(0)
    }

    /// Create a new RAM block with every byte set to `value`.
    #[inline]
    pub fn filled(value: u8) -> Self {
        Self {
            data: Box::new([value; N]),
        }
    }

    /// Overwrite every byte with `value`.
    #[inline]
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Read a byte at a CPU address, applying mirroring.
    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.data[Self::mirror_index(addr)]
    }

    /// Write a byte at a CPU address, applying mirroring.
    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[Self::mirror_index(addr)] = value;
    }

    /// Expose the internal slice (read-only). Useful for diagnostics or hashing.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }

    /// Physical index for a CPU address.
    #[inline]
    pub fn mirror_index(addr: u16) -> usize {
        (addr as usize) & Self::MASK
    }
}

#![doc = r#"
PPU registers: the CPU-visible register surface of the picture processor.

Purpose
- Own the eight registers at $2000-$2007 (mirrored every 8 bytes up to $3FFF)
  plus OAMDMA at $4014, as seen from the CPU side of the bus.
- Keep the shared write latch: every CPU write to any of these registers fills it,
  and reads of write-only registers return it.
- Expose the state the rendering PPU (an external collaborator) needs: control/mask
  bytes, OAM, and the internal `v`/`t`/`x`/`w` scroll registers.

Register summary
- $2000 PPUCTRL   (W)  nametable select feeds t bits 10-11; bit 2 picks the +1/+32 VRAM step
- $2001 PPUMASK   (W)
- $2002 PPUSTATUS (R)  top three bits + latch low five; read clears vblank and `w`
- $2003 OAMADDR   (W)
- $2004 OAMDATA   (RW) write stores at OAMADDR and increments it
- $2005 PPUSCROLL (Wx2) through the `w` toggle
- $2006 PPUADDR   (Wx2) through the `w` toggle; second write copies t into v
- $2007 PPUDATA   (RW) read returns the buffered byte; both directions advance v

VRAM itself lives with the PPU, so PPUDATA here only buffers the last byte
written through the port.
"#]

/// PPUSTATUS bits owned by the PPU collaborator.
pub const STATUS_SPRITE_OVERFLOW: u8 = 0b0010_0000;
pub const STATUS_SPRITE_ZERO_HIT: u8 = 0b0100_0000;
pub const STATUS_VBLANK: u8 = 0b1000_0000;

/// PPUCTRL bit selecting a 32-byte VRAM increment.
const CTRL_INCREMENT_32: u8 = 0b0000_0100;

/// CPU-visible PPU register file.
#[derive(Clone)]
pub struct PpuRegisters {
    ctrl: u8,
    mask: u8,
    status: u8,
    oam_addr: u8,
    oam_dma: u8,
    data_buffer: u8,
    oam: [u8; 256],

    // Loopy scroll registers
    v: u16,
    t: u16,
    fine_x: u8,
    w: bool,

    latch: u8,
}

impl std::fmt::Debug for PpuRegisters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PpuRegisters")
            .field("ctrl", &self.ctrl)
            .field("mask", &self.mask)
            .field("status", &self.status)
            .field("oam_addr", &self.oam_addr)
            .field("v", &self.v)
            .field("t", &self.t)
            .field("fine_x", &self.fine_x)
            .field("w", &self.w)
            .field("latch", &self.latch)
            .finish()
    }
}

impl Default for PpuRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl PpuRegisters {
    pub fn new() -> Self {
        Self {
            ctrl: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,
            oam_dma: 0,
            data_buffer: 0,
            oam: [0; 256],
            v: 0,
            t: 0,
            fine_x: 0,
            w: false,
            latch: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// CPU read at any address in $2000-$3FFF.
    pub fn cpu_read(&mut self, addr: u16) -> u8 {
        match mirror_ppu_reg(addr) {
            0x2002 => {
                let v = (self.status & 0xE0) | (self.latch & 0x1F);
                self.status &= !STATUS_VBLANK;
                self.w = false;
                v
            }
            0x2004 => self.oam[self.oam_addr as usize],
            0x2007 => {
                let v = self.data_buffer;
                self.advance_vram_addr();
                v
            }
            // PPUCTRL, PPUMASK, OAMADDR, PPUSCROLL, PPUADDR are write-only
            _ => self.latch,
        }
    }

    /// CPU write at any address in $2000-$3FFF.
    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        self.latch = value;
        match mirror_ppu_reg(addr) {
            0x2000 => {
                self.ctrl = value;
                self.t = (self.t & !0x0C00) | (((value & 0x03) as u16) << 10);
            }
            0x2001 => self.mask = value,
            0x2002 => {} // read-only; only the latch changes
            0x2003 => self.oam_addr = value,
            0x2004 => self.store_oam(value),
            0x2005 => {
                if !self.w {
                    self.fine_x = value & 0x07;
                    self.t = (self.t & !0x001F) | ((value >> 3) as u16);
                } else {
                    self.t = (self.t & !0x73E0)
                        | (((value & 0x07) as u16) << 12)
                        | (((value & 0xF8) as u16) << 2);
                }
                self.w = !self.w;
            }
            0x2006 => {
                if !self.w {
                    self.t = (self.t & 0x00FF) | (((value & 0x3F) as u16) << 8);
                } else {
                    self.t = (self.t & 0xFF00) | value as u16;
                    self.v = self.t;
                }
                self.w = !self.w;
            }
            _ => {
                // $2007
                self.data_buffer = value;
                self.advance_vram_addr();
            }
        }
    }

    /// CPU write to $4014. Returns the source page for the DMA transfer.
    pub fn write_oam_dma(&mut self, page: u8) -> u8 {
        self.latch = page;
        self.oam_dma = page;
        page
    }

    /// Read of $4014 (write-only; returns the latch).
    pub fn read_oam_dma(&self) -> u8 {
        self.latch
    }

    /// Store one byte at OAMADDR and advance it (OAMDATA writes and DMA).
    pub fn store_oam(&mut self, value: u8) {
        self.oam[self.oam_addr as usize] = value;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    #[inline]
    fn advance_vram_addr(&mut self) {
        let step = if self.ctrl & CTRL_INCREMENT_32 != 0 { 32 } else { 1 };
        self.v = self.v.wrapping_add(step) & 0x7FFF;
    }

    // ---------------------------------------------------------------------
    // Collaborator-facing accessors
    // ---------------------------------------------------------------------

    pub fn ctrl(&self) -> u8 {
        self.ctrl
    }
    pub fn mask(&self) -> u8 {
        self.mask
    }
    pub fn status(&self) -> u8 {
        self.status
    }
    pub fn oam_addr(&self) -> u8 {
        self.oam_addr
    }
    pub fn oam_dma(&self) -> u8 {
        self.oam_dma
    }
    pub fn oam(&self) -> &[u8; 256] {
        &self.oam
    }
    pub fn latch(&self) -> u8 {
        self.latch
    }
    pub fn vram_addr(&self) -> u16 {
        self.v
    }
    pub fn temp_vram_addr(&self) -> u16 {
        self.t
    }
    pub fn fine_x(&self) -> u8 {
        self.fine_x
    }
    pub fn write_toggle(&self) -> bool {
        self.w
    }

    pub fn set_vblank(&mut self, on: bool) {
        self.assign_status(STATUS_VBLANK, on);
    }
    pub fn set_sprite_zero_hit(&mut self, on: bool) {
        self.assign_status(STATUS_SPRITE_ZERO_HIT, on);
    }
    pub fn set_sprite_overflow(&mut self, on: bool) {
        self.assign_status(STATUS_SPRITE_OVERFLOW, on);
    }
    /// Buffered byte returned by the next PPUDATA read (filled by the PPU).
    pub fn set_data_buffer(&mut self, value: u8) {
        self.data_buffer = value;
    }

    #[inline]
    fn assign_status(&mut self, mask: u8, on: bool) {
        if on {
            self.status |= mask;
        } else {
            self.status &= !mask;
        }
    }
}

#[inline]
fn mirror_ppu_reg(addr: u16) -> u16 {
    0x2000 | (addr & 0x0007)
}

/*!
CPU interface dispatcher

Purpose
- Centralize address decoding for every device on the bus and delegate to the
  backing store: internal RAM, PPU registers, IO registers, work RAM, cartridge.
- Keep the decode total: each `match` below is exhaustive over `u16`, so an
  address with no defined behavior is a compile error rather than a runtime case.

Device rules
- `Cpu`, `Ppu`, `Apu`: the regular CPU map. Cartridge writes are ignored (ROM).
- `Rom`: the loader path. Writes into $8000-$FFFF store into the cartridge; all
  other ranges behave as for the CPU.

Notes
- Open bus: ranges with nothing driving the data lines return the last byte
  transferred (`Bus::open_bus`).
- OAM DMA ($4014) copies the source page into OAM immediately and flags a stall
  request that the CPU picks up after the current instruction.
*/

use crate::bus::{Bus, Device};

/// Read at a CPU-space address. Every device sees the same read map.
pub fn read(bus: &mut Bus, _device: Device, addr: u16) -> u8 {
    match addr {
        0x0000..=0x1FFF => bus.ram.read(addr),
        0x2000..=0x3FFF => bus.ppu.cpu_read(addr),
        0x4014 => bus.ppu.read_oam_dma(),
        0x4000..=0x401F => bus.io[(addr & 0x001F) as usize],
        0x4020..=0x5FFF => bus.open_bus,
        0x6000..=0x7FFF => bus.work_ram.read(addr),
        0x8000..=0xFFFF => match bus.cartridge.as_deref() {
            Some(cart) if !cart.is_empty() => cart.byte_at(window_offset(addr, cart.len())),
            _ => bus.open_bus,
        },
    }
}

/// Write at a CPU-space address.
pub fn write(bus: &mut Bus, device: Device, addr: u16, value: u8) {
    match addr {
        0x0000..=0x1FFF => bus.ram.write(addr, value),
        0x2000..=0x3FFF => bus.ppu.cpu_write(addr, value),
        0x4014 => {
            let page = bus.ppu.write_oam_dma(value);
            start_oam_dma(bus, page);
        }
        0x4000..=0x401F => bus.io[(addr & 0x001F) as usize] = value,
        0x4020..=0x5FFF => {
            // Expansion area: nothing listens
        }
        0x6000..=0x7FFF => bus.work_ram.write(addr, value),
        0x8000..=0xFFFF => {
            if device == Device::Rom {
                if let Some(cart) = bus.cartridge.as_deref_mut() {
                    let len = cart.len();
                    if len > 0 {
                        cart.write_byte(window_offset(addr, len), value);
                    }
                }
            }
        }
    }
}

/// Offset into a cartridge block of `len` bytes for an address in $8000-$FFFF.
#[inline]
pub fn window_offset(addr: u16, len: usize) -> usize {
    (addr.wrapping_sub(0x8000) as usize) % len
}

/// Copy $XX00-$XXFF into OAM (starting at OAMADDR) and flag the CPU stall.
fn start_oam_dma(bus: &mut Bus, page: u8) {
    let base = (page as u16) << 8;
    for i in 0..=0xFFu16 {
        let v = read(bus, Device::Ppu, base | i);
        bus.ppu.store_oam(v);
    }
    bus.dma_pending = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_offset_wraps_by_block_size() {
        assert_eq!(window_offset(0x8000, 0x4000), 0);
        assert_eq!(window_offset(0xC001, 0x4000), 1);
        assert_eq!(window_offset(0xFFFF, 0x8000), 0x7FFF);
        assert_eq!(window_offset(0x9000, 0x0300), 0x1000 % 0x0300);
    }

    #[test]
    fn io_registers_hold_last_write() {
        let mut bus = Bus::new();
        write(&mut bus, Device::Cpu, 0x4015, 0x0F);
        assert_eq!(read(&mut bus, Device::Cpu, 0x4015), 0x0F);
        write(&mut bus, Device::Apu, 0x4017, 0x40);
        assert_eq!(read(&mut bus, Device::Cpu, 0x4017), 0x40);
    }

    #[test]
    fn ppu_register_writes_route_through_mirror() {
        let mut bus = Bus::new();
        write(&mut bus, Device::Cpu, 0x2403, 0x10); // mirror of OAMADDR
        assert_eq!(bus.ppu.oam_addr(), 0x10);
        assert_eq!(bus.ppu.latch(), 0x10);
    }

    #[test]
    fn dma_respects_oamaddr_start() {
        let mut bus = Bus::new();
        write(&mut bus, Device::Cpu, 0x0300, 0xAA);
        write(&mut bus, Device::Cpu, 0x2003, 0x04);
        write(&mut bus, Device::Cpu, 0x4014, 0x03);
        assert_eq!(bus.ppu.oam()[0x04], 0xAA);
        assert_eq!(bus.ppu.oam_addr(), 0x04); // 256 increments wrap back
        assert!(bus.dma_pending);
    }
}

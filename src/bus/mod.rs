#![doc = r#"
Bus module: device-tagged CPU address space.

Overview
- `SystemBus` is the single read/write contract the CPU core is generic over.
  Every transaction carries the `Device` issuing it, so the same address can
  behave differently for the CPU and for a ROM loader.
- `Bus` implements the NES CPU map. `FlatBus` is a 64 KiB flat RAM used by
  single-step test vectors where no mirroring or registers may interfere.

Modules and responsibilities
- ram: fixed-size RAM blocks with power-of-two mirroring (2 KiB internal, 8 KiB work RAM).
- ppu_registers: CPU-visible PPU register file ($2000-$2007, $4014) and its write latch.
- cpu_interface: address decoder shared by every device; delegates to RAM, PPU registers,
  IO registers and the cartridge.
- flat: `FlatBus`.

Address map (CPU):
- $0000-$07FF: 2 KiB internal RAM
- $0800-$1FFF: mirrors of $0000-$07FF (addr % 0x0800)
- $2000-$2007: PPU registers
- $2008-$3FFF: mirrors of $2000-$2007 (every 8 bytes)
- $4000-$401F: APU / IO register file; $4014 is OAMDMA
- $4020-$5FFF: expansion area (open bus)
- $6000-$7FFF: 8 KiB work RAM
- $8000-$FFFF: cartridge window, (addr - $8000) % window size

Every 16-bit address decodes to exactly one backing byte or register side effect.
The bus performs no locking; one device drives it per clock edge.
"#]

pub mod cpu_interface;
pub mod flat;
pub mod ppu_registers;
pub mod ram;

pub use flat::FlatBus;
pub use ppu_registers::PpuRegisters;
pub use ram::{INTERNAL_RAM_SIZE, Ram, WORK_RAM_SIZE};

use crate::cartridge::Cartridge;
use crate::config::BusConfig;

/// Identity of the device issuing a bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    Cpu,
    Ppu,
    Apu,
    /// Cartridge loader. Writes into $8000-$FFFF store into ROM.
    Rom,
}

/// Read/write contract between the CPU core and whatever owns the address space.
pub trait SystemBus {
    /// Read a byte at an emulated 16-bit address.
    fn read(&mut self, device: Device, addr: u16) -> u8;

    /// Write a byte at an emulated 16-bit address.
    fn write(&mut self, device: Device, addr: u16, value: u8);

    /// Little-endian word read (low byte at `addr`, high byte at `addr + 1`).
    fn read_word(&mut self, device: Device, addr: u16) -> u16 {
        let lo = self.read(device, addr) as u16;
        let hi = self.read(device, addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Return and clear a pending OAM DMA request. The CPU polls this after
    /// every retired instruction and stalls for the transfer.
    fn take_dma_request(&mut self) -> bool {
        false
    }
}

/// NES CPU bus: internal RAM, PPU register surface, IO registers, work RAM
/// and the cartridge window.
pub struct Bus {
    config: BusConfig,

    // 2 KiB internal RAM + 8 KiB work RAM
    ram: Ram<INTERNAL_RAM_SIZE>,
    work_ram: Ram<WORK_RAM_SIZE>,

    // CPU-visible PPU registers (shared with the PPU collaborator)
    ppu: PpuRegisters,

    // $4000-$401F register file (APU, controllers, test registers)
    io: [u8; 0x20],

    cartridge: Option<Box<dyn Cartridge>>,

    // Last byte driven on the data bus
    open_bus: u8,

    dma_pending: bool,
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("config", &self.config)
            .field("ppu", &self.ppu)
            .field("cartridge_len", &self.cartridge.as_ref().map(|c| c.len()))
            .field("open_bus", &self.open_bus)
            .field("dma_pending", &self.dma_pending)
            .finish()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    pub fn with_config(config: BusConfig) -> Self {
        Self {
            config,
            ram: Ram::filled(config.ram_fill),
            work_ram: Ram::filled(config.ram_fill),
            ppu: PpuRegisters::new(),
            io: [0; 0x20],
            cartridge: None,
            open_bus: 0,
            dma_pending: false,
        }
    }

    /// Power-cycle RAM and registers. The cartridge stays attached.
    pub fn reset(&mut self) {
        self.ram.fill(self.config.ram_fill);
        self.work_ram.fill(self.config.ram_fill);
        self.ppu.reset();
        self.io = [0; 0x20];
        self.open_bus = 0;
        self.dma_pending = false;
    }

    pub fn attach_cartridge(&mut self, cart: impl Cartridge + 'static) {
        self.cartridge = Some(Box::new(cart));
    }

    pub fn detach_cartridge(&mut self) -> Option<Box<dyn Cartridge>> {
        self.cartridge.take()
    }

    pub fn cartridge(&self) -> Option<&dyn Cartridge> {
        self.cartridge.as_deref()
    }

    /// Copy `bytes` into the address space starting at `addr`, as the ROM loader.
    /// Wraps at $FFFF.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let mut a = addr;
        for &b in bytes {
            cpu_interface::write(self, Device::Rom, a, b);
            a = a.wrapping_add(1);
        }
    }

    pub fn ppu_registers(&self) -> &PpuRegisters {
        &self.ppu
    }

    pub fn ppu_registers_mut(&mut self) -> &mut PpuRegisters {
        &mut self.ppu
    }

    pub fn ram(&self) -> &Ram<INTERNAL_RAM_SIZE> {
        &self.ram
    }

    pub fn open_bus(&self) -> u8 {
        self.open_bus
    }
}

impl SystemBus for Bus {
    fn read(&mut self, device: Device, addr: u16) -> u8 {
        let v = cpu_interface::read(self, device, addr);
        self.open_bus = v;
        v
    }

    fn write(&mut self, device: Device, addr: u16, value: u8) {
        self.open_bus = value;
        cpu_interface::write(self, device, addr, value);
    }

    fn take_dma_request(&mut self) -> bool {
        std::mem::take(&mut self.dma_pending)
    }
}

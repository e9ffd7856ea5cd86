/*!
config.rs - Configuration knobs for the CPU core and the NES bus.

Both structs are plain data with `Default` impls so callers can use
struct-update syntax:

```rust
use nes6502::{CpuConfig, ResetVector};

let cfg = CpuConfig {
    reset: ResetVector::Fixed(0x0000),
    ..CpuConfig::default()
};
assert!(!cfg.halt_on_brk);
```

With the `serde` feature enabled every type here derives
`Serialize`/`Deserialize`, so hosts can keep them in their own config files.
*/

/// How `Cpu::reset` seeds the program counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResetVector {
    /// Load PC from the little-endian vector at $FFFC/$FFFD.
    #[default]
    FromVector,
    /// Start at a fixed address (bare programs loaded into RAM, test vectors).
    Fixed(u16),
}

/// CPU behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CpuConfig {
    pub reset: ResetVector,
    /// Stop the CPU after a BRK retires. `step` then reports `Cycle::Halted`
    /// until `resume` or `reset`.
    pub halt_on_brk: bool,
}

/// NES bus power-on settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusConfig {
    /// Byte written to internal RAM and work RAM at power-on / reset.
    pub ram_fill: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = CpuConfig::default();
        assert_eq!(c.reset, ResetVector::FromVector);
        assert!(!c.halt_on_brk);
        assert_eq!(BusConfig::default().ram_fill, 0x00);
    }
}

/*!
core::Cpu - Cycle-stepped 6502 façade over `CpuState`.

Step model
==========
Every call to `step` is one CPU clock. The CPU is always in exactly one
`Phase`:

- `AwaitingDecode`: the next clock services a pending DMA stall, NMI or IRQ,
  or fetches and decodes the opcode at PC. Decode resolves the operand,
  advances PC past the instruction and arms `remaining = base + extra - 1`.
- `PendingExecute`: intermediate clocks only count down; the clock on which
  `remaining` reaches 1 runs the semantics through the bus and retires.
- `AwaitingBranchCommit`: a taken branch waits out its 1 or 2 penalty
  clocks. PC moves to the target on the last one.
- `Interrupt`: a 7-clock NMI/IRQ entry; the pushes and vector load happen on
  the last clock.
- `DmaStall`: the CPU is held off the bus while OAM DMA runs.

Executing without a decode is unrepresentable: the decoded instruction lives
inside the phase that will execute it.

Interrupts
==========
`trigger_nmi` latches an edge; `set_irq_line` drives the level-sensitive IRQ
input. Both are sampled only at a decode boundary: NMI first, then IRQ when I
is clear.
*/

use log::{debug, trace};

use crate::bus::{Device, SystemBus};
use crate::config::{CpuConfig, ResetVector};
use crate::cpu::addressing::{AddressingMode, Operand, resolve};
use crate::cpu::cycles::{INTERRUPT_CYCLES, branch_penalty, dma_stall};
use crate::cpu::dispatch::{self, branches, control_flow::IRQ_VECTOR};
use crate::cpu::execute::{Outcome, push_status, push_word, set_flag};
use crate::cpu::state::{CpuState, IRQ_DISABLE};
use crate::cpu::table::{Op, lookup};
use crate::error::{CpuError, StackFault};

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Scratch produced by the decode clock and consumed by the execute clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: u8,
    /// Address of the opcode byte.
    pub pc: u16,
    pub op: Op,
    pub mode: AddressingMode,
    pub operand: Operand,
    /// Operand bytes after the opcode.
    pub len: u8,
    /// Page-cross cycles added at decode.
    pub extra_cycles: u8,
    /// Total clocks the instruction takes, including branch penalties once
    /// they are known.
    pub cycles: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    Nmi,
    Irq,
}

impl Interrupt {
    pub fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingDecode,
    PendingExecute { decoded: Decoded, remaining: u8 },
    AwaitingBranchCommit { decoded: Decoded, target: u16, remaining: u8 },
    Interrupt { kind: Interrupt, remaining: u8 },
    DmaStall { remaining: u16 },
}

/// Report for a retired instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retired {
    pub opcode: u8,
    pub op: Op,
    /// Address of the opcode byte.
    pub pc: u16,
    /// Clocks the instruction took.
    pub cycles: u8,
    /// First stack wrap raised while executing, if any.
    pub stack_fault: Option<StackFault>,
}

/// What one clock did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// Opcode fetched and decoded.
    Decode,
    /// Intermediate clock of an instruction, branch penalty or interrupt entry.
    Busy,
    Retired(Retired),
    /// Last clock of an interrupt entry; PC now holds the handler address.
    Interrupted(Interrupt),
    /// Held off the bus by OAM DMA.
    Stalled,
    /// Stopped after BRK (`CpuConfig::halt_on_brk`); no clock consumed.
    Halted,
}

/// Register snapshot for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CpuSnapshot {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub status: u8,
    pub cycles: u64,
}

impl std::fmt::Display for CpuSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04X}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }
}

#[derive(Debug, Clone)]
pub struct Cpu {
    state: CpuState,
    config: CpuConfig,
    phase: Phase,
    halted: bool,
    nmi_pending: bool,
    irq_line: bool,
    dma_pending: Option<u16>,
    total_cycles: u64,
    last_stack_fault: Option<StackFault>,
    stack_fault_count: u64,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Construct a CPU with power-up register values and PC = 0. Call
    /// `reset` to seed PC from the configured reset policy.
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            state: CpuState::new(),
            config,
            phase: Phase::AwaitingDecode,
            halted: false,
            nmi_pending: false,
            irq_line: false,
            dma_pending: None,
            total_cycles: 0,
            last_stack_fault: None,
            stack_fault_count: 0,
        }
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Power-on registers, PC per `CpuConfig::reset`, and a clean phase.
    /// Takes effect immediately.
    pub fn reset<B: SystemBus>(&mut self, bus: &mut B) {
        self.state = CpuState::new();
        self.state.set_pc(match self.config.reset {
            ResetVector::FromVector => bus.read_word(Device::Cpu, RESET_VECTOR),
            ResetVector::Fixed(addr) => addr,
        });
        self.phase = Phase::AwaitingDecode;
        self.halted = false;
        self.nmi_pending = false;
        self.irq_line = false;
        self.dma_pending = None;
        self.total_cycles = 0;
        self.last_stack_fault = None;
        self.stack_fault_count = 0;
        debug!("cpu reset: pc=${:04X}", self.state.pc());
    }

    /// Advance one clock.
    ///
    /// Returns `Err(CpuError::DecodeFault)` when the opcode at PC has no
    /// canonical operation; PC and phase are left untouched so the host can
    /// inspect the fault.
    pub fn step<B: SystemBus>(&mut self, bus: &mut B) -> Result<Cycle, CpuError> {
        if self.halted {
            return Ok(Cycle::Halted);
        }

        let cycle = match self.phase {
            Phase::AwaitingDecode => self.decode(bus)?,
            Phase::PendingExecute { decoded, remaining } => {
                if remaining > 1 {
                    self.phase = Phase::PendingExecute {
                        decoded,
                        remaining: remaining - 1,
                    };
                    Cycle::Busy
                } else {
                    self.phase = Phase::AwaitingDecode;
                    self.execute(decoded, bus)
                }
            }
            Phase::AwaitingBranchCommit {
                decoded,
                target,
                remaining,
            } => {
                if remaining > 1 {
                    self.phase = Phase::AwaitingBranchCommit {
                        decoded,
                        target,
                        remaining: remaining - 1,
                    };
                    Cycle::Busy
                } else {
                    self.phase = Phase::AwaitingDecode;
                    self.state.set_pc(target);
                    self.retire(decoded, Outcome::default(), bus)
                }
            }
            Phase::Interrupt { kind, remaining } => {
                if remaining > 1 {
                    self.phase = Phase::Interrupt {
                        kind,
                        remaining: remaining - 1,
                    };
                    Cycle::Busy
                } else {
                    self.phase = Phase::AwaitingDecode;
                    self.enter_interrupt(kind, bus);
                    Cycle::Interrupted(kind)
                }
            }
            Phase::DmaStall { remaining } => {
                self.phase = if remaining > 1 {
                    Phase::DmaStall {
                        remaining: remaining - 1,
                    }
                } else {
                    Phase::AwaitingDecode
                };
                Cycle::Stalled
            }
        };

        self.total_cycles += 1;
        Ok(cycle)
    }

    /// Decode-boundary clock.
    fn decode<B: SystemBus>(&mut self, bus: &mut B) -> Result<Cycle, CpuError> {
        if let Some(stall) = self.dma_pending.take() {
            debug!("oam dma: stalling {stall} cycles");
            if stall > 1 {
                self.phase = Phase::DmaStall {
                    remaining: stall - 1,
                };
            }
            return Ok(Cycle::Stalled);
        }

        let pending = if self.nmi_pending {
            self.nmi_pending = false;
            Some(Interrupt::Nmi)
        } else if self.irq_line && !self.state.is_flag_set(IRQ_DISABLE) {
            Some(Interrupt::Irq)
        } else {
            None
        };
        if let Some(kind) = pending {
            self.phase = Phase::Interrupt {
                kind,
                remaining: INTERRUPT_CYCLES - 1,
            };
            return Ok(Cycle::Busy);
        }

        let pc = self.state.pc();
        let opcode = bus.read(Device::Cpu, pc);
        let ins = lookup(opcode);
        if ins.op == Op::DoesNotExist {
            return Err(CpuError::DecodeFault { opcode, pc });
        }

        let resolved = resolve(ins.mode, pc, &self.state, bus);
        self.state.advance_pc(1 + resolved.len as u16);
        let cycles = ins.cycles + resolved.extra_cycles;
        let decoded = Decoded {
            opcode,
            pc,
            op: ins.op,
            mode: ins.mode,
            operand: resolved.operand,
            len: resolved.len,
            extra_cycles: resolved.extra_cycles,
            cycles,
        };
        trace!(
            "{:04X}  {:02X}  {} {:?} {:?} ({} cyc)",
            pc,
            opcode,
            ins.op.mnemonic(),
            ins.mode,
            resolved.operand,
            cycles
        );

        if cycles <= 1 {
            return Ok(self.execute(decoded, bus));
        }
        self.phase = Phase::PendingExecute {
            decoded,
            remaining: cycles - 1,
        };
        Ok(Cycle::Decode)
    }

    /// Terminal clock of an instruction.
    fn execute<B: SystemBus>(&mut self, mut decoded: Decoded, bus: &mut B) -> Cycle {
        if let Some(taken) = branches::taken(decoded.op, &self.state) {
            if taken {
                let displacement = match decoded.operand {
                    Operand::Address(addr) => bus.read(Device::Cpu, addr),
                    _ => 0,
                };
                let next = self.state.pc();
                let target = branches::target(next, displacement);
                let penalty = branch_penalty(next, target);
                decoded.cycles += penalty;
                self.phase = Phase::AwaitingBranchCommit {
                    decoded,
                    target,
                    remaining: penalty,
                };
                return Cycle::Busy;
            }
            return self.retire(decoded, Outcome::default(), bus);
        }

        let mut out = Outcome::default();
        let handled = dispatch::execute(
            decoded.op,
            decoded.operand,
            &mut self.state,
            bus,
            &mut out,
        );
        debug_assert!(handled, "no handler for {:?}", decoded.op);
        self.retire(decoded, out, bus)
    }

    fn retire<B: SystemBus>(&mut self, decoded: Decoded, out: Outcome, bus: &mut B) -> Cycle {
        self.note_faults(&out);
        if bus.take_dma_request() {
            self.dma_pending = Some(dma_stall(self.total_cycles));
        }
        if out.brk && self.config.halt_on_brk {
            debug!("halted on BRK at ${:04X}", decoded.pc);
            self.halted = true;
        }
        Cycle::Retired(Retired {
            opcode: decoded.opcode,
            op: decoded.op,
            pc: decoded.pc,
            cycles: decoded.cycles,
            stack_fault: out.stack_fault,
        })
    }

    /// Last clock of an interrupt entry: push PC and status (B = 0), set I,
    /// load the vector.
    fn enter_interrupt<B: SystemBus>(&mut self, kind: Interrupt, bus: &mut B) {
        let mut out = Outcome::default();
        let pc = self.state.pc();
        push_word(&mut self.state, bus, &mut out, pc);
        push_status(&mut self.state, bus, &mut out, false);
        set_flag(&mut self.state, IRQ_DISABLE, true);
        let handler = bus.read_word(Device::Cpu, kind.vector());
        self.state.set_pc(handler);
        self.note_faults(&out);
        debug!("{kind:?} entry: ${pc:04X} -> ${handler:04X}");
    }

    fn note_faults(&mut self, out: &Outcome) {
        if let Some(fault) = out.stack_fault {
            self.last_stack_fault = Some(fault);
            self.stack_fault_count += out.fault_count as u64;
        }
    }

    // ---------------------------------------------------------------------
    // Interrupt inputs / halt control
    // ---------------------------------------------------------------------

    /// Latch an NMI edge; serviced at the next decode boundary.
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Drive the level-sensitive IRQ input.
    pub fn set_irq_line(&mut self, asserted: bool) {
        self.irq_line = asserted;
    }

    pub fn irq_line(&self) -> bool {
        self.irq_line
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Leave the halted state entered on BRK.
    pub fn resume(&mut self) {
        self.halted = false;
    }

    // ---------------------------------------------------------------------
    // Inspection
    // ---------------------------------------------------------------------

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Direct register access for hosts and test harnesses.
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Clocks left before the current phase completes (0 at a decode boundary).
    pub fn cycles_remaining(&self) -> u16 {
        match self.phase {
            Phase::AwaitingDecode => 0,
            Phase::PendingExecute { remaining, .. }
            | Phase::AwaitingBranchCommit { remaining, .. }
            | Phase::Interrupt { remaining, .. } => remaining as u16,
            Phase::DmaStall { remaining } => remaining,
        }
    }

    /// True while a taken branch waits to commit its target.
    pub fn branch_deferred(&self) -> bool {
        matches!(self.phase, Phase::AwaitingBranchCommit { .. })
    }

    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn last_stack_fault(&self) -> Option<StackFault> {
        self.last_stack_fault
    }

    pub fn stack_fault_count(&self) -> u64 {
        self.stack_fault_count
    }

    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            pc: self.state.pc(),
            a: self.state.a(),
            x: self.state.x(),
            y: self.state.y(),
            sp: self.state.sp(),
            status: self.state.status(),
            cycles: self.total_cycles,
        }
    }

    pub fn a(&self) -> u8 {
        self.state.a()
    }
    pub fn x(&self) -> u8 {
        self.state.x()
    }
    pub fn y(&self) -> u8 {
        self.state.y()
    }
    pub fn sp(&self) -> u8 {
        self.state.sp()
    }
    pub fn pc(&self) -> u16 {
        self.state.pc()
    }
    pub fn status(&self) -> u8 {
        self.state.status()
    }
}

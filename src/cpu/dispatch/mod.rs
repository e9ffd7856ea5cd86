/*!
dispatch - Execute-cycle semantics, split by opcode family.

Overview
========
The step machine in `core` decodes an opcode, resolves its operand and waits
out the instruction's cycles. On the terminal cycle it calls `execute`, which
offers the operation to each family handler in turn:

```text
    load_store   LDA LDX LDY STA STX STY
    logical      AND ORA EOR BIT
    arithmetic   ADC SBC
    compare      CMP CPX CPY
    rmw          ASL LSR ROL ROR INC DEC
    control_flow JMP JSR RTS RTI BRK
    misc         transfers, stack, flags, INX/INY/DEX/DEY, NOP
```

Branches are not executed here: their timing depends on the outcome, so the
step machine asks `branches::taken` and commits the target itself.

Return Contract
===============
Each family `handle` returns true when it recognized and executed the
operation. Handlers never count cycles.
*/

use crate::bus::SystemBus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::Outcome;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Op;

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

/// Run the semantics of a non-branch operation. Returns false for branches
/// and `Op::DoesNotExist`.
pub(crate) fn execute<C: CpuRegs, B: SystemBus>(
    op: Op,
    operand: Operand,
    cpu: &mut C,
    bus: &mut B,
    out: &mut Outcome,
) -> bool {
    load_store::handle(op, operand, cpu, bus)
        || logical::handle(op, operand, cpu, bus)
        || arithmetic::handle(op, operand, cpu, bus)
        || compare::handle(op, operand, cpu, bus)
        || rmw::handle(op, operand, cpu, bus)
        || control_flow::handle(op, operand, cpu, bus, out)
        || misc::handle(op, cpu, bus, out)
}

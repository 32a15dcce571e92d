//! Execute: dispatches the instruction's executor and publishes the
//! register mask Decode's hazard check reads.

use crate::instr::Instruction;
use crate::pipeline::stage_reg::StageRegister;
use crate::pipeline::wires::Wires;

/// Runs one cycle of the Execute stage.
pub fn run(
    wires: &mut Wires,
    de_reg: &StageRegister<Option<Instruction>>,
    em_reg: &mut StageRegister<Option<Instruction>>,
) {
    let payload = de_reg.read().clone();
    wires.execute_stage_rd_mask = 0;

    if wires.em_stall && payload.is_some() {
        wires.de_stall = true;
    }

    if wires.memory_to_all_flush {
        em_reg.write(None);
        return;
    }

    let Some(mut instruction) = payload else {
        em_reg.write(None);
        return;
    };

    if wires.em_stall {
        // Memory is mid-access on the instruction ahead of this one; this
        // instruction cannot advance into Execute/Memory yet. The
        // Decode/Execute latch is held (see `de_stall` above), so the same
        // instruction is re-read here next cycle.
        em_reg.write(None);
        return;
    }

    instruction.execute();
    wires.execute_stage_rd_mask = 1u32 << instruction.rd;
    em_reg.write(Some(instruction));
}

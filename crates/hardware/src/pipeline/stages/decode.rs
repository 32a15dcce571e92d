//! Decode: reads source operands out of the register file and detects RAW
//! hazards.
//!
//! A hazard never produces a forwarded value — it produces a bubble in
//! Decode/Execute and a request (via `fd_stall`) that Fetch hold the same
//! instruction for another attempt next cycle.

use crate::instr::Instruction;
use crate::pipeline::hazards;
use crate::pipeline::stage_reg::StageRegister;
use crate::pipeline::wires::Wires;
use crate::reg::RegisterFile;
use crate::stats::Stats;

/// Runs one cycle of the Decode stage.
pub fn run(
    wires: &mut Wires,
    fd_reg: &StageRegister<Option<Instruction>>,
    de_reg: &mut StageRegister<Option<Instruction>>,
    rf: &mut RegisterFile,
    stats: &mut Stats,
) {
    let payload = fd_reg.read().clone();

    if wires.de_stall && payload.is_some() {
        wires.fd_stall = true;
    }

    if wires.memory_to_all_flush {
        de_reg.write(None);
        return;
    }

    let Some(mut instruction) = payload else {
        de_reg.write(None);
        return;
    };

    let mask = hazards::decode_mask(instruction.rs1, instruction.rs2);
    if hazards::has_hazard(mask, wires.execute_stage_rd_mask, wires.memory_stage_rd_mask) {
        wires.fd_stall = true;
        stats.data_hazard_stalls += 1;
        tracing::debug!(pc = %instruction.pc, name = instruction.name, "data hazard stall");
        de_reg.write(None);
        return;
    }

    let (rs1_v, _, rs2_v, _) = rf.read_sources(instruction.rs1, instruction.rs2);
    instruction.rs1_v = rs1_v;
    instruction.rs2_v = rs2_v;

    if instruction.has_destination() {
        rf.invalidate(instruction.rd);
    }

    de_reg.write(Some(instruction));
}

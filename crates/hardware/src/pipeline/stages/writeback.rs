//! Writeback: retires an instruction by committing its result to the
//! register file. The last stage in program order; it has no stage
//! register of its own to write into.

use crate::instr::Instruction;
use crate::isa::abi::name as reg;
use crate::isa::instruction::Format;
use crate::pipeline::stage_reg::StageRegister;
use crate::reg::RegisterFile;
use crate::stats::Stats;

/// Runs one cycle of the Writeback stage.
pub fn run(mwb_reg: &StageRegister<Option<Instruction>>, rf: &mut RegisterFile, stats: &mut Stats) {
    let Some(instruction) = mwb_reg.read() else {
        return;
    };

    if instruction.has_destination() {
        rf.writeback(instruction.rd, instruction.rd_v);
    }

    stats.instructions_retired += 1;
    tracing::trace!(pc = %instruction.pc, "{}", trace_line(instruction));
}

/// Formats a retiring instruction for trace output, per its format:
/// `name rs1, rs2, rd` (R), `name rs1, rd, imm(hex)` (I), `name rs1, rs2,
/// imm(hex)` (S, B), `name rd, imm(hex)` (U, J) — all using ABI register
/// names, same operand order as [`crate::isa::disasm::disassemble`].
fn trace_line(instruction: &Instruction) -> String {
    let (name, rs1, rs2, rd, imm_v) = (
        instruction.name,
        instruction.rs1,
        instruction.rs2,
        instruction.rd,
        instruction.imm_v,
    );

    match instruction.format {
        Format::R => format!("{name} {}, {}, {}", reg(rs1), reg(rs2), reg(rd)),
        Format::I => format!("{name} {}, {}, {imm_v:#x}", reg(rs1), reg(rd)),
        Format::S | Format::B => format!("{name} {}, {}, {imm_v:#x}", reg(rs1), reg(rs2)),
        Format::U | Format::J => format!("{name} {}, {imm_v:#x}", reg(rd)),
    }
}

//! Memory: the only stage that touches the shared memory port on behalf of
//! data (as opposed to instruction fetch), and the only place a
//! misprediction is detected.
//!
//! A 4-byte load or store never completes in a single cycle: the first beat
//! writes a bubble downstream and asserts `em_stall`, holding the
//! Execute/Memory latch so the same instruction is read again next cycle
//! for the second beat. `memory_iteration`, a function-local static in the
//! reference implementation, is an [`super::engine::Engine`] field here.

use crate::common::addr::Address;
use crate::common::error::SimError;
use crate::instr::Instruction;
use crate::memory::Memory;
use crate::pipeline::stage_reg::StageRegister;
use crate::pipeline::wires::Wires;
use crate::stats::Stats;

/// Runs one cycle of the Memory stage.
///
/// # Errors
///
/// Returns [`SimError::MemoryOutOfRange`] if a load or store beat falls
/// outside the memory image.
pub fn run(
    wires: &mut Wires,
    em_reg: &StageRegister<Option<Instruction>>,
    mwb_reg: &mut StageRegister<Option<Instruction>>,
    memory: &mut Memory,
    memory_iteration: &mut u8,
    stats: &mut Stats,
) -> Result<(), SimError> {
    wires.memory_to_all_flush = false;
    wires.memory_to_fetch_target = Address::new(0);

    let Some(mut instruction) = em_reg.read().clone() else {
        wires.memory_stage_rd_mask = 0;
        mwb_reg.write(None);
        return Ok(());
    };

    wires.memory_stage_rd_mask = 1u32 << instruction.rd;

    if (instruction.is_jump() || instruction.is_branch()) && instruction.mispredicted() {
        wires.memory_to_all_flush = true;
        wires.memory_to_fetch_target = instruction.new_pc;
        stats.flushes += 1;
        tracing::debug!(
            pc = %instruction.pc,
            target = %instruction.new_pc,
            "flush: misprediction detected at Memory",
        );
    }

    if instruction.is_load() || instruction.is_store() {
        wires.memory_port_busy = true;
        access(&mut instruction, memory, memory_iteration)?;

        if instruction.memory_size == 4 && *memory_iteration == 0 {
            wires.em_stall = true;
            *memory_iteration = 1;
            mwb_reg.write(None);
            return Ok(());
        }
        *memory_iteration = 0;
    }

    mwb_reg.write(Some(instruction));
    Ok(())
}

/// Performs one beat of a load or store.
///
/// The per-beat size is `1` when `memory_size == 1`, `2` otherwise — a
/// 4-byte access is always split into two 2-byte beats, never a single
/// 4-byte one. This is a preserved idiosyncrasy of the reference
/// implementation, not a hardware requirement.
fn access(
    instruction: &mut Instruction,
    memory: &mut Memory,
    memory_iteration: &u8,
) -> Result<(), SimError> {
    let beat_size = if instruction.memory_size == 1 { 1 } else { 2 };
    let beat_addr = if *memory_iteration == 0 {
        instruction.memory_addr
    } else {
        instruction.memory_addr.wrapping_add(2)
    };

    if instruction.is_load() {
        let raw = memory.read(beat_addr, beat_size)?;
        instruction.rd_v = if *memory_iteration == 0 {
            raw
        } else {
            instruction.rd_v | (raw << 16)
        };
        if !(instruction.memory_size == 4 && *memory_iteration == 0) {
            instruction.rd_v = extend(instruction.rd_v, instruction.memory_size, instruction.name);
        }
    } else {
        let value = if *memory_iteration == 0 {
            instruction.rs2_v
        } else {
            instruction.rs2_v >> 16
        };
        memory.write(beat_addr, value, beat_size)?;
    }
    Ok(())
}

/// Applies the sign/zero extension a load's mnemonic calls for.
///
/// `lw` is already full-width; `lbu`/`lhu` are already zero-extended by
/// [`Memory::read`]. Only `lb`/`lh` need the high bits replaced.
fn extend(raw: u32, size: u32, name: &str) -> u32 {
    match (size, name) {
        (1, "lb") => i32::from(raw as u8 as i8) as u32,
        (2, "lh") => i32::from(raw as u16 as i16) as u32,
        _ => raw,
    }
}

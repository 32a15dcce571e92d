//! Fetch: pulls the next instruction word out of memory, two bytes at a
//! time, and hands it to Decode.
//!
//! Every instruction costs two cycles to fetch, one per half-word beat,
//! because Fetch shares its single memory port with Memory and Memory
//! always wins. `fetch_iteration` and `fetch_bytes`, function-local statics
//! in the reference implementation, are fields on [`super::engine::Engine`]
//! so they survive exactly the cycles they need to and nothing more.

use crate::common::addr::Address;
use crate::common::error::SimError;
use crate::instr::Instruction;
use crate::memory::Memory;
use crate::pipeline::stage_reg::StageRegister;
use crate::pipeline::wires::Wires;

/// Runs one cycle of the Fetch stage.
///
/// # Errors
///
/// Returns [`SimError`] if the second beat completes a word that fails to
/// decode, or if either beat's address falls outside the memory image.
#[allow(clippy::too_many_arguments)]
pub fn run(
    wires: &mut Wires,
    pc_reg: &mut StageRegister<Option<Address>>,
    fd_reg: &mut StageRegister<Option<Instruction>>,
    memory: &Memory,
    fetch_iteration: &mut u8,
    fetch_bytes: &mut u32,
) -> Result<(), SimError> {
    if wires.fd_stall && fd_reg.read().is_some() {
        wires.pc_stall = true;
    }

    if wires.memory_to_all_flush {
        *fetch_iteration = 0;
        *fetch_bytes = 0;
        pc_reg.write(Some(wires.memory_to_fetch_target));
        fd_reg.write(None);
        tracing::debug!(target = %wires.memory_to_fetch_target, "flush: fetch redirected");
        return Ok(());
    }

    let Some(pc) = *pc_reg.read() else {
        fd_reg.write(None);
        return Ok(());
    };

    if wires.memory_port_busy {
        wires.pc_stall = true;
        fd_reg.write(None);
        return Ok(());
    }

    if *fetch_iteration == 0 {
        *fetch_bytes = memory.read(pc, 2)?;
        *fetch_iteration = 1;
        wires.pc_stall = true;
        fd_reg.write(None);
        return Ok(());
    }

    if wires.pc_stall {
        fd_reg.write(None);
        return Ok(());
    }

    let high = memory.read(pc.wrapping_add(2), 2)?;
    *fetch_bytes = (*fetch_bytes & 0xFFFF) | (high << 16);
    let instruction = Instruction::decode(*fetch_bytes, pc)?;
    *fetch_iteration = 0;
    pc_reg.write(Some(pc.wrapping_add(4)));
    fd_reg.write(Some(instruction));
    Ok(())
}

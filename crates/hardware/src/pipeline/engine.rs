//! The five-stage in-order pipeline engine.
//!
//! `Engine::step` is the entire machine: it runs the five stage bodies in
//! reverse pipeline order, then commits whichever stage registers were not
//! stalled this cycle. No stage ever runs out of this order, and nothing
//! about that order is configurable — a pipeline with out-of-order stage
//! evaluation would let a flush or stall miss the very stage it has to
//! reach this cycle to behave correctly (see the worked scenarios in the
//! instruction set documentation for what goes wrong if fetch runs before
//! decode).

use crate::common::addr::Address;
use crate::common::error::SimError;
use crate::instr::Instruction;
use crate::memory::Memory;
use crate::pipeline::stage_reg::StageRegister;
use crate::pipeline::stages::{decode, execute, fetch, memory as memory_stage, writeback};
use crate::pipeline::wires::Wires;
use crate::reg::RegisterFile;
use crate::stats::Stats;

/// The pipeline's mutable state: the five stage registers, the register
/// file, memory, and the handful of fields that used to be function-local
/// statics in the reference implementation (`fetch_iteration`,
/// `fetch_bytes`, `memory_iteration`).
#[derive(Debug)]
pub struct Engine {
    rf: RegisterFile,
    memory: Memory,
    pc: StageRegister<Option<Address>>,
    fetch_decode: StageRegister<Option<Instruction>>,
    decode_execute: StageRegister<Option<Instruction>>,
    execute_memory: StageRegister<Option<Instruction>>,
    memory_writeback: StageRegister<Option<Instruction>>,
    fetch_iteration: u8,
    fetch_bytes: u32,
    memory_iteration: u8,
    stats: Stats,
}

impl Engine {
    /// Builds an engine over a loaded memory image, priming the pipeline
    /// with the image's entry point.
    ///
    /// Mirrors the reference constructor: the stack pointer the loader
    /// derived is installed into the register file, and every stage
    /// register is clocked once so the entry PC is latched and visible to
    /// the first real call to [`Engine::step`].
    pub fn new(memory: Memory) -> Self {
        let mut rf = RegisterFile::new();
        rf.set_stack_pointer(memory.get_stack_pointer());

        let mut pc = StageRegister::new(None);
        pc.write(Some(memory.get_start_pc()));
        pc.clock();

        let mut fetch_decode = StageRegister::new(None);
        fetch_decode.clock();
        let mut decode_execute = StageRegister::new(None);
        decode_execute.clock();
        let mut execute_memory = StageRegister::new(None);
        execute_memory.clock();
        let mut memory_writeback = StageRegister::new(None);
        memory_writeback.clock();

        Self {
            rf,
            memory,
            pc,
            fetch_decode,
            decode_execute,
            execute_memory,
            memory_writeback,
            fetch_iteration: 0,
            fetch_bytes: 0,
            memory_iteration: 0,
            stats: Stats::default(),
        }
    }

    /// Returns the current simulation statistics.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Returns the register file, for dumping or inspection after a run.
    pub fn registers(&self) -> &RegisterFile {
        &self.rf
    }

    /// Advances the pipeline by exactly one cycle.
    ///
    /// Runs Writeback, Memory, Execute, Decode, then Fetch — in that order
    /// — then applies the clock-edge discipline: each of the PC,
    /// Fetch/Decode, Decode/Execute, and Execute/Memory stage registers
    /// clocks unless its stall wire was asserted this cycle (in which case
    /// the wire is simply cleared, a one-shot signal, and the latch is
    /// left alone); Memory/Writeback always clocks, because nothing ever
    /// stalls the stage that has already retired.
    ///
    /// # Errors
    ///
    /// Returns [`SimError`] the first time any stage's memory access falls
    /// out of range or any fetched word fails to decode. Either is fatal:
    /// there is no trap handler to deliver it to.
    pub fn step(&mut self) -> Result<(), SimError> {
        let mut wires = Wires::default();

        writeback::run(&self.memory_writeback, &mut self.rf, &mut self.stats);
        memory_stage::run(
            &mut wires,
            &self.execute_memory,
            &mut self.memory_writeback,
            &mut self.memory,
            &mut self.memory_iteration,
            &mut self.stats,
        )?;
        execute::run(&mut wires, &self.decode_execute, &mut self.execute_memory);
        decode::run(
            &mut wires,
            &self.fetch_decode,
            &mut self.decode_execute,
            &mut self.rf,
            &mut self.stats,
        );
        fetch::run(
            &mut wires,
            &mut self.pc,
            &mut self.fetch_decode,
            &self.memory,
            &mut self.fetch_iteration,
            &mut self.fetch_bytes,
        )?;

        if wires.pc_stall {
            wires.pc_stall = false;
        } else {
            self.pc.clock();
        }
        if wires.fd_stall {
            wires.fd_stall = false;
        } else {
            self.fetch_decode.clock();
        }
        if wires.de_stall {
            wires.de_stall = false;
        } else {
            self.decode_execute.clock();
        }
        if wires.em_stall {
            wires.em_stall = false;
        } else {
            self.execute_memory.clock();
        }
        self.memory_writeback.clock();

        self.stats.cycles += 1;
        Ok(())
    }
}

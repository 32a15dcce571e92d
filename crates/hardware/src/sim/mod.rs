//! Program loading and the top-level [`Simulator`] handle.
//!
//! [`loader`] turns an ELF path into a loaded [`crate::memory::Memory`];
//! [`Simulator`] pairs that memory with a [`crate::pipeline::engine::Engine`]
//! and is the type the CLI drives one step at a time.

pub mod loader;

use crate::common::error::SimError;
use crate::config::Config;
use crate::pipeline::engine::Engine;
use crate::reg::RegisterFile;
use crate::stats::Stats;

/// Owns the pipeline engine for a single simulation run.
///
/// A thin wrapper: almost everything interesting lives in
/// [`Engine`]. `Simulator` exists so callers construct a run from a path
/// and a [`Config`] rather than having to load an ELF and build an
/// [`Engine`] themselves.
#[derive(Debug)]
pub struct Simulator {
    engine: Engine,
    step_budget: u64,
}

impl Simulator {
    /// Loads `elf_path` per `config` and builds a simulator ready to step.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::LoaderFailure`] if the image cannot be loaded.
    pub fn from_elf(elf_path: &str, config: &Config) -> Result<Self, SimError> {
        let memory = loader::load(elf_path, config)?;
        Ok(Self {
            engine: Engine::new(memory),
            step_budget: config.step_budget,
        })
    }

    /// Runs the pipeline until it has executed `step_budget` cycles or a
    /// stage hits a fatal error.
    ///
    /// Returns normally (with whatever statistics accumulated so far) when
    /// the budget is exhausted; a step budget is a diagnostic cutoff, not a
    /// program-visible halt instruction, since this ISA has none.
    ///
    /// # Errors
    ///
    /// Returns whatever [`SimError`] the failing step returned.
    pub fn run(&mut self) -> Result<(), SimError> {
        for _ in 0..self.step_budget {
            self.engine.step()?;
        }
        Ok(())
    }

    /// Advances the simulation by exactly one cycle.
    ///
    /// # Errors
    ///
    /// Returns whatever [`SimError`] the stage bodies returned this cycle.
    pub fn step(&mut self) -> Result<(), SimError> {
        self.engine.step()
    }

    /// Returns the statistics accumulated so far.
    pub fn stats(&self) -> &Stats {
        self.engine.stats()
    }

    /// Returns the register file as it currently stands.
    pub fn registers(&self) -> &RegisterFile {
        self.engine.registers()
    }
}

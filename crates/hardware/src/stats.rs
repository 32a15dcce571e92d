//! Simulation statistics.
//!
//! Scaled down from the reference implementation's cache-hierarchy,
//! branch-predictor, and multi-privilege-mode counters, none of which have
//! a counterpart in this machine: one in-order backend, one always-miss
//! predictor, one flat memory, no modes. What's left is exactly what this
//! pipeline can produce: cycles, retired instructions, stall cycles
//! attributable to a data hazard, and flushes.

use std::fmt;

/// Cycle- and instruction-level counters collected over a simulation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Total cycles executed, including stalled and flushed ones.
    pub cycles: u64,
    /// Instructions that completed Writeback.
    pub instructions_retired: u64,
    /// Cycles Decode asserted a stall for a RAW hazard.
    pub data_hazard_stalls: u64,
    /// Mispredictions detected at Memory (and thus pipeline flushes).
    pub flushes: u64,
}

impl Stats {
    /// Returns retired instructions per cycle, or `0.0` if no cycles ran.
    #[must_use]
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cycles:               {}", self.cycles)?;
        writeln!(f, "instructions retired: {}", self.instructions_retired)?;
        writeln!(f, "IPC:                  {:.3}", self.ipc())?;
        writeln!(f, "data hazard stalls:   {}", self.data_hazard_stalls)?;
        write!(f, "flushes:              {}", self.flushes)
    }
}

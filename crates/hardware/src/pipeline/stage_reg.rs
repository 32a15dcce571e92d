//! The one-slot latch every stage boundary is built from.
//!
//! The reference implementation gives each boundary (PC, Fetch/Decode,
//! Decode/Execute, Execute/Memory, Memory/Writeback) its own register class
//! with its own `read`/`write`/`clock` methods but identical bodies. Here
//! that's one generic type, instantiated once per boundary: `StageRegister<
//! Address>` for the PC, and `StageRegister<Option<Instruction>>` for the
//! other four, where `None` is a bubble.

/// A single staged value with explicit read/write/commit phases.
///
/// Within a cycle, every stage body calls [`StageRegister::write`] at most
/// once to stage its output; [`StageRegister::read`] always returns the
/// value latched at the *previous* clock edge, so it is stable no matter how
/// many times a stage re-reads it. [`StageRegister::clock`] is the only
/// thing that moves a staged value into the latch, and the engine only
/// calls it when the cycle's stall wire for this boundary was not asserted.
#[derive(Clone, Debug)]
pub struct StageRegister<T> {
    latched: T,
    staged: T,
}

impl<T: Default> StageRegister<T> {
    /// Creates a stage register already holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            latched: initial,
            staged: T::default(),
        }
    }

    /// Reads the value latched at the last clock edge.
    pub fn read(&self) -> &T {
        &self.latched
    }

    /// Stages a value to become latched at the next clock edge.
    ///
    /// Every stage body writes exactly once per cycle, so there is no need
    /// to clear a stale staged value first — the next `write` simply
    /// replaces it.
    pub fn write(&mut self, value: T) {
        self.staged = value;
    }

    /// Commits the staged value into the latch, dropping whatever was
    /// latched before.
    ///
    /// Skipped by the engine for a cycle in which this boundary's stall
    /// wire is asserted, which is what makes a stall a no-op rather than a
    /// clear: the latch keeps the value it already held, and the staged
    /// value (which a stalled stage typically wrote as a bubble) is simply
    /// discarded.
    pub fn clock(&mut self) {
        self.latched = std::mem::take(&mut self.staged);
    }
}

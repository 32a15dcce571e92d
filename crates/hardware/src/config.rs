//! Simulator configuration.
//!
//! The reference implementation's `Config` is a boot profile: RAM layout,
//! MMIO base addresses, cache hierarchy, branch predictor tables, and more,
//! deserialized from JSON. This machine has none of that to configure —
//! there's one memory, one always-not-taken predictor, and the loaded ELF
//! supplies its own entry point and stack. What's left to configure is just
//! how much memory to give the loaded program beyond its own image, and how
//! many cycles to run before giving up.

use serde::{Deserialize, Serialize};

/// Default memory image size: 1 MiB.
pub const DEFAULT_MEMORY_SIZE: usize = 1 << 20;

/// Default step budget: stop after this many cycles if the program hasn't
/// already halted or faulted.
pub const DEFAULT_STEP_BUDGET: u64 = 1_000_000;

/// The pipeline's only configurable knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Total size, in bytes, of the memory image the loaded program runs
    /// in. Must be at least as large as the ELF image's highest address;
    /// the remainder is available for stack and heap.
    pub memory_size: usize,
    /// Maximum number of cycles [`crate::pipeline::engine::Engine::step`]
    /// is called before the run is abandoned as non-terminating.
    pub step_budget: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            step_budget: DEFAULT_STEP_BUDGET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn default_matches_documented_constants() {
        let config = Config::default();
        assert_eq!(config.memory_size, super::DEFAULT_MEMORY_SIZE);
        assert_eq!(config.step_budget, super::DEFAULT_STEP_BUDGET);
    }

    #[test]
    fn deserializes_from_partial_json_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"step_budget": 50}"#).unwrap();
        assert_eq!(config.step_budget, 50);
        assert_eq!(config.memory_size, super::DEFAULT_MEMORY_SIZE);
    }
}

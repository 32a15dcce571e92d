//! Integration tests for ELF loading and the top-level `Simulator` handle.

/// Loads a real file off disk (via `tempfile`) and runs it to completion.
pub mod loader_integration;

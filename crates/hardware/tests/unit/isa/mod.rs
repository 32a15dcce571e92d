//! ISA-level integration tests: decoder round-trips and disassembly.

/// Property-based decoder round-trip and sign-extension tests.
pub mod decode_properties;
/// Table-driven disassembly scenarios, one row per worked example.
pub mod disasm_scenarios;

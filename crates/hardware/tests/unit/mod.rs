//! Integration tests for the hardware crate, one module per area.

/// Decoder and disassembler properties that need whole-table coverage.
pub mod isa;
/// Whole-pipeline, cycle-by-cycle scenarios driven through [`riscv_core`].
pub mod pipeline;
/// ELF loading exercised end-to-end against a real (synthesized) image.
pub mod sim;

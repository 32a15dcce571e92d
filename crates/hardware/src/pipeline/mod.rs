//! The five-stage in-order pipeline: stage registers, the inter-stage wire
//! bundle, hazard detection, the five stage bodies, and the engine that
//! runs them one cycle at a time.
//!
//! # Stage ordering contract
//!
//! [`engine::Engine::step`] evaluates Writeback, Memory, Execute, Decode,
//! then Fetch — the reverse of program order. A stall or flush signal a
//! stage raises this cycle must reach every upstream stage before that
//! stage runs, and the only way to guarantee that within a single-threaded
//! cycle loop is to run the stages from the output end of the pipeline
//! backward. This ordering is not an optimization; changing it changes
//! which cycle a hazard is detected in, which breaks the cycle-accuracy
//! this simulator exists for.

pub mod engine;
pub mod hazards;
pub mod stage_reg;
pub mod stages;
pub mod wires;

//! One module per pipeline stage, each exposing a single `run` function
//! called once per cycle by [`crate::pipeline::engine::Engine::step`].
//!
//! The engine calls these in reverse pipeline order (Writeback, Memory,
//! Execute, Decode, Fetch) so that a stall or flush signal a later stage
//! raises this cycle is already visible to every earlier stage before it
//! runs — see the module documentation on [`crate::pipeline::engine`].

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory;
pub mod writeback;

//! The control-signal bundle stage bodies use to talk to each other.
//!
//! Every field is re-derived from scratch each cycle by [`super::engine`]
//! before the first stage body runs — there is no field here that carries a
//! value across cycles. A stage reads fields the later-evaluated stages (in
//! program order) already wrote this cycle, and writes the fields the
//! earlier-evaluated stages will read, which is exactly why the five stage
//! bodies run in reverse pipeline order each cycle.

use crate::common::addr::Address;

/// One cycle's worth of inter-stage signalling.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wires {
    /// Asserted by Fetch: hold the PC stage register, do not clock it.
    pub pc_stall: bool,
    /// Asserted by Decode: hold the Fetch/Decode stage register.
    pub fd_stall: bool,
    /// Asserted by Execute: hold the Decode/Execute stage register.
    pub de_stall: bool,
    /// Asserted by Memory: hold the Execute/Memory stage register (the
    /// first beat of a 4-byte load/store).
    pub em_stall: bool,
    /// Asserted by Memory whenever it is not fully idle this cycle: the
    /// single shared memory port is in use, so Fetch may not touch it.
    pub memory_port_busy: bool,
    /// Asserted by Memory when the instruction it holds mispredicted:
    /// Fetch, Decode, and Execute must all turn into bubbles this cycle.
    pub memory_to_all_flush: bool,
    /// The corrected PC to fetch from next cycle, valid only alongside
    /// `memory_to_all_flush`.
    pub memory_to_fetch_target: Address,
    /// `1 << rd` of whichever instruction Execute is processing this cycle,
    /// zero if Execute holds a bubble. Read by Decode's hazard check.
    pub execute_stage_rd_mask: u32,
    /// `1 << rd` of whichever instruction Memory is processing this cycle,
    /// zero if Memory holds a bubble. Read by Decode's hazard check.
    pub memory_stage_rd_mask: u32,
}
